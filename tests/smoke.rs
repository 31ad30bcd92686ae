use assert_cmd::Command;

#[test]
fn cli_help_runs() {
    let mut cmd = Command::cargo_bin("abstract-enricher").expect("binary exists");
    cmd.arg("--help").assert().success();
}

#[test]
fn annotate_prints_entities_and_methodologies() {
    let mut cmd = Command::cargo_bin("abstract-enricher").expect("binary exists");
    let output = cmd
        .args(["annotate", "--text", "O CNPq financia pesquisa em mineração de dados."])
        .output()
        .expect("command runs");
    assert!(output.status.success());
    let analysis: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(analysis["entities"][0]["text"], "CNPq");
    assert_eq!(analysis["entities"][0]["type"], "ORG");
    assert_eq!(analysis["methodologies"][0], "mineração de dados");
}

#[test]
fn enrich_writes_the_corpus() {
    let dir = tempfile::tempdir().expect("tempdir");
    let dataset = dir.path().join("dataset.json");
    let taxonomy = dir.path().join("categories.json");
    let output = dir.path().join("dataset_enriched.json");
    std::fs::write(
        &dataset,
        r#"[{"id": 1, "abstract": "O CNPq financia pesquisa em mineração de dados."},
            {"id": 2, "abstract": null, "venue": "Encontros Bibli"}]"#,
    )
    .expect("write dataset");
    std::fs::write(
        &taxonomy,
        r#"{"children": [{"name": "Bibliometria", "children": [{"name": "Citações"}]}]}"#,
    )
    .expect("write taxonomy");

    Command::cargo_bin("abstract-enricher")
        .expect("binary exists")
        .env("DATA_DIR", dir.path())
        .env("LOG_FORMAT", "json")
        .arg("enrich")
        .arg("--dataset")
        .arg(&dataset)
        .arg("--taxonomy")
        .arg(&taxonomy)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let enriched: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&output).expect("output written")).expect("json");
    assert_eq!(enriched[0]["topic_label"], "Bibliometria");
    assert_eq!(enriched[0]["topic"], 1);
    assert_eq!(enriched[0]["similar_docs"], serde_json::json!([2]));
    assert_eq!(enriched[1]["venue"], "Encontros Bibli");
    assert_eq!(enriched[1]["abstract"], "");
}

#[test]
fn enrich_fails_without_dataset() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = dir.path().join("out.json");
    Command::cargo_bin("abstract-enricher")
        .expect("binary exists")
        .arg("enrich")
        .arg("--dataset")
        .arg(dir.path().join("missing.json"))
        .arg("--output")
        .arg(&output)
        .assert()
        .failure();
    assert!(!output.exists());
}
