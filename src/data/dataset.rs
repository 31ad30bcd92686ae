//! Corpus records and their JSON persistence.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::EnrichError;

/// Fields owned by the enrichment pass; stale copies are dropped on load.
pub const ENRICHMENT_FIELDS: &[&str] = &[
    "entities",
    "methodologies",
    "relationships",
    "topic_label",
    "topic",
    "auto_keywords",
    "similar_docs",
];

/// One input record. Unknown fields ride along untouched in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: Value,
    #[serde(
        rename = "abstract",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub abstract_text: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Document {
    pub fn new(id: impl Into<Value>, abstract_text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            abstract_text: abstract_text.into(),
            extra: Map::new(),
        }
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Named-entity categories kept in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityType {
    #[serde(rename = "PER")]
    Person,
    #[serde(rename = "ORG")]
    Organization,
    #[serde(rename = "LOC")]
    Location,
    #[serde(rename = "MISC")]
    Misc,
}

impl EntityType {
    /// Map a recognizer label onto a kept category; anything else is discarded.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "PER" => Some(Self::Person),
            "ORG" => Some(Self::Organization),
            "LOC" => Some(Self::Location),
            "MISC" => Some(Self::Misc),
            _ => None,
        }
    }

    pub fn as_label(&self) -> &'static str {
        match self {
            Self::Person => "PER",
            Self::Organization => "ORG",
            Self::Location => "LOC",
            Self::Misc => "MISC",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: EntityType,
}

/// Subject-verb-object triple of lemmas. Serialized as a 3-element array.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelationTriple {
    pub subject_lemma: String,
    pub verb_lemma: String,
    pub object_lemma: String,
}

impl RelationTriple {
    pub fn new(
        subject: impl Into<String>,
        verb: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            subject_lemma: subject.into(),
            verb_lemma: verb.into(),
            object_lemma: object.into(),
        }
    }
}

impl Serialize for RelationTriple {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.subject_lemma, &self.verb_lemma, &self.object_lemma).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RelationTriple {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (subject_lemma, verb_lemma, object_lemma) =
            <(String, String, String)>::deserialize(deserializer)?;
        Ok(Self {
            subject_lemma,
            verb_lemma,
            object_lemma,
        })
    }
}

/// Input record plus every enrichment field. Fields start empty and are
/// written exactly once by the pipeline stage that owns them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedDocument {
    #[serde(flatten)]
    pub document: Document,
    pub entities: Vec<Entity>,
    pub methodologies: Vec<String>,
    pub relationships: Vec<RelationTriple>,
    pub topic_label: String,
    pub topic: usize,
    pub auto_keywords: Vec<String>,
    pub similar_docs: Vec<Value>,
}

impl From<Document> for EnrichedDocument {
    fn from(document: Document) -> Self {
        Self {
            document,
            entities: Vec::new(),
            methodologies: Vec::new(),
            relationships: Vec::new(),
            topic_label: String::new(),
            topic: 0,
            auto_keywords: Vec::new(),
            similar_docs: Vec::new(),
        }
    }
}

/// Parse a JSON array of records.
pub fn parse_documents(raw: &[u8], path: &Path) -> Result<Vec<Document>, EnrichError> {
    let mut documents: Vec<Document> =
        serde_json::from_slice(raw).map_err(|err| EnrichError::DatasetMalformed {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
    for doc in &mut documents {
        for field in ENRICHMENT_FIELDS {
            if doc.extra.shift_remove(*field).is_some() {
                debug!(id = %doc.id, field, "dropping stale enrichment field");
            }
        }
    }
    Ok(documents)
}

/// Read the input corpus.
pub async fn load_documents(path: &Path) -> Result<Vec<Document>, EnrichError> {
    let raw = tokio::fs::read(path)
        .await
        .map_err(|source| EnrichError::DatasetUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
    let documents = parse_documents(&raw, path)?;
    info!(path = %path.display(), count = documents.len(), "loaded documents");
    Ok(documents)
}

/// Render records as 4-space indented UTF-8 JSON.
pub fn render_documents(documents: &[EnrichedDocument]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    documents.serialize(&mut serializer)?;
    Ok(buf)
}

/// Persist the enriched corpus in one step: a sibling temp file is renamed
/// over the destination, so readers never observe partial output.
pub async fn write_documents(path: &Path, documents: &[EnrichedDocument]) -> Result<()> {
    let bytes = render_documents(documents)?;
    let unwritable = |source| EnrichError::OutputUnwritable {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(unwritable)?;
    }
    let tmp = temp_path(path);
    tokio::fs::write(&tmp, &bytes).await.map_err(unwritable)?;
    tokio::fs::rename(&tmp, path).await.map_err(unwritable)?;
    info!(path = %path.display(), count = documents.len(), "wrote enriched documents");
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".partial");
    path.with_file_name(name)
}
