//! Rule-based Portuguese annotator used when no external parse is supplied.
//!
//! Tokenization, sentence segmentation, part-of-speech tags and lemmas come
//! from closed-class word lists and suffix rules. Entities are runs of
//! capitalised tokens, labelled through cue words and a small gazetteer.
//! Dependencies are shallow: each verb receives at most one nominal subject
//! (nearest bare nominal to its left) and one direct object (nearest bare
//! nominal to its right), where "bare" means not introduced by a preposition.

use std::collections::{HashMap, HashSet};

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::nlp::{
    annotation::{AnnotatedDoc, Annotator, DependencyRole, EntitySpan, PartOfSpeech, Token},
    stopwords,
};

static TOKEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\w+(?:[-'’]\w+)*|[^\w\s]").expect("valid regex"));

static DETERMINERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "o", "a", "os", "as", "um", "uma", "uns", "umas", "este", "esta", "estes", "estas",
        "esse", "essa", "esses", "essas", "aquele", "aquela", "aqueles", "aquelas", "seu", "sua",
        "seus", "suas", "nosso", "nossa", "nossos", "nossas", "todo", "toda", "todos", "todas",
        "cada", "outro", "outra", "outros", "outras", "algum", "alguma", "alguns", "algumas",
        "diversos", "diversas", "vários", "várias", "mesmo", "mesma", "tal", "tais",
    ]
    .into_iter()
    .collect()
});

static ADPOSITIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("de", "de"), ("da", "de"), ("do", "de"), ("das", "de"), ("dos", "de"),
        ("em", "em"), ("na", "em"), ("no", "em"), ("nas", "em"), ("nos", "em"),
        ("num", "em"), ("numa", "em"), ("por", "por"), ("pela", "por"), ("pelo", "por"),
        ("pelas", "por"), ("pelos", "por"), ("para", "para"), ("com", "com"), ("sem", "sem"),
        ("sobre", "sobre"), ("entre", "entre"), ("ao", "a"), ("aos", "a"), ("à", "a"),
        ("às", "a"), ("até", "até"), ("desde", "desde"), ("após", "após"), ("sob", "sob"),
        ("contra", "contra"), ("durante", "durante"), ("perante", "perante"),
        ("mediante", "mediante"), ("através", "através"), ("acerca", "acerca"),
        ("dessa", "de"), ("desse", "de"), ("desta", "de"), ("deste", "de"), ("nesta", "em"),
        ("neste", "em"), ("nessa", "em"), ("nesse", "em"),
    ]
    .into_iter()
    .collect()
});

static PRONOUNS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "eu", "tu", "ele", "ela", "eles", "elas", "nós", "vós", "você", "vocês", "se", "lhe",
        "lhes", "isso", "isto", "aquilo", "quem", "qual", "quais", "cujo", "cuja", "me", "te",
    ]
    .into_iter()
    .collect()
});

static CONJUNCTIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "e", "ou", "mas", "porém", "contudo", "todavia", "que", "porque", "pois", "como",
        "quando", "embora", "enquanto", "nem", "se", "caso", "portanto", "logo",
    ]
    .into_iter()
    .collect()
});

static AUXILIARIES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("é", "ser"), ("são", "ser"), ("foi", "ser"), ("foram", "ser"), ("ser", "ser"),
        ("sendo", "ser"), ("sido", "ser"), ("era", "ser"), ("eram", "ser"), ("será", "ser"),
        ("serão", "ser"), ("seria", "ser"), ("seriam", "ser"), ("seja", "ser"),
        ("sejam", "ser"), ("está", "estar"), ("estão", "estar"), ("estava", "estar"),
        ("tem", "ter"), ("têm", "ter"), ("tinha", "ter"), ("pode", "poder"),
        ("podem", "poder"), ("poderia", "poder"), ("deve", "dever"), ("devem", "dever"),
        ("há", "haver"), ("houve", "haver"), ("vem", "vir"), ("vêm", "vir"),
    ]
    .into_iter()
    .collect()
});

/// Inflected verb forms whose lemma the suffix rules cannot recover.
static VERB_FORMS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("analisa", "analisar"), ("apresenta", "apresentar"), ("investiga", "investigar"),
        ("discute", "discutir"), ("propõe", "propor"), ("propõem", "propor"),
        ("financia", "financiar"), ("utiliza", "utilizar"), ("descreve", "descrever"),
        ("aborda", "abordar"), ("examina", "examinar"), ("avalia", "avaliar"),
        ("identifica", "identificar"), ("demonstra", "demonstrar"), ("mostra", "mostrar"),
        ("permite", "permitir"), ("busca", "buscar"), ("objetiva", "objetivar"),
        ("visa", "visar"), ("realiza", "realizar"), ("desenvolve", "desenvolver"),
        ("promove", "promover"), ("compara", "comparar"), ("relata", "relatar"),
        ("indica", "indicar"), ("revela", "revelar"), ("sugere", "sugerir"),
        ("oferece", "oferecer"), ("possibilita", "possibilitar"),
        ("caracteriza", "caracterizar"), ("explora", "explorar"), ("estuda", "estudar"),
        ("define", "definir"), ("contribui", "contribuir"), ("evidencia", "evidenciar"),
        ("destaca", "destacar"), ("reflete", "refletir"), ("verifica", "verificar"),
        ("considera", "considerar"), ("enfatiza", "enfatizar"), ("constitui", "constituir"),
        ("envolve", "envolver"), ("mapeia", "mapear"), ("mede", "medir"),
        ("produz", "produzir"), ("publica", "publicar"), ("usa", "usar"),
        ("discutem", "discutir"), ("sugerem", "sugerir"), ("permitem", "permitir"),
        ("contribuem", "contribuir"), ("constituem", "constituir"), ("refletem", "refletir"),
        ("definem", "definir"), ("produzem", "produzir"), ("medem", "medir"),
        ("discutiu", "discutir"), ("permitiu", "permitir"), ("produziu", "produzir"),
        ("descreveu", "descrever"), ("desenvolveu", "desenvolver"), ("fez", "fazer"),
        ("faz", "fazer"), ("fazem", "fazer"), ("traz", "trazer"), ("trazem", "trazer"),
        ("obteve", "obter"), ("obtém", "obter"), ("contém", "conter"), ("mantém", "manter"),
    ]
    .into_iter()
    .collect()
});

/// Words with verbal endings that are nominal in practice.
static NOMINAL_EXCEPTIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "lugar", "mar", "par", "bar", "altar", "olhar", "mulher", "poder", "qualquer", "colher",
        "prazer", "dever", "saber", "ser", "interior", "exterior", "anterior", "posterior",
        "superior", "inferior", "maior", "menor", "melhor", "pior", "autor", "setor", "fator",
        "leitor", "professor", "pesquisador", "editor", "ator", "valor", "bem", "tem",
        "familiar", "auxiliar", "escolar", "militar", "popular", "nuclear", "linear",
    ]
    .into_iter()
    .collect()
});

static ORG_CUES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "universidade", "instituto", "fundação", "associação", "conselho", "ministério",
        "biblioteca", "faculdade", "escola", "centro", "rede", "programa", "departamento",
        "sociedade", "agência", "secretaria", "comissão", "federação", "museu", "arquivo",
        "empresa", "grupo", "laboratório", "núcleo", "organização", "editora", "revista",
    ]
    .into_iter()
    .collect()
});

static PLACES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "brasil", "portugal", "espanha", "frança", "argentina", "chile", "méxico", "colômbia",
        "estados unidos", "canadá", "alemanha", "itália", "inglaterra", "reino unido",
        "china", "japão", "índia", "áfrica", "europa", "américa", "américa latina",
        "são paulo", "rio de janeiro", "minas gerais", "bahia", "pernambuco", "paraná",
        "santa catarina", "rio grande do sul", "brasília", "goiás", "ceará", "pará",
        "amazonas", "amazônia", "nordeste", "sudeste", "lisboa", "porto", "belo horizonte",
        "salvador", "recife", "fortaleza", "curitiba", "porto alegre", "florianópolis",
    ]
    .into_iter()
    .collect()
});

const ENTITY_CONNECTORS: &[&str] = &["de", "da", "do", "das", "dos"];

/// Dictionary and suffix-rule annotator for Portuguese abstracts.
#[derive(Debug, Default, Clone)]
pub struct LexiconAnnotator;

impl LexiconAnnotator {
    pub fn new() -> Self {
        Self
    }

    /// Annotate a single text.
    pub fn annotate_one(&self, text: &str) -> AnnotatedDoc {
        let mut tokens = tokenize(text);
        let sentences = split_sentences(&tokens);
        for range in &sentences {
            let mut prev: Option<PartOfSpeech> = None;
            for idx in range.clone() {
                let sentence_initial = idx == range.start;
                let (pos, lemma) = tag(&tokens[idx].text, sentence_initial, prev);
                let token = &mut tokens[idx];
                token.pos = pos;
                token.lemma = lemma;
                token.is_punct = pos == PartOfSpeech::Punctuation;
                token.is_stop = !token.is_punct && stopwords::is_stopword(&token.text);
                if !token.is_punct {
                    prev = Some(pos);
                }
            }
            attach_arguments(&mut tokens, range.clone());
        }
        let entities = recognize_entities(&tokens, &sentences);
        AnnotatedDoc {
            text: text.to_string(),
            tokens,
            sentences,
            entities,
        }
    }
}

impl Annotator for LexiconAnnotator {
    fn name(&self) -> &'static str {
        "lexicon"
    }

    fn annotate(&self, texts: &[String]) -> Result<Vec<AnnotatedDoc>> {
        Ok(texts.iter().map(|text| self.annotate_one(text)).collect())
    }
}

/// Split text into word and punctuation tokens with byte offsets.
pub fn tokenize(text: &str) -> Vec<Token> {
    TOKEN_PATTERN
        .find_iter(text)
        .map(|m| Token {
            text: m.as_str().to_string(),
            start: m.start(),
            end: m.end(),
            lemma: m.as_str().to_lowercase(),
            pos: PartOfSpeech::Other,
            dep: DependencyRole::Other,
            head: None,
            is_stop: false,
            is_punct: false,
        })
        .collect()
}

fn split_sentences(tokens: &[Token]) -> Vec<std::ops::Range<usize>> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for (idx, token) in tokens.iter().enumerate() {
        if matches!(token.text.as_str(), "." | "!" | "?") {
            sentences.push(start..idx + 1);
            start = idx + 1;
        }
    }
    if start < tokens.len() {
        sentences.push(start..tokens.len());
    }
    sentences
}

fn is_capitalized(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

/// Mixed-case or all-caps words such as `CNPq`, `SciELO`, `UNESCO`.
fn is_acronym_like(word: &str) -> bool {
    word.chars().count() >= 2 && word.chars().skip(1).any(char::is_uppercase)
}

fn tag(word: &str, sentence_initial: bool, prev: Option<PartOfSpeech>) -> (PartOfSpeech, String) {
    let lower = word.to_lowercase();
    if word.chars().all(|c| !c.is_alphanumeric()) {
        return (PartOfSpeech::Punctuation, lower);
    }
    if word.chars().all(|c| c.is_ascii_digit() || c == ',' || c == '.') {
        return (PartOfSpeech::Numeral, lower);
    }
    if is_acronym_like(word) || (is_capitalized(word) && !sentence_initial) {
        return (PartOfSpeech::ProperNoun, word.to_string());
    }
    if let Some(lemma) = ADPOSITIONS.get(lower.as_str()) {
        return (PartOfSpeech::Adposition, (*lemma).to_string());
    }
    if DETERMINERS.contains(lower.as_str()) {
        return (PartOfSpeech::Determiner, lower);
    }
    if let Some(lemma) = AUXILIARIES.get(lower.as_str()) {
        return (PartOfSpeech::Auxiliary, (*lemma).to_string());
    }
    if CONJUNCTIONS.contains(lower.as_str()) {
        let pos = if lower == "que" {
            PartOfSpeech::Pronoun
        } else {
            PartOfSpeech::Conjunction
        };
        return (pos, lower);
    }
    if PRONOUNS.contains(lower.as_str()) {
        return (PartOfSpeech::Pronoun, lower);
    }
    if let Some(lemma) = VERB_FORMS.get(lower.as_str()) {
        return (PartOfSpeech::Verb, (*lemma).to_string());
    }
    if lower.chars().count() > 6 && lower.ends_with("mente") {
        return (PartOfSpeech::Adverb, lower);
    }
    if !NOMINAL_EXCEPTIONS.contains(lower.as_str()) {
        if let Some(lemma) = verb_lemma(&lower) {
            return (PartOfSpeech::Verb, lemma);
        }
    }
    let after_nominal = matches!(
        prev,
        Some(PartOfSpeech::Noun | PartOfSpeech::ProperNoun | PartOfSpeech::Adjective)
    );
    if after_nominal && has_adjective_suffix(&lower) {
        return (PartOfSpeech::Adjective, nominal_lemma(&lower));
    }
    (PartOfSpeech::Noun, nominal_lemma(&lower))
}

/// Recover an infinitive from regular verbal endings.
fn verb_lemma(lower: &str) -> Option<String> {
    let len = lower.chars().count();
    if len < 5 {
        return None;
    }
    const RULES: &[(&str, &str)] = &[
        ("aram", "ar"),
        ("eram", "er"),
        ("iram", "ir"),
        ("ando", "ar"),
        ("endo", "er"),
        ("indo", "ir"),
        ("ou", "ar"),
        ("am", "ar"),
    ];
    for (suffix, ending) in RULES {
        if let Some(stem) = lower.strip_suffix(suffix) {
            return Some(format!("{stem}{ending}"));
        }
    }
    let nominal_infinitive = ["ular", "ilar", "plinar"]
        .iter()
        .any(|s| lower.ends_with(s));
    if (lower.ends_with("ar") || lower.ends_with("er") || lower.ends_with("ir")) && !nominal_infinitive {
        return Some(lower.to_string());
    }
    None
}

fn has_adjective_suffix(lower: &str) -> bool {
    const SUFFIXES: &[&str] = &[
        "ico", "ica", "icos", "icas", "al", "ais", "ivo", "iva", "ivos", "ivas", "oso", "osa",
        "osos", "osas", "ável", "ível", "áveis", "íveis", "ado", "ada", "ados", "adas", "ido",
        "ida", "idos", "idas", "ar", "ares", "ente", "entes", "ário", "ária",
    ];
    SUFFIXES.iter().any(|s| lower.ends_with(s))
}

/// Singularise a lower-cased noun or adjective.
fn nominal_lemma(lower: &str) -> String {
    if lower.chars().count() < 4 {
        return lower.to_string();
    }
    const RULES: &[(&str, &str)] = &[
        ("ções", "ção"),
        ("sões", "são"),
        ("ões", "ão"),
        ("ães", "ão"),
        ("áveis", "ável"),
        ("íveis", "ível"),
        ("ais", "al"),
        ("éis", "el"),
        ("óis", "ol"),
        ("ores", "or"),
        ("ns", "m"),
    ];
    for (suffix, replacement) in RULES {
        if let Some(stem) = lower.strip_suffix(suffix) {
            return format!("{stem}{replacement}");
        }
    }
    if let Some(stem) = lower.strip_suffix('s') {
        if stem.ends_with(['a', 'e', 'o', 'á', 'é', 'ê', 'ó', 'ô', 'i', 'u']) {
            return stem.to_string();
        }
    }
    lower.to_string()
}

fn is_argument_candidate(pos: PartOfSpeech) -> bool {
    matches!(
        pos,
        PartOfSpeech::Noun | PartOfSpeech::ProperNoun | PartOfSpeech::Pronoun
    )
}

/// True when the nominal at `idx` is introduced by a preposition, skipping
/// determiners between the two.
fn governed_by_adposition(tokens: &[Token], idx: usize, sentence_start: usize) -> bool {
    let mut k = idx;
    while k > sentence_start {
        k -= 1;
        match tokens[k].pos {
            PartOfSpeech::Determiner | PartOfSpeech::Numeral => continue,
            PartOfSpeech::Adposition => return true,
            _ => return false,
        }
    }
    false
}

fn attach_arguments(tokens: &mut [Token], range: std::ops::Range<usize>) {
    let verbs: Vec<usize> = range
        .clone()
        .filter(|&i| tokens[i].pos == PartOfSpeech::Verb)
        .collect();
    if let Some(&first) = verbs.first() {
        tokens[first].dep = DependencyRole::Root;
    }
    for &verb in &verbs {
        let (subject, object) = find_arguments(tokens, range.clone(), verb);
        if let Some(s) = subject {
            tokens[s].dep = DependencyRole::NominalSubject;
            tokens[s].head = Some(verb);
        }
        if let Some(o) = object {
            tokens[o].dep = DependencyRole::DirectObject;
            tokens[o].head = Some(verb);
        }
    }
}

fn find_arguments(
    tokens: &[Token],
    range: std::ops::Range<usize>,
    verb: usize,
) -> (Option<usize>, Option<usize>) {
    let subject = (range.start..verb)
        .rev()
        .take_while(|&j| !matches!(tokens[j].pos, PartOfSpeech::Verb | PartOfSpeech::Punctuation))
        .find(|&j| {
            tokens[j].head.is_none()
                && is_argument_candidate(tokens[j].pos)
                && !governed_by_adposition(tokens, j, range.start)
        });
    let object = (verb + 1..range.end)
        .take_while(|&j| {
            !matches!(
                tokens[j].pos,
                PartOfSpeech::Verb | PartOfSpeech::Punctuation | PartOfSpeech::Conjunction
            )
        })
        .find(|&j| {
            tokens[j].head.is_none()
                && is_argument_candidate(tokens[j].pos)
                && !governed_by_adposition(tokens, j, range.start)
        });
    (subject, object)
}

fn recognize_entities(tokens: &[Token], sentences: &[std::ops::Range<usize>]) -> Vec<EntitySpan> {
    let mut spans = Vec::new();
    for range in sentences {
        let mut idx = range.start;
        while idx < range.end {
            if !starts_entity(&tokens[idx], idx == range.start) {
                idx += 1;
                continue;
            }
            let start = idx;
            let mut end = idx + 1;
            let mut probe = if is_acronym_like(&tokens[start].text) {
                range.end
            } else {
                end
            };
            while probe < range.end {
                let word = tokens[probe].text.as_str();
                if is_capitalized(word) && tokens[probe].pos != PartOfSpeech::Punctuation {
                    probe += 1;
                    end = probe;
                } else if ENTITY_CONNECTORS.contains(&word) {
                    probe += 1;
                } else {
                    break;
                }
            }
            spans.push(EntitySpan {
                start,
                end,
                label: entity_label(&tokens[start..end]).to_string(),
            });
            idx = end;
        }
    }
    spans
}

fn starts_entity(token: &Token, sentence_initial: bool) -> bool {
    if token.is_punct || token.is_stop || !is_capitalized(&token.text) {
        return false;
    }
    !sentence_initial || token.pos == PartOfSpeech::ProperNoun || PLACES.contains(token.text.to_lowercase().as_str())
}

fn entity_label(tokens: &[Token]) -> &'static str {
    let words: Vec<String> = tokens.iter().map(|t| t.text.to_lowercase()).collect();
    if words.iter().any(|w| ORG_CUES.contains(w.as_str())) {
        return "ORG";
    }
    if PLACES.contains(words.join(" ").as_str()) {
        return "LOC";
    }
    if tokens.len() == 1 && is_acronym_like(&tokens[0].text) {
        return "ORG";
    }
    "MISC"
}
