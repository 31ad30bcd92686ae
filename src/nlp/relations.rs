//! Subject-verb-object triples read off the dependency structure.

use crate::{
    data::dataset::RelationTriple,
    nlp::annotation::{AnnotatedDoc, DependencyRole, PartOfSpeech},
};

/// For every verb, pair each nominal subject child with each direct-object
/// child. Both arguments must be nouns or proper nouns. Triples follow
/// sentence order, then verb order, then subject-major child order; repeats
/// are kept.
pub fn extract_relations(doc: &AnnotatedDoc) -> Vec<RelationTriple> {
    let mut triples = Vec::new();
    for sentence in &doc.sentences {
        for verb_idx in sentence.clone() {
            let verb = &doc.tokens[verb_idx];
            if verb.pos != PartOfSpeech::Verb {
                continue;
            }
            let subjects: Vec<_> = doc
                .children(verb_idx)
                .filter(|(_, t)| t.dep == DependencyRole::NominalSubject)
                .map(|(_, t)| t)
                .collect();
            let objects: Vec<_> = doc
                .children(verb_idx)
                .filter(|(_, t)| t.dep == DependencyRole::DirectObject)
                .map(|(_, t)| t)
                .collect();
            for subject in &subjects {
                for object in &objects {
                    if subject.pos.is_nominal() && object.pos.is_nominal() {
                        triples.push(RelationTriple::new(
                            subject.lemma.as_str(),
                            verb.lemma.as_str(),
                            object.lemma.as_str(),
                        ));
                    }
                }
            }
        }
    }
    triples
}
