//! Nearest-descriptor topic classification against the taxonomy.

use serde::Serialize;

use crate::{data::taxonomy::Taxonomy, nlp::embeddings::cosine};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicAssignment {
    pub label: String,
    /// 1-based position in the taxonomy's declared order.
    pub index: usize,
}

/// Holds one descriptor vector per taxonomy category.
#[derive(Debug, Clone)]
pub struct TopicClassifier {
    labels: Vec<String>,
    descriptors: Vec<Vec<f32>>,
}

impl TopicClassifier {
    /// `descriptors[i]` embeds `taxonomy.children[i].descriptor()`.
    pub fn new(taxonomy: &Taxonomy, descriptors: Vec<Vec<f32>>) -> Self {
        debug_assert_eq!(taxonomy.len(), descriptors.len());
        Self {
            labels: taxonomy.children.iter().map(|c| c.name.clone()).collect(),
            descriptors,
        }
    }

    /// Category with the highest cosine similarity. Exact ties go to the
    /// lowest taxonomy position; NaN scores never win.
    pub fn classify(&self, vector: &[f32]) -> TopicAssignment {
        let mut best = 0;
        let mut best_score = f32::NEG_INFINITY;
        for (idx, descriptor) in self.descriptors.iter().enumerate() {
            let score = cosine(vector, descriptor);
            if score > best_score {
                best = idx;
                best_score = score;
            }
        }
        TopicAssignment {
            label: self.labels.get(best).cloned().unwrap_or_default(),
            index: best + 1,
        }
    }
}
