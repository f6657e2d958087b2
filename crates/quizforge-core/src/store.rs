//! In-memory question store.
//!
//! Holds every generated question for the lifetime of the process behind a
//! single coarse lock. Nothing is evicted.
// TODO: bound the store (LRU keyed by question id) before long-running deployments.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::model::Question;

/// Process-wide map from question id to question.
#[derive(Debug, Default)]
pub struct QuestionStore {
    questions: RwLock<HashMap<String, Question>>,
}

impl QuestionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, question: Question) {
        self.questions.write().insert(question.id.clone(), question);
    }

    /// Returns a copy of the stored question.
    pub fn get(&self, id: &str) -> Option<Question> {
        self.questions.read().get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.questions.read().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.questions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.read().is_empty()
    }
}
