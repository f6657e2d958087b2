//! Question generation.
//!
//! Picks a problem and one of its instances, renders the question prompt, and
//! records the question in the store.
//!
//! Seeded calls build a fresh `StdRng` for that call only, so a seed always
//! reproduces the same selection for the same candidate pool, and concurrent
//! seeded callers cannot disturb each other or later unseeded calls. Any
//! `i64` is a valid seed; negative seeds are reinterpreted bit-for-bit as
//! `u64`.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

use crate::error::QuizError;
use crate::model::{KnowledgeBase, Question};
use crate::store::QuestionStore;

/// A problem/instance pair chosen for a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub problem_key: String,
    /// Empty when the problem has no instances.
    pub instance: String,
}

/// Generates questions from a knowledge base it owns.
#[derive(Debug, Clone)]
pub struct QuestionGenerator {
    kb: KnowledgeBase,
}

impl QuestionGenerator {
    pub fn new(kb: KnowledgeBase) -> Self {
        Self { kb }
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.kb
    }

    /// Problem keys eligible for selection, in sorted order.
    ///
    /// An absent or empty allow-list means every problem.
    pub fn candidate_pool(&self, allowed: Option<&[String]>) -> Vec<&str> {
        match allowed {
            Some(list) if !list.is_empty() => self
                .kb
                .keys()
                .filter(|key| list.iter().any(|a| a == key))
                .collect(),
            _ => self.kb.keys().collect(),
        }
    }

    /// Choose a problem and instance using `rng`.
    pub fn select<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        allowed: Option<&[String]>,
    ) -> Result<Selection, QuizError> {
        let pool = self.candidate_pool(allowed);
        let Some(&problem_key) = pool.choose(rng) else {
            return Err(QuizError::InvalidRequest(
                "no valid problems available for generation".into(),
            ));
        };

        let instance = self
            .kb
            .get(problem_key)
            .and_then(|p| p.instances.choose(rng))
            .cloned()
            .unwrap_or_default();

        Ok(Selection {
            problem_key: problem_key.to_string(),
            instance,
        })
    }

    /// Generate a question, store it, and return a copy.
    pub fn generate(
        &self,
        store: &QuestionStore,
        allowed: Option<&[String]>,
        seed: Option<i64>,
    ) -> Result<Question, QuizError> {
        let selection = match seed {
            Some(seed) => self.select(&mut StdRng::seed_from_u64(seed as u64), allowed)?,
            None => self.select(&mut rand::thread_rng(), allowed)?,
        };

        let label = self
            .kb
            .get(&selection.problem_key)
            .map(|p| p.display_label(&selection.problem_key))
            .unwrap_or(&selection.problem_key);

        let question = Question {
            id: Uuid::new_v4().to_string(),
            text: render_question_text(label, &selection.instance),
            problem_key: selection.problem_key,
            instance: selection.instance,
        };

        tracing::debug!(
            "generated question {} for problem '{}'",
            question.id,
            question.problem_key
        );

        store.insert(question.clone());
        Ok(question)
    }
}

/// Render the question prompt. The instance clause is omitted when empty.
pub fn render_question_text(label: &str, instance: &str) -> String {
    let instance_clause = if instance.is_empty() {
        String::new()
    } else {
        format!(" (instance: {instance})")
    };
    format!(
        "For problem {label}{instance_clause}, which solving strategy, among those covered, is most appropriate?"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::parse_knowledge_base_str;
    use std::path::PathBuf;

    const KB: &str = r#"
{
  "n-queens": {"label": "N-Queens", "instances": ["n=4", "n=8", "n=16"]},
  "sort": {"label": "Sorting", "strategies": [{"name": "quicksort", "keywords": ["pivot"]}]},
  "tsp": {"label": "", "instances": ["5 cities", "10 cities"]},
  "coloring": {"label": "Graph Coloring", "instances": ["petersen", "k4", "wheel"]}
}
"#;

    fn generator() -> QuestionGenerator {
        QuestionGenerator::new(parse_knowledge_base_str(KB, &PathBuf::from("kb.json")).unwrap())
    }

    fn allow(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn render_with_and_without_instance() {
        assert_eq!(
            render_question_text("N-Queens", "n=8"),
            "For problem N-Queens (instance: n=8), which solving strategy, among those covered, is most appropriate?"
        );
        assert_eq!(
            render_question_text("Sorting", ""),
            "For problem Sorting, which solving strategy, among those covered, is most appropriate?"
        );
    }

    #[test]
    fn single_allowed_problem_is_always_chosen() {
        let generator = generator();
        let store = QuestionStore::new();
        for key in ["n-queens", "sort", "tsp", "coloring"] {
            for _ in 0..10 {
                let q = generator
                    .generate(&store, Some(&allow(&[key])), None)
                    .unwrap();
                assert_eq!(q.problem_key, key);
            }
        }
    }

    #[test]
    fn problem_without_instances_gets_empty_instance() {
        let generator = generator();
        let store = QuestionStore::new();
        let q = generator
            .generate(&store, Some(&allow(&["sort"])), None)
            .unwrap();
        assert_eq!(q.instance, "");
        assert!(!q.text.contains("instance:"));
        assert!(q.text.starts_with("For problem Sorting,"));
    }

    #[test]
    fn empty_label_renders_problem_key() {
        let generator = generator();
        let store = QuestionStore::new();
        let q = generator
            .generate(&store, Some(&allow(&["tsp"])), Some(1))
            .unwrap();
        assert!(q.text.starts_with("For problem tsp (instance: "), "got: {}", q.text);
    }

    #[test]
    fn same_seed_same_selection() {
        let generator = generator();
        let store = QuestionStore::new();
        for seed in [0i64, 1, 42, 12345, -1, i64::MIN, i64::MAX] {
            let a = generator.generate(&store, None, Some(seed)).unwrap();
            let b = generator.generate(&store, None, Some(seed)).unwrap();
            assert_eq!(a.problem_key, b.problem_key);
            assert_eq!(a.instance, b.instance);
            assert_ne!(a.id, b.id);
        }
    }

    #[test]
    fn seeded_selection_ignores_earlier_calls() {
        let generator = generator();
        let store = QuestionStore::new();
        let first = generator.generate(&store, None, Some(7)).unwrap();
        for seed in 100..120 {
            generator.generate(&store, None, Some(seed)).unwrap();
            generator.generate(&store, None, None).unwrap();
        }
        let again = generator.generate(&store, None, Some(7)).unwrap();
        assert_eq!(first.problem_key, again.problem_key);
        assert_eq!(first.instance, again.instance);
    }

    #[test]
    fn negative_seed_matches_its_bit_pattern() {
        let generator = generator();
        let store = QuestionStore::new();
        let q = generator.generate(&store, None, Some(-1)).unwrap();
        let expected = generator
            .select(&mut StdRng::seed_from_u64(u64::MAX), None)
            .unwrap();
        assert_eq!(q.problem_key, expected.problem_key);
        assert_eq!(q.instance, expected.instance);
    }

    #[test]
    fn allow_list_order_does_not_affect_seeded_selection() {
        let generator = generator();
        let mut rng_a = StdRng::seed_from_u64(9);
        let mut rng_b = StdRng::seed_from_u64(9);
        let a = generator
            .select(&mut rng_a, Some(&allow(&["tsp", "n-queens", "coloring"])))
            .unwrap();
        let b = generator
            .select(&mut rng_b, Some(&allow(&["coloring", "n-queens", "tsp"])))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn unknown_allow_list_is_invalid() {
        let generator = generator();
        let store = QuestionStore::new();
        let err = generator
            .generate(&store, Some(&allow(&["missing", "also-missing"])), None)
            .unwrap_err();
        assert!(matches!(err, QuizError::InvalidRequest(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn empty_allow_list_means_all_problems() {
        let generator = generator();
        assert_eq!(generator.candidate_pool(Some(&[])).len(), 4);
        assert_eq!(generator.candidate_pool(None).len(), 4);
        assert_eq!(
            generator.candidate_pool(Some(&allow(&["sort", "missing"]))),
            vec!["sort"]
        );
    }

    #[test]
    fn empty_knowledge_base_is_invalid() {
        let generator = QuestionGenerator::new(KnowledgeBase::default());
        let store = QuestionStore::new();
        let err = generator.generate(&store, None, None).unwrap_err();
        assert!(matches!(err, QuizError::InvalidRequest(_)));
    }

    #[test]
    fn generated_question_is_stored() {
        let generator = generator();
        let store = QuestionStore::new();
        let q = generator.generate(&store, None, None).unwrap();
        assert_eq!(store.get(&q.id), Some(q.clone()));
        assert!(Uuid::parse_str(&q.id).is_ok());
    }

    #[test]
    fn instances_come_from_the_chosen_problem() {
        let generator = generator();
        let store = QuestionStore::new();
        for seed in 0..50 {
            let q = generator
                .generate(&store, Some(&allow(&["coloring"])), Some(seed))
                .unwrap();
            assert!(["petersen", "k4", "wheel"].contains(&q.instance.as_str()));
        }
    }
}
