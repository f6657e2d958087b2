//! Knowledge base loader.
//!
//! Loads the JSON problem catalog from disk and validates it for authoring
//! mistakes that would silently weaken scoring.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};

use crate::model::KnowledgeBase;
use crate::normalizer::Normalizer;

/// Load a knowledge base from a JSON file.
pub fn load_knowledge_base(path: &Path) -> Result<KnowledgeBase> {
    if !path.exists() {
        anyhow::bail!("knowledge base not found at {}", path.display());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read knowledge base: {}", path.display()))?;

    parse_knowledge_base_str(&content, path)
}

/// Parse a JSON string into a `KnowledgeBase` (useful for testing).
pub fn parse_knowledge_base_str(content: &str, source_path: &Path) -> Result<KnowledgeBase> {
    let kb: KnowledgeBase = serde_json::from_str(content)
        .with_context(|| format!("failed to parse knowledge base: {}", source_path.display()))?;

    tracing::debug!(
        "loaded {} problems from {}",
        kb.len(),
        source_path.display()
    );

    Ok(kb)
}

/// A warning from knowledge base validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The problem key (if applicable).
    pub problem_key: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a knowledge base for common issues.
///
/// Keyword phrases are run through `normalizer` so that a strategy made only
/// of stop words is reported; such a strategy never contributes to a score.
pub fn validate_knowledge_base(kb: &KnowledgeBase, normalizer: &Normalizer) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if kb.is_empty() {
        warnings.push(ValidationWarning {
            problem_key: None,
            message: "knowledge base contains no problems".into(),
        });
    }

    for (key, problem) in kb.iter() {
        let warn = |message: String| ValidationWarning {
            problem_key: Some(key.to_string()),
            message,
        };

        if problem.strategies.is_empty() {
            warnings.push(warn("no strategies; every answer will score 0".into()));
        }

        if problem.label.trim().is_empty() {
            warnings.push(warn("label is empty; the problem key will be shown instead".into()));
        }

        let mut seen_names = HashSet::new();
        for (idx, strategy) in problem.strategies.iter().enumerate() {
            let name = strategy.name.trim();
            if name.is_empty() {
                warnings.push(warn(format!("strategy #{} has no name", idx + 1)));
            } else if !seen_names.insert(name.to_lowercase()) {
                warnings.push(warn(format!("duplicate strategy name: {name}")));
            }

            let has_tokens = strategy
                .keywords
                .iter()
                .any(|phrase| !normalizer.tokenize_set(phrase).is_empty());
            if !has_tokens {
                let label = if name.is_empty() { "(unnamed)" } else { name };
                warnings.push(warn(format!(
                    "strategy '{label}' has no keywords after normalization and will be skipped"
                )));
            }
        }
    }

    warnings
}
