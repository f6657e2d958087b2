//! The `quizforge validate` command.

use std::path::PathBuf;

use anyhow::Result;

use quizforge_core::config::load_config_from;
use quizforge_core::knowledge::{load_knowledge_base, validate_knowledge_base};
use quizforge_core::Normalizer;

pub fn execute(kb_path: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let normalizer = Normalizer::with_fallback(
        &config.normalizer.language,
        &config.normalizer.model_sources(),
    );
    let kb = load_knowledge_base(&kb_path)?;

    println!("Knowledge base: {} ({} problems)", kb_path.display(), kb.len());
    for (key, problem) in kb.iter() {
        println!(
            "  {key}: {} instance(s), {} strateg{}",
            problem.instances.len(),
            problem.strategies.len(),
            if problem.strategies.len() == 1 { "y" } else { "ies" }
        );
    }

    let warnings = validate_knowledge_base(&kb, &normalizer);
    for w in &warnings {
        let prefix = w
            .problem_key
            .as_ref()
            .map(|key| format!("  [{key}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Knowledge base valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
