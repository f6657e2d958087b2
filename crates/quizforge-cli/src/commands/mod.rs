pub mod generate;
pub mod grade;
pub mod serve;
pub mod validate;

use std::path::PathBuf;

use anyhow::Result;

use quizforge_core::config::load_config_from;
use quizforge_core::{QuizEngine, QuizforgeConfig};

/// Load config, apply the `--kb` override, and build the engine.
pub fn load_engine(
    config_path: Option<PathBuf>,
    kb_override: Option<PathBuf>,
) -> Result<(QuizforgeConfig, QuizEngine)> {
    let mut config = load_config_from(config_path.as_deref())?;
    if let Some(kb) = kb_override {
        config.knowledge_base = kb;
    }
    let engine = QuizEngine::from_config(&config)?;
    Ok((config, engine))
}
