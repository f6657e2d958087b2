//! Configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::normalizer::{ModelSource, MULTILINGUAL_MODEL};

/// Top-level quizforge configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizforgeConfig {
    /// Path to the knowledge base JSON document.
    #[serde(default = "default_knowledge_base")]
    pub knowledge_base: PathBuf,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub normalizer: NormalizerConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address to listen on.
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Origins allowed by CORS.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

/// Text normalization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Language tag used to pick the bundled lexicon.
    #[serde(default = "default_language")]
    pub language: String,
    /// Extra lexicon files, tried before the bundled ones.
    #[serde(default)]
    pub models: Vec<PathBuf>,
}

fn default_knowledge_base() -> PathBuf {
    PathBuf::from("knowledge/problems.json")
}
fn default_bind() -> String {
    "127.0.0.1:8000".to_string()
}
fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://127.0.0.1:5173".to_string(),
    ]
}
fn default_language() -> String {
    "en".to_string()
}

impl Default for QuizforgeConfig {
    fn default() -> Self {
        Self {
            knowledge_base: default_knowledge_base(),
            server: ServerConfig::default(),
            normalizer: NormalizerConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            models: Vec::new(),
        }
    }
}

impl NormalizerConfig {
    /// Fallback chain: configured files, the bundled lexicon for the language,
    /// then the multilingual lexicon.
    pub fn model_sources(&self) -> Vec<ModelSource> {
        let mut sources: Vec<ModelSource> =
            self.models.iter().cloned().map(ModelSource::File).collect();
        if let Some(bundled) = ModelSource::bundled_for_language(&self.language) {
            sources.push(bundled);
        }
        sources.push(ModelSource::Bundled(MULTILINGUAL_MODEL.into()));
        sources
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        // Substituted values are inserted verbatim, never rescanned.
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizforge.toml` in the current directory
/// 2. `~/.config/quizforge/config.toml`
///
/// Environment variable overrides: `QUIZFORGE_KB_PATH`, `QUIZFORGE_BIND`.
pub fn load_config() -> Result<QuizforgeConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizforgeConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizforge.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<QuizforgeConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => QuizforgeConfig::default(),
    };

    // Apply env var overrides
    if let Ok(kb) = std::env::var("QUIZFORGE_KB_PATH") {
        config.knowledge_base = PathBuf::from(kb);
    }
    if let Ok(bind) = std::env::var("QUIZFORGE_BIND") {
        config.server.bind = bind;
    }

    config.knowledge_base = resolve_path(&config.knowledge_base);
    config.normalizer.models = config
        .normalizer
        .models
        .iter()
        .map(|p| resolve_path(p))
        .collect();

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizforge"))
}
