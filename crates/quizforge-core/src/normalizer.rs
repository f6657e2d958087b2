//! Text normalization.
//!
//! Turns raw text into lowercase lemma tokens with stop words, punctuation and
//! whitespace removed. The same normalizer is applied to keyword phrases and to
//! user answers, so comparison is plain string equality on its output.
//!
//! A [`LanguageModel`] is a lexicon: a stop-word set plus a lemma lookup table.
//! [`Normalizer::with_fallback`] tries an ordered list of model sources and
//! keeps the first one that loads, ending with a blank model that never fails.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

const EN_CORE: &str = include_str!("../lexicons/en_core.toml");
const XX_MULTI: &str = include_str!("../lexicons/xx_multi.toml");

/// Name of the bundled multilingual lexicon.
pub const MULTILINGUAL_MODEL: &str = "xx_multi";

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    Word,
    Punct,
    Space,
}

impl TokenKind {
    fn of(c: char) -> Self {
        if c.is_whitespace() {
            TokenKind::Space
        } else if c.is_alphanumeric() || c == '_' {
            TokenKind::Word
        } else {
            TokenKind::Punct
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Token<'a> {
    text: &'a str,
    kind: TokenKind,
}

/// Split text into word runs, whitespace runs, and single punctuation marks.
fn segment(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        let kind = TokenKind::of(c);
        let mut end = start + c.len_utf8();

        // Punctuation is emitted one mark at a time.
        if kind != TokenKind::Punct {
            while let Some(&(idx, next)) = chars.peek() {
                if TokenKind::of(next) != kind {
                    break;
                }
                end = idx + next.len_utf8();
                chars.next();
            }
        }

        tokens.push(Token {
            text: &text[start..end],
            kind,
        });
    }

    tokens
}

// ---------------------------------------------------------------------------
// Language model
// ---------------------------------------------------------------------------

/// On-disk lexicon format.
#[derive(Debug, Deserialize)]
struct LexiconFile {
    name: String,
    #[serde(default)]
    language: String,
    #[serde(default)]
    stop_words: Vec<String>,
    #[serde(default)]
    lemmas: HashMap<String, String>,
}

/// A lexicon-backed language model.
#[derive(Clone)]
pub struct LanguageModel {
    name: String,
    language: String,
    stop_words: HashSet<String>,
    lemmas: HashMap<String, String>,
}

impl fmt::Debug for LanguageModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LanguageModel")
            .field("name", &self.name)
            .field("language", &self.language)
            .field("stop_words", &self.stop_words.len())
            .field("lemmas", &self.lemmas.len())
            .finish()
    }
}

impl LanguageModel {
    /// Parse a lexicon from a TOML string.
    pub fn from_toml_str(content: &str, source: &str) -> Result<Self> {
        let file: LexiconFile = toml::from_str(content)
            .with_context(|| format!("failed to parse lexicon: {source}"))?;

        anyhow::ensure!(
            !file.name.trim().is_empty(),
            "lexicon has no name: {source}"
        );

        Ok(Self {
            name: file.name,
            language: file.language,
            stop_words: file
                .stop_words
                .into_iter()
                .map(|w| w.trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
            lemmas: file
                .lemmas
                .into_iter()
                .map(|(form, lemma)| (form.to_lowercase(), lemma))
                .collect(),
        })
    }

    /// Load a lexicon from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read lexicon: {}", path.display()))?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    /// Load one of the lexicons compiled into the binary.
    pub fn bundled(name: &str) -> Result<Self> {
        let content = match name {
            "en_core" => EN_CORE,
            MULTILINGUAL_MODEL => XX_MULTI,
            other => anyhow::bail!("no bundled lexicon named '{other}'"),
        };
        Self::from_toml_str(content, name)
    }

    /// A model with no stop words and no lemmas: tokens pass through as
    /// lowercase word-forms.
    pub fn blank(language: &str) -> Self {
        Self {
            name: "blank".into(),
            language: language.to_string(),
            stop_words: HashSet::new(),
            lemmas: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn is_blank(&self) -> bool {
        self.stop_words.is_empty() && self.lemmas.is_empty()
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Dictionary form of `word`, or `word` itself if the lexicon has no entry.
    pub fn lemma<'a>(&'a self, word: &'a str) -> &'a str {
        self.lemmas.get(word).map(String::as_str).unwrap_or(word)
    }
}

/// Where to load a language model from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSource {
    /// A lexicon TOML file on disk.
    File(PathBuf),
    /// A lexicon compiled into the binary (e.g. `"en_core"`).
    Bundled(String),
}

impl ModelSource {
    /// Bundled model for a language tag, if one ships with quizforge.
    pub fn bundled_for_language(language: &str) -> Option<Self> {
        match language {
            "en" => Some(ModelSource::Bundled("en_core".into())),
            _ => None,
        }
    }

    fn load(&self) -> Result<LanguageModel> {
        match self {
            ModelSource::File(path) => LanguageModel::load(path),
            ModelSource::Bundled(name) => LanguageModel::bundled(name),
        }
    }
}

impl fmt::Display for ModelSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelSource::File(path) => write!(f, "file:{}", path.display()),
            ModelSource::Bundled(name) => write!(f, "bundled:{name}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Normalizer
// ---------------------------------------------------------------------------

/// Converts raw text into normalized lemma tokens.
#[derive(Debug, Clone)]
pub struct Normalizer {
    model: LanguageModel,
}

impl Normalizer {
    pub fn new(model: LanguageModel) -> Self {
        Self { model }
    }

    /// Try each source in order and keep the first model that loads.
    ///
    /// Falls back to [`LanguageModel::blank`] when every source fails, so this
    /// never returns an error; a missing lexicon degrades quality only.
    pub fn with_fallback(language: &str, sources: &[ModelSource]) -> Self {
        for source in sources {
            match source.load() {
                Ok(model) => {
                    tracing::info!(
                        "using language model '{}' ({}) from {source}",
                        model.name(),
                        model.language()
                    );
                    return Self::new(model);
                }
                Err(e) => {
                    tracing::warn!("language model {source} unavailable: {e:#}");
                }
            }
        }

        tracing::warn!("no language model loaded, falling back to blank '{language}' pipeline");
        Self::blank(language)
    }

    /// The bundled English lexicon, then the multilingual one, then blank.
    pub fn bundled_default() -> Self {
        Self::with_fallback(
            "en",
            &[
                ModelSource::Bundled("en_core".into()),
                ModelSource::Bundled(MULTILINGUAL_MODEL.into()),
            ],
        )
    }

    pub fn blank(language: &str) -> Self {
        Self::new(LanguageModel::blank(language))
    }

    pub fn model(&self) -> &LanguageModel {
        &self.model
    }

    /// Normalize text into an ordered sequence of lemma tokens.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();

        segment(&lowered)
            .into_iter()
            .filter(|t| t.kind == TokenKind::Word)
            .filter(|t| !self.model.is_stop_word(t.text))
            .filter_map(|t| {
                let lemma = self.model.lemma(t.text).trim().to_lowercase();
                (!lemma.is_empty()).then_some(lemma)
            })
            .collect()
    }

    /// Normalize text into a deduplicated set of lemma tokens.
    pub fn tokenize_set(&self, text: &str) -> BTreeSet<String> {
        self.normalize(text).into_iter().collect()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::bundled_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(words: &[&str]) -> BTreeSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn segment_splits_words_punct_and_space() {
        let tokens = segment("n-queens,  ok");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text).collect();
        assert_eq!(texts, vec!["n", "-", "queens", ",", "  ", "ok"]);
        assert_eq!(tokens[1].kind, TokenKind::Punct);
        assert_eq!(tokens[4].kind, TokenKind::Space);
    }

    #[test]
    fn segment_keeps_non_ascii_words_whole() {
        let tokens = segment("căutare în adâncime");
        let words: Vec<&str> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Word)
            .map(|t| t.text)
            .collect();
        assert_eq!(words, vec!["căutare", "în", "adâncime"]);
    }

    #[test]
    fn normalize_drops_stop_words_and_punctuation() {
        let n = Normalizer::bundled_default();
        assert_eq!(
            n.normalize("We choose a pivot, and partition the array!"),
            vec!["choose", "pivot", "partition", "array"]
        );
    }

    #[test]
    fn normalize_lemmatizes_and_lowercases() {
        let n = Normalizer::bundled_default();
        assert_eq!(
            n.normalize("Pivots PARTITIONED Queens chose"),
            vec!["pivot", "partition", "queen", "choose"]
        );
    }

    #[test]
    fn normalize_preserves_order_and_duplicates() {
        let n = Normalizer::bundled_default();
        assert_eq!(
            n.normalize("pivot partition pivots"),
            vec!["pivot", "partition", "pivot"]
        );
    }

    #[test]
    fn tokenize_set_deduplicates() {
        let n = Normalizer::bundled_default();
        assert_eq!(
            n.tokenize_set("pivot partition pivots"),
            set(&["partition", "pivot"])
        );
    }

    #[test]
    fn empty_and_stop_word_only_text() {
        let n = Normalizer::bundled_default();
        assert!(n.normalize("").is_empty());
        assert!(n.normalize("   \t\n").is_empty());
        assert!(n.normalize("the of and a").is_empty());
        assert!(n.normalize("?!...").is_empty());
    }

    #[test]
    fn blank_model_passes_word_forms_through() {
        let n = Normalizer::blank("en");
        assert!(n.model().is_blank());
        assert_eq!(
            n.normalize("The Pivots, partitioned."),
            vec!["the", "pivots", "partitioned"]
        );
    }

    #[test]
    fn fallback_skips_missing_files() {
        let n = Normalizer::with_fallback(
            "en",
            &[
                ModelSource::File(PathBuf::from("/nonexistent/en.toml")),
                ModelSource::Bundled("en_core".into()),
            ],
        );
        assert_eq!(n.model().name(), "en_core");
    }

    #[test]
    fn fallback_reaches_multilingual_model() {
        let n = Normalizer::with_fallback(
            "ro",
            &[
                ModelSource::Bundled("ro_core".into()),
                ModelSource::Bundled(MULTILINGUAL_MODEL.into()),
            ],
        );
        assert_eq!(n.model().name(), MULTILINGUAL_MODEL);
        assert_eq!(
            n.normalize("căutare în adâncime și backtracking"),
            vec!["căutare", "adâncime", "backtracking"]
        );
    }

    #[test]
    fn fallback_never_fails() {
        let n = Normalizer::with_fallback(
            "ro",
            &[ModelSource::File(PathBuf::from("/nonexistent/ro.toml"))],
        );
        assert!(n.model().is_blank());
        assert_eq!(n.model().language(), "ro");

        let empty = Normalizer::with_fallback("en", &[]);
        assert!(empty.model().is_blank());
    }

    #[test]
    fn load_lexicon_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            r#"
name = "custom"
language = "en"
stop_words = ["Uses"]

[lemmas]
Heaps = "heap"
"#,
        )
        .unwrap();

        let n = Normalizer::with_fallback("en", &[ModelSource::File(path)]);
        assert_eq!(n.model().name(), "custom");
        assert_eq!(n.normalize("uses heaps"), vec!["heap"]);
    }

    #[test]
    fn malformed_lexicon_is_rejected() {
        assert!(LanguageModel::from_toml_str("name = ", "bad").is_err());
        assert!(LanguageModel::from_toml_str("name = \"\"", "unnamed").is_err());
        assert!(LanguageModel::bundled("nope").is_err());
    }

    #[test]
    fn bundled_for_language() {
        assert_eq!(
            ModelSource::bundled_for_language("en"),
            Some(ModelSource::Bundled("en_core".into()))
        );
        assert_eq!(ModelSource::bundled_for_language("ro"), None);
    }
}
