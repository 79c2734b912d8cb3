//! TextNormalizer: language detection and language-aware description cleaning
//! for English and Russian.

mod normalize;
pub mod stopwords;

pub use normalize::{normalize, remove_words};

use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use std::fmt;
use whatlang::Lang;

/// A supported description language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    English,
    Russian,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::English, Language::Russian];

    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Russian => "ru",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Language::English),
            "ru" => Some(Language::Russian),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Outcome of running language detection on one text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detection {
    Detected(Language),
    /// Detected, but not a language this pipeline handles
    Unsupported(Lang),
    /// Empty, non-text, or no usable signal
    Undetected,
}

impl Detection {
    pub fn language(self) -> Option<Language> {
        match self {
            Detection::Detected(lang) => Some(lang),
            _ => None,
        }
    }
}

/// Detect the language of a text. Never fails.
pub fn detect(text: &str) -> Detection {
    if text.trim().is_empty() {
        return Detection::Undetected;
    }
    match whatlang::detect(text) {
        Some(info) => match info.lang() {
            Lang::Eng => Detection::Detected(Language::English),
            Lang::Rus => Detection::Detected(Language::Russian),
            other => Detection::Unsupported(other),
        },
        None => Detection::Undetected,
    }
}

struct LanguagePack {
    stopwords: HashSet<&'static str>,
    stemmer: Stemmer,
}

impl LanguagePack {
    fn new(words: &'static [&'static str], algorithm: Algorithm) -> Self {
        Self {
            stopwords: words.iter().copied().collect(),
            stemmer: Stemmer::create(algorithm),
        }
    }
}

/// Stopword tables and lemmatizers for both languages.
///
/// Built once per process and shared read-only (behind an `Arc`) by every
/// stage that touches text; safe to use from parallel row workers.
pub struct LanguageResources {
    english: LanguagePack,
    russian: LanguagePack,
}

impl LanguageResources {
    pub fn load() -> Self {
        Self {
            english: LanguagePack::new(stopwords::ENGLISH, Algorithm::English),
            russian: LanguagePack::new(stopwords::RUSSIAN, Algorithm::Russian),
        }
    }

    fn pack(&self, language: Language) -> &LanguagePack {
        match language {
            Language::English => &self.english,
            Language::Russian => &self.russian,
        }
    }

    pub fn is_stopword(&self, language: Language, word: &str) -> bool {
        self.pack(language).stopwords.contains(word)
    }

    /// Reduce a lowercase word to its base form
    pub fn lemmatize(&self, language: Language, word: &str) -> String {
        self.pack(language).stemmer.stem(word).into_owned()
    }
}

impl Default for LanguageResources {
    fn default() -> Self {
        Self::load()
    }
}

impl fmt::Debug for LanguageResources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LanguageResources")
            .field("english_stopwords", &self.english.stopwords.len())
            .field("russian_stopwords", &self.russian.stopwords.len())
            .finish()
    }
}
