use once_cell::sync::Lazy;
use regex::Regex;

use super::{Language, LanguageResources};

static PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").unwrap());
static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// Lowercase, strip punctuation and digits, drop stopwords, lemmatize, rejoin.
///
/// `language` is the language already confirmed for this text; it selects both
/// the stopword set and the lemmatizer.
pub fn normalize(text: &str, language: Language, resources: &LanguageResources) -> String {
    let lowered = text.to_lowercase();
    let no_punct = PUNCTUATION.replace_all(&lowered, "");
    let no_digits = DIGITS.replace_all(&no_punct, "");

    no_digits
        .split_whitespace()
        .filter(|word| !resources.is_stopword(language, word))
        .map(|word| resources.lemmatize(language, word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Drop every token that exactly matches one of `words`
pub fn remove_words(text: &str, words: &[String]) -> String {
    text.split_whitespace()
        .filter(|token| !words.iter().any(|w| w == token))
        .collect::<Vec<_>>()
        .join(" ")
}
