//! Text utilities for fuzzy entity-name matching

use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use std::sync::OnceLock;

/// Common English stop words to filter out during tokenization
static STOP_WORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();

/// Porter stemmer for English text
static STEMMER: OnceLock<Stemmer> = OnceLock::new();

/// Tokens shorter than this never take part in name matching
pub const MIN_TERM_LEN: usize = 3;

fn get_stop_words() -> &'static HashSet<&'static str> {
    STOP_WORDS.get_or_init(|| {
        [
            "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into",
            "is", "it", "no", "not", "of", "on", "or", "such", "that", "the", "their", "then",
            "there", "these", "they", "this", "to", "was", "will", "with",
        ]
        .iter()
        .copied()
        .collect()
    })
}

fn get_stemmer() -> &'static Stemmer {
    STEMMER.get_or_init(|| Stemmer::create(Algorithm::English))
}

/// Simple word-based tokenizer splitting on non-alphanumeric characters with stop word removal
pub fn tokenize(text: &str) -> Vec<String> {
    let stop_words = get_stop_words();
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .filter(|s| !stop_words.contains(s))
        .map(|s| s.to_string())
        .collect()
}

/// Distinct stemmed terms of an entity name usable for matching
pub fn name_terms(name: &str) -> HashSet<String> {
    tokenize(name)
        .into_iter()
        .filter(|t| t.chars().count() >= MIN_TERM_LEN)
        .map(|t| get_stemmer().stem(&t).to_string())
        .collect()
}

/// Number of terms two names have in common
pub fn shared_term_count(a: &HashSet<String>, b: &HashSet<String>) -> usize {
    a.intersection(b).count()
}
