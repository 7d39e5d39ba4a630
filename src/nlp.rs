// ABOUTME: Text normalization and named-entity extraction over an embedded language lexicon
// ABOUTME: Loads the lexicon once at startup; analysis is read-only and shared across requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text normalization and named-entity extraction
//!
//! The [`LanguageModel`] bundles the lexical resources the analyzers need:
//! a stopword list, an irregular-lemma table, and an entity gazetteer. It is
//! loaded once at process start and shared read-only; a load failure is
//! fatal before the server accepts any request, since the tokenization and
//! entity endpoints would be unusable without it.
//!
//! [`TextAnalyzer`] is the capability seam: the response path and the
//! diagnostic routes depend on the trait, so unit tests can substitute a
//! fake without loading the real lexicon.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::errors::{AppError, AppResult};

/// A named entity detected in free text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// The matched text span, original casing preserved
    pub text: String,
    /// Entity category label (PERSON, GPE, ORG, DATE, CARDINAL)
    pub label: String,
}

/// Capability contract for text analysis
///
/// Both operations are pure over their input; empty input yields empty
/// output, never an error.
pub trait TextAnalyzer: Send + Sync {
    /// Lowercase, lemmatize, and strip stopwords/punctuation, preserving
    /// source order
    fn tokenize_and_normalize(&self, text: &str) -> Vec<String>;

    /// Detect named entities, in order of appearance
    fn extract_entities(&self, text: &str) -> Vec<Entity>;
}

/// English stopwords dropped during normalization
const STOPWORDS: &[&str] = &[
    "a", "about", "after", "again", "against", "all", "am", "an", "and", "any", "are", "as", "at",
    "be", "because", "been", "before", "being", "between", "both", "but", "by", "can", "could",
    "did", "do", "does", "doing", "down", "during", "each", "else", "few", "for", "from",
    "further", "had", "has", "have", "having", "he", "her", "here", "hers", "him", "his", "how",
    "i", "if", "in", "into", "is", "it", "its", "just", "me", "more", "most", "my", "no", "nor",
    "not", "of", "off", "on", "once", "only", "or", "other", "our", "ours", "out", "over", "own",
    "s", "same", "she", "should", "so", "some", "such", "than", "that", "the", "their", "theirs",
    "them", "then", "there", "these", "they", "this", "those", "through", "to", "too", "under",
    "until", "up", "very", "was", "we", "were", "what", "when", "where", "which", "while", "who",
    "whom", "why", "will", "with", "would", "you", "your", "yours",
];

/// Irregular word forms the suffix rules cannot reduce
const LEMMA_EXCEPTIONS: &[(&str, &str)] = &[
    ("bought", "buy"),
    ("came", "come"),
    ("children", "child"),
    ("feet", "foot"),
    ("found", "find"),
    ("gave", "give"),
    ("geese", "goose"),
    ("got", "get"),
    ("knew", "know"),
    ("left", "leave"),
    ("made", "make"),
    ("men", "man"),
    ("mice", "mouse"),
    ("people", "person"),
    ("ran", "run"),
    ("said", "say"),
    ("saw", "see"),
    ("spoke", "speak"),
    ("taught", "teach"),
    ("teeth", "tooth"),
    ("thought", "think"),
    ("told", "tell"),
    ("took", "take"),
    ("went", "go"),
    ("women", "woman"),
    ("wrote", "write"),
];

/// Entity gazetteer: lowercase phrase to label
const ENTITY_LEXICON: &[(&str, &str)] = &[
    // People
    ("alice", "PERSON"),
    ("albert einstein", "PERSON"),
    ("bob", "PERSON"),
    ("charlie", "PERSON"),
    ("diana", "PERSON"),
    ("marie curie", "PERSON"),
    // Places
    ("berlin", "GPE"),
    ("canada", "GPE"),
    ("france", "GPE"),
    ("germany", "GPE"),
    ("india", "GPE"),
    ("japan", "GPE"),
    ("london", "GPE"),
    ("madrid", "GPE"),
    ("new york", "GPE"),
    ("paris", "GPE"),
    ("rome", "GPE"),
    ("tokyo", "GPE"),
    ("united states", "GPE"),
    // Organizations
    ("amazon", "ORG"),
    ("google", "ORG"),
    ("microsoft", "ORG"),
    ("nasa", "ORG"),
    ("unesco", "ORG"),
    // Dates
    ("monday", "DATE"),
    ("tuesday", "DATE"),
    ("wednesday", "DATE"),
    ("thursday", "DATE"),
    ("friday", "DATE"),
    ("saturday", "DATE"),
    ("sunday", "DATE"),
    ("january", "DATE"),
    ("february", "DATE"),
    ("march", "DATE"),
    ("april", "DATE"),
    ("june", "DATE"),
    ("july", "DATE"),
    ("august", "DATE"),
    ("september", "DATE"),
    ("october", "DATE"),
    ("november", "DATE"),
    ("december", "DATE"),
    ("today", "DATE"),
    ("tomorrow", "DATE"),
    ("yesterday", "DATE"),
];

/// Longest gazetteer phrase, in words
const MAX_PHRASE_WORDS: usize = 2;

/// Process-wide lexical resources for text analysis
///
/// Loaded once at startup; read-only thereafter, so concurrent callers need
/// no locking.
pub struct LanguageModel {
    stopwords: HashSet<&'static str>,
    lemma_exceptions: HashMap<&'static str, &'static str>,
    gazetteer: HashMap<&'static str, &'static str>,
}

impl LanguageModel {
    /// Load the lexicon
    ///
    /// # Errors
    ///
    /// Returns [`crate::errors::ErrorCode::ResourceUnavailable`] if any
    /// lexical table is empty; callers treat this as fatal at startup
    pub fn load() -> AppResult<Self> {
        let stopwords: HashSet<&'static str> = STOPWORDS.iter().copied().collect();
        let lemma_exceptions: HashMap<&'static str, &'static str> =
            LEMMA_EXCEPTIONS.iter().copied().collect();
        let gazetteer: HashMap<&'static str, &'static str> =
            ENTITY_LEXICON.iter().copied().collect();

        if stopwords.is_empty() || lemma_exceptions.is_empty() || gazetteer.is_empty() {
            return Err(AppError::resource_unavailable(
                "Language model lexicon is empty",
            ));
        }

        Ok(Self {
            stopwords,
            lemma_exceptions,
            gazetteer,
        })
    }

    /// Reduce a lowercase word to its base lemma
    fn lemmatize(&self, word: &str) -> String {
        if let Some(lemma) = self.lemma_exceptions.get(word) {
            return (*lemma).to_owned();
        }

        if let Some(stem) = word.strip_suffix("ies").filter(|s| s.len() > 1) {
            return format!("{stem}y");
        }
        if word.ends_with("sses")
            || word.ends_with("xes")
            || word.ends_with("ches")
            || word.ends_with("shes")
            || word.ends_with("zes")
        {
            return word[..word.len() - 2].to_owned();
        }
        if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
            return word.to_owned();
        }
        if let Some(stem) = word.strip_suffix('s').filter(|s| s.len() > 2) {
            return stem.to_owned();
        }
        if word.len() > 5 {
            if let Some(stem) = word.strip_suffix("ing") {
                return undouble(stem);
            }
        }
        if word.len() > 4 {
            if let Some(stem) = word.strip_suffix("ed") {
                return undouble(stem);
            }
        }

        word.to_owned()
    }
}

/// Collapse a doubled trailing consonant left over from suffix stripping
/// (running -> runn -> run)
fn undouble(stem: &str) -> String {
    let chars: Vec<char> = stem.chars().collect();
    if chars.len() >= 2 {
        let last = chars[chars.len() - 1];
        let prev = chars[chars.len() - 2];
        if last == prev && last.is_ascii_alphabetic() && !"aeiou".contains(last) {
            return chars[..chars.len() - 1].iter().collect();
        }
    }
    stem.to_owned()
}

/// Strip leading and trailing punctuation from a whitespace token
fn strip_punctuation(raw: &str) -> &str {
    raw.trim_matches(|c: char| !c.is_alphanumeric())
}

/// Whether a word starts with an uppercase letter
fn is_capitalized(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

impl TextAnalyzer for LanguageModel {
    fn tokenize_and_normalize(&self, text: &str) -> Vec<String> {
        text.split_whitespace()
            .filter_map(|raw| {
                let stripped = strip_punctuation(raw);
                if stripped.is_empty() {
                    return None;
                }
                let lower = stripped.to_lowercase();
                if self.stopwords.contains(lower.as_str()) {
                    return None;
                }
                Some(self.lemmatize(&lower))
            })
            .collect()
    }

    fn extract_entities(&self, text: &str) -> Vec<Entity> {
        let words: Vec<&str> = text
            .split_whitespace()
            .map(strip_punctuation)
            .filter(|w| !w.is_empty())
            .collect();

        let mut entities = Vec::new();
        let mut i = 0;

        while i < words.len() {
            let word = words[i];

            // Numeric spans: four-digit years are dates, everything else a count
            if word.chars().all(|c| c.is_ascii_digit()) {
                let label = if word.len() == 4
                    && word
                        .parse::<u32>()
                        .is_ok_and(|year| (1500..=2100).contains(&year))
                {
                    "DATE"
                } else {
                    "CARDINAL"
                };
                entities.push(Entity {
                    text: word.to_owned(),
                    label: label.to_owned(),
                });
                i += 1;
                continue;
            }

            // Gazetteer spans, longest phrase first
            let lookup_len = if is_capitalized(word) {
                MAX_PHRASE_WORDS
            } else {
                // Lowercase words only match single-word date entries
                // ("today", "tomorrow")
                1
            };
            let mut matched = None;
            for span in (1..=lookup_len.min(words.len() - i)).rev() {
                let phrase = words[i..i + span].join(" ").to_lowercase();
                if let Some(label) = self.gazetteer.get(phrase.as_str()) {
                    matched = Some((span, *label));
                    break;
                }
            }

            if let Some((span, label)) = matched {
                entities.push(Entity {
                    text: words[i..i + span].join(" "),
                    label: label.to_owned(),
                });
                i += span;
            } else {
                i += 1;
            }
        }

        entities
    }
}
