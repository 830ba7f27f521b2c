//! Yes/no consent classification.
//!
//! Known limitation: classification is keyword-based and checks affirmative
//! keywords first, so negated affirmatives ("not okay", "I don't agree") are
//! read as granted in both matching modes. `ConsentMatch::WholeWord` only
//! removes false hits from keywords buried inside other words ("know",
//! "nothing", "token").

use std::str::FromStr;

use serde::{Deserialize, Serialize};

const AFFIRMATIVE: &[&str] = &["yes", "yeah", "yep", "sure", "okay", "ok", "agree"];
const NEGATIVE: &[&str] = &["no", "nope", "not", "don't", "dont"];

/// The user's answer to the consent question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsentDecision {
    Granted,
    Declined,
    /// Neither yes nor no; the question is asked again.
    Indeterminate,
}

/// How keywords are matched against the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsentMatch {
    /// Keyword appears anywhere in the text.
    #[default]
    Substring,
    /// Keyword equals one of the word tokens.
    WholeWord,
}

impl FromStr for ConsentMatch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "substring" => Ok(Self::Substring),
            "word" | "whole_word" => Ok(Self::WholeWord),
            other => Err(format!("unknown consent match mode '{other}'")),
        }
    }
}

impl std::fmt::Display for ConsentMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Substring => write!(f, "substring"),
            Self::WholeWord => write!(f, "word"),
        }
    }
}

/// Ternary yes/no classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsentClassifier {
    mode: ConsentMatch,
}

impl ConsentClassifier {
    pub fn new(mode: ConsentMatch) -> Self {
        Self { mode }
    }

    /// Classify a free-text answer. Affirmative wins when both sets match.
    pub fn classify(&self, text: &str) -> ConsentDecision {
        // Recognizers sometimes emit typographic apostrophes.
        let response = text.trim().to_lowercase().replace('\u{2019}', "'");

        if self.matches_any(&response, AFFIRMATIVE) {
            ConsentDecision::Granted
        } else if self.matches_any(&response, NEGATIVE) {
            ConsentDecision::Declined
        } else {
            ConsentDecision::Indeterminate
        }
    }

    fn matches_any(&self, response: &str, keywords: &[&str]) -> bool {
        match self.mode {
            ConsentMatch::Substring => keywords.iter().any(|k| response.contains(k)),
            ConsentMatch::WholeWord => response
                .split(|c: char| !(c.is_alphanumeric() || c == '\''))
                .any(|token| keywords.contains(&token)),
        }
    }
}

/// Classify with the default (substring) matching mode.
pub fn classify(text: &str) -> ConsentDecision {
    ConsentClassifier::default().classify(text)
}
