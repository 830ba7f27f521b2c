//! Field specifications — what to ask, how to check it, what to say on failure.

use serde::{Deserialize, Serialize};

use super::prompts;
use super::validators;

/// Predicate over a captured utterance.
pub type Validator = fn(&str) -> bool;
/// Maps an accepted utterance to its stored form.
pub type Normalizer = fn(&str) -> String;

/// The fields collected by the interview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Name,
    Phone,
    Pan,
}

impl FieldKind {
    /// Key used in the session snapshot.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Pan => "pan",
        }
    }

    /// Label used when reading values back.
    pub fn readback_label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Phone => "Phone number",
            Self::Pan => "PAN",
        }
    }

    /// The standard specification for this field.
    pub fn spec(&self) -> FieldSpec {
        match self {
            Self::Name => FieldSpec {
                kind: *self,
                prompt: prompts::NAME_PROMPT,
                validator: validators::validate_name,
                normalizer: validators::normalize_name,
                invalid_message: prompts::NAME_INVALID,
                exhausted_message: prompts::NAME_EXHAUSTED,
                abandon_message: prompts::NAME_ABANDONED,
            },
            Self::Phone => FieldSpec {
                kind: *self,
                prompt: prompts::PHONE_PROMPT,
                validator: validators::validate_phone,
                normalizer: validators::phone_digits,
                invalid_message: prompts::PHONE_INVALID,
                exhausted_message: prompts::PHONE_EXHAUSTED,
                abandon_message: prompts::PHONE_ABANDONED,
            },
            Self::Pan => FieldSpec {
                kind: *self,
                prompt: prompts::PAN_PROMPT,
                validator: validators::validate_tax_id,
                normalizer: validators::normalize_tax_id,
                invalid_message: prompts::PAN_INVALID,
                exhausted_message: prompts::PAN_EXHAUSTED,
                abandon_message: prompts::PAN_ABANDONED,
            },
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Immutable description of one field's capture.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub kind: FieldKind,
    pub prompt: &'static str,
    pub validator: Validator,
    pub normalizer: Normalizer,
    /// Re-prompt after an answer fails validation.
    pub invalid_message: &'static str,
    /// Spoken when validation keeps failing until the budget runs out.
    pub exhausted_message: &'static str,
    /// Spoken by the driver when the interview stops on this field.
    pub abandon_message: &'static str,
}

impl FieldSpec {
    /// Validate and normalize an utterance. `None` if invalid.
    pub fn accept(&self, text: &str) -> Option<String> {
        if (self.validator)(text) {
            Some((self.normalizer)(text))
        } else {
            None
        }
    }

    /// Name → phone → PAN.
    pub fn standard_sequence() -> Vec<FieldSpec> {
        [FieldKind::Name, FieldKind::Phone, FieldKind::Pan]
            .iter()
            .map(FieldKind::spec)
            .collect()
    }
}
