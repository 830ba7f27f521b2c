//! Everything the interview says out loud.

pub const WELCOME: &str = "Welcome to KYC verification. This call may be recorded for quality and compliance purposes.";

pub const COMPLETION: &str = "Your KYC verification is complete. A confirmation will be sent to your registered phone number. Thank you.";

// ── Field prompts ───────────────────────────────────────────────────

pub const NAME_PROMPT: &str = "May I have your full name please?";
pub const NAME_INVALID: &str =
    "I need a valid name with at least two characters. Please provide your full name.";
pub const NAME_EXHAUSTED: &str = "I couldn't verify your name after multiple attempts.";
pub const NAME_ABANDONED: &str = "Unable to proceed without a valid name. Thank you for your time.";

pub const PHONE_PROMPT: &str = "Thank you. What is your 10-digit phone number?";
pub const PHONE_INVALID: &str = "Please provide a valid 10-digit phone number.";
pub const PHONE_EXHAUSTED: &str = "I couldn't verify your phone number after multiple attempts.";
pub const PHONE_ABANDONED: &str =
    "Unable to proceed without a valid phone number. Thank you for your time.";

pub const PAN_PROMPT: &str =
    "Please provide your PAN number. That's 5 letters, followed by 4 digits, and 1 letter.";
pub const PAN_INVALID: &str = "Please provide a valid PAN number with 10 alphanumeric characters.";
pub const PAN_EXHAUSTED: &str = "I couldn't verify your PAN after multiple attempts.";
pub const PAN_ABANDONED: &str = "Unable to proceed without a valid PAN. Thank you for your time.";

// ── Capture problems (shared by all fields) ─────────────────────────

pub const DIDNT_HEAR: &str = "I didn't hear anything. Let me try again.";
pub const DIDNT_CATCH: &str = "I didn't catch that clearly. Could you please repeat?";
pub const TECHNICAL_DIFFICULTY: &str = "I'm experiencing technical difficulties. Please try again.";
pub const TROUBLE_HEARING: &str = "I'm having trouble hearing you. Let's try this field later.";
pub const TROUBLE_UNDERSTANDING: &str =
    "I'm sorry, I'm having trouble understanding. Let's move on.";
pub const TECHNICAL_EXHAUSTED: &str =
    "I'm still experiencing technical difficulties. We'll have to stop here.";

// ── Consent ─────────────────────────────────────────────────────────

pub const CONSENT_PROMPT: &str = "Do you consent to this KYC verification? Please say yes or no.";
pub const CONSENT_REPROMPT: &str = "I didn't hear you clearly. Please say yes or no.";
pub const CONSENT_YES_NO_ONLY: &str = "Please respond with yes or no only.";
pub const CONSENT_UNCONFIRMED: &str = "I couldn't confirm your consent. Ending verification.";
pub const CONSENT_NOT_UNDERSTOOD: &str =
    "I couldn't understand your response. Ending verification.";
pub const CONSENT_DECLINED: &str =
    "You have not provided consent. We cannot proceed with verification. Thank you.";

/// Read the collected details back to the user.
///
/// `entries` are `(label, value)` pairs in interview order.
pub fn readback(entries: &[(&str, &str)]) -> String {
    let mut parts = vec!["Thank you. Let me confirm your details.".to_string()];
    for (label, value) in entries {
        parts.push(format!("{label}: {value}."));
    }
    parts.push("Consent: provided.".to_string());
    parts.join(" ")
}
