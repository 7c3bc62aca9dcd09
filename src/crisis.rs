//! Self-harm crisis detection over raw user input.
//!
//! A deliberately blunt substring scan: the input is lowercased and checked
//! against a fixed list of self-harm indicator phrases. No stemming, no word
//! boundaries. The check is safety-biased — over-triggering on innocuous text
//! (e.g. "die" inside "died laughing") is accepted; missing a genuine signal
//! is not.

/// Self-harm indicator phrases, matched as lowercase substrings.
pub const CRISIS_PHRASES: &[&str] = &[
    "kill myself",
    "suicide",
    "end my life",
    "self harm",
    "self-harm",
    "cut myself",
    "don't want to live",
    "die",
    "hurting myself",
];

/// Notice text shown by the presentation layer when a crisis phrase is
/// detected in the most recent user message.
pub const CRISIS_NOTICE: &str = "If you feel you might harm yourself or someone else, \
please seek immediate help.\n\
- India: Call Kiran Helpline 1800-599-0019 or iCall 9152987821.\n\
- Elsewhere: Contact your local emergency number or a trusted person nearby.";

/// Return `true` if the text contains any self-harm indicator phrase.
///
/// Matching is case-insensitive and substring-based. Punctuation and
/// surrounding words do not matter.
#[must_use]
pub fn needs_urgent_help(text: &str) -> bool {
    let lower = text.to_lowercase();
    CRISIS_PHRASES.iter().any(|phrase| lower.contains(phrase))
}
