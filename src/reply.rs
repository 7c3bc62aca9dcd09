//! Supportive reply selection.
//!
//! A deterministic rule table, not a learned model: the detected emotion is
//! membership-tested against four fixed label buckets, the sadness and anxiety
//! buckets split again on confidence, and a crisis match in the raw text
//! overrides everything. Bucket sets cover both supported model vocabularies,
//! so selection works unchanged whichever model loaded at startup.
//!
//! Evaluation order is first-match-wins:
//!
//! 1. Crisis phrase in the raw text → safety message.
//! 2. Sadness-like / anxiety-like bucket, split strong/weak at
//!    [`STRONG_THRESHOLD`].
//! 3. Anger-like / joy-like bucket, one template each regardless of score.
//! 4. Anything else → generic open-ended prompt.

use crate::crisis::needs_urgent_help;
use crate::profile::Profile;

/// Confidence at or above which sadness and anxiety replies switch to the
/// more directive, professional-care-oriented tone.
pub const STRONG_THRESHOLD: f32 = 0.70;

// ── Emotion buckets ─────────────────────────────────────────────────────
//
// Labels from both the GoEmotions and basic-emotion vocabularies; membership
// is tested per label, never by position or vocabulary length.

const SADNESS_LIKE: &[&str] = &["sadness", "grief", "disappointment", "remorse"];

const ANXIETY_LIKE: &[&str] = &["nervousness", "fear", "embarrassment", "confusion", "worry"];

const ANGER_LIKE: &[&str] = &["anger", "annoyance", "disapproval", "disgust", "jealousy"];

const JOY_LIKE: &[&str] = &[
    "joy",
    "amusement",
    "excitement",
    "admiration",
    "love",
    "gratitude",
    "relief",
    "pride",
    "optimism",
];

/// Which reply template applies to a turn.
///
/// `Crisis` strictly precedes the emotion branches; the remaining variants
/// partition the bucket × strength table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    Crisis,
    SadnessStrong,
    SadnessWeak,
    AnxietyStrong,
    AnxietyWeak,
    Anger,
    Joy,
    Unclassified,
}

/// Classify a turn into its reply template.
///
/// `text` is the raw user input (consulted for crisis phrases); `emotion` and
/// `score` come from the classifier's top-scoring label.
#[must_use]
pub fn categorize(emotion: &str, score: f32, text: &str) -> ReplyKind {
    if needs_urgent_help(text) {
        return ReplyKind::Crisis;
    }

    let strong = score >= STRONG_THRESHOLD;
    if SADNESS_LIKE.contains(&emotion) {
        if strong {
            ReplyKind::SadnessStrong
        } else {
            ReplyKind::SadnessWeak
        }
    } else if ANXIETY_LIKE.contains(&emotion) {
        if strong {
            ReplyKind::AnxietyStrong
        } else {
            ReplyKind::AnxietyWeak
        }
    } else if ANGER_LIKE.contains(&emotion) {
        ReplyKind::Anger
    } else if JOY_LIKE.contains(&emotion) {
        ReplyKind::Joy
    } else {
        ReplyKind::Unclassified
    }
}

/// Render the supportive reply for a turn.
///
/// Every template interpolates the profile display name; the emotion-specific
/// templates also interpolate the lowercased emotion label.
#[must_use]
pub fn supportive_reply(emotion: &str, score: f32, profile: &Profile, text: &str) -> String {
    let name = profile.display_name();
    let feeling = emotion.to_lowercase();

    match categorize(emotion, score, text) {
        ReplyKind::Crisis => format!(
            "{name}, I'm deeply concerned about your safety. Your life matters, and you're \
             not alone. Please contact a trusted person nearby and reach out to a trained \
             professional right now. You can also call a helpline — I can share numbers for \
             your country."
        ),
        ReplyKind::SadnessStrong => format!(
            "{name}, I can sense this {feeling} is weighing heavily on you. I want to \
             reassure you that these feelings are valid and deserve compassionate care. \
             Consider speaking with a licensed therapist or counsellor — they can help \
             create a plan to ease this burden. Meanwhile, focus on rest, hydration, and \
             gentle movement if possible."
        ),
        ReplyKind::SadnessWeak => format!(
            "{name}, I hear that you're feeling some {feeling}. It's completely okay to \
             acknowledge this. Even small steps — like taking a short walk, journaling, or \
             calling a friend — can make a difference."
        ),
        ReplyKind::AnxietyStrong => format!(
            "{name}, anxiety can be overwhelming. Please remember you're safe right now. \
             Consider booking time with a mental health professional who can teach \
             grounding techniques tailored for you. For now, try this: name 5 things you \
             see, 4 you can touch, 3 you hear, 2 you smell, and 1 you taste."
        ),
        ReplyKind::AnxietyWeak => format!(
            "{name}, I notice some {feeling}. Writing your worries down and focusing on \
             just one actionable step today might help ease your mind."
        ),
        ReplyKind::Anger => format!(
            "{name}, your {feeling} is valid. If it feels intense, step away from the \
             situation briefly. Breathing deeply and reflecting before responding can help \
             — and if it's recurring, a counsellor might help unpack the triggers."
        ),
        ReplyKind::Joy => format!(
            "That's wonderful, {name}! Please take a moment to enjoy this {feeling} fully. \
             Savoring these moments can strengthen emotional resilience."
        ),
        ReplyKind::Unclassified => format!(
            "I'm here with you, {name}. Thank you for sharing openly. Would you like ideas \
             for coping strategies, journaling prompts, or professional resources?"
        ),
    }
}
