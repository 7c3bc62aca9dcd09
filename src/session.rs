//! Session-scoped conversation state and the per-turn pipeline.
//!
//! [`SessionContext`] owns everything mutable in one chat session: the user
//! profile and the append-only [`ConversationLog`]. It is created per session,
//! passed explicitly to every operation, and dropped when the session ends —
//! there is no ambient global state.
//!
//! The log holds strictly alternating user/bot turns: the only way to grow it
//! is [`ConversationLog::append_exchange`], which appends a user turn and the
//! bot turn generated from it as one unit. Turns are immutable once appended;
//! there is no deletion, editing, or reordering.

use crate::classifier::{EmotionClassifier, ScoreDistribution};
use crate::error::{AsyticError, Result};
use crate::profile::Profile;
use crate::reply::supportive_reply;
use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::debug;

/// One user message with its classification result.
#[derive(Debug, Clone, Serialize)]
pub struct UserTurn {
    /// Raw message text as submitted (already trimmed).
    pub text: String,
    /// Highest-scoring emotion label.
    pub top_label: String,
    /// Confidence of the top label.
    pub top_score: f32,
    /// Full per-label distribution, for charting.
    pub scores: ScoreDistribution,
    /// Local wall-clock time the turn was appended.
    pub timestamp: DateTime<Local>,
}

/// One bot reply.
#[derive(Debug, Clone, Serialize)]
pub struct BotTurn {
    /// Reply text.
    pub text: String,
    /// Local wall-clock time the turn was appended.
    pub timestamp: DateTime<Local>,
}

/// A single conversation turn.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Turn {
    User(UserTurn),
    Bot(BotTurn),
}

/// Append-only ordered log of turns for one session.
///
/// Insertion order is display order is export order.
#[derive(Debug, Clone, Default)]
pub struct ConversationLog {
    turns: Vec<Turn>,
}

impl ConversationLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user turn and the bot turn generated from it.
    ///
    /// Pairing is positional: the bot turn always lands immediately after its
    /// user turn.
    pub fn append_exchange(&mut self, user: UserTurn, bot: BotTurn) {
        self.turns.push(Turn::User(user));
        self.turns.push(Turn::Bot(bot));
    }

    /// All turns in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }

    /// Only the user turns, in insertion order.
    pub fn user_turns(&self) -> impl Iterator<Item = &UserTurn> {
        self.turns.iter().filter_map(|turn| match turn {
            Turn::User(user) => Some(user),
            Turn::Bot(_) => None,
        })
    }

    /// The most recent user turn, if any.
    #[must_use]
    pub fn last_user_turn(&self) -> Option<&UserTurn> {
        self.user_turns().last()
    }

    /// Total number of turns (user + bot).
    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

/// Result of one processed user submission.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// Detected top emotion label.
    pub top_label: String,
    /// Confidence of the top label.
    pub top_score: f32,
    /// The supportive reply appended to the log.
    pub reply: String,
}

/// All mutable state for one chat session.
#[derive(Debug, Default)]
pub struct SessionContext {
    profile: Profile,
    log: ConversationLog,
}

impl SessionContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the profile wholesale. There are no partial updates.
    pub fn set_profile(&mut self, profile: Profile) {
        self.profile = profile;
    }

    #[must_use]
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    #[must_use]
    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    /// Process one user submission end to end.
    ///
    /// Trims the input; whitespace-only input is silently ignored and returns
    /// `Ok(None)` with the log untouched. Otherwise the text is classified,
    /// a reply is selected, and the user/bot pair is appended.
    ///
    /// # Errors
    ///
    /// Propagates classification failures. On error nothing is appended.
    pub fn submit(
        &mut self,
        classifier: &mut dyn EmotionClassifier,
        input: &str,
    ) -> Result<Option<TurnOutcome>> {
        let text = input.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let scores = classifier.classify(text)?;
        let top = scores.top().ok_or_else(|| {
            AsyticError::Classifier("classifier returned an empty distribution".to_owned())
        })?;
        let top_label = top.label.clone();
        let top_score = top.score;
        debug!(
            emotion = top_label.as_str(),
            score = top_score,
            "classified user message"
        );

        let reply = supportive_reply(&top_label, top_score, &self.profile, text);

        self.log.append_exchange(
            UserTurn {
                text: text.to_owned(),
                top_label: top_label.clone(),
                top_score,
                scores,
                timestamp: Local::now(),
            },
            BotTurn {
                text: reply.clone(),
                timestamp: Local::now(),
            },
        );

        Ok(Some(TurnOutcome {
            top_label,
            top_score,
            reply,
        }))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::classifier::{ScoreDistribution, Vocabulary};

    /// Classifier double that always returns the same single-label result.
    struct FixedClassifier {
        label: &'static str,
        score: f32,
    }

    impl EmotionClassifier for FixedClassifier {
        fn vocabulary(&self) -> Vocabulary {
            Vocabulary::Basic
        }

        fn classify(&mut self, _text: &str) -> Result<ScoreDistribution> {
            Ok(ScoreDistribution::from_scores(
                &[self.label, "neutral"],
                &[self.score, 0.01],
            ))
        }
    }

    struct FailingClassifier;

    impl EmotionClassifier for FailingClassifier {
        fn vocabulary(&self) -> Vocabulary {
            Vocabulary::Basic
        }

        fn classify(&mut self, _text: &str) -> Result<ScoreDistribution> {
            Err(AsyticError::Classifier("inference exploded".to_owned()))
        }
    }

    #[test]
    fn submit_appends_user_then_bot() {
        let mut session = SessionContext::new();
        let mut classifier = FixedClassifier {
            label: "sadness",
            score: 0.9,
        };

        let outcome = session.submit(&mut classifier, "rough day").unwrap().unwrap();
        assert_eq!(outcome.top_label, "sadness");

        assert_eq!(session.log().len(), 2);
        let turns: Vec<&Turn> = session.log().iter().collect();
        assert!(matches!(turns[0], Turn::User(_)));
        assert!(matches!(turns[1], Turn::Bot(_)));
    }

    #[test]
    fn blank_input_is_silently_ignored() {
        let mut session = SessionContext::new();
        let mut classifier = FixedClassifier {
            label: "joy",
            score: 0.9,
        };

        assert!(session.submit(&mut classifier, "").unwrap().is_none());
        assert!(session.submit(&mut classifier, "   \t  ").unwrap().is_none());
        assert!(session.log().is_empty());
    }

    #[test]
    fn input_is_trimmed_before_logging() {
        let mut session = SessionContext::new();
        let mut classifier = FixedClassifier {
            label: "joy",
            score: 0.9,
        };

        session.submit(&mut classifier, "  good news!  ").unwrap();
        assert_eq!(session.log().last_user_turn().unwrap().text, "good news!");
    }

    #[test]
    fn classifier_failure_appends_nothing() {
        let mut session = SessionContext::new();
        let mut classifier = FailingClassifier;

        assert!(session.submit(&mut classifier, "hello").is_err());
        assert!(session.log().is_empty());
    }

    #[test]
    fn reply_uses_session_profile_name() {
        let mut session = SessionContext::new();
        session.set_profile(Profile {
            name: Some("Sam".to_owned()),
            ..Profile::default()
        });
        let mut classifier = FixedClassifier {
            label: "sadness",
            score: 0.9,
        };

        let outcome = session.submit(&mut classifier, "rough day").unwrap().unwrap();
        assert!(outcome.reply.contains("Sam"));
    }

    #[test]
    fn profile_replacement_is_wholesale() {
        let mut session = SessionContext::new();
        session.set_profile(Profile {
            name: Some("Sam".to_owned()),
            occupation: Some("Student".to_owned()),
            ..Profile::default()
        });
        // Saving a profile without an occupation clears the old one.
        session.set_profile(Profile {
            name: Some("Alex".to_owned()),
            ..Profile::default()
        });
        assert_eq!(session.profile().display_name(), "Alex");
        assert!(session.profile().occupation.is_none());
    }

    #[test]
    fn turns_alternate_across_many_exchanges() {
        let mut session = SessionContext::new();
        let mut classifier = FixedClassifier {
            label: "neutral",
            score: 0.5,
        };

        for i in 0..5 {
            session.submit(&mut classifier, &format!("message {i}")).unwrap();
        }

        assert_eq!(session.log().len(), 10);
        for (i, turn) in session.log().iter().enumerate() {
            match turn {
                Turn::User(_) => assert_eq!(i % 2, 0, "user turn at odd index {i}"),
                Turn::Bot(_) => assert_eq!(i % 2, 1, "bot turn at even index {i}"),
            }
        }
    }
}
