//! Chart-ready data for the presentation layer.
//!
//! Rendering stays external; this module only shapes the log into the two
//! series the UI draws: a per-message confidence bar chart (top labels,
//! 0–1 y-axis) and a session-wide top-score trend line indexed by user-turn
//! number. Everything is serde-serializable so the boundary can be JSON.

use crate::session::{ConversationLog, UserTurn};
use serde::Serialize;

/// One bar of the per-message confidence chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmotionBar {
    /// Emotion label.
    pub label: String,
    /// Confidence in `[0, 1]`.
    pub score: f32,
    /// 2-decimal value label rendered above the bar.
    pub text: String,
}

/// One point of the session-wide confidence trend line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    /// 1-based user-turn number.
    pub turn: usize,
    /// Top emotion label for that turn.
    pub emotion: String,
    /// Top confidence for that turn.
    pub score: f32,
}

/// Bars for one user message: the `top_n` highest-scoring labels, descending.
#[must_use]
pub fn emotion_bars(turn: &UserTurn, top_n: usize) -> Vec<EmotionBar> {
    turn.scores
        .top_n(top_n)
        .iter()
        .map(|entry| EmotionBar {
            label: entry.label.clone(),
            score: entry.score,
            text: format!("{:.2}", entry.score),
        })
        .collect()
}

/// Top-score trend across the whole session, one point per user turn.
#[must_use]
pub fn confidence_trend(log: &ConversationLog) -> Vec<TrendPoint> {
    log.user_turns()
        .enumerate()
        .map(|(i, turn)| TrendPoint {
            turn: i + 1,
            emotion: turn.top_label.clone(),
            score: turn.top_score,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::classifier::ScoreDistribution;
    use crate::session::BotTurn;
    use chrono::Local;

    fn user_turn(label: &str, score: f32) -> UserTurn {
        UserTurn {
            text: "hi".to_owned(),
            top_label: label.to_owned(),
            top_score: score,
            scores: ScoreDistribution::from_scores(
                &[label, "neutral", "joy", "anger"],
                &[score, 0.30, 0.20, 0.10],
            ),
            timestamp: Local::now(),
        }
    }

    fn bot_turn() -> BotTurn {
        BotTurn {
            text: "reply".to_owned(),
            timestamp: Local::now(),
        }
    }

    #[test]
    fn bars_are_descending_and_capped() {
        let turn = user_turn("sadness", 0.9);
        let bars = emotion_bars(&turn, 3);

        assert_eq!(bars.len(), 3);
        assert_eq!(bars[0].label, "sadness");
        assert!(bars[0].score >= bars[1].score && bars[1].score >= bars[2].score);
    }

    #[test]
    fn bar_value_labels_are_two_decimal() {
        let turn = user_turn("sadness", 0.873);
        let bars = emotion_bars(&turn, 1);
        assert_eq!(bars[0].text, "0.87");
    }

    #[test]
    fn top_n_larger_than_vocabulary_returns_all() {
        let turn = user_turn("sadness", 0.9);
        assert_eq!(emotion_bars(&turn, 10).len(), 4);
    }

    #[test]
    fn trend_numbers_user_turns_from_one() {
        let mut log = ConversationLog::new();
        log.append_exchange(user_turn("sadness", 0.8), bot_turn());
        log.append_exchange(user_turn("joy", 0.6), bot_turn());
        log.append_exchange(user_turn("fear", 0.7), bot_turn());

        let trend = confidence_trend(&log);
        assert_eq!(trend.len(), 3);
        assert_eq!(trend[0].turn, 1);
        assert_eq!(trend[2].turn, 3);
        assert_eq!(trend[1].emotion, "joy");
        assert!((trend[2].score - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn empty_log_yields_empty_trend() {
        assert!(confidence_trend(&ConversationLog::new()).is_empty());
    }
}
