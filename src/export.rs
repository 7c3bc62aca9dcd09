//! CSV export of the conversation log.
//!
//! Fixed columns in fixed order: `Timestamp, Role, Message, Detected Emotion,
//! Confidence Score`. User rows carry the detected emotion and a 2-decimal
//! confidence; bot rows leave both empty. Row order is log order, so user/bot
//! roles alternate.

use crate::error::{AsyticError, Result};
use crate::session::{ConversationLog, Turn};
use std::io::Write;
use std::path::Path;

/// CSV header row.
pub const CSV_HEADER: &str = "Timestamp,Role,Message,Detected Emotion,Confidence Score";

/// Role column value for user rows.
pub const ROLE_USER: &str = "User";

/// Role column value for bot rows.
pub const ROLE_BOT: &str = "Asytic";

/// Timestamp column format: local clock, second precision.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Write the log as CSV to any writer.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_csv<W: Write>(log: &ConversationLog, writer: &mut W) -> Result<()> {
    writeln!(writer, "{CSV_HEADER}")?;
    for turn in log.iter() {
        match turn {
            Turn::User(user) => {
                writeln!(
                    writer,
                    "{},{},{},{},{:.2}",
                    user.timestamp.format(TIMESTAMP_FORMAT),
                    ROLE_USER,
                    escape_field(&user.text),
                    escape_field(&user.top_label),
                    user.top_score,
                )?;
            }
            Turn::Bot(bot) => {
                writeln!(
                    writer,
                    "{},{},{},,",
                    bot.timestamp.format(TIMESTAMP_FORMAT),
                    ROLE_BOT,
                    escape_field(&bot.text),
                )?;
            }
        }
    }
    Ok(())
}

/// Render the log as a CSV string.
///
/// # Errors
///
/// Returns an error if the rendered bytes are not valid UTF-8 (which would
/// indicate a bug, not bad input).
pub fn to_csv_string(log: &ConversationLog) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(log, &mut buf)?;
    String::from_utf8(buf).map_err(|e| AsyticError::Export(e.to_string()))
}

/// Write the log as CSV to a file, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn export_to_file(log: &ConversationLog, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::fs::File::create(path)?;
    write_csv(log, &mut file)
}

/// Quote a field per RFC 4180 when it contains a comma, quote, or newline.
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_owned()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::classifier::ScoreDistribution;
    use crate::session::{BotTurn, UserTurn};
    use chrono::Local;

    fn log_with_exchanges(texts: &[(&str, &str)]) -> ConversationLog {
        let mut log = ConversationLog::new();
        for (user_text, bot_text) in texts {
            log.append_exchange(
                UserTurn {
                    text: (*user_text).to_owned(),
                    top_label: "sadness".to_owned(),
                    top_score: 0.873,
                    scores: ScoreDistribution::from_scores(
                        &["sadness", "joy"],
                        &[0.873, 0.05],
                    ),
                    timestamp: Local::now(),
                },
                BotTurn {
                    text: (*bot_text).to_owned(),
                    timestamp: Local::now(),
                },
            );
        }
        log
    }

    #[test]
    fn header_row_is_fixed() {
        let csv = to_csv_string(&ConversationLog::new()).unwrap();
        assert_eq!(
            csv.trim_end(),
            "Timestamp,Role,Message,Detected Emotion,Confidence Score"
        );
    }

    #[test]
    fn exchanges_yield_alternating_roles() {
        let log = log_with_exchanges(&[("one", "reply one"), ("two", "reply two")]);
        let csv = to_csv_string(&log).unwrap();
        let rows: Vec<&str> = csv.lines().skip(1).collect();

        assert_eq!(rows.len(), 4);
        for (i, row) in rows.iter().enumerate() {
            let role = row.split(',').nth(1).unwrap();
            if i % 2 == 0 {
                assert_eq!(role, "User", "row {i}: {row}");
            } else {
                assert_eq!(role, "Asytic", "row {i}: {row}");
            }
        }
    }

    #[test]
    fn user_rows_carry_emotion_and_two_decimal_score() {
        let log = log_with_exchanges(&[("hello", "hi")]);
        let csv = to_csv_string(&log).unwrap();
        let user_row = csv.lines().nth(1).unwrap();

        let fields: Vec<&str> = user_row.split(',').collect();
        assert_eq!(fields[3], "sadness");
        assert_eq!(fields[4], "0.87");
    }

    #[test]
    fn bot_rows_leave_emotion_and_score_empty() {
        let log = log_with_exchanges(&[("hello", "hi")]);
        let csv = to_csv_string(&log).unwrap();
        let bot_row = csv.lines().nth(2).unwrap();

        assert!(bot_row.ends_with(",,"), "bot row: {bot_row}");
    }

    #[test]
    fn timestamp_has_second_precision_format() {
        let log = log_with_exchanges(&[("hello", "hi")]);
        let csv = to_csv_string(&log).unwrap();
        let ts = csv.lines().nth(1).unwrap().split(',').next().unwrap();

        // YYYY-MM-DD HH:MM:SS
        assert_eq!(ts.len(), 19, "timestamp: {ts}");
        assert_eq!(ts.as_bytes()[4], b'-');
        assert_eq!(ts.as_bytes()[10], b' ');
        assert_eq!(ts.as_bytes()[13], b':');
    }

    #[test]
    fn fields_with_commas_and_quotes_are_escaped() {
        let log = log_with_exchanges(&[("I feel sad, tired, and \"done\"", "reply")]);
        let csv = to_csv_string(&log).unwrap();
        let user_row = csv.lines().nth(1).unwrap();

        assert!(user_row.contains("\"I feel sad, tired, and \"\"done\"\"\""));
    }

    #[test]
    fn export_to_file_writes_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exports").join("history.csv");

        let log = log_with_exchanges(&[("hello", "hi")]);
        export_to_file(&log, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with(CSV_HEADER));
        assert_eq!(content.lines().count(), 3);
    }
}
