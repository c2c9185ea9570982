//! User-facing texts and report rendering.

use activity_stats::{Preset, StatsReport, WindowSelector, WindowSpec};
use dbot_core::{InlineButton, InlineKeyboard};

pub const GREETING: &str = "Hi! I count messages in this group. Use /stats.";
pub const CHOOSE_PERIOD: &str = "Choose a period for the stats:";
pub const DATES_PROMPT: &str =
    "Send the period as two dates: YYYY-MM-DD YYYY-MM-DD (or /cancel).";
pub const EMPTY_RESULT: &str = "No messages for the selected period.";
pub const CANCELLED: &str = "Custom range cancelled.";
pub const NOTHING_TO_CANCEL: &str = "Nothing to cancel.";
pub const UNAVAILABLE: &str = "Stats are temporarily unavailable, please try again later.";

/// `1 day`, `7 days`, `30 days`, then `Custom range`, all in one row.
pub fn period_keyboard() -> InlineKeyboard {
    let mut row: Vec<InlineButton> = Preset::ALL
        .iter()
        .map(|p| InlineButton::new(days_label(p.days()), WindowSelector::Preset(*p).to_string()))
        .collect();
    row.push(InlineButton::new(
        "Custom range",
        WindowSelector::CustomRequested.to_string(),
    ));
    InlineKeyboard::new(vec![row])
}

fn days_label(days: u32) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", days)
    }
}

/// Header line, then `"{rank}. {name}: {count} messages"` per user.
pub fn render_report(report: &StatsReport) -> String {
    if report.result.is_empty() {
        return EMPTY_RESULT.to_string();
    }

    let header = match report.window {
        WindowSpec::Preset(p) => format!("📊 Stats for the last {}:", days_label(p.days())),
        WindowSpec::Range {
            first_day,
            last_day,
        } => format!("📊 Stats from {} to {}:", first_day, last_day),
    };

    let mut text = header;
    text.push('\n');
    for (i, user) in report.result.entries().iter().enumerate() {
        let noun = if user.count == 1 { "message" } else { "messages" };
        text.push_str(&format!(
            "\n{}. {}: {} {}",
            i + 1,
            user.display_name,
            user.count,
            noun
        ));
    }
    text
}

/// Validation message followed by the prompt again.
pub fn reprompt(reason: &str) -> String {
    format!("{}\n{}", reason, DATES_PROMPT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use activity_stats::{AggregationResult, RankedUser, ResolvedWindow};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn report(window: WindowSpec, result: AggregationResult) -> StatsReport {
        StatsReport {
            window,
            bounds: ResolvedWindow {
                start: Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
                end_exclusive: Utc.with_ymd_and_hms(2024, 5, 8, 0, 0, 0).unwrap(),
            },
            result,
        }
    }

    fn ranked(entries: &[(&str, u64)]) -> AggregationResult {
        AggregationResult::Ranked(
            entries
                .iter()
                .enumerate()
                .map(|(i, (name, count))| RankedUser {
                    user_id: i as i64,
                    display_name: name.to_string(),
                    count: *count,
                })
                .collect(),
        )
    }

    #[test]
    fn test_keyboard_payloads() {
        let keyboard = period_keyboard();
        let data: Vec<&str> = keyboard
            .buttons()
            .map(|b| b.callback_data.as_str())
            .collect();
        assert_eq!(data, vec!["preset:1", "preset:7", "preset:30", "custom"]);
        assert_eq!(keyboard.rows[0][0].label, "1 day");
    }

    #[test]
    fn test_render_preset_report() {
        let text = render_report(&report(
            WindowSpec::Preset(Preset::SevenDays),
            ranked(&[("alice", 5), ("bob", 1)]),
        ));
        assert_eq!(
            text,
            "📊 Stats for the last 7 days:\n\n1. alice: 5 messages\n2. bob: 1 message"
        );
    }

    #[test]
    fn test_render_range_report() {
        let window = WindowSpec::range(
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
        )
        .unwrap();
        let text = render_report(&report(window, ranked(&[("carol", 3)])));
        assert!(text.starts_with("📊 Stats from 2024-05-01 to 2024-05-10:"));
        assert!(text.ends_with("1. carol: 3 messages"));
    }

    #[test]
    fn test_render_empty() {
        let text = render_report(&report(
            WindowSpec::Preset(Preset::OneDay),
            AggregationResult::Empty,
        ));
        assert_eq!(text, EMPTY_RESULT);
    }
}
