//! Help text derived from a show's download policy fields.

use chrono::{Days, NaiveDate, NaiveTime};

const MINUTES_PER_DAY: u64 = 24 * 60;

/// Parse a free-form numeric field. Empty or anything but a non-negative integer yields `None`.
pub fn parse_non_negative(input: &str) -> Option<u64> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse().ok()
}

/// The oldest calendar date covered by `download_days`, counted back from `today`.
pub fn oldest_download_date(download_days: &str, today: NaiveDate) -> Option<NaiveDate> {
    let days = parse_non_negative(download_days)?;
    today.checked_sub_days(Days::new(days))
}

/// `YYYY-MM-DD` of [`oldest_download_date`].
pub fn oldest_date_help(download_days: &str, today: NaiveDate) -> Option<String> {
    oldest_download_date(download_days, today).map(|d| d.format("%Y-%m-%d").to_string())
}

/// Wall-clock moment `minutes` after the assumed publish time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishOffset {
    pub time: NaiveTime,
    /// Calendar days after the publish day.
    pub days_later: u64,
}

impl PublishOffset {
    pub fn label(&self) -> String {
        let clock = self.time.format("%H:%M");
        if self.days_later > 0 {
            format!("{clock} (next day)")
        } else {
            clock.to_string()
        }
    }
}

pub fn offset_from_publish(minutes: &str) -> Option<PublishOffset> {
    let minutes = parse_non_negative(minutes)?;
    let (hour, minute) = wireloft_config::ASSUMED_PUBLISH_TIME;
    let total = u64::from(hour * 60 + minute).checked_add(minutes)?;

    let days_later = total / MINUTES_PER_DAY;
    let in_day = total % MINUTES_PER_DAY;
    let time = NaiveTime::from_hms_opt((in_day / 60) as u32, (in_day % 60) as u32, 0)?;
    Some(PublishOffset { time, days_later })
}

/// When an episode published at the assumed time is downloaded again.
pub fn redownload_time_help(redownload_after_minutes: &str) -> Option<String> {
    offset_from_publish(redownload_after_minutes).map(|o| o.label())
}

/// When an episode published at the assumed time is first downloaded.
pub fn download_delay_help(download_delay_minutes: &str) -> Option<String> {
    offset_from_publish(download_delay_minutes).map(|o| o.label())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn numeric_fields_must_be_plain_non_negative_integers() {
        assert_eq!(parse_non_negative(" 30 "), Some(30));
        assert_eq!(parse_non_negative("0"), Some(0));
        assert_eq!(parse_non_negative(""), None);
        assert_eq!(parse_non_negative("-5"), None);
        assert_eq!(parse_non_negative("+5"), None);
        assert_eq!(parse_non_negative("30abc"), None);
        assert_eq!(parse_non_negative("1.5"), None);
    }

    #[test]
    fn oldest_date_counts_back_across_months() {
        assert_eq!(
            oldest_date_help("30", date(2025, 3, 15)).as_deref(),
            Some("2025-02-13")
        );
        assert_eq!(
            oldest_date_help("0", date(2025, 3, 15)).as_deref(),
            Some("2025-03-15")
        );
        assert_eq!(oldest_date_help("", date(2025, 3, 15)), None);
        assert_eq!(oldest_date_help("abc", date(2025, 3, 15)), None);
    }

    #[test]
    fn absurd_day_counts_are_suppressed() {
        assert_eq!(oldest_date_help("99999999999", date(2025, 1, 1)), None);
    }

    #[test]
    fn redownload_time_same_day() {
        assert_eq!(redownload_time_help("0").as_deref(), Some("18:00"));
        assert_eq!(redownload_time_help("90").as_deref(), Some("19:30"));
        assert_eq!(redownload_time_help("359").as_deref(), Some("23:59"));
    }

    #[test]
    fn redownload_time_rolls_into_next_day() {
        assert_eq!(
            redownload_time_help("360").as_deref(),
            Some("00:00 (next day)")
        );
        assert_eq!(
            redownload_time_help("780").as_deref(),
            Some("07:00 (next day)")
        );
        let far = offset_from_publish("3000").unwrap();
        assert_eq!(far.days_later, 2);
        assert!(far.label().ends_with("(next day)"));
    }

    #[test]
    fn redownload_time_suppressed_for_bad_input() {
        assert_eq!(redownload_time_help(""), None);
        assert_eq!(redownload_time_help("soon"), None);
        assert_eq!(download_delay_help("-1"), None);
    }
}
