/// Bucketed relative age for a unix timestamp, computed once at extraction
/// time: "just now" under a minute, then minutes, hours, days.
pub fn relative_age(created_utc: i64, now_utc: i64) -> String {
    let diff = now_utc.saturating_sub(created_utc);
    if diff < 60 {
        "just now".to_string()
    } else if diff < 3_600 {
        format!("{}m ago", diff / 60)
    } else if diff < 86_400 {
        format!("{}h ago", diff / 3_600)
    } else {
        format!("{}d ago", diff / 86_400)
    }
}

#[cfg(test)]
mod tests {
    use super::relative_age;

    const NOW: i64 = 1_700_000_000;

    #[test]
    fn under_a_minute_is_just_now() {
        assert_eq!(relative_age(NOW, NOW), "just now");
        assert_eq!(relative_age(NOW - 59, NOW), "just now");
    }

    #[test]
    fn minutes_bucket() {
        assert_eq!(relative_age(NOW - 60, NOW), "1m ago");
        assert_eq!(relative_age(NOW - 3_599, NOW), "59m ago");
    }

    #[test]
    fn hours_bucket() {
        assert_eq!(relative_age(NOW - 3_600, NOW), "1h ago");
        assert_eq!(relative_age(NOW - 86_399, NOW), "23h ago");
    }

    #[test]
    fn days_bucket() {
        assert_eq!(relative_age(NOW - 86_400, NOW), "1d ago");
        assert_eq!(relative_age(NOW - 86_400 * 30, NOW), "30d ago");
    }

    #[test]
    fn future_timestamp_clamps_to_just_now() {
        assert_eq!(relative_age(NOW + 500, NOW), "just now");
    }
}
