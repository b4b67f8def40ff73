/// Render whole seconds as `HH:MM:SS`.
///
/// Every field is zero-padded to two digits. The hour field is not wrapped or
/// truncated, so totals of 100 hours and more widen it (`100:00:00`).
pub fn format_time(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "00:00:00")]
    #[case(59, "00:00:59")]
    #[case(61, "00:01:01")]
    #[case(3599, "00:59:59")]
    #[case(3661, "01:01:01")]
    #[case(86_399, "23:59:59")]
    #[case(359_999, "99:59:59")]
    fn formats_seconds(#[case] seconds: u64, #[case] expected: &str) {
        assert_eq!(format_time(seconds), expected);
    }

    #[test]
    fn widens_hour_field_past_ninety_nine() {
        assert_eq!(format_time(360_000), "100:00:00");
        assert_eq!(format_time(1_000 * 3600 + 61), "1000:01:01");
    }
}
