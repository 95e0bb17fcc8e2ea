use chrono::{DateTime, FixedOffset, Local, Utc};

/// Value format of `<input type="datetime-local">`, at second precision.
const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Wall-clock time of `instant` at `offset`, formatted for a `datetime-local` input.
pub fn datetime_input_value(instant: DateTime<Utc>, offset: FixedOffset) -> String {
    instant.with_timezone(&offset).format(INPUT_FORMAT).to_string()
}

/// Same as [`datetime_input_value`] using the host's local zone.
pub fn local_datetime_input_value(instant: DateTime<Utc>) -> String {
    instant.with_timezone(&Local).format(INPUT_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_utc_offset() {
        let instant = Utc.with_ymd_and_hms(2024, 3, 9, 17, 5, 42).unwrap();
        let utc = FixedOffset::east_opt(0).unwrap();
        assert_eq!(datetime_input_value(instant, utc), "2024-03-09T17:05:42");
    }

    #[test]
    fn test_positive_offset_rolls_date_forward() {
        let instant = Utc.with_ymd_and_hms(2024, 12, 31, 22, 30, 0).unwrap();
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(datetime_input_value(instant, plus_two), "2025-01-01T00:30:00");
    }

    #[test]
    fn test_negative_offset_and_fraction_dropped() {
        let instant = Utc
            .with_ymd_and_hms(2024, 6, 1, 3, 0, 0)
            .unwrap()
            .checked_add_signed(chrono::Duration::milliseconds(999))
            .unwrap();
        let minus_five = FixedOffset::west_opt(5 * 3600).unwrap();
        let value = datetime_input_value(instant, minus_five);
        assert_eq!(value, "2024-05-31T22:00:00");
        assert_eq!(value.len(), 19);
    }

    #[test]
    fn test_local_has_input_shape() {
        let value = local_datetime_input_value(Utc::now());
        assert_eq!(value.len(), 19);
        assert_eq!(&value[10..11], "T");
    }
}
