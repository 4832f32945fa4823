use chrono::{Datelike, Duration, NaiveDate};

/// Day of week with Sunday as 0 and Saturday as 6, the numbering delivery
/// rules are written in.
pub fn day_of_week(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Monday of the week containing `date`.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Seven consecutive days starting at `start`.
pub fn week_dates(start: NaiveDate) -> [NaiveDate; 7] {
    std::array::from_fn(|i| start + Duration::days(i as i64))
}

/// Parses the `YYYY-MM-DD` form dates are stored and typed in.
pub fn parse_date(value: &str) -> crate::Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_of_week_sunday_is_zero() {
        let sunday = NaiveDate::from_ymd_opt(2025, 10, 19).unwrap();
        let monday = NaiveDate::from_ymd_opt(2025, 10, 20).unwrap();
        let saturday = NaiveDate::from_ymd_opt(2025, 10, 25).unwrap();

        assert_eq!(day_of_week(sunday), 0);
        assert_eq!(day_of_week(monday), 1);
        assert_eq!(day_of_week(saturday), 6);
    }

    #[test]
    fn test_start_of_week_is_monday() {
        let thursday = NaiveDate::from_ymd_opt(2025, 10, 23).unwrap();
        let sunday = NaiveDate::from_ymd_opt(2025, 10, 26).unwrap();
        let monday = NaiveDate::from_ymd_opt(2025, 10, 20).unwrap();

        assert_eq!(start_of_week(thursday), monday);
        assert_eq!(start_of_week(sunday), monday, "Sunday closes the week");
        assert_eq!(start_of_week(monday), monday);
    }

    #[test]
    fn test_week_dates_consecutive() {
        let monday = NaiveDate::from_ymd_opt(2025, 12, 29).unwrap();
        let dates = week_dates(monday);

        assert_eq!(dates[0], monday);
        assert_eq!(dates[6], NaiveDate::from_ymd_opt(2026, 1, 4).unwrap());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date(" 2025-10-20 ").unwrap(),
            NaiveDate::from_ymd_opt(2025, 10, 20).unwrap()
        );
        assert!(parse_date("20/10/2025").is_err());
    }
}
