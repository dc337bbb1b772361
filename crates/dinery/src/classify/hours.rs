use chrono::{NaiveTime, Timelike};

/// Local wall-clock time with no date or timezone.
pub type TimeOfDay = NaiveTime;

/// Parse `HH:MM`, also accepting the `HH:MM:SS` form databases render for `TIME` columns.
#[must_use]
pub fn parse_time_of_day(text: &str) -> Option<TimeOfDay> {
    let text = text.trim();
    NaiveTime::parse_from_str(text, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M:%S"))
        .ok()
}

#[must_use]
pub fn minutes_since_midnight(time: TimeOfDay) -> u32 {
    time.hour() * 60 + time.minute()
}

const END_OF_DAY: u32 = 24 * 60;

/// Listed hour as minutes since midnight. `24:00` is the end of the day.
fn listed_minutes(text: &str) -> Option<u32> {
    match text.trim() {
        "24:00" | "24:00:00" => Some(END_OF_DAY),
        other => parse_time_of_day(other).map(minutes_since_midnight),
    }
}

/// Whether a listing counts as open at `now`.
///
/// A status flag of `0` always means closed. Otherwise the listing is open when
/// `open <= now <= close` at minute resolution, inclusive at both ends.
///
/// A closing time of `24:00` means open until midnight. Hours that wrap past
/// midnight (close earlier than open) are not handled and evaluate as closed.
/// Unparseable times also evaluate as closed.
#[must_use]
pub fn is_open_now(open_time: &str, close_time: &str, status_flag: i64, now: TimeOfDay) -> bool {
    if status_flag == 0 {
        return false;
    }
    let (Some(open), Some(close)) = (listed_minutes(open_time), listed_minutes(close_time)) else {
        return false;
    };

    let now = minutes_since_midnight(now);
    open <= now && now <= close
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> TimeOfDay {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_within_hours() {
        assert!(is_open_now("09:00", "17:00", 1, at(12, 0)));
        assert!(!is_open_now("09:00", "17:00", 1, at(8, 59)));
        assert!(!is_open_now("09:00", "17:00", 1, at(17, 1)));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(is_open_now("09:00", "17:00", 1, at(9, 0)));
        assert!(is_open_now("09:00", "17:00", 1, at(17, 0)));
        // Seconds are ignored.
        let late = NaiveTime::from_hms_opt(17, 0, 59).unwrap();
        assert!(is_open_now("09:00", "17:00", 1, late));
    }

    #[test]
    fn test_status_flag_overrides_hours() {
        assert!(!is_open_now("09:00", "17:00", 0, at(12, 0)));
        assert!(!is_open_now("00:00", "23:59", 0, at(12, 0)));
        // Any non-zero flag defers to the clock.
        assert!(is_open_now("09:00", "17:00", 2, at(12, 0)));
    }

    #[test]
    fn test_closing_at_midnight() {
        assert!(is_open_now("17:00", "24:00", 1, at(23, 30)));
        assert!(is_open_now("17:00", "24:00", 1, at(23, 59)));
        assert!(!is_open_now("17:00", "24:00", 1, at(16, 59)));
        assert!(!is_open_now("24:00", "23:00", 1, at(12, 0)));
    }

    #[test]
    fn test_overnight_hours_read_closed() {
        assert!(!is_open_now("22:00", "02:00", 1, at(23, 0)));
        assert!(!is_open_now("22:00", "02:00", 1, at(1, 0)));
    }

    #[test]
    fn test_database_time_format() {
        assert!(is_open_now("09:00:00", "17:00:00", 1, at(12, 30)));
        assert_eq!(parse_time_of_day(" 07:45 "), Some(at(7, 45)));
    }

    #[test]
    fn test_unparseable_times_read_closed() {
        assert!(!is_open_now("", "17:00", 1, at(12, 0)));
        assert!(!is_open_now("9am", "5pm", 1, at(12, 0)));
        assert!(!is_open_now("25:00", "26:00", 1, at(12, 0)));
    }

    #[test]
    fn test_minutes_since_midnight() {
        assert_eq!(minutes_since_midnight(at(0, 0)), 0);
        assert_eq!(minutes_since_midnight(at(13, 5)), 785);
        assert_eq!(minutes_since_midnight(at(23, 59)), 1439);
    }
}
