#[cfg(test)]
mod tests {
    use crate::availability::is_time_available;
    use crate::config::SchedulingConfig;
    use crate::slots::{format_display_time, generate_available_slots, Slot};
    use chrono::{NaiveDate, NaiveTime, TimeZone, Timelike, Utc};

    // A single hand-built slot so the distance to the preferred time is
    // fully under the test's control
    fn slot_at(hour: u32, minute: u32) -> Slot {
        let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap();
        Slot {
            time: format!("{:02}:{:02}", time.hour(), time.minute()),
            display_time: format_display_time(time),
            available: true,
            start: Utc.with_ymd_and_hms(2024, 6, 10, hour, minute, 0).unwrap(),
        }
    }

    fn preferred(hour: u32, minute: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 10, hour, minute, 0).unwrap()
    }

    #[test]
    fn test_exact_slot_time_is_available() {
        let slots = vec![slot_at(10, 0)];
        assert!(is_time_available(preferred(10, 0), &slots, 30));
    }

    #[test]
    fn test_off_grid_time_within_tolerance_is_available() {
        // Fuzzy match: 10:15 sits between grid points but within 30 minutes
        // of the 10:00 slot
        let slots = vec![slot_at(10, 0)];
        assert!(is_time_available(preferred(10, 15), &slots, 30));
    }

    #[test]
    fn test_exactly_tolerance_away_is_available() {
        // Boundary is inclusive: 30 minutes away still matches
        let slots = vec![slot_at(10, 0)];
        assert!(is_time_available(preferred(10, 30), &slots, 30));
        assert!(is_time_available(preferred(9, 30), &slots, 30));
    }

    #[test]
    fn test_one_minute_past_tolerance_is_not_available() {
        let slots = vec![slot_at(10, 0)];
        assert!(!is_time_available(preferred(10, 31), &slots, 30));
        assert!(!is_time_available(preferred(9, 29), &slots, 30));
    }

    #[test]
    fn test_no_slots_means_not_available() {
        assert!(!is_time_available(preferred(10, 0), &[], 30));
    }

    #[test]
    fn test_any_slot_within_tolerance_suffices() {
        let slots = vec![slot_at(9, 0), slot_at(14, 0)];
        assert!(is_time_available(preferred(14, 20), &slots, 30));
        assert!(!is_time_available(preferred(11, 30), &slots, 30));
    }

    #[test]
    fn test_generated_grid_makes_every_half_hour_reachable() {
        // With the full 30-minute grid no request between 09:00 and 17:00
        // can be further than 15 minutes from a slot
        let slots = generate_available_slots(
            NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            &[],
            30,
            "UTC",
            &SchedulingConfig::default(),
        )
        .unwrap();

        assert!(is_time_available(preferred(9, 7), &slots, 30));
        assert!(is_time_available(preferred(12, 44), &slots, 30));
        assert!(is_time_available(preferred(16, 59), &slots, 30));
    }

    #[test]
    fn test_zero_tolerance_requires_exact_match() {
        let slots = vec![slot_at(10, 0)];
        assert!(is_time_available(preferred(10, 0), &slots, 0));
        assert!(!is_time_available(preferred(10, 1), &slots, 0));
    }
}
