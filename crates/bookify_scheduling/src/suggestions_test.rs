#[cfg(test)]
mod tests {
    use crate::slots::{format_display_time, Slot};
    use crate::suggestions::suggest_alternatives;
    use chrono::{NaiveDate, NaiveTime, TimeZone, Timelike, Utc};

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

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    #[test]
    fn test_suggestions_ranked_by_distance() {
        // Test case: preferred 10:15 against 09:00 / 10:00 / 14:00, i.e.
        // distances 75 / 15 / 225 minutes
        let slots = vec![slot_at(9, 0), slot_at(10, 0), slot_at(14, 0)];
        let suggestions = suggest_alternatives(day(), preferred(10, 15), &slots);

        assert_eq!(suggestions.len(), 3);
        assert_eq!(suggestions[0].time, "10:00");
        assert_eq!(suggestions[0].priority, 1);
        assert_eq!(suggestions[1].time, "09:00");
        assert_eq!(suggestions[1].priority, 2);
        assert_eq!(suggestions[2].time, "14:00");
        assert_eq!(suggestions[2].priority, 3);
        assert!(suggestions.iter().all(|s| s.alternative_day.is_none()));
    }

    #[test]
    fn test_minute_wording_under_an_hour() {
        let slots = vec![slot_at(10, 0), slot_at(11, 0), slot_at(12, 0)];
        let suggestions = suggest_alternatives(day(), preferred(10, 15), &slots);
        assert_eq!(
            suggestions[0].message,
            "How about 10:00 AM? (15 minutes earlier)"
        );
        assert_eq!(
            suggestions[1].message,
            "How about 11:00 AM? (45 minutes later)"
        );
    }

    #[test]
    fn test_hour_wording_with_rounding_and_plural() {
        // 60 minutes reads "1 hour", 150 rounds half-up to "3 hours"; a
        // zero-distance tie reads "earlier"
        let slots = vec![slot_at(9, 0), slot_at(10, 0), slot_at(11, 30)];
        let suggestions = suggest_alternatives(day(), preferred(9, 0), &slots);

        assert_eq!(
            suggestions[0].message,
            "How about 9:00 AM? (0 minutes earlier)"
        );
        assert_eq!(suggestions[1].message, "How about 10:00 AM? (1 hour later)");
        assert_eq!(
            suggestions[2].message,
            "How about 11:30 AM? (3 hours later)"
        );
    }

    #[test]
    fn test_direction_wording_later_and_earlier() {
        // +45 minutes reads later, -45 minutes reads earlier
        let later = vec![slot_at(10, 45), slot_at(12, 0), slot_at(13, 0)];
        let earlier = vec![slot_at(6, 0), slot_at(7, 0), slot_at(9, 15)];

        let plus = suggest_alternatives(day(), preferred(10, 0), &later);
        assert!(plus[0].message.contains("(45 minutes later)"));

        let minus = suggest_alternatives(day(), preferred(10, 0), &earlier);
        assert!(minus[0].message.contains("(45 minutes earlier)"));
    }

    #[test]
    fn test_tie_keeps_chronological_order() {
        // 09:00 and 10:00 are both 30 minutes from 09:30; the earlier slot
        // must win the tie
        let slots = vec![slot_at(9, 0), slot_at(10, 0), slot_at(11, 0)];
        let suggestions = suggest_alternatives(day(), preferred(9, 30), &slots);
        assert_eq!(suggestions[0].time, "09:00");
        assert_eq!(suggestions[1].time, "10:00");
    }

    #[test]
    fn test_scarce_supply_appends_tomorrow_fallback() {
        // Test case: fewer than three available slots -> min(n, 3) + 1
        // entries, the extra one at priority 4 pointing at tomorrow
        let slots = vec![slot_at(9, 0), slot_at(16, 30)];
        let suggestions = suggest_alternatives(day(), preferred(12, 0), &slots);

        assert_eq!(suggestions.len(), 3);
        let fallback = suggestions.last().unwrap();
        assert_eq!(fallback.priority, 4);
        assert_eq!(fallback.time, "09:00");
        assert_eq!(fallback.display_time, "9:00 AM");
        assert_eq!(fallback.alternative_day, Some(true));
        assert_eq!(
            fallback.message,
            "We have more availability tomorrow (6/11/2024). Would you like to book for tomorrow?"
        );
    }

    #[test]
    fn test_empty_slot_list_still_yields_fallback() {
        let suggestions = suggest_alternatives(day(), preferred(12, 0), &[]);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].priority, 4);
        assert_eq!(suggestions[0].alternative_day, Some(true));
    }

    #[test]
    fn test_exactly_three_slots_get_no_fallback() {
        let slots = vec![slot_at(9, 0), slot_at(10, 0), slot_at(11, 0)];
        let suggestions = suggest_alternatives(day(), preferred(10, 0), &slots);
        assert_eq!(suggestions.len(), 3);
        assert!(suggestions.iter().all(|s| s.priority <= 3));
    }

    #[test]
    fn test_fallback_date_rolls_over_month_end() {
        // Tomorrow of 2024-06-30 is 7/1/2024
        let slots = vec![slot_at(9, 0)];
        let suggestions = suggest_alternatives(
            NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
            preferred(12, 0),
            &slots,
        );
        let fallback = suggestions.last().unwrap();
        assert!(fallback.message.contains("(7/1/2024)"));
    }

    #[test]
    fn test_serialized_shape_is_camel_case_and_omits_empty_day_flag() {
        let slots = vec![slot_at(10, 0), slot_at(11, 0), slot_at(12, 0)];
        let suggestions = suggest_alternatives(day(), preferred(10, 15), &slots);
        let json = serde_json::to_value(&suggestions[0]).unwrap();

        assert_eq!(json["displayTime"], "10:00 AM");
        assert_eq!(json["priority"], 1);
        assert!(json.get("alternativeDay").is_none());
    }
}
