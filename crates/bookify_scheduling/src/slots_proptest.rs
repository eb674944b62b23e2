#[cfg(test)]
mod tests {
    use crate::availability::is_time_available;
    use crate::config::SchedulingConfig;
    use crate::slots::{generate_available_slots, BusyInterval};
    use crate::suggestions::suggest_alternatives;
    use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
    use proptest::prelude::*;

    // All generated inputs live on this fixed day to keep cases deterministic
    fn base_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    fn day_start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 10, 0, 0, 0).unwrap()
    }

    // Helper function to build busy intervals from (offset, length) minute pairs
    fn build_busy(raw: &[(i64, i64)]) -> Vec<BusyInterval> {
        raw.iter()
            .map(|&(offset_minutes, length_minutes)| {
                let start = day_start() + Duration::minutes(offset_minutes);
                BusyInterval::new(start, start + Duration::minutes(length_minutes.max(1)))
            })
            .collect()
    }

    proptest! {
        // No emitted slot may overlap any busy interval
        #[test]
        fn test_no_slot_overlaps_busy_intervals(
            raw_busy in prop::collection::vec((0i64..24 * 60, 1i64..240), 0..8),
            duration_minutes in 15i64..120,
        ) {
            let busy = build_busy(&raw_busy);
            let slots = generate_available_slots(
                base_day(),
                &busy,
                duration_minutes,
                "UTC",
                &SchedulingConfig::default(),
            ).unwrap();

            for slot in &slots {
                let end = slot.start + Duration::minutes(duration_minutes);
                for interval in &busy {
                    prop_assert!(
                        !interval.overlaps(slot.start, end),
                        "Slot {} to {} overlaps busy interval {} to {}",
                        slot.start, end, interval.start, interval.end
                    );
                }
            }
        }

        // The grid never leaves the working window and stays chronological
        #[test]
        fn test_slots_stay_on_grid_and_ordered(
            raw_busy in prop::collection::vec((0i64..24 * 60, 1i64..240), 0..8),
            duration_minutes in 15i64..120,
        ) {
            let busy = build_busy(&raw_busy);
            let config = SchedulingConfig::default();
            let slots = generate_available_slots(
                base_day(),
                &busy,
                duration_minutes,
                "UTC",
                &config,
            ).unwrap();

            prop_assert!(slots.len() <= 16, "never more than the full grid");

            for pair in slots.windows(2) {
                prop_assert!(pair[0].start < pair[1].start,
                    "slots must be strictly chronological");
            }

            for slot in &slots {
                let local = slot.start.time();
                prop_assert!(local >= config.work_start && local < config.work_end,
                    "slot {} outside the working window", slot.time);
                prop_assert_eq!(
                    slot.start.timestamp() % (30 * 60),
                    0,
                    "slot must sit on a 30-minute boundary"
                );
            }
        }

        // Generation is a pure function of its inputs
        #[test]
        fn test_generation_is_idempotent(
            raw_busy in prop::collection::vec((0i64..24 * 60, 1i64..240), 0..8),
            duration_minutes in 15i64..120,
        ) {
            let busy = build_busy(&raw_busy);
            let config = SchedulingConfig::default();
            let first = generate_available_slots(
                base_day(), &busy, duration_minutes, "UTC", &config,
            ).unwrap();
            let second = generate_available_slots(
                base_day(), &busy, duration_minutes, "UTC", &config,
            ).unwrap();
            prop_assert_eq!(first, second);
        }

        // Every slot start reported available must satisfy the fuzzy check
        // for itself, and suggestions never exceed four entries
        #[test]
        fn test_checker_and_ranker_agree_with_generator(
            raw_busy in prop::collection::vec((0i64..24 * 60, 1i64..240), 0..8),
            preferred_minutes in (9 * 60i64)..(17 * 60),
        ) {
            let busy = build_busy(&raw_busy);
            let slots = generate_available_slots(
                base_day(),
                &busy,
                30,
                "UTC",
                &SchedulingConfig::default(),
            ).unwrap();

            for slot in &slots {
                prop_assert!(is_time_available(slot.start, &slots, 30));
            }

            let preferred = day_start() + Duration::minutes(preferred_minutes);
            let suggestions = suggest_alternatives(base_day(), preferred, &slots);

            prop_assert!(suggestions.len() <= 4);
            let ranked: Vec<u8> = suggestions
                .iter()
                .filter(|s| s.alternative_day.is_none())
                .map(|s| s.priority)
                .collect();
            for (index, priority) in ranked.iter().enumerate() {
                prop_assert_eq!(*priority as usize, index + 1,
                    "top suggestions must be densely ranked from 1");
            }
            if slots.len() < 3 {
                let last = suggestions.last().unwrap();
                prop_assert_eq!(last.priority, 4);
                prop_assert_eq!(last.alternative_day, Some(true));
            }
        }
    }
}
