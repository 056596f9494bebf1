use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// Number of calendar days covered by one availability grid.
pub const HORIZON_DAYS: i64 = 7;
/// First bookable start hour of a business day.
pub const FIRST_HOUR: u32 = 9;
/// Exclusive upper bound on start hours (last slot runs 16:00 - 17:00).
pub const LAST_HOUR: u32 = 17;
/// Probability that any given slot is offered as available.
pub const DEFAULT_AVAILABILITY: f64 = 0.7;

/// One bookable (date, hour) unit of counsellor availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeSlot {
    pub date: NaiveDate,
    pub start_hour: u32,
    pub available: bool,
}

impl TimeSlot {
    /// Hour-range label in the form the booking flow displays, e.g. "9:00 - 10:00".
    pub fn time_label(&self) -> String {
        format!("{}:00 - {}:00", self.start_hour, self.start_hour + 1)
    }
}

/// Source of availability decisions, injectable so tests are reproducible.
pub trait AvailabilitySampler {
    fn sample(&mut self) -> bool;
}

/// Production sampler: each slot is independently available with fixed
/// probability. Availability is not persisted anywhere, so two grids for the
/// same anchor will disagree.
#[derive(Debug, Clone, Copy)]
pub struct RandomAvailability {
    probability: f64,
}

impl RandomAvailability {
    pub fn new(probability: f64) -> Self {
        Self { probability }
    }
}

impl Default for RandomAvailability {
    fn default() -> Self {
        Self::new(DEFAULT_AVAILABILITY)
    }
}

impl AvailabilitySampler for RandomAvailability {
    fn sample(&mut self) -> bool {
        rand::thread_rng().gen_bool(self.probability)
    }
}

/// Seeded sampler for deterministic grids in tests and console demos.
#[derive(Debug, Clone)]
pub struct SeededAvailability {
    rng: StdRng,
    probability: f64,
}

impl SeededAvailability {
    pub fn new(seed: u64, probability: f64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            probability,
        }
    }
}

impl AvailabilitySampler for SeededAvailability {
    fn sample(&mut self) -> bool {
        self.rng.gen_bool(self.probability)
    }
}

fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Build the weekly availability grid: one slot per business hour for each
/// weekday in the seven days starting at `anchor`, ordered by date then hour.
pub fn availability_grid(anchor: NaiveDate, sampler: &mut impl AvailabilitySampler) -> Vec<TimeSlot> {
    let mut slots = Vec::new();
    for offset in 0..HORIZON_DAYS {
        let date = anchor + Duration::days(offset);
        if !is_weekday(date) {
            continue;
        }
        for start_hour in FIRST_HOUR..LAST_HOUR {
            slots.push(TimeSlot {
                date,
                start_hour,
                available: sampler.sample(),
            });
        }
    }
    slots
}

/// All slots for one calendar day, in ascending hour order.
#[derive(Debug, Clone, Serialize)]
pub struct DaySlots {
    pub date: NaiveDate,
    pub slots: Vec<TimeSlot>,
}

/// Partition a grid by date, preserving the generator's ordering.
pub fn group_by_date(slots: &[TimeSlot]) -> Vec<DaySlots> {
    let mut days: Vec<DaySlots> = Vec::new();
    for slot in slots {
        match days.last_mut() {
            Some(day) if day.date == slot.date => day.slots.push(*slot),
            _ => days.push(DaySlots {
                date: slot.date,
                slots: vec![*slot],
            }),
        }
    }
    days
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AllAvailable;

    impl AvailabilitySampler for AllAvailable {
        fn sample(&mut self) -> bool {
            true
        }
    }

    fn monday() -> NaiveDate {
        // 2026-03-02 is a Monday.
        NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date")
    }

    #[test]
    fn grid_covers_only_weekdays_in_the_horizon() {
        let slots = availability_grid(monday(), &mut AllAvailable);
        assert!(slots.iter().all(|slot| is_weekday(slot.date)));

        let days = group_by_date(&slots);
        assert_eq!(days.len(), 5, "Mon-Fri only for a Monday anchor");
        assert_eq!(days[0].date, monday());
        assert_eq!(days[4].date, monday() + Duration::days(4));
    }

    #[test]
    fn each_day_has_exactly_eight_hourly_slots() {
        let slots = availability_grid(monday(), &mut AllAvailable);
        for day in group_by_date(&slots) {
            let hours: Vec<u32> = day.slots.iter().map(|slot| slot.start_hour).collect();
            assert_eq!(hours, (9..17).collect::<Vec<u32>>());
        }
    }

    #[test]
    fn weekend_anchor_skips_to_the_following_week() {
        // 2026-03-07 is a Saturday; the horizon covers Sat..Fri.
        let saturday = NaiveDate::from_ymd_opt(2026, 3, 7).expect("valid date");
        let days = group_by_date(&availability_grid(saturday, &mut AllAvailable));
        assert_eq!(days.len(), 5);
        assert_eq!(days[0].date, saturday + Duration::days(2));
    }

    #[test]
    fn slots_are_ordered_by_date_then_hour() {
        let slots = availability_grid(monday(), &mut AllAvailable);
        for pair in slots.windows(2) {
            let ordered = (pair[0].date, pair[0].start_hour) < (pair[1].date, pair[1].start_hour);
            assert!(ordered, "{pair:?} out of order");
        }
    }

    #[test]
    fn seeded_sampler_reproduces_the_same_grid() {
        let first = availability_grid(monday(), &mut SeededAvailability::new(42, 0.7));
        let second = availability_grid(monday(), &mut SeededAvailability::new(42, 0.7));
        assert_eq!(first, second);
    }

    #[test]
    fn time_labels_span_one_hour() {
        let slot = TimeSlot {
            date: monday(),
            start_hour: 9,
            available: true,
        };
        assert_eq!(slot.time_label(), "9:00 - 10:00");
    }
}
