//! Calendar placement of a week's workouts.
//!
//! Workouts are spread evenly over a 7-day window by a purely
//! combinatorial rule, so the same inputs always give the same days.

use crate::{WeekProgram, Workout};
use chrono::{Days, NaiveDate};

/// Days in a scheduling window
pub const WINDOW_DAYS: usize = 7;

/// Day offsets (0..=6) for `sessions` workouts in a 7-day window
///
/// Offsets are `round(i * 7 / sessions)` capped at 6, deduplicated and
/// sorted. When rounding collapses two sessions onto one day, the largest
/// gap between neighbouring offsets is split until the count is met or no
/// new day can be added.
pub fn day_offsets(sessions: usize) -> Vec<u32> {
    match sessions {
        0 => return Vec::new(),
        1 => return vec![0],
        n if n >= WINDOW_DAYS => return (0..WINDOW_DAYS as u32).collect(),
        _ => {}
    }

    let spacing = WINDOW_DAYS as f64 / sessions as f64;
    let mut offsets: Vec<u32> = (0..sessions)
        .map(|i| ((i as f64 * spacing).round() as u32).min(WINDOW_DAYS as u32 - 1))
        .collect();
    offsets.sort_unstable();
    offsets.dedup();

    while offsets.len() < sessions && offsets.len() < WINDOW_DAYS {
        let Some((lower, gap)) = offsets
            .windows(2)
            .map(|pair| (pair[0], pair[1] - pair[0]))
            .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))
        else {
            break;
        };

        let candidate = lower + gap / 2;
        if offsets.contains(&candidate) || candidate >= WINDOW_DAYS as u32 {
            tracing::debug!("No room to split gap after day {}, stopping", lower);
            break;
        }
        offsets.push(candidate);
        offsets.sort_unstable();
    }

    offsets
}

/// Assign `scheduled_date` to the first `min(len, sessions_per_week)` workouts
///
/// Workouts beyond the available offsets keep `scheduled_date = None`.
pub fn distribute(
    mut workouts: Vec<Workout>,
    sessions_per_week: u32,
    start: NaiveDate,
) -> Vec<Workout> {
    let to_schedule = workouts.len().min(sessions_per_week as usize);
    let offsets = day_offsets(to_schedule);

    for (workout, offset) in workouts.iter_mut().zip(&offsets) {
        workout.scheduled_date = start.checked_add_days(Days::new(u64::from(*offset)));
    }

    tracing::info!(
        "Scheduled {} workouts from {} at offsets {:?}",
        offsets.len(),
        start,
        offsets
    );
    workouts
}

/// First day a new week may start on
///
/// An explicit start date wins. Otherwise the day after the latest
/// scheduled workout across `existing`, unless that is before `today` or
/// nothing is scheduled, in which case `today`.
pub fn effective_start_date(
    explicit: Option<NaiveDate>,
    existing: &[WeekProgram],
    today: NaiveDate,
) -> NaiveDate {
    if let Some(date) = explicit {
        return date;
    }

    existing
        .iter()
        .filter_map(WeekProgram::last_scheduled_date)
        .max()
        .and_then(|last| last.succ_opt())
        .filter(|next| *next >= today)
        .unwrap_or(today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DayFocus, DifficultyTier, ProgramSource};
    use chrono::{Datelike, Utc, Weekday};
    use std::collections::HashSet;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn workout(day: u32, scheduled: Option<NaiveDate>) -> Workout {
        Workout {
            id: Uuid::new_v4(),
            title: DayFocus::FullBody.title_key().into(),
            focus: DayFocus::FullBody,
            week: 1,
            day,
            exercises: vec![],
            duration_minutes: 5,
            difficulty: DifficultyTier::Beginner,
            scheduled_date: scheduled,
            is_completed: false,
            is_challenge: false,
        }
    }

    fn program(dates: &[NaiveDate]) -> WeekProgram {
        WeekProgram {
            id: Uuid::new_v4(),
            week: 1,
            workouts: dates
                .iter()
                .enumerate()
                .map(|(i, d)| workout(i as u32 + 1, Some(*d)))
                .collect(),
            generated_at: Utc::now(),
            source: ProgramSource::Local,
        }
    }

    #[test]
    fn test_four_sessions() {
        assert_eq!(day_offsets(4), vec![0, 2, 4, 5]);
    }

    #[test]
    fn test_seven_and_one_sessions() {
        assert_eq!(day_offsets(7), vec![0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(day_offsets(1), vec![0]);
        assert!(day_offsets(0).is_empty());
    }

    #[test]
    fn test_other_counts() {
        assert_eq!(day_offsets(2), vec![0, 4]);
        assert_eq!(day_offsets(3), vec![0, 2, 5]);
        assert_eq!(day_offsets(5), vec![0, 1, 3, 4, 6]);
        assert_eq!(day_offsets(6), vec![0, 1, 2, 4, 5, 6]);
    }

    #[test]
    fn test_offsets_distinct_and_in_window() {
        for n in 0..=9 {
            let offsets = day_offsets(n);
            let unique: HashSet<_> = offsets.iter().collect();
            assert_eq!(unique.len(), offsets.len());
            assert!(offsets.iter().all(|o| *o <= 6));
            assert_eq!(offsets.len(), n.min(WINDOW_DAYS));
        }
    }

    #[test]
    fn test_deterministic() {
        for n in 1..=7 {
            assert_eq!(day_offsets(n), day_offsets(n));
        }
    }

    #[test]
    fn test_distribute_from_monday() {
        let monday = date(2026, 10, 19);
        assert_eq!(monday.weekday(), Weekday::Mon);

        let workouts = (1..=4).map(|d| workout(d, None)).collect();
        let scheduled = distribute(workouts, 4, monday);

        let days: Vec<_> = scheduled
            .iter()
            .map(|w| w.scheduled_date.unwrap().weekday())
            .collect();
        assert_eq!(days, vec![Weekday::Mon, Weekday::Wed, Weekday::Fri, Weekday::Sat]);
    }

    #[test]
    fn test_distribute_caps_at_sessions_per_week() {
        let start = date(2026, 1, 1);
        let workouts = (1..=5).map(|d| workout(d, None)).collect();
        let scheduled = distribute(workouts, 3, start);

        assert_eq!(scheduled.iter().filter(|w| w.scheduled_date.is_some()).count(), 3);
        assert!(scheduled[3].scheduled_date.is_none());
        assert!(scheduled[4].scheduled_date.is_none());
    }

    #[test]
    fn test_explicit_start_wins() {
        let explicit = date(2026, 3, 2);
        let existing = vec![program(&[date(2026, 5, 1)])];
        assert_eq!(
            effective_start_date(Some(explicit), &existing, date(2026, 1, 1)),
            explicit
        );
    }

    #[test]
    fn test_start_after_latest_existing() {
        let today = date(2026, 10, 19);
        let existing = vec![
            program(&[date(2026, 10, 19), date(2026, 10, 24)]),
            program(&[date(2026, 10, 26), date(2026, 10, 28)]),
        ];
        assert_eq!(effective_start_date(None, &existing, today), date(2026, 10, 29));
    }

    #[test]
    fn test_stale_programs_start_today() {
        let today = date(2026, 10, 19);
        let existing = vec![program(&[date(2026, 9, 1)])];
        assert_eq!(effective_start_date(None, &existing, today), today);
        assert_eq!(effective_start_date(None, &[], today), today);
    }

    #[test]
    fn test_program_ending_yesterday_starts_today() {
        let today = date(2026, 10, 19);
        let existing = vec![program(&[date(2026, 10, 18)])];
        assert_eq!(effective_start_date(None, &existing, today), today);
    }
}
