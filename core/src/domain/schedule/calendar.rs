//! Date arithmetic behind the scheduling views: local day and week windows,
//! expansion of recurring templates and the completion statistics.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};

use crate::domain::{
    schedule::entities::{
        DateWindow, DayOfWeek, ScheduledWorkout, WorkoutCompletion, WorkoutFavourite,
    },
    workout::entities::WorkoutType,
};

/// Number of weeks a recurring template is expanded into.
pub const RECURRENCE_WEEKS: i64 = 12;

/// Default look-back period of the completion statistics.
pub const DEFAULT_LOOKBACK_DAYS: i64 = 91;

fn local_midnight(date: NaiveDate, offset: FixedOffset) -> DateTime<Utc> {
    let local = date.and_time(NaiveTime::MIN);
    let utc = local - TimeDelta::seconds(i64::from(offset.local_minus_utc()));
    Utc.from_utc_datetime(&utc)
}

fn monday_of(date: NaiveDate) -> NaiveDate {
    date - TimeDelta::days(i64::from(date.weekday().num_days_from_monday()))
}

/// The calendar day containing `at`, in the offset `at` was expressed in.
pub fn day_window(at: DateTime<FixedOffset>) -> DateWindow {
    let date = at.date_naive();
    let start = local_midnight(date, *at.offset());
    let next = local_midnight(date + TimeDelta::days(1), *at.offset());

    DateWindow {
        start,
        end: next - TimeDelta::nanoseconds(1),
    }
}

/// The Monday-to-Sunday week containing `at`, in the offset `at` was
/// expressed in.
pub fn week_window(at: DateTime<FixedOffset>) -> DateWindow {
    let monday = monday_of(at.date_naive());
    let start = local_midnight(monday, *at.offset());
    let next = local_midnight(monday + TimeDelta::weeks(1), *at.offset());

    DateWindow {
        start,
        end: next - TimeDelta::nanoseconds(1),
    }
}

/// Expands a recurring template into concrete UTC instants.
///
/// The window opens on the Monday on or before `today` and closes
/// [`RECURRENCE_WEEKS`] weeks later, both ends included. Days are visited
/// Monday first and duplicates are ignored.
pub fn recurring_occurrences(
    days: &[DayOfWeek],
    time_of_day: NaiveTime,
    today: NaiveDate,
) -> Vec<DateTime<Utc>> {
    let start = monday_of(today);
    let end = start + TimeDelta::weeks(RECURRENCE_WEEKS);

    let mut distinct = days.to_vec();
    distinct.sort();
    distinct.dedup();

    let mut occurrences = Vec::new();
    for day in distinct {
        let mut date = start + TimeDelta::days(i64::from(day.num_days_from_monday()));
        while date <= end {
            occurrences.push(Utc.from_utc_datetime(&date.and_time(time_of_day)));
            date += TimeDelta::weeks(1);
        }
    }

    occurrences
}

pub fn completion_rate(workouts: &[ScheduledWorkout]) -> WorkoutCompletion {
    let complete = workouts.iter().filter(|w| w.completed).count() as u64;
    let incomplete = workouts.len() as u64 - complete;

    WorkoutCompletion {
        complete,
        incomplete,
        percentage: rounded_percentage(complete, complete + incomplete),
    }
}

/// Integer round-half-up of `part / total * 100`, 0 when `total` is 0.
fn rounded_percentage(part: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    let scaled = u128::from(part) * 200 + u128::from(total);
    (scaled / (2 * u128::from(total))) as u64
}

pub fn favourite_tally(workouts: &[ScheduledWorkout]) -> WorkoutFavourite {
    workouts
        .iter()
        .filter(|w| w.completed)
        .fold(WorkoutFavourite::default(), |mut tally, w| {
            match w.workout_type {
                WorkoutType::Strength => tally.strength += 1,
                WorkoutType::Cardio => tally.cardio += 1,
                WorkoutType::Mobility => tally.mobility += 1,
            }
            tally
        })
}
