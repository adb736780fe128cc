//! Working-day time block generation.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::classify::EnergyLevel;
use crate::profile::CognitiveProfile;

pub const WORK_DAY_START_HOUR: u32 = 8;
pub const WORK_DAY_END_HOUR: u32 = 18;
pub const BLOCK_MINUTES: i64 = 30;

/// An existing calendar event blocking part of the day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// A fixed-size slot within the scheduling day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBlock {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub energy_level: EnergyLevel,
    pub available: bool,
}

/// Generate 30-minute blocks spanning the working day (08:00 up to but not
/// including 18:00, so the last block starts at 17:30).
///
/// Energy per block comes from the supplied profile, or the default curve
/// when absent. Blocks whose [start, end) interval overlaps an existing
/// event are marked unavailable.
pub fn generate_time_blocks(
    date: NaiveDate,
    profile: Option<&CognitiveProfile>,
    existing_events: &[CalendarEvent],
) -> Vec<TimeBlock> {
    let default_profile;
    let profile = match profile {
        Some(p) => p,
        None => {
            default_profile = CognitiveProfile::default();
            &default_profile
        }
    };

    let day_start = NaiveTime::from_hms_opt(WORK_DAY_START_HOUR, 0, 0).unwrap_or(NaiveTime::MIN);
    let day_end = NaiveTime::from_hms_opt(WORK_DAY_END_HOUR, 0, 0).unwrap_or(NaiveTime::MIN);

    let mut blocks = Vec::new();
    let mut start = date.and_time(day_start);
    let end_of_window = date.and_time(day_end);

    while start < end_of_window {
        let end = start + Duration::minutes(BLOCK_MINUTES);
        let overlaps = existing_events
            .iter()
            .any(|e| e.start < end && start < e.end);

        blocks.push(TimeBlock {
            start_time: start,
            end_time: end,
            energy_level: profile.energy_for_hour(start.hour()),
            available: !overlaps,
        });
        start = end;
    }

    blocks
}
