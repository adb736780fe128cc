//! Cognitive profile: chronotype presets and the hour-of-day to energy-level
//! mapping the block generator consults.

use serde::{Deserialize, Serialize};

use crate::classify::EnergyLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Chronotype {
    EarlyBird,
    Intermediate,
    NightOwl,
}

/// User-level scheduling configuration. Supplied by the caller; the core
/// never derives it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CognitiveProfile {
    pub chronotype: Chronotype,
    /// Minutes per focus session.
    pub focus_session_duration: u32,
    /// Minutes per break.
    pub break_duration: u32,
    /// Minutes lost per context switch.
    pub context_switching_cost: u32,
    pub peak_hours: Vec<u32>,
    pub productive_hours: Vec<u32>,
    pub low_energy_hours: Vec<u32>,
}

impl Default for CognitiveProfile {
    fn default() -> Self {
        Self::for_chronotype(Chronotype::Intermediate)
    }
}

impl CognitiveProfile {
    /// Preset energy curves per chronotype, shifted earlier or later in the
    /// working day.
    pub fn for_chronotype(chronotype: Chronotype) -> Self {
        let (peak, productive, low) = match chronotype {
            Chronotype::EarlyBird => (vec![8, 9, 10], vec![7, 11, 12, 13], vec![15, 16, 17]),
            Chronotype::Intermediate => (vec![9, 10, 11], vec![8, 14, 15, 16], vec![12, 13, 17]),
            Chronotype::NightOwl => (vec![15, 16, 17], vec![13, 14, 18, 19], vec![8, 9, 10]),
        };
        Self {
            chronotype,
            focus_session_duration: 25,
            break_duration: 5,
            context_switching_cost: 10,
            peak_hours: peak,
            productive_hours: productive,
            low_energy_hours: low,
        }
    }

    /// Energy level for a given hour of day. Hours outside all configured
    /// sets default to medium.
    pub fn energy_for_hour(&self, hour: u32) -> EnergyLevel {
        if self.peak_hours.contains(&hour) {
            EnergyLevel::High
        } else if self.low_energy_hours.contains(&hour) {
            EnergyLevel::Low
        } else {
            EnergyLevel::Medium
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_curve() {
        let profile = CognitiveProfile::default();
        assert_eq!(profile.chronotype, Chronotype::Intermediate);
        assert_eq!(profile.energy_for_hour(9), EnergyLevel::High);
        assert_eq!(profile.energy_for_hour(13), EnergyLevel::Low);
        assert_eq!(profile.energy_for_hour(15), EnergyLevel::Medium);
        // Outside every configured set.
        assert_eq!(profile.energy_for_hour(20), EnergyLevel::Medium);
    }

    #[test]
    fn test_chronotype_shifts_peak() {
        let early = CognitiveProfile::for_chronotype(Chronotype::EarlyBird);
        assert_eq!(early.energy_for_hour(8), EnergyLevel::High);
        assert_eq!(early.energy_for_hour(16), EnergyLevel::Low);

        let owl = CognitiveProfile::for_chronotype(Chronotype::NightOwl);
        assert_eq!(owl.energy_for_hour(8), EnergyLevel::Low);
        assert_eq!(owl.energy_for_hour(16), EnergyLevel::High);
    }

    #[test]
    fn test_chronotype_serializes_kebab_case() {
        let json = serde_json::to_value(Chronotype::EarlyBird).unwrap();
        assert_eq!(json, "early-bird");
        let json = serde_json::to_value(Chronotype::NightOwl).unwrap();
        assert_eq!(json, "night-owl");
    }
}
