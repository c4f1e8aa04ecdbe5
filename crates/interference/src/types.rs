//! Grant, protection constraint and incumbent records

use crate::constants::*;
use crate::{InterferenceError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Half-open frequency range in Hz with `low < high`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFrequencyRange", rename_all = "camelCase")]
pub struct FrequencyRange {
    low_frequency: f64,
    high_frequency: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFrequencyRange {
    low_frequency: f64,
    high_frequency: f64,
}

impl TryFrom<RawFrequencyRange> for FrequencyRange {
    type Error = InterferenceError;

    fn try_from(raw: RawFrequencyRange) -> Result<Self> {
        Self::new(raw.low_frequency, raw.high_frequency)
    }
}

impl FrequencyRange {
    pub fn new(low_hz: f64, high_hz: f64) -> Result<Self> {
        // NaN fails the comparison as well
        if !(low_hz < high_hz) {
            return Err(InterferenceError::InvalidFrequencyRange {
                low: low_hz,
                high: high_hz,
            });
        }
        Ok(Self {
            low_frequency: low_hz,
            high_frequency: high_hz,
        })
    }

    pub fn low(&self) -> f64 {
        self.low_frequency
    }

    pub fn high(&self) -> f64 {
        self.high_frequency
    }

    pub fn bandwidth(&self) -> f64 {
        self.high_frequency - self.low_frequency
    }

    /// Overlapping bandwidth in Hz; zero or negative when disjoint.
    pub fn overlap(&self, other: &FrequencyRange) -> f64 {
        self.high_frequency.min(other.high_frequency) - self.low_frequency.max(other.low_frequency)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CbsdCategory {
    A,
    B,
}

impl FromStr for CbsdCategory {
    type Err = InterferenceError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "A" => Ok(CbsdCategory::A),
            "B" => Ok(CbsdCategory::B),
            other => Err(InterferenceError::UnknownCategory(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProtectedEntityType {
    GwpzArea,
    PpaArea,
    FssCoChannel,
    FssBlocking,
    Esc,
}

impl ProtectedEntityType {
    /// Neighborhood distances in km as (category A, category B)
    pub fn neighborhood_distances_km(&self) -> (f64, f64) {
        match self {
            Self::GwpzArea => (GWPZ_NEIGHBORHOOD_DIST_KM, GWPZ_NEIGHBORHOOD_DIST_KM),
            Self::PpaArea => (PPA_NEIGHBORHOOD_DIST_KM, PPA_NEIGHBORHOOD_DIST_KM),
            Self::FssCoChannel => (
                FSS_CO_CHANNEL_NEIGHBORHOOD_DIST_KM,
                FSS_CO_CHANNEL_NEIGHBORHOOD_DIST_KM,
            ),
            Self::FssBlocking => (
                FSS_BLOCKING_NEIGHBORHOOD_DIST_KM,
                FSS_BLOCKING_NEIGHBORHOOD_DIST_KM,
            ),
            Self::Esc => (ESC_NEIGHBORHOOD_DIST_A_KM, ESC_NEIGHBORHOOD_DIST_B_KM),
        }
    }

    pub fn neighborhood_distance_km(&self, category: CbsdCategory) -> f64 {
        let (dist_a, dist_b) = self.neighborhood_distances_km();
        match category {
            CbsdCategory::A => dist_a,
            CbsdCategory::B => dist_b,
        }
    }
}

/// Morphology of a GWPZ or PPA area, passed to the hybrid model
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Region {
    Urban,
    #[default]
    Suburban,
    Rural,
}

/// A CBSD grant as seen by the interference formulas.
///
/// `antenna_azimuth` and `antenna_beamwidth` are `None` for omnidirectional
/// antennas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantInformation {
    pub latitude: f64,
    pub longitude: f64,
    pub height_agl: f64,
    pub indoor_deployment: bool,
    pub antenna_azimuth: Option<f64>,
    pub antenna_gain: f64,
    pub antenna_beamwidth: Option<f64>,
    pub cbsd_category: CbsdCategory,
    /// dBm/MHz
    pub max_eirp: f64,
    #[serde(flatten)]
    pub frequency: FrequencyRange,
    pub is_managed_grant: bool,
}

impl GrantInformation {
    pub fn low_frequency(&self) -> f64 {
        self.frequency.low()
    }

    pub fn high_frequency(&self) -> f64 {
        self.frequency.high()
    }
}

/// Serialized flat: `latitude`, `longitude`, `lowFrequency`,
/// `highFrequency`, `entityType`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtectionConstraint {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(flatten)]
    pub frequency: FrequencyRange,
    pub entity_type: ProtectedEntityType,
}

impl ProtectionConstraint {
    pub fn new(
        latitude: f64,
        longitude: f64,
        low_frequency: f64,
        high_frequency: f64,
        entity_type: ProtectedEntityType,
    ) -> Result<Self> {
        Ok(Self {
            latitude,
            longitude,
            frequency: FrequencyRange::new(low_frequency, high_frequency)?,
            entity_type,
        })
    }

    pub fn low_frequency(&self) -> f64 {
        self.frequency.low()
    }

    pub fn high_frequency(&self) -> f64 {
        self.frequency.high()
    }
}

/// FSS earth station receiver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FssProtectionPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub height_agl: f64,
    pub max_gain_dbi: f64,
    pub pointing_azimuth: f64,
    pub pointing_elevation: f64,
}

/// ESC sensor antenna
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EscInformation {
    pub antenna_height: f64,
    pub antenna_azimuth: f64,
    pub antenna_gain: f64,
    /// Pattern gain in dB relative to peak, one entry per degree of azimuth
    pub antenna_pattern_gain: Vec<f64>,
}

/// Receiver-side data for the incumbent behind a protection constraint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Incumbent {
    Area { region: Region },
    Fss(FssProtectionPoint),
    Esc(EscInformation),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_range_rejects_inverted() {
        assert!(FrequencyRange::new(3600e6, 3590e6).is_err());
        assert!(FrequencyRange::new(3600e6, 3600e6).is_err());
        assert!(FrequencyRange::new(f64::NAN, 3600e6).is_err());
        assert!(FrequencyRange::new(3590e6, 3600e6).is_ok());
    }

    #[test]
    fn test_frequency_range_overlap() {
        let a = FrequencyRange::new(3550e6, 3560e6).unwrap();
        let b = FrequencyRange::new(3555e6, 3570e6).unwrap();
        let c = FrequencyRange::new(3560e6, 3570e6).unwrap();
        assert_eq!(a.overlap(&b), 5e6);
        assert_eq!(a.overlap(&c), 0.0);
        assert_eq!(a.bandwidth(), 10e6);
    }

    #[test]
    fn test_frequency_range_deserialize_validates() {
        let ok: FrequencyRange =
            serde_json::from_str(r#"{"lowFrequency": 3550e6, "highFrequency": 3560e6}"#).unwrap();
        assert_eq!(ok.low(), 3550e6);

        let bad = serde_json::from_str::<FrequencyRange>(
            r#"{"lowFrequency": 3560e6, "highFrequency": 3550e6}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn test_neighborhood_distance_table() {
        use ProtectedEntityType::*;
        for entity in [GwpzArea, PpaArea, FssCoChannel, FssBlocking] {
            let (a, b) = entity.neighborhood_distances_km();
            assert_eq!(a, b, "{:?} radii differ", entity);
        }
        assert_eq!(Esc.neighborhood_distance_km(CbsdCategory::A), 40.0);
        assert_eq!(Esc.neighborhood_distance_km(CbsdCategory::B), 80.0);
        assert_eq!(FssCoChannel.neighborhood_distance_km(CbsdCategory::A), 150.0);
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("A".parse::<CbsdCategory>().unwrap(), CbsdCategory::A);
        assert_eq!("B".parse::<CbsdCategory>().unwrap(), CbsdCategory::B);
        assert!(matches!(
            "C".parse::<CbsdCategory>(),
            Err(InterferenceError::UnknownCategory(c)) if c == "C"
        ));
    }

    #[test]
    fn test_entity_type_serde_names() {
        let json = serde_json::to_string(&ProtectedEntityType::FssCoChannel).unwrap();
        assert_eq!(json, "\"FSS_CO_CHANNEL\"");
        assert!(serde_json::from_str::<ProtectedEntityType>("\"RADAR\"").is_err());
    }

    #[test]
    fn test_constraint_serde_is_flat_camel_case() {
        let c = ProtectionConstraint::new(37.5, -121.5, 3600e6, 3650e6, ProtectedEntityType::PpaArea)
            .unwrap();
        let json = serde_json::to_value(c).unwrap();
        assert_eq!(json["lowFrequency"], 3600e6);
        assert_eq!(json["highFrequency"], 3650e6);
        assert_eq!(json["entityType"], "PPA_AREA");
        assert!(json.get("frequency").is_none());

        let back: ProtectionConstraint = serde_json::from_value(json).unwrap();
        assert_eq!(back, c);

        let inverted = serde_json::from_str::<ProtectionConstraint>(
            r#"{"latitude": 37.5, "longitude": -121.5, "lowFrequency": 3650e6,
                "highFrequency": 3600e6, "entityType": "PPA_AREA"}"#,
        );
        assert!(inverted.is_err());
    }

    #[test]
    fn test_grant_serde_camel_case() {
        let g = GrantInformation {
            latitude: 37.0,
            longitude: -122.0,
            height_agl: 6.0,
            indoor_deployment: true,
            antenna_azimuth: None,
            antenna_gain: 10.0,
            antenna_beamwidth: None,
            cbsd_category: CbsdCategory::A,
            max_eirp: 20.0,
            frequency: FrequencyRange::new(3550e6, 3560e6).unwrap(),
            is_managed_grant: false,
        };
        let json = serde_json::to_value(&g).unwrap();
        assert_eq!(json["heightAgl"], 6.0);
        assert_eq!(json["indoorDeployment"], true);
        assert_eq!(json["lowFrequency"], 3550e6);
        assert_eq!(json["isManagedGrant"], false);

        let back: GrantInformation = serde_json::from_value(json).unwrap();
        assert_eq!(back, g);
    }

    #[test]
    fn test_incumbent_tagged_serde() {
        let inc: Incumbent = serde_json::from_str(r#"{"type": "AREA", "region": "URBAN"}"#).unwrap();
        assert_eq!(inc, Incumbent::Area { region: Region::Urban });
    }
}
