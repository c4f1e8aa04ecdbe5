//! Strategies for CBRS grants, constraints and frequency ranges
//!
//! Frequencies are drawn on a 100 kHz grid so generated edges are exact in
//! `f64` and boundary cases (touching ranges, 5 MHz multiples) come up often.

use interference::constants::{CBRS_HIGH_FREQ_HZ, CBRS_LOW_FREQ_HZ};
use interference::{
    CbsdCategory, EscInformation, FrequencyRange, FssProtectionPoint, GrantInformation,
    IncidenceAngles, ProtectedEntityType, ProtectionConstraint, Region,
};
use proptest::prelude::*;

/// Frequency grid step in Hz
pub const GRID_HZ: f64 = 100.0e3;

// ============================================================================
// Frequency Generators
// ============================================================================

/// Frequency on the grid between 3400 and 3800 MHz
pub fn frequency_hz() -> impl Strategy<Value = f64> {
    (34_000u32..=38_000).prop_map(|step| step as f64 * GRID_HZ)
}

/// (low, high) in Hz with low < high, 0.1 to 200 MHz wide
pub fn frequency_range_hz() -> impl Strategy<Value = (f64, f64)> {
    (34_000u32..=38_000, 1u32..=2_000).prop_map(|(start, width)| {
        (start as f64 * GRID_HZ, (start + width) as f64 * GRID_HZ)
    })
}

/// (low, high) in Hz with low < 3700 MHz and high > 3550 MHz
pub fn band_overlapping_range_hz() -> impl Strategy<Value = (f64, f64)> {
    frequency_range_hz().prop_filter("must overlap the CBRS band", |&(low, high)| {
        low < CBRS_HIGH_FREQ_HZ && high > CBRS_LOW_FREQ_HZ
    })
}

/// Validated range inside the CBRS band
pub fn cbrs_frequency_range() -> impl Strategy<Value = FrequencyRange> {
    (35_500u32..37_000, 1u32..=400).prop_map(|(start, width)| {
        let end = (start + width).min(37_000);
        FrequencyRange::new(start as f64 * GRID_HZ, end as f64 * GRID_HZ)
            .expect("generated range is ordered")
    })
}

// ============================================================================
// Enumeration Generators
// ============================================================================

pub fn cbsd_category() -> impl Strategy<Value = CbsdCategory> {
    prop_oneof![Just(CbsdCategory::A), Just(CbsdCategory::B)]
}

pub fn entity_type() -> impl Strategy<Value = ProtectedEntityType> {
    prop_oneof![
        Just(ProtectedEntityType::GwpzArea),
        Just(ProtectedEntityType::PpaArea),
        Just(ProtectedEntityType::FssCoChannel),
        Just(ProtectedEntityType::FssBlocking),
        Just(ProtectedEntityType::Esc),
    ]
}

pub fn region() -> impl Strategy<Value = Region> {
    prop_oneof![Just(Region::Urban), Just(Region::Suburban), Just(Region::Rural)]
}

// ============================================================================
// Geometry / RF Generators
// ============================================================================

/// Latitude over the continental US
pub fn latitude_deg() -> impl Strategy<Value = f64> {
    24.0..49.0
}

/// Longitude over the continental US
pub fn longitude_deg() -> impl Strategy<Value = f64> {
    -125.0..-67.0
}

/// CBSD antenna height inside the accepted [1, 1000] m range
pub fn height_agl_m() -> impl Strategy<Value = f64> {
    1.0..=1000.0
}

/// Allocated EIRP in dBm/MHz
pub fn eirp_dbm_mhz() -> impl Strategy<Value = f64> {
    -50.0..47.0
}

/// Antenna gain in dBi
pub fn antenna_gain_dbi() -> impl Strategy<Value = f64> {
    -5.0..25.0
}

/// Path loss in dB
pub fn path_loss_db() -> impl Strategy<Value = f64> {
    60.0..250.0
}

pub fn incidence_angles() -> impl Strategy<Value = IncidenceAngles> {
    (0.0..360.0, -90.0..90.0, 0.0..360.0, -90.0..90.0).prop_map(
        |(hor_cbsd, ver_cbsd, hor_rx, ver_rx)| IncidenceAngles {
            hor_cbsd,
            ver_cbsd,
            hor_rx,
            ver_rx,
        },
    )
}

// ============================================================================
// Composite Generators
// ============================================================================

/// Complete grant inside the CBRS band
pub fn grant() -> impl Strategy<Value = GrantInformation> {
    (
        (latitude_deg(), longitude_deg(), height_agl_m(), any::<bool>()),
        (
            proptest::option::of(0.0..360.0),
            antenna_gain_dbi(),
            proptest::option::of(10.0..360.0),
        ),
        (cbsd_category(), eirp_dbm_mhz(), cbrs_frequency_range(), any::<bool>()),
    )
        .prop_map(
            |(
                (latitude, longitude, height_agl, indoor_deployment),
                (antenna_azimuth, antenna_gain, antenna_beamwidth),
                (cbsd_category, max_eirp, frequency, is_managed_grant),
            )| GrantInformation {
                latitude,
                longitude,
                height_agl,
                indoor_deployment,
                antenna_azimuth,
                antenna_gain,
                antenna_beamwidth,
                cbsd_category,
                max_eirp,
                frequency,
                is_managed_grant,
            },
        )
}

/// Protection constraint with an arbitrary entity type
pub fn protection_constraint() -> impl Strategy<Value = ProtectionConstraint> {
    (latitude_deg(), longitude_deg(), cbrs_frequency_range(), entity_type()).prop_map(
        |(latitude, longitude, frequency, entity_type)| ProtectionConstraint {
            latitude,
            longitude,
            frequency,
            entity_type,
        },
    )
}

pub fn fss_point() -> impl Strategy<Value = FssProtectionPoint> {
    (latitude_deg(), longitude_deg(), 1.0..30.0, 30.0..60.0, 0.0..360.0, 5.0..90.0).prop_map(
        |(latitude, longitude, height_agl, max_gain_dbi, pointing_azimuth, pointing_elevation)| {
            FssProtectionPoint {
                latitude,
                longitude,
                height_agl,
                max_gain_dbi,
                pointing_azimuth,
                pointing_elevation,
            }
        },
    )
}

pub fn esc_info() -> impl Strategy<Value = EscInformation> {
    (
        3.0..50.0,
        0.0..360.0,
        0.0..20.0,
        proptest::collection::vec(-40.0..0.0, 360),
    )
        .prop_map(
            |(antenna_height, antenna_azimuth, antenna_gain, antenna_pattern_gain)| EscInformation {
                antenna_height,
                antenna_azimuth,
                antenna_gain,
                antenna_pattern_gain,
            },
        )
}
