//! Regulatory constants (WINNF-TS-0112)
//!
//! Frequencies are in Hz, distances in km, heights in m, losses in dB.

/// One megahertz
pub const MHZ: f64 = 1.0e6;

// Neighborhood distances from a CBSD to a protection point [R2-SGN-16]
pub const GWPZ_NEIGHBORHOOD_DIST_KM: f64 = 40.0;
pub const PPA_NEIGHBORHOOD_DIST_KM: f64 = 40.0;
pub const FSS_CO_CHANNEL_NEIGHBORHOOD_DIST_KM: f64 = 150.0;
pub const FSS_BLOCKING_NEIGHBORHOOD_DIST_KM: f64 = 40.0;
pub const ESC_NEIGHBORHOOD_DIST_A_KM: f64 = 40.0;
pub const ESC_NEIGHBORHOOD_DIST_B_KM: f64 = 80.0;

/// Frequency handed to the propagation models [R2-SGN-04]
pub const FREQ_PROP_MODEL_MHZ: f64 = 3625.0;

/// Reliability value asking the propagation models for the average loss
pub const AVERAGE_RELIABILITY: f64 = -1.0;

// CBRS band edges
pub const CBRS_LOW_FREQ_HZ: f64 = 3550.0e6;
pub const CBRS_HIGH_FREQ_HZ: f64 = 3700.0e6;

/// FSS passband lower edge
pub const FSS_LOW_FREQ_HZ: f64 = 3600.0e6;

// FSS passband for TT&C
pub const FSS_TTC_LOW_FREQ_HZ: f64 = 3700.0e6;
pub const FSS_TTC_HIGH_FREQ_HZ: f64 = 4200.0e6;

/// Offset below the FSS passband lower edge used by the blocking mask
pub const FSS_MASK_OFFSET_HZ: f64 = 50.0e6;

// Frequency range in which category A CBSDs count toward ESC IAP
pub const ESC_CAT_A_LOW_FREQ_HZ: f64 = 3550.0e6;
pub const ESC_CAT_A_HIGH_FREQ_HZ: f64 = 3660.0e6;

// ESC passband
pub const ESC_LOW_FREQ_HZ: f64 = 3550.0e6;
pub const ESC_HIGH_FREQ_HZ: f64 = 3680.0e6;

/// ESC channel 21 center frequency
pub const ESC_CH21_CF_HZ: f64 = 3652.5e6;

/// Channel bandwidth over which the IAP runs
pub const IAPBW_HZ: f64 = 5.0e6;

// GWPZ and PPA reference bandwidths for the IAP
pub const GWPZ_RBW_HZ: f64 = 10.0e6;
pub const PPA_RBW_HZ: f64 = 10.0e6;

/// Reference incumbent antenna height for GWPZ and PPA points
pub const GWPZ_PPA_HEIGHT_M: f64 = 1.5;

/// In-band insertion loss for ESC and FSS co-channel
pub const IN_BAND_INSERTION_LOSS_DB: f64 = 0.5;

// CBSD antenna height sanity bounds
pub const MIN_CBSD_HEIGHT_M: f64 = 1.0;
pub const MAX_CBSD_HEIGHT_M: f64 = 1000.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_is_multiple_of_iap_channel() {
        let channels = (CBRS_HIGH_FREQ_HZ - CBRS_LOW_FREQ_HZ) / IAPBW_HZ;
        assert_eq!(channels, 30.0);
    }

    #[test]
    fn test_esc_cat_a_ceiling_inside_esc_passband() {
        assert!(ESC_CAT_A_HIGH_FREQ_HZ < ESC_HIGH_FREQ_HZ);
        assert!(ESC_CH21_CF_HZ > ESC_LOW_FREQ_HZ && ESC_CH21_CF_HZ < ESC_HIGH_FREQ_HZ);
    }
}
