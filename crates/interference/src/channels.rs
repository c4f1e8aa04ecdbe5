//! 5 MHz IAP channelization

use crate::constants::{CBRS_HIGH_FREQ_HZ, CBRS_LOW_FREQ_HZ, IAPBW_HZ};
use crate::types::FrequencyRange;
use crate::Result;

/// Protected channels of an entity as (low, high) tuples in Hz.
///
/// The range is clipped to the CBRS band and split into 5 MHz channels from
/// its lower edge. When the clipped range is not a multiple of 5 MHz the last
/// channel ends at the clipped upper edge.
pub fn get_protected_channels(low_freq_hz: f64, high_freq_hz: f64) -> Result<Vec<(f64, f64)>> {
    FrequencyRange::new(low_freq_hz, high_freq_hz)?;

    let low = low_freq_hz.max(CBRS_LOW_FREQ_HZ);
    let high = high_freq_hz.min(CBRS_HIGH_FREQ_HZ);
    if low >= high {
        return Ok(Vec::new());
    }

    let count = ((high - low) / IAPBW_HZ).ceil() as usize;
    let channels = (0..count)
        .map(|i| {
            let channel_low = low + i as f64 * IAPBW_HZ;
            (channel_low, (channel_low + IAPBW_HZ).min(high))
        })
        .collect();

    Ok(channels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InterferenceError;

    #[test]
    fn test_full_band() {
        let channels = get_protected_channels(3550e6, 3700e6).unwrap();
        assert_eq!(channels.len(), 30);
        assert_eq!(channels[0], (3550e6, 3555e6));
        assert_eq!(channels[29], (3695e6, 3700e6));
    }

    #[test]
    fn test_clipped_to_band() {
        let channels = get_protected_channels(3500e6, 3565e6).unwrap();
        assert_eq!(channels, vec![(3550e6, 3555e6), (3555e6, 3560e6), (3560e6, 3565e6)]);

        let channels = get_protected_channels(3690e6, 4200e6).unwrap();
        assert_eq!(channels, vec![(3690e6, 3695e6), (3695e6, 3700e6)]);
    }

    #[test]
    fn test_partial_last_channel() {
        let channels = get_protected_channels(3550e6, 3562e6).unwrap();
        assert_eq!(channels, vec![(3550e6, 3555e6), (3555e6, 3560e6), (3560e6, 3562e6)]);
    }

    #[test]
    fn test_unaligned_start() {
        let channels = get_protected_channels(3552.5e6, 3562.5e6).unwrap();
        assert_eq!(channels, vec![(3552.5e6, 3557.5e6), (3557.5e6, 3562.5e6)]);
    }

    #[test]
    fn test_out_of_band_is_empty() {
        assert!(get_protected_channels(3700e6, 4200e6).unwrap().is_empty());
        assert!(get_protected_channels(3400e6, 3550e6).unwrap().is_empty());
    }

    #[test]
    fn test_inverted_range_rejected() {
        assert!(matches!(
            get_protected_channels(3600e6, 3550e6),
            Err(InterferenceError::InvalidFrequencyRange { .. })
        ));
    }
}
