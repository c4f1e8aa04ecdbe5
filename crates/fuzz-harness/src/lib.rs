//! CBRS Interference Fuzz Harness
//!
//! Property-based testing support for the interference engine: proptest
//! strategies for grants, constraints and frequency ranges, fixed-output
//! collaborators, and a small config wrapper around proptest's runner.
//!
//! # Usage
//!
//! ```rust
//! use fuzz_harness::prelude::*;
//!
//! proptest! {
//!     #[test]
//!     fn channels_stay_in_band((low, high) in band_overlapping_range_hz()) {
//!         let channels = get_protected_channels(low, high).unwrap();
//!         prop_assert!(channels.iter().all(|&(l, h)| l >= 3550e6 && h <= 3700e6));
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;
pub mod runner;

pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::runner::FuzzConfig;
    pub use interference::{
        compute_interference, db_to_linear, find_grants_inside_neighborhood,
        find_overlapping_grants, get_effective_system_eirp, get_fss_mask_loss,
        get_protected_channels, linear_to_db, CbsdCategory, Collaborators, FrequencyRange,
        GrantInformation, IncidenceAngles, Incumbent, ProtectedEntityType, ProtectionConstraint,
        Region,
    };
    pub use proptest::prelude::*;
}

// Re-export proptest for convenience
pub use proptest;
