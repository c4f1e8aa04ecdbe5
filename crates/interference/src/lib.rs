//! CBRS Interference Library
//!
//! Computes the interference a single CBSD grant contributes to a protected
//! incumbent inside the 3550-3700 MHz band: GWPZ and PPA area points, FSS
//! earth stations (co-channel and blocking) and ESC sensors. The per-grant
//! values feed the Iterative Allocation Process (IAP) and the aggregate
//! interference reference models, which sum them outside this crate.
//!
//! # Pipeline
//!
//! ```text
//! FAD records ──extraction──▶ GrantInformation
//!                                  │
//!             neighborhood + frequency overlap filters
//!                                  │
//!       dispatch ──▶ area / ESC / FSS co-channel / FSS blocking formula
//!                                  │
//!                        dBm ──▶ mW (db_to_linear)
//! ```
//!
//! Distance, terrain, propagation and antenna patterns are supplied by the
//! host through the traits in [`collaborators`].

use thiserror::Error;

pub mod channels;
pub mod collaborators;
pub mod constants;
pub mod dispatch;
pub mod eirp;
pub mod extraction;
pub mod formulas;
pub mod neighborhood;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use channels::get_protected_channels;
pub use collaborators::{
    AntennaPatterns, BoxError, Collaborators, Geodesic, Haversine, IncidenceAngles,
    PropagationLink, PropagationLoss, PropagationModel, TerrainElevation,
};
pub use dispatch::compute_interference;
pub use eirp::{get_effective_system_eirp, get_effective_system_eirp_iap};
pub use extraction::{
    get_all_grant_information_from_cbsd_data_dump, get_grant_objects_from_fad, CbsdDataRecord,
    FadDump, GrantInformationBuilder, HeightType,
};
pub use formulas::{
    compute_interference_esc, compute_interference_fss_blocking,
    compute_interference_fss_cochannel, compute_interference_ppa_gwpz_point, get_fss_mask_loss,
};
pub use neighborhood::{
    find_grants_inside_neighborhood, find_overlapping_grants,
    find_overlapping_grants_inside_neighborhood, is_overlapping,
};
pub use types::{
    CbsdCategory, EscInformation, FrequencyRange, FssProtectionPoint, GrantInformation,
    Incumbent, ProtectedEntityType, ProtectionConstraint, Region,
};

#[derive(Error, Debug)]
pub enum InterferenceError {
    #[error("Invalid frequency range: low {low} Hz must be below high {high} Hz")]
    InvalidFrequencyRange { low: f64, high: f64 },
    #[error("CBSD height {0} m is less than 1 m or greater than 1000 m")]
    HeightOutOfBounds(f64),
    #[error("Missing field in CBSD record: {0}")]
    MissingField(&'static str),
    #[error("Unknown CBSD category: {0}")]
    UnknownCategory(String),
    #[error("Unknown height type: {0}")]
    UnknownHeightType(String),
    #[error("Protection constraint {entity_type:?} requires {expected} incumbent information")]
    IncumbentMismatch {
        entity_type: ProtectedEntityType,
        expected: &'static str,
    },
    #[error(transparent)]
    Collaborator(#[from] BoxError),
}

pub type Result<T> = std::result::Result<T, InterferenceError>;

/// dBm to mW
pub fn db_to_linear(x: f64) -> f64 {
    10f64.powf(x / 10.0)
}

/// mW to dBm
pub fn linear_to_db(x: f64) -> f64 {
    10.0 * x.log10()
}
