//! FAD Grant Screener
//!
//! Loads Full Activity Dumps from the SAS under test and the test harness,
//! keeps the grants that sit inside a protection constraint's neighborhood,
//! and breaks the constraint into its 5 MHz IAP channels, listing which
//! neighborhood grants overlap each one.
//!
//! No interference is computed here: that needs propagation and antenna
//! models the host plugs into `interference::compute_interference`.

use chrono::{DateTime, Utc};
use interference::collaborators::CollaboratorResult;
use interference::{
    find_grants_inside_neighborhood, get_protected_channels, is_overlapping, Geodesic,
    GrantInformation, InterferenceError, ProtectionConstraint, TerrainElevation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub mod loader;

#[derive(Error, Debug)]
pub enum ScreenerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unrecognized FAD dump layout in {0}")]
    UnrecognizedDump(String),
    #[error(transparent)]
    Interference(#[from] InterferenceError),
}

pub type Result<T> = std::result::Result<T, ScreenerError>;

/// Same terrain elevation everywhere, for AMSL conversion without tiles.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantTerrain(pub f64);

impl TerrainElevation for ConstantTerrain {
    fn elevation_m(&self, _latitude: f64, _longitude: f64) -> CollaboratorResult<f64> {
        Ok(self.0)
    }
}

/// One protected channel and the neighborhood grants that overlap it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelScreening {
    pub low_frequency: f64,
    pub high_frequency: f64,
    /// Indices into `ScreeningReport::neighborhood_grants`
    pub overlapping_grants: Vec<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningReport {
    pub generated_at: DateTime<Utc>,
    pub constraint: ProtectionConstraint,
    pub total_grants: usize,
    pub neighborhood_grants: Vec<GrantInformation>,
    pub channels: Vec<ChannelScreening>,
}

/// Screen `grants` against `constraint`.
pub fn screen(
    grants: &[GrantInformation],
    constraint: &ProtectionConstraint,
    geodesic: &dyn Geodesic,
) -> Result<ScreeningReport> {
    let neighborhood_grants: Vec<GrantInformation> = find_grants_inside_neighborhood(
        grants,
        (constraint.latitude, constraint.longitude),
        constraint.entity_type,
        geodesic,
    )
    .into_iter()
    .cloned()
    .collect();

    let mut channels = Vec::new();
    for (low, high) in
        get_protected_channels(constraint.low_frequency(), constraint.high_frequency())?
    {
        let channel_constraint = ProtectionConstraint::new(
            constraint.latitude,
            constraint.longitude,
            low,
            high,
            constraint.entity_type,
        )?;
        let overlapping_grants: Vec<usize> = neighborhood_grants
            .iter()
            .enumerate()
            .filter(|(_, g)| is_overlapping(g, &channel_constraint))
            .map(|(i, _)| i)
            .collect();
        debug!(
            "Channel {:.1}-{:.1} MHz: {} overlapping grants",
            low / 1e6,
            high / 1e6,
            overlapping_grants.len()
        );

        channels.push(ChannelScreening {
            low_frequency: low,
            high_frequency: high,
            overlapping_grants,
        });
    }

    info!(
        "{:?} at ({:.6}, {:.6}): {} of {} grants in neighborhood, {} protected channels",
        constraint.entity_type,
        constraint.latitude,
        constraint.longitude,
        neighborhood_grants.len(),
        grants.len(),
        channels.len()
    );

    Ok(ScreeningReport {
        generated_at: Utc::now(),
        constraint: *constraint,
        total_grants: grants.len(),
        neighborhood_grants,
        channels,
    })
}
