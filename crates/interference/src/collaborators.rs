//! Host-provided models
//!
//! The engine never computes distances, terrain, path loss or antenna
//! patterns itself. The host plugs in implementations of the traits below,
//! typically wrappers over Vincenty, the NED/SRTM terrain tiles, the ITM and
//! hybrid propagation models and the WINNF antenna models.
//!
//! All traits are `Send + Sync` so a caller can fan grants out across
//! threads; the engine itself is single-threaded and stateless.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::types::Region;

/// Error type collaborators report; passed through to the caller untouched.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type CollaboratorResult<T> = std::result::Result<T, BoxError>;

/// Great-circle distance and bearings between two points.
pub trait Geodesic: Send + Sync {
    /// Returns (distance km, bearing deg, reverse bearing deg).
    fn distance_bearing(&self, lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> (f64, f64, f64);
}

pub trait TerrainElevation: Send + Sync {
    /// Terrain elevation above mean sea level in meters.
    fn elevation_m(&self, latitude: f64, longitude: f64) -> CollaboratorResult<f64>;
}

/// Endpoints of a CBSD to incumbent propagation path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PropagationLink {
    pub tx_latitude: f64,
    pub tx_longitude: f64,
    pub tx_height_m: f64,
    pub rx_latitude: f64,
    pub rx_longitude: f64,
    pub rx_height_m: f64,
    pub indoor_deployment: bool,
    pub reliability: f64,
    pub freq_mhz: f64,
}

/// Path incidence angles in degrees at each end of the link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IncidenceAngles {
    pub hor_cbsd: f64,
    pub ver_cbsd: f64,
    pub hor_rx: f64,
    pub ver_rx: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PropagationLoss {
    pub db_loss: f64,
    pub incidence_angles: IncidenceAngles,
}

pub trait PropagationModel: Send + Sync {
    /// Point-to-point ITM loss, used for ESC and FSS.
    fn itm_loss(&self, link: &PropagationLink) -> CollaboratorResult<PropagationLoss>;

    /// Hybrid ITM/eHata loss, used for GWPZ and PPA points.
    fn hybrid_loss(
        &self,
        link: &PropagationLink,
        region: Region,
    ) -> CollaboratorResult<PropagationLoss>;
}

pub trait AntennaPatterns: Send + Sync {
    /// Standard CBSD antenna gain in dBi toward `hor_angle`.
    /// `azimuth`/`beamwidth` of `None` means omnidirectional.
    fn standard_gain(
        &self,
        hor_angle: f64,
        azimuth: Option<f64>,
        beamwidth: Option<f64>,
        peak_gain: f64,
    ) -> f64;

    /// ESC antenna gain in dBi from its per-degree pattern table.
    fn esc_pattern_gain(
        &self,
        hor_angle: f64,
        azimuth: f64,
        pattern_gain: &[f64],
        peak_gain: f64,
    ) -> f64;

    /// FSS earth station gain in dBi from off-axis angles.
    fn fss_gain(
        &self,
        hor_angle: f64,
        ver_angle: f64,
        pointing_azimuth: f64,
        pointing_elevation: f64,
        max_gain_dbi: f64,
    ) -> f64;
}

/// The models one evaluation needs, borrowed from the host.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub propagation: &'a dyn PropagationModel,
    pub antenna: &'a dyn AntennaPatterns,
}

impl<'a> Collaborators<'a> {
    pub fn new(propagation: &'a dyn PropagationModel, antenna: &'a dyn AntennaPatterns) -> Self {
        Self {
            propagation,
            antenna,
        }
    }
}

/// Spherical-earth great circle, for tools and tests that have no
/// ellipsoidal geodesic at hand.
#[derive(Debug, Clone, Copy, Default)]
pub struct Haversine;

impl Haversine {
    const EARTH_RADIUS_KM: f64 = 6371.0;

    fn initial_bearing(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
        let lat1_rad = lat1 * PI / 180.0;
        let lat2_rad = lat2 * PI / 180.0;
        let dlon = (lon2 - lon1) * PI / 180.0;

        let y = dlon.sin() * lat2_rad.cos();
        let x = lat1_rad.cos() * lat2_rad.sin() - lat1_rad.sin() * lat2_rad.cos() * dlon.cos();
        (y.atan2(x).to_degrees() + 360.0) % 360.0
    }
}

impl Geodesic for Haversine {
    fn distance_bearing(&self, lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> (f64, f64, f64) {
        let lat1_rad = lat1 * PI / 180.0;
        let lat2_rad = lat2 * PI / 180.0;
        let dlat = (lat2 - lat1) * PI / 180.0;
        let dlon = (lon2 - lon1) * PI / 180.0;

        let a = (dlat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        (
            Self::EARTH_RADIUS_KM * c,
            Self::initial_bearing(lat1, lon1, lat2, lon2),
            Self::initial_bearing(lat2, lon2, lat1, lon1),
        )
    }
}
