//! Fixed-output collaborators
//!
//! Property tests hold the propagation and antenna models constant so that
//! only the engine's own arithmetic varies.

use std::sync::atomic::{AtomicUsize, Ordering};

use interference::collaborators::CollaboratorResult;
use interference::{
    AntennaPatterns, Geodesic, IncidenceAngles, PropagationLink, PropagationLoss,
    PropagationModel, Region, TerrainElevation,
};

/// Same loss and angles for every path; counts model invocations.
#[derive(Debug, Default)]
pub struct FixedPropagation {
    pub loss: PropagationLoss,
    calls: AtomicUsize,
}

impl FixedPropagation {
    pub fn new(db_loss: f64, incidence_angles: IncidenceAngles) -> Self {
        Self {
            loss: PropagationLoss {
                db_loss,
                incidence_angles,
            },
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PropagationModel for FixedPropagation {
    fn itm_loss(&self, _link: &PropagationLink) -> CollaboratorResult<PropagationLoss> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.loss)
    }

    fn hybrid_loss(
        &self,
        _link: &PropagationLink,
        _region: Region,
    ) -> CollaboratorResult<PropagationLoss> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.loss)
    }
}

/// Same gain for every antenna kind and angle.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedAntenna {
    pub cbsd_gain: f64,
    pub esc_gain: f64,
    pub fss_gain: f64,
}

impl AntennaPatterns for FixedAntenna {
    fn standard_gain(
        &self,
        _hor_angle: f64,
        _azimuth: Option<f64>,
        _beamwidth: Option<f64>,
        _peak_gain: f64,
    ) -> f64 {
        self.cbsd_gain
    }

    fn esc_pattern_gain(
        &self,
        _hor_angle: f64,
        _azimuth: f64,
        _pattern_gain: &[f64],
        _peak_gain: f64,
    ) -> f64 {
        self.esc_gain
    }

    fn fss_gain(
        &self,
        _hor_angle: f64,
        _ver_angle: f64,
        _pointing_azimuth: f64,
        _pointing_elevation: f64,
        _max_gain_dbi: f64,
    ) -> f64 {
        self.fss_gain
    }
}

/// Every pair of points is the wrapped distance (km) apart.
#[derive(Debug, Clone, Copy)]
pub struct FixedDistance(pub f64);

impl Geodesic for FixedDistance {
    fn distance_bearing(&self, _lat1: f64, _lon1: f64, _lat2: f64, _lon2: f64) -> (f64, f64, f64) {
        (self.0, 0.0, 180.0)
    }
}

/// Constant terrain elevation.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatTerrain(pub f64);

impl TerrainElevation for FlatTerrain {
    fn elevation_m(&self, _latitude: f64, _longitude: f64) -> CollaboratorResult<f64> {
        Ok(self.0)
    }
}
