//! Stub collaborators for unit tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::collaborators::*;
use crate::types::*;

/// Returns a fixed loss and records every call.
pub struct StubPropagation {
    pub loss: PropagationLoss,
    pub itm_calls: AtomicUsize,
    pub hybrid_calls: AtomicUsize,
    pub last_region: Mutex<Option<Region>>,
    pub last_link: Mutex<Option<PropagationLink>>,
}

impl StubPropagation {
    pub fn new(db_loss: f64, incidence_angles: IncidenceAngles) -> Self {
        Self {
            loss: PropagationLoss {
                db_loss,
                incidence_angles,
            },
            itm_calls: AtomicUsize::new(0),
            hybrid_calls: AtomicUsize::new(0),
            last_region: Mutex::new(None),
            last_link: Mutex::new(None),
        }
    }

    pub fn itm_calls(&self) -> usize {
        self.itm_calls.load(Ordering::SeqCst)
    }

    pub fn hybrid_calls(&self) -> usize {
        self.hybrid_calls.load(Ordering::SeqCst)
    }
}

impl PropagationModel for StubPropagation {
    fn itm_loss(&self, link: &PropagationLink) -> CollaboratorResult<PropagationLoss> {
        self.itm_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_link.lock().unwrap() = Some(*link);
        Ok(self.loss)
    }

    fn hybrid_loss(
        &self,
        link: &PropagationLink,
        region: Region,
    ) -> CollaboratorResult<PropagationLoss> {
        self.hybrid_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_region.lock().unwrap() = Some(region);
        *self.last_link.lock().unwrap() = Some(*link);
        Ok(self.loss)
    }
}

pub struct FailingPropagation;

impl PropagationModel for FailingPropagation {
    fn itm_loss(&self, _link: &PropagationLink) -> CollaboratorResult<PropagationLoss> {
        Err("terrain tile missing".into())
    }

    fn hybrid_loss(
        &self,
        _link: &PropagationLink,
        _region: Region,
    ) -> CollaboratorResult<PropagationLoss> {
        Err("terrain tile missing".into())
    }
}

/// Fixed gains per antenna kind, independent of the angles.
pub struct StubAntenna {
    pub cbsd_gain: f64,
    pub esc_gain: f64,
    pub fss_gain: f64,
}

impl AntennaPatterns for StubAntenna {
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

/// Returns the distance configured for the tested point regardless of input.
pub struct FixedDistance(pub f64);

impl Geodesic for FixedDistance {
    fn distance_bearing(&self, _lat1: f64, _lon1: f64, _lat2: f64, _lon2: f64) -> (f64, f64, f64) {
        (self.0, 0.0, 180.0)
    }
}

pub fn grant(category: CbsdCategory, low_mhz: f64, high_mhz: f64) -> GrantInformation {
    GrantInformation {
        latitude: 37.0,
        longitude: -122.0,
        height_agl: 6.0,
        indoor_deployment: false,
        antenna_azimuth: Some(90.0),
        antenna_gain: 10.0,
        antenna_beamwidth: Some(60.0),
        cbsd_category: category,
        max_eirp: 20.0,
        frequency: FrequencyRange::new(low_mhz * 1e6, high_mhz * 1e6).unwrap(),
        is_managed_grant: true,
    }
}

pub fn constraint(
    entity_type: ProtectedEntityType,
    low_mhz: f64,
    high_mhz: f64,
) -> ProtectionConstraint {
    ProtectionConstraint::new(37.1, -122.1, low_mhz * 1e6, high_mhz * 1e6, entity_type).unwrap()
}

pub fn fss_point() -> FssProtectionPoint {
    FssProtectionPoint {
        latitude: 37.1,
        longitude: -122.1,
        height_agl: 10.0,
        max_gain_dbi: 40.0,
        pointing_azimuth: 180.0,
        pointing_elevation: 30.0,
    }
}

pub fn esc_info() -> EscInformation {
    EscInformation {
        antenna_height: 20.0,
        antenna_azimuth: 45.0,
        antenna_gain: 15.0,
        antenna_pattern_gain: vec![0.0; 360],
    }
}
