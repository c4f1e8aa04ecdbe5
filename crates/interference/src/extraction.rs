//! CBSD grant extraction from FAD records
//!
//! Full Activity Dump (FAD) records are exchanged between SASs as nested
//! JSON objects in which almost every field is optional. This module is the
//! only place that deals with that shape: it resolves heights to AGL,
//! enforces the height sanity bounds and the frequency-range ordering, and
//! hands the formulas fully populated [`GrantInformation`] values.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, info, warn};

use crate::collaborators::TerrainElevation;
use crate::constants::{MAX_CBSD_HEIGHT_M, MIN_CBSD_HEIGHT_M};
use crate::types::{CbsdCategory, FrequencyRange, GrantInformation};
use crate::{InterferenceError, Result};

/// One CBSD entry of a FAD: its registration and its grants.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CbsdDataRecord {
    pub registration_request: RegistrationRequest,
    #[serde(default)]
    pub grants: Vec<GrantRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub cbsd_category: Option<String>,
    pub installation_param: Option<InstallationParam>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallationParam {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub height: Option<f64>,
    pub height_type: Option<String>,
    pub indoor_deployment: Option<bool>,
    pub antenna_azimuth: Option<f64>,
    pub antenna_gain: Option<f64>,
    pub antenna_beamwidth: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantRecord {
    pub operation_param: Option<OperationParam>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationParam {
    pub max_eirp: Option<f64>,
    pub operation_frequency_range: Option<OperationFrequencyRange>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationFrequencyRange {
    pub low_frequency: Option<f64>,
    pub high_frequency: Option<f64>,
}

/// CBSD records of one SAS's Full Activity Dump.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FadDump {
    cbsd_records: Vec<CbsdDataRecord>,
}

impl FadDump {
    pub fn new(cbsd_records: Vec<CbsdDataRecord>) -> Self {
        Self { cbsd_records }
    }

    pub fn cbsd_records(&self) -> &[CbsdDataRecord] {
        &self.cbsd_records
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeightType {
    #[default]
    Agl,
    Amsl,
}

impl FromStr for HeightType {
    type Err = InterferenceError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "AGL" => Ok(HeightType::Agl),
            "AMSL" => Ok(HeightType::Amsl),
            other => Err(InterferenceError::UnknownHeightType(other.to_string())),
        }
    }
}

fn validate_height(height_agl: f64) -> Result<f64> {
    if (MIN_CBSD_HEIGHT_M..=MAX_CBSD_HEIGHT_M).contains(&height_agl) {
        Ok(height_agl)
    } else {
        Err(InterferenceError::HeightOutOfBounds(height_agl))
    }
}

/// Builds a [`GrantInformation`], checking every required field once.
#[derive(Debug, Clone, Default)]
pub struct GrantInformationBuilder {
    latitude: Option<f64>,
    longitude: Option<f64>,
    height_agl: Option<f64>,
    indoor_deployment: bool,
    antenna_azimuth: Option<f64>,
    antenna_gain: Option<f64>,
    antenna_beamwidth: Option<f64>,
    cbsd_category: Option<CbsdCategory>,
    max_eirp: Option<f64>,
    low_frequency: Option<f64>,
    high_frequency: Option<f64>,
    is_managed_grant: bool,
}

impl GrantInformationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn location(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    pub fn height_agl(mut self, height_agl: f64) -> Self {
        self.height_agl = Some(height_agl);
        self
    }

    pub fn indoor_deployment(mut self, indoor: bool) -> Self {
        self.indoor_deployment = indoor;
        self
    }

    /// `azimuth` and `beamwidth` stay `None` for omnidirectional antennas.
    pub fn antenna(mut self, azimuth: Option<f64>, gain: f64, beamwidth: Option<f64>) -> Self {
        self.antenna_azimuth = azimuth;
        self.antenna_gain = Some(gain);
        self.antenna_beamwidth = beamwidth;
        self
    }

    pub fn category(mut self, category: CbsdCategory) -> Self {
        self.cbsd_category = Some(category);
        self
    }

    pub fn max_eirp(mut self, max_eirp: f64) -> Self {
        self.max_eirp = Some(max_eirp);
        self
    }

    pub fn frequency_range(self, low_frequency: f64, high_frequency: f64) -> Self {
        self.low_frequency(low_frequency).high_frequency(high_frequency)
    }

    pub fn low_frequency(mut self, low_frequency: f64) -> Self {
        self.low_frequency = Some(low_frequency);
        self
    }

    pub fn high_frequency(mut self, high_frequency: f64) -> Self {
        self.high_frequency = Some(high_frequency);
        self
    }

    pub fn managed(mut self, is_managed_grant: bool) -> Self {
        self.is_managed_grant = is_managed_grant;
        self
    }

    pub fn build(self) -> Result<GrantInformation> {
        let height = self
            .height_agl
            .ok_or(InterferenceError::MissingField("height"))?;
        let height_agl = validate_height(height)?;
        let frequency = FrequencyRange::new(
            self.low_frequency
                .ok_or(InterferenceError::MissingField("lowFrequency"))?,
            self.high_frequency
                .ok_or(InterferenceError::MissingField("highFrequency"))?,
        )?;

        Ok(GrantInformation {
            latitude: self.latitude.ok_or(InterferenceError::MissingField("latitude"))?,
            longitude: self
                .longitude
                .ok_or(InterferenceError::MissingField("longitude"))?,
            height_agl,
            indoor_deployment: self.indoor_deployment,
            antenna_azimuth: self.antenna_azimuth,
            antenna_gain: self
                .antenna_gain
                .ok_or(InterferenceError::MissingField("antennaGain"))?,
            antenna_beamwidth: self.antenna_beamwidth,
            cbsd_category: self
                .cbsd_category
                .ok_or(InterferenceError::MissingField("cbsdCategory"))?,
            max_eirp: self.max_eirp.ok_or(InterferenceError::MissingField("maxEirp"))?,
            frequency,
            is_managed_grant: self.is_managed_grant,
        })
    }
}

/// Builder pre-filled with everything the registration of `record` provides.
fn registration_builder(
    record: &CbsdDataRecord,
    is_managing_sas: bool,
    terrain: &dyn TerrainElevation,
) -> Result<GrantInformationBuilder> {
    let registration = &record.registration_request;
    let install = registration
        .installation_param
        .as_ref()
        .ok_or(InterferenceError::MissingField("installationParam"))?;

    let latitude = install
        .latitude
        .ok_or(InterferenceError::MissingField("latitude"))?;
    let longitude = install
        .longitude
        .ok_or(InterferenceError::MissingField("longitude"))?;
    let mut height = install
        .height
        .ok_or(InterferenceError::MissingField("height"))?;

    let height_type = match install.height_type.as_deref() {
        Some(s) => s.parse::<HeightType>()?,
        None => HeightType::default(),
    };
    if height_type == HeightType::Amsl {
        let altitude = terrain.elevation_m(latitude, longitude)?;
        warn!(
            "CBSD at ({:.6}, {:.6}) registered AMSL height {:.1} m, terrain {:.1} m",
            latitude, longitude, height, altitude
        );
        height -= altitude;
    }

    // Checked per CBSD, so a record without grants still fails
    let height_agl = validate_height(height)?;

    let category = registration
        .cbsd_category
        .as_deref()
        .ok_or(InterferenceError::MissingField("cbsdCategory"))?
        .parse::<CbsdCategory>()?;
    let antenna_gain = install
        .antenna_gain
        .ok_or(InterferenceError::MissingField("antennaGain"))?;

    Ok(GrantInformationBuilder::new()
        .location(latitude, longitude)
        .height_agl(height_agl)
        .indoor_deployment(install.indoor_deployment.unwrap_or(false))
        .antenna(install.antenna_azimuth, antenna_gain, install.antenna_beamwidth)
        .category(category)
        .managed(is_managing_sas))
}

fn grant_information(base: &GrantInformationBuilder, grant: &GrantRecord) -> Result<GrantInformation> {
    let operation = grant
        .operation_param
        .as_ref()
        .ok_or(InterferenceError::MissingField("operationParam"))?;
    let range = operation
        .operation_frequency_range
        .as_ref()
        .ok_or(InterferenceError::MissingField("operationFrequencyRange"))?;

    let mut builder = base.clone();
    if let Some(max_eirp) = operation.max_eirp {
        builder = builder.max_eirp(max_eirp);
    }
    if let Some(low) = range.low_frequency {
        builder = builder.low_frequency(low);
    }
    if let Some(high) = range.high_frequency {
        builder = builder.high_frequency(high);
    }
    builder.build()
}

/// One [`GrantInformation`] per grant of every CBSD in `cbsd_data_records`.
///
/// `is_managing_sas` is true for records of the SAS under test and false for
/// records of peer SASs.
pub fn get_all_grant_information_from_cbsd_data_dump(
    cbsd_data_records: &[CbsdDataRecord],
    is_managing_sas: bool,
    terrain: &dyn TerrainElevation,
) -> Result<Vec<GrantInformation>> {
    let mut grant_objects = Vec::new();

    for record in cbsd_data_records {
        let base = registration_builder(record, is_managing_sas, terrain)?;
        for grant in &record.grants {
            grant_objects.push(grant_information(&base, grant)?);
        }
    }

    debug!(
        "Extracted {} grants from {} CBSD records (managing SAS: {})",
        grant_objects.len(),
        cbsd_data_records.len(),
        is_managing_sas
    );

    Ok(grant_objects)
}

/// Grants of the SAS under test followed by those of every test-harness SAS.
pub fn get_grant_objects_from_fad(
    sas_uut_fad: &FadDump,
    sas_th_fads: &[FadDump],
    terrain: &dyn TerrainElevation,
) -> Result<Vec<GrantInformation>> {
    let mut grant_objects =
        get_all_grant_information_from_cbsd_data_dump(sas_uut_fad.cbsd_records(), true, terrain)?;
    let uut_count = grant_objects.len();

    let cbsd_list_th: Vec<CbsdDataRecord> = sas_th_fads
        .iter()
        .flat_map(|fad| fad.cbsd_records().iter().cloned())
        .collect();
    grant_objects.extend(get_all_grant_information_from_cbsd_data_dump(
        &cbsd_list_th,
        false,
        terrain,
    )?);

    info!(
        "Loaded {} grants ({} SAS UUT, {} from {} test harness FADs)",
        grant_objects.len(),
        uut_count,
        grant_objects.len() - uut_count,
        sas_th_fads.len()
    );

    Ok(grant_objects)
}
