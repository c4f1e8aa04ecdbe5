//! Per-incumbent interference formulas
//!
//! Each formula returns the interference one grant causes at one protection
//! constraint, in dBm over the reference bandwidth:
//!
//! ```text
//! I = (EIRP_max - G_nominal) + G_cbsd(θ) [+ G_rx(θ')] + 10·log10(RBW/1MHz) - L_path - L_extra
//! ```
//!
//! | Incumbent      | Path model | G_rx            | RBW        | L_extra          |
//! |----------------|------------|-----------------|------------|------------------|
//! | GWPZ / PPA     | hybrid     | -               | 5 MHz      | -                |
//! | ESC            | ITM        | ESC pattern     | 5 MHz      | 0.5 dB insertion |
//! | FSS co-channel | ITM        | FSS earth stn   | 5 MHz      | 0.5 dB insertion |
//! | FSS blocking   | ITM        | FSS earth stn   | grant BW   | mask loss        |

use tracing::debug;

use crate::collaborators::{
    CollaboratorResult, Collaborators, IncidenceAngles, PropagationLink, PropagationLoss,
};
use crate::constants::*;
use crate::eirp::{get_effective_system_eirp, get_effective_system_eirp_iap};
use crate::linear_to_db;
use crate::types::{
    EscInformation, FssProtectionPoint, GrantInformation, ProtectionConstraint, Region,
};
use crate::Result;

fn propagation_link(
    grant: &GrantInformation,
    constraint: &ProtectionConstraint,
    rx_height_m: f64,
) -> PropagationLink {
    PropagationLink {
        tx_latitude: grant.latitude,
        tx_longitude: grant.longitude,
        tx_height_m: grant.height_agl,
        rx_latitude: constraint.latitude,
        rx_longitude: constraint.longitude,
        rx_height_m,
        indoor_deployment: grant.indoor_deployment,
        reliability: AVERAGE_RELIABILITY,
        freq_mhz: FREQ_PROP_MODEL_MHZ,
    }
}

fn is_colocated(grant: &GrantInformation, constraint: &ProtectionConstraint) -> bool {
    grant.latitude == constraint.latitude && grant.longitude == constraint.longitude
}

/// Path loss for the pair, or zero loss and zero angles when the grant sits
/// on the protection point (the models are undefined for a zero-length path).
fn path_loss<F>(
    grant: &GrantInformation,
    constraint: &ProtectionConstraint,
    model: F,
) -> Result<PropagationLoss>
where
    F: FnOnce() -> CollaboratorResult<PropagationLoss>,
{
    if is_colocated(grant, constraint) {
        return Ok(PropagationLoss {
            db_loss: 0.0,
            incidence_angles: IncidenceAngles::default(),
        });
    }
    Ok(model()?)
}

fn cbsd_antenna_gain(
    grant: &GrantInformation,
    angles: &IncidenceAngles,
    collaborators: &Collaborators<'_>,
) -> f64 {
    collaborators.antenna.standard_gain(
        angles.hor_cbsd,
        grant.antenna_azimuth,
        grant.antenna_beamwidth,
        grant.antenna_gain,
    )
}

/// Interference (dBm) to a point inside a GWPZ or PPA area.
pub fn compute_interference_ppa_gwpz_point(
    grant: &GrantInformation,
    constraint: &ProtectionConstraint,
    h_inc_ant: f64,
    max_eirp: f64,
    region: Region,
    collaborators: &Collaborators<'_>,
) -> Result<f64> {
    let link = propagation_link(grant, constraint, h_inc_ant);
    let loss = path_loss(grant, constraint, || {
        collaborators.propagation.hybrid_loss(&link, region)
    })?;

    let ant_gain = cbsd_antenna_gain(grant, &loss.incidence_angles, collaborators);
    let eirp = get_effective_system_eirp_iap(max_eirp, grant.antenna_gain, ant_gain);

    let interference = eirp - loss.db_loss;
    debug!(
        "Area point interference: eirp {:.3} dBm, loss {:.3} dB -> {:.3} dBm",
        eirp, loss.db_loss, interference
    );
    Ok(interference)
}

/// Interference (dBm) to an ESC sensor.
pub fn compute_interference_esc(
    grant: &GrantInformation,
    constraint: &ProtectionConstraint,
    esc_antenna_info: &EscInformation,
    max_eirp: f64,
    collaborators: &Collaborators<'_>,
) -> Result<f64> {
    let link = propagation_link(grant, constraint, esc_antenna_info.antenna_height);
    let loss = path_loss(grant, constraint, || collaborators.propagation.itm_loss(&link))?;
    let angles = &loss.incidence_angles;

    let ant_gain = cbsd_antenna_gain(grant, angles, collaborators);
    let esc_ant_gain = collaborators.antenna.esc_pattern_gain(
        angles.hor_rx,
        esc_antenna_info.antenna_azimuth,
        &esc_antenna_info.antenna_pattern_gain,
        esc_antenna_info.antenna_gain,
    );
    let effective_ant_gain = ant_gain + esc_ant_gain;

    let eirp = get_effective_system_eirp_iap(max_eirp, grant.antenna_gain, effective_ant_gain);

    let interference = eirp - loss.db_loss - IN_BAND_INSERTION_LOSS_DB;
    debug!(
        "ESC interference: gain {:.3}+{:.3} dBi, loss {:.3} dB -> {:.3} dBm",
        ant_gain, esc_ant_gain, loss.db_loss, interference
    );
    Ok(interference)
}

fn fss_path_and_gain(
    grant: &GrantInformation,
    constraint: &ProtectionConstraint,
    fss_info: &FssProtectionPoint,
    collaborators: &Collaborators<'_>,
) -> Result<(PropagationLoss, f64)> {
    let link = propagation_link(grant, constraint, fss_info.height_agl);
    let loss = path_loss(grant, constraint, || collaborators.propagation.itm_loss(&link))?;
    let angles = &loss.incidence_angles;

    let ant_gain = cbsd_antenna_gain(grant, angles, collaborators);
    let fss_ant_gain = collaborators.antenna.fss_gain(
        angles.hor_rx,
        angles.ver_rx,
        fss_info.pointing_azimuth,
        fss_info.pointing_elevation,
        fss_info.max_gain_dbi,
    );

    Ok((loss, ant_gain + fss_ant_gain))
}

/// Interference (dBm) to an FSS earth station, co-channel passband.
pub fn compute_interference_fss_cochannel(
    grant: &GrantInformation,
    constraint: &ProtectionConstraint,
    fss_info: &FssProtectionPoint,
    max_eirp: f64,
    collaborators: &Collaborators<'_>,
) -> Result<f64> {
    let (loss, effective_ant_gain) = fss_path_and_gain(grant, constraint, fss_info, collaborators)?;

    let eirp = get_effective_system_eirp_iap(max_eirp, grant.antenna_gain, effective_ant_gain);

    let interference = eirp - loss.db_loss - IN_BAND_INSERTION_LOSS_DB;
    debug!(
        "FSS co-channel interference: gain {:.3} dBi, loss {:.3} dB -> {:.3} dBm",
        effective_ant_gain, loss.db_loss, interference
    );
    Ok(interference)
}

/// FSS receiver mask loss (dB) for a grant below the FSS passband.
///
/// The mask is anchored 50 MHz below the passband lower edge: 0.25/MHz
/// rejection below the offset, 0.6/MHz between the offset and the passband.
/// Branches are tested in order and the first match wins.
pub fn get_fss_mask_loss(grant: &GrantInformation, constraint: &ProtectionConstraint) -> f64 {
    let offset = constraint.low_frequency() - FSS_MASK_OFFSET_HZ;
    let grant_low = grant.low_frequency();
    let grant_high = grant.high_frequency();
    let fss_low = constraint.low_frequency();
    let grant_bw = grant.frequency.bandwidth();

    if fss_low < grant_low && fss_low < grant_high {
        // Passband lower edge below the grant
        0.5
    } else if grant_low < offset && grant_high < offset {
        // Grant entirely below the offset
        linear_to_db((grant_bw / MHZ) * 0.25)
    } else if grant_low < offset && grant_high > offset {
        // Grant straddles the offset
        let below = linear_to_db(((offset - grant_low) / MHZ) * 0.25);
        let above = linear_to_db(((grant_high - offset) / MHZ) * 0.6);
        below + above
    } else if fss_low > grant_low && fss_low > grant_high && grant_low > offset && grant_high > offset
    {
        // Grant between the offset and the passband
        linear_to_db((grant_bw / MHZ) * 0.6)
    } else {
        0.0
    }
}

/// Interference (dBm) to an FSS earth station, blocking (out of band).
pub fn compute_interference_fss_blocking(
    grant: &GrantInformation,
    constraint: &ProtectionConstraint,
    fss_info: &FssProtectionPoint,
    max_eirp: f64,
    collaborators: &Collaborators<'_>,
) -> Result<f64> {
    let (loss, effective_ant_gain) = fss_path_and_gain(grant, constraint, fss_info, collaborators)?;

    // EIRP over the whole grant bandwidth
    let eirp = get_effective_system_eirp(
        max_eirp,
        grant.antenna_gain,
        effective_ant_gain,
        grant.frequency.bandwidth(),
    );
    let mask_loss = get_fss_mask_loss(grant, constraint);

    let interference = eirp - mask_loss - loss.db_loss;
    debug!(
        "FSS blocking interference: eirp {:.3} dBm, mask {:.3} dB, loss {:.3} dB -> {:.3} dBm",
        eirp, mask_loss, loss.db_loss, interference
    );
    Ok(interference)
}
