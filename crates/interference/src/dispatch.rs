//! Entity-type dispatch

use crate::collaborators::Collaborators;
use crate::constants::GWPZ_PPA_HEIGHT_M;
use crate::db_to_linear;
use crate::formulas::*;
use crate::types::{GrantInformation, Incumbent, ProtectedEntityType, ProtectionConstraint};
use crate::{InterferenceError, Result};

/// Interference in mW that `grant`, transmitting at `eirp` (dBm/MHz), causes
/// at `channel_constraint`.
///
/// `incumbent` must match the constraint's entity type: `Area` for GWPZ and
/// PPA, `Fss` for both FSS types, `Esc` for ESC.
pub fn compute_interference(
    grant: &GrantInformation,
    eirp: f64,
    channel_constraint: &ProtectionConstraint,
    incumbent: &Incumbent,
    collaborators: &Collaborators<'_>,
) -> Result<f64> {
    let entity_type = channel_constraint.entity_type;
    let mismatch = |expected: &'static str| InterferenceError::IncumbentMismatch {
        entity_type,
        expected,
    };

    let interference_dbm = match (entity_type, incumbent) {
        (ProtectedEntityType::FssCoChannel, Incumbent::Fss(fss_info)) => {
            compute_interference_fss_cochannel(grant, channel_constraint, fss_info, eirp, collaborators)?
        }
        (ProtectedEntityType::FssBlocking, Incumbent::Fss(fss_info)) => {
            compute_interference_fss_blocking(grant, channel_constraint, fss_info, eirp, collaborators)?
        }
        (ProtectedEntityType::Esc, Incumbent::Esc(esc_antenna_info)) => {
            compute_interference_esc(grant, channel_constraint, esc_antenna_info, eirp, collaborators)?
        }
        (ProtectedEntityType::GwpzArea | ProtectedEntityType::PpaArea, Incumbent::Area { region }) => {
            compute_interference_ppa_gwpz_point(
                grant,
                channel_constraint,
                GWPZ_PPA_HEIGHT_M,
                eirp,
                *region,
                collaborators,
            )?
        }
        (ProtectedEntityType::FssCoChannel | ProtectedEntityType::FssBlocking, _) => {
            return Err(mismatch("FSS"))
        }
        (ProtectedEntityType::Esc, _) => return Err(mismatch("ESC")),
        (ProtectedEntityType::GwpzArea | ProtectedEntityType::PpaArea, _) => {
            return Err(mismatch("area"))
        }
    };

    Ok(db_to_linear(interference_dbm))
}
