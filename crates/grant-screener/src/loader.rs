//! Data loading from JSON files

use crate::{Result, ScreenerError};
use interference::{CbsdDataRecord, FadDump, ProtectionConstraint};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::info;

/// Load one FAD dump.
///
/// Accepts either the SAS-SAS exchange object (CBSD records under
/// `recordData`) or a bare array of CBSD records.
pub fn load_fad_dump(path: impl AsRef<Path>) -> Result<FadDump> {
    let path = path.as_ref();
    info!("Loading FAD dump from {:?}", path);

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let raw: serde_json::Value = serde_json::from_reader(reader)?;

    let records: Vec<CbsdDataRecord> = if let Some(rd) = raw.get("recordData") {
        serde_json::from_value(rd.clone())?
    } else if raw.is_array() {
        serde_json::from_value(raw)?
    } else {
        return Err(ScreenerError::UnrecognizedDump(path.display().to_string()));
    };

    let grant_count: usize = records.iter().map(|r| r.grants.len()).sum();
    info!(
        "Loaded {} CBSD records with {} grants",
        records.len(),
        grant_count
    );

    Ok(FadDump::new(records))
}

/// Load the SAS UUT dump and every test-harness dump.
pub fn load_all_dumps(
    uut_path: impl AsRef<Path>,
    th_paths: &[PathBuf],
) -> Result<(FadDump, Vec<FadDump>)> {
    let uut = load_fad_dump(uut_path)?;
    let th = th_paths
        .iter()
        .map(load_fad_dump)
        .collect::<Result<Vec<_>>>()?;
    Ok((uut, th))
}

/// Load a protection constraint; the frequency range is validated.
///
/// Same layout as the `constraint` echoed in a screening report.
pub fn load_constraint(path: impl AsRef<Path>) -> Result<ProtectionConstraint> {
    let path = path.as_ref();
    info!("Loading protection constraint from {:?}", path);

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}
