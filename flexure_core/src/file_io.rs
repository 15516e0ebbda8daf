//! # File I/O Module
//!
//! Reading beam descriptions and writing analysis reports:
//! - **Input**: JSON in the [`BeamInput`] shape, parse errors carry the path
//! - **Atomic saves**: write to a `.tmp` sibling, sync, rename over the target
//! - **Version validation**: reports from an incompatible schema are rejected
//!
//! ## Example
//!
//! ```rust,no_run
//! use flexure_core::calculations::analysis::analyze;
//! use flexure_core::file_io::{load_input, save_report};
//! use std::path::Path;
//!
//! let input = load_input(Path::new("beam.json"))?;
//! let report = analyze(&input)?;
//! save_report(&report, Path::new("beam.report.json"))?;
//! # Ok::<(), flexure_core::errors::FlexureError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::errors::{FlexureError, FlexureResult};
use crate::input::BeamInput;
use crate::report::{AnalysisReport, SCHEMA_VERSION};

fn read_to_string(path: &Path) -> FlexureResult<String> {
    let mut file = File::open(path)
        .map_err(|e| FlexureError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| FlexureError::file_error("read", path.display().to_string(), e.to_string()))?;
    Ok(contents)
}

/// Load a beam description from a JSON file.
///
/// Only parsing happens here; validation runs when the input is turned into
/// a model.
pub fn load_input(path: &Path) -> FlexureResult<BeamInput> {
    let contents = read_to_string(path)?;
    let input: BeamInput =
        serde_json::from_str(&contents).map_err(|e| FlexureError::Serialization {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;
    debug!(
        "loaded {} ({} supports, {} point forces, {} distributed loads)",
        path.display(),
        input.supports.len(),
        input.point_forces.len(),
        input.udls.len()
    );
    Ok(input)
}

/// Temp file written next to `path` before the final rename
fn temp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

/// Save a report with atomic write semantics.
///
/// The save process:
/// 1. Serialize the report to pretty JSON
/// 2. Write to `<path>.tmp`
/// 3. Sync to disk
/// 4. Rename over `path`
pub fn save_report(report: &AnalysisReport, path: &Path) -> FlexureResult<()> {
    let json = serde_json::to_string_pretty(report)?;
    let tmp_path = temp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        FlexureError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    let written = tmp_file
        .write_all(json.as_bytes())
        .and_then(|_| tmp_file.sync_all())
        .map_err(|e| {
            FlexureError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
        });
    if let Err(err) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(err);
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        FlexureError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    debug!("saved report to {}", path.display());
    Ok(())
}

/// Load a previously saved report, checking its schema version
pub fn load_report(path: &Path) -> FlexureResult<AnalysisReport> {
    let contents = read_to_string(path)?;
    let report: AnalysisReport =
        serde_json::from_str(&contents).map_err(|e| FlexureError::Serialization {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;
    validate_version(&report.schema_version)?;
    Ok(report)
}

/// Reports share a major version with this build (and, while in `0.x`, the
/// minor version too).
pub fn validate_version(file_version: &str) -> FlexureResult<()> {
    let parse = |v: &str| -> Vec<u32> { v.split('.').filter_map(|p| p.parse().ok()).collect() };
    let file_parts = parse(file_version);
    let current_parts = parse(SCHEMA_VERSION);

    let compatible = match (file_parts.as_slice(), current_parts.as_slice()) {
        ([0, file_minor, ..], [0, current_minor, ..]) => file_minor == current_minor,
        ([file_major, ..], [current_major, ..]) => file_major == current_major,
        _ => false,
    };

    if compatible {
        Ok(())
    } else {
        Err(FlexureError::validation(
            "schemaVersion",
            file_version,
            format!("Incompatible report version, expected {}", SCHEMA_VERSION),
        ))
    }
}
