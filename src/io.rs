//! Report persistence.
//!
//! The pipeline only needs "write these bytes to a named destination";
//! the local file writer below is the one implementation this binary
//! ships. An object-store uploader would slot in at the same seam.

use anyhow::Result;
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::report::Report;

pub fn write_report(path: &Path, report: &Report) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut file = fs::File::create(path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}
