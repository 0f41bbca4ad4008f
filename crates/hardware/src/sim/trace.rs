//! Branch events and trace files.
//!
//! A trace is the resolved conditional-branch stream of one program run: one
//! [`BranchEvent`] per dynamic branch, in program order. Trace files are a
//! JSON array of events, e.g. `[{"pc":4096,"taken":true}, ...]`.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::error::TraceError;

/// One resolved conditional branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BranchEvent {
    /// Address of the branch instruction.
    pub pc: u64,
    /// Resolved direction.
    pub taken: bool,
}

impl BranchEvent {
    /// Creates a branch event.
    pub const fn new(pc: u64, taken: bool) -> Self {
        Self { pc, taken }
    }
}

/// Reads a trace file.
///
/// # Errors
///
/// Returns [`TraceError::Io`] if the file cannot be opened and
/// [`TraceError::Json`] if it is not a JSON array of events.
pub fn load_trace(path: impl AsRef<Path>) -> Result<Vec<BranchEvent>, TraceError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Writes `events` to a trace file, replacing any existing file.
///
/// # Errors
///
/// Returns [`TraceError::Io`] if the file cannot be created or written.
pub fn save_trace(path: impl AsRef<Path>, events: &[BranchEvent]) -> Result<(), TraceError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, events)?;
    writer.flush()?;
    Ok(())
}
