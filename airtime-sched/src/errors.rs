//! Engine-level errors.
//!
//! Admission rejections are not errors — they travel inside
//! `AdmissionResult` (see `airtime_core::RejectReason`). [`SchedError`]
//! covers the operations around admission that can genuinely fail:
//! deleting an allocation that does not exist, phase events arriving out
//! of order, and configuration values outside their permitted range.

/// Engine-level operation failure.
#[derive(Debug, PartialEq, Eq)]
pub enum SchedError {
    /// Delete or modify referenced an allocation that is not in the table.
    UnknownAllocation { id: u8, source: u8, dest: u8 },

    /// A phase event arrived out of order.
    PhaseViolation(&'static str),

    /// Configuration value outside its permitted range.
    Config(&'static str),
}

// Implemented by hand rather than via `thiserror::Error`: the
// `UnknownAllocation::source` field is a plain node id, but thiserror
// treats any field named `source` as an error source and rejects it.
impl std::fmt::Display for SchedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchedError::UnknownAllocation { id, source, dest } => write!(
                f,
                "no allocation with id {id} for source {source} and destination {dest}"
            ),
            SchedError::PhaseViolation(msg) => {
                write!(f, "phase event not valid in the current phase: {msg}")
            }
            SchedError::Config(msg) => write!(f, "configuration error: {msg}"),
        }
    }
}

impl std::error::Error for SchedError {}
