//! This module converts a finished [`MachineDefinition`] into its JSON document and writes
//! it to disk.
//!
//! Document shape:
//!
//! ```json
//! {"start":"0","accept":"1","reject":"2",
//!  "delta":[{"from":"0","to":[{"result":["1","a","R"],"on":"a"}]}]}
//! ```

use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::types::{Direction, MachineDefinition, State, WizardError};

/// The serialized form of a machine definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineDocument {
    pub start: State,
    pub accept: State,
    pub reject: State,
    /// One entry per state with at least one outgoing transition, in ascending state order.
    pub delta: Vec<Delta>,
}

/// The transitions leaving a single state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delta {
    pub from: State,
    pub to: Vec<DeltaTransition>,
}

/// One transition inside a [`Delta`]: `result` is `[to, write, direction]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeltaTransition {
    pub result: (State, char, Direction),
    pub on: char,
}

impl From<&MachineDefinition> for MachineDocument {
    fn from(machine: &MachineDefinition) -> Self {
        let delta = machine
            .table
            .iter()
            .map(|(from, transitions)| Delta {
                from,
                to: transitions
                    .iter()
                    .map(|transition| DeltaTransition {
                        result: (transition.to, transition.write, transition.direction),
                        on: transition.on,
                    })
                    .collect(),
            })
            .collect();

        Self {
            start: machine.start,
            accept: machine.accept,
            reject: machine.reject,
            delta,
        }
    }
}

/// Encodes `machine` as a compact JSON document.
pub fn to_json(machine: &MachineDefinition) -> Result<String, WizardError> {
    serde_json::to_string(&MachineDocument::from(machine))
        .map_err(|e| WizardError::SerializationError(e.to_string()))
}

/// Appends the JSON document for `machine` to `path`, creating the file if needed.
///
/// Existing contents are never truncated, so writing twice to the same path leaves two
/// concatenated documents in the file.
pub fn write_machine(path: &Path, machine: &MachineDefinition) -> Result<(), WizardError> {
    let json = to_json(machine)?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            WizardError::FileError(format!("Failed to open file {}: {}", path.display(), e))
        })?;

    file.write_all(json.as_bytes()).map_err(|e| {
        WizardError::FileError(format!("Failed to write file {}: {}", path.display(), e))
    })?;

    info!(path = %path.display(), bytes = json.len(), "wrote machine definition");
    Ok(())
}
