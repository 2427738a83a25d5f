//! This crate provides the core logic for an interactive Turing Machine definition wizard.
//! It includes modules for building a machine's transition table under its invariants,
//! driving the prompt sequence that collects a definition, and serializing the result to JSON.

pub mod builder;
pub mod serializer;
pub mod session;
pub mod table;
pub mod types;

/// Re-exports the builder and its input parsers.
pub use builder::{parse_alphabet, parse_state_count, MachineBuilder};
/// Re-exports the JSON document types and writers from the serializer module.
pub use serializer::{to_json, write_machine, MachineDocument};
/// Re-exports the session driver and the `Prompter` seam front ends implement.
pub use session::{choose, Choice, MenuAction, Prompter, Session, SessionOutcome, Validator};
/// Re-exports the transition table and its insertion outcome.
pub use table::{Insertion, TransitionTable};
/// Re-exports the core types from the types module.
pub use types::{
    Direction, MachineDefinition, State, Transition, WizardError, BLANK_SYMBOL, MAX_STATES,
    MIN_STATES,
};
