//! This module defines the core data structures and types shared by the builder, the
//! session driver and the serializer: states, directions, transitions, the finished
//! machine definition, and the error type.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::table::TransitionTable;

/// The reserved blank symbol. Always usable, never part of a declared alphabet.
pub const BLANK_SYMBOL: char = '_';
/// The smallest number of states a machine may declare (accept and reject must differ).
pub const MIN_STATES: usize = 2;
/// The largest number of states a machine may declare.
pub const MAX_STATES: usize = 100_000;

/// A machine state, identified by its index `0..N-1`.
///
/// States are displayed and serialized as their decimal string, so state `3`
/// appears as `"3"` in both the terminal and the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct State(usize);

impl State {
    pub fn new(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<State> for String {
    fn from(state: State) -> Self {
        state.to_string()
    }
}

impl TryFrom<String> for State {
    type Error = WizardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value
            .parse::<usize>()
            .map(State)
            .map_err(|_| WizardError::InvalidState(value))
    }
}

/// Represents the possible directions the tape head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    #[serde(rename = "L")]
    Left,
    /// Move the head one position to the right.
    #[serde(rename = "R")]
    Right,
}

impl Direction {
    /// Every direction, in the order they are offered to the user.
    pub const ALL: [Direction; 2] = [Direction::Left, Direction::Right];

    /// The long name shown in menus.
    pub fn label(&self) -> &'static str {
        match self {
            Direction::Left => "Left",
            Direction::Right => "Right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "L"),
            Direction::Right => write!(f, "R"),
        }
    }
}

/// A single transition rule. The origin state is the key it is stored under in the
/// [`TransitionTable`], so only the consumed symbol and the outcome live here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// The symbol read under the head.
    pub on: char,
    /// The state the machine moves to.
    pub to: State,
    /// The symbol written under the head.
    pub write: char,
    /// Where the head moves afterwards.
    pub direction: Direction,
}

impl Transition {
    /// Renders the transition as `∂(from, on) = (to, write, direction)`.
    pub fn render(&self, from: State) -> String {
        format!(
            "∂({}, {}) = ({}, {}, {})",
            from, self.on, self.to, self.write, self.direction
        )
    }
}

/// A finished, read-only Turing machine definition.
#[derive(Debug, Clone, PartialEq)]
pub struct MachineDefinition {
    pub start: State,
    pub accept: State,
    pub reject: State,
    /// The declared tape alphabet, in the order it was typed. Never contains the blank.
    pub alphabet: Vec<char>,
    pub table: TransitionTable,
}

/// Represents the errors that can occur while building or writing a machine definition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WizardError {
    /// Indicates user input that does not satisfy a builder constraint.
    #[error("{0}")]
    InvalidArgument(String),
    /// Indicates a reference to a state outside the declared state set.
    #[error("Invalid state: {0}")]
    InvalidState(String),
    /// Indicates that `finalize` was called before a required field was set.
    #[error("Machine definition is missing its {0}")]
    MissingField(&'static str),
    /// Indicates that the interactive prompt itself failed, e.g. the input stream closed.
    #[error("Prompt error: {0}")]
    PromptError(String),
    /// Indicates an error opening or writing the output file.
    #[error("File error: {0}")]
    FileError(String),
    /// Indicates that the definition could not be encoded as JSON.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_serialization() {
        let left_json = serde_json::to_string(&Direction::Left).unwrap();
        let right_json = serde_json::to_string(&Direction::Right).unwrap();

        assert_eq!(left_json, "\"L\"");
        assert_eq!(right_json, "\"R\"");

        let left: Direction = serde_json::from_str(&left_json).unwrap();
        assert_eq!(left, Direction::Left);
    }

    #[test]
    fn test_state_serializes_as_string() {
        let json = serde_json::to_string(&State::new(12)).unwrap();
        assert_eq!(json, "\"12\"");

        let state: State = serde_json::from_str("\"7\"").unwrap();
        assert_eq!(state, State::new(7));
        assert!(serde_json::from_str::<State>("\"q0\"").is_err());
    }

    #[test]
    fn test_states_order_numerically() {
        assert!(State::new(2) < State::new(10));
    }

    #[test]
    fn test_transition_render() {
        let transition = Transition {
            on: '1',
            to: State::new(2),
            write: BLANK_SYMBOL,
            direction: Direction::Left,
        };

        assert_eq!(transition.render(State::new(0)), "∂(0, 1) = (2, _, L)");
    }

    #[test]
    fn test_error_display() {
        let error = WizardError::InvalidState("9".to_string());
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Invalid state"));
        assert!(error_msg.contains('9'));

        let error = WizardError::InvalidArgument("Input must be >=2.".to_string());
        assert_eq!(error.to_string(), "Input must be >=2.");
    }
}
