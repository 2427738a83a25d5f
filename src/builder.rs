//! This module provides the `MachineBuilder`, which holds a machine definition while it is
//! being assembled: the declared states, the start/accept/reject roles, the tape alphabet,
//! and the transition table.

use tracing::{debug, warn};

use crate::table::{Insertion, TransitionTable};
use crate::types::{
    Direction, MachineDefinition, State, Transition, WizardError, BLANK_SYMBOL, MAX_STATES,
    MIN_STATES,
};

/// Parses the user's answer to "how many states?".
///
/// # Returns
///
/// * `Ok(usize)` for a plain decimal integer from 2 to [`MAX_STATES`].
/// * `Err(WizardError::InvalidArgument)` for anything else, including signs and whitespace.
pub fn parse_state_count(input: &str) -> Result<usize, WizardError> {
    let invalid = || WizardError::InvalidArgument("Invalid positive integer.".to_string());

    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let count = input.parse::<u64>().map_err(|_| invalid())?;

    if count < MIN_STATES as u64 {
        return Err(WizardError::InvalidArgument("Input must be >=2.".to_string()));
    }
    if count > MAX_STATES as u64 {
        return Err(too_many_states());
    }

    usize::try_from(count).map_err(|_| invalid())
}

fn too_many_states() -> WizardError {
    WizardError::InvalidArgument(format!("Input must be <={}.", MAX_STATES))
}

/// Parses a raw tape alphabet such as `"01"` into its symbols.
///
/// Every character becomes one symbol, in order, and repeats are kept. The input must be
/// non-empty and must contain neither spaces nor the blank symbol.
pub fn parse_alphabet(input: &str) -> Result<Vec<char>, WizardError> {
    if input.is_empty() {
        return Err(WizardError::InvalidArgument(
            "Input should be nonempty.".to_string(),
        ));
    }
    if input.contains(' ') {
        return Err(WizardError::InvalidArgument(
            "Input should contain no spaces.".to_string(),
        ));
    }
    if input.contains(BLANK_SYMBOL) {
        return Err(WizardError::InvalidArgument(
            "Input should contain no underscores.".to_string(),
        ));
    }

    Ok(input.chars().collect())
}

/// Assembles a [`MachineDefinition`] incrementally.
///
/// State and symbol arguments to [`add_transition`](Self::add_transition) are not
/// re-validated: callers pick them from [`states`](Self::states) and
/// [`symbols`](Self::symbols). The one invariant the builder enforces on its own is that
/// no two transitions share a `(from, on)` pair.
#[derive(Debug, Clone, Default)]
pub struct MachineBuilder {
    states: Vec<State>,
    start: Option<State>,
    accept: Option<State>,
    reject: Option<State>,
    alphabet: Vec<char>,
    table: TransitionTable,
}

impl MachineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `num_states` states, named `"0"` to `"num_states - 1"`. The count must lie
    /// between [`MIN_STATES`] and [`MAX_STATES`].
    ///
    /// Re-initializing discards every role, the alphabet and all transitions.
    pub fn initialize(&mut self, num_states: usize) -> Result<&[State], WizardError> {
        if num_states < MIN_STATES {
            return Err(WizardError::InvalidArgument(
                "Input must be >=2.".to_string(),
            ));
        }
        if num_states > MAX_STATES {
            return Err(too_many_states());
        }

        *self = Self {
            states: (0..num_states).map(State::new).collect(),
            ..Self::default()
        };
        debug!(num_states, "declared states");

        Ok(&self.states)
    }

    pub fn set_start(&mut self, state: State) -> Result<(), WizardError> {
        self.check_declared(state)?;
        self.start = Some(state);
        Ok(())
    }

    /// Sets the accept state. Fails if `state` is already the reject state.
    pub fn set_accept(&mut self, state: State) -> Result<(), WizardError> {
        self.check_declared(state)?;
        if self.reject == Some(state) {
            return Err(WizardError::InvalidArgument(format!(
                "State {} is already the reject state.",
                state
            )));
        }
        self.accept = Some(state);
        Ok(())
    }

    /// Sets the reject state. Fails if `state` is the accept state.
    pub fn set_reject(&mut self, state: State) -> Result<(), WizardError> {
        self.check_declared(state)?;
        if self.accept == Some(state) {
            return Err(WizardError::InvalidArgument(format!(
                "State {} is already the accept state.",
                state
            )));
        }
        self.reject = Some(state);
        Ok(())
    }

    /// Parses and stores the tape alphabet, returning the stored symbols.
    pub fn set_alphabet(&mut self, raw: &str) -> Result<&[char], WizardError> {
        self.alphabet = parse_alphabet(raw)?;
        debug!(alphabet = %raw, "declared tape alphabet");
        Ok(&self.alphabet)
    }

    /// Adds `(from, on) -> (to, write, direction)`.
    ///
    /// Returns [`Insertion::Duplicate`] without touching the table if `from` already has
    /// a transition on `on`.
    pub fn add_transition(
        &mut self,
        from: State,
        to: State,
        on: char,
        write: char,
        direction: Direction,
    ) -> Insertion {
        let transition = Transition {
            on,
            to,
            write,
            direction,
        };
        let rendered = transition.render(from);

        let insertion = self.table.insert(from, transition);
        match insertion {
            Insertion::Added => debug!(transition = %rendered, "added transition"),
            Insertion::Duplicate => warn!(%from, %on, "duplicate transition ignored"),
        }
        insertion
    }

    /// Removes the transition for `(from, on)`. Returns `None` if there is nothing to remove.
    pub fn remove_transition(&mut self, from: State, on: char) -> Option<Transition> {
        let removed = self.table.remove(from, on);
        if let Some(transition) = &removed {
            debug!(transition = %transition.render(from), "removed transition");
        }
        removed
    }

    /// Returns a snapshot of the definition.
    ///
    /// # Returns
    ///
    /// * `Err(WizardError::MissingField)` if a role or the alphabet has not been set yet.
    pub fn finalize(&self) -> Result<MachineDefinition, WizardError> {
        let start = self.start.ok_or(WizardError::MissingField("start state"))?;
        let accept = self.accept.ok_or(WizardError::MissingField("accept state"))?;
        let reject = self.reject.ok_or(WizardError::MissingField("reject state"))?;
        if self.alphabet.is_empty() {
            return Err(WizardError::MissingField("tape alphabet"));
        }

        Ok(MachineDefinition {
            start,
            accept,
            reject,
            alphabet: self.alphabet.clone(),
            table: self.table.clone(),
        })
    }

    /// The declared states, in order.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// The states that may become the reject state: every state except the accept state.
    pub fn reject_candidates(&self) -> Vec<State> {
        self.states
            .iter()
            .copied()
            .filter(|state| Some(*state) != self.accept)
            .collect()
    }

    /// The symbols a transition may read or write: each alphabet symbol once, then the blank.
    pub fn symbols(&self) -> Vec<char> {
        let mut symbols: Vec<char> = Vec::with_capacity(self.alphabet.len() + 1);
        for symbol in &self.alphabet {
            if !symbols.contains(symbol) {
                symbols.push(*symbol);
            }
        }
        symbols.push(BLANK_SYMBOL);
        symbols
    }

    /// The states with at least one transition that could be removed.
    pub fn removable_states(&self) -> Vec<State> {
        self.table.states()
    }

    pub fn transitions_from(&self, from: State) -> &[Transition] {
        self.table.transitions_from(from)
    }

    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    pub fn start(&self) -> Option<State> {
        self.start
    }

    pub fn accept(&self) -> Option<State> {
        self.accept
    }

    pub fn reject(&self) -> Option<State> {
        self.reject
    }

    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    fn check_declared(&self, state: State) -> Result<(), WizardError> {
        if self.states.contains(&state) {
            Ok(())
        } else {
            Err(WizardError::InvalidState(state.to_string()))
        }
    }
}
