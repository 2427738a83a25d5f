//! This module provides the `TransitionTable`, the transition function of a machine grouped
//! by origin state. The table guarantees that no two transitions share the same
//! `(from, on)` pair.

use std::collections::BTreeMap;

use crate::types::{State, Transition};

/// The outcome of [`TransitionTable::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// The transition was appended to its origin state's group.
    Added,
    /// A transition for the same `(from, on)` pair already exists; the table is unchanged.
    Duplicate,
}

/// Transitions grouped by origin state.
///
/// Groups iterate in ascending state order; transitions inside a group keep their
/// insertion order. A group never exists without at least one transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionTable {
    rules: BTreeMap<State, Vec<Transition>>,
}

impl TransitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `transition` to the group for `from`, unless a transition on the same
    /// symbol is already defined there.
    pub fn insert(&mut self, from: State, transition: Transition) -> Insertion {
        let group = self.rules.entry(from).or_default();

        if group.iter().any(|existing| existing.on == transition.on) {
            return Insertion::Duplicate;
        }

        group.push(transition);
        Insertion::Added
    }

    /// Removes and returns the transition for `(from, on)`, if one exists.
    pub fn remove(&mut self, from: State, on: char) -> Option<Transition> {
        let group = self.rules.get_mut(&from)?;
        let position = group.iter().position(|transition| transition.on == on)?;
        let removed = group.remove(position);

        if group.is_empty() {
            self.rules.remove(&from);
        }

        Some(removed)
    }

    /// Looks up the transition for `(from, on)`.
    pub fn get(&self, from: State, on: char) -> Option<&Transition> {
        self.rules
            .get(&from)?
            .iter()
            .find(|transition| transition.on == on)
    }

    /// Returns the transitions leaving `from`, in insertion order.
    pub fn transitions_from(&self, from: State) -> &[Transition] {
        self.rules.get(&from).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns the states that have at least one outgoing transition.
    pub fn states(&self) -> Vec<State> {
        self.rules.keys().copied().collect()
    }

    /// Iterates over every group as `(from, transitions)`.
    pub fn iter(&self) -> impl Iterator<Item = (State, &[Transition])> {
        self.rules
            .iter()
            .map(|(from, transitions)| (*from, transitions.as_slice()))
    }

    /// Renders every transition as `∂(from, on) = (to, write, direction)`, one per entry.
    pub fn render(&self) -> Vec<String> {
        self.iter()
            .flat_map(|(from, transitions)| {
                transitions
                    .iter()
                    .map(move |transition| transition.render(from))
            })
            .collect()
    }

    /// Total number of transitions across all states.
    pub fn len(&self) -> usize {
        self.rules.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
