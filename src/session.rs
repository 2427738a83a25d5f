//! This module drives an interactive session: it asks for the machine's fields in a fixed
//! order through a [`Prompter`], feeds the answers to a [`MachineBuilder`], and returns the
//! finished definition together with the chosen output path.
//!
//! The order is: number of states, start state, accept state, reject state, tape alphabet,
//! the add/remove transition loop, and finally the output file.

use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::builder::{parse_alphabet, parse_state_count, MachineBuilder};
use crate::table::Insertion;
use crate::types::{Direction, MachineDefinition, State, Transition, WizardError};

/// Validation callback for free-text prompts.
pub type Validator<'a> = &'a dyn Fn(&str) -> Result<(), WizardError>;

/// The user-facing side of a session. Front ends implement this to render prompts.
pub trait Prompter {
    /// Asks for a line of text, re-asking until `validate` accepts it.
    ///
    /// Validation failures are shown to the user and never returned; an `Err` means the
    /// prompt itself failed (for example, the input stream closed).
    fn input(&mut self, label: &str, validate: Validator<'_>) -> Result<String, WizardError>;

    /// Asks the user to pick one of `items` and returns the position of the pick.
    fn select(&mut self, label: &str, items: &[String]) -> Result<usize, WizardError>;

    /// Shows a line of output.
    fn message(&mut self, line: &str) -> Result<(), WizardError>;
}

impl<P: Prompter + ?Sized> Prompter for &mut P {
    fn input(&mut self, label: &str, validate: Validator<'_>) -> Result<String, WizardError> {
        (**self).input(label, validate)
    }

    fn select(&mut self, label: &str, items: &[String]) -> Result<usize, WizardError> {
        (**self).select(label, items)
    }

    fn message(&mut self, line: &str) -> Result<(), WizardError> {
        (**self).message(line)
    }
}

/// A selectable option: what the user sees, and the value it stands for.
#[derive(Debug, Clone, PartialEq)]
pub struct Choice<T> {
    pub label: String,
    pub value: T,
}

impl<T: fmt::Display> Choice<T> {
    /// A choice labelled with the value's display form.
    pub fn plain(value: T) -> Self {
        Self {
            label: value.to_string(),
            value,
        }
    }
}

/// Presents `choices` through `prompter` and returns the value the user picked.
pub fn choose<P, T>(prompter: &mut P, label: &str, choices: Vec<Choice<T>>) -> Result<T, WizardError>
where
    P: Prompter + ?Sized,
{
    let labels: Vec<String> = choices.iter().map(|choice| choice.label.clone()).collect();
    let index = prompter.select(label, &labels)?;

    choices
        .into_iter()
        .nth(index)
        .map(|choice| choice.value)
        .ok_or_else(|| WizardError::PromptError(format!("No option at position {}", index)))
}

/// What the user can do on each pass of the transition loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    AddTransition,
    RemoveTransition,
    Finish,
}

impl MenuAction {
    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::AddTransition => "Add a transition.",
            MenuAction::RemoveTransition => "Remove a transition.",
            MenuAction::Finish => "Finish.",
        }
    }
}

fn plain_choices(states: Vec<State>) -> Vec<Choice<State>> {
    states.into_iter().map(Choice::plain).collect()
}

/// The result of a completed session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOutcome {
    pub machine: MachineDefinition,
    /// Where the user asked the machine to be written.
    pub output: PathBuf,
}

/// An interactive session owning the machine under construction.
pub struct Session<P: Prompter> {
    prompter: P,
    builder: MachineBuilder,
}

impl<P: Prompter> Session<P> {
    pub fn new(prompter: P) -> Self {
        Self {
            prompter,
            builder: MachineBuilder::new(),
        }
    }

    /// Runs every prompt in order and returns the finished machine and output path.
    ///
    /// Any prompt failure aborts the session and discards the machine.
    pub fn run(mut self) -> Result<SessionOutcome, WizardError> {
        info!("starting session");

        self.prompt_states()?;
        self.prompt_start()?;
        self.prompt_accept()?;
        self.prompt_reject()?;
        self.prompt_alphabet()?;
        self.transition_loop()?;

        let machine = self.builder.finalize()?;
        let output = self.prompt_output()?;

        info!(
            transitions = machine.table.len(),
            output = %output.display(),
            "session complete"
        );
        Ok(SessionOutcome { machine, output })
    }

    /// The options for the next pass of the transition loop. Removal is only offered when
    /// there is something to remove.
    pub fn menu(&self) -> Vec<MenuAction> {
        let mut actions = vec![MenuAction::AddTransition];
        if !self.builder.table().is_empty() {
            actions.push(MenuAction::RemoveTransition);
        }
        actions.push(MenuAction::Finish);
        actions
    }

    fn prompt_states(&mut self) -> Result<(), WizardError> {
        let raw = self.prompter.input(
            "How many states in your Turing Machine?",
            &|input: &str| parse_state_count(input).map(|_| ()),
        )?;
        self.builder.initialize(parse_state_count(&raw)?)?;
        Ok(())
    }

    fn prompt_start(&mut self) -> Result<(), WizardError> {
        let choices = plain_choices(self.builder.states().to_vec());
        let start = choose(&mut self.prompter, "Which state is your start state?", choices)?;
        self.builder.set_start(start)
    }

    fn prompt_accept(&mut self) -> Result<(), WizardError> {
        let choices = plain_choices(self.builder.states().to_vec());
        let accept = choose(&mut self.prompter, "Which state is your accept state?", choices)?;
        self.builder.set_accept(accept)
    }

    fn prompt_reject(&mut self) -> Result<(), WizardError> {
        let choices = plain_choices(self.builder.reject_candidates());
        let reject = choose(&mut self.prompter, "Which state is your reject state?", choices)?;
        self.builder.set_reject(reject)
    }

    fn prompt_alphabet(&mut self) -> Result<(), WizardError> {
        let raw = self.prompter.input(
            "What is the tape alphabet? Please enter a sequence of characters, not including '_'",
            &|input: &str| parse_alphabet(input).map(|_| ()),
        )?;
        self.builder.set_alphabet(&raw)?;
        Ok(())
    }

    fn transition_loop(&mut self) -> Result<(), WizardError> {
        loop {
            for line in self.builder.table().render() {
                self.prompter.message(&line)?;
            }

            let choices = self
                .menu()
                .into_iter()
                .map(|action| Choice {
                    label: action.label().to_string(),
                    value: action,
                })
                .collect();

            match choose(&mut self.prompter, "What would you like to do?", choices)? {
                MenuAction::AddTransition => self.prompt_add()?,
                MenuAction::RemoveTransition => self.prompt_remove()?,
                MenuAction::Finish => return Ok(()),
            }
        }
    }

    fn prompt_add(&mut self) -> Result<(), WizardError> {
        let states = self.role_choices();
        let symbols = self.symbol_choices();
        let directions: Vec<Choice<Direction>> = Direction::ALL
            .iter()
            .map(|direction| Choice {
                label: direction.label().to_string(),
                value: *direction,
            })
            .collect();

        let from = choose(&mut self.prompter, "From which state?", states.clone())?;
        let to = choose(&mut self.prompter, "To which state?", states)?;
        let on = choose(
            &mut self.prompter,
            "On what input? '_' for blank",
            symbols.clone(),
        )?;
        let write = choose(
            &mut self.prompter,
            "What symbol does the head write? '_' for blank",
            symbols,
        )?;
        let direction = choose(
            &mut self.prompter,
            "What direction does the head move?",
            directions,
        )?;

        if self.builder.add_transition(from, to, on, write, direction) == Insertion::Duplicate {
            self.prompter.message(&format!(
                "Duplicate transition from state {} on input {}.",
                from, on
            ))?;
        }
        Ok(())
    }

    fn prompt_remove(&mut self) -> Result<(), WizardError> {
        let choices = plain_choices(self.builder.removable_states());
        let from = choose(
            &mut self.prompter,
            "Which state would you like to remove a transition from?",
            choices,
        )?;

        let choices = self
            .builder
            .transitions_from(from)
            .iter()
            .map(|transition| Choice {
                label: transition.render(from),
                value: transition.on,
            })
            .collect();
        let on = choose(
            &mut self.prompter,
            "Which transition would you like to remove?",
            choices,
        )?;

        let removed: Option<Transition> = self.builder.remove_transition(from, on);
        if removed.is_none() {
            debug!(%from, %on, "nothing removed");
        }
        Ok(())
    }

    fn prompt_output(&mut self) -> Result<PathBuf, WizardError> {
        let raw = self.prompter.input(
            "Which file would you like to write your new Turing Machine to?",
            &|input: &str| {
                if input.is_empty() {
                    Err(WizardError::InvalidArgument(
                        "Expecting nonempty string.".to_string(),
                    ))
                } else {
                    Ok(())
                }
            },
        )?;
        Ok(PathBuf::from(raw))
    }

    /// Every declared state, with the accept and reject states marked.
    fn role_choices(&self) -> Vec<Choice<State>> {
        self.builder
            .states()
            .iter()
            .map(|state| {
                let label = if Some(*state) == self.builder.accept() {
                    format!("{} (accept)", state)
                } else if Some(*state) == self.builder.reject() {
                    format!("{} (reject)", state)
                } else {
                    state.to_string()
                };
                Choice {
                    label,
                    value: *state,
                }
            })
            .collect()
    }

    fn symbol_choices(&self) -> Vec<Choice<char>> {
        self.builder.symbols().into_iter().map(Choice::plain).collect()
    }
}
