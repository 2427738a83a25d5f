//! Line-based terminal prompts.
//!
//! Free-text prompts re-ask until the answer validates. Select prompts print a numbered
//! list and accept either the option's text or `#<number>`. A bare number is always read
//! as option text, so typing `2` in a list of states picks state `2` or nothing.

use crossterm::style::Stylize;
use std::io::{BufRead, Write};
use tmwizard::{Prompter, Validator, WizardError};

pub struct TerminalPrompter<R, W> {
    reader: R,
    writer: W,
    styled: bool,
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    /// `styled` turns on bold labels and red validation errors.
    pub fn new(reader: R, writer: W, styled: bool) -> Self {
        Self {
            reader,
            writer,
            styled,
        }
    }

    fn write_label(&mut self, label: &str) -> Result<(), WizardError> {
        let line = if self.styled {
            format!("{} {}", "?".cyan(), label.bold())
        } else {
            format!("? {}", label)
        };
        writeln!(self.writer, "{}", line).map_err(write_error)
    }

    fn write_rejection(&mut self, reason: &str) -> Result<(), WizardError> {
        let line = if self.styled {
            format!("{} {}", "✗".red(), reason.red())
        } else {
            format!("✗ {}", reason)
        };
        writeln!(self.writer, "{}", line).map_err(write_error)
    }

    /// Reads one line without its line ending. End of input is a prompt failure.
    fn read_line(&mut self) -> Result<String, WizardError> {
        write!(self.writer, "> ").map_err(write_error)?;
        self.writer.flush().map_err(write_error)?;

        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .map_err(|e| WizardError::PromptError(format!("Failed to read input: {}", e)))?;
        if read == 0 {
            return Err(WizardError::PromptError("input stream closed".to_string()));
        }

        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(line)
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn input(&mut self, label: &str, validate: Validator<'_>) -> Result<String, WizardError> {
        self.write_label(label)?;
        loop {
            let answer = self.read_line()?;
            match validate(&answer) {
                Ok(()) => return Ok(answer),
                Err(e) => self.write_rejection(&e.to_string())?,
            }
        }
    }

    fn select(&mut self, label: &str, items: &[String]) -> Result<usize, WizardError> {
        if items.is_empty() {
            return Err(WizardError::PromptError(format!(
                "Nothing to choose for: {}",
                label
            )));
        }

        self.write_label(label)?;
        for (i, item) in items.iter().enumerate() {
            writeln!(self.writer, "  #{} {}", i + 1, item).map_err(write_error)?;
        }

        loop {
            let answer = self.read_line()?;
            if let Some(index) = pick(items, answer.trim()) {
                return Ok(index);
            }
            self.write_rejection(&format!(
                "Type one of the options above, or #1 to #{}.",
                items.len()
            ))?;
        }
    }

    fn message(&mut self, line: &str) -> Result<(), WizardError> {
        writeln!(self.writer, "{}", line).map_err(write_error)
    }
}

/// Resolves an answer to an option: `#<n>` for the n-th option, otherwise the option's
/// text with or without a trailing `" (note)"`.
fn pick(items: &[String], answer: &str) -> Option<usize> {
    if answer.is_empty() {
        return None;
    }
    if let Some(index) = items.iter().position(|item| item == answer) {
        return Some(index);
    }
    if let Some(number) = answer.strip_prefix('#') {
        return number
            .parse::<usize>()
            .ok()
            .filter(|number| (1..=items.len()).contains(number))
            .map(|number| number - 1);
    }

    items
        .iter()
        .position(|item| item.split(" (").next() == Some(answer))
}

fn write_error(e: std::io::Error) -> WizardError {
    WizardError::PromptError(format!("Failed to write to terminal: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tmwizard::parse_state_count;

    fn prompter(input: &str) -> TerminalPrompter<Cursor<Vec<u8>>, Vec<u8>> {
        TerminalPrompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), false)
    }

    fn output(prompter: TerminalPrompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(prompter.writer).unwrap()
    }

    fn items(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_input_reprompts_until_valid() {
        let mut p = prompter("x\n1\n4\n");

        let answer = p
            .input("How many?", &|s: &str| parse_state_count(s).map(|_| ()))
            .unwrap();

        assert_eq!(answer, "4");
        let out = output(p);
        assert!(out.contains("? How many?"));
        assert!(out.contains("✗ Invalid positive integer."));
        assert!(out.contains("✗ Input must be >=2."));
    }

    #[test]
    fn test_input_strips_line_endings_only() {
        let mut p = prompter("a b\r\n");
        let answer = p.input("Alphabet?", &|_: &str| Ok(())).unwrap();
        assert_eq!(answer, "a b");
    }

    #[test]
    fn test_closed_input_is_an_error() {
        let mut p = prompter("");
        let result = p.input("Anything?", &|_: &str| Ok(()));
        assert!(matches!(result, Err(WizardError::PromptError(_))));
    }

    #[test]
    fn test_select_by_number_or_text() {
        let options = items(&["Add a transition.", "Finish."]);

        let mut p = prompter("#2\n");
        assert_eq!(p.select("What?", &options).unwrap(), 1);

        let mut p = prompter("Add a transition.\n");
        assert_eq!(p.select("What?", &options).unwrap(), 0);
    }

    #[test]
    fn test_select_lists_numbered_options() {
        let mut p = prompter("9\n\n#3\n1\n");
        let index = p.select("Pick", &items(&["0", "1 (accept)"])).unwrap();

        assert_eq!(index, 1);
        let out = output(p);
        assert!(out.contains("  #1 0"));
        assert!(out.contains("  #2 1 (accept)"));
        assert_eq!(
            out.matches("Type one of the options above, or #1 to #2.").count(),
            3
        );
    }

    #[test]
    fn test_select_never_maps_a_state_to_its_position() {
        // State 1 is the excluded accept state; "1" must not fall through to option one.
        let mut p = prompter("1\n2\n");
        let options = items(&["0", "2"]);
        assert_eq!(p.select("Reject?", &options).unwrap(), 1);
        assert_eq!(output(p).matches("Type one of the options").count(), 1);

        let states = items(&["0", "1 (accept)", "2 (reject)"]);
        let mut p = prompter("3\n");
        assert!(matches!(
            p.select("From?", &states),
            Err(WizardError::PromptError(_))
        ));

        let symbols = items(&["2", "3", "_"]);
        let mut p = prompter("1\n_\n");
        assert_eq!(p.select("On?", &symbols).unwrap(), 2);
    }

    #[test]
    fn test_select_without_options_fails() {
        let mut p = prompter("1\n");
        assert!(p.select("Pick", &[]).is_err());
    }

    #[test]
    fn test_pick() {
        let options = items(&["0", "2 (reject)", "3"]);
        assert_eq!(pick(&options, "3"), Some(2));
        assert_eq!(pick(&options, "2"), Some(1));
        assert_eq!(pick(&options, "2 (reject)"), Some(1));
        assert_eq!(pick(&options, "1"), None);
        assert_eq!(pick(&options, "4"), None);
        assert_eq!(pick(&options, "#1"), Some(0));
        assert_eq!(pick(&options, "#3"), Some(2));
        assert_eq!(pick(&options, "#4"), None);
        assert_eq!(pick(&options, "#0"), None);
        assert_eq!(pick(&options, "x"), None);
        assert_eq!(pick(&options, ""), None);

        let symbols = items(&["#", "a", "_"]);
        assert_eq!(pick(&symbols, "#"), Some(0));
    }
}
