//! Numbered text menus.
//!
//! # Responsibility
//! - Render an ordered option list and resolve a typed index to an action.
//! - Build pickers on the fly from persisted records.
//!
//! # Invariants
//! - Option order is display order; option `i` is selected by typing `i + 1`.
//! - `prompt()` only returns actions of listed options; anything else is
//!   reported and re-prompted.
//! - A menu knows nothing about exit semantics; callers compare against
//!   `last_action()`.

use crate::console::{Console, ConsoleError, ConsoleResult};
use log::debug;
use std::fmt::{Display, Formatter};

const SELECTION_PROMPT: &str = "--> ";

/// Immutable label/action pair shown as one menu line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOption<A> {
    label: String,
    action: A,
}

impl<A> MenuOption<A> {
    pub fn new(label: impl Into<String>, action: A) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn action(&self) -> &A {
        &self.action
    }
}

/// Rejected menu input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidSelection {
    pub input: String,
    pub option_count: usize,
}

impl Display for InvalidSelection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Invalid selection `{}`; enter a number from 1 to {}.",
            self.input.trim(),
            self.option_count
        )
    }
}

/// Ordered list of options with a title and a prompt line.
#[derive(Debug, Clone)]
pub struct Menu<A> {
    title: String,
    prompt: String,
    options: Vec<MenuOption<A>>,
}

impl<A: Clone> Menu<A> {
    pub fn new(
        title: impl Into<String>,
        prompt: impl Into<String>,
        options: Vec<MenuOption<A>>,
    ) -> Self {
        Self {
            title: title.into(),
            prompt: prompt.into(),
            options,
        }
    }

    /// Builds one option per record using `formatter`.
    ///
    /// An empty `records` slice yields an empty menu; callers check
    /// `is_empty()` before prompting.
    pub fn from_records<E>(
        title: impl Into<String>,
        prompt: impl Into<String>,
        records: &[E],
        formatter: impl Fn(&E) -> MenuOption<A>,
    ) -> Self {
        Self::new(title, prompt, records.iter().map(formatter).collect())
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn options(&self) -> &[MenuOption<A>] {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Action of the final option, used by callers as the exit sentinel.
    pub fn last_action(&self) -> Option<&A> {
        self.options.last().map(MenuOption::action)
    }

    /// Prints the title, the prompt and every option as `index: label`.
    pub fn render<C: Console + ?Sized>(&self, console: &mut C) -> ConsoleResult<()> {
        console.write_line(&self.title)?;
        console.write_line(&self.prompt)?;
        for (index, option) in self.options.iter().enumerate() {
            console.write_line(&format!("{}: {}", index + 1, option.label))?;
        }
        Ok(())
    }

    /// Resolves one line of input to the action of the chosen option.
    pub fn select(&self, input: &str) -> Result<&A, InvalidSelection> {
        let invalid = || InvalidSelection {
            input: input.to_string(),
            option_count: self.options.len(),
        };
        let index = input.trim().parse::<usize>().map_err(|_| invalid())?;
        index
            .checked_sub(1)
            .and_then(|position| self.options.get(position))
            .map(MenuOption::action)
            .ok_or_else(invalid)
    }

    /// Renders and reads until a valid index is entered, then returns its action.
    ///
    /// # Errors
    /// - `ConsoleError::EmptyMenu` when there is nothing to select.
    /// - Console transport errors, including closed input.
    pub fn prompt<C: Console + ?Sized>(&self, console: &mut C) -> ConsoleResult<A> {
        if self.options.is_empty() {
            return Err(ConsoleError::EmptyMenu {
                title: self.title.clone(),
            });
        }

        loop {
            self.render(console)?;
            let line = console.read_line(SELECTION_PROMPT)?;
            match self.select(&line) {
                Ok(action) => return Ok(action.clone()),
                Err(invalid) => {
                    debug!(
                        "event=menu_select module=menu status=rejected option_count={}",
                        invalid.option_count
                    );
                    console.write_line(&invalid.to_string())?;
                }
            }
        }
    }
}
