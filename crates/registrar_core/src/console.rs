//! Line-based console I/O.
//!
//! # Responsibility
//! - Abstract prompt/read and line output so workflows run against stdin/stdout
//!   or a scripted buffer alike.
//!
//! # Invariants
//! - One prompt per logical field, answered by one input line.
//! - End of input is an error, never an empty answer; retry loops therefore
//!   cannot spin on a closed stream.
//! - A line that is not valid UTF-8 is rejected and the prompt repeated; it
//!   never ends the session.

use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, BufRead, Stdin, Stdout, Write};
use std::str::FromStr;

pub type ConsoleResult<T> = Result<T, ConsoleError>;

const NOT_TEXT_MESSAGE: &str = "That line is not valid text.  Try again.";

/// Console transport errors.
#[derive(Debug)]
pub enum ConsoleError {
    Io(io::Error),
    /// Input stream reached end of file while a prompt was pending.
    InputClosed,
    /// A menu with no options was asked for a selection.
    EmptyMenu { title: String },
}

impl Display for ConsoleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "console i/o failed: {err}"),
            Self::InputClosed => write!(f, "console input closed"),
            Self::EmptyMenu { title } => write!(f, "menu `{title}` has nothing to select"),
        }
    }
}

impl Error for ConsoleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::InputClosed | Self::EmptyMenu { .. } => None,
        }
    }
}

impl From<io::Error> for ConsoleError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// Prompt/read/print surface used by menus and workflows.
pub trait Console {
    /// Prints `prompt` without a newline and reads one input line.
    ///
    /// The returned line has its line terminator removed.
    fn read_line(&mut self, prompt: &str) -> ConsoleResult<String>;

    /// Prints `text` followed by a newline.
    fn write_line(&mut self, text: &str) -> ConsoleResult<()>;
}

/// Console over any buffered reader and writer.
pub struct TextConsole<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TextConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Returns the writer, e.g. to inspect a captured transcript.
    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl TextConsole<io::BufReader<Stdin>, Stdout> {
    /// Console bound to the process stdin/stdout.
    pub fn stdio() -> Self {
        Self::new(io::BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console for TextConsole<R, W> {
    fn read_line(&mut self, prompt: &str) -> ConsoleResult<String> {
        loop {
            write!(self.output, "{prompt}")?;
            self.output.flush()?;

            let mut raw = Vec::new();
            if self.input.read_until(b'\n', &mut raw)? == 0 {
                return Err(ConsoleError::InputClosed);
            }
            match String::from_utf8(raw) {
                Ok(mut line) => {
                    let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
                    line.truncate(trimmed_len);
                    return Ok(line);
                }
                Err(err) => {
                    warn!(
                        "event=console_read module=console status=rejected reason=invalid_utf8 bytes={}",
                        err.as_bytes().len()
                    );
                    writeln!(self.output, "{NOT_TEXT_MESSAGE}")?;
                }
            }
        }
    }

    fn write_line(&mut self, text: &str) -> ConsoleResult<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }
}

/// Reads lines until one parses as `T`, printing `invalid_message` after each
/// rejected line. Surrounding whitespace is ignored.
pub fn read_parsed<C, T>(console: &mut C, prompt: &str, invalid_message: &str) -> ConsoleResult<T>
where
    C: Console + ?Sized,
    T: FromStr,
{
    loop {
        let line = console.read_line(prompt)?;
        match line.trim().parse::<T>() {
            Ok(value) => return Ok(value),
            Err(_) => console.write_line(invalid_message)?,
        }
    }
}
