// UI layer: everything the workflow shows to or reads from the user goes
// through the `Console` trait, so the prompt loop and the session can be
// driven by a script in tests and by a real terminal in the binary.

use crossterm::style::Stylize;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufRead, IsTerminal, Write};
use std::time::Duration;

/// Line-oriented console used by the prompt engine and the session loop.
pub trait Console {
    /// Show `prompt` and read one line of raw input.
    fn read_line(&mut self, prompt: &str) -> io::Result<String>;

    fn info(&mut self, msg: &str);
    fn success(&mut self, msg: &str);
    fn warn(&mut self, msg: &str);
    fn error(&mut self, msg: &str);

    /// Spinner shown while a network call is in flight.
    fn progress(&self, _msg: &str) -> ProgressBar {
        ProgressBar::hidden()
    }
}

/// Console bound to the process terminal.
///
/// When stdin is a terminal, prompts go through `dialoguer`. When it is piped
/// (scripts, tests) lines are read straight from stdin. Colors are only
/// emitted when stdout is a terminal.
pub struct TerminalConsole {
    interactive: bool,
    colored: bool,
}

impl TerminalConsole {
    pub fn new() -> Self {
        TerminalConsole {
            interactive: io::stdin().is_terminal(),
            colored: io::stdout().is_terminal(),
        }
    }

    fn read_piped(&self, prompt: &str) -> io::Result<String> {
        let mut out = io::stdout().lock();
        if self.colored {
            write!(out, "{}: ", prompt.cyan())?;
        } else {
            write!(out, "{}: ", prompt)?;
        }
        out.flush()?;

        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before the prompt was answered",
            ));
        }
        // Keep the transcript readable when answers are piped in.
        writeln!(out)?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl Default for TerminalConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for TerminalConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        if self.interactive {
            // Validation happens in the prompt engine, so blank answers must
            // reach it instead of being re-asked by dialoguer.
            Input::<String>::new()
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()
        } else {
            self.read_piped(prompt)
        }
    }

    fn info(&mut self, msg: &str) {
        println!("{}", msg);
    }

    fn success(&mut self, msg: &str) {
        if self.colored {
            println!("{}", msg.green());
        } else {
            println!("{}", msg);
        }
    }

    fn warn(&mut self, msg: &str) {
        if self.colored {
            println!("{}", msg.yellow());
        } else {
            println!("{}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        if self.colored {
            println!("{}", msg.red());
        } else {
            println!("{}", msg);
        }
    }

    fn progress(&self, msg: &str) -> ProgressBar {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(msg.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }
}

/// Render a fatal error on stderr, in red when stderr is a terminal.
pub fn print_fatal(msg: &str) {
    if io::stderr().is_terminal() {
        eprintln!("{}", msg.red().bold());
    } else {
        eprintln!("{}", msg);
    }
}
