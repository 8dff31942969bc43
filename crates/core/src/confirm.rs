//! Confirmation gate for destructive operations
//!
//! A blocking yes/no prompt that re-asks indefinitely until the operator
//! answers with one of the accepted tokens. The gate is a trait so that the
//! orchestrator can be driven by an auto-approving gate or a scripted one in
//! tests.

use std::io::{self, BufRead, Write};

/// Gate consulted before a destructive pass
pub trait ConfirmGate {
    /// Ask the operator to confirm; true means proceed
    fn confirm(&mut self, prompt: &str) -> io::Result<bool>;
}

/// Gate that always answers yes without touching the terminal
pub struct AutoApprove;

impl ConfirmGate for AutoApprove {
    fn confirm(&mut self, _prompt: &str) -> io::Result<bool> {
        Ok(true)
    }
}

/// Interactive gate over arbitrary input/output streams
pub struct PromptGate<R, W> {
    input: R,
    output: W,
}

impl PromptGate<io::BufReader<io::Stdin>, io::Stderr> {
    /// Gate bound to the process terminal
    pub fn stdio() -> Self {
        PromptGate {
            input: io::BufReader::new(io::stdin()),
            output: io::stderr(),
        }
    }
}

impl<R: BufRead, W: Write> PromptGate<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> ConfirmGate for PromptGate<R, W> {
    fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        loop {
            write!(self.output, "{prompt} [y/n]: ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                // EOF on stdin counts as a decline
                return Ok(false);
            }

            if let Some(answer) = parse_answer(&line) {
                return Ok(answer);
            }
        }
    }
}

/// Map an input line onto yes/no; anything else re-prompts
fn parse_answer(line: &str) -> Option<bool> {
    match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}
