//! Line-based interactive questions
//!
//! Every question is an explicit loop with a bounded number of attempts.
//! End of input cancels the question instead of failing.

use std::fmt::Display;
use std::io::{BufRead, Write};

use anyhow::{bail, Result};
use log::warn;

/// Asks questions on `output` and reads answers from `input`
pub struct Prompter<R, W> {
    input: R,
    output: W,
    max_attempts: u32,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W, max_attempts: u32) -> Self {
        Self {
            input,
            output,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Where results are printed between questions
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Ask until `parse` accepts the trimmed answer
    ///
    /// Returns `Ok(None)` on end of input, or on an empty answer when
    /// `empty_cancels` is set. Fails once `max_attempts` answers were
    /// rejected.
    pub fn ask<T, E, F>(&mut self, question: &str, empty_cancels: bool, mut parse: F) -> Result<Option<T>>
    where
        E: Display,
        F: FnMut(&str) -> Result<T, E>,
    {
        writeln!(self.output, "{}", question)?;

        for attempt in 1..=self.max_attempts {
            self.output.flush()?;
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            let answer = line.trim();
            if answer.is_empty() && empty_cancels {
                return Ok(None);
            }

            match parse(answer) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => {
                    warn!("Rejected answer {:?}: {}", answer, e);
                    writeln!(self.output, "ERROR: {}", e)?;
                    if attempt < self.max_attempts {
                        writeln!(
                            self.output,
                            "Please try again ({} of {} attempts left).",
                            self.max_attempts - attempt,
                            self.max_attempts
                        )?;
                    }
                }
            }
        }

        bail!(
            "Giving up after {} invalid answers to: {}",
            self.max_attempts,
            question.lines().next().unwrap_or(question)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str, attempts: u32) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), attempts)
    }

    fn parse_int(s: &str) -> Result<i32, std::num::ParseIntError> {
        s.parse()
    }

    #[test]
    fn test_first_valid_answer_wins() {
        let mut p = prompter("  42 \n7\n", 3);
        assert_eq!(p.ask("Number?", false, parse_int).unwrap(), Some(42));
    }

    #[test]
    fn test_retries_then_accepts() {
        let mut p = prompter("abc\n\n12\n", 3);
        assert_eq!(p.ask("Number?", false, parse_int).unwrap(), Some(12));
        let text = String::from_utf8(p.output().clone()).unwrap();
        assert_eq!(text.matches("ERROR").count(), 2);
        assert!(text.contains("1 of 3 attempts left"));
    }

    #[test]
    fn test_attempts_are_bounded() {
        let mut p = prompter("a\nb\nc\nd\n", 2);
        let err = p.ask("Number?", false, parse_int).unwrap_err();
        assert!(err.to_string().contains("Giving up after 2"));
    }

    #[test]
    fn test_end_of_input_and_empty_cancel() {
        let mut p = prompter("", 3);
        assert_eq!(p.ask("Number?", false, parse_int).unwrap(), None);

        let mut p = prompter("\n5\n", 3);
        assert_eq!(p.ask("Number?", true, parse_int).unwrap(), None);
    }
}
