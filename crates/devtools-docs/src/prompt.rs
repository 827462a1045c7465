//! # Interactive Prompts
//!
//! Line-oriented questions on any `BufRead`/`Write` pair. The binary uses
//! the process's stdin/stdout; tests feed scripted answers through
//! `std::io::Cursor`.

use std::io::{self, BufRead, Write};

/// Asks questions and reads one-line answers.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<io::StdinLock<'static>, io::Stdout> {
    /// Prompter over the process's standard input and output.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask for a value, offering `default`.
    ///
    /// An empty answer (or end of input) keeps the default; anything else
    /// is returned with surrounding whitespace removed.
    pub fn ask(&mut self, label: &str, default: &str) -> io::Result<String> {
        write!(self.output, "{label} [{default}]: ")?;
        self.output.flush()?;

        let answer = self.read_answer()?;
        if answer.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer)
        }
    }

    /// Ask a yes/no question whose default is yes.
    ///
    /// Only `n` or `no` (any case) answer no.
    pub fn confirm(&mut self, question: &str) -> io::Result<bool> {
        write!(self.output, "{question} [Y/n]: ")?;
        self.output.flush()?;

        let answer = self.read_answer()?.to_ascii_lowercase();
        Ok(!matches!(answer.as_str(), "n" | "no"))
    }

    fn read_answer(&mut self) -> io::Result<String> {
        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        if read == 0 {
            // Keep the transcript tidy when stdin is closed.
            writeln!(self.output)?;
        }
        Ok(line.trim().to_string())
    }

    /// Give back the output stream, e.g. to inspect a test transcript.
    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_empty_answer_keeps_default() {
        let mut p = prompter("\n");
        assert_eq!(p.ask("PROJECT_NAME", "iRODS").unwrap(), "iRODS");
        let transcript = String::from_utf8(p.into_output()).unwrap();
        assert_eq!(transcript, "PROJECT_NAME [iRODS]: ");
    }

    #[test]
    fn test_answer_is_trimmed() {
        let mut p = prompter("   4.3.1  \n");
        assert_eq!(p.ask("PROJECT_NUMBER", "4.2.0").unwrap(), "4.3.1");
    }

    #[test]
    fn test_whitespace_only_answer_keeps_default() {
        let mut p = prompter("   \n");
        assert_eq!(p.ask("INPUT", "src").unwrap(), "src");
    }

    #[test]
    fn test_end_of_input_keeps_default() {
        let mut p = prompter("");
        assert_eq!(p.ask("INPUT", "src").unwrap(), "src");
        assert_eq!(p.ask("INPUT", "").unwrap(), "");
    }

    #[test]
    fn test_empty_default_still_prompts() {
        let mut p = prompter("lib\n");
        assert_eq!(p.ask("INPUT", "").unwrap(), "lib");
        let transcript = String::from_utf8(p.into_output()).unwrap();
        assert_eq!(transcript, "INPUT []: ");
    }

    #[test]
    fn test_confirm_defaults_to_yes() {
        for answer in ["\n", "y\n", "YES\n", "sure\n", ""] {
            let mut p = prompter(answer);
            assert!(p.confirm("Reuse?").unwrap(), "answer {answer:?}");
        }
    }

    #[test]
    fn test_confirm_recognizes_negative_answers() {
        for answer in ["n\n", "N\n", "no\n", " No \n", "NO\n"] {
            let mut p = prompter(answer);
            assert!(!p.confirm("Reuse?").unwrap(), "answer {answer:?}");
        }
    }
}
