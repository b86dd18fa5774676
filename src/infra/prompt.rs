//! Interactive questions on the terminal.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Asks the user a question and returns the answer.
pub trait Prompt {
    /// Prints `question` and reads one line.
    ///
    /// Returns `None` when input is closed (e.g. Ctrl-D). The line ending is
    /// stripped, nothing else is.
    fn ask(&mut self, question: &str) -> io::Result<Option<String>>;

    /// True only for an answer of exactly `y`.
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        Ok(self.ask(question)?.as_deref() == Some("y"))
    }
}

/// Prompt reading from standard input.
#[derive(Debug, Default)]
pub struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout();
        write!(stdout, "{question}")?;
        stdout.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            println!();
            return Ok(None);
        }
        Ok(Some(strip_line_ending(&line).to_string()))
    }
}

fn strip_line_ending(line: &str) -> &str {
    line.strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(line)
}

/// Prompt answering from a fixed list, for tests and scripted use.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<String>,
    questions: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            questions: Vec::new(),
        }
    }

    /// Questions asked so far.
    pub fn questions(&self) -> &[String] {
        &self.questions
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        self.questions.push(question.to_string());
        Ok(self.answers.pop_front())
    }
}
