use std::path::PathBuf;

use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use crate::classify::VOCABULARY;

/// Prompt shown for every read.
pub const PROMPT: &str = "mysh> ";

/// One read from the prompt: a line of text, or a control-flow signal.
///
/// Interrupts and end-of-input are not errors; they drive session state
/// transitions and are therefore distinguished from ordinary text.
#[derive(Debug, PartialEq, Eq)]
pub enum ReadEvent {
    Line(String),
    Interrupted,
    EndOfInput,
}

/// Rustyline helper providing tab-completion over the built-in vocabulary.
///
/// Completion candidates come from [`VOCABULARY`] only; aliases and
/// arbitrary OS commands are deliberately not offered. Matching is
/// case-insensitive prefix matching on the word under the cursor, and
/// candidates keep the vocabulary's declared order.
pub struct ShellHelper;

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let start = word_start(line, pos);
        Ok((start, complete_prefix(&line[start..pos])))
    }
}

impl Hinter for ShellHelper {
    type Hint = String;
}

impl Highlighter for ShellHelper {}
impl Validator for ShellHelper {}
impl Helper for ShellHelper {}

/// Start of the word being completed: everything after the last whitespace
/// before the cursor.
fn word_start(line: &str, pos: usize) -> usize {
    line[..pos]
        .rfind(|c: char| c.is_whitespace())
        .map(|i| i + 1)
        .unwrap_or(0)
}

/// Vocabulary entries matching `prefix`, case-insensitively, in declared
/// order.
fn complete_prefix(prefix: &str) -> Vec<Pair> {
    VOCABULARY
        .iter()
        .filter(|cmd| {
            cmd.get(..prefix.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
        })
        .map(|cmd| Pair {
            display: (*cmd).to_owned(),
            replacement: (*cmd).to_owned(),
        })
        .collect()
}

/// Blocking line reader with tab-completion and persistent history.
///
/// History is loaded once at construction from the history path; a missing
/// or unreadable file means "no history" and is never fatal. Every accepted
/// line is recorded in memory, and [`LineSource::persist`] flushes the
/// buffer back to the same path. Callers discard persist errors on purpose:
/// history is best-effort.
pub struct LineSource {
    editor: Editor<ShellHelper, DefaultHistory>,
    history_path: PathBuf,
}

impl LineSource {
    /// Line source backed by `~/.mysh_history`.
    ///
    /// Editor construction is the one fallible initialization step the shell
    /// does not recover from.
    pub fn new() -> anyhow::Result<Self> {
        Self::with_history_path(default_history_path())
    }

    /// Line source persisting history at an explicit path (used by tests).
    pub fn with_history_path(history_path: PathBuf) -> anyhow::Result<Self> {
        let mut editor = Editor::new()?;
        editor.set_helper(Some(ShellHelper));
        let mut source = Self {
            editor,
            history_path,
        };
        let _ = source.editor.load_history(&source.history_path);
        Ok(source)
    }

    /// Block until the user produces a line, an interrupt, or end-of-input.
    pub fn read(&mut self, prompt: &str) -> anyhow::Result<ReadEvent> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                let _ = self.editor.add_history_entry(line.as_str());
                Ok(ReadEvent::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(ReadEvent::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadEvent::EndOfInput),
            Err(err) => Err(err.into()),
        }
    }

    /// Flush in-memory history to the history path.
    pub fn persist(&mut self) -> anyhow::Result<()> {
        self.editor.save_history(&self.history_path)?;
        Ok(())
    }
}

fn default_history_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".mysh_history")
}
