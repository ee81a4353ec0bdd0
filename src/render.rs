use std::io::Write;
use std::sync::{Arc, Mutex, OnceLock};

use owo_colors::OwoColorize;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::{LinesWithEndings, as_24_bit_terminal_escaped};

use crate::error::ShellError;

/// Which highlighting grammar to apply to a block of captured text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxHint {
    /// Command output; styled as shell text, no line numbers.
    Shell,
    /// Fetched page markup; styled as HTML with line numbers.
    Html,
}

impl SyntaxHint {
    fn token(self) -> &'static str {
        match self {
            SyntaxHint::Shell => "bash",
            SyntaxHint::Html => "html",
        }
    }

    fn line_numbers(self) -> bool {
        matches!(self, SyntaxHint::Html)
    }
}

/// Highlighting assets, loaded once per process.
struct Assets {
    syntax_set: SyntaxSet,
    theme: Theme,
}

fn assets() -> &'static Assets {
    static ASSETS: OnceLock<Assets> = OnceLock::new();
    ASSETS.get_or_init(|| {
        let syntax_set = SyntaxSet::load_defaults_newlines();
        let mut theme_set = ThemeSet::load_defaults();
        let theme = theme_set
            .themes
            .remove("base16-eighties.dark")
            .or_else(|| {
                let key = theme_set.themes.keys().next().cloned()?;
                theme_set.themes.remove(&key)
            })
            .unwrap_or_default();
        Assets { syntax_set, theme }
    })
}

/// Presentation sink for everything the shell prints.
///
/// All output goes through one shared writer guarded by a mutex, so a
/// background task's rendered block comes out whole rather than interleaved
/// line-by-line with another task's. Rendering never fails the caller:
/// write errors on the sink are discarded.
///
/// Cloning is cheap and shares the sink; background tasks each carry a
/// clone.
#[derive(Clone)]
pub struct Renderer {
    sink: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Renderer {
    /// A renderer writing to the process's standard output.
    pub fn stdout() -> Self {
        Self::with_sink(Box::new(std::io::stdout()))
    }

    /// A renderer writing to an arbitrary sink (used by tests to capture
    /// output).
    pub fn with_sink(sink: Box<dyn Write + Send>) -> Self {
        Self {
            sink: Arc::new(Mutex::new(sink)),
        }
    }

    /// Pretty-print a block of captured text with syntax highlighting.
    pub fn render(&self, text: &str, hint: SyntaxHint) {
        if text.is_empty() {
            return;
        }
        let highlighted = highlight(text, hint);
        if let Ok(mut sink) = self.sink.lock() {
            let _ = write!(sink, "{highlighted}");
            let _ = sink.flush();
        }
    }

    /// Red failure line.
    pub fn error(&self, message: impl AsRef<str>) {
        self.line(&format!("{}", message.as_ref().red()));
    }

    /// Yellow usage/warning line.
    pub fn warn(&self, message: impl AsRef<str>) {
        self.line(&format!("{}", message.as_ref().yellow()));
    }

    /// Green success/info line.
    pub fn success(&self, message: impl AsRef<str>) {
        self.line(&format!("{}", message.as_ref().green()));
    }

    /// Cyan status line.
    pub fn notice(&self, message: impl AsRef<str>) {
        self.line(&format!("{}", message.as_ref().cyan()));
    }

    /// Bold green welcome banner.
    pub fn banner(&self, message: impl AsRef<str>) {
        self.line(&format!("{}", message.as_ref().green().bold()));
    }

    /// Render an execution failure with the styling its severity calls for:
    /// usage problems are warnings, everything else is an error.
    pub fn report(&self, err: &ShellError) {
        match err {
            ShellError::Usage(message) => self.warn(message),
            other => self.error(other.to_string()),
        }
    }

    fn line(&self, text: &str) {
        if let Ok(mut sink) = self.sink.lock() {
            let _ = writeln!(sink, "{text}");
            let _ = sink.flush();
        }
    }
}

fn highlight(text: &str, hint: SyntaxHint) -> String {
    let assets = assets();
    let syntax = assets
        .syntax_set
        .find_syntax_by_token(hint.token())
        .unwrap_or_else(|| assets.syntax_set.find_syntax_plain_text());
    let mut highlighter = HighlightLines::new(syntax, &assets.theme);

    let mut out = String::new();
    for (idx, line) in LinesWithEndings::from(text).enumerate() {
        if hint.line_numbers() {
            out.push_str(&format!("{:>4} ", idx + 1));
        }
        match highlighter.highlight_line(line, &assets.syntax_set) {
            Ok(ranges) => out.push_str(&as_24_bit_terminal_escaped(&ranges, false)),
            Err(_) => out.push_str(line),
        }
    }
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out.push_str("\x1b[0m");
    out
}
