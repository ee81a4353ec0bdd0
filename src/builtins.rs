use argh::FromArgs;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::ShellError;
use crate::exec::{Engine, run_interpreter};
use crate::http;
use crate::render::SyntaxHint;
use crate::task;

/// Built-in commands known to the shell at compile time.
///
/// Builtins are parsed with [`argh`] (`FromArgs`) and executed directly
/// in-process. `run` and `fetch` hand their real work to a background task;
/// everything else completes synchronously before the next prompt.
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Canonical name of the command, e.g. "alias" or "mkdir".
    fn name() -> &'static str;

    /// Execute the command against the engine that dispatched it.
    fn execute(self, engine: &mut Engine) -> Result<(), ShellError>;
}

#[derive(FromArgs)]
/// Define a short name that expands to a longer command string.
pub(crate) struct Alias {
    #[argh(positional)]
    /// name of the alias
    pub name: String,

    #[argh(positional, greedy)]
    /// command the alias expands to
    pub command: Vec<String>,
}

impl BuiltinCommand for Alias {
    fn name() -> &'static str {
        "alias"
    }

    fn execute(self, engine: &mut Engine) -> Result<(), ShellError> {
        if self.command.is_empty() {
            return Err(ShellError::Usage("Usage: alias name command".into()));
        }
        let expansion = self.command.join(" ");
        engine.aliases_mut().define(&self.name, &expansion);
        engine
            .renderer()
            .success(format!("Alias set: {} -> {}", self.name, expansion));
        Ok(())
    }
}

#[derive(FromArgs)]
/// Run an executable script from the current directory on a background task.
pub(crate) struct Run {
    #[argh(positional)]
    /// path to the script to execute
    pub script: String,
}

impl BuiltinCommand for Run {
    fn name() -> &'static str {
        "run"
    }

    fn execute(self, engine: &mut Engine) -> Result<(), ShellError> {
        if !is_executable(Path::new(&self.script)) {
            // Reported synchronously; no task is spawned.
            return Err(ShellError::NotFound(
                "Script not found or not executable.".into(),
            ));
        }
        let renderer = engine.renderer().clone();
        let command = format!("./{}", self.script);
        let _ = task::spawn(move || match run_interpreter(&command) {
            Ok(output) => renderer.render(&output, SyntaxHint::Shell),
            Err(err) => renderer.report(&err),
        });
        Ok(())
    }
}

#[derive(FromArgs)]
/// Create a directory, including any missing parents. Succeeds if it
/// already exists.
pub(crate) struct Mkdir {
    #[argh(positional)]
    /// directory to create
    pub dir: String,
}

impl BuiltinCommand for Mkdir {
    fn name() -> &'static str {
        "mkdir"
    }

    fn execute(self, engine: &mut Engine) -> Result<(), ShellError> {
        fs::create_dir_all(&self.dir)?;
        engine
            .renderer()
            .success(format!("Directory {} created.", self.dir));
        Ok(())
    }
}

#[derive(FromArgs)]
/// Remove a file or an empty directory.
pub(crate) struct Rm {
    #[argh(positional)]
    /// file or directory to remove
    pub target: String,
}

impl BuiltinCommand for Rm {
    fn name() -> &'static str {
        "rm"
    }

    fn execute(self, engine: &mut Engine) -> Result<(), ShellError> {
        let path = Path::new(&self.target);
        if path.is_dir() {
            fs::remove_dir(path).map_err(|err| {
                if err.kind() == ErrorKind::DirectoryNotEmpty {
                    ShellError::NotEmpty(self.target.clone())
                } else {
                    ShellError::Io(err)
                }
            })?;
            engine
                .renderer()
                .success(format!("Directory {} removed.", self.target));
        } else if path.is_file() {
            fs::remove_file(path)?;
            engine
                .renderer()
                .success(format!("File {} removed.", self.target));
        } else {
            return Err(ShellError::NotFound("Target does not exist.".into()));
        }
        Ok(())
    }
}

#[derive(FromArgs)]
/// Fetch a URL on a background task and render the response body.
pub(crate) struct Fetch {
    #[argh(positional)]
    /// URL to fetch
    pub url: String,
}

impl BuiltinCommand for Fetch {
    fn name() -> &'static str {
        "fetch"
    }

    fn execute(self, engine: &mut Engine) -> Result<(), ShellError> {
        let renderer = engine.renderer().clone();
        let _ = task::spawn(move || match http::get(&self.url) {
            Ok(body) => renderer.render(&body, SyntaxHint::Html),
            Err(err) => renderer.report(&err),
        });
        Ok(())
    }
}

/// Whether `path` names an existing file the current user may execute.
fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        match fs::metadata(path) {
            Ok(meta) => meta.permissions().mode() & 0o111 != 0,
            Err(_) => false,
        }
    }
    #[cfg(not(unix))]
    {
        path.exists()
    }
}
