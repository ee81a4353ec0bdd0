use argh::{EarlyExit, FromArgs};
use std::process::{Command, ExitStatus};

use crate::alias::AliasTable;
use crate::builtins::{self, BuiltinCommand};
use crate::classify::{BuiltinKind, Decision};
use crate::error::ShellError;
use crate::render::{Renderer, SyntaxHint};
use crate::task;

/// Executes classified commands: built-in actions synchronously on the
/// calling thread, passthrough / `run` / `fetch` on background tasks.
///
/// The engine owns the session's [`AliasTable`] and a handle to the
/// [`Renderer`]; every failure is converted into a rendered message here and
/// never propagates to the session loop.
pub struct Engine {
    aliases: AliasTable,
    renderer: Renderer,
}

impl Engine {
    pub fn new(renderer: Renderer) -> Self {
        Self {
            aliases: AliasTable::new(),
            renderer,
        }
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub(crate) fn aliases_mut(&mut self) -> &mut AliasTable {
        &mut self.aliases
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Execute one classified decision.
    pub fn dispatch(&mut self, decision: Decision) {
        match decision {
            // The session loop terminates on Exit before calling dispatch.
            Decision::Exit => {}
            Decision::Builtin(kind, args) => match kind {
                BuiltinKind::Alias => self.run_builtin::<builtins::Alias>(&args),
                BuiltinKind::Run => self.run_builtin::<builtins::Run>(&args),
                BuiltinKind::Mkdir => self.run_builtin::<builtins::Mkdir>(&args),
                BuiltinKind::Rm => self.run_builtin::<builtins::Rm>(&args),
                BuiltinKind::Fetch => self.run_builtin::<builtins::Fetch>(&args),
            },
            Decision::Alias(expansion) => match run_interpreter(&expansion) {
                Ok(output) => self.renderer.render(&output, SyntaxHint::Shell),
                Err(err) => self.renderer.report(&err),
            },
            Decision::Passthrough(line) => {
                let renderer = self.renderer.clone();
                let _ = task::spawn(move || match run_interpreter(&line) {
                    Ok(output) => renderer.render(&output, SyntaxHint::Shell),
                    Err(err) => renderer.report(&err),
                });
            }
        }
    }

    /// Parse `args` with argh and execute the built-in. A parse failure
    /// becomes a printed usage message (argh's own text), never an error that
    /// leaves the engine.
    fn run_builtin<T: BuiltinCommand>(&mut self, args: &[String]) {
        let argv: Vec<&str> = args.iter().map(String::as_str).collect();
        match T::from_args(&[T::name()], &argv) {
            Ok(cmd) => {
                if let Err(err) = cmd.execute(self) {
                    self.renderer.report(&err);
                }
            }
            Err(EarlyExit { output, status }) => {
                if status.is_err() {
                    self.renderer.warn(output.trim());
                } else {
                    // --help goes through here with a zero status.
                    self.renderer.notice(output.trim());
                }
            }
        }
    }
}

/// Hand one raw command line to the OS command interpreter and capture its
/// standard output as text.
///
/// A non-zero exit status is an [`ShellError::Execution`] carrying the
/// interpreter's stderr as diagnostic text.
pub fn run_interpreter(line: &str) -> Result<String, ShellError> {
    let output = interpreter_command(line).output()?;
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    if output.status.success() {
        Ok(stdout)
    } else {
        Err(ShellError::Execution {
            status: exit_code(output.status),
            detail: String::from_utf8_lossy(&output.stderr).trim_end().to_owned(),
        })
    }
}

#[cfg(unix)]
fn interpreter_command(line: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(line);
    cmd
}

#[cfg(not(unix))]
fn interpreter_command(line: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(line);
    cmd
}

fn exit_code(status: ExitStatus) -> i32 {
    match status.code() {
        Some(code) => code,
        None => terminated_by_signal(status),
    }
}

#[cfg(unix)]
fn terminated_by_signal(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = ExitStatusExt::signal(&status) {
        128 + signal
    } else if ExitStatusExt::core_dumped(&status) {
        255
    } else {
        -1
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_status: ExitStatus) -> i32 {
    -1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io_adapters::MemWriter;
    use std::sync::{Arc, Mutex};

    fn engine_with_sink() -> (Engine, Arc<Mutex<Vec<u8>>>) {
        let (mw, handle) = MemWriter::with_handle();
        let engine = Engine::new(Renderer::with_sink(Box::new(mw)));
        (engine, handle)
    }

    fn captured(handle: &Arc<Mutex<Vec<u8>>>) -> String {
        String::from_utf8_lossy(&handle.lock().unwrap()).into_owned()
    }

    #[test]
    #[cfg(unix)]
    fn interpreter_captures_stdout() {
        let out = run_interpreter("echo hello").expect("echo should succeed");
        assert_eq!(out, "hello\n");
    }

    #[test]
    #[cfg(unix)]
    fn interpreter_nonzero_exit_is_an_execution_error() {
        let err = run_interpreter("exit 3").expect_err("exit 3 should fail");
        match err {
            ShellError::Execution { status, .. } => assert_eq!(status, 3),
            other => panic!("expected Execution error, got {other:?}"),
        }
    }

    #[test]
    #[cfg(unix)]
    fn interpreter_failure_carries_stderr_diagnostics() {
        let err = run_interpreter("echo oops >&2; exit 1").expect_err("should fail");
        match err {
            ShellError::Execution { detail, .. } => assert!(detail.contains("oops")),
            other => panic!("expected Execution error, got {other:?}"),
        }
    }

    #[test]
    #[cfg(unix)]
    fn defined_alias_runs_like_the_direct_command() {
        let (mut engine, handle) = engine_with_sink();
        engine.dispatch(Decision::Builtin(
            BuiltinKind::Alias,
            vec!["greet".into(), "echo".into(), "hello".into()],
        ));
        let expansion = engine.aliases().resolve("greet").expect("alias defined").to_owned();
        engine.dispatch(Decision::Alias(expansion.clone()));

        let direct = run_interpreter("echo hello").unwrap();
        assert_eq!(run_interpreter(&expansion).unwrap(), direct);

        let out = captured(&handle);
        assert!(out.contains("Alias set: greet -> echo hello"));
        assert!(out.contains("hello"));
    }

    #[test]
    fn alias_with_no_expansion_prints_usage() {
        let (mut engine, handle) = engine_with_sink();
        engine.dispatch(Decision::Builtin(BuiltinKind::Alias, vec!["g".into()]));
        assert!(captured(&handle).contains("Usage: alias name command"));
        assert_eq!(engine.aliases().resolve("g"), None);
    }

    #[test]
    fn builtin_with_missing_argument_prints_arghs_diagnostic() {
        let (mut engine, handle) = engine_with_sink();
        engine.dispatch(Decision::Builtin(BuiltinKind::Mkdir, vec![]));
        assert!(captured(&handle).contains("dir"));
    }

    #[test]
    #[cfg(unix)]
    fn passthrough_output_arrives_from_the_background() {
        let (mw, handle) = MemWriter::with_handle();
        let renderer = Renderer::with_sink(Box::new(mw));
        let line = "echo background".to_owned();
        // Same shape dispatch uses, joined here so the test can observe it.
        task::spawn(move || match run_interpreter(&line) {
            Ok(output) => renderer.render(&output, SyntaxHint::Shell),
            Err(err) => renderer.report(&err),
        })
        .join();
        assert!(captured(&handle).contains("background"));
    }
}
