use crate::classify::{Decision, classify};
use crate::exec::Engine;
use crate::line_source::{LineSource, PROMPT, ReadEvent};
use crate::render::Renderer;

/// One interactive shell session: read, classify, dispatch, loop.
///
/// The session runs on a single synchronous control thread. It is the only
/// writer of the alias table and the history buffer; the execution engine
/// may hand work to background tasks, but those touch nothing beyond the
/// renderer's shared sink.
pub struct Session {
    lines: LineSource,
    engine: Engine,
}

impl Session {
    pub fn new(renderer: Renderer) -> anyhow::Result<Self> {
        Ok(Self {
            lines: LineSource::new()?,
            engine: Engine::new(renderer),
        })
    }

    /// Run until `exit` or end-of-input.
    ///
    /// History is flushed on both normal exits, best-effort. An interrupt
    /// prints a reminder and keeps the session running; it does not flush
    /// history.
    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match self.lines.read(PROMPT)? {
                ReadEvent::Interrupted => {
                    self.engine.renderer().notice("Use 'exit' to quit the shell.");
                }
                ReadEvent::EndOfInput => {
                    self.engine.renderer().notice("Exiting shell.");
                    let _ = self.lines.persist();
                    break;
                }
                ReadEvent::Line(line) => {
                    let Some(decision) = classify(&line, self.engine.aliases()) else {
                        continue;
                    };
                    if decision == Decision::Exit {
                        let _ = self.lines.persist();
                        break;
                    }
                    self.engine.dispatch(decision);
                }
            }
        }
        Ok(())
    }
}
