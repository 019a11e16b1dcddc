//! Interactive prompt: reads commands, queues lookups, prints results.

use std::{
    io::{BufRead, Write},
    sync::Arc,
    time::Duration,
};

use anyhow::{anyhow, Result};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use lookup_client::WordLookup;
use tracing::warn;

use crate::backend_bridge::{commands::BackendCommand, runtime};
use crate::controller::{
    events::UiEvent,
    orchestration::dispatch_backend_command,
    state::{parse_input, InputCommand, PageController},
};
use crate::ui::render::{HELP, LOADING};

const COMMAND_QUEUE_CAPACITY: usize = 64;
const EVENT_QUEUE_CAPACITY: usize = 256;

/// Starts the backend worker, runs the prompt until EOF or `quit`, then stops
/// the worker.
pub fn run_interactive<R: BufRead, W: Write>(
    lookup: Arc<dyn WordLookup>,
    controller: PageController,
    reply_timeout: Duration,
    input: R,
    out: &mut W,
) -> Result<()> {
    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(COMMAND_QUEUE_CAPACITY);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(EVENT_QUEUE_CAPACITY);
    let worker = runtime::launch(cmd_rx, ui_tx, lookup);

    let mut repl = Repl {
        cmd_tx,
        ui_rx,
        controller,
        reply_timeout,
    };
    let outcome = repl.run(input, out);

    let _ = dispatch_backend_command(&repl.cmd_tx, BackendCommand::Shutdown);
    drop(repl);
    if worker.join().is_err() {
        warn!("backend worker panicked");
    }
    outcome
}

struct Repl {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    controller: PageController,
    reply_timeout: Duration,
}

impl Repl {
    fn run<R: BufRead, W: Write>(&mut self, mut input: R, out: &mut W) -> Result<()> {
        writeln!(out, "{}", self.controller.saved_line())?;

        loop {
            self.drain_events(out)?;
            write!(out, "> ")?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                break;
            }

            let command = match parse_input(&line) {
                Ok(command) => command,
                Err(err) => {
                    writeln!(out, "{}", err.status_line())?;
                    continue;
                }
            };

            match command {
                InputCommand::Nothing => {}
                InputCommand::Help => writeln!(out, "{HELP}")?,
                InputCommand::Quit => break,
                InputCommand::ShowSaved => writeln!(out, "{}", self.controller.saved_line())?,
                InputCommand::Save(position) => match self.controller.save(position) {
                    Ok(saved_line) => writeln!(out, "{saved_line}")?,
                    Err(err) => writeln!(out, "{}", err.status_line())?,
                },
                InputCommand::Lookup { mode, word } => {
                    let cmd = self.controller.begin_lookup(mode, &word);
                    if let Err(status) = dispatch_backend_command(&self.cmd_tx, cmd) {
                        self.controller.cancel_pending();
                        writeln!(out, "{status}")?;
                        continue;
                    }
                    writeln!(out, "{LOADING}")?;
                    self.await_reply(out)?;
                }
            }
        }

        Ok(())
    }

    fn drain_events<W: Write>(&mut self, out: &mut W) -> Result<()> {
        while let Ok(event) = self.ui_rx.try_recv() {
            if let Some(text) = self.controller.apply(event) {
                writeln!(out, "{text}")?;
            }
        }
        Ok(())
    }

    fn await_reply<W: Write>(&mut self, out: &mut W) -> Result<()> {
        while self.controller.is_waiting() {
            match self.ui_rx.recv_timeout(self.reply_timeout) {
                Ok(event) => {
                    if let Some(text) = self.controller.apply(event) {
                        writeln!(out, "{text}")?;
                    }
                }
                Err(RecvTimeoutError::Timeout) => {
                    warn!(timeout = ?self.reply_timeout, "no reply from backend worker");
                    self.controller.cancel_pending();
                    writeln!(out, "Lookup timed out; previous results kept.")?;
                }
                Err(RecvTimeoutError::Disconnected) => {
                    self.controller.cancel_pending();
                    return Err(anyhow!("backend worker disconnected"));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/repl_tests.rs"]
mod tests;
