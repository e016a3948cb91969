//! Headless runtime
//!
//! Owns the model, feeds messages through `update`, and executes the
//! returned commands. File I/O runs on its own thread and reports back over
//! a channel; completions are applied one `update` at a time, so a load
//! replaces state atomically.

use std::sync::mpsc::{self, Receiver, Sender};

use crate::commands::Cmd;
use crate::messages::{AppMsg, Msg};
use crate::model::AppModel;
use crate::update::update;

pub struct Runtime {
    pub model: AppModel,
    msg_tx: Sender<Msg>,
    msg_rx: Receiver<Msg>,
    /// Spawned I/O jobs whose completion message hasn't arrived yet
    in_flight: usize,
    /// Set when any processed command asked for a redraw
    needs_redraw: bool,
}

impl Runtime {
    pub fn new(model: AppModel) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        Self {
            model,
            msg_tx,
            msg_rx,
            in_flight: 0,
            needs_redraw: false,
        }
    }

    /// Apply one message and execute whatever it returns
    pub fn dispatch(&mut self, msg: impl Into<Msg>) {
        if let Some(cmd) = update(&mut self.model, msg.into()) {
            if cmd.needs_redraw() {
                self.needs_redraw = true;
            }
            self.process_cmd(cmd);
        }
    }

    fn process_cmd(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            Cmd::Redraw => {}
            Cmd::SaveFile { path, content } => {
                let tx = self.msg_tx.clone();
                self.in_flight += 1;
                std::thread::spawn(move || {
                    let result = std::fs::write(&path, content)
                        .map(|_| path)
                        .map_err(|e| e.to_string());
                    let _ = tx.send(Msg::App(AppMsg::SaveCompleted(result)));
                });
            }
            Cmd::LoadFile { path, purpose } => {
                let tx = self.msg_tx.clone();
                self.in_flight += 1;
                std::thread::spawn(move || {
                    let result = std::fs::read_to_string(&path).map_err(|e| e.to_string());
                    let _ = tx.send(Msg::App(AppMsg::FileLoaded {
                        path,
                        purpose,
                        result,
                    }));
                });
            }
        }
    }

    /// Block until every spawned job (and anything it triggers) is done
    ///
    /// Each job sends exactly one completion, so this returns once the
    /// in-flight count drains.
    pub fn run_until_idle(&mut self) {
        while self.in_flight > 0 {
            let Ok(msg) = self.msg_rx.recv() else {
                tracing::error!(in_flight = self.in_flight, "I/O channel closed");
                self.in_flight = 0;
                break;
            };
            self.in_flight -= 1;
            self.dispatch(msg);
        }
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight == 0
    }

    /// Read and reset the redraw flag
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }
}
