//! Backend worker: owns the tokio runtime and performs word lookups.

use std::{sync::Arc, thread};

use crossbeam_channel::{Receiver, Sender};
use lookup_client::WordLookup;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    lookup: Arc<dyn WordLookup>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            tracing::debug!("backend worker ready");
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Lookup { query, group_field } => {
                        let event = match lookup.find(query.clone(), group_field.as_deref()).await
                        {
                            Ok(result) => UiEvent::Results(result),
                            Err(err) => {
                                tracing::error!(
                                    word = %query.word,
                                    mode = %query.mode,
                                    "word lookup failed: {err}"
                                );
                                UiEvent::LookupFailed {
                                    error: UiError::from_lookup_error(&err),
                                    query,
                                }
                            }
                        };
                        if ui_tx.send(event).is_err() {
                            break;
                        }
                    }
                    BackendCommand::Shutdown => break,
                }
            }
            tracing::debug!("backend worker stopped");
        });
    })
}
