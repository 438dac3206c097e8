use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use tokio::runtime::Runtime;
use tokio::task::JoinHandle;

use super::messages::{HistoryRequest, HistoryResponse};

use crate::data::HistoryProvider;
use crate::utils::AppInstant;

#[cfg(debug_assertions)]
use crate::config::DF;

/// Spawns the background thread that answers history requests.
///
/// Only the newest request is ever worked on: anything still queued behind it is skipped,
/// and a fetch still in flight when a newer request arrives is aborted. The thread exits
/// when the request channel closes.
pub fn spawn_history_worker(
    rx: Receiver<HistoryRequest>,
    tx: Sender<HistoryResponse>,
    provider: Arc<dyn HistoryProvider>,
) {
    thread::spawn(move || {
        let rt = match Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                log::error!("Failed to create history worker runtime: {}", e);
                return;
            }
        };

        let mut in_flight: Option<JoinHandle<()>> = None;
        while let Ok(req) = rx.recv() {
            let req = newest_request(req, &rx);

            if let Some(handle) = in_flight.take() {
                if !handle.is_finished() {
                    #[cfg(debug_assertions)]
                    if DF.log_history {
                        log::info!("HISTORY: aborting superseded fetch (now gen {})", req.generation);
                    }
                    handle.abort();
                }
            }

            let provider = provider.clone();
            let tx = tx.clone();
            in_flight = Some(rt.spawn(async move {
                let response = process_request(provider.as_ref(), req).await;
                // Err only means the engine is gone.
                let _ = tx.send(response);
            }));
        }
    });
}

/// Collapse everything already queued behind `first` down to the last request.
fn newest_request(first: HistoryRequest, rx: &Receiver<HistoryRequest>) -> HistoryRequest {
    let mut newest = first;
    while let Ok(next) = rx.try_recv() {
        #[cfg(debug_assertions)]
        if DF.log_history {
            log::info!("HISTORY: skipping superseded {} (gen {})", newest.mode, newest.generation);
        }
        newest = next;
    }
    newest
}

/// Run one fetch and package the outcome, echoing the request's tags.
pub async fn process_request(provider: &dyn HistoryProvider, req: HistoryRequest) -> HistoryResponse {
    #[cfg(debug_assertions)]
    if DF.log_history {
        log::info!("HISTORY: fetching {} (gen {})", req.mode, req.generation);
    }

    let start = AppInstant::now();
    let result = provider
        .fetch(req.mode)
        .await
        .map_err(|e| format!("{:#}", e));

    HistoryResponse {
        generation: req.generation,
        mode: req.mode,
        duration_ms: start.elapsed().as_millis(),
        result,
    }
}
