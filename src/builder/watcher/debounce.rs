use std::time::Duration;
use log::debug;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::mpsc::{Receiver, Sender};
use tokio::time::{self, Instant};

/// Ask the generation worker for a new cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationRequest;

/// Collapse bursts of change timestamps into generation requests.
///
/// A single timer is pushed back to `timestamp + quiet_period` on every
/// change, so a request is only sent once the sources have been quiet for
/// the whole period. Requests that arrive while one is already pending are
/// merged into it.
pub async fn debounce(
    mut timestamps: Receiver<Instant>,
    requests: Sender<GenerationRequest>,
    quiet_period: Duration,
) {
    let timer = time::sleep(quiet_period);
    tokio::pin!(timer);
    let mut armed = false;

    loop {
        tokio::select! {
            biased;

            received = timestamps.recv() => match received {
                Some(at) => {
                    timer.as_mut().reset(at + quiet_period);
                    armed = true;
                }
                None => {
                    if armed {
                        timer.as_mut().await;
                        request_generation(&requests);
                    }
                    break;
                }
            },
            () = &mut timer, if armed => {
                armed = false;
                if !request_generation(&requests) {
                    break;
                }
            }
        }
    }

    debug!("Debouncer stopped");
}

/// Returns false once the worker is gone
fn request_generation(requests: &Sender<GenerationRequest>) -> bool {
    match requests.try_send(GenerationRequest) {
        Ok(()) => {
            debug!("Sources quiet, requesting generation");
            true
        }
        Err(TrySendError::Full(_)) => {
            debug!("Generation already pending");
            true
        }
        Err(TrySendError::Closed(_)) => false,
    }
}
