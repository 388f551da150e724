use std::sync::Arc;
use log::{error, info};
use tokio::sync::mpsc::Receiver;

use crate::builder::site::{GenerationReport, SiteGenerator};
use crate::builder::watcher::debounce::GenerationRequest;
use crate::utils::error::QuireResult;

/// Something that can rebuild the site from its sources
pub trait Regenerate: Send + Sync + 'static {
    fn regenerate(&self) -> QuireResult<GenerationReport>;
}

impl Regenerate for SiteGenerator {
    fn regenerate(&self) -> QuireResult<GenerationReport> {
        self.generate()
    }
}

/// Run one generation cycle on the blocking pool and log its outcome.
/// Returns whether the cycle succeeded.
pub async fn run_generation<R: Regenerate>(regenerator: &Arc<R>) -> bool {
    let regenerator = Arc::clone(regenerator);
    match tokio::task::spawn_blocking(move || regenerator.regenerate()).await {
        Ok(Ok(report)) => {
            info!(
                "Site generated: {} posts, {} skipped, {} failed, homepage {}",
                report.rendered,
                report.skipped,
                report.failed,
                report.index.as_deref().unwrap_or("none")
            );
            true
        }
        Ok(Err(e)) => {
            error!("Error generating site: {}", e);
            false
        }
        Err(e) => {
            error!("Generation task failed: {}", e);
            false
        }
    }
}

/// Serve generation requests one at a time until the request queue closes.
///
/// Each cycle is awaited before the next request is taken, so two cycles
/// never overlap.
pub async fn run_generation_worker<R: Regenerate>(
    mut requests: Receiver<GenerationRequest>,
    regenerator: Arc<R>,
) {
    while requests.recv().await.is_some() {
        info!("Change detected, regenerating site...");
        run_generation(&regenerator).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::thread::{self, ThreadId};
    use std::time::Duration;
    use tokio::sync::mpsc;
    use crate::utils::error::QuireError;

    #[derive(Default)]
    struct CountingRegenerator {
        calls: AtomicUsize,
        running: AtomicUsize,
        max_running: AtomicUsize,
        fail_first: bool,
    }

    impl Regenerate for CountingRegenerator {
        fn regenerate(&self) -> QuireResult<GenerationReport> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            let running = self.running.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_running.fetch_max(running, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(20));
            self.running.fetch_sub(1, Ordering::SeqCst);

            if self.fail_first && call == 0 {
                return Err(QuireError::TemplateNotFound("default".to_string()));
            }
            Ok(GenerationReport::default())
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_generations_never_overlap() {
        let regenerator = Arc::new(CountingRegenerator::default());
        let (requests_tx, requests_rx) = mpsc::channel(4);
        let worker = tokio::spawn(run_generation_worker(requests_rx, Arc::clone(&regenerator)));

        for _ in 0..4 {
            requests_tx.send(GenerationRequest).await.unwrap();
        }
        drop(requests_tx);
        worker.await.unwrap();

        assert_eq!(regenerator.calls.load(Ordering::SeqCst), 4);
        assert_eq!(regenerator.max_running.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_cycle_keeps_worker_alive() {
        let regenerator = Arc::new(CountingRegenerator {
            fail_first: true,
            ..Default::default()
        });
        let (requests_tx, requests_rx) = mpsc::channel(2);
        let worker = tokio::spawn(run_generation_worker(requests_rx, Arc::clone(&regenerator)));

        requests_tx.send(GenerationRequest).await.unwrap();
        requests_tx.send(GenerationRequest).await.unwrap();
        drop(requests_tx);
        worker.await.unwrap();

        assert_eq!(regenerator.calls.load(Ordering::SeqCst), 2);
    }

    #[derive(Default)]
    struct ThreadRecorder {
        threads: Mutex<Vec<ThreadId>>,
    }

    impl Regenerate for ThreadRecorder {
        fn regenerate(&self) -> QuireResult<GenerationReport> {
            self.threads.lock().unwrap().push(thread::current().id());
            Ok(GenerationReport::default())
        }
    }

    #[tokio::test]
    async fn test_generation_runs_off_the_runtime_thread() {
        let recorder = Arc::new(ThreadRecorder::default());

        assert!(run_generation(&recorder).await);

        let threads = recorder.threads.lock().unwrap();
        assert_eq!(threads.len(), 1);
        assert_ne!(threads[0], thread::current().id());
    }

    #[tokio::test]
    async fn test_failed_generation_is_reported() {
        let regenerator = Arc::new(CountingRegenerator {
            fail_first: true,
            ..Default::default()
        });

        assert!(!run_generation(&regenerator).await);
        assert!(run_generation(&regenerator).await);
    }
}
