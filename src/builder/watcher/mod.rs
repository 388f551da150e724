pub mod fs_watcher;
pub mod debounce;
pub mod worker;

use std::sync::Arc;
use log::info;
use notify::{Event, RecommendedWatcher, RecursiveMode, Result as NotifyResult, Watcher};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::SiteConfig;
use crate::utils::error::QuireResult;

use debounce::debounce;
use fs_watcher::{filter_events, WatchedSources};
use worker::run_generation_worker;

pub use worker::{run_generation, Regenerate};

const RAW_EVENT_CAPACITY: usize = 100;
const TIMESTAMP_CAPACITY: usize = 100;
const REQUEST_CAPACITY: usize = 1;

/// A running watch pipeline. Dropping it stops watching.
pub struct SiteWatcher {
    _watcher: RecommendedWatcher,
    tasks: Vec<JoinHandle<()>>,
}

impl Drop for SiteWatcher {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

/// Watch the posts and templates directories and regenerate the site after
/// every quiet period following a change.
///
/// Must be called from within a tokio runtime.
pub fn start_watcher<R: Regenerate>(
    config: Arc<SiteConfig>,
    regenerator: Arc<R>,
) -> QuireResult<SiteWatcher> {
    let sources = WatchedSources::from_config(&config)?;

    let (events_tx, events_rx) = mpsc::channel(RAW_EVENT_CAPACITY);
    let mut watcher = notify::recommended_watcher(move |res: NotifyResult<Event>| {
        // Only fails once the pipeline has shut down
        let _ = events_tx.blocking_send(res);
    })?;

    watcher.watch(sources.posts_dir(), RecursiveMode::NonRecursive)?;
    watcher.watch(sources.templates_dir(), RecursiveMode::NonRecursive)?;
    info!(
        "Watching {} and {}",
        sources.posts_dir().display(),
        sources.templates_dir().display()
    );

    let (timestamps_tx, timestamps_rx) = mpsc::channel(TIMESTAMP_CAPACITY);
    let (requests_tx, requests_rx) = mpsc::channel(REQUEST_CAPACITY);

    let tasks = vec![
        tokio::spawn(filter_events(events_rx, timestamps_tx, sources)),
        tokio::spawn(debounce(timestamps_rx, requests_tx, config.quiet_period())),
        tokio::spawn(run_generation_worker(requests_rx, regenerator)),
    ];

    Ok(SiteWatcher {
        _watcher: watcher,
        tasks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tempfile::TempDir;
    use crate::builder::site::GenerationReport;

    #[derive(Default)]
    struct Counter(AtomicUsize);

    impl Regenerate for Counter {
        fn regenerate(&self) -> QuireResult<GenerationReport> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(GenerationReport::default())
        }
    }

    fn site() -> (TempDir, SiteConfig) {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("posts")).unwrap();
        fs::create_dir(dir.path().join("templates")).unwrap();
        let config = SiteConfig {
            source: dir.path().to_path_buf(),
            quiet_period_ms: 100,
            ..Default::default()
        };
        (dir, config)
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let config = SiteConfig {
            source: PathBuf::from(dir.path()),
            ..Default::default()
        };

        let result = start_watcher(Arc::new(config), Arc::new(Counter::default()));
        assert!(result.is_err());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_post_change_triggers_generation() {
        let (dir, config) = site();
        let counter = Arc::new(Counter::default());
        let _watcher = start_watcher(Arc::new(config), Arc::clone(&counter)).unwrap();

        fs::write(dir.path().join("posts/hello.md"), "---\n---\nHello\n").unwrap();

        let mut waited = Duration::ZERO;
        while counter.0.load(Ordering::SeqCst) == 0 && waited < Duration::from_secs(10) {
            tokio::time::sleep(Duration::from_millis(50)).await;
            waited += Duration::from_millis(50);
        }
        assert!(counter.0.load(Ordering::SeqCst) >= 1);
    }
}
