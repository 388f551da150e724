use std::path::{Path, PathBuf};
use log::{debug, error, trace};
use notify::{Event, EventKind, Result as NotifyResult};
use tokio::sync::mpsc::{Receiver, Sender};
use tokio::time::Instant;

use crate::config::SiteConfig;
use crate::config::defaults::{POST_EXTENSION, TEMPLATE_EXTENSIONS};
use crate::utils::error::QuireResult;

/// The directories whose changes should trigger a new generation
#[derive(Debug, Clone)]
pub struct WatchedSources {
    posts_dir: PathBuf,
    templates_dir: PathBuf,
}

impl WatchedSources {
    pub fn new(posts_dir: PathBuf, templates_dir: PathBuf) -> Self {
        WatchedSources { posts_dir, templates_dir }
    }

    /// Resolve the configured directories to the absolute paths the
    /// watcher reports events with.
    pub fn from_config(config: &SiteConfig) -> QuireResult<Self> {
        Ok(Self::new(
            config.posts_dir().canonicalize()?,
            config.templates_dir().canonicalize()?,
        ))
    }

    pub fn posts_dir(&self) -> &Path {
        &self.posts_dir
    }

    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }

    /// Whether an event touches a post or a template
    pub fn accepts(&self, event: &Event) -> bool {
        // Generation itself reads every source file
        if matches!(event.kind, EventKind::Access(_)) {
            return false;
        }

        event.paths.iter().any(|path| self.is_source(path))
    }

    fn is_source(&self, path: &Path) -> bool {
        let extension = match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) => ext,
            None => return false,
        };

        if path.starts_with(&self.posts_dir) {
            return extension == POST_EXTENSION;
        }
        if path.starts_with(&self.templates_dir) {
            return TEMPLATE_EXTENSIONS.contains(&extension);
        }
        false
    }
}

/// Turn raw watcher results into change timestamps.
///
/// Runs until either side of the pipeline is closed.
pub async fn filter_events(
    mut events: Receiver<NotifyResult<Event>>,
    timestamps: Sender<Instant>,
    sources: WatchedSources,
) {
    while let Some(result) = events.recv().await {
        match result {
            Ok(event) => {
                if !sources.accepts(&event) {
                    trace!("Ignoring file event: {:?}", event);
                    continue;
                }

                debug!("File event: {:?} {:?}", event.kind, event.paths);
                if timestamps.send(Instant::now()).await.is_err() {
                    break;
                }
            }
            Err(e) => error!("Watch error: {}", e),
        }
    }

    debug!("Event filter stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, DataChange, ModifyKind, RemoveKind};
    use tokio::sync::mpsc;

    fn sources() -> WatchedSources {
        WatchedSources::new(PathBuf::from("/site/posts"), PathBuf::from("/site/templates"))
    }

    fn modified(path: &str) -> Event {
        Event::new(EventKind::Modify(ModifyKind::Data(DataChange::Content)))
            .add_path(PathBuf::from(path))
    }

    #[test]
    fn test_accepts_posts_and_templates() {
        let sources = sources();

        assert!(sources.accepts(&modified("/site/posts/hello.md")));
        assert!(sources.accepts(&modified("/site/templates/default.liquid")));
        assert!(sources.accepts(&modified("/site/templates/post.html")));
        assert!(sources.accepts(
            &Event::new(EventKind::Create(CreateKind::File)).add_path(PathBuf::from("/site/posts/new.md"))
        ));
        assert!(sources.accepts(
            &Event::new(EventKind::Remove(RemoveKind::File)).add_path(PathBuf::from("/site/posts/old.md"))
        ));
    }

    #[test]
    fn test_rejects_other_files() {
        let sources = sources();

        assert!(!sources.accepts(&modified("/site/posts/notes.txt")));
        assert!(!sources.accepts(&modified("/site/posts/default.liquid")));
        assert!(!sources.accepts(&modified("/site/templates/draft.md")));
        assert!(!sources.accepts(&modified("/site/posts/.hello.md.swp")));
        assert!(!sources.accepts(&modified("/site/public/hello")));
        assert!(!sources.accepts(&modified("/elsewhere/hello.md")));
    }

    #[test]
    fn test_rejects_access_events() {
        let event = Event::new(EventKind::Access(AccessKind::Any))
            .add_path(PathBuf::from("/site/posts/hello.md"));

        assert!(!sources().accepts(&event));
    }

    #[test]
    fn test_accepts_when_any_path_matches() {
        let event = Event::new(EventKind::Modify(ModifyKind::Any))
            .add_path(PathBuf::from("/site/posts/hello.txt"))
            .add_path(PathBuf::from("/site/posts/hello.md"));

        assert!(sources().accepts(&event));
    }

    #[tokio::test]
    async fn test_filter_forwards_accepted_events() {
        let (events_tx, events_rx) = mpsc::channel(8);
        let (timestamps_tx, mut timestamps_rx) = mpsc::channel(8);
        let filter = tokio::spawn(filter_events(events_rx, timestamps_tx, sources()));

        events_tx.send(Ok(modified("/site/posts/a.md"))).await.unwrap();
        events_tx.send(Ok(modified("/site/posts/a.txt"))).await.unwrap();
        events_tx.send(Err(notify::Error::generic("watch failure"))).await.unwrap();
        events_tx.send(Ok(modified("/site/templates/default.liquid"))).await.unwrap();
        drop(events_tx);

        filter.await.unwrap();

        let mut received = 0;
        while timestamps_rx.recv().await.is_some() {
            received += 1;
        }
        assert_eq!(received, 2);
    }
}
