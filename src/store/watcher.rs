//! Settings File Watcher
//!
//! Keeps a live copy of the pager settings stored in a [`FileStore`] and
//! notifies subscribers when the file changes on disk.

use super::FileStore;
use crate::content_type::ContentTypeRegistry;
use crate::service::SettingsService;
use crate::settings::PagerSettings;
use crate::Result;
use anyhow::{bail, Context};
use notify::{Config as NotifyConfig, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::sync::{broadcast, RwLock};
use tokio_stream::wrappers::BroadcastStream;
use tracing::{debug, error, info, warn};

/// Settings changed on disk
#[derive(Debug, Clone)]
pub struct SettingsChangeEvent {
    pub settings: Arc<PagerSettings>,
    pub timestamp: SystemTime,
    pub path: PathBuf,
}

/// Watches the settings file of a [`FileStore`]
pub struct SettingsWatcher<R> {
    service: Arc<SettingsService<R, FileStore>>,
    current: Arc<RwLock<PagerSettings>>,
    change_sender: broadcast::Sender<SettingsChangeEvent>,
    _watcher: RecommendedWatcher,
}

impl<R> SettingsWatcher<R>
where
    R: ContentTypeRegistry + Send + Sync + 'static,
{
    /// Load the current settings and start watching the store file.
    ///
    /// `debounce` is how long to wait after a file event before re-reading,
    /// so a write in progress is not picked up half way.
    pub fn new(service: SettingsService<R, FileStore>, debounce: Duration) -> Result<Self> {
        let (change_sender, _) = broadcast::channel(100);

        let initial = service
            .load_settings()
            .context("Failed to load initial pager settings")?;
        let current = Arc::new(RwLock::new(initial));
        let service = Arc::new(service);

        let store_path = service.store().path().to_path_buf();
        let watch_dir = match store_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            Some(_) => PathBuf::from("."),
            None => bail!("Settings file has no parent directory: {}", store_path.display()),
        };
        std::fs::create_dir_all(&watch_dir)
            .with_context(|| format!("Failed to create directory: {}", watch_dir.display()))?;

        let sender_clone = change_sender.clone();
        let current_clone = current.clone();
        let service_clone = service.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => Self::handle_file_event(
                    event,
                    &service_clone,
                    &current_clone,
                    &sender_clone,
                    debounce,
                ),
                Err(e) => error!("Settings watcher error: {}", e),
            },
            NotifyConfig::default(),
        )
        .context("Failed to create file watcher")?;

        // Watch the directory: the store replaces the file by renaming over it
        watcher
            .watch(&watch_dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch directory: {}", watch_dir.display()))?;
        info!("Watching pager settings in {}", store_path.display());

        Ok(Self {
            service,
            current,
            change_sender,
            _watcher: watcher,
        })
    }

    pub fn path(&self) -> &Path {
        self.service.store().path()
    }

    /// Latest successfully loaded settings
    pub async fn get_settings(&self) -> Arc<PagerSettings> {
        let settings = self.current.read().await;
        Arc::new(settings.clone())
    }

    pub fn subscribe(&self) -> BroadcastStream<SettingsChangeEvent> {
        BroadcastStream::new(self.change_sender.subscribe())
    }

    /// Re-read the store now; subscribers are notified if the settings changed
    pub async fn reload(&self) -> Result<()> {
        info!("Reloading pager settings from {}", self.path().display());

        let settings = self
            .service
            .load_settings()
            .with_context(|| format!("Failed to reload {}", self.path().display()))?;

        {
            let mut current = self.current.write().await;
            if *current == settings {
                debug!("Pager settings unchanged");
                return Ok(());
            }
            *current = settings.clone();
        }

        Self::notify(&self.change_sender, settings, self.path());
        Ok(())
    }

    fn notify(
        sender: &broadcast::Sender<SettingsChangeEvent>,
        settings: PagerSettings,
        path: &Path,
    ) {
        let event = SettingsChangeEvent {
            settings: Arc::new(settings),
            timestamp: SystemTime::now(),
            path: path.to_path_buf(),
        };

        if let Err(e) = sender.send(event) {
            debug!("No subscribers for settings change event: {}", e);
        }
    }

    fn handle_file_event(
        event: Event,
        service: &SettingsService<R, FileStore>,
        current: &RwLock<PagerSettings>,
        sender: &broadcast::Sender<SettingsChangeEvent>,
        debounce: Duration,
    ) {
        let store_path = service.store().path();
        let affects_store = event
            .paths
            .iter()
            .any(|path| path.file_name() == store_path.file_name());

        if !affects_store {
            return;
        }

        match event.kind {
            EventKind::Modify(_) | EventKind::Create(_) => {
                std::thread::sleep(debounce);

                match service.load_settings() {
                    Ok(settings) => {
                        {
                            // Runs on the notify thread, outside the runtime
                            let mut guard = current.blocking_write();
                            if *guard == settings {
                                debug!("Settings file touched without changes");
                                return;
                            }
                            *guard = settings.clone();
                        }

                        Self::notify(sender, settings, store_path);
                        info!("Pager settings reloaded from {}", store_path.display());
                    }
                    Err(e) => {
                        error!("Failed to reload pager settings, keeping current: {}", e);
                    }
                }
            }
            EventKind::Remove(_) => {
                warn!("Settings file was removed: {}", store_path.display());
            }
            _ => {
                debug!("Ignoring file event type: {:?}", event.kind);
            }
        }
    }
}
