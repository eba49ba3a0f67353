//! Theme store: owns the dark-mode flag and keeps it in sync with storage
//!
//! A [`ThemeProvider`] is owned by one UI root. Everything below that root
//! reads the theme through a [`ThemeHandle`] cloned from the provider, and can
//! watch for changes with a [`ThemeSubscription`].
//!
//! Changes are optimistic: the in-memory flag flips and subscribers see it
//! before the write to storage starts. Storage failures are logged and never
//! roll the flag back.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

use crate::error::{StorageError, ThemeError};
use crate::storage::KeyValueStore;
use crate::theme::{ColorScheme, ThemeMode, ThemeState};

/// Storage key of the persisted preference
pub const PREFERENCE_KEY: &str = "darkMode";

struct Shared {
    dark: watch::Sender<bool>,
    storage: Arc<dyn KeyValueStore>,
    /// Bumped on every user-driven change, under the watch lock
    generation: AtomicU64,
    /// Generation of the newest write attempted
    written: Arc<Mutex<u64>>,
}

impl Shared {
    fn state(&self) -> ThemeState {
        ThemeState::from_dark(*self.dark.borrow())
    }

    /// Apply a user change, returning the new flag and its generation
    fn apply(&self, change: impl FnOnce(bool) -> bool) -> (bool, u64) {
        let mut value = false;
        let mut generation = 0;
        self.dark.send_modify(|dark| {
            *dark = change(*dark);
            value = *dark;
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        });
        (value, generation)
    }

    fn toggle_checked(&self) -> impl Future<Output = Result<(), StorageError>> + Send + 'static {
        let (is_dark, generation) = self.apply(|dark| !dark);
        tracing::info!("Theme toggled to {}", ThemeMode::from_dark(is_dark).as_str());
        persist(self.storage.clone(), self.written.clone(), generation, Some(is_dark))
    }

    fn toggle(&self) -> impl Future<Output = ()> + Send + 'static {
        let write = self.toggle_checked();
        async move {
            if let Err(e) = write.await {
                tracing::warn!("Failed to persist theme preference: {}", e);
            }
        }
    }
}

async fn persist(
    storage: Arc<dyn KeyValueStore>,
    written: Arc<Mutex<u64>>,
    generation: u64,
    value: Option<bool>,
) -> Result<(), StorageError> {
    let mut newest = written.lock().await;
    if *newest >= generation {
        tracing::debug!("Skipping stale theme write (generation {})", generation);
        return Ok(());
    }
    *newest = generation;
    match value {
        Some(is_dark) => {
            let json = serde_json::to_string(&is_dark)?;
            storage.set(PREFERENCE_KEY, &json).await
        }
        None => storage.remove(PREFERENCE_KEY).await,
    }
}

/// Read the stored preference. Anything other than a JSON boolean is ignored.
async fn read_preference(storage: &dyn KeyValueStore) -> Option<bool> {
    match storage.get(PREFERENCE_KEY).await {
        Ok(Some(raw)) => match serde_json::from_str::<bool>(&raw) {
            Ok(is_dark) => Some(is_dark),
            Err(e) => {
                tracing::warn!("Ignoring malformed theme preference {:?}: {}", raw, e);
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            tracing::warn!("Failed to read theme preference: {}", e);
            None
        }
    }
}

/// Owning scope of the theme state for one UI tree
pub struct ThemeProvider {
    shared: Arc<Shared>,
}

impl ThemeProvider {
    /// Create a provider in light mode. Call [`ThemeProvider::initialize`] or
    /// await [`ThemeProvider::load`] to pick up the stored preference.
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        let (dark, _) = watch::channel(false);
        Self {
            shared: Arc::new(Shared {
                dark,
                storage,
                generation: AtomicU64::new(0),
                written: Arc::new(Mutex::new(0)),
            }),
        }
    }

    /// Handle for consumers below this provider
    pub fn handle(&self) -> ThemeHandle {
        ThemeHandle {
            shared: Arc::downgrade(&self.shared),
        }
    }

    pub fn state(&self) -> ThemeState {
        self.shared.state()
    }

    pub fn is_dark_mode(&self) -> bool {
        *self.shared.dark.borrow()
    }

    pub fn colors(&self) -> &'static ColorScheme {
        self.state().colors
    }

    pub fn subscribe(&self) -> ThemeSubscription {
        ThemeSubscription {
            rx: self.shared.dark.subscribe(),
        }
    }

    /// Future that reads the stored preference and applies it.
    ///
    /// Resolves to nothing if the provider is gone by then, or if the theme was
    /// changed after this call: the user's explicit choice wins over a late load.
    pub fn load(&self) -> impl Future<Output = ()> + Send + 'static {
        let weak = Arc::downgrade(&self.shared);
        let storage = self.shared.storage.clone();
        let generation = self.shared.generation.load(Ordering::SeqCst);
        async move {
            let loaded = read_preference(storage.as_ref()).await;
            let Some(shared) = weak.upgrade() else {
                tracing::debug!("Theme provider dropped before preference loaded");
                return;
            };
            let Some(is_dark) = loaded else {
                return;
            };
            let applied = shared.dark.send_if_modified(|dark| {
                if shared.generation.load(Ordering::SeqCst) != generation || *dark == is_dark {
                    return false;
                }
                *dark = is_dark;
                true
            });
            if applied {
                tracing::info!("Restored {} theme from storage", ThemeMode::from_dark(is_dark).as_str());
            }
        }
    }

    /// Spawn [`ThemeProvider::load`] on the current tokio runtime
    pub fn initialize(&self) -> JoinHandle<()> {
        tokio::spawn(self.load())
    }

    /// Flip the theme now and return the write that persists it.
    ///
    /// Subscribers are notified before this returns. Write errors are logged.
    #[must_use = "the preference is only persisted when the returned future runs"]
    pub fn toggle(&self) -> impl Future<Output = ()> + Send + 'static {
        self.shared.toggle()
    }

    /// Like [`ThemeProvider::toggle`], but the write reports its error instead
    /// of logging it. The flag still stays flipped on failure.
    pub fn toggle_checked(&self) -> impl Future<Output = Result<(), StorageError>> + Send + 'static {
        self.shared.toggle_checked()
    }

    /// Flip the theme and persist in the background
    pub fn toggle_detached(&self) -> JoinHandle<()> {
        tokio::spawn(self.shared.toggle())
    }

    /// Return to light mode and forget the stored preference
    pub fn reset(&self) -> impl Future<Output = Result<(), StorageError>> + Send + 'static {
        let (_, generation) = self.shared.apply(|_| false);
        tracing::info!("Theme preference reset");
        persist(self.shared.storage.clone(), self.shared.written.clone(), generation, None)
    }
}

/// Consumer access to a provider's theme.
///
/// Valid while the issuing [`ThemeProvider`] lives; afterwards every accessor
/// returns [`ThemeError::OutsideProvider`].
#[derive(Clone)]
pub struct ThemeHandle {
    shared: Weak<Shared>,
}

impl ThemeHandle {
    fn scope(&self) -> Result<Arc<Shared>, ThemeError> {
        self.shared.upgrade().ok_or(ThemeError::OutsideProvider)
    }

    pub fn state(&self) -> Result<ThemeState, ThemeError> {
        Ok(self.scope()?.state())
    }

    pub fn is_dark_mode(&self) -> Result<bool, ThemeError> {
        Ok(self.state()?.is_dark_mode)
    }

    pub fn colors(&self) -> Result<&'static ColorScheme, ThemeError> {
        Ok(self.state()?.colors)
    }

    pub fn toggle(&self) -> Result<impl Future<Output = ()> + Send + 'static, ThemeError> {
        Ok(self.scope()?.toggle())
    }

    pub fn subscribe(&self) -> Result<ThemeSubscription, ThemeError> {
        Ok(ThemeSubscription {
            rx: self.scope()?.dark.subscribe(),
        })
    }
}

/// Receives every theme change of one provider
#[derive(Debug, Clone)]
pub struct ThemeSubscription {
    rx: watch::Receiver<bool>,
}

impl ThemeSubscription {
    pub fn current(&self) -> ThemeState {
        ThemeState::from_dark(*self.rx.borrow())
    }

    /// Whether a change arrived since the last [`ThemeSubscription::changed`]
    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }

    /// Wait for the next change. `None` once the provider is dropped.
    pub async fn changed(&mut self) -> Option<ThemeState> {
        self.rx.changed().await.ok()?;
        Some(ThemeState::from_dark(*self.rx.borrow_and_update()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStore, MemoryStore};
    use crate::theme::{DARK, LIGHT};

    fn provider_with(store: &Arc<MemoryStore>) -> ThemeProvider {
        ThemeProvider::new(store.clone())
    }

    #[tokio::test]
    async fn test_toggle_parity() {
        let store = Arc::new(MemoryStore::new());
        let provider = provider_with(&store);
        for n in 1..=7 {
            provider.toggle().await;
            assert_eq!(provider.is_dark_mode(), n % 2 == 1);
        }
        assert_eq!(store.peek(PREFERENCE_KEY).as_deref(), Some("true"));
    }

    #[tokio::test]
    async fn test_toggle_is_visible_before_write() {
        let store = Arc::new(MemoryStore::new());
        let provider = provider_with(&store);

        let write = provider.toggle();
        assert!(provider.is_dark_mode());
        assert!(std::ptr::eq(provider.colors(), &DARK));
        assert_eq!(store.peek(PREFERENCE_KEY), None);

        write.await;
        assert_eq!(store.get(PREFERENCE_KEY).await.unwrap().as_deref(), Some("true"));
    }

    #[tokio::test]
    async fn test_load_stored_dark() {
        let store = Arc::new(MemoryStore::with_value(PREFERENCE_KEY, "true"));
        let provider = provider_with(&store);
        assert!(!provider.is_dark_mode());

        provider.initialize().await.unwrap();
        let state = provider.state();
        assert!(state.is_dark_mode);
        assert!(std::ptr::eq(state.colors, &DARK));
    }

    #[tokio::test]
    async fn test_load_first_run_stays_light() {
        let store = Arc::new(MemoryStore::new());
        let provider = provider_with(&store);
        provider.load().await;
        assert!(!provider.is_dark_mode());
        assert!(std::ptr::eq(provider.colors(), &LIGHT));
    }

    #[tokio::test]
    async fn test_load_malformed_falls_back_to_light() {
        for raw in ["not json", "\"yes\"", "null", "1", ""] {
            let store = Arc::new(MemoryStore::with_value(PREFERENCE_KEY, raw));
            let provider = provider_with(&store);
            provider.load().await;
            assert!(!provider.is_dark_mode(), "value {:?}", raw);
        }
    }

    #[tokio::test]
    async fn test_load_read_failure_falls_back_to_light() {
        let store = Arc::new(MemoryStore::with_value(PREFERENCE_KEY, "true"));
        store.set_fail_reads(true);
        let provider = provider_with(&store);
        provider.load().await;
        assert!(!provider.is_dark_mode());
    }

    #[tokio::test]
    async fn test_toggle_before_load_wins() {
        let store = Arc::new(MemoryStore::with_value(PREFERENCE_KEY, "false"));
        let provider = provider_with(&store);

        let load = provider.load();
        provider.toggle().await;
        load.await;

        assert!(provider.is_dark_mode());
    }

    #[tokio::test]
    async fn test_load_after_drop_is_ignored() {
        let store = Arc::new(MemoryStore::with_value(PREFERENCE_KEY, "true"));
        let provider = provider_with(&store);
        let handle = provider.handle();
        let load = provider.load();
        drop(provider);

        load.await;
        assert!(matches!(handle.state(), Err(ThemeError::OutsideProvider)));
    }

    #[tokio::test]
    async fn test_failed_write_keeps_new_state() {
        let store = Arc::new(MemoryStore::new());
        store.set_fail_writes(true);
        let provider = provider_with(&store);

        provider.toggle().await;
        assert!(provider.is_dark_mode());
        assert_eq!(store.peek(PREFERENCE_KEY), None);

        store.set_fail_writes(false);
        provider.toggle().await;
        assert_eq!(store.peek(PREFERENCE_KEY).as_deref(), Some("false"));
    }

    #[tokio::test]
    async fn test_stale_write_is_skipped() {
        let store = Arc::new(MemoryStore::new());
        let provider = provider_with(&store);

        let first = provider.toggle();
        let second = provider.toggle();
        second.await;
        first.await;

        assert!(!provider.is_dark_mode());
        assert_eq!(store.peek(PREFERENCE_KEY).as_deref(), Some("false"));
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn test_subscribers_see_toggle_synchronously() {
        let store = Arc::new(MemoryStore::new());
        let provider = provider_with(&store);
        let mut sub = provider.subscribe();
        assert!(!sub.has_changed());

        let _write = provider.toggle();
        assert!(sub.has_changed());
        let state = sub.changed().await.unwrap();
        assert!(state.is_dark_mode);
        assert!(std::ptr::eq(sub.current().colors, &DARK));
    }

    #[tokio::test]
    async fn test_subscription_ends_with_provider() {
        let provider = ThemeProvider::new(Arc::new(MemoryStore::new()));
        let mut sub = provider.subscribe();
        drop(provider);
        assert!(sub.changed().await.is_none());
    }

    #[tokio::test]
    async fn test_handle_outside_provider_reports_misuse() {
        let provider = ThemeProvider::new(Arc::new(MemoryStore::new()));
        let handle = provider.handle();
        assert!(!handle.is_dark_mode().unwrap());
        drop(provider);

        let err = handle.state().unwrap_err();
        assert!(err.to_string().contains("outside of a ThemeProvider"));
        assert!(handle.toggle().is_err());
        assert!(handle.subscribe().is_err());
    }

    #[tokio::test]
    async fn test_handle_toggle_updates_provider() {
        let store = Arc::new(MemoryStore::new());
        let provider = provider_with(&store);
        let handle = provider.handle();

        handle.toggle().unwrap().await;
        assert!(provider.is_dark_mode());
        assert!(std::ptr::eq(handle.colors().unwrap(), &DARK));
    }

    #[tokio::test]
    async fn test_reset_forgets_preference() {
        let store = Arc::new(MemoryStore::with_value(PREFERENCE_KEY, "true"));
        let provider = provider_with(&store);
        provider.load().await;
        assert!(provider.is_dark_mode());

        provider.reset().await.unwrap();
        assert!(!provider.is_dark_mode());
        assert_eq!(store.peek(PREFERENCE_KEY), None);
    }

    #[tokio::test]
    async fn test_preference_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");

        let first = ThemeProvider::new(Arc::new(FileStore::new(&path)));
        first.initialize().await.unwrap();
        first.toggle().await;
        drop(first);

        let second = ThemeProvider::new(Arc::new(FileStore::new(&path)));
        assert!(!second.is_dark_mode());
        second.initialize().await.unwrap();
        assert!(second.is_dark_mode());
    }

    #[tokio::test]
    async fn test_toggle_checked_reports_write_failure() {
        let store = Arc::new(MemoryStore::new());
        store.set_fail_writes(true);
        let provider = provider_with(&store);

        let result = provider.toggle_checked().await;
        assert!(matches!(result, Err(StorageError::Unavailable(_))));
        assert!(provider.is_dark_mode());

        store.set_fail_writes(false);
        provider.toggle_checked().await.unwrap();
        assert_eq!(store.peek(PREFERENCE_KEY).as_deref(), Some("false"));
    }

    #[tokio::test]
    async fn test_toggle_recovers_corrupt_preferences_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, "{truncated").unwrap();

        let provider = ThemeProvider::new(Arc::new(FileStore::new(&path)));
        provider.load().await;
        assert!(!provider.is_dark_mode());
        provider.toggle_checked().await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value, serde_json::json!({ "darkMode": "true" }));

        let reopened = ThemeProvider::new(Arc::new(FileStore::new(&path)));
        reopened.load().await;
        assert!(reopened.is_dark_mode());
    }

    #[tokio::test]
    async fn test_toggle_detached_persists() {
        let store = Arc::new(MemoryStore::new());
        let provider = provider_with(&store);
        provider.toggle_detached().await.unwrap();
        assert_eq!(store.peek(PREFERENCE_KEY).as_deref(), Some("true"));
    }
}
