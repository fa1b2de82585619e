//! Browser wiring: the localStorage repository, the browser's id/color
//! providers, and the app bootstrap.
//!
//! Everything here goes through wasm-bindgen imports and is only callable
//! inside a browser; the rest of the crate never touches it, so the core
//! stays testable on native targets.

use serde_json::Value;
use uuid::Uuid;
use web_sys::Storage;

use crate::consts::STORAGE_KEY;
use crate::factory::BoxFactory;
use crate::persistence::{
    CanvasSnapshot, CanvasStateRepository, PersistenceError, sanitize_snapshot,
};
use crate::store::CanvasStore;

/// Install console logging and the panic hook. Safe to call more than once.
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("logger already installed");
    }
}

/// Fresh UUID for a new box. The `js` feature of `uuid` keeps `new_v4`
/// working on wasm32-unknown-unknown.
fn random_id() -> String {
    Uuid::new_v4().to_string()
}

/// Uniform random `#RRGGBB` color.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn random_color() -> String {
    let n = (js_sys::Math::random() * 16_777_216.0) as u32;
    format!("#{n:06X}")
}

/// Factory wired with the browser's generators.
#[must_use]
pub fn default_factory() -> BoxFactory {
    BoxFactory::new(Box::new(random_id), Box::new(random_color))
}

/// Composition root: a store over localStorage with the default factory.
#[must_use]
pub fn create_store() -> CanvasStore {
    CanvasStore::new(Box::new(LocalStorageStateRepository::new()), default_factory())
}

/// Probe localStorage once. Some embeddings expose the object but reject
/// writes (private browsing, storage policies) — those count as absent.
fn available_storage() -> Option<Storage> {
    let window = web_sys::window()?;
    let storage = match window.local_storage() {
        Ok(Some(storage)) => storage,
        _ => return None,
    };

    let probe = "__test__";
    match storage.set_item(probe, "1") {
        Ok(()) => {
            if storage.remove_item(probe).is_err() {
                log::warn!("localStorage probe cleanup failed");
            }
            Some(storage)
        }
        Err(_) => None,
    }
}

/// localStorage-backed repository.
///
/// Availability is probed once at construction; an unavailable storage
/// degrades every call to a no-op. Load and save failures never escape;
/// the editor keeps running on in-memory state.
pub struct LocalStorageStateRepository {
    storage: Option<Storage>,
    key: String,
}

impl LocalStorageStateRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::with_key(STORAGE_KEY)
    }

    #[must_use]
    pub fn with_key(key: &str) -> Self {
        Self { storage: available_storage(), key: key.to_owned() }
    }

    fn try_load(&self) -> Result<Option<CanvasSnapshot>, PersistenceError> {
        let storage = self.storage.as_ref().ok_or(PersistenceError::Unavailable)?;

        let raw = match storage.get_item(&self.key) {
            Ok(raw) => raw,
            Err(_) => return Err(PersistenceError::AccessRejected),
        };
        let Some(raw) = raw else {
            return Ok(None);
        };

        let value: Value = serde_json::from_str(&raw)?;
        match sanitize_snapshot(&value) {
            Some(snapshot) => Ok(Some(snapshot)),
            None => Err(PersistenceError::MalformedSnapshot),
        }
    }

    fn try_save(&self, snapshot: &CanvasSnapshot) -> Result<(), PersistenceError> {
        let storage = self.storage.as_ref().ok_or(PersistenceError::Unavailable)?;
        let payload = serde_json::to_string(snapshot)?;
        storage
            .set_item(&self.key, &payload)
            .map_err(|_| PersistenceError::AccessRejected)
    }
}

impl Default for LocalStorageStateRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasStateRepository for LocalStorageStateRepository {
    fn load(&self) -> Option<CanvasSnapshot> {
        match self.try_load() {
            Ok(snapshot) => snapshot,
            Err(PersistenceError::Unavailable) => None,
            Err(err) => {
                log::warn!("canvas state load failed, starting fresh: {err}");
                None
            }
        }
    }

    fn save(&self, snapshot: &CanvasSnapshot) {
        match self.try_save(snapshot) {
            Ok(()) | Err(PersistenceError::Unavailable) => {}
            Err(err) => log::warn!("canvas state save skipped: {err}"),
        }
    }
}
