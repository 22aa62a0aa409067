//! Configuration storage.
//!
//! Two files live under the platform config directory:
//! - `config.json` - shared machine config; the monitor only owns the
//!   `device_size` key, other keys are preserved untouched
//! - `local_settings.json` - per-machine window placement and the last
//!   chosen sort order
//!
//! Writes go through a temp file in the same directory and are moved over
//! the target, so a crash never leaves a truncated file behind.

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_DEVICE_SIZE, DEVICE_SIZE_KEY, EVENTS_WINDOW,
    EVENTS_WINDOW_POS, EVENTS_WINDOW_SIZE, INSPECTOR_WINDOW, INSPECTOR_WINDOW_POS,
    INSPECTOR_WINDOW_SIZE, LOCAL_SETTINGS_FILE_NAME,
};
use crate::error::{MonitorResult, SettingsError};
use crate::types::SortOrder;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::{debug, warn};

// ============================================================================
// Paths
// ============================================================================

/// Directory holding the monitor's config files
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME))
}

pub fn default_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

pub fn default_local_settings_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(LOCAL_SETTINGS_FILE_NAME))
}

/// Serialize `value` to `path` through a temp file in the same directory
fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> MonitorResult<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let mut file = tempfile::NamedTempFile::new_in(parent)?;
    serde_json::to_writer_pretty(&mut file, value)?;
    file.write_all(b"\n")?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| SettingsError::Persist {
        path: path.display().to_string(),
        source: e.error,
    })?;
    Ok(())
}

// ============================================================================
// Config Store
// ============================================================================

/// Key/value config the inspector reads the default device size from.
pub trait ConfigStore {
    fn get(&self, key: &str) -> Option<Value>;

    fn set(&mut self, key: &str, value: Value);

    /// Write pending changes to durable storage
    fn persist(&mut self) -> MonitorResult<()>;
}

/// Shared stores, so the owner can keep a handle after handing one out
impl<T: ConfigStore> ConfigStore for Rc<RefCell<T>> {
    fn get(&self, key: &str) -> Option<Value> {
        self.borrow().get(key)
    }

    fn set(&mut self, key: &str, value: Value) {
        self.borrow_mut().set(key, value);
    }

    fn persist(&mut self) -> MonitorResult<()> {
        self.borrow_mut().persist()
    }
}

/// Read the default device size, falling back when absent or invalid
pub fn read_device_size(store: &dyn ConfigStore) -> f32 {
    store
        .get(DEVICE_SIZE_KEY)
        .and_then(|value| value.as_f64())
        .map(|size| size as f32)
        .filter(|size| size.is_finite() && *size > 0.0)
        .unwrap_or(DEFAULT_DEVICE_SIZE)
}

/// In-memory store, used when no config file is wanted and in tests
#[derive(Debug, Default, Clone)]
pub struct MemoryConfigStore {
    values: Map<String, Value>,
    persist_count: usize,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times `persist` was called
    pub fn persist_count(&self) -> usize {
        self.persist_count
    }
}

impl ConfigStore for MemoryConfigStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }

    fn persist(&mut self) -> MonitorResult<()> {
        self.persist_count += 1;
        Ok(())
    }
}

/// JSON object file store
#[derive(Debug)]
pub struct JsonConfigStore {
    path: PathBuf,
    values: Map<String, Value>,
}

impl JsonConfigStore {
    /// Open a config file. A missing file is an empty config.
    pub fn open(path: impl Into<PathBuf>) -> MonitorResult<Self> {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => Map::new(),
            Ok(content) => match serde_json::from_str::<Value>(&content)? {
                Value::Object(values) => values,
                other => {
                    warn!(path = %path.display(), kind = ?other, "Config is not a JSON object, starting empty");
                    Map::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No config file yet");
                Map::new()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, values })
    }

    /// Open the config file in the platform config directory
    pub fn open_default() -> MonitorResult<Self> {
        let path = default_config_path().ok_or(SettingsError::NoConfigDir)?;
        Self::open(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for JsonConfigStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }

    fn persist(&mut self) -> MonitorResult<()> {
        write_json_atomic(&self.path, &self.values)?;
        debug!(path = %self.path.display(), "Config saved");
        Ok(())
    }
}

// ============================================================================
// Local Settings
// ============================================================================

/// Last known placement of a window
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowGeometry {
    pub position: (i32, i32),
    pub size: (u32, u32),
}

impl WindowGeometry {
    /// Built-in placement for a known window identity
    pub fn default_for(window: &str) -> Self {
        match window {
            INSPECTOR_WINDOW => Self {
                position: INSPECTOR_WINDOW_POS,
                size: INSPECTOR_WINDOW_SIZE,
            },
            EVENTS_WINDOW => Self {
                position: EVENTS_WINDOW_POS,
                size: EVENTS_WINDOW_SIZE,
            },
            _ => Self {
                position: (0, 0),
                size: INSPECTOR_WINDOW_SIZE,
            },
        }
    }
}

/// Per-machine UI state
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LocalSettings {
    #[serde(default)]
    windows: BTreeMap<String, WindowGeometry>,
    #[serde(default)]
    pub sort_order: SortOrder,
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl LocalSettings {
    /// Load from `path`. Unreadable or corrupt files yield defaults.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut settings = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str::<LocalSettings>(&content).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "Corrupt local settings, using defaults");
                LocalSettings::default()
            }),
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!(path = %path.display(), error = %e, "Failed to read local settings");
                }
                LocalSettings::default()
            }
        };
        if !settings.sort_order.is_selectable() {
            settings.sort_order = SortOrder::default();
        }
        settings.path = Some(path);
        settings
    }

    /// Load from the platform config directory, or in-memory defaults
    pub fn load_default() -> Self {
        match default_local_settings_path() {
            Some(path) => Self::load(path),
            None => Self::default(),
        }
    }

    /// Write to the file this was loaded from. In-memory settings are a no-op.
    pub fn save(&self) -> MonitorResult<()> {
        match &self.path {
            Some(path) => write_json_atomic(path, self),
            None => Ok(()),
        }
    }

    /// Last known placement of `window`, or its built-in default
    pub fn window(&self, window: &str) -> WindowGeometry {
        self.windows
            .get(window)
            .copied()
            .unwrap_or_else(|| WindowGeometry::default_for(window))
    }

    pub fn set_window(&mut self, window: &str, geometry: WindowGeometry) {
        self.windows.insert(window.to_string(), geometry);
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
