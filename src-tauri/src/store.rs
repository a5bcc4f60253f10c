use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::commands::menu::Drink;
use crate::error::Result;

/// Built-in operator contact. Empty means "not configured yet": orders and
/// song requests are blocked until staff set a real number in settings.
pub const DEFAULT_HOST_PHONE: &str = "";

/// Version token baked into the menu snapshot file name. Bumping it strands
/// every previously cached menu and forces regeneration on all installs —
/// that is the cache-busting mechanism, intentional.
pub const MENU_CACHE_VERSION: u32 = 6;

fn default_host_phone() -> String {
    DEFAULT_HOST_PHONE.to_string()
}

/// Everything persisted per guest device except the menu snapshot.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaveraConfig {
    #[serde(default = "default_host_phone")]
    pub host_phone: String,
    #[serde(default)]
    pub guest_name: String,
    #[serde(default)]
    pub order_history: Vec<String>,
}

impl Default for PaveraConfig {
    fn default() -> Self {
        Self {
            host_phone: default_host_phone(),
            guest_name: String::new(),
            order_history: Vec::new(),
        }
    }
}

impl PaveraConfig {
    /// The setup gate opens once a non-empty guest name has been persisted.
    pub fn setup_complete(&self) -> bool {
        !self.guest_name.trim().is_empty()
    }
}

/// File-backed store rooted at a single directory (normally `~/.pavera`).
///
/// Owned by the application root and handed to commands as managed state,
/// so tests can point it at a temp directory instead.
pub struct Store {
    base: PathBuf,
}

impl Default for Store {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::new(home.join(".pavera"))
    }
}

impl Store {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base
    }

    fn config_path(&self) -> PathBuf {
        self.base.join("config.json")
    }

    fn menu_path(&self) -> PathBuf {
        self.base.join(format!("menu_v{MENU_CACHE_VERSION}.json"))
    }

    /// Loads the persisted config, falling back to defaults when the file is
    /// missing or unreadable. Never fails — a fresh device starts from the
    /// same place as a corrupt one.
    pub fn load_config(&self) -> PaveraConfig {
        std::fs::read_to_string(self.config_path())
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default()
    }

    pub fn save_config(&self, config: &PaveraConfig) -> Result<()> {
        std::fs::create_dir_all(&self.base)?;
        let json = serde_json::to_string_pretty(config)
            .map_err(|e| crate::error::PaveraError::Custom(e.to_string()))?;
        std::fs::write(self.config_path(), json)?;
        Ok(())
    }

    /// Current menu snapshot under the active cache version, if one exists.
    /// Snapshots written under older version tokens are simply never read.
    pub fn load_menu_cache(&self) -> Option<Vec<Drink>> {
        let content = std::fs::read_to_string(self.menu_path()).ok()?;
        let drinks: Vec<Drink> = serde_json::from_str(&content).ok()?;
        if drinks.is_empty() {
            return None;
        }
        Some(drinks)
    }

    pub fn save_menu_cache(&self, drinks: &[Drink]) -> Result<()> {
        std::fs::create_dir_all(&self.base)?;
        let json = serde_json::to_string_pretty(drinks)
            .map_err(|e| crate::error::PaveraError::Custom(e.to_string()))?;
        std::fs::write(self.menu_path(), json)?;
        Ok(())
    }

    /// Sets the guest display name. A blank name is rejected and nothing is
    /// written; a real name opens the setup gate permanently for this device.
    pub fn set_guest_name(&self, name: &str) -> Result<PaveraConfig> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(crate::error::PaveraError::EmptyInput(
                "Por favor ingresa tu nombre".into(),
            ));
        }
        let mut config = self.load_config();
        config.guest_name = trimmed.to_string();
        self.save_config(&config)?;
        Ok(config)
    }

    /// Stores the operator contact verbatim — no validation beyond what the
    /// caller does at order time.
    pub fn set_host_phone(&self, phone: &str) -> Result<PaveraConfig> {
        let mut config = self.load_config();
        config.host_phone = phone.to_string();
        self.save_config(&config)?;
        Ok(config)
    }

    /// Appends a drink name to the order history. Append-only: no dedup,
    /// no cap, chronological order preserved for the life of the store.
    pub fn record_order(&self, drink_name: &str) -> Result<PaveraConfig> {
        let mut config = self.load_config();
        config.order_history.push(drink_name.to_string());
        self.save_config(&config)?;
        Ok(config)
    }
}
