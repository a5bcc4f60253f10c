use serde::Serialize;

use crate::error::Result;
use crate::store::{PaveraConfig, Store};

/// What the frontend needs to hydrate on launch: who the guest is, whether
/// the setup gate is open, where orders go, and everything ordered so far.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub guest_name: String,
    pub setup_complete: bool,
    pub host_phone: String,
    pub order_history: Vec<String>,
    pub order_count: usize,
}

impl From<PaveraConfig> for SessionSnapshot {
    fn from(config: PaveraConfig) -> Self {
        Self {
            setup_complete: config.setup_complete(),
            order_count: config.order_history.len(),
            guest_name: config.guest_name,
            host_phone: config.host_phone,
            order_history: config.order_history,
        }
    }
}

/// Hydrates the persisted session at launch.
#[tauri::command]
pub async fn load_session(store: tauri::State<'_, Store>) -> Result<SessionSnapshot> {
    Ok(store.load_config().into())
}

/// Sets the guest display name. Empty input is rejected and leaves the
/// setup gate closed; success opens it permanently for this device.
#[tauri::command]
pub async fn set_guest_name(
    name: String,
    store: tauri::State<'_, Store>,
) -> Result<SessionSnapshot> {
    Ok(store.set_guest_name(&name)?.into())
}

/// Saves the operator's WhatsApp number (country code included, verbatim).
#[tauri::command]
pub async fn set_host_phone(
    phone: String,
    store: tauri::State<'_, Store>,
) -> Result<SessionSnapshot> {
    Ok(store.set_host_phone(&phone)?.into())
}
