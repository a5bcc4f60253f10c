use serde::Serialize;

use crate::compose;
use crate::error::{PaveraError, Result};
use crate::store::Store;

/// Result of a placed order: the deep link to open, plus the updated
/// history for the header badge.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedOrder {
    pub url: String,
    pub order_history: Vec<String>,
}

/// Places a drink order: composes the WhatsApp message for the operator
/// and returns the deep link for the frontend to open.
///
/// The history append happens here, before the link is handed out — a
/// guest who jumps to WhatsApp and never comes back still has the order
/// on record. With no operator contact configured the command aborts
/// first: nothing composed, nothing recorded.
#[tauri::command]
pub async fn order_drink(
    drink_name: String,
    emoji: String,
    store: tauri::State<'_, Store>,
) -> Result<PlacedOrder> {
    place_order(store.inner(), &drink_name, &emoji)
}

pub fn place_order(store: &Store, drink_name: &str, emoji: &str) -> Result<PlacedOrder> {
    let config = store.load_config();
    if config.host_phone.trim().is_empty() {
        return Err(PaveraError::MissingHostPhone);
    }

    // The message lists prior orders; the one being placed is appended after.
    let message =
        compose::compose_drink_order(drink_name, emoji, &config.guest_name, &config.order_history);

    let updated = store.record_order(drink_name)?;
    let url = compose::whatsapp_link(&config.host_phone, &message);

    Ok(PlacedOrder {
        url,
        order_history: updated.order_history,
    })
}
