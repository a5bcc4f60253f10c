use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::{PaveraError, Result};

/// The four screens. Landing is the hub; every other view connects only
/// to it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum View {
    #[default]
    Landing,
    Drinks,
    Music,
    Staff,
}

/// Managed navigator state. Source of truth for which screen is active —
/// the frontend renders whatever this reports.
#[derive(Default)]
pub struct NavState {
    current: Mutex<View>,
}

/// Applies one user-initiated transition. Only Landing↔{Drinks, Music,
/// Staff} edges exist; anything else is rejected.
fn transition(from: View, to: View) -> std::result::Result<View, String> {
    match (from, to) {
        (View::Landing, View::Drinks)
        | (View::Landing, View::Music)
        | (View::Landing, View::Staff)
        | (_, View::Landing) => Ok(to),
        _ => Err(format!("no edge from {from:?} to {to:?}")),
    }
}

#[tauri::command]
pub async fn navigate_to(view: View, state: tauri::State<'_, NavState>) -> Result<View> {
    let mut current = state.current.lock().await;
    *current = transition(*current, view).map_err(PaveraError::InvalidNavigation)?;
    Ok(*current)
}

/// Back always means the Landing hub.
#[tauri::command]
pub async fn go_back(state: tauri::State<'_, NavState>) -> Result<View> {
    let mut current = state.current.lock().await;
    *current = View::Landing;
    Ok(*current)
}

#[tauri::command]
pub async fn current_view(state: tauri::State<'_, NavState>) -> Result<View> {
    Ok(*state.current.lock().await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_landing() {
        assert_eq!(View::default(), View::Landing);
    }

    #[test]
    fn landing_reaches_every_screen_and_back() {
        for screen in [View::Drinks, View::Music, View::Staff] {
            assert_eq!(transition(View::Landing, screen), Ok(screen));
            assert_eq!(transition(screen, View::Landing), Ok(View::Landing));
        }
    }

    #[test]
    fn no_cross_edges_between_screens() {
        assert!(transition(View::Drinks, View::Music).is_err());
        assert!(transition(View::Music, View::Staff).is_err());
        assert!(transition(View::Staff, View::Drinks).is_err());
    }
}
