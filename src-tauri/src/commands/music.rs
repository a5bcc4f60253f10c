use tokio::sync::Mutex;

use crate::compose;
use crate::error::{PaveraError, Result};
use crate::store::Store;

/// One accepted song request per window.
pub const COOLDOWN_SECS: u64 = 30;

/// Wall-clock rate limiter for song requests.
///
/// Remaining time is recomputed from the last-accepted timestamp on every
/// check — never counted down tick by tick — so the window stays correct
/// if the host was suspended between polls.
#[derive(Default)]
pub struct Cooldown {
    last_accepted: Option<u64>,
}

impl Cooldown {
    /// Seconds left before the next request is allowed. 0 means Ready.
    pub fn remaining_at(&self, now: u64) -> u64 {
        match self.last_accepted {
            Some(accepted) => (accepted + COOLDOWN_SECS).saturating_sub(now),
            None => 0,
        }
    }

    /// Accepts a request and arms the window, or reports the seconds left.
    pub fn try_accept_at(&mut self, now: u64) -> std::result::Result<(), u64> {
        let remaining = self.remaining_at(now);
        if remaining > 0 {
            return Err(remaining);
        }
        self.last_accepted = Some(now);
        Ok(())
    }
}

/// Managed Tauri state wrapping the cooldown. Single writer — the Music
/// view's event handler — so a plain async mutex is all it takes.
#[derive(Default)]
pub struct CooldownState {
    inner: Mutex<Cooldown>,
}

fn now_unix() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Submits a song request and returns the WhatsApp deep link to open.
///
/// Rejections, in order: blank song title, unconfigured operator contact,
/// active cooldown. The cooldown is armed before the link leaves this
/// command, so the window starts even if the guest never returns from
/// WhatsApp.
#[tauri::command]
pub async fn request_song(
    song: String,
    artist: Option<String>,
    store: tauri::State<'_, Store>,
    state: tauri::State<'_, CooldownState>,
) -> Result<String> {
    let mut cooldown = state.inner.lock().await;
    submit_request(store.inner(), &mut cooldown, now_unix(), &song, artist.as_deref())
}

pub fn submit_request(
    store: &Store,
    cooldown: &mut Cooldown,
    now: u64,
    song: &str,
    artist: Option<&str>,
) -> Result<String> {
    let song = song.trim();
    if song.is_empty() {
        return Err(PaveraError::EmptyInput("Escribe el nombre de la canción".into()));
    }

    let config = store.load_config();
    if config.host_phone.trim().is_empty() {
        return Err(PaveraError::MissingHostPhone);
    }

    cooldown.try_accept_at(now).map_err(PaveraError::CooldownActive)?;

    let message = compose::compose_song_request(song, artist, &config.guest_name);
    Ok(compose::whatsapp_link(&config.host_phone, &message))
}

/// Seconds left in the current window; the Music view polls this once per
/// second while mounted and clears its interval on exit.
#[tauri::command]
pub async fn song_cooldown_remaining(state: tauri::State<'_, CooldownState>) -> Result<u64> {
    Ok(state.inner.lock().await.remaining_at(now_unix()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staged_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = Store::new(dir.path().join(".pavera"));
        store.set_guest_name("Ana").expect("name");
        store.set_host_phone("17875550199").expect("phone");
        (dir, store)
    }

    #[test]
    fn window_rejects_then_reopens() {
        let mut cooldown = Cooldown::default();
        assert_eq!(cooldown.remaining_at(1_000), 0);
        assert!(cooldown.try_accept_at(1_000).is_ok());

        // Second attempt inside the window is rejected with the time left.
        assert_eq!(cooldown.try_accept_at(1_010), Err(20));
        assert_eq!(cooldown.remaining_at(1_029), 1);

        // 30 elapsed seconds: Ready again.
        assert_eq!(cooldown.remaining_at(1_030), 0);
        assert!(cooldown.try_accept_at(1_030).is_ok());
    }

    #[test]
    fn survives_host_suspension() {
        let mut cooldown = Cooldown::default();
        assert!(cooldown.try_accept_at(5_000).is_ok());
        // Long sleep between checks — wall clock, not ticks, decides.
        assert_eq!(cooldown.remaining_at(50_000), 0);
    }

    #[test]
    fn request_flow_arms_the_window() {
        let (_dir, store) = staged_store();
        let mut cooldown = Cooldown::default();

        let url = submit_request(&store, &mut cooldown, 100, "Suavemente", None)
            .expect("first request");
        assert!(url.starts_with("https://wa.me/17875550199?text="));
        assert!(url.contains("Unknown"));

        let second = submit_request(&store, &mut cooldown, 110, "Otra", Some("Artista"));
        assert!(matches!(second, Err(PaveraError::CooldownActive(20))));

        // After the window, accepted again.
        assert!(submit_request(&store, &mut cooldown, 130, "Otra", Some("Artista")).is_ok());
    }

    #[test]
    fn blank_song_rejected_without_arming() {
        let (_dir, store) = staged_store();
        let mut cooldown = Cooldown::default();
        assert!(submit_request(&store, &mut cooldown, 100, "   ", None).is_err());
        assert_eq!(cooldown.remaining_at(100), 0);
    }

    #[test]
    fn missing_contact_rejected_without_arming() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = Store::new(dir.path().join(".pavera"));
        store.set_guest_name("Ana").expect("name");

        let mut cooldown = Cooldown::default();
        let err = submit_request(&store, &mut cooldown, 100, "Suavemente", None);
        assert!(matches!(err, Err(PaveraError::MissingHostPhone)));
        assert_eq!(cooldown.remaining_at(100), 0);
    }
}
