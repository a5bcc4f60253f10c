//! Pure message composition for the WhatsApp deep links.
//!
//! Nothing here does I/O — callers persist history / arm the cooldown
//! first, then hand the returned URL to the opener.

/// Shown in the history section of the very first order.
const FIRST_ORDER_PLACEHOLDER: &str = "(Primer trago)";

/// Shown when a song request omits the artist.
const UNKNOWN_ARTIST: &str = "Unknown";

/// Builds the drink-order message:
///
/// ```text
/// 🌶️ *Margarita Picante*
/// 👤 Para: *Ana*
///
/// 📋 *Historial:*
/// (Primer trago)
/// ```
///
/// With prior orders, the placeholder line becomes one `- {drink}` line
/// per order, oldest first.
pub fn compose_drink_order(name: &str, emoji: &str, guest: &str, history: &[String]) -> String {
    let history_block = if history.is_empty() {
        FIRST_ORDER_PLACEHOLDER.to_string()
    } else {
        history
            .iter()
            .map(|d| format!("- {d}"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!("{emoji} *{name}*\n👤 Para: *{guest}*\n\n📋 *Historial:*\n{history_block}")
}

/// Builds the song-request message. Song first so it shows up in the
/// notification preview; artist defaults to "Unknown".
pub fn compose_song_request(song: &str, artist: Option<&str>, guest: &str) -> String {
    let artist = match artist {
        Some(a) if !a.trim().is_empty() => a.trim(),
        _ => UNKNOWN_ARTIST,
    };
    format!("🎵 *{song}* - {artist}\n👤 Solicitado por: *{guest}*")
}

/// Builds the `wa.me` deep link. WhatsApp reads the raw query text, so the
/// message is fully percent-escaped (newlines become `%0A`, spaces `%20`).
/// The phone number is used verbatim — no validation beyond the caller's
/// non-empty check.
pub fn whatsapp_link(phone: &str, message: &str) -> String {
    format!("https://wa.me/{phone}?text={}", urlencoding::encode(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drink_order_first_time() {
        let msg = compose_drink_order("Margarita Picante", "🌶️", "Ana", &[]);
        assert_eq!(
            msg,
            "🌶️ *Margarita Picante*\n👤 Para: *Ana*\n\n📋 *Historial:*\n(Primer trago)"
        );
    }

    #[test]
    fn drink_order_lists_history_in_order() {
        let history = vec!["Manzana Mágica".to_string(), "Tequila Maple".to_string()];
        let msg = compose_drink_order("Margarita Picante", "🌶️", "Luis", &history);
        assert!(msg.ends_with("📋 *Historial:*\n- Manzana Mágica\n- Tequila Maple"));
        assert!(!msg.contains("(Primer trago)"));
    }

    #[test]
    fn song_request_defaults_artist() {
        assert_eq!(
            compose_song_request("Suavemente", None, "Ana"),
            "🎵 *Suavemente* - Unknown\n👤 Solicitado por: *Ana*"
        );
        assert_eq!(
            compose_song_request("Suavemente", Some("   "), "Ana"),
            "🎵 *Suavemente* - Unknown\n👤 Solicitado por: *Ana*"
        );
        assert_eq!(
            compose_song_request("Suavemente", Some("Elvis Crespo"), "Ana"),
            "🎵 *Suavemente* - Elvis Crespo\n👤 Solicitado por: *Ana*"
        );
    }

    #[test]
    fn deep_link_escapes_newlines_and_spaces() {
        let url = whatsapp_link("17875550199", "hola mundo\nsegunda línea");
        assert!(url.starts_with("https://wa.me/17875550199?text="));
        assert!(url.contains("%0A"));
        assert!(url.contains("hola%20mundo"));
        assert!(!url.contains(' '));
        assert!(!url.contains('\n'));
    }
}
