mod commands;
mod compose;
mod error;
mod gemini;
mod logger;
mod store;
mod vocab;

use logger::{LoggerState, SessionLogger};
use store::Store;
use tauri::Manager;

/// Fallback URL opener for WSL development where xdg-open doesn't work.
/// The opener plugin handles every normal platform.
#[tauri::command]
async fn open_url_fallback(url: String) -> Result<(), String> {
    let result = tokio::process::Command::new("wslview")
        .arg(&url)
        .output()
        .await;

    if let Ok(output) = result {
        if output.status.success() {
            return Ok(());
        }
    }

    let result = tokio::process::Command::new("cmd.exe")
        .args(["/c", "start", &url])
        .output()
        .await;

    match result {
        Ok(output) if output.status.success() => Ok(()),
        _ => Err("Could not open URL".into()),
    }
}

pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_opener::init())
        .manage(Store::default())
        .manage(LoggerState::default())
        .manage(commands::music::CooldownState::default())
        .manage(commands::nav::NavState::default())
        .setup(|app| {
            // Bring the session logger up in the background; the app runs
            // fine (just quietly) if the log directory is unusable.
            let base_dir = app.state::<Store>().base_dir().clone();
            let slot = app.state::<LoggerState>().logger.clone();
            tauri::async_runtime::spawn(async move {
                if let Some(logger) = SessionLogger::new(&base_dir).await {
                    *slot.lock().await = Some(logger);
                }
            });
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::menu::load_menu,
            commands::shopping::generate_shopping_list,
            commands::session::load_session,
            commands::session::set_guest_name,
            commands::session::set_host_phone,
            commands::orders::order_drink,
            commands::music::request_song,
            commands::music::song_cooldown_remaining,
            commands::nav::navigate_to,
            commands::nav::go_back,
            commands::nav::current_view,
            open_url_fallback,
        ])
        .run(tauri::generate_context!())
        .expect("failed to run Pavera");
}
