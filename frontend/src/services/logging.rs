use gloo::net::http::Request;
use shared::LogEntry;
use wasm_bindgen_futures::spawn_local;

use crate::config::AppConfig;

/// Forwards component-tagged log lines to `POST /api/logs` and mirrors them
/// to the browser console.
pub struct Logger;

impl Logger {
    pub fn info_with_component(component: &str, message: &str) {
        gloo::console::info!(format!("[{}] {}", component, message));
        Self::log("info", message, component);
    }

    pub fn warn_with_component(component: &str, message: &str) {
        gloo::console::warn!(format!("[{}] {}", component, message));
        Self::log("warn", message, component);
    }

    pub fn error_with_component(component: &str, message: &str) {
        gloo::console::error!(format!("[{}] {}", component, message));
        Self::log("error", message, component);
    }

    fn log(level: &str, message: &str, component: &str) {
        let entry = LogEntry {
            level: level.to_string(),
            message: message.to_string(),
            component: Some(component.to_string()),
        };
        let url = format!("{}/api/logs", AppConfig::default().api_base_url);

        // Fire and forget
        spawn_local(async move {
            if let Ok(request) = Request::post(&url).json(&entry) {
                let _ = request.send().await;
            }
        });
    }
}
