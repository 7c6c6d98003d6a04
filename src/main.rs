//! Taskboard Frontend Entry Point

mod app;
mod commands;
mod components;
mod config;
mod context;
mod forms;
mod models;
mod polling;
mod remote;
mod store;

use app::App;
use leptos::prelude::*;
use rolling_logger::LogRecord;
use tracing::Level;
use wasm_bindgen::JsValue;

use crate::config::client_config;

/// Forward a record to the browser console at a matching level
fn console_sink(record: &LogRecord) {
    let line = JsValue::from(record.to_string());
    match record.level {
        Level::ERROR => web_sys::console::error_1(&line),
        Level::WARN => web_sys::console::warn_1(&line),
        _ => web_sys::console::log_1(&line),
    }
}

fn main() {
    console_error_panic_hook::set_once();

    let config = client_config();
    if let Err(err) = rolling_logger::init_logger(config.log_capacity, config.log_level, console_sink) {
        web_sys::console::warn_1(&format!("Logger not installed: {}", err).into());
    }
    tracing::info!(api = %config.api_base_url, "Taskboard starting");

    mount_to_body(App);
}
