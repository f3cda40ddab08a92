use log::{info, Level};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

mod analytics;
mod config;
mod controller;
mod dom;
mod error;
mod format;
mod state;
mod submission;
mod timer;
mod validation;
mod components {
    pub mod notification;
}
mod features {
    pub mod dropdown;
    pub mod engagement;
    pub mod form;
    pub mod header;
    pub mod modal;
    pub mod navigation;
    pub mod reveal;
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(Level::Info).expect("error initializing log");

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    if document.ready_state() == "loading" {
        info!("Waiting for DOMContentLoaded");
        let on_ready = Closure::once_into_js(controller::start);
        if let Err(e) = document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
        {
            log::error!("Could not wait for DOMContentLoaded: {:?}", e);
        }
    } else {
        controller::start();
    }
}
