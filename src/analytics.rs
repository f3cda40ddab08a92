use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::{Function, Reflect};

/// Parameters forwarded to `gtag('event', action, params)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GtagParams<'a> {
    pub event_category: &'a str,
    pub event_label: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackedEvent<'a> {
    pub category: &'a str,
    pub action: &'a str,
    pub label: Option<&'a str>,
}

impl<'a> TrackedEvent<'a> {
    pub fn gtag_params(&self) -> GtagParams<'a> {
        GtagParams {
            event_category: self.category,
            event_label: self.label,
        }
    }
}

/// Sends the event to Google Analytics when `gtag` is loaded and always logs
/// it to the console.
pub fn track_event(category: &str, action: &str, label: Option<&str>) {
    let event = TrackedEvent { category, action, label };

    if let Some(gtag) = gtag() {
        match serde_wasm_bindgen::to_value(&event.gtag_params()) {
            Ok(params) => {
                if let Err(e) = gtag.call3(&JsValue::NULL, &"event".into(), &action.into(), &params) {
                    log::warn!("gtag rejected event {}: {:?}", action, e);
                }
            }
            Err(e) => log::warn!("Failed to encode analytics params: {}", e),
        }
    }

    match serde_wasm_bindgen::to_value(&event) {
        Ok(payload) => gloo_console::log!("Event tracked:", payload),
        Err(_) => log::info!("Event tracked: {:?}", event),
    }
}

fn gtag() -> Option<Function> {
    let window = web_sys::window()?;
    Reflect::get(&window, &"gtag".into())
        .ok()?
        .dyn_into::<Function>()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gtag_params_use_analytics_field_names() {
        let event = TrackedEvent {
            category: "CTA",
            action: "click",
            label: Some("Book now"),
        };

        let json = serde_json::to_value(event.gtag_params()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "event_category": "CTA", "event_label": "Book now" })
        );
    }

    #[test]
    fn missing_label_serializes_as_null() {
        let event = TrackedEvent {
            category: "Event",
            action: "view",
            label: None,
        };

        let json = serde_json::to_value(event.gtag_params()).unwrap();
        assert_eq!(json["event_label"], serde_json::Value::Null);
    }
}
