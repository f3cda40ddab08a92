use serde::Deserialize;

#[cfg(debug_assertions)]
pub fn get_contact_endpoint() -> &'static str {
    "http://localhost:3001/api/contact"  // Development URL when running locally
}

#[cfg(not(debug_assertions))]
pub fn get_contact_endpoint() -> &'static str {
    "/api/contact"
}

// Element ids the page markup provides.
pub const HEADER_ID: &str = "header";
pub const NAV_TOGGLE_ID: &str = "nav-toggle";
pub const NAV_MENU_ID: &str = "nav-menu";
pub const MODAL_ID: &str = "contact-modal";
pub const MODAL_OVERLAY_ID: &str = "modal-overlay";
pub const MODAL_CLOSE_ID: &str = "modal-close";
pub const SHOW_FORM_ID: &str = "show-contact-form";
pub const CONTACT_FORM_ID: &str = "contact-form";
pub const BACK_TO_TOP_ID: &str = "back-to-top";
pub const NOTIFICATION_ROOT_ID: &str = "staygo-notifications";

pub const NAV_LINK_SELECTOR: &str = ".nav__link";
pub const MODAL_CONTENT_SELECTOR: &str = ".modal__content";
pub const FOCUSABLE_SELECTOR: &str = "input, textarea, select";
pub const REQUIRED_SELECTOR: &str = "input[required], textarea[required], select[required]";
pub const REVEAL_SELECTOR: &str = ".feature-card, .event-card, .testimonial-card, .process__step";
pub const SECTION_SELECTOR: &str = "section[id]";
pub const LAZY_IMAGE_SELECTOR: &str = "img[loading=\"lazy\"]";
pub const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";
pub const DROPDOWN_SELECTOR: &str = ".nav__dropdown";
pub const DROPDOWN_CONTENT_SELECTOR: &str = ".dropdown__content";
pub const TEL_INPUT_SELECTOR: &str = "input[type=\"tel\"]";
pub const DATE_INPUT_SELECTOR: &str = "input[type=\"date\"]";
pub const SUBMIT_BUTTON_SELECTOR: &str = "button[type=\"submit\"]";
pub const CTA_SELECTOR: &str = ".btn--primary";
pub const EVENT_CARD_SELECTOR: &str = ".event-card";
pub const EVENT_CARD_TITLE_SELECTOR: &str = ".event-card__title";

pub const OPEN_CLASS: &str = "show";
pub const ACTIVE_CLASS: &str = "active";
pub const ERROR_CLASS: &str = "error";
pub const HEADER_HIDDEN_CLASS: &str = "header--hidden";
pub const FIELD_ERROR_CLASS: &str = "form__error";

/// Global the page may define to override [`InteractionConfig`] defaults.
pub const CONFIG_GLOBAL: &str = "STAYGO_CONFIG";
/// Global the controller publishes its entry points under.
pub const NAMESPACE_GLOBAL: &str = "StayGoPremium";

/// How the contact form leaves the page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SubmissionMode {
    /// Waits `delay_ms` and reports success without touching the network.
    Simulated { delay_ms: u32 },
    /// POSTs the field map as JSON to `endpoint`, or to
    /// [`get_contact_endpoint`] when none is given.
    Http {
        #[serde(default)]
        endpoint: Option<String>,
    },
}

impl Default for SubmissionMode {
    fn default() -> Self {
        SubmissionMode::Simulated { delay_ms: 1500 }
    }
}

/// Tunables for the interaction layer. Every field falls back to the value
/// the marketing pages were designed against.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    pub desktop_breakpoint: f64,
    pub header_shadow_offset: f64,
    pub back_to_top_offset: f64,
    pub reveal_threshold: f64,
    pub reveal_root_margin: String,
    pub section_threshold: f64,
    pub section_root_margin: String,
    pub modal_focus_delay_ms: u32,
    pub notification_ttl_ms: u32,
    pub notification_exit_ms: u32,
    pub resize_debounce_ms: u32,
    pub dropdown_close_delay_ms: u32,
    pub submission: SubmissionMode,
    pub format_phone_on_input: bool,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            desktop_breakpoint: 1024.0,
            header_shadow_offset: 10.0,
            back_to_top_offset: 300.0,
            reveal_threshold: 0.1,
            reveal_root_margin: "0px 0px -50px 0px".to_string(),
            section_threshold: 0.3,
            section_root_margin: "-70px 0px -70% 0px".to_string(),
            modal_focus_delay_ms: 100,
            notification_ttl_ms: 5000,
            notification_exit_ms: 300,
            resize_debounce_ms: 250,
            dropdown_close_delay_ms: 100,
            submission: SubmissionMode::default(),
            format_phone_on_input: false,
        }
    }
}

impl InteractionConfig {
    pub fn is_narrow(&self, viewport_width: f64) -> bool {
        viewport_width < self.desktop_breakpoint
    }

    /// Reads overrides from `window.STAYGO_CONFIG`, keeping defaults when the
    /// global is absent or malformed.
    pub fn from_window(window: &web_sys::Window) -> Self {
        let raw = match web_sys::js_sys::Reflect::get(window, &CONFIG_GLOBAL.into()) {
            Ok(raw) if !raw.is_undefined() && !raw.is_null() => raw,
            _ => return Self::default(),
        };

        match serde_wasm_bindgen::from_value::<InteractionConfig>(raw) {
            Ok(config) => {
                log::info!("Loaded interaction config overrides from window.{}", CONFIG_GLOBAL);
                config
            }
            Err(e) => {
                log::warn!("Ignoring invalid window.{}: {}", CONFIG_GLOBAL, e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_overrides_keep_remaining_defaults() {
        let config: InteractionConfig =
            serde_json::from_str(r#"{ "desktop_breakpoint": 900, "format_phone_on_input": true }"#).unwrap();

        assert_eq!(config.desktop_breakpoint, 900.0);
        assert!(config.format_phone_on_input);
        assert_eq!(config.notification_ttl_ms, 5000);
        assert_eq!(config.submission, SubmissionMode::Simulated { delay_ms: 1500 });
    }

    #[test]
    fn http_submission_mode_parses() {
        let config: InteractionConfig = serde_json::from_str(
            r#"{ "submission": { "mode": "http", "endpoint": "/api/contact" } }"#,
        )
        .unwrap();

        assert_eq!(
            config.submission,
            SubmissionMode::Http { endpoint: Some("/api/contact".to_string()) }
        );

        let config: InteractionConfig =
            serde_json::from_str(r#"{ "submission": { "mode": "http" } }"#).unwrap();
        assert_eq!(config.submission, SubmissionMode::Http { endpoint: None });
    }

    #[test]
    fn breakpoint_is_exclusive() {
        let config = InteractionConfig::default();
        assert!(config.is_narrow(1023.0));
        assert!(!config.is_narrow(1024.0));
    }
}
