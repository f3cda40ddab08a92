use std::collections::BTreeMap;

use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use web_sys::js_sys::{self, Array};
use web_sys::{HtmlButtonElement, HtmlFormElement};

use crate::config::{self, SubmissionMode};
use crate::error::{Error, Result};

pub const SENDING_LABEL: &str = "<span>Sending...</span>";
pub const SIMULATED_SUCCESS: &str =
    "Thank you! We'll get back to you within 2 hours during business hours.";
pub const HTTP_SUCCESS: &str = "Thank you! We'll get back to you soon.";
pub const FAILURE: &str = "Sorry, there was an error. Please try again.";

/// Field name to submitted value.
pub type FormFields = BTreeMap<String, String>;

/// Reads every named control of the form the way the browser would submit it.
pub fn collect_fields(form: &HtmlFormElement) -> Result<FormFields> {
    let data = web_sys::FormData::new_with_form(form)?;
    let mut fields = FormFields::new();

    if let Some(entries) = js_sys::try_iter(&data)? {
        for entry in entries {
            let entry = Array::from(&entry?);
            if let Some(key) = entry.get(0).as_string() {
                // File inputs have no string value; keep the key so the map
                // still lists every control.
                fields.insert(key, entry.get(1).as_string().unwrap_or_default());
            }
        }
    }

    Ok(fields)
}

/// Delivers the contact form somewhere.
#[derive(Debug, Clone, PartialEq)]
pub enum Submitter {
    Simulated { delay_ms: u32 },
    Http { endpoint: String },
}

impl Submitter {
    pub fn from_mode(mode: &SubmissionMode) -> Self {
        match mode {
            SubmissionMode::Simulated { delay_ms } => Submitter::Simulated { delay_ms: *delay_ms },
            SubmissionMode::Http { endpoint } => Submitter::Http {
                endpoint: endpoint
                    .clone()
                    .unwrap_or_else(|| config::get_contact_endpoint().to_string()),
            },
        }
    }

    /// Message shown once the submission went through.
    pub fn success_message(&self) -> &'static str {
        match self {
            Submitter::Simulated { .. } => SIMULATED_SUCCESS,
            Submitter::Http { .. } => HTTP_SUCCESS,
        }
    }

    pub async fn submit(&self, fields: &FormFields) -> Result<()> {
        match self {
            Submitter::Simulated { delay_ms } => {
                TimeoutFuture::new(*delay_ms).await;
                log::info!("Form submitted: {}", serde_json::to_string(fields)?);
                Ok(())
            }
            Submitter::Http { endpoint } => {
                let response = Request::post(endpoint).json(fields)?.send().await?;
                if response.ok() {
                    log::info!("Form delivered to {}", endpoint);
                    Ok(())
                } else {
                    Err(Error::Status(response.status()))
                }
            }
        }
    }
}

/// The control that triggers a submission.
pub trait SubmitControl {
    fn label(&self) -> String;
    fn set_label(&self, label: &str);
    fn set_disabled(&self, disabled: bool);
}

impl SubmitControl for HtmlButtonElement {
    fn label(&self) -> String {
        self.inner_html()
    }

    fn set_label(&self, label: &str) {
        self.set_inner_html(label);
    }

    fn set_disabled(&self, disabled: bool) {
        HtmlButtonElement::set_disabled(self, disabled);
    }
}

/// Disables the control and shows the sending label for as long as the
/// guard lives; dropping it restores the original label.
pub struct SubmitGuard<C: SubmitControl> {
    control: C,
    original_label: String,
}

impl<C: SubmitControl> SubmitGuard<C> {
    pub fn engage(control: C) -> Self {
        let original_label = control.label();
        control.set_disabled(true);
        control.set_label(SENDING_LABEL);
        Self {
            control,
            original_label,
        }
    }
}

impl<C: SubmitControl> Drop for SubmitGuard<C> {
    fn drop(&mut self) {
        self.control.set_disabled(false);
        self.control.set_label(&self.original_label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct FakeButton {
        label: Rc<RefCell<String>>,
        disabled: Rc<RefCell<bool>>,
    }

    impl SubmitControl for FakeButton {
        fn label(&self) -> String {
            self.label.borrow().clone()
        }

        fn set_label(&self, label: &str) {
            *self.label.borrow_mut() = label.to_string();
        }

        fn set_disabled(&self, disabled: bool) {
            *self.disabled.borrow_mut() = disabled;
        }
    }

    fn send(button: FakeButton, outcome: Result<()>) -> Result<()> {
        let _guard = SubmitGuard::engage(button);
        outcome?;
        Ok(())
    }

    #[test]
    fn guard_shows_sending_state_while_alive() {
        let button = FakeButton::default();
        button.set_label("Request a callback");

        let guard = SubmitGuard::engage(button.clone());
        assert!(*button.disabled.borrow());
        assert_eq!(button.label(), SENDING_LABEL);

        drop(guard);
        assert!(!*button.disabled.borrow());
        assert_eq!(button.label(), "Request a callback");
    }

    #[test]
    fn control_restored_whatever_the_outcome() {
        for outcome in [Ok(()), Err(Error::Status(500))] {
            let button = FakeButton::default();
            button.set_label("Send");

            let _ = send(button.clone(), outcome);

            assert!(!*button.disabled.borrow());
            assert_eq!(button.label(), "Send");
        }
    }

    #[test]
    fn http_mode_falls_back_to_contact_endpoint() {
        let submitter = Submitter::from_mode(&SubmissionMode::Http { endpoint: None });
        assert_eq!(
            submitter,
            Submitter::Http { endpoint: config::get_contact_endpoint().to_string() }
        );
        assert_eq!(submitter.success_message(), HTTP_SUCCESS);
    }

    #[test]
    fn default_mode_is_simulated() {
        let submitter = Submitter::from_mode(&SubmissionMode::default());
        assert_eq!(submitter, Submitter::Simulated { delay_ms: 1500 });
        assert_eq!(submitter.success_message(), SIMULATED_SUCCESS);
    }
}
