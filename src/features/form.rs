use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Element, Event, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlSelectElement, HtmlTextAreaElement, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition,
};

use crate::components::notification::Severity;
use crate::config;
use crate::controller::{Context, Feature};
use crate::dom::{self, Listener};
use crate::error::Result;
use crate::format;
use crate::submission::{self, SubmitGuard};
use crate::validation::{self, FieldInput, FieldKind};

/// Reads a form control into the validator's view of it.
fn field_input(field: &Element) -> Option<FieldInput> {
    let required = field.has_attribute("required");

    if let Some(input) = field.dyn_ref::<HtmlInputElement>() {
        let kind = FieldKind::from_input_type(&input.type_());
        Some(FieldInput::new(&input.value(), required, kind))
    } else if let Some(area) = field.dyn_ref::<HtmlTextAreaElement>() {
        Some(FieldInput::new(&area.value(), required, FieldKind::Text))
    } else {
        field
            .dyn_ref::<HtmlSelectElement>()
            .map(|select| FieldInput::new(&select.value(), required, FieldKind::Other))
    }
}

fn remove_error_message(field: &Element) {
    let existing = field
        .parent_element()
        .and_then(|parent| parent.query_selector(&format!(".{}", config::FIELD_ERROR_CLASS)).ok().flatten());
    if let Some(existing) = existing {
        existing.remove();
    }
}

fn show_error_message(field: &Element, message: &str) -> Result<()> {
    remove_error_message(field);

    let Some(parent) = field.parent_node() else {
        return Ok(());
    };
    let document = match field.owner_document() {
        Some(document) => document,
        None => return Ok(()),
    };

    let error = document.create_element("div")?.unchecked_into::<HtmlElement>();
    error.set_class_name(config::FIELD_ERROR_CLASS);
    dom::set_style(&error, "color", "var(--color-accent-600)");
    dom::set_style(&error, "font-size", "var(--text-sm)");
    dom::set_style(&error, "margin-top", "var(--spacing-xs)");
    error.set_text_content(Some(message));
    parent.append_child(&error)?;
    Ok(())
}

/// Validates one control and renders the outcome next to it.
fn validate_field(field: &Element) -> bool {
    let Some(input) = field_input(field) else {
        return true;
    };

    let result = validation::validate(&input);
    match result.error_message() {
        None => {
            dom::set_class(field, config::ERROR_CLASS, false);
            remove_error_message(field);
        }
        Some(message) => {
            dom::set_class(field, config::ERROR_CLASS, true);
            if let Err(e) = show_error_message(field, message) {
                log::warn!("Could not render field error: {}", e);
            }
        }
    }
    result.is_valid()
}

fn focus_first_invalid(form: &HtmlFormElement) {
    let Some(first) = dom::query_one_as::<HtmlElement>(form, &format!(".{}", config::ERROR_CLASS)) else {
        return;
    };
    let _ = first.focus();

    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Center);
    first.scroll_into_view_with_scroll_into_view_options(&options);
}

fn handle_submit(ctx: &Rc<Context>, form: &HtmlFormElement) {
    let required: Vec<Element> = dom::query_all_as(form, config::REQUIRED_SELECTOR);
    // Every field is validated so each one shows its own message.
    let invalid = required.iter().filter(|field| !validate_field(field)).count();
    if invalid > 0 {
        log::debug!("Contact form blocked, {} invalid field(s)", invalid);
        focus_first_invalid(form);
        return;
    }

    let fields = match submission::collect_fields(form) {
        Ok(fields) => fields,
        Err(e) => {
            log::error!("Could not read contact form: {}", e);
            ctx.notify(submission::FAILURE, Severity::Error);
            return;
        }
    };

    let guard = dom::query_one_as::<HtmlButtonElement>(form, config::SUBMIT_BUTTON_SELECTOR)
        .map(SubmitGuard::engage);

    let ctx = ctx.clone();
    let form = form.clone();
    spawn_local(async move {
        let _guard = guard;
        match ctx.submitter.submit(&fields).await {
            Ok(()) => {
                ctx.notify(ctx.submitter.success_message(), Severity::Success);
                form.reset();
                ctx.close_modal();
            }
            Err(e) => {
                log::error!("Contact form submission failed: {}", e);
                ctx.notify(submission::FAILURE, Severity::Error);
            }
        }
    });
}

/// Inline validation and submission of the contact form.
#[derive(Default)]
pub struct ContactForm {
    listeners: Vec<Listener>,
}

impl Feature for ContactForm {
    fn name(&self) -> &'static str {
        "contact-form"
    }

    fn init(&mut self, ctx: &Rc<Context>) -> Result<()> {
        let Some(form) = ctx.page.contact_form.clone() else {
            return Ok(());
        };

        let handler = ctx.clone();
        let target = form.clone();
        self.listeners.push(Listener::new(&form, "submit", move |event: Event| {
            event.prevent_default();
            handle_submit(&handler, &target);
        })?);

        let fields: Vec<Element> = dom::query_all_as(&form, config::FOCUSABLE_SELECTOR);
        for field in fields {
            let on_blur = field.clone();
            self.listeners.push(Listener::new(&field, "blur", move |_| {
                validate_field(&on_blur);
            })?);

            // Once a field shows an error, re-check it as the user types.
            let on_input = field.clone();
            self.listeners.push(Listener::new(&field, "input", move |_| {
                if on_input.class_list().contains(config::ERROR_CLASS) {
                    validate_field(&on_input);
                }
            })?);
        }

        Ok(())
    }

    fn dispose(&mut self) {
        self.listeners.clear();
    }
}

/// Phone number formatting and the date inputs' lower bound.
#[derive(Default)]
pub struct FieldEnhancements {
    listeners: Vec<Listener>,
}

impl Feature for FieldEnhancements {
    fn name(&self) -> &'static str {
        "field-enhancements"
    }

    fn init(&mut self, ctx: &Rc<Context>) -> Result<()> {
        let phones: Vec<HtmlInputElement> = dom::query_all_as(&ctx.page.document, config::TEL_INPUT_SELECTOR);
        for phone in phones {
            let write_back = ctx.config.format_phone_on_input;
            let input = phone.clone();
            self.listeners.push(Listener::new(&phone, "input", move |_| {
                let formatted = format::format_uk_phone(&input.value());
                if write_back {
                    input.set_value(&formatted);
                } else {
                    log::debug!("Formatted phone number (not applied): {}", formatted);
                }
            })?);
        }

        let dates: Vec<Element> = dom::query_all_as(&ctx.page.document, config::DATE_INPUT_SELECTOR);
        if !dates.is_empty() {
            let today = format::today_iso();
            for date in &dates {
                date.set_attribute("min", &today)?;
            }
        }

        Ok(())
    }

    fn dispose(&mut self) {
        self.listeners.clear();
    }
}
