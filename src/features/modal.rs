use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement, KeyboardEvent};

use crate::config;
use crate::controller::{Context, Feature};
use crate::dom::{self, Listener};
use crate::error::Result;

/// Contact modal: opened by the "show form" button, closed by the close
/// button, an overlay click or Escape.
#[derive(Default)]
pub struct ModalFeature {
    listeners: Vec<Listener>,
}

impl Feature for ModalFeature {
    fn name(&self) -> &'static str {
        "modal"
    }

    fn init(&mut self, ctx: &Rc<Context>) -> Result<()> {
        let page = &ctx.page;

        if let Some(button) = &page.show_form {
            let handler = ctx.clone();
            self.listeners.push(Listener::new(button, "click", move |_| handler.open_modal())?);
        }

        for dismiss in [&page.modal_close, &page.modal_overlay].into_iter().flatten() {
            let handler = ctx.clone();
            self.listeners.push(Listener::new(dismiss, "click", move |_| handler.close_modal())?);
        }

        let handler = ctx.clone();
        self.listeners.push(Listener::new(&page.document, "keydown", move |event: Event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if event.key() == "Escape" && handler.state().modal_open() {
                handler.close_modal();
            }
        })?);

        // Clicks inside the dialog must not reach the overlay.
        let content = page
            .modal
            .as_ref()
            .and_then(|modal| dom::query_one_as::<HtmlElement>(modal, config::MODAL_CONTENT_SELECTOR));
        if let Some(content) = content {
            self.listeners.push(Listener::new(&content, "click", |event: Event| {
                event.stop_propagation();
            })?);
        }

        Ok(())
    }

    fn dispose(&mut self) {
        self.listeners.clear();
    }
}
