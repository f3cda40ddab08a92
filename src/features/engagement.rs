use std::rc::Rc;

use web_sys::Element;

use crate::analytics;
use crate::config;
use crate::controller::{Context, Feature};
use crate::dom::{self, Listener};
use crate::error::Result;

/// Analytics events for call-to-action buttons and event cards.
#[derive(Default)]
pub struct Engagement {
    listeners: Vec<Listener>,
}

impl Feature for Engagement {
    fn name(&self) -> &'static str {
        "engagement"
    }

    fn init(&mut self, ctx: &Rc<Context>) -> Result<()> {
        let buttons: Vec<Element> = dom::query_all_as(&ctx.page.document, config::CTA_SELECTOR);
        for button in buttons {
            let this = button.clone();
            self.listeners.push(Listener::new(&button, "click", move |_| {
                let text = this.text_content().unwrap_or_default();
                analytics::track_event("CTA", "click", Some(text.trim()));
            })?);
        }

        let cards: Vec<Element> = dom::query_all_as(&ctx.page.document, config::EVENT_CARD_SELECTOR);
        for card in cards {
            let this = card.clone();
            self.listeners.push(Listener::new(&card, "click", move |_| {
                let title = this
                    .query_selector(config::EVENT_CARD_TITLE_SELECTOR)
                    .ok()
                    .flatten()
                    .and_then(|title| title.text_content());
                analytics::track_event("Event", "view", title.as_deref());
            })?);
        }

        Ok(())
    }

    fn dispose(&mut self) {
        self.listeners.clear();
    }
}
