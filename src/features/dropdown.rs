use std::rc::Rc;

use web_sys::{Element, Event, HtmlElement};

use crate::config;
use crate::controller::{Context, Feature};
use crate::dom::{self, Listener};
use crate::error::Result;
use crate::timer::{self, SharedTimerSlot};

const FADE_IN_DELAY_MS: u32 = 10;
const HIDE_AFTER_FADE_MS: u32 = 200;
const HIDDEN_TRANSFORM: &str = "translateY(-10px)";

fn show(content: &HtmlElement) {
    dom::set_style(content, "opacity", "1");
    dom::set_style(content, "transform", "translateY(0)");
}

fn fade_out(content: &HtmlElement) {
    dom::set_style(content, "opacity", "0");
    dom::set_style(content, "transform", HIDDEN_TRANSFORM);
}

fn is_displayed(content: &HtmlElement) -> bool {
    content
        .style()
        .get_property_value("display")
        .map(|display| display == "block")
        .unwrap_or(false)
}

/// Hover dropdowns on wide viewports, tap-to-toggle on narrow ones. Each
/// dropdown owns one timer slot, so a new hover replaces a pending close.
#[derive(Default)]
pub struct Dropdowns {
    listeners: Vec<Listener>,
    slots: Vec<SharedTimerSlot>,
}

impl Feature for Dropdowns {
    fn name(&self) -> &'static str {
        "dropdowns"
    }

    fn init(&mut self, ctx: &Rc<Context>) -> Result<()> {
        let dropdowns: Vec<Element> = dom::query_all_as(&ctx.page.document, config::DROPDOWN_SELECTOR);
        let all_contents: Rc<Vec<HtmlElement>> =
            Rc::new(dom::query_all_as(&ctx.page.document, config::DROPDOWN_CONTENT_SELECTOR));

        for dropdown in dropdowns {
            let Some(content) = dom::query_one_as::<HtmlElement>(&dropdown, config::DROPDOWN_CONTENT_SELECTOR) else {
                continue;
            };

            fade_out(&content);
            dom::set_style(&content, "transition", "opacity 0.2s ease, transform 0.2s ease");

            let slot = timer::shared_slot();

            {
                let ctx = ctx.clone();
                let slot = slot.clone();
                let content = content.clone();
                self.listeners.push(Listener::new(&dropdown, "mouseenter", move |_| {
                    if ctx.is_narrow() {
                        return;
                    }
                    dom::set_style(&content, "display", "block");
                    let content = content.clone();
                    slot.borrow_mut().schedule(FADE_IN_DELAY_MS, move || show(&content));
                })?);
            }

            {
                let ctx = ctx.clone();
                let slot = slot.clone();
                let content = content.clone();
                self.listeners.push(Listener::new(&dropdown, "mouseleave", move |_| {
                    if ctx.is_narrow() {
                        return;
                    }
                    let content = content.clone();
                    let owner = Rc::downgrade(&slot);
                    slot.borrow_mut().schedule(ctx.config.dropdown_close_delay_ms, move || {
                        fade_out(&content);
                        if let Some(slot) = owner.upgrade() {
                            slot.borrow_mut().schedule(HIDE_AFTER_FADE_MS, move || {
                                dom::set_style(&content, "display", "none");
                            });
                        }
                    });
                })?);
            }

            if let Some(link) = dom::query_one_as::<Element>(&dropdown, config::NAV_LINK_SELECTOR) {
                let ctx = ctx.clone();
                let all_contents = all_contents.clone();
                self.listeners.push(Listener::new(&link, "click", move |event: Event| {
                    if !ctx.is_narrow() {
                        return;
                    }
                    event.prevent_default();

                    let was_open = is_displayed(&content);
                    for other in all_contents.iter() {
                        dom::set_style(other, "display", "none");
                    }
                    dom::set_style(&content, "display", if was_open { "none" } else { "block" });
                })?);
            }

            self.slots.push(slot);
        }

        Ok(())
    }

    fn dispose(&mut self) {
        self.listeners.clear();
        for slot in self.slots.drain(..) {
            slot.borrow_mut().cancel();
        }
    }
}
