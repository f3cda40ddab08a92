use std::cell::RefCell;
use std::rc::Rc;

use crate::config;
use crate::controller::{Context, Feature};
use crate::dom::{self, Listener};
use crate::error::Result;
use crate::state::{self, HeaderScroll};

const SHADOW_ELEVATED: &str = "var(--shadow-md)";
const SHADOW_BASELINE: &str = "var(--shadow-sm)";

/// Header shadow and hide-on-scroll-down.
#[derive(Default)]
pub struct HeaderScrollFx {
    listener: Option<Listener>,
}

impl Feature for HeaderScrollFx {
    fn name(&self) -> &'static str {
        "header-scroll"
    }

    fn init(&mut self, ctx: &Rc<Context>) -> Result<()> {
        let Some(header) = ctx.page.header.clone() else {
            return Ok(());
        };

        // Height is measured once, at init.
        let tracker = RefCell::new(HeaderScroll::new(
            ctx.page.header_height(),
            ctx.config.header_shadow_offset,
        ));

        let handler = ctx.clone();
        self.listener = Some(Listener::new(&ctx.page.window, "scroll", move |_| {
            let chrome = tracker.borrow_mut().update(handler.page.scroll_offset());
            let shadow = if chrome.elevated { SHADOW_ELEVATED } else { SHADOW_BASELINE };
            dom::set_style(&header, "box-shadow", shadow);
            dom::set_class(&header, config::HEADER_HIDDEN_CLASS, chrome.hidden);
        })?);

        Ok(())
    }

    fn dispose(&mut self) {
        self.listener = None;
    }
}

/// The floating "back to top" control.
#[derive(Default)]
pub struct BackToTop {
    listeners: Vec<Listener>,
}

impl Feature for BackToTop {
    fn name(&self) -> &'static str {
        "back-to-top"
    }

    fn init(&mut self, ctx: &Rc<Context>) -> Result<()> {
        let Some(button) = ctx.page.back_to_top.clone() else {
            return Ok(());
        };

        let handler = ctx.clone();
        let control = button.clone();
        self.listeners.push(Listener::new(&ctx.page.window, "scroll", move |_| {
            let visible = state::back_to_top_visible(
                handler.page.scroll_offset(),
                handler.config.back_to_top_offset,
            );
            dom::set_class(&control, config::OPEN_CLASS, visible);
        })?);

        let handler = ctx.clone();
        self.listeners.push(Listener::new(&button, "click", move |_| {
            handler.page.smooth_scroll_to(0.0);
        })?);

        Ok(())
    }

    fn dispose(&mut self) {
        self.listeners.clear();
    }
}
