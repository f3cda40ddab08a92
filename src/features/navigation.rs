use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement};

use crate::config;
use crate::controller::{Context, Feature};
use crate::dom::{self, Listener, Observer};
use crate::error::Result;
use crate::format;
use crate::timer::Debouncer;

/// Smooth-scrolls to the element `href` names, leaving room for the fixed
/// header. Returns false when there is no such element.
fn scroll_to_anchor(ctx: &Context, href: &str) -> bool {
    let target = ctx
        .page
        .document
        .query_selector(href)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());

    match target {
        Some(target) => {
            let top = format::anchor_scroll_top(target.offset_top() as f64, ctx.page.header_height());
            ctx.page.smooth_scroll_to(top);
            true
        }
        None => false,
    }
}

/// Menu toggle, nav link clicks, click-outside and wide-viewport close.
#[derive(Default)]
pub struct Navigation {
    listeners: Vec<Listener>,
}

impl Feature for Navigation {
    fn name(&self) -> &'static str {
        "navigation"
    }

    fn init(&mut self, ctx: &Rc<Context>) -> Result<()> {
        if let (Some(toggle), Some(menu)) = (&ctx.page.nav_toggle, &ctx.page.nav_menu) {
            let on_toggle = ctx.clone();
            self.listeners.push(Listener::new(toggle, "click", move |_| {
                on_toggle.toggle_menu();
            })?);

            let outside = ctx.clone();
            let (toggle, menu) = (toggle.clone(), menu.clone());
            self.listeners.push(Listener::new(&ctx.page.document, "click", move |event: Event| {
                if outside.state().menu_open()
                    && !dom::event_within(&event, &menu)
                    && !dom::event_within(&event, &toggle)
                {
                    outside.close_menu();
                }
            })?);
        }

        for link in &ctx.page.nav_links {
            let ctx = ctx.clone();
            let this = link.clone();
            self.listeners.push(Listener::new(link, "click", move |event: Event| {
                if ctx.is_narrow() {
                    ctx.close_menu();
                }

                let Some(href) = this.get_attribute("href") else {
                    return;
                };
                if href.starts_with('#') {
                    event.prevent_default();
                    scroll_to_anchor(&ctx, &href);
                    ctx.set_active_link(&this);
                }
            })?);
        }

        let on_resize = ctx.clone();
        self.listeners.push(Listener::new(&ctx.page.window, "resize", move |_| {
            if !on_resize.is_narrow() && on_resize.state().menu_open() {
                on_resize.close_menu();
            }
        })?);

        Ok(())
    }

    fn dispose(&mut self) {
        self.listeners.clear();
    }
}

/// Smooth scrolling for in-page anchors outside the nav, which
/// [`Navigation`] already handles.
#[derive(Default)]
pub struct SmoothScroll {
    listeners: Vec<Listener>,
}

impl Feature for SmoothScroll {
    fn name(&self) -> &'static str {
        "smooth-scroll"
    }

    fn init(&mut self, ctx: &Rc<Context>) -> Result<()> {
        let anchors: Vec<Element> = dom::query_all_as(&ctx.page.document, config::ANCHOR_SELECTOR);

        for anchor in anchors {
            if anchor.matches(config::NAV_LINK_SELECTOR).unwrap_or(false) {
                continue;
            }

            let ctx = ctx.clone();
            let this = anchor.clone();
            self.listeners.push(Listener::new(&anchor, "click", move |event: Event| {
                let href = this.get_attribute("href").unwrap_or_default();
                if href == "#" {
                    event.prevent_default();
                    return;
                }
                if scroll_to_anchor(&ctx, &href) {
                    event.prevent_default();
                }
            })?);
        }

        Ok(())
    }

    fn dispose(&mut self) {
        self.listeners.clear();
    }
}

/// Moves the nav highlight to whichever section last scrolled into the
/// upper part of the viewport.
#[derive(Default)]
pub struct SectionHighlight {
    observer: Option<Observer>,
}

impl Feature for SectionHighlight {
    fn name(&self) -> &'static str {
        "section-highlight"
    }

    fn init(&mut self, ctx: &Rc<Context>) -> Result<()> {
        let sections: Vec<Element> = dom::query_all_as(&ctx.page.document, config::SECTION_SELECTOR);
        if sections.is_empty() || ctx.page.nav_links.is_empty() {
            return Ok(());
        }

        let handler = ctx.clone();
        let observer = Observer::new(
            ctx.config.section_threshold,
            Some(ctx.config.section_root_margin.as_str()),
            move |section, _| {
                let href = format::section_href(&section.id());
                let link = handler
                    .page
                    .nav_links
                    .iter()
                    .find(|link| link.get_attribute("href").as_deref() == Some(href.as_str()));
                if let Some(link) = link {
                    log::debug!("Section {} in view", href);
                    handler.set_active_link(link);
                }
            },
        )?;

        for section in &sections {
            observer.observe(section);
        }
        self.observer = Some(observer);
        Ok(())
    }

    fn dispose(&mut self) {
        self.observer = None;
    }
}

/// Debounced resize work: keeps `--vh` in sync with the real viewport and
/// closes the menu once the layout turns wide.
#[derive(Default)]
pub struct ResizeHandler {
    listener: Option<Listener>,
    debouncer: Option<Rc<Debouncer>>,
}

impl Feature for ResizeHandler {
    fn name(&self) -> &'static str {
        "resize"
    }

    fn init(&mut self, ctx: &Rc<Context>) -> Result<()> {
        let handler = ctx.clone();
        let debouncer = Rc::new(Debouncer::new(ctx.config.resize_debounce_ms, move || {
            let page = &handler.page;
            if let Some(root) = page
                .document
                .document_element()
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            {
                dom::set_style(&root, "--vh", &format::viewport_unit(page.viewport_height()));
            }

            if !handler.is_narrow() && handler.state().menu_open() {
                handler.close_menu();
            }
        }));

        let on_resize = debouncer.clone();
        self.listener = Some(Listener::new(&ctx.page.window, "resize", move |_| on_resize.call())?);

        debouncer.flush();
        self.debouncer = Some(debouncer);
        Ok(())
    }

    fn dispose(&mut self) {
        self.listener = None;
        self.debouncer = None;
    }
}
