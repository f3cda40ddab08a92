use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use crate::config;
use crate::controller::{Context, Feature};
use crate::dom::{self, Observer};
use crate::error::Result;
use crate::format;

/// Cards and process steps fade and slide in the first time they scroll
/// into view.
#[derive(Default)]
pub struct RevealOnScroll {
    observer: Option<Observer>,
}

impl Feature for RevealOnScroll {
    fn name(&self) -> &'static str {
        "reveal-on-scroll"
    }

    fn init(&mut self, ctx: &Rc<Context>) -> Result<()> {
        let elements: Vec<HtmlElement> = dom::query_all_as(&ctx.page.document, config::REVEAL_SELECTOR);
        if elements.is_empty() {
            return Ok(());
        }

        let observer = Observer::new(
            ctx.config.reveal_threshold,
            Some(ctx.config.reveal_root_margin.as_str()),
            |target, observer| {
                if let Some(element) = target.dyn_ref::<HtmlElement>() {
                    dom::set_style(element, "opacity", "1");
                    dom::set_style(element, "transform", "translateY(0)");
                }
                observer.unobserve(&target);
            },
        )?;

        for (index, element) in elements.iter().enumerate() {
            dom::set_style(element, "opacity", "0");
            dom::set_style(element, "transform", "translateY(30px)");
            dom::set_style(element, "transition", &format::reveal_transition(index));
            observer.observe(element);
        }

        log::debug!("Watching {} reveal elements", elements.len());
        self.observer = Some(observer);
        Ok(())
    }

    fn dispose(&mut self) {
        self.observer = None;
    }
}

/// Swaps `data-src` into `src` the first time a lazy image nears the
/// viewport.
#[derive(Default)]
pub struct LazyImages {
    observer: Option<Observer>,
}

impl Feature for LazyImages {
    fn name(&self) -> &'static str {
        "lazy-images"
    }

    fn init(&mut self, ctx: &Rc<Context>) -> Result<()> {
        let images: Vec<Element> = dom::query_all_as(&ctx.page.document, config::LAZY_IMAGE_SELECTOR);
        if images.is_empty() {
            return Ok(());
        }

        let observer = Observer::new(0.0, None, |image, observer| {
            if let Some(src) = image.get_attribute("data-src") {
                let _ = image.set_attribute("src", &src);
                let _ = image.remove_attribute("data-src");
            }
            observer.unobserve(&image);
        })?;

        for image in &images {
            observer.observe(image);
        }
        self.observer = Some(observer);
        Ok(())
    }

    fn dispose(&mut self) {
        self.observer = None;
    }
}
