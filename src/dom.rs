use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::js_sys::Array;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, HtmlFormElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, ScrollBehavior, ScrollToOptions, Window,
};

use crate::config;
use crate::error::Result;

/// An event listener that stays attached until dropped.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new<F>(target: &EventTarget, event: &'static str, callback: F) -> Result<Self>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(callback) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// An IntersectionObserver that disconnects when dropped.
pub struct Observer {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Observer {
    /// `on_visible` runs for every entry that starts intersecting.
    pub fn new<F>(threshold: f64, root_margin: Option<&str>, mut on_visible: F) -> Result<Self>
    where
        F: FnMut(Element, &IntersectionObserver) + 'static,
    {
        let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    on_visible(entry.target(), &observer);
                }
            }
        }) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let options = IntersectionObserverInit::new();
        options.set_threshold(&threshold.into());
        if let Some(margin) = root_margin {
            options.set_root_margin(margin);
        }

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    pub fn observe(&self, element: &Element) {
        self.observer.observe(element);
    }
}

impl Drop for Observer {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Fixed elements the page is expected to carry. Any of them may be absent.
#[derive(Clone)]
pub struct Page {
    pub window: Window,
    pub document: Document,
    pub header: Option<HtmlElement>,
    pub nav_toggle: Option<HtmlElement>,
    pub nav_menu: Option<HtmlElement>,
    pub nav_links: Vec<HtmlElement>,
    pub modal: Option<HtmlElement>,
    pub modal_overlay: Option<HtmlElement>,
    pub modal_close: Option<HtmlElement>,
    pub show_form: Option<HtmlElement>,
    pub contact_form: Option<HtmlFormElement>,
    pub back_to_top: Option<HtmlElement>,
}

impl Page {
    pub fn lookup(window: Window, document: Document) -> Self {
        let by_id = |id: &str| {
            document
                .get_element_by_id(id)
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        };

        Self {
            header: by_id(config::HEADER_ID),
            nav_toggle: by_id(config::NAV_TOGGLE_ID),
            nav_menu: by_id(config::NAV_MENU_ID),
            nav_links: query_all_as(&document, config::NAV_LINK_SELECTOR),
            modal: by_id(config::MODAL_ID),
            modal_overlay: by_id(config::MODAL_OVERLAY_ID),
            modal_close: by_id(config::MODAL_CLOSE_ID),
            show_form: by_id(config::SHOW_FORM_ID),
            contact_form: document
                .get_element_by_id(config::CONTACT_FORM_ID)
                .and_then(|el| el.dyn_into::<HtmlFormElement>().ok()),
            back_to_top: by_id(config::BACK_TO_TOP_ID),
            window,
            document,
        }
    }

    pub fn header_height(&self) -> f64 {
        self.header
            .as_ref()
            .map(|header| header.offset_height() as f64)
            .unwrap_or(0.0)
    }

    pub fn scroll_offset(&self) -> f64 {
        self.window.page_y_offset().unwrap_or(0.0)
    }

    pub fn viewport_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(0.0)
    }

    pub fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0)
    }

    pub fn smooth_scroll_to(&self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    pub fn set_body_overflow(&self, overflow: &str) {
        if let Some(body) = self.document.body() {
            set_style(&body, "overflow", overflow);
        }
    }
}

/// Every element matching `selector`, narrowed to `T`.
pub fn query_all_as<T: JsCast>(root: &impl AsRef<web_sys::Node>, selector: &str) -> Vec<T> {
    let root = root.as_ref();
    let list = if let Some(document) = root.dyn_ref::<Document>() {
        document.query_selector_all(selector)
    } else if let Some(element) = root.dyn_ref::<Element>() {
        element.query_selector_all(selector)
    } else {
        return Vec::new();
    };

    let Ok(list) = list else {
        log::warn!("Invalid selector {}", selector);
        return Vec::new();
    };

    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}

pub fn query_one_as<T: JsCast>(root: &Element, selector: &str) -> Option<T> {
    root.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<T>().ok())
}

pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    let _ = element.style().set_property(property, value);
}

pub fn set_class(element: &Element, class: &str, on: bool) {
    let classes = element.class_list();
    let _ = if on {
        classes.add_1(class)
    } else {
        classes.remove_1(class)
    };
}

/// Whether `event` originated inside `container`.
pub fn event_within(event: &Event, container: &web_sys::Node) -> bool {
    event
        .target()
        .and_then(|target| target.dyn_into::<web_sys::Node>().ok())
        .map(|node| container.contains(Some(&node)))
        .unwrap_or(false)
}
