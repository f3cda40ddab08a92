use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::{Object, Reflect};
use web_sys::{HtmlElement, PerformanceNavigationTiming};

use crate::analytics;
use crate::components::notification::{Notifier, Severity};
use crate::config::{self, InteractionConfig};
use crate::dom::{self, Page};
use crate::error::Result;
use crate::features::{dropdown, engagement, form, header, modal, navigation, reveal};
use crate::state::UiState;
use crate::submission::Submitter;
use crate::timer::TimerSlot;

/// Everything the feature controllers share: page references, the
/// interaction flags and the tunables.
pub struct Context {
    pub page: Page,
    pub config: InteractionConfig,
    pub submitter: Submitter,
    state: RefCell<UiState>,
    notifier: RefCell<Option<Notifier>>,
    focus_timer: RefCell<TimerSlot>,
}

impl Context {
    pub fn new(page: Page, config: InteractionConfig) -> Self {
        let submitter = Submitter::from_mode(&config.submission);
        Self {
            page,
            config,
            submitter,
            state: RefCell::new(UiState::default()),
            notifier: RefCell::new(None),
            focus_timer: RefCell::new(TimerSlot::default()),
        }
    }

    pub fn state(&self) -> UiState {
        self.state.borrow().clone()
    }

    pub fn is_narrow(&self) -> bool {
        self.config.is_narrow(self.page.viewport_width())
    }

    fn sync_scroll_lock(&self) {
        let overflow = self.state.borrow().scroll_lock().overflow();
        self.page.set_body_overflow(overflow);
    }

    pub fn toggle_menu(&self) {
        let open = self.state.borrow_mut().toggle_menu();
        if open {
            if let Some(menu) = &self.page.nav_menu {
                dom::set_class(menu, config::OPEN_CLASS, true);
            }
            if let Some(toggle) = &self.page.nav_toggle {
                dom::set_class(toggle, config::ACTIVE_CLASS, true);
            }
            self.sync_scroll_lock();
        } else {
            self.close_menu();
        }
    }

    pub fn close_menu(&self) {
        self.state.borrow_mut().close_menu();
        if let Some(menu) = &self.page.nav_menu {
            dom::set_class(menu, config::OPEN_CLASS, false);
        }
        if let Some(toggle) = &self.page.nav_toggle {
            dom::set_class(toggle, config::ACTIVE_CLASS, false);
        }
        self.sync_scroll_lock();
    }

    /// Highlights `active` and clears every other nav link.
    pub fn set_active_link(&self, active: &HtmlElement) {
        for link in &self.page.nav_links {
            dom::set_class(link, config::ACTIVE_CLASS, link == active);
        }
    }

    pub fn open_modal(&self) {
        let Some(modal) = &self.page.modal else {
            return;
        };

        dom::set_class(modal, config::OPEN_CLASS, true);
        if self.state.borrow_mut().open_modal() {
            log::info!("Contact modal opened");
        }
        self.sync_scroll_lock();

        if let Some(first) = dom::query_one_as::<HtmlElement>(modal, config::FOCUSABLE_SELECTOR) {
            self.focus_timer
                .borrow_mut()
                .schedule(self.config.modal_focus_delay_ms, move || {
                    let _ = first.focus();
                });
        }
    }

    pub fn close_modal(&self) {
        let Some(modal) = &self.page.modal else {
            return;
        };

        dom::set_class(modal, config::OPEN_CLASS, false);
        self.focus_timer.borrow_mut().cancel();
        if self.state.borrow_mut().close_modal() {
            log::info!("Contact modal closed");
        }
        self.sync_scroll_lock();
    }

    pub fn notify(&self, message: &str, severity: Severity) {
        match self.notifier.borrow().as_ref() {
            Some(notifier) => notifier.notify(message, severity),
            None => log::warn!("Notification dropped, host not mounted: {}", message),
        }
    }

    /// Mounts the toast host in a container appended to the body.
    fn mount_notifier(&self) -> Result<()> {
        let document = &self.page.document;
        let root = match document.get_element_by_id(config::NOTIFICATION_ROOT_ID) {
            Some(root) => root,
            None => {
                let root = document.create_element("div")?;
                root.set_id(config::NOTIFICATION_ROOT_ID);
                if let Some(body) = document.body() {
                    body.append_child(&root)?;
                }
                root
            }
        };

        *self.notifier.borrow_mut() = Some(Notifier::mount(
            root,
            self.config.notification_ttl_ms,
            self.config.notification_exit_ms,
        ));
        Ok(())
    }

    fn unmount_notifier(&self) {
        if let Some(mut notifier) = self.notifier.borrow_mut().take() {
            notifier.unmount();
        }
    }
}

/// A group of listeners wired up together and torn down together.
pub trait Feature {
    fn name(&self) -> &'static str;

    /// Attaches listeners. Missing elements mean there is nothing to wire,
    /// which is not an error.
    fn init(&mut self, ctx: &Rc<Context>) -> Result<()>;

    /// Detaches everything `init` attached.
    fn dispose(&mut self);
}

pub struct Controller {
    ctx: Rc<Context>,
    features: Vec<Box<dyn Feature>>,
}

impl Controller {
    pub fn new(ctx: Context) -> Self {
        Self {
            ctx: Rc::new(ctx),
            features: vec![
                Box::new(navigation::Navigation::default()),
                Box::new(header::HeaderScrollFx::default()),
                Box::new(modal::ModalFeature::default()),
                Box::new(form::ContactForm::default()),
                Box::new(header::BackToTop::default()),
                Box::new(navigation::SmoothScroll::default()),
                Box::new(dropdown::Dropdowns::default()),
                Box::new(reveal::RevealOnScroll::default()),
                Box::new(navigation::SectionHighlight::default()),
                Box::new(reveal::LazyImages::default()),
                Box::new(form::FieldEnhancements::default()),
                Box::new(navigation::ResizeHandler::default()),
                Box::new(engagement::Engagement::default()),
            ],
        }
    }

    pub fn context(&self) -> &Rc<Context> {
        &self.ctx
    }

    pub fn init(&mut self) {
        log::info!("StayGo Premium - Initializing...");

        if let Err(e) = self.ctx.mount_notifier() {
            log::warn!("Notifications unavailable: {}", e);
        }

        for feature in self.features.iter_mut() {
            if let Err(e) = feature.init(&self.ctx) {
                log::warn!("Feature {} disabled: {}", feature.name(), e);
            }
        }

        log_page_timing(&self.ctx.page);
        log::info!("StayGo Premium - Initialized successfully ✓");
    }

    pub fn dispose(&mut self) {
        for feature in self.features.iter_mut().rev() {
            feature.dispose();
        }
        self.ctx.focus_timer.borrow_mut().cancel();
        self.ctx.unmount_notifier();
        log::info!("StayGo Premium - Disposed");
    }
}

fn log_page_timing(page: &Page) {
    let Some(performance) = page.window.performance() else {
        return;
    };
    let Some(navigation) = performance
        .get_entries_by_type("navigation")
        .get(0)
        .dyn_into::<PerformanceNavigationTiming>()
        .ok()
    else {
        return;
    };

    log::info!(
        "Page Load Time: {} ms",
        navigation.load_event_end() - navigation.fetch_start()
    );
    log::info!(
        "DOM Content Loaded: {} ms",
        navigation.dom_content_loaded_event_end() - navigation.fetch_start()
    );
}

thread_local! {
    static CONTROLLER: RefCell<Option<Controller>> = RefCell::new(None);
}

fn with_context(f: impl FnOnce(&Rc<Context>)) {
    let ctx = CONTROLLER.with(|c| c.borrow().as_ref().map(|c| c.context().clone()));
    match ctx {
        Some(ctx) => f(&ctx),
        None => log::warn!("StayGo Premium is not initialized"),
    }
}

/// Builds the controller for the current page and keeps it for the page's
/// lifetime. Calling it again replaces the previous instance.
pub fn start() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    let config = InteractionConfig::from_window(&window);
    let page = Page::lookup(window, document);
    let mut controller = Controller::new(Context::new(page, config));

    stop();
    controller.init();
    CONTROLLER.with(|c| *c.borrow_mut() = Some(controller));

    if let Err(e) = expose_namespace() {
        log::warn!("Could not publish window.{}: {}", config::NAMESPACE_GLOBAL, e);
    }
}

/// Tears down the running controller, if any.
pub fn stop() {
    let previous = CONTROLLER.with(|c| c.borrow_mut().take());
    if let Some(mut controller) = previous {
        controller.dispose();
    }
}

/// Publishes `window.StayGoPremium` so other scripts on the page can drive
/// the modal, raise notifications and record analytics events.
fn expose_namespace() -> Result<()> {
    let Some(window) = web_sys::window() else {
        return Ok(());
    };
    let namespace = Object::new();

    let open_modal = Closure::wrap(Box::new(|| with_context(|ctx| ctx.open_modal())) as Box<dyn Fn()>);
    let close_modal = Closure::wrap(Box::new(|| with_context(|ctx| ctx.close_modal())) as Box<dyn Fn()>);
    let show_notification = Closure::wrap(Box::new(|message: String, kind: Option<String>| {
        with_context(|ctx| ctx.notify(&message, Severity::parse(kind.as_deref())))
    }) as Box<dyn Fn(String, Option<String>)>);
    let track_event = Closure::wrap(Box::new(|category: String, action: String, label: Option<String>| {
        analytics::track_event(&category, &action, label.as_deref())
    }) as Box<dyn Fn(String, String, Option<String>)>);
    let dispose = Closure::wrap(Box::new(stop) as Box<dyn Fn()>);

    let entries: [(&str, JsValue); 5] = [
        ("openModal", open_modal.into_js_value()),
        ("closeModal", close_modal.into_js_value()),
        ("showNotification", show_notification.into_js_value()),
        ("trackEvent", track_event.into_js_value()),
        ("dispose", dispose.into_js_value()),
    ];
    for (name, function) in entries.iter() {
        Reflect::set(&namespace, &(*name).into(), function)?;
    }

    Reflect::set(&window, &config::NAMESPACE_GLOBAL.into(), &namespace)?;
    Ok(())
}
