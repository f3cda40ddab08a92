use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Info,
}

impl Severity {
    /// Parses the `type` argument scripts pass to `showNotification`.
    /// Unknown values fall back to info.
    pub fn parse(kind: Option<&str>) -> Self {
        match kind {
            Some("success") => Severity::Success,
            Some("error") => Severity::Error,
            _ => Severity::Info,
        }
    }

    pub fn background(&self) -> &'static str {
        match self {
            Severity::Success => "#10b981",
            Severity::Error => "#ef4444",
            Severity::Info => "#3b82f6",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub notification: Notification,
    pub leaving: bool,
}

pub enum ToastAction {
    Push(Notification),
    /// Starts the exit transition.
    Expire(u32),
    Remove(u32),
}

/// Visible toasts, oldest first. Identical messages stack.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ToastList {
    next_id: u32,
    pub toasts: Vec<Toast>,
}

impl Reducible for ToastList {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ToastAction::Push(notification) => {
                next.toasts.push(Toast {
                    id: next.next_id,
                    notification,
                    leaving: false,
                });
                next.next_id = next.next_id.wrapping_add(1);
            }
            ToastAction::Expire(id) => {
                if let Some(toast) = next.toasts.iter_mut().find(|t| t.id == id) {
                    toast.leaving = true;
                }
            }
            ToastAction::Remove(id) => next.toasts.retain(|t| t.id != id),
        }
        next.into()
    }
}

#[derive(Default)]
struct BusInner {
    sink: Option<Callback<Notification>>,
    pending: Vec<Notification>,
}

/// Hands notifications from imperative code to the mounted host. Anything
/// sent before the host attaches is queued.
#[derive(Clone, Default)]
pub struct NotificationBus {
    inner: Rc<RefCell<BusInner>>,
}

impl PartialEq for NotificationBus {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl NotificationBus {
    pub fn send(&self, notification: Notification) {
        let sink = self.inner.borrow().sink.clone();
        match sink {
            Some(sink) => sink.emit(notification),
            None => self.inner.borrow_mut().pending.push(notification),
        }
    }

    pub fn attach(&self, sink: Callback<Notification>) {
        let pending = {
            let mut inner = self.inner.borrow_mut();
            inner.sink = Some(sink.clone());
            std::mem::take(&mut inner.pending)
        };
        for notification in pending {
            sink.emit(notification);
        }
    }

    pub fn detach(&self) {
        self.inner.borrow_mut().sink = None;
    }
}

#[derive(Properties, PartialEq)]
pub struct NotificationHostProps {
    pub bus: NotificationBus,
    pub ttl_ms: u32,
    pub exit_ms: u32,
}

#[function_component(NotificationHost)]
pub fn notification_host(props: &NotificationHostProps) -> Html {
    let toasts = use_reducer(ToastList::default);

    {
        let toasts = toasts.clone();
        let bus = props.bus.clone();
        use_effect_with_deps(
            move |bus: &NotificationBus| {
                bus.attach(Callback::from(move |notification| {
                    toasts.dispatch(ToastAction::Push(notification))
                }));
                let bus = bus.clone();
                move || bus.detach()
            },
            bus,
        );
    }

    let on_expire = {
        let toasts = toasts.clone();
        Callback::from(move |id| toasts.dispatch(ToastAction::Expire(id)))
    };
    let on_removed = {
        let toasts = toasts.clone();
        Callback::from(move |id| toasts.dispatch(ToastAction::Remove(id)))
    };

    html! {
        <div class="notification-stack" style="position: fixed; top: 90px; right: 20px; z-index: 9999; display: flex; flex-direction: column; align-items: flex-end; gap: 0.5rem; max-width: 90%;">
            {
                for toasts.toasts.iter().map(|toast| html! {
                    <ToastView
                        key={toast.id}
                        toast={toast.clone()}
                        ttl_ms={props.ttl_ms}
                        exit_ms={props.exit_ms}
                        on_expire={on_expire.clone()}
                        on_removed={on_removed.clone()}
                    />
                })
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastProps {
    pub toast: Toast,
    pub ttl_ms: u32,
    pub exit_ms: u32,
    pub on_expire: Callback<u32>,
    pub on_removed: Callback<u32>,
}

#[function_component(ToastView)]
fn toast_view(props: &ToastProps) -> Html {
    let id = props.toast.id;

    {
        let on_expire = props.on_expire.clone();
        let ttl_ms = props.ttl_ms;
        use_effect_with_deps(
            move |_| {
                let timeout = Timeout::new(ttl_ms, move || on_expire.emit(id));
                move || drop(timeout)
            },
            id,
        );
    }

    {
        let on_removed = props.on_removed.clone();
        let exit_ms = props.exit_ms;
        use_effect_with_deps(
            move |leaving: &bool| {
                let timeout = leaving.then(|| Timeout::new(exit_ms, move || on_removed.emit(id)));
                move || drop(timeout)
            },
            props.toast.leaving,
        );
    }

    let animation = if props.toast.leaving {
        "slideOutRight 0.3s ease-in forwards"
    } else {
        "slideInRight 0.3s ease-out"
    };

    let style = format!(
        "padding: 1rem 1.5rem; background-color: {}; color: white; border-radius: var(--radius-md); box-shadow: var(--shadow-xl); animation: {}; font-size: var(--text-sm);",
        props.toast.notification.severity.background(),
        animation,
    );

    html! {
        <div class="notification" role="status" {style}>
            { &props.toast.notification.message }
        </div>
    }
}

/// Mounted toast host plus the bus feeding it.
pub struct Notifier {
    bus: NotificationBus,
    app: Option<yew::AppHandle<NotificationHost>>,
}

impl Notifier {
    /// Renders the host into `root`.
    pub fn mount(root: web_sys::Element, ttl_ms: u32, exit_ms: u32) -> Self {
        let bus = NotificationBus::default();
        let props = NotificationHostProps {
            bus: bus.clone(),
            ttl_ms,
            exit_ms,
        };
        let app = yew::Renderer::<NotificationHost>::with_root_and_props(root, props).render();
        Self { bus, app: Some(app) }
    }

    pub fn notify(&self, message: impl Into<String>, severity: Severity) {
        self.bus.send(Notification {
            message: message.into(),
            severity,
        });
    }

    pub fn unmount(&mut self) {
        if let Some(app) = self.app.take() {
            app.destroy();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(message: &str) -> Notification {
        Notification {
            message: message.to_string(),
            severity: Severity::Info,
        }
    }

    fn reduce(list: Rc<ToastList>, action: ToastAction) -> Rc<ToastList> {
        list.reduce(action)
    }

    #[test]
    fn duplicate_messages_stack() {
        let list = Rc::new(ToastList::default());
        let list = reduce(list, ToastAction::Push(note("Saved")));
        let list = reduce(list, ToastAction::Push(note("Saved")));

        assert_eq!(list.toasts.len(), 2);
        assert_ne!(list.toasts[0].id, list.toasts[1].id);
    }

    #[test]
    fn expire_then_remove() {
        let list = Rc::new(ToastList::default());
        let list = reduce(list, ToastAction::Push(note("one")));
        let list = reduce(list, ToastAction::Push(note("two")));
        let first = list.toasts[0].id;

        let list = reduce(list, ToastAction::Expire(first));
        assert!(list.toasts[0].leaving);
        assert!(!list.toasts[1].leaving);

        let list = reduce(list, ToastAction::Remove(first));
        assert_eq!(list.toasts.len(), 1);
        assert_eq!(list.toasts[0].notification.message, "two");
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let list = Rc::new(ToastList::default());
        let list = reduce(list, ToastAction::Push(note("kept")));
        let list = reduce(list, ToastAction::Expire(42));
        let list = reduce(list, ToastAction::Remove(42));
        assert_eq!(list.toasts.len(), 1);
        assert!(!list.toasts[0].leaving);
    }

    #[test]
    fn severity_colors() {
        assert_eq!(Severity::parse(Some("success")).background(), "#10b981");
        assert_eq!(Severity::parse(Some("error")).background(), "#ef4444");
        assert_eq!(Severity::parse(Some("warning")), Severity::Info);
        assert_eq!(Severity::parse(None).background(), "#3b82f6");
    }

    #[test]
    fn bus_queues_until_attached() {
        let bus = NotificationBus::default();
        bus.send(note("early"));

        let received = Rc::new(RefCell::new(Vec::new()));
        let sink = {
            let received = received.clone();
            Callback::from(move |n: Notification| received.borrow_mut().push(n.message))
        };
        bus.attach(sink);
        bus.send(note("late"));

        assert_eq!(*received.borrow(), vec!["early".to_string(), "late".to_string()]);

        bus.detach();
        bus.send(note("queued"));
        assert_eq!(received.borrow().len(), 2);
    }
}
