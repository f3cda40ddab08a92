use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;

/// Holds at most one pending timeout. Scheduling again drops, and so
/// cancels, whatever was pending.
#[derive(Default)]
pub struct TimerSlot {
    pending: Option<Timeout>,
}

impl TimerSlot {
    pub fn schedule<F>(&mut self, millis: u32, callback: F)
    where
        F: FnOnce() + 'static,
    {
        self.pending = Some(Timeout::new(millis, callback));
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

/// Shared slot that callbacks can reschedule from inside a firing timeout.
pub type SharedTimerSlot = Rc<RefCell<TimerSlot>>;

pub fn shared_slot() -> SharedTimerSlot {
    Rc::new(RefCell::new(TimerSlot::default()))
}

/// Coalesces bursts of calls into one trailing call after `wait_ms` of quiet.
pub struct Debouncer {
    slot: SharedTimerSlot,
    wait_ms: u32,
    callback: Rc<dyn Fn()>,
}

impl Debouncer {
    pub fn new<F>(wait_ms: u32, callback: F) -> Self
    where
        F: Fn() + 'static,
    {
        Self {
            slot: shared_slot(),
            wait_ms,
            callback: Rc::new(callback),
        }
    }

    pub fn call(&self) {
        let callback = self.callback.clone();
        let slot = Rc::downgrade(&self.slot);
        self.slot.borrow_mut().schedule(self.wait_ms, move || {
            if let Some(slot) = slot.upgrade() {
                slot.borrow_mut().cancel();
            }
            callback();
        });
    }

    /// Runs the callback now, bypassing the quiet period.
    pub fn flush(&self) {
        self.slot.borrow_mut().cancel();
        (self.callback)();
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.slot.borrow_mut().cancel();
    }
}
