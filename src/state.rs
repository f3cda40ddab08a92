use std::collections::BTreeSet;

/// Overlays that can suppress page scrolling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LockOwner {
    Menu,
    Modal,
}

/// Body scroll lock shared by the menu and the modal. The page stays locked
/// while any owner holds it.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ScrollLock {
    owners: BTreeSet<LockOwner>,
}

impl ScrollLock {
    pub fn acquire(&mut self, owner: LockOwner) {
        self.owners.insert(owner);
    }

    pub fn release(&mut self, owner: LockOwner) {
        self.owners.remove(&owner);
    }

    pub fn is_locked(&self) -> bool {
        !self.owners.is_empty()
    }

    /// Value for `body.style.overflow`.
    pub fn overflow(&self) -> &'static str {
        if self.is_locked() {
            "hidden"
        } else {
            ""
        }
    }
}

/// Page-lifetime interaction flags. Mutated only by event handlers.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct UiState {
    menu_open: bool,
    modal_open: bool,
    scroll_lock: ScrollLock,
}

impl UiState {
    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn modal_open(&self) -> bool {
        self.modal_open
    }

    pub fn scroll_lock(&self) -> &ScrollLock {
        &self.scroll_lock
    }

    /// Flips the menu and returns the new value.
    pub fn toggle_menu(&mut self) -> bool {
        if self.menu_open {
            self.close_menu();
        } else {
            self.menu_open = true;
            self.scroll_lock.acquire(LockOwner::Menu);
        }
        self.menu_open
    }

    /// Returns true when the menu was open.
    pub fn close_menu(&mut self) -> bool {
        let was_open = self.menu_open;
        self.menu_open = false;
        self.scroll_lock.release(LockOwner::Menu);
        was_open
    }

    /// Returns true when the modal was closed before.
    pub fn open_modal(&mut self) -> bool {
        let was_closed = !self.modal_open;
        self.modal_open = true;
        self.scroll_lock.acquire(LockOwner::Modal);
        was_closed
    }

    /// Returns true when the modal was open. Closing a closed modal changes
    /// nothing.
    pub fn close_modal(&mut self) -> bool {
        let was_open = self.modal_open;
        self.modal_open = false;
        self.scroll_lock.release(LockOwner::Modal);
        was_open
    }
}

/// What the header should look like after a scroll tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderChrome {
    pub elevated: bool,
    pub hidden: bool,
}

/// Derives scroll direction from successive offsets.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderScroll {
    last_offset: f64,
    header_height: f64,
    shadow_offset: f64,
}

impl HeaderScroll {
    pub fn new(header_height: f64, shadow_offset: f64) -> Self {
        Self {
            last_offset: 0.0,
            header_height,
            shadow_offset,
        }
    }

    pub fn update(&mut self, offset: f64) -> HeaderChrome {
        let chrome = HeaderChrome {
            elevated: offset > self.shadow_offset,
            hidden: offset > self.header_height && offset > self.last_offset,
        };
        self.last_offset = offset;
        chrome
    }
}

pub fn back_to_top_visible(offset: f64, threshold: f64) -> bool {
    offset > threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_starts_closed_and_unlocked() {
        let state = UiState::default();
        assert!(!state.menu_open());
        assert!(!state.modal_open());
        assert!(!state.scroll_lock().is_locked());
    }

    #[test]
    fn toggling_menu_twice_restores_state() {
        let mut state = UiState::default();

        assert!(state.toggle_menu());
        assert_eq!(state.scroll_lock().overflow(), "hidden");

        assert!(!state.toggle_menu());
        assert_eq!(state, UiState::default());
        assert_eq!(state.scroll_lock().overflow(), "");
    }

    #[test]
    fn closing_modal_is_idempotent() {
        let mut state = UiState::default();

        assert!(state.open_modal());
        assert!(state.scroll_lock().is_locked());
        assert!(!state.open_modal());

        assert!(state.close_modal());
        assert!(!state.scroll_lock().is_locked());
        assert!(!state.close_modal());
        assert!(!state.modal_open());
    }

    #[test]
    fn scroll_lock_held_until_both_overlays_close() {
        let mut state = UiState::default();
        state.toggle_menu();
        state.open_modal();

        state.close_modal();
        assert!(state.scroll_lock().is_locked());
        assert!(state.menu_open());

        state.close_menu();
        assert!(!state.scroll_lock().is_locked());
    }

    #[test]
    fn menu_and_modal_flags_are_independent() {
        let mut state = UiState::default();
        state.open_modal();
        state.toggle_menu();
        state.close_menu();
        assert!(state.modal_open());
    }

    #[test]
    fn header_shadow_follows_offset() {
        let mut header = HeaderScroll::new(80.0, 10.0);
        assert!(!header.update(10.0).elevated);
        assert!(header.update(11.0).elevated);
        assert!(!header.update(0.0).elevated);
    }

    #[test]
    fn header_stays_hidden_while_scrolling_down_past_its_height() {
        let mut header = HeaderScroll::new(80.0, 10.0);

        assert!(!header.update(50.0).hidden);
        for offset in [100.0, 150.0, 400.0, 900.0] {
            assert!(header.update(offset).hidden);
        }

        // Any upward tick shows it again.
        assert!(!header.update(899.0).hidden);
        assert!(header.update(950.0).hidden);
    }

    #[test]
    fn header_visible_within_its_own_height() {
        let mut header = HeaderScroll::new(80.0, 10.0);
        assert!(!header.update(40.0).hidden);
        assert!(!header.update(80.0).hidden);
    }

    #[test]
    fn back_to_top_threshold_is_exclusive() {
        assert!(!back_to_top_visible(300.0, 300.0));
        assert!(back_to_top_visible(301.0, 300.0));
    }
}
