//! Page scroll locking while the viewer is open

use std::cell::Cell;
use std::rc::Rc;

use log::debug;

/// Host page whose scrolling the viewer can disable
pub trait PageScroll {
    fn set_scroll_enabled(&mut self, enabled: bool);
}

/// Disables page scroll for as long as it lives
///
/// Dropping the guard re-enables scrolling, so every exit path of the owner
/// (explicit close, early return, forced unmount) restores the page.
#[derive(Debug)]
pub struct ScrollGuard<P: PageScroll> {
    page: P,
}

impl<P: PageScroll> ScrollGuard<P> {
    pub fn acquire(mut page: P) -> Self {
        page.set_scroll_enabled(false);
        debug!("[VIEWER] Page scroll disabled");
        Self { page }
    }

    pub fn page(&self) -> &P {
        &self.page
    }
}

impl<P: PageScroll> Drop for ScrollGuard<P> {
    fn drop(&mut self) {
        self.page.set_scroll_enabled(true);
        debug!("[VIEWER] Page scroll restored");
    }
}

/// In-memory page; clones share the same scroll state
#[derive(Debug, Clone, Default)]
pub struct MemoryScroll {
    disabled: Rc<Cell<bool>>,
}

impl MemoryScroll {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_scroll_enabled(&self) -> bool {
        !self.disabled.get()
    }
}

impl PageScroll for MemoryScroll {
    fn set_scroll_enabled(&mut self, enabled: bool) {
        self.disabled.set(!enabled);
    }
}

impl<P: PageScroll + ?Sized> PageScroll for &mut P {
    fn set_scroll_enabled(&mut self, enabled: bool) {
        (**self).set_scroll_enabled(enabled);
    }
}
