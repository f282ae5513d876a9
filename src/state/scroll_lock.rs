// Page scroll lock - suppresses ambient scrolling while the slideshow owns the viewport
use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Overflow {
    #[default]
    Auto,
    Hidden,
}

/// Shared page-level overflow setting. Cloning hands out another view of the same cell.
#[derive(Clone, Debug, Default)]
pub struct PageScroll {
    overflow: Rc<Cell<Overflow>>,
}

impl PageScroll {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn overflow(&self) -> Overflow {
        self.overflow.get()
    }

    pub fn set_overflow(&self, overflow: Overflow) {
        self.overflow.set(overflow);
    }

    pub fn is_locked(&self) -> bool {
        self.overflow() == Overflow::Hidden
    }
}

/// Holds the page at `Overflow::Hidden` until dropped, then puts back whatever was there before.
#[derive(Debug)]
pub struct ScrollLock {
    page: PageScroll,
    previous: Overflow,
}

impl ScrollLock {
    pub fn acquire(page: &PageScroll) -> Self {
        let previous = page.overflow();
        page.set_overflow(Overflow::Hidden);
        tracing::debug!(?previous, "page scroll locked");
        Self {
            page: page.clone(),
            previous,
        }
    }
}

impl Drop for ScrollLock {
    fn drop(&mut self) {
        self.page.set_overflow(self.previous);
        tracing::debug!(restored = ?self.previous, "page scroll released");
    }
}
