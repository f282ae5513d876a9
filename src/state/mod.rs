pub mod navigator;
pub mod scroll_lock;

pub use navigator::{Direction, Navigator};
pub use scroll_lock::{Overflow, PageScroll, ScrollLock};
