pub mod slides;
pub mod transition;

pub use transition::{Frame, Transition};
