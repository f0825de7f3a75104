//! Host-independent page behavior: decision logic, timing and the page controller

pub mod anchor;
pub mod config;
pub mod controller;
pub mod count_up;
pub mod cta;
mod error;
pub mod host;
pub mod nav;
pub mod reveal;
pub mod scheduler;
pub mod scroll;
#[cfg(test)]
pub(crate) mod testing;

pub use config::{PageConfig, RevealConfig, Selectors};
pub use controller::PageController;
pub use error::PageError;
pub use host::{Display, PageHost, Rect, Viewport, WatchHandle};
pub use scheduler::FrameScheduler;
