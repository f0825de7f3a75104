//! Frame and timer scheduling seam.
//!
//! Both the scroll throttle and the progressive animations run on rendering
//! frames. Abstracting the scheduler lets tests step frames deterministically.

use super::PageError;

/// Animation-frame and timeout scheduling.
pub trait FrameScheduler: 'static {
    /// Current high-resolution timestamp in milliseconds
    fn now(&self) -> f64;

    /// Run `callback` before the next repaint with the frame timestamp.
    ///
    /// On error the callback has been dropped and will never run.
    fn request_frame(&self, callback: Box<dyn FnOnce(f64)>) -> Result<(), PageError>;

    /// Run `callback` once after `delay_ms`
    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>);
}
