//! Rate limiting

mod sliding_window;

pub use sliding_window::SlidingWindowLimiter;
