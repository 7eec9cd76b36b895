//! Core traits defined in `freshtrack-core` and implemented by other crates.

pub mod clock;
pub mod notification;

pub use clock::{Clock, FixedClock, SystemClock};
pub use notification::NotificationTransport;
