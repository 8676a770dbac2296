//! Per-Transmitter Tracking
//!
//! The bounded device table and the sliding-window counters it maintains.
//! Every admitted frame event lands here; the classifier reads and scores
//! the same records on its own cadence.

mod device;
mod table;

pub use device::TrackedDevice;
pub use table::DeviceTable;
