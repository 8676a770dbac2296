//! 802.11 Management Frame Parsing
//!
//! Decodes raw captured management frames into the typed events the
//! tracking and classification layers consume. Parsing is pure and never
//! fails hard: truncated or unrecognized input degrades to `None` or to
//! `FrameKind::Other`.

mod frame;
mod management;

pub use frame::{FrameKind, MacAddr};
pub use management::{parse_frame, FrameEvent, MGMT_HEADER_LEN};
