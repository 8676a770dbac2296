//! Management frame decoding.
//!
//! A captured frame reduces to a [`FrameEvent`]: who transmitted it, which
//! of the tracked kinds it is, and (for beacons) the advertised network
//! name. Nothing else in the frame matters to the engine.

use super::frame::{FrameKind, MacAddr};

/// Fixed management header: frame control (2), duration (2), three
/// addresses (18), sequence control (2).
pub const MGMT_HEADER_LEN: usize = 24;

/// First information element of a beacon body: header plus the fixed
/// timestamp (8), beacon interval (2), and capability (2) fields.
const BEACON_IE_OFFSET: usize = MGMT_HEADER_LEN + 12;

const SSID_ELEMENT_ID: u8 = 0;
const MAX_SSID_LEN: usize = 32;

/// A decoded management frame event.
#[derive(Debug, Clone)]
pub struct FrameEvent {
    /// Transmitter address (address 2).
    pub source: MacAddr,
    /// Frame kind derived from the type/subtype subfields.
    pub kind: FrameKind,
    /// Advertised network name, beacons only.
    pub ssid: Option<String>,
}

/// Parse a raw captured frame into an event.
///
/// Returns `None` for frames shorter than the fixed management header.
/// Anything else decodes: unknown subtypes become [`FrameKind::Other`],
/// and a beacon whose SSID element is absent, empty, oversized, or
/// truncated simply carries no name.
pub fn parse_frame(data: &[u8]) -> Option<FrameEvent> {
    if data.len() < MGMT_HEADER_LEN {
        return None;
    }

    let kind = FrameKind::from_frame_control(data[0]);
    let source = MacAddr::from_slice(&data[10..16])?;

    let ssid = match kind {
        FrameKind::Beacon => parse_beacon_ssid(data),
        _ => None,
    };

    Some(FrameEvent { source, kind, ssid })
}

/// Extract the SSID from a beacon frame, if the first information element
/// is a well-formed SSID element that fits inside the captured buffer.
fn parse_beacon_ssid(data: &[u8]) -> Option<String> {
    if data.len() < BEACON_IE_OFFSET + 2 {
        return None;
    }

    let id = data[BEACON_IE_OFFSET];
    let len = data[BEACON_IE_OFFSET + 1] as usize;
    if id != SSID_ELEMENT_ID || len == 0 || len > MAX_SSID_LEN {
        return None;
    }

    let body = data.get(BEACON_IE_OFFSET + 2..BEACON_IE_OFFSET + 2 + len)?;
    Some(String::from_utf8_lossy(body).into_owned())
}
