//! Bounded device table.

use tracing::trace;

use super::device::TrackedDevice;
use crate::config::TrackerSettings;
use crate::ieee80211::{FrameEvent, MacAddr};

/// Fixed-capacity table of tracked transmitters.
///
/// Admission is first-come: once the table is full, frames from unseen
/// identities are silently dropped from tracking, and nothing is evicted.
/// Lookup is a linear scan — the capacity is tens of entries, and the
/// insertion-ordered backing `Vec` is what the snapshot ordering comes
/// from.
pub struct DeviceTable {
    devices: Vec<TrackedDevice>,
    max_devices: usize,
    max_ssids: usize,
    window_ms: u64,
    /// Devices confirmed malicious this session.
    threat_count: u32,
}

impl DeviceTable {
    pub fn new(settings: &TrackerSettings, window_ms: u64) -> Self {
        Self {
            devices: Vec::with_capacity(settings.max_devices),
            max_devices: settings.max_devices,
            max_ssids: settings.max_ssids_per_device,
            window_ms,
            threat_count: 0,
        }
    }

    /// Look up a device by identity, creating it if the table has room.
    /// Always refreshes `last_seen` on an existing entry. Returns `None`
    /// when the identity is new and the table is full.
    pub fn admit_or_update(&mut self, identity: MacAddr, now: u64) -> Option<&mut TrackedDevice> {
        if let Some(idx) = self.devices.iter().position(|d| d.identity == identity) {
            let device = &mut self.devices[idx];
            device.last_seen = now;
            return Some(device);
        }

        if self.devices.len() >= self.max_devices {
            trace!(%identity, "table full, not tracking");
            return None;
        }

        self.devices.push(TrackedDevice::new(identity, now));
        self.devices.last_mut()
    }

    /// Fold one parsed frame event into the table: admit or refresh the
    /// transmitter, then apply the window reset and counter increments.
    pub fn record(&mut self, event: &FrameEvent, now: u64) {
        let window_ms = self.window_ms;
        let max_ssids = self.max_ssids;
        if let Some(device) = self.admit_or_update(event.source, now) {
            device.apply(event, now, window_ms, max_ssids);
        }
    }

    /// Session reset: drop every device and zero the threat counter.
    pub fn clear(&mut self) {
        self.devices.clear();
        self.threat_count = 0;
    }

    /// Read-only clones of the tracked devices, insertion order.
    pub fn snapshot(&self) -> Vec<TrackedDevice> {
        self.devices.clone()
    }

    pub fn get(&self, identity: &MacAddr) -> Option<&TrackedDevice> {
        self.devices.iter().find(|d| &d.identity == identity)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut TrackedDevice> {
        self.devices.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn threat_count(&self) -> u32 {
        self.threat_count
    }

    /// Bump the session threat counter; called exactly once per device,
    /// when its malicious latch first sets.
    pub(crate) fn note_confirmed(&mut self) {
        self.threat_count += 1;
    }

    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }
}
