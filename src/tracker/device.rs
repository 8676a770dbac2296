//! Tracked device state.

use crate::detection::AttackType;
use crate::ieee80211::{FrameEvent, FrameKind, MacAddr};

/// Behavioral state for one transmitter.
///
/// Lifetime counters only ever grow; the `recent_*` window counters reset
/// whenever the short window elapses. `confirmed_malicious` is a one-way
/// latch for the device's lifetime.
#[derive(Debug, Clone)]
pub struct TrackedDevice {
    /// Transmitter hardware address (table key).
    pub identity: MacAddr,
    /// Milliseconds since engine start at first and most recent frame.
    pub first_seen: u64,
    pub last_seen: u64,
    /// Lifetime frame counters.
    pub beacon_count: u32,
    pub probe_count: u32,
    pub deauth_count: u32,
    /// Counters for the current short window.
    pub recent_beacons: u32,
    pub recent_probes: u32,
    pub recent_deauths: u32,
    /// Start of the current short window.
    pub window_start: u64,
    /// Distinct network names seen in beacons, oldest first, bounded.
    advertised_ssids: Vec<String>,
    /// Label from the most recent classification cycle.
    pub suspected_attack: AttackType,
    /// Score from the most recent classification cycle, not cumulative.
    pub risk_score: f32,
    /// One-way latch, set when the score first crosses the threshold.
    pub confirmed_malicious: bool,
}

impl TrackedDevice {
    pub fn new(identity: MacAddr, now: u64) -> Self {
        Self {
            identity,
            first_seen: now,
            last_seen: now,
            beacon_count: 0,
            probe_count: 0,
            deauth_count: 0,
            recent_beacons: 0,
            recent_probes: 0,
            recent_deauths: 0,
            window_start: now,
            advertised_ssids: Vec::new(),
            suspected_attack: AttackType::Unknown,
            risk_score: 0.0,
            confirmed_malicious: false,
        }
    }

    /// Zero the window counters and start a fresh window. Lifetime
    /// counters are untouched.
    pub fn reset_window(&mut self, now: u64) {
        self.recent_beacons = 0;
        self.recent_probes = 0;
        self.recent_deauths = 0;
        self.window_start = now;
    }

    /// True if the short window has elapsed at `now`.
    pub fn window_expired(&self, now: u64, window_ms: u64) -> bool {
        now.saturating_sub(self.window_start) > window_ms
    }

    /// Fold one admitted frame event into the counters. The window reset,
    /// when due, happens before the event's own increment is applied.
    pub(crate) fn apply(&mut self, event: &FrameEvent, now: u64, window_ms: u64, max_ssids: usize) {
        self.last_seen = now;

        if self.window_expired(now, window_ms) {
            self.reset_window(now);
        }

        match event.kind {
            FrameKind::Beacon => {
                self.beacon_count += 1;
                self.recent_beacons += 1;
                if let Some(ssid) = &event.ssid {
                    self.note_ssid(ssid, max_ssids);
                }
            }
            FrameKind::ProbeRequest => {
                self.probe_count += 1;
                self.recent_probes += 1;
            }
            FrameKind::Deauth => {
                self.deauth_count += 1;
                self.recent_deauths += 1;
            }
            FrameKind::Other => {}
        }
    }

    /// Remember a distinct advertised name, evicting the oldest once the
    /// cap is reached.
    fn note_ssid(&mut self, ssid: &str, max_ssids: usize) {
        if max_ssids == 0 || self.advertised_ssids.iter().any(|s| s == ssid) {
            return;
        }
        if self.advertised_ssids.len() >= max_ssids {
            self.advertised_ssids.remove(0);
        }
        self.advertised_ssids.push(ssid.to_string());
    }

    /// Number of distinct advertised names currently held.
    pub fn ssid_count(&self) -> usize {
        self.advertised_ssids.len()
    }

    /// The distinct advertised names, oldest first.
    pub fn advertised_ssids(&self) -> &[String] {
        &self.advertised_ssids
    }

    /// True if no frame has arrived within `stale_after_ms`.
    pub fn is_stale(&self, now: u64, stale_after_ms: u64) -> bool {
        now.saturating_sub(self.last_seen) > stale_after_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn beacon_event(ssid: Option<&str>) -> FrameEvent {
        FrameEvent {
            source: MacAddr::new([2, 0, 0, 0, 0, 1]),
            kind: FrameKind::Beacon,
            ssid: ssid.map(str::to_string),
        }
    }

    #[test]
    fn test_window_reset_preserves_lifetime_counters() {
        let mut dev = TrackedDevice::new(MacAddr::new([2, 0, 0, 0, 0, 1]), 0);
        for t in [0, 100, 200] {
            dev.apply(&beacon_event(None), t, 3000, 16);
        }
        assert_eq!(dev.recent_beacons, 3);

        // Past the window boundary: reset happens, then the new increment.
        dev.apply(&beacon_event(None), 3500, 3000, 16);
        assert_eq!(dev.recent_beacons, 1);
        assert_eq!(dev.window_start, 3500);
        assert_eq!(dev.beacon_count, 4);
    }

    #[test]
    fn test_window_boundary_is_exclusive() {
        let mut dev = TrackedDevice::new(MacAddr::new([2, 0, 0, 0, 0, 1]), 0);
        dev.apply(&beacon_event(None), 0, 3000, 16);
        // Exactly window_ms later is still inside the window.
        dev.apply(&beacon_event(None), 3000, 3000, 16);
        assert_eq!(dev.recent_beacons, 2);
        assert_eq!(dev.window_start, 0);
    }

    #[test]
    fn test_other_frames_refresh_but_do_not_count() {
        let mut dev = TrackedDevice::new(MacAddr::new([2, 0, 0, 0, 0, 1]), 0);
        let other = FrameEvent {
            source: dev.identity,
            kind: FrameKind::Other,
            ssid: None,
        };
        dev.apply(&other, 700, 3000, 16);
        assert_eq!(dev.last_seen, 700);
        assert_eq!(dev.beacon_count + dev.probe_count + dev.deauth_count, 0);
    }

    #[test]
    fn test_ssid_set_distinct_and_bounded() {
        let mut dev = TrackedDevice::new(MacAddr::new([2, 0, 0, 0, 0, 1]), 0);
        for i in 0..5 {
            dev.apply(&beacon_event(Some(&format!("net-{i}"))), i, 3000, 3);
            // Duplicates never grow the set.
            dev.apply(&beacon_event(Some(&format!("net-{i}"))), i, 3000, 3);
        }
        assert_eq!(dev.ssid_count(), 3);
        // Oldest names were evicted.
        assert_eq!(
            dev.advertised_ssids(),
            &["net-2".to_string(), "net-3".to_string(), "net-4".to_string()]
        );
    }

    #[test]
    fn test_staleness() {
        let mut dev = TrackedDevice::new(MacAddr::new([2, 0, 0, 0, 0, 1]), 0);
        dev.apply(&beacon_event(None), 1000, 3000, 16);
        assert!(!dev.is_stale(9000, 8000));
        assert!(dev.is_stale(9001, 8000));
    }
}
