//! Engine Facade and Threat Registry
//!
//! The externally observable surface: frame ingestion, the classification
//! cycle, the read-only snapshot, session boundaries, and the confirmed
//! threat event stream. Collaborators (radio capture, display, and
//! countermeasure layers) drive the engine exclusively through this
//! module.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tokio::sync::broadcast;
use tracing::info;

use crate::config::Config;
use crate::detection::{AttackType, RiskClassifier, ThreatEvent};
use crate::ieee80211::parse_frame;
use crate::tracker::{DeviceTable, TrackedDevice};

/// The wireless threat-detection engine.
///
/// Two logically concurrent producers share the device table: the
/// ingestion path called from the radio receive path, and the periodic
/// classification task. Both go through one table-wide mutex held only for
/// a single lookup-and-update (or one classification sweep); nothing under
/// the lock suspends or performs I/O.
pub struct ThreatMonitor {
    table: Mutex<DeviceTable>,
    classifier: RiskClassifier,
    events: broadcast::Sender<ThreatEvent>,
    running: AtomicBool,
    started: Instant,
    period_ms: u64,
}

impl ThreatMonitor {
    pub fn new(config: Config) -> Self {
        let (events, _) = broadcast::channel(64);
        let table = DeviceTable::new(&config.tracker, config.analysis.window_ms);
        let period_ms = config.analysis.period_ms;
        Self {
            table: Mutex::new(table),
            classifier: RiskClassifier::new(config.analysis, config.weights),
            events,
            running: AtomicBool::new(true),
            started: Instant::now(),
            period_ms,
        }
    }

    /// Milliseconds since engine construction, for hosts without their own
    /// monotonic clock.
    pub fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    /// Ingest one captured management frame.
    ///
    /// Parse → admit/update → window reset → counter increment. Parsing
    /// happens before the lock is taken; frames that fail to parse, and
    /// frames from unseen identities when the table is full, are silently
    /// dropped. Never blocks beyond the short table critical section.
    pub fn ingest(&self, frame: &[u8], now_ms: u64) {
        let Some(event) = parse_frame(frame) else {
            return;
        };
        self.table.lock().record(&event, now_ms);
    }

    /// Run one classification cycle over every tracked device and publish
    /// any newly confirmed threats. Reference cadence is 500 ms; the host
    /// chooses.
    pub fn run_classification_cycle(&self, now_ms: u64) {
        let confirmations = {
            let mut table = self.table.lock();
            self.classifier.run_cycle(&mut table, now_ms)
        };
        for event in confirmations {
            // A send with no subscribers just drops the event.
            let _ = self.events.send(event);
        }
    }

    /// Read-only view of the registry for presentation layers.
    pub fn snapshot(&self) -> ThreatSnapshot {
        let table = self.table.lock();
        ThreatSnapshot {
            tracked_count: table.len(),
            threat_count: table.threat_count(),
            devices: table.snapshot(),
        }
    }

    /// Session boundary: drop all tracked state, zero the threat counter,
    /// and re-arm the running flag.
    pub fn start_session(&self) {
        self.table.lock().clear();
        self.running.store(true, Ordering::Release);
        info!("monitoring session started");
    }

    /// Cooperative stop: the running flag is checked between classifier
    /// cycles, never mid-update.
    pub fn stop_session(&self) {
        self.running.store(false, Ordering::Release);
        info!("monitoring session stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Subscribe to confirmed threat events. One event is published per
    /// device, the first time its latch sets.
    pub fn subscribe(&self) -> broadcast::Receiver<ThreatEvent> {
        self.events.subscribe()
    }

    /// Periodic classification driver for hosts on tokio. Runs until
    /// [`stop_session`](Self::stop_session); in-flight cycles always
    /// complete.
    pub async fn run_classifier(self: Arc<Self>) {
        let mut tick = tokio::time::interval(Duration::from_millis(self.period_ms.max(1)));
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        while self.is_running() {
            tick.tick().await;
            self.run_classification_cycle(self.now_ms());
        }
    }
}

impl Default for ThreatMonitor {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

/// Point-in-time view of the threat registry.
#[derive(Debug, Clone)]
pub struct ThreatSnapshot {
    /// Devices currently tracked.
    pub tracked_count: usize,
    /// Devices confirmed malicious this session.
    pub threat_count: u32,
    /// Per-device state, insertion order.
    pub devices: Vec<TrackedDevice>,
}

impl ThreatSnapshot {
    /// Devices seen within the given recency horizon.
    pub fn active_devices(&self, now_ms: u64, horizon_ms: u64) -> usize {
        self.devices
            .iter()
            .filter(|d| now_ms.saturating_sub(d.last_seen) < horizon_ms)
            .count()
    }

    /// Confirmed devices grouped by attack label, first-confirmed order.
    pub fn attack_breakdown(&self) -> Vec<(AttackType, usize)> {
        let mut breakdown: Vec<(AttackType, usize)> = Vec::new();
        for device in self.devices.iter().filter(|d| d.confirmed_malicious) {
            match breakdown.iter_mut().find(|(a, _)| *a == device.suspected_attack) {
                Some((_, count)) => *count += 1,
                None => breakdown.push((device.suspected_attack, 1)),
            }
        }
        breakdown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ieee80211::MGMT_HEADER_LEN;

    fn frame(subtype: u8, id: u8) -> Vec<u8> {
        let mut frame = vec![0u8; MGMT_HEADER_LEN];
        frame[0] = subtype << 4;
        frame[10..16].copy_from_slice(&[0x02, 0, 0, 0, 0, id]);
        frame
    }

    #[test]
    fn test_ingest_and_snapshot() {
        let monitor = ThreatMonitor::default();
        monitor.ingest(&frame(0x08, 1), 0);
        monitor.ingest(&frame(0x04, 2), 10);
        let snap = monitor.snapshot();
        assert_eq!(snap.tracked_count, 2);
        assert_eq!(snap.threat_count, 0);
    }

    #[test]
    fn test_short_frame_ignored() {
        let monitor = ThreatMonitor::default();
        monitor.ingest(&[0u8; MGMT_HEADER_LEN - 1], 0);
        assert_eq!(monitor.snapshot().tracked_count, 0);
    }

    #[test]
    fn test_session_reset() {
        let monitor = ThreatMonitor::default();
        for i in 0..12 {
            monitor.ingest(&frame(0x0c, 1), i * 150);
        }
        monitor.run_classification_cycle(2000);
        let snap = monitor.snapshot();
        assert_eq!(snap.threat_count, 1);

        monitor.start_session();
        let snap = monitor.snapshot();
        assert_eq!(snap.tracked_count, 0);
        assert_eq!(snap.threat_count, 0);
        assert!(snap.devices.is_empty());
    }

    #[test]
    fn test_stop_is_cooperative_flag() {
        let monitor = ThreatMonitor::default();
        assert!(monitor.is_running());
        monitor.stop_session();
        assert!(!monitor.is_running());
        monitor.start_session();
        assert!(monitor.is_running());
    }

    #[test]
    fn test_active_devices_horizon() {
        let monitor = ThreatMonitor::default();
        monitor.ingest(&frame(0x08, 1), 0);
        monitor.ingest(&frame(0x08, 2), 4000);
        let snap = monitor.snapshot();
        assert_eq!(snap.active_devices(5000, 5000), 1);
        assert_eq!(snap.active_devices(5000, 10_000), 2);
    }
}
