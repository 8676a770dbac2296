//! The classification cycle.

use tracing::{debug, warn};

use super::weights::DetectionWeights;
use super::{AttackType, ThreatEvent};
use crate::config::AnalysisSettings;
use crate::tracker::{DeviceTable, TrackedDevice};

/// Periodic scorer for the device table.
///
/// Each cycle is a fresh, independent evaluation: every scoreable device
/// gets its score and label recomputed from the current window, and the
/// malicious latch sets the first time the score crosses the confirmation
/// threshold. Stale devices and too-young windows are skipped with their
/// previous state intact. The cycle never errors.
pub struct RiskClassifier {
    settings: AnalysisSettings,
    weights: DetectionWeights,
}

impl RiskClassifier {
    pub fn new(settings: AnalysisSettings, weights: DetectionWeights) -> Self {
        Self { settings, weights }
    }

    pub fn weights(&self) -> &DetectionWeights {
        &self.weights
    }

    /// Run one cycle over every tracked device. Returns the confirmations
    /// latched during this cycle, one per newly confirmed device.
    pub fn run_cycle(&self, table: &mut DeviceTable, now: u64) -> Vec<ThreatEvent> {
        let mut confirmations = Vec::new();

        for device in table.iter_mut() {
            if device.is_stale(now, self.settings.stale_after_ms) {
                continue;
            }
            if let Some(event) = self.score_device(device, now) {
                confirmations.push(event);
            }
        }

        for _ in &confirmations {
            table.note_confirmed();
        }

        confirmations
    }

    /// Score a single device against the detector sequence. Returns a
    /// threat event if the device's latch sets on this cycle.
    ///
    /// Detectors 1, 3, and 4 overwrite the label unconditionally, so the
    /// final label is whichever of them fired last in sequence; 2 and 5
    /// only claim a still-unknown label. This ordering is part of the
    /// classifier's contract and must not be rearranged.
    fn score_device(&self, device: &mut TrackedDevice, now: u64) -> Option<ThreatEvent> {
        let s = &self.settings;
        let w = &self.weights;

        // The classifier is a valid window-reset trigger too: a device may
        // have gone quiet since its last frame.
        if device.window_expired(now, s.window_ms) {
            device.reset_window(now);
        }

        let window_secs = now.saturating_sub(device.window_start) as f32 / 1000.0;
        if window_secs < s.min_window_ms as f32 / 1000.0 {
            // Too little data; previous score and label stand.
            return None;
        }

        let recent_beacon_rate = device.recent_beacons as f32 / window_secs;
        let recent_probe_rate = device.recent_probes as f32 / window_secs;
        let recent_deauth_rate = device.recent_deauths as f32 / window_secs;

        let lifetime_secs = now.saturating_sub(device.first_seen) as f32 / 1000.0;
        let total_beacon_rate = if lifetime_secs >= 1.0 {
            device.beacon_count as f32 / lifetime_secs
        } else {
            0.0
        };

        device.risk_score = 0.0;
        device.suspected_attack = AttackType::Unknown;

        // 1: sustained high beacon rate
        if recent_beacon_rate > w.beacon_spam.rate_min {
            device.risk_score += w.beacon_spam.score;
            device.suspected_attack = AttackType::BeaconSpam;
        }

        // 2: beacon rate surging over the lifetime baseline
        if recent_beacon_rate > total_beacon_rate * w.beacon_surge.baseline_factor
            && recent_beacon_rate > w.beacon_surge.rate_min
        {
            device.risk_score += w.beacon_surge.score;
            if device.suspected_attack == AttackType::Unknown {
                device.suspected_attack = AttackType::BeaconSpam;
            }
        }

        // 3: deauthentication flood
        if recent_deauth_rate > w.deauth_flood.rate_min {
            device.risk_score += w.deauth_flood.score;
            device.suspected_attack = AttackType::DeauthFlood;
        }

        // 4: probe-request flood
        if recent_probe_rate > w.probe_flood.rate_min {
            device.risk_score += w.probe_flood.score;
            device.suspected_attack = AttackType::ProbeFlood;
        }

        // 5: many distinct advertised names
        if device.ssid_count() as u32 > w.evil_twin.distinct_ssid_min {
            device.risk_score += w.evil_twin.score;
            if device.suspected_attack == AttackType::Unknown {
                device.suspected_attack = AttackType::EvilTwin;
            }
        }

        // 6: very high activity of any kind
        if recent_beacon_rate > w.high_activity.beacon_rate_min
            || recent_probe_rate > w.high_activity.probe_rate_min
            || device.recent_beacons > w.high_activity.beacon_count_min
        {
            device.risk_score += w.high_activity.score;
        }

        // 7: burst of frames within one window
        if device.recent_beacons + device.recent_probes + device.recent_deauths
            > w.burst.total_count_min
        {
            device.risk_score += w.burst.score;
        }

        if device.risk_score > 0.5 || device.recent_beacons > 5 {
            debug!(
                identity = %device.identity,
                beacon_rate = recent_beacon_rate,
                probe_rate = recent_probe_rate,
                deauth_rate = recent_deauth_rate,
                window_secs,
                ssids = device.ssid_count(),
                score = device.risk_score,
                "analysis"
            );
        }

        if device.risk_score >= s.confirm_threshold && !device.confirmed_malicious {
            device.confirmed_malicious = true;
            warn!(
                identity = %device.identity,
                attack = device.suspected_attack.name(),
                score = device.risk_score,
                "transmitter confirmed malicious"
            );
            return Some(ThreatEvent {
                identity: device.identity,
                attack: device.suspected_attack,
                risk_score: device.risk_score,
            });
        }

        None
    }
}
