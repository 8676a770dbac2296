//! Detection weights configuration
//!
//! Thresholds and score deltas for the classification pass, one group per
//! detector, named in evaluation order. The detectors run in a fixed
//! sequence and their label-overwrite policy depends on that order, so the
//! groups here are data only — reordering them changes nothing.

use serde::{Deserialize, Serialize};

/// All weights for the heuristic classification pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionWeights {
    /// Detector 1: sustained high beacon rate.
    pub beacon_spam: BeaconSpamWeights,
    /// Detector 2: beacon rate surging over the lifetime baseline.
    pub beacon_surge: BeaconSurgeWeights,
    /// Detector 3: deauthentication flood.
    pub deauth_flood: DeauthFloodWeights,
    /// Detector 4: probe-request flood.
    pub probe_flood: ProbeFloodWeights,
    /// Detector 5: many distinct advertised names.
    pub evil_twin: EvilTwinWeights,
    /// Detector 6: very high activity of any kind.
    pub high_activity: HighActivityWeights,
    /// Detector 7: burst of frames within one window.
    pub burst: BurstWeights,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeaconSpamWeights {
    /// Minimum window beacon rate (frames/sec).
    pub rate_min: f32,
    /// Score added when the detector fires.
    pub score: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeaconSurgeWeights {
    /// Window rate must exceed this multiple of the lifetime rate.
    pub baseline_factor: f32,
    /// Absolute floor on the window beacon rate (frames/sec).
    pub rate_min: f32,
    pub score: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeauthFloodWeights {
    /// Minimum window deauth rate (frames/sec).
    pub rate_min: f32,
    pub score: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeFloodWeights {
    /// Minimum window probe rate (frames/sec).
    pub rate_min: f32,
    pub score: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvilTwinWeights {
    /// Distinct advertised names must exceed this count.
    pub distinct_ssid_min: u32,
    pub score: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighActivityWeights {
    /// Window beacon rate trigger (frames/sec).
    pub beacon_rate_min: f32,
    /// Window probe rate trigger (frames/sec).
    pub probe_rate_min: f32,
    /// Raw window beacon count trigger.
    pub beacon_count_min: u32,
    pub score: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BurstWeights {
    /// Combined window frame count must exceed this.
    pub total_count_min: u32,
    pub score: f32,
}

impl Default for DetectionWeights {
    fn default() -> Self {
        Self {
            beacon_spam: BeaconSpamWeights::default(),
            beacon_surge: BeaconSurgeWeights::default(),
            deauth_flood: DeauthFloodWeights::default(),
            probe_flood: ProbeFloodWeights::default(),
            evil_twin: EvilTwinWeights::default(),
            high_activity: HighActivityWeights::default(),
            burst: BurstWeights::default(),
        }
    }
}

impl Default for BeaconSpamWeights {
    fn default() -> Self {
        Self {
            rate_min: 2.0,
            score: 4.0,
        }
    }
}

impl Default for BeaconSurgeWeights {
    fn default() -> Self {
        Self {
            baseline_factor: 2.0,
            rate_min: 1.5,
            score: 3.0,
        }
    }
}

impl Default for DeauthFloodWeights {
    fn default() -> Self {
        Self {
            rate_min: 1.0,
            score: 5.0,
        }
    }
}

impl Default for ProbeFloodWeights {
    fn default() -> Self {
        Self {
            rate_min: 5.0,
            score: 4.0,
        }
    }
}

impl Default for EvilTwinWeights {
    fn default() -> Self {
        Self {
            distinct_ssid_min: 2,
            score: 3.0,
        }
    }
}

impl Default for HighActivityWeights {
    fn default() -> Self {
        Self {
            beacon_rate_min: 10.0,
            probe_rate_min: 8.0,
            beacon_count_min: 20,
            score: 2.0,
        }
    }
}

impl Default for BurstWeights {
    fn default() -> Self {
        Self {
            total_count_min: 15,
            score: 2.0,
        }
    }
}
