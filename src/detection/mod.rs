//! Risk Classification
//!
//! The periodic scoring pass over the device table: per-window rate
//! metrics, the fixed-order weighted detectors, and the one-way malicious
//! latch downstream consumers observe.

mod classifier;
mod weights;

pub use classifier::RiskClassifier;
pub use weights::{
    BeaconSpamWeights, BeaconSurgeWeights, BurstWeights, DeauthFloodWeights, DetectionWeights,
    EvilTwinWeights, HighActivityWeights, ProbeFloodWeights,
};

use crate::ieee80211::MacAddr;

/// Attack archetypes a transmitter can be labeled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttackType {
    /// No assessment.
    None,
    BeaconSpam,
    EvilTwin,
    Karma,
    DeauthFlood,
    ProbeFlood,
    CaptivePortal,
    /// Scored but not matched to a specific archetype.
    Unknown,
}

impl AttackType {
    /// Stable display name for presentation layers.
    pub fn name(&self) -> &'static str {
        match self {
            AttackType::None => "NONE",
            AttackType::BeaconSpam => "BEACON SPAM",
            AttackType::EvilTwin => "EVIL TWIN",
            AttackType::Karma => "KARMA ATTACK",
            AttackType::DeauthFlood => "DEAUTH FLOOD",
            AttackType::ProbeFlood => "PROBE FLOOD",
            AttackType::CaptivePortal => "CAPTIVE PORTAL",
            AttackType::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for AttackType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Emitted once per device, the first time its risk score crosses the
/// confirmation threshold.
#[derive(Debug, Clone)]
pub struct ThreatEvent {
    pub identity: MacAddr,
    pub attack: AttackType,
    pub risk_score: f32,
}
