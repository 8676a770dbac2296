//! airsentry — on-device 802.11 threat detection
//!
//! Ingests a live stream of management frames, tracks per-transmitter
//! behavior in a bounded table with sliding-window counters, and
//! periodically classifies transmitters against a fixed-order set of
//! weighted detectors (beacon spam, deauth flood, probe flood,
//! evil twin). Once a device's risk score crosses the confirmation
//! threshold it is latched malicious for the rest of the session.
//!
//! The crate is a library: the host owns the radio capture path and calls
//! [`ThreatMonitor::ingest`] per frame, drives
//! [`ThreatMonitor::run_classification_cycle`] (or spawns
//! [`ThreatMonitor::run_classifier`] on tokio), and reads
//! [`ThreatMonitor::snapshot`] at its display cadence.

pub mod config;
pub mod detection;
pub mod engine;
pub mod error;
pub mod ieee80211;
pub mod tracker;

pub use config::{AnalysisSettings, Config, TrackerSettings};
pub use detection::{AttackType, DetectionWeights, RiskClassifier, ThreatEvent};
pub use engine::{ThreatMonitor, ThreatSnapshot};
pub use error::{AirsentryError, Result};
pub use ieee80211::{parse_frame, FrameEvent, FrameKind, MacAddr, MGMT_HEADER_LEN};
pub use tracker::{DeviceTable, TrackedDevice};
