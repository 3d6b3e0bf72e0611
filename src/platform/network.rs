/// Network information: connection class, bandwidth estimate and round-trip time

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectiveType {
    #[serde(rename = "slow-2g")]
    Slow2g,
    #[serde(rename = "2g")]
    TwoG,
    #[serde(rename = "3g")]
    ThreeG,
    #[serde(rename = "4g")]
    FourG,
    #[serde(rename = "unknown")]
    Unknown,
}

impl EffectiveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectiveType::Slow2g => "slow-2g",
            EffectiveType::TwoG => "2g",
            EffectiveType::ThreeG => "3g",
            EffectiveType::FourG => "4g",
            EffectiveType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for EffectiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised connection classes map to `Unknown`, so parsing never fails.
impl FromStr for EffectiveType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "slow-2g" => EffectiveType::Slow2g,
            "2g" => EffectiveType::TwoG,
            "3g" => EffectiveType::ThreeG,
            "4g" => EffectiveType::FourG,
            _ => EffectiveType::Unknown,
        })
    }
}

/// A whole-value snapshot of the connection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NetworkCondition {
    pub effective_type: EffectiveType,
    pub downlink_mbps: f64,
    pub rtt_ms: f64,
}

impl NetworkCondition {
    pub fn new(effective_type: EffectiveType, downlink_mbps: f64, rtt_ms: f64) -> Self {
        Self {
            effective_type,
            downlink_mbps,
            rtt_ms,
        }
    }

    /// Connections slow enough to warn the user about
    pub fn is_slow(&self) -> bool {
        matches!(self.effective_type, EffectiveType::Slow2g | EffectiveType::TwoG) || self.downlink_mbps < 1.0
    }
}

/// Source of network snapshots plus a change stream. Every change replaces the
/// previous snapshot as a whole.
pub trait NetworkInformation: Send + Sync {
    fn snapshot(&self) -> NetworkCondition;

    fn subscribe(&self) -> watch::Receiver<NetworkCondition>;
}

/// In-memory network source driven by `set`
pub struct EmulatedNetwork {
    tx: watch::Sender<NetworkCondition>,
}

impl EmulatedNetwork {
    pub fn new(initial: NetworkCondition) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Swap in a new snapshot and notify subscribers
    pub fn set(&self, condition: NetworkCondition) {
        self.tx.send_replace(condition);
    }

    /// Receivers still listening for changes
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl NetworkInformation for EmulatedNetwork {
    fn snapshot(&self) -> NetworkCondition {
        *self.tx.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<NetworkCondition> {
        self.tx.subscribe()
    }
}
