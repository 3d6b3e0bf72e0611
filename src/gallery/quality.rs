/// Image quality tier chosen from network conditions

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::platform::network::{EffectiveType, NetworkCondition};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    Low,
    Medium,
    High,
}

impl QualityTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityTier::Low => "low",
            QualityTier::Medium => "medium",
            QualityTier::High => "high",
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pick a tier for the current connection.
///
/// Without network information the gallery assumes `Medium`. The rules are
/// checked in order and the first match wins:
///
/// 1. `4g` with more than 5 Mbps downlink → `High`
/// 2. `3g`, or `4g` with more than 1 Mbps → `Medium`
/// 3. everything else → `Low`
pub fn select(condition: Option<&NetworkCondition>) -> QualityTier {
    let Some(c) = condition else {
        return QualityTier::Medium;
    };
    match c.effective_type {
        EffectiveType::FourG if c.downlink_mbps > 5.0 => QualityTier::High,
        EffectiveType::ThreeG => QualityTier::Medium,
        EffectiveType::FourG if c.downlink_mbps > 1.0 => QualityTier::Medium,
        _ => QualityTier::Low,
    }
}
