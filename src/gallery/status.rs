/// Status texts and control states shown around the gallery

use serde::Serialize;

use crate::platform::geolocation::{LocationError, Position};
use crate::platform::network::NetworkCondition;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ButtonState {
    pub label: String,
    pub enabled: bool,
}

impl ButtonState {
    fn new(label: &str, enabled: bool) -> Self {
        Self {
            label: label.to_string(),
            enabled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBoard {
    pub location: String,
    pub network: String,
    pub visibility: String,
    pub performance: String,
    pub network_warning: bool,
    pub loading_more: bool,
    pub location_button: ButtonState,
    pub optimize_button: ButtonState,
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self {
            location: "Location: Not enabled".to_string(),
            network: "Network: Checking...".to_string(),
            visibility: visibility_text(0),
            performance: performance_text(false),
            network_warning: false,
            loading_more: false,
            location_button: ButtonState::new("Enable Location", true),
            optimize_button: ButtonState::new("Optimize Loading", true),
        }
    }
}

impl StatusBoard {
    pub fn location_pending(&mut self) {
        self.location_button = ButtonState::new("Getting location...", false);
    }

    pub fn location_enabled(&mut self, pos: &Position) {
        self.location = format!("Location: {:.4}, {:.4}", pos.lat, pos.lng);
        self.location_button = ButtonState::new("Location Enabled ✓", false);
    }

    /// Leave the feature disabled but let the user try again
    pub fn location_failed(&mut self, err: &LocationError) {
        self.location = match err {
            LocationError::Unsupported => "Location: Not supported".to_string(),
            other => format!("Location: Error - {}", other),
        };
        self.location_button = ButtonState::new("Enable Location", true);
    }

    pub fn network_changed(&mut self, condition: Option<&NetworkCondition>) {
        match condition {
            Some(c) => {
                self.network = format!(
                    "Network: {} ({}Mbps, {}ms RTT)",
                    c.effective_type, c.downlink_mbps, c.rtt_ms
                );
                self.network_warning = c.is_slow();
            }
            None => {
                self.network = "Network: API not supported".to_string();
                self.network_warning = false;
            }
        }
    }

    pub fn visible_items(&mut self, count: usize) {
        self.visibility = visibility_text(count);
    }

    pub fn performance(&mut self, optimized: bool) {
        self.performance = performance_text(optimized);
    }

    pub fn optimization_toggled(&mut self, optimized: bool) {
        self.optimize_button = if optimized {
            ButtonState::new("Optimization ON ✓", true)
        } else {
            ButtonState::new("Optimize Loading", true)
        };
    }
}

fn visibility_text(count: usize) -> String {
    format!("Visible items: {}", count)
}

fn performance_text(optimized: bool) -> String {
    format!("Performance: {} mode", if optimized { "Optimized" } else { "Standard" })
}
