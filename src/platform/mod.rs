//! Platform API surface: geolocation, network information, viewport
//! intersection and idle scheduling
//!
//! This module contains the public types and traits the gallery uses to talk
//! to its host. Every capability is optional; a host that lacks one simply
//! returns `None` and the gallery degrades to its default behaviour.

pub mod geolocation;
pub mod idle;
pub mod intersection;
pub mod network;

use std::sync::Arc;

pub use geolocation::{EmulatedGeolocation, GeolocationProvider, LocationError, Position, PositionOptions};
pub use idle::{IdleDeadline, IdleSource};
pub use intersection::{IntersectionEntry, IntersectionObserver, IntersectionObserverInit};
pub use network::{EffectiveType, EmulatedNetwork, NetworkCondition, NetworkInformation};

/// Capabilities a host exposes to the gallery.
pub trait PlatformApi: Send + Sync {
    fn geolocation(&self) -> Option<Arc<dyn GeolocationProvider>>;
    fn network_information(&self) -> Option<Arc<dyn NetworkInformation>>;
}

/// A host with no optional capabilities
pub struct NoopPlatform;

impl NoopPlatform {
    pub fn new() -> Self {
        NoopPlatform
    }
}

impl Default for NoopPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformApi for NoopPlatform {
    fn geolocation(&self) -> Option<Arc<dyn GeolocationProvider>> {
        None
    }

    fn network_information(&self) -> Option<Arc<dyn NetworkInformation>> {
        None
    }
}

/// In-memory host whose capabilities tests and the CLI can drive
#[derive(Default)]
pub struct EmulatedPlatform {
    geolocation: Option<Arc<EmulatedGeolocation>>,
    network: Option<Arc<EmulatedNetwork>>,
}

impl EmulatedPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_geolocation(mut self, geolocation: EmulatedGeolocation) -> Self {
        self.geolocation = Some(Arc::new(geolocation));
        self
    }

    pub fn with_network(mut self, initial: NetworkCondition) -> Self {
        self.network = Some(Arc::new(EmulatedNetwork::new(initial)));
        self
    }

    /// Handle for changing the emulated connection later
    pub fn network(&self) -> Option<Arc<EmulatedNetwork>> {
        self.network.clone()
    }

    pub fn emulated_geolocation(&self) -> Option<Arc<EmulatedGeolocation>> {
        self.geolocation.clone()
    }
}

impl PlatformApi for EmulatedPlatform {
    fn geolocation(&self) -> Option<Arc<dyn GeolocationProvider>> {
        self.geolocation.clone().map(|g| g as Arc<dyn GeolocationProvider>)
    }

    fn network_information(&self) -> Option<Arc<dyn NetworkInformation>> {
        self.network.clone().map(|n| n as Arc<dyn NetworkInformation>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_platform_has_no_capabilities() {
        let p = NoopPlatform::new();
        assert!(p.geolocation().is_none());
        assert!(p.network_information().is_none());
    }

    #[test]
    fn emulated_platform_exposes_configured_capabilities() {
        let cond = NetworkCondition::new(EffectiveType::FourG, 10.0, 50.0);
        let p = EmulatedPlatform::new()
            .with_network(cond)
            .with_geolocation(EmulatedGeolocation::new(Err(LocationError::PermissionDenied)));
        assert_eq!(p.network_information().unwrap().snapshot(), cond);
        assert!(p.geolocation().is_some());

        let net = p.network().unwrap();
        let next = NetworkCondition::new(EffectiveType::TwoG, 0.3, 900.0);
        net.set(next);
        assert_eq!(p.network_information().unwrap().snapshot(), next);
    }
}
