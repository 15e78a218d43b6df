//! # In-Memory Platform
//!
//! Implements every outbound port over in-process state, for tests and
//! host-side simulation of a device.

use crate::adapters::authority::HmacTokenAuthority;
use crate::domain::entities::ComponentState;
use crate::ports::outbound::{
    Broadcaster, ComponentRegistry, PackageRegistry, RequesterContext, TokenAuthority,
    TokenIssuer,
};
use otp_types::{CapabilityToken, Intent, PlatformError};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use tracing::debug;

#[derive(Debug, Default)]
struct PlatformState {
    installed: HashSet<String>,
    /// package -> (action, receiver name)
    receivers: HashMap<String, Vec<(String, String)>>,
    sent: Vec<Intent>,
    components: HashMap<String, ComponentState>,
    fail_broadcasts: bool,
    fail_token_lookups: bool,
}

/// A simulated device as seen from one package.
#[derive(Debug)]
pub struct InMemoryPlatform {
    package_name: String,
    authority: HmacTokenAuthority,
    state: Mutex<PlatformState>,
}

impl InMemoryPlatform {
    /// Creates a platform view for `package_name` backed by `authority`.
    ///
    /// Views that share an authority behave as processes on one device.
    pub fn new(package_name: impl Into<String>, authority: HmacTokenAuthority) -> Self {
        Self {
            package_name: package_name.into(),
            authority,
            state: Mutex::new(PlatformState::default()),
        }
    }

    pub fn authority(&self) -> &HmacTokenAuthority {
        &self.authority
    }

    pub fn install_package(&self, package: impl Into<String>) {
        self.state.lock().installed.insert(package.into());
    }

    /// Registers a receiver, installing `package` if needed.
    pub fn register_receiver(
        &self,
        package: impl Into<String>,
        action: impl Into<String>,
        receiver: impl Into<String>,
    ) {
        let package = package.into();
        let mut state = self.state.lock();
        state.installed.insert(package.clone());
        state
            .receivers
            .entry(package)
            .or_default()
            .push((action.into(), receiver.into()));
    }

    /// Every intent broadcast so far, in send order.
    pub fn sent_broadcasts(&self) -> Vec<Intent> {
        self.state.lock().sent.clone()
    }

    pub fn component_state(&self, component: &str) -> Option<ComponentState> {
        self.state.lock().components.get(component).copied()
    }

    pub fn set_broadcast_failure(&self, fail: bool) {
        self.state.lock().fail_broadcasts = fail;
    }

    pub fn set_token_lookup_failure(&self, fail: bool) {
        self.state.lock().fail_token_lookups = fail;
    }
}

impl TokenIssuer for InMemoryPlatform {
    /// Mints for this view's own package only.
    fn mint(&self) -> Result<CapabilityToken, PlatformError> {
        self.authority.mint_for(&self.package_name)
    }
}

impl TokenAuthority for InMemoryPlatform {
    fn creator_package(&self, token: &CapabilityToken) -> Result<Option<String>, PlatformError> {
        if self.state.lock().fail_token_lookups {
            return Err(PlatformError::TokenLookup(
                "token registry unavailable".to_string(),
            ));
        }
        self.authority.creator_package(token)
    }
}

impl Broadcaster for InMemoryPlatform {
    fn send_broadcast(&self, intent: &Intent) -> Result<(), PlatformError> {
        let mut state = self.state.lock();
        if state.fail_broadcasts {
            return Err(PlatformError::BroadcastFailed(
                "broadcast channel closed".to_string(),
            ));
        }
        debug!(
            target_package = intent.package.as_deref().unwrap_or_default(),
            action = intent.action.as_deref().unwrap_or_default(),
            "Broadcast recorded"
        );
        state.sent.push(intent.clone());
        Ok(())
    }
}

impl PackageRegistry for InMemoryPlatform {
    fn broadcast_receivers(&self, package: &str, action: &str) -> Vec<String> {
        self.state
            .lock()
            .receivers
            .get(package)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|(a, _)| a == action)
                    .map(|(_, receiver)| receiver.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn is_package_installed(&self, package: &str) -> bool {
        self.state.lock().installed.contains(package)
    }
}

impl ComponentRegistry for InMemoryPlatform {
    fn set_component_enabled(
        &self,
        component: &str,
        state: ComponentState,
    ) -> Result<(), PlatformError> {
        self.state
            .lock()
            .components
            .insert(component.to_string(), state);
        Ok(())
    }
}

impl RequesterContext for InMemoryPlatform {
    fn package_name(&self) -> &str {
        &self.package_name
    }
}
