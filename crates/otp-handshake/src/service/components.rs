//! Helpers for toggling the host's own components, e.g. keeping the OTP
//! receiver enabled only while a code is expected.

use crate::domain::entities::ComponentState;
use crate::ports::outbound::ComponentRegistry;
use otp_types::PlatformError;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct ComponentSwitch;

impl ComponentSwitch {
    pub fn new() -> Self {
        Self
    }

    pub fn enable_component(
        &self,
        registry: &dyn ComponentRegistry,
        component: &str,
    ) -> Result<(), PlatformError> {
        Self::change_state(registry, component, ComponentState::Enabled)
    }

    pub fn disable_component(
        &self,
        registry: &dyn ComponentRegistry,
        component: &str,
    ) -> Result<(), PlatformError> {
        Self::change_state(registry, component, ComponentState::Disabled)
    }

    fn change_state(
        registry: &dyn ComponentRegistry,
        component: &str,
        state: ComponentState,
    ) -> Result<(), PlatformError> {
        registry.set_component_enabled(component, state)?;
        debug!(component = component, state = ?state, "Component state changed");
        Ok(())
    }
}
