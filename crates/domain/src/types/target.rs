//! Target tenant/instance selection

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::TARGET_INSTANCE_SEPARATOR;

/// Tenant/instance pair identifying which remote account a request targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetInstance {
    pub tenant: String,
    /// Unset means "use the globally configured instance".
    #[serde(default)]
    pub instance: Option<String>,
}

impl TargetInstance {
    pub fn new(tenant: impl Into<String>, instance: Option<String>) -> Self {
        Self { tenant: tenant.into(), instance }
    }

    /// Parse an override string.
    ///
    /// `"acme~prod1"` splits into tenant and instance; `"acme"` is a
    /// tenant with the instance left unset. Malformed values are never
    /// rejected. Empty input returns `None`.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }

        match value.split_once(TARGET_INSTANCE_SEPARATOR) {
            Some((tenant, instance)) => {
                let instance = instance.trim();
                Some(Self::new(
                    tenant.trim(),
                    (!instance.is_empty()).then(|| instance.to_string()),
                ))
            }
            None => Some(Self::new(value, None)),
        }
    }

    /// Header value `tenant~instance`, filling an unset instance from
    /// `default_instance`.
    pub fn header_value(&self, default_instance: &str) -> String {
        let instance = self.instance.as_deref().unwrap_or(default_instance);
        format!("{}{TARGET_INSTANCE_SEPARATOR}{instance}", self.tenant)
    }
}

impl fmt::Display for TargetInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.instance {
            Some(instance) => write!(f, "{}{TARGET_INSTANCE_SEPARATOR}{instance}", self.tenant),
            None => f.write_str(&self.tenant),
        }
    }
}
