//! Tunables shared by registries and the configuration layer.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::RegistryError;

/// How an ordered registry maintains its iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderingPolicy {
    /// Rebuilt on every registration: pending ids in registration order,
    /// then resolved ids in resolution order. An id moves to the back once
    /// it resolves and a later registration triggers a rebuild.
    #[default]
    PendingFirst,
    /// Append-only registration order.
    Registration,
}

/// Registry tunables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySettings {
    #[serde(default)]
    pub ordering: OrderingPolicy,

    /// Optional cap on the number of factories in flight at once, i.e. the
    /// nesting depth of resolve-within-factory chains. Unlimited when unset.
    /// Never `Some(0)`.
    #[serde(
        default,
        deserialize_with = "deserialize_max_depth",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_depth: Option<usize>,
}

impl RegistrySettings {
    /// Same settings with a different ordering policy.
    pub fn with_ordering(mut self, ordering: OrderingPolicy) -> Self {
        self.ordering = ordering;
        self
    }

    /// Same settings with a depth limit.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidParameter`] if `max_depth` is zero,
    /// which would reject every resolve.
    pub fn with_max_depth(mut self, max_depth: usize) -> Result<Self, RegistryError> {
        check_max_depth(max_depth).map_err(RegistryError::InvalidParameter)?;
        self.max_depth = Some(max_depth);
        Ok(self)
    }

    /// Same settings without a depth limit.
    pub fn without_max_depth(mut self) -> Self {
        self.max_depth = None;
        self
    }
}

fn check_max_depth(max_depth: usize) -> Result<(), String> {
    if max_depth == 0 {
        return Err("max_depth must be greater than 0".to_string());
    }
    Ok(())
}

fn deserialize_max_depth<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let max_depth = Option::<usize>::deserialize(deserializer)?;
    if let Some(depth) = max_depth {
        check_max_depth(depth).map_err(serde::de::Error::custom)?;
    }
    Ok(max_depth)
}
