use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Coarse permission tier used when no exact action-level rule applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessLevel {
    View,
    Edit,
    Admin,
}

impl AccessLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessLevel::View => "View",
            AccessLevel::Edit => "Edit",
            AccessLevel::Admin => "Admin",
        }
    }

    /// Levels permitted to invoke an operation when no explicit set was
    /// registered, inferred from the HTTP method. Read-only methods admit
    /// viewers; mutating methods do not.
    pub fn for_method(method: &str) -> &'static [AccessLevel] {
        match method.to_ascii_uppercase().as_str() {
            "GET" | "HEAD" | "OPTIONS" => &[AccessLevel::Admin, AccessLevel::Edit, AccessLevel::View],
            _ => &[AccessLevel::Admin, AccessLevel::Edit],
        }
    }
}

impl core::fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of a protected operation: a resource grouping plus an action name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceDescriptor {
    pub resource: String,
    pub action: String,
}

impl ResourceDescriptor {
    pub fn new(resource: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            action: action.into(),
        }
    }
}

/// Explicit startup registration of per-operation access-level requirements.
///
/// Built once at startup from static metadata; request-time use is lookup
/// only. Operations without a declared entry fall back to levels inferred
/// from the HTTP method.
#[derive(Debug, Clone, Default)]
pub struct AccessRegistry {
    declared: HashMap<(String, String), Vec<AccessLevel>>,
}

impl AccessRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the explicit required levels for `(resource, action)`.
    pub fn declare(
        mut self,
        resource: impl Into<String>,
        action: impl Into<String>,
        levels: impl IntoIterator<Item = AccessLevel>,
    ) -> Self {
        self.declared.insert(
            (resource.into(), action.into()),
            levels.into_iter().collect(),
        );
        self
    }

    /// Required access-level set for an operation: the declared set when one
    /// exists, otherwise inferred from the HTTP method.
    pub fn required_levels(&self, descriptor: &ResourceDescriptor, method: &str) -> Vec<AccessLevel> {
        let key = (descriptor.resource.clone(), descriptor.action.clone());
        match self.declared.get(&key) {
            Some(levels) => levels.clone(),
            None => AccessLevel::for_method(method).to_vec(),
        }
    }
}
