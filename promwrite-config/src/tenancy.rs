//! Multi-tenancy routing configuration.

use serde::{Deserialize, Serialize};

use crate::de;

/// Attaches a tenant identity to outgoing requests.
///
/// The tenant name is read from the `from_label` label of each series and
/// sent either as an HTTP header, a query parameter, or both.
#[derive(Default, Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct MultiTenancy {
    pub enabled: bool,

    /// Header name set on requests to the backend.
    #[serde(deserialize_with = "de::text")]
    pub header: String,

    /// Query parameter set on requests to the backend.
    #[serde(deserialize_with = "de::text")]
    pub query_param: String,

    /// Label whose value is used as the tenant name.
    #[serde(deserialize_with = "de::text")]
    pub from_label: String,

    /// Tenant used when a series has no `from_label` value. May be empty.
    #[serde(deserialize_with = "de::text")]
    pub default_tenant: String,
}

impl MultiTenancy {
    /// True when either a header or a query parameter carries the tenant.
    pub fn has_carrier(&self) -> bool {
        !self.header.is_empty() || !self.query_param.is_empty()
    }
}
