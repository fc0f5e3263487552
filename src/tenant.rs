//! Tenant namespacing
//!
//! Every call to the retrieval service carries a partition derived from the
//! client id. The partition is a distinct type so a raw client id cannot be
//! passed where a scope is expected.

use std::fmt;

use serde::Serialize;

const SCOPE_PREFIX: &str = "client_";

/// Isolation namespace for one tenant's documents
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TenantScope(String);

impl TenantScope {
    /// Derive the scope for a client id: `client_<id>`
    #[must_use]
    pub fn for_client(client_id: &str) -> Self {
        Self(format!("{SCOPE_PREFIX}{client_id}"))
    }

    /// Partition name as sent to the retrieval service
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Client id this scope was derived from
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.0[SCOPE_PREFIX.len()..]
    }
}

impl fmt::Display for TenantScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TenantScope {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_format() {
        assert_eq!(TenantScope::for_client("client1").as_str(), "client_client1");
        assert_eq!(TenantScope::for_client("acme").to_string(), "client_acme");
    }

    #[test]
    fn test_scope_is_stable() {
        assert_eq!(TenantScope::for_client("acme"), TenantScope::for_client("acme"));
    }

    #[test]
    fn test_distinct_clients_get_distinct_scopes() {
        let ids = ["a", "b", "ab", "A", "client_a", "", "42", "a b", "ü"];
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                assert_ne!(
                    TenantScope::for_client(a),
                    TenantScope::for_client(b),
                    "scopes collided for {a:?} and {b:?}"
                );
            }
        }
    }

    #[test]
    fn test_client_id_round_trip() {
        let scope = TenantScope::for_client("client1");
        assert_eq!(scope.client_id(), "client1");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&TenantScope::for_client("x")).unwrap();
        assert_eq!(json, "\"client_x\"");
    }
}
