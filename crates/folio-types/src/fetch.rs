use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::scope::Scope;

/// On-chain wallet address tracked by the dashboard.
///
/// Addresses are compared verbatim after trimming surrounding whitespace;
/// format validation belongs to whoever collects them.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn new(address: impl AsRef<str>) -> Self {
        Self(address.as_ref().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Address {
    fn from(address: &str) -> Self {
        Self::new(address)
    }
}

impl From<String> for Address {
    fn from(address: String) -> Self {
        Self::new(address)
    }
}

/// Identity of one fetch: a wallet for a given scope.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FetchKey {
    pub address: Address,
    pub scope: Scope,
}

impl FetchKey {
    pub const fn new(address: Address, scope: Scope) -> Self {
        Self { address, scope }
    }
}

impl fmt::Display for FetchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.address, self.scope)
    }
}

/// Lifecycle of a cache entry: `Idle -> Pending -> {Success, Error}`.
#[derive(Debug, Clone, Copy, Default, Hash, Eq, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FetchStatus {
    #[default]
    Idle,
    Pending,
    Success,
    Error,
}

impl FetchStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    /// Whether `self -> next` is a legal forward transition.
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Pending) | (Self::Pending, Self::Success | Self::Error)
        )
    }
}

impl fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transitions_are_monotonic() {
        use FetchStatus::{Error, Idle, Pending, Success};

        assert!(Idle.can_transition_to(Pending));
        assert!(Pending.can_transition_to(Success));
        assert!(Pending.can_transition_to(Error));

        assert!(!Idle.can_transition_to(Success));
        assert!(!Pending.can_transition_to(Pending));
        assert!(!Success.can_transition_to(Pending));
        assert!(!Error.can_transition_to(Pending));
        assert!(!Success.can_transition_to(Error));
    }

    #[test]
    fn test_fetch_key_structural_equality() {
        let a = FetchKey::new(Address::new("0xabc"), Scope::OneMonth);
        let b = FetchKey::new(Address::new("  0xabc "), Scope::OneMonth);
        let c = FetchKey::new(Address::new("0xabc"), Scope::OneYear);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.to_string(), "0xabc@1M");
    }
}
