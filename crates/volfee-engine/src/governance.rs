//! Governance access control
//!
//! A single mutable authority identity; every governance-facing operation
//! checks the caller against the stored value before touching any state.

use crate::error::{EngineError, EngineResult};
use volfee_core::AccountId;

/// The governance authority for one engine instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Governance {
    governor: AccountId,
}

impl Governance {
    pub fn new(governor: AccountId) -> Self {
        Self { governor }
    }

    /// Current governance identity
    pub fn governor(&self) -> AccountId {
        self.governor
    }

    /// Fail with `Unauthorized` unless `caller` is the governor
    pub fn require_governor(&self, caller: AccountId) -> EngineResult<()> {
        if caller == self.governor {
            Ok(())
        } else {
            Err(EngineError::Unauthorized)
        }
    }

    /// Hand governance to a new identity; only the current governor may
    pub fn transfer(&mut self, caller: AccountId, new_governor: AccountId) -> EngineResult<()> {
        self.require_governor(caller)?;
        self.governor = new_governor;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_governor() {
        let governance = Governance::new(AccountId(1));
        assert!(governance.require_governor(AccountId(1)).is_ok());
        assert_eq!(
            governance.require_governor(AccountId(2)),
            Err(EngineError::Unauthorized)
        );
    }

    #[test]
    fn test_transfer() {
        let mut governance = Governance::new(AccountId(1));
        assert_eq!(
            governance.transfer(AccountId(2), AccountId(2)),
            Err(EngineError::Unauthorized)
        );

        governance.transfer(AccountId(1), AccountId(2)).unwrap();
        assert_eq!(governance.governor(), AccountId(2));
        // The old governor loses its authority
        assert!(governance.require_governor(AccountId(1)).is_err());
    }
}
