// src/backend/utils/guards.rs
use crate::error::PlannerError;
use candid::Principal;

/// Rejects the anonymous principal: records are scoped per caller, and the anonymous
/// identity would be shared by every unauthenticated browser.
///
/// # Errors
///
/// Returns `PlannerError::NotAuthorized` for `Principal::anonymous()`.
pub fn check_authenticated(caller: Principal) -> Result<(), PlannerError> {
    if caller == Principal::anonymous() {
        Err(PlannerError::NotAuthorized(
            "Anonymous callers cannot store planning records.".to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Checks a value about to be written against the configured per-record limit.
///
/// # Errors
///
/// Returns `PlannerError::QuotaExceeded` when `bytes` is above `limit`.
pub fn check_value_size(key: &str, bytes: usize, limit: u64) -> Result<(), PlannerError> {
    let bytes = bytes as u64;
    if bytes > limit {
        Err(PlannerError::QuotaExceeded {
            key: key.to_string(),
            bytes,
            limit,
        })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_is_rejected() {
        assert!(check_authenticated(Principal::anonymous()).is_err());
        assert!(check_authenticated(Principal::management_canister()).is_ok());
    }

    #[test]
    fn size_limit_is_inclusive() {
        assert!(check_value_size("k", 10, 10).is_ok());
        assert_eq!(
            check_value_size("k", 11, 10),
            Err(PlannerError::QuotaExceeded { key: "k".to_string(), bytes: 11, limit: 10 })
        );
    }
}
