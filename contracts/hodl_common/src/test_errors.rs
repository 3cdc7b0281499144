#[cfg(test)]
mod tests {
    extern crate std;
    use crate::{ErrorCategory, ErrorExt, VaultError};
    use std::vec::Vec;

    fn all_variants() -> Vec<VaultError> {
        std::vec![
            VaultError::NotInitialized,
            VaultError::AlreadyInitialized,
            VaultError::NotAdmin,
            VaultError::NotMinter,
            VaultError::NotReceiptOwner,
            VaultError::InvalidAmount,
            VaultError::InvalidLockWindow,
            VaultError::InvalidPenalty,
            VaultError::LockLimitExceeded,
            VaultError::LockNotFound,
            VaultError::InvalidLockStatus,
            VaultError::LockNotExpired,
            VaultError::NotRedeemed,
            VaultError::InsufficientAllowance,
            VaultError::ReceiptNotFound,
            VaultError::Overflow,
        ]
    }

    // --- Wire code tests ---

    #[test]
    fn test_codes_initialization() {
        assert_eq!(VaultError::NotInitialized as u32, 1);
        assert_eq!(VaultError::AlreadyInitialized as u32, 2);
    }

    #[test]
    fn test_codes_authorization() {
        assert_eq!(VaultError::NotAdmin as u32, 100);
        assert_eq!(VaultError::NotMinter as u32, 101);
        assert_eq!(VaultError::NotReceiptOwner as u32, 102);
    }

    #[test]
    fn test_codes_lock() {
        assert_eq!(VaultError::InvalidAmount as u32, 200);
        assert_eq!(VaultError::InvalidLockWindow as u32, 201);
        assert_eq!(VaultError::InvalidPenalty as u32, 202);
        assert_eq!(VaultError::LockLimitExceeded as u32, 203);
        assert_eq!(VaultError::LockNotFound as u32, 204);
        assert_eq!(VaultError::InvalidLockStatus as u32, 205);
        assert_eq!(VaultError::LockNotExpired as u32, 206);
        assert_eq!(VaultError::NotRedeemed as u32, 207);
        assert_eq!(VaultError::InsufficientAllowance as u32, 208);
    }

    #[test]
    fn test_codes_receipt_and_arithmetic() {
        assert_eq!(VaultError::ReceiptNotFound as u32, 300);
        assert_eq!(VaultError::Overflow as u32, 700);
    }

    // --- Category mapping tests ---

    #[test]
    fn test_categories_follow_code_ranges() {
        for err in all_variants() {
            let code = err as u32;
            let expected = match code {
                1..=99 => ErrorCategory::Initialization,
                100..=199 => ErrorCategory::Authorization,
                200..=299 => ErrorCategory::Lock,
                300..=399 => ErrorCategory::Receipt,
                700..=799 => ErrorCategory::Arithmetic,
                _ => panic!("code {code} outside every range"),
            };
            assert_eq!(err.category(), expected, "{err:?}");
        }
    }

    // --- Description tests ---

    #[test]
    fn test_descriptions_non_empty_and_unique() {
        let variants = all_variants();
        for (i, a) in variants.iter().enumerate() {
            assert!(!a.description().is_empty());
            for b in variants.iter().skip(i + 1) {
                assert_ne!(a.description(), b.description(), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn test_lock_status_descriptions() {
        assert_eq!(VaultError::InvalidLockStatus.description(), "Invalid lock status");
        assert_eq!(
            VaultError::LockLimitExceeded.description(),
            "Lock number limit exceeded"
        );
    }

    // --- Result integration ---

    fn mock_claim(redeemed: bool) -> Result<(), VaultError> {
        if !redeemed {
            return Err(VaultError::NotRedeemed);
        }
        Ok(())
    }

    #[test]
    fn test_claim_requires_redeemed() {
        assert_eq!(mock_claim(false), Err(VaultError::NotRedeemed));
        assert!(mock_claim(true).is_ok());
    }

    #[test]
    fn test_copy_and_ordering() {
        let a = VaultError::LockNotFound;
        let b = a;
        assert_eq!(a, b);
        assert!(VaultError::NotInitialized < VaultError::Overflow);
    }
}
