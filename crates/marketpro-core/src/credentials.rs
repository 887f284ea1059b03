//! # Credential Verification
//!
//! The single seam through which login checks a password.
//!
//! ## SECURITY WARNING
//! Passwords are stored in plaintext and compared with string equality,
//! for compatibility with existing persisted state blobs. That is a
//! genuine defect, not a stylistic one. Every credential check in the
//! system goes through the
//! [`CredentialVerifier`] trait so the plaintext scheme can be replaced
//! with a hashed one (argon2 or similar) without touching the store or
//! any operation contract.

use crate::types::User;

/// Verifies a login attempt against a stored user record.
///
/// Implementations decide what `User::password` means: the default treats
/// it as the plaintext secret; a hardened implementation would treat it
/// as a password hash.
pub trait CredentialVerifier {
    /// Returns true when `password` matches the user's stored credential.
    fn verify(&self, user: &User, password: &str) -> bool;
}

/// Plaintext, case-sensitive comparison.
///
/// See the module-level SECURITY WARNING before reaching for this.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaintextCredentials;

impl CredentialVerifier for PlaintextCredentials {
    fn verify(&self, user: &User, password: &str) -> bool {
        user.password == password
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
