//! Initial passwords for users created by this library.
//!
//! Created users are expected to set their own password through a reset
//! ticket, so the initial one only has to be unguessable and satisfy Auth0's
//! default password policy.

use rand::{Rng, distributions::Alphanumeric};

/// Random characters between the `*` delimiters.
pub const PASSWORD_LENGTH: usize = 10;

/// Generate `*` + ten random alphanumerics + `*`.
///
/// The delimiters give every password a special character, which Auth0's
/// "fair" and "good" policies require.
#[must_use]
pub fn generate_password() -> String {
    let core: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(PASSWORD_LENGTH)
        .map(char::from)
        .collect();
    format!("*{core}*")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn generated_passwords_are_delimited_alphanumerics(_seed in 0u8..32) {
            let password = generate_password();
            prop_assert_eq!(password.len(), PASSWORD_LENGTH + 2);
            prop_assert!(password.starts_with('*') && password.ends_with('*'));
            prop_assert!(password[1..=PASSWORD_LENGTH].chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_passwords_differ() {
        assert_ne!(generate_password(), generate_password());
    }
}
