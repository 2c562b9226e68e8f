//! Login credential generation for new cashiers.
//!
//! Usernames are derived from the cashier's display name:
//!
//! | name            | base handle |
//! |-----------------|-------------|
//! | `Al`            | `al`        |
//! | `A`             | `a`         |
//! | `Jane Doe`      | `jd`        |
//! | `Jane Mary Doe` | `jd`        |
//!
//! The first candidate is `<base>@<domain>`. While a candidate is taken the
//! generator tries `<base>1@<domain>`, `<base>2@<domain>`, ... asking the
//! caller-supplied predicate each time. The check is not atomic with the
//! later insert; the record store's unique constraint on the username is
//! what finally rejects a racing duplicate.
//!
//! Passwords are 8 characters drawn uniformly from `[A-Za-z0-9]` using the
//! thread-local CSPRNG.

use std::future::Future;

use rand::Rng;
use rand::distr::Alphanumeric;
use secrecy::SecretString;

use crate::types::{UserName, UserNameDomain, UserNameError};

/// Length of a generated password.
pub const PASSWORD_LENGTH: usize = 8;

/// Errors from [`generate_unique_user_name`].
#[derive(thiserror::Error, Debug)]
pub enum UserNameGenerationError<E> {
    /// The cashier name cannot produce a valid handle (e.g. it starts with `@`).
    #[error("cashier name does not yield a usable username: {0}")]
    InvalidName(#[source] UserNameError),
    /// Every numbered candidate was already taken.
    #[error("no free username left for handle {0}")]
    Exhausted(String),
    /// The existence predicate failed.
    #[error(transparent)]
    Lookup(E),
}

/// Derive the base handle (before any counter and domain) from a display name.
///
/// One word: its first two characters. Several words: the first character of
/// the first and of the last word. Always lower-cased. A one-character name
/// yields a one-character handle; a blank name yields an empty handle.
#[must_use]
pub fn base_handle(cashier_name: &str) -> String {
    let words: Vec<&str> = cashier_name.split_whitespace().collect();
    let handle: String = match words.as_slice() {
        [] => String::new(),
        [only] => only.chars().take(2).collect(),
        [first, .., last] => first.chars().take(1).chain(last.chars().take(1)).collect(),
    };
    handle.to_lowercase()
}

/// The `attempt`-th candidate for a base handle: `0` is the bare handle,
/// `n > 0` appends `n` before the domain.
///
/// # Errors
///
/// Returns an error if the handle cannot form a valid username.
pub fn candidate(
    base: &str,
    attempt: u32,
    domain: &UserNameDomain,
) -> Result<UserName, UserNameError> {
    if attempt == 0 {
        UserName::from_parts(base, domain)
    } else {
        UserName::from_parts(&format!("{base}{attempt}"), domain)
    }
}

/// Generate the first free username for `cashier_name`.
///
/// `exists` is called with each candidate in turn and must report whether a
/// record already uses it.
///
/// # Errors
///
/// Returns [`UserNameGenerationError::InvalidName`] if the name yields no
/// valid handle, [`UserNameGenerationError::Lookup`] if the predicate fails,
/// and [`UserNameGenerationError::Exhausted`] if every counter is taken.
pub async fn generate_unique_user_name<F, Fut, E>(
    cashier_name: &str,
    domain: &UserNameDomain,
    mut exists: F,
) -> Result<UserName, UserNameGenerationError<E>>
where
    F: FnMut(UserName) -> Fut,
    Fut: Future<Output = Result<bool, E>>,
{
    let base = base_handle(cashier_name);

    for attempt in 0..=u32::MAX {
        let user_name =
            candidate(&base, attempt, domain).map_err(UserNameGenerationError::InvalidName)?;
        let taken = exists(user_name.clone())
            .await
            .map_err(UserNameGenerationError::Lookup)?;
        if !taken {
            return Ok(user_name);
        }
    }

    Err(UserNameGenerationError::Exhausted(base))
}

/// Generate a random password using the thread-local CSPRNG.
#[must_use]
pub fn generate_password() -> SecretString {
    generate_password_with(&mut rand::rng())
}

/// Generate a random password from the given RNG.
pub fn generate_password_with<R: Rng + ?Sized>(rng: &mut R) -> SecretString {
    let password: String = (0..PASSWORD_LENGTH)
        .map(|_| char::from(rng.sample(Alphanumeric)))
        .collect();
    SecretString::from(password)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;
    use std::convert::Infallible;

    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use secrecy::ExposeSecret;

    use super::*;

    fn taken(names: &[&str]) -> HashSet<String> {
        names.iter().map(|s| (*s).to_owned()).collect()
    }

    async fn generate(name: &str, existing: &HashSet<String>) -> UserName {
        let domain = UserNameDomain::default();
        generate_unique_user_name(name, &domain, |candidate| {
            let hit = existing.contains(candidate.as_str());
            async move { Ok::<_, Infallible>(hit) }
        })
        .await
        .unwrap()
    }

    #[test]
    fn test_base_handle_single_word() {
        assert_eq!(base_handle("Al"), "al");
        assert_eq!(base_handle("Priya"), "pr");
        assert_eq!(base_handle("  Ravi  "), "ra");
    }

    #[test]
    fn test_base_handle_short_single_word() {
        assert_eq!(base_handle("A"), "a");
    }

    #[test]
    fn test_base_handle_multi_word_uses_first_and_last() {
        assert_eq!(base_handle("Jane Doe"), "jd");
        assert_eq!(base_handle("Jane  Mary\tDoe"), "jd");
    }

    #[test]
    fn test_base_handle_non_ascii() {
        assert_eq!(base_handle("Émile Zola"), "éz");
        assert_eq!(base_handle("Ω"), "ω");
    }

    #[test]
    fn test_candidate_numbering() {
        let domain = UserNameDomain::default();
        assert_eq!(candidate("jd", 0, &domain).unwrap().as_str(), "jd@nature.com");
        assert_eq!(candidate("jd", 3, &domain).unwrap().as_str(), "jd3@nature.com");
    }

    #[tokio::test]
    async fn test_generate_on_empty_store() {
        let none = HashSet::new();
        assert_eq!(generate("Al", &none).await.as_str(), "al@nature.com");
        assert_eq!(generate("A", &none).await.as_str(), "a@nature.com");
        assert_eq!(generate("Jane Doe", &none).await.as_str(), "jd@nature.com");
    }

    #[tokio::test]
    async fn test_generate_appends_counter_on_collision() {
        let existing = taken(&["jd@nature.com"]);
        assert_eq!(generate("Jane Doe", &existing).await.as_str(), "jd1@nature.com");

        let existing = taken(&["jd@nature.com", "jd1@nature.com"]);
        assert_eq!(generate("John Dean", &existing).await.as_str(), "jd2@nature.com");
    }

    #[tokio::test]
    async fn test_generate_fills_first_gap() {
        let existing = taken(&["jd@nature.com", "jd2@nature.com"]);
        assert_eq!(generate("Jane Doe", &existing).await.as_str(), "jd1@nature.com");
    }

    #[tokio::test]
    async fn test_generate_with_custom_domain() {
        let domain = UserNameDomain::parse("staff.example.in").unwrap();
        let name = generate_unique_user_name("Al", &domain, |_| async {
            Ok::<_, Infallible>(false)
        })
        .await
        .unwrap();
        assert_eq!(name.as_str(), "al@staff.example.in");
    }

    #[tokio::test]
    async fn test_generate_propagates_lookup_error() {
        let domain = UserNameDomain::default();
        let result = generate_unique_user_name("Al", &domain, |_| async {
            Err::<bool, _>(std::fmt::Error)
        })
        .await;
        assert!(matches!(
            result,
            Err(UserNameGenerationError::Lookup(std::fmt::Error))
        ));
    }

    #[tokio::test]
    async fn test_generate_rejects_unusable_name() {
        let domain = UserNameDomain::default();
        let result = generate_unique_user_name("@x", &domain, |_| async {
            Ok::<_, Infallible>(false)
        })
        .await;
        assert!(matches!(
            result,
            Err(UserNameGenerationError::InvalidName(_))
        ));
    }

    #[test]
    fn test_password_shape() {
        for _ in 0..200 {
            let password = generate_password();
            let value = password.expose_secret();
            assert_eq!(value.chars().count(), PASSWORD_LENGTH);
            assert!(value.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_password_seeded_is_deterministic() {
        let a = generate_password_with(&mut StdRng::seed_from_u64(7));
        let b = generate_password_with(&mut StdRng::seed_from_u64(7));
        assert_eq!(a.expose_secret(), b.expose_secret());
    }

    #[test]
    fn test_password_alphabet_coverage() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = HashSet::new();
        for _ in 0..500 {
            seen.extend(generate_password_with(&mut rng).expose_secret().chars());
        }
        assert!(seen.iter().any(char::is_ascii_uppercase));
        assert!(seen.iter().any(char::is_ascii_lowercase));
        assert!(seen.iter().any(char::is_ascii_digit));
        assert!(seen.len() > 50);
    }
}
