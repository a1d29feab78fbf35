use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::Credential;
use crate::domain::auth::models::CredentialId;
use crate::domain::auth::ports::CredentialRepository;

/// In-process credential store keyed by email.
///
/// Email uniqueness is enforced under the write lock, so two concurrent
/// registrations for the same email cannot both succeed.
#[derive(Debug, Default)]
pub struct InMemoryCredentialRepository {
    credentials: RwLock<HashMap<String, Credential>>,
}

impl InMemoryCredentialRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.credentials.read().map(|c| c.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CredentialRepository for InMemoryCredentialRepository {
    fn find_by_email(&self, email: &str) -> Result<Option<Credential>, AuthError> {
        let credentials = self
            .credentials
            .read()
            .map_err(|e| AuthError::Repository(e.to_string()))?;

        Ok(credentials.get(email).cloned())
    }

    fn save(&self, email: &str, password_hash: &str) -> Result<Credential, AuthError> {
        let mut credentials = self
            .credentials
            .write()
            .map_err(|e| AuthError::Repository(e.to_string()))?;

        match credentials.entry(email.to_string()) {
            Entry::Occupied(_) => Err(AuthError::EmailAlreadyExists(email.to_string())),
            Entry::Vacant(slot) => {
                let credential = Credential {
                    id: CredentialId::new(),
                    email: email.to_string(),
                    password_hash: password_hash.to_string(),
                };
                slot.insert(credential.clone());

                tracing::debug!(credential_id = %credential.id, "Credential stored");
                Ok(credential)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    #[test]
    fn test_save_then_find() {
        let repository = InMemoryCredentialRepository::new();

        let saved = repository.save("a@x.com", "hash").expect("save failed");
        let found = repository.find_by_email("a@x.com").expect("lookup failed");

        assert_eq!(found, Some(saved.clone()));
        assert_eq!(repository.find_id_by_email("a@x.com").unwrap(), Some(saved.id));
        assert_eq!(
            repository.find_hash_by_email("a@x.com").unwrap().as_deref(),
            Some("hash")
        );
    }

    #[test]
    fn test_find_unknown_email() {
        let repository = InMemoryCredentialRepository::new();

        assert_eq!(repository.find_by_email("nobody@x.com").unwrap(), None);
        assert!(repository.is_empty());
    }

    #[test]
    fn test_duplicate_email_is_rejected() {
        let repository = InMemoryCredentialRepository::new();
        repository.save("a@x.com", "first").expect("save failed");

        let result = repository.save("a@x.com", "second");

        assert!(matches!(result, Err(AuthError::EmailAlreadyExists(email)) if email == "a@x.com"));
        assert_eq!(
            repository.find_hash_by_email("a@x.com").unwrap().as_deref(),
            Some("first")
        );
    }

    #[test]
    fn test_concurrent_saves_admit_exactly_one() {
        let repository = Arc::new(InMemoryCredentialRepository::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let repository = Arc::clone(&repository);
                thread::spawn(move || repository.save("race@x.com", &format!("hash-{i}")))
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|handle| handle.join().expect("thread panicked"))
            .filter(Result::is_ok)
            .count();

        assert_eq!(successes, 1);
        assert_eq!(repository.len(), 1);
    }
}
