//! Credential verification for front ends that gate access to the pipeline.
//!
//! The extraction engine never depends on this module.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Something that can check a login/password pair.
pub trait CredentialStore {
    fn verify(&self, login: &str, password: &str) -> bool;
}

/// In-memory credential map, typically loaded from a JSON file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaticCredentials {
    users: HashMap<String, String>,
}

impl StaticCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a user.
    pub fn with_user(mut self, login: impl Into<String>, password: impl Into<String>) -> Self {
        self.users.insert(login.into(), password.into());
        self
    }

    /// Load a `{"login": "password"}` map from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }
}

impl CredentialStore for StaticCredentials {
    fn verify(&self, login: &str, password: &str) -> bool {
        self.users.get(login).is_some_and(|p| p == password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify() {
        let store = StaticCredentials::new().with_user("User", "1");

        assert!(store.verify("User", "1"));
        assert!(!store.verify("User", "2"));
        assert!(!store.verify("user", "1"));
        assert!(!store.verify("", ""));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        std::fs::write(&path, r#"{"operator": "secret"}"#).unwrap();

        let store = StaticCredentials::from_file(&path).unwrap();
        assert!(store.verify("operator", "secret"));
    }

    #[test]
    fn test_usable_as_trait_object() {
        let store: Box<dyn CredentialStore> = Box::new(StaticCredentials::new().with_user("a", "b"));
        assert!(store.verify("a", "b"));
    }
}
