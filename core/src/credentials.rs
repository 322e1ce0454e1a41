// Credential capability injected into the session controller

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::errors::CredentialError;

/// Environment variables checked for an API key, in order
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Host-provided credential capability.
///
/// `has_credential` and `select_credential` are what a host authentication
/// flow exposes; `credential` and `invalidate` are what the controller needs
/// at dispatch time and after the provider rejects the key.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Whether a credential is currently selected
    async fn has_credential(&self) -> bool;

    /// Run the (possibly interactive) selection flow
    async fn select_credential(&self) -> Result<(), CredentialError>;

    /// Current credential, if any
    fn credential(&self) -> Option<String>;

    /// Forget the current credential so the host asks again
    fn invalidate(&self);
}

fn non_blank(key: String) -> Option<String> {
    let key = key.trim().to_string();
    (!key.is_empty()).then_some(key)
}

/// Reads the API key from the environment.
/// Invalidation clears the cached key until `select_credential` reads it again.
#[derive(Debug)]
pub struct EnvCredentialProvider {
    vars: Vec<String>,
    cached: RwLock<Option<String>>,
}

impl EnvCredentialProvider {
    pub fn new() -> Self {
        Self::with_vars(API_KEY_ENV_VARS.iter().map(|v| v.to_string()).collect())
    }

    pub fn with_vars(vars: Vec<String>) -> Self {
        let provider = Self {
            vars,
            cached: RwLock::new(None),
        };
        provider.store(provider.read_env());
        provider
    }

    fn read_env(&self) -> Option<String> {
        self.vars
            .iter()
            .find_map(|var| std::env::var(var).ok().and_then(non_blank))
    }

    fn store(&self, key: Option<String>) {
        match self.cached.write() {
            Ok(mut guard) => *guard = key,
            Err(poisoned) => *poisoned.into_inner() = key,
        }
    }
}

impl Default for EnvCredentialProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialProvider for EnvCredentialProvider {
    async fn has_credential(&self) -> bool {
        self.credential().is_some()
    }

    async fn select_credential(&self) -> Result<(), CredentialError> {
        match self.read_env() {
            Some(key) => {
                self.store(Some(key));
                Ok(())
            }
            None => Err(CredentialError::NotConfigured(self.vars.join(", "))),
        }
    }

    fn credential(&self) -> Option<String> {
        match self.cached.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn invalidate(&self) {
        self.store(None);
    }
}

/// Fixed key supplied by the host (or a request header).
/// `select_credential` re-enables a key that was invalidated.
#[derive(Debug)]
pub struct StaticCredentialProvider {
    key: Option<String>,
    valid: AtomicBool,
}

impl StaticCredentialProvider {
    pub fn new(key: impl Into<String>) -> Self {
        let key = non_blank(key.into());
        Self {
            valid: AtomicBool::new(key.is_some()),
            key,
        }
    }

    /// Provider that never has a credential
    pub fn empty() -> Self {
        Self::new("")
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentialProvider {
    async fn has_credential(&self) -> bool {
        self.credential().is_some()
    }

    async fn select_credential(&self) -> Result<(), CredentialError> {
        if self.key.is_none() {
            return Err(CredentialError::SelectionFailed(
                "no key was supplied".to_string(),
            ));
        }
        self.valid.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn credential(&self) -> Option<String> {
        if self.valid.load(Ordering::SeqCst) {
            self.key.clone()
        } else {
            None
        }
    }

    fn invalidate(&self) {
        self.valid.store(false, Ordering::SeqCst);
    }
}
