//! Service credential resolution.
//!
//! Sources, in priority order:
//! 1. a local JSON file (config `credentials_file`, or `--credentials`)
//! 2. the structured JSON value held in `TEAMLOG_SERVICE_ACCOUNT`

use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CREDENTIAL_ENV: &str = "TEAMLOG_SERVICE_ACCOUNT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCredential {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub project_id: String,
    pub client_email: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default)]
    pub private_key: Option<String>,
}

impl ServiceCredential {
    pub fn new(client_email: &str) -> Self {
        Self {
            kind: "service_account".into(),
            project_id: String::new(),
            client_email: client_email.into(),
            private_key_id: None,
            private_key: None,
        }
    }

    /// Parse and check a credential document.
    /// Malformed credentials surface as connectivity failures: the store
    /// cannot be reached with them.
    pub fn from_json(raw: &str, source: &str) -> AppResult<Self> {
        let cred: ServiceCredential = serde_json::from_str(raw).map_err(|e| {
            AppError::Connectivity(format!("malformed credential in {source}: {e}"))
        })?;

        if cred.kind != "service_account" {
            return Err(AppError::Connectivity(format!(
                "credential in {source} has type '{}', expected 'service_account'",
                cred.kind
            )));
        }
        if !cred.client_email.contains('@') {
            return Err(AppError::Connectivity(format!(
                "credential in {source} has no valid client_email"
            )));
        }
        Ok(cred)
    }
}

/// Resolve the service credential, file first, then environment.
pub fn resolve(file: &str) -> AppResult<ServiceCredential> {
    resolve_with(file, std::env::var(CREDENTIAL_ENV).ok())
}

/// Same as [`resolve`] with the environment value passed in.
pub fn resolve_with(file: &str, env_value: Option<String>) -> AppResult<ServiceCredential> {
    let path = expand_tilde(file);

    if Path::new(&path).exists() {
        let raw = fs::read_to_string(&path)?;
        return ServiceCredential::from_json(&raw, &path.display().to_string());
    }

    match env_value {
        Some(v) if !v.trim().is_empty() => ServiceCredential::from_json(&v, CREDENTIAL_ENV),
        _ => Err(AppError::NoCredential(format!(
            "{} and ${}",
            path.display(),
            CREDENTIAL_ENV
        ))),
    }
}
