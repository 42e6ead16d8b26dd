// Copyright 2023 rust-dns-sdk authors
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{DnsError, DnsResult};

/// Environment variable holding the API user
pub const ENV_USER: &str = "INTERNETX_USER";
/// Environment variable holding the API password
pub const ENV_PASSWORD: &str = "INTERNETX_PASSWORD";
/// Environment variable holding the API context
pub const ENV_CONTEXT: &str = "INTERNETX_CONTEXT";

/// InterNetX API account credentials.
///
/// User and password are never empty, the context may be.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawCredentials")]
pub struct Credentials {
    user: String,
    password: String,
    context: String,
}

#[derive(Deserialize)]
struct RawCredentials {
    #[serde(default)]
    user: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    context: String,
}

impl TryFrom<RawCredentials> for Credentials {
    type Error = DnsError;

    fn try_from(raw: RawCredentials) -> DnsResult<Self> {
        Credentials::new(raw.user, raw.password, raw.context)
    }
}

impl Credentials {
    /// Validates and stores the account credentials.
    pub fn new(
        user: impl Into<String>,
        password: impl Into<String>,
        context: impl Into<String>,
    ) -> DnsResult<Self> {
        let user = user.into();
        let password = password.into();
        if user.is_empty() || password.is_empty() {
            return Err(DnsError::Configuration(
                "InterNetX credentials missing or incomplete".to_string(),
            ));
        }

        Ok(Self {
            user,
            password,
            context: context.into(),
        })
    }

    /// Reads `INTERNETX_USER`, `INTERNETX_PASSWORD` and `INTERNETX_CONTEXT`.
    pub fn from_env() -> DnsResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds credentials from any key lookup, unset keys read as empty.
    pub fn from_lookup<F>(lookup: F) -> DnsResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).unwrap_or_default();
        Self::new(read(ENV_USER), read(ENV_PASSWORD), read(ENV_CONTEXT))
    }

    /// Loads credentials from a JSON file.
    ///
    /// Expected format: `{"user": "...", "password": "...", "context": "..."}`.
    /// `context` may be omitted.
    pub fn load_from_file(path: &Path) -> DnsResult<Self> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let metadata = fs::metadata(path).map_err(|e| {
                DnsError::Configuration(format!(
                    "Failed to read credentials file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
            let mode = metadata.permissions().mode() & 0o777;
            if mode & 0o077 != 0 {
                warn!(
                    path = %path.display(),
                    mode = %format!("{:o}", mode),
                    "Credentials file is readable by other users (should be 0600 or 0400)"
                );
            }
        }

        let content = fs::read_to_string(path).map_err(|e| {
            DnsError::Configuration(format!(
                "Failed to read credentials file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let credentials: Credentials = serde_json::from_str(&content).map_err(|e| {
            DnsError::Configuration(format!(
                "Invalid credentials file '{}': {}",
                path.display(),
                e
            ))
        })?;

        debug!(path = %path.display(), user = %credentials.user, "Loaded InterNetX credentials");
        Ok(credentials)
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn context(&self) -> &str {
        &self.context
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("context", &self.context)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_new_echoes_fields() {
        let creds = Credentials::new("user", "secret", "4").unwrap();
        assert_eq!(creds.user(), "user");
        assert_eq!(creds.password(), "secret");
        assert_eq!(creds.context(), "4");

        let creds = Credentials::new("user", "secret", "").unwrap();
        assert_eq!(creds.context(), "");
    }

    #[test]
    fn test_missing_user_or_password() {
        for (user, password) in [("", "secret"), ("user", ""), ("", "")] {
            let err = Credentials::new(user, password, "4").unwrap_err();
            assert!(matches!(err, DnsError::Configuration(_)));
        }
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [
            (ENV_USER, "env-user"),
            (ENV_PASSWORD, "env-pass"),
            (ENV_CONTEXT, "9"),
        ]
        .into_iter()
        .collect();

        let creds = Credentials::from_lookup(|name| vars.get(name).map(|v| v.to_string())).unwrap();
        assert_eq!(creds.user(), "env-user");
        assert_eq!(creds.password(), "env-pass");
        assert_eq!(creds.context(), "9");
    }

    #[test]
    fn test_from_lookup_missing_password() {
        let result = Credentials::from_lookup(|name| {
            (name == ENV_USER).then(|| "env-user".to_string())
        });
        assert!(matches!(result, Err(DnsError::Configuration(_))));
    }

    #[test]
    fn test_debug_redacts_password() {
        let creds = Credentials::new("user", "hunter2", "4").unwrap();
        let printed = format!("{:?}", creds);
        assert!(printed.contains("user"));
        assert!(!printed.contains("hunter2"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"user": "file-user", "password": "file-pass", "context": "4"}}"#).unwrap();

        let creds = Credentials::load_from_file(file.path()).unwrap();
        assert_eq!(creds.user(), "file-user");
        assert_eq!(creds.password(), "file-pass");
        assert_eq!(creds.context(), "4");
    }

    #[test]
    fn test_load_from_file_without_context() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"user": "file-user", "password": "file-pass"}}"#).unwrap();

        let creds = Credentials::load_from_file(file.path()).unwrap();
        assert_eq!(creds.context(), "");
    }

    #[test]
    fn test_load_from_file_incomplete() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"user": "file-user"}}"#).unwrap();

        let result = Credentials::load_from_file(file.path());
        assert!(matches!(result, Err(DnsError::Configuration(_))));
    }

    #[test]
    fn test_load_from_file_malformed() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"user": "unclosed"#).unwrap();

        assert!(Credentials::load_from_file(file.path()).is_err());
    }

    #[test]
    fn test_load_from_missing_file() {
        let result = Credentials::load_from_file(Path::new("/nonexistent/internetx.json"));
        assert!(matches!(result, Err(DnsError::Configuration(_))));
    }
}
