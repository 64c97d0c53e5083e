//! Artifactory basic-auth credentials.

use crate::error::CamError;
use std::fmt;

pub const USERNAME_ENV: &str = "CORDA_ARTIFACTORY_USERNAME";
pub const PASSWORD_ENV: &str = "CORDA_ARTIFACTORY_PASSWORD";

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Builds credentials from already-merged flag/environment values.
    /// The username is checked first, matching the order the user is told to fix them.
    pub fn from_parts(username: Option<String>, password: Option<String>) -> Result<Self, CamError> {
        let username = username.ok_or(CamError::MissingCredential {
            env: USERNAME_ENV,
            flag: 'u',
        })?;
        let password = password.ok_or(CamError::MissingCredential {
            env: PASSWORD_ENV,
            flag: 'p',
        })?;
        Ok(Self { username, password })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
