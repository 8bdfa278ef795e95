use crate::config::AuthConfig;

/// The single admin account, checked against a configured bcrypt hash.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    username: String,
    password_hash: Option<String>,
}

impl AdminCredentials {
    pub fn new(username: impl Into<String>, password_hash: Option<String>) -> Self {
        Self {
            username: username.into(),
            password_hash,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(
            config.admin_username.clone(),
            config.admin_password_hash.clone(),
        )
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn is_configured(&self) -> bool {
        self.password_hash.is_some()
    }

    /// Blocking: bcrypt is deliberately slow, call from `spawn_blocking`.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        let Some(hash) = self.password_hash.as_deref() else {
            return false;
        };
        // Hash first so a wrong username costs as much as a wrong password.
        let password_ok = bcrypt::verify(password, hash).unwrap_or(false);
        password_ok && username == self.username
    }
}

pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
}
