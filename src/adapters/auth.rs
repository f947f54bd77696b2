use crate::domain::ports::CredentialVerifier;

/// 設定檔提供的一組帳號密碼
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        !self.password.is_empty() && username == self.username && password == self.password
    }
}
