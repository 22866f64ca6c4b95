/// Authenticated caller, read from a valid access token.
///
/// Built per request and handed to whoever needs it; never stored globally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    subject: String,
    authorities: Vec<String>,
}

impl Principal {
    pub fn new(subject: String, authorities: Vec<String>) -> Self {
        Self {
            subject,
            authorities,
        }
    }

    /// Subject of the token (account email).
    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn authorities(&self) -> &[String] {
        &self.authorities
    }

    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.iter().any(|a| a == authority)
    }
}
