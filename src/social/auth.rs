//! Static bearer-token check in front of every social route

/// Outcome of checking the `Authorization` header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthDecision {
    Granted,
    /// No header, or not a `Bearer` header (401)
    MissingToken,
    /// `Bearer` header with the wrong token (403)
    InvalidToken,
}

#[derive(Debug, Clone)]
pub struct BearerAuth {
    expected: String,
}

impl BearerAuth {
    pub fn new(token: &str) -> Self {
        Self {
            expected: format!("Bearer {}", token),
        }
    }

    pub fn check(&self, authorization: Option<&str>) -> AuthDecision {
        match authorization {
            Some(header) if header.starts_with("Bearer ") => {
                if header == self.expected {
                    AuthDecision::Granted
                } else {
                    AuthDecision::InvalidToken
                }
            }
            _ => AuthDecision::MissingToken,
        }
    }
}
