use std::fmt;

/// Bearer token issued by the auth endpoint
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    pub value: String,
    /// Lifetime reported by the service, seconds. Absent for restored tokens.
    pub expires_in: Option<i64>,
}

impl Token {
    pub fn new(value: String, expires_in: Option<i64>) -> Self {
        Self { value, expires_in }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("value", &"***")
            .field("expires_in", &self.expires_in)
            .finish()
    }
}
