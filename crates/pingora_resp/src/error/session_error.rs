/// Failure while reading a request from, or writing a response to, a
/// Pingora session.
#[derive(Debug)]
pub enum SessionError {
    /// The status/header set could not be assembled into a response head.
    Http(http::Error),
    /// The session failed to read or write.
    Session(Box<pingora_core::Error>),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::Http(e) => write!(f, "invalid response head: {}", e),
            SessionError::Session(e) => write!(f, "session io failed: {}", e),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Http(e) => Some(e),
            SessionError::Session(e) => Some(&**e),
        }
    }
}

impl From<http::Error> for SessionError {
    fn from(err: http::Error) -> Self {
        Self::Http(err)
    }
}

impl From<Box<pingora_core::Error>> for SessionError {
    fn from(err: Box<pingora_core::Error>) -> Self {
        Self::Session(err)
    }
}
