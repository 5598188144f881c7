use std::fmt;

/// Directory lookup key derived from a DNS query name.
///
/// Query names arrive fully qualified ("web.", "web.default.svc.") while
/// Endpoints objects are named without the trailing dot, so exactly one
/// trailing dot is stripped. No other normalization is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EndpointKey(String);

impl EndpointKey {
    pub fn from_query_name(name: &str) -> Self {
        let key = name.strip_suffix('.').unwrap_or(name);
        Self(key.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EndpointKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
