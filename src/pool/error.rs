//! Pool error taxonomy

/// Errors reported by [`PoolRegistry`](super::PoolRegistry) operations.
///
/// None of these are fatal. The registry logs each one before returning it,
/// and callers are expected to treat an `Err` as "operation skipped".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// A pool with this tag is already registered
    DuplicateTag(String),
    /// No pool is registered under this tag
    UnknownTag(String),
    /// The pool has no queued items left to hand out
    Exhausted(String),
}

impl PoolError {
    /// The tag the failed operation was called with
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Self::DuplicateTag(tag) | Self::UnknownTag(tag) | Self::Exhausted(tag) => tag,
        }
    }
}

impl std::fmt::Display for PoolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateTag(tag) => write!(f, "Pool with tag '{tag}' already exists"),
            Self::UnknownTag(tag) => write!(f, "Pool with tag '{tag}' doesn't exist"),
            Self::Exhausted(tag) => write!(f, "No available objects in pool with tag '{tag}'"),
        }
    }
}

impl std::error::Error for PoolError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_tag() {
        assert_eq!(PoolError::Exhausted("sfx".into()).tag(), "sfx");
        assert_eq!(PoolError::UnknownTag("rows".into()).tag(), "rows");
    }

    #[test]
    fn test_error_display() {
        let err = PoolError::DuplicateTag("Cards".into());
        assert_eq!(err.to_string(), "Pool with tag 'Cards' already exists");
    }
}
