pub type KenBurnsResult<T> = Result<T, KenBurnsError>;

#[derive(thiserror::Error, Debug)]
pub enum KenBurnsError {
    /// Rejected configuration or sequence input. The receiver is left unchanged.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl KenBurnsError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefix_is_stable() {
        assert!(
            KenBurnsError::invalid_argument("x")
                .to_string()
                .contains("invalid argument:")
        );
        assert!(KenBurnsError::invalid_argument("x").is_invalid_argument());
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = KenBurnsError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
        assert!(!err.is_invalid_argument());
    }
}
