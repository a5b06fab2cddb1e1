//! Error taxonomy for wardrobe and outfit operations.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WardrobeError {
    #[error("No clothing items found")]
    EmptyWardrobe,

    #[error("Not enough clothing items to form an outfit")]
    InsufficientWardrobe,

    #[error("Not enough '{tone}' items to form an outfit for {season}/{occasion}")]
    InsufficientTonedWardrobe {
        tone: String,
        occasion: String,
        season: String,
    },

    #[error("No color-compatible outfit found")]
    NoCompatiblePair,

    #[error("Unsupported color: {0}")]
    UnsupportedColor(String),

    #[error("Invalid clothing item: {0}")]
    InvalidItem(String),

    #[error("Clothing item not found: {0}")]
    ItemNotFound(String),

    #[error("Store error: {0:#}")]
    Store(#[from] anyhow::Error),
}

impl WardrobeError {
    /// Client-facing validation failures, as opposed to infrastructure errors.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, WardrobeError::Store(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_are_not_user_errors() {
        let err: WardrobeError = anyhow::anyhow!("disk full").into();
        assert!(!err.is_user_error());
        assert!(WardrobeError::NoCompatiblePair.is_user_error());
    }

    #[test]
    fn test_toned_message() {
        let err = WardrobeError::InsufficientTonedWardrobe {
            tone: "earth".into(),
            occasion: "casual".into(),
            season: "any".into(),
        };
        assert_eq!(
            err.to_string(),
            "Not enough 'earth' items to form an outfit for any/casual"
        );
    }
}
