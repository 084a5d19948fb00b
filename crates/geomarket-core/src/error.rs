//! Error types for geomarket

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarketError {
    // Product catalog errors
    #[error("Product family not found: {id}")]
    FamilyNotFound { id: String },

    #[error("Product family '{id}' is not available for ordering yet")]
    FamilyUnavailable { id: String },

    #[error("Product type '{type_id}' does not belong to family '{family_id}'")]
    ProductTypeNotFound { family_id: String, type_id: String },

    #[error("Tier '{tier_id}' does not belong to product type '{type_id}'")]
    TierNotFound { type_id: String, tier_id: String },

    #[error("A {what} must be selected first")]
    SelectionMissing { what: &'static str },

    // Geometry errors
    #[error("Invalid geometry: {reason}")]
    InvalidGeometry { reason: String },

    // Catalog errors
    #[error("Catalog unavailable: {reason}. Try: {remediation}")]
    CatalogUnavailable { reason: String, remediation: String },

    #[error("There is no failed request to retry")]
    NothingToRetry,

    // Order errors
    #[error("Order submission failed: {reason}")]
    OrderSubmissionFailed { reason: String },

    #[error("Order service unavailable: {reason}. Try: {remediation}")]
    OrderDeskUnavailable { reason: String, remediation: String },

    #[error("Order not found: {id}")]
    OrderNotFound { id: String },

    #[error("Order is incomplete: wizard is still at step {step}")]
    OrderIncomplete { step: u8 },

    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl MarketError {
    /// Whether repeating the same request can succeed.
    ///
    /// Transport failures are retryable; validation failures are not.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            MarketError::CatalogUnavailable { .. }
                | MarketError::OrderSubmissionFailed { .. }
                | MarketError::OrderDeskUnavailable { .. }
        )
    }
}

impl From<serde_json::Error> for MarketError {
    fn from(err: serde_json::Error) -> Self {
        MarketError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MarketError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_errors_are_retryable() {
        let err = MarketError::CatalogUnavailable {
            reason: "connection refused".to_string(),
            remediation: "check the API URL".to_string(),
        };
        assert!(err.is_retryable());

        let err = MarketError::OrderSubmissionFailed { reason: "502".to_string() };
        assert!(err.is_retryable());
    }

    #[test]
    fn test_validation_errors_are_not_retryable() {
        let err = MarketError::InvalidGeometry { reason: "empty ring".to_string() };
        assert!(!err.is_retryable());
        assert!(!MarketError::OrderIncomplete { step: 3 }.is_retryable());
    }
}
