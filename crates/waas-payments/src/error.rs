//! Payment Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, PaymentError>;

/// Payment-related errors
#[derive(Error, Debug)]
pub enum PaymentError {
    /// The requested plan slug does not exist in the catalog
    #[error("Invalid plan: {0}")]
    InvalidPlan(String),

    /// Network/transport failure reaching the gateway
    #[error("Gateway unreachable: {0}")]
    GatewayUnreachable(#[from] reqwest::Error),

    /// The gateway answered but declined the transaction
    #[error("Gateway rejected transaction: {message}")]
    GatewayRejected { message: String },

    /// The gateway's response body was missing expected fields
    #[error("Gateway protocol error: {0}")]
    GatewayProtocol(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PaymentError {
    /// Get user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            PaymentError::InvalidPlan(slug) => format!("Invalid plan: {slug}"),
            PaymentError::GatewayUnreachable(_) => {
                "Payment provider is unreachable. Please try again.".into()
            }
            PaymentError::GatewayRejected { message } => message.clone(),
            PaymentError::GatewayProtocol(_) => {
                "Payment provider returned an unexpected response.".into()
            }
            PaymentError::Config(_) => "Service configuration error.".into(),
        }
    }
}
