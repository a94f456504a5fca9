//! Tower middleware layers for the hyper transport.
//!
//! Layers wrap the transport service (`Request` in, [`Exchange`] out) and are
//! added through [`HyperClientBuilder::layer`]:
//!
//! ```ignore
//! use courier::HyperClient;
//! use courier::middleware::LoggingLayer;
//!
//! let client = HyperClient::builder()
//!     .layer(LoggingLayer::new())
//!     .build();
//! ```
//!
//! [`Exchange`]: crate::transport::Exchange
//! [`HyperClientBuilder::layer`]: crate::HyperClientBuilder::layer

mod logging;

pub use logging::{LogLevel, Logging, LoggingLayer};

// Re-export tower types for convenience
pub use tower::{Layer, ServiceBuilder};
