//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → network.rs (network name → endpoint)
//!     → ClientConfig + NetworkEndpoint (validated, immutable)
//!
//! validator set file (TOML)
//!     → loader.rs (trust root → ValidatorVerifier)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the client never mutates it
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod network;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_validator_set, ConfigError};
pub use network::{resolve_endpoint, NetworkEndpoint};
pub use schema::{ClientConfig, NetworkConfig, ObservabilityConfig, PollingConfig, TransactionConfig};
pub use validation::ValidationError;
