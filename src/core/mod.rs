//! Tuning constants, configuration and errors shared by every module.

pub mod config;
pub mod constants;
pub mod error;

pub use config::DeliveryConfig;
pub use error::{DeliveryError, DeliveryResult};
