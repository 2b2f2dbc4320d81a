//! Application configuration for the references extension.
//!
//! # Examples
//!
//! ```rust
//! use reinhardt_references::apps::{CmsAppConfig, validate_label};
//!
//! struct ShopConfig;
//!
//! impl CmsAppConfig for ShopConfig {
//!     fn label(&self) -> &str {
//!         "shop"
//!     }
//! }
//!
//! assert!(validate_label(ShopConfig.label()).is_ok());
//! assert!(!ShopConfig.references_enabled());
//! ```

pub use reinhardt_references_core::apps::{CmsAppConfig, validate_label};

#[cfg(feature = "versioning")]
pub use reinhardt_references_core::apps::ReferencesAppConfig;
