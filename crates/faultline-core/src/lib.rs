//! Faultline Core - localized, templated results and faults for service APIs
//!
//! This crate lets an operation return either a successful payload with
//! advisory messages or a uniform, localizable, multi-message fault, and maps
//! both to transport-level responses.
//!
//! # Main Components
//!
//! - **Locale**: context-owned ambient locale with scoped, restoring overrides
//! - **Template Engine**: named-token templates with format specs and escapes
//! - **Resources**: template lookup by key and locale, with fallbacks
//! - **Messages**: immutable rendered messages built through a [`RenderContext`]
//! - **Outcomes**: value-or-nothing results carrying messages
//! - **Validation**: non-short-circuiting rule chains
//! - **Faults**: client failures with a suggested status
//! - **Response mapping**: status code and JSON body for outcomes and errors
//!
//! # Example
//!
//! ```
//! use faultline_core::{response, Fault, Outcome, RenderContext, Validator};
//!
//! fn register(ctx: &RenderContext, name: Option<&str>) -> Result<Outcome<String>, Fault> {
//!     let mut validator = Validator::new(ctx);
//!     validator
//!         .validate_property_is_required("Name", &name)
//!         .validate_string_length("Name", name, 3, 20);
//!     validator.finish()?;
//!
//!     Ok(Outcome::of(ctx, format!("welcome {}", name.unwrap_or_default())).build())
//! }
//!
//! let ctx = RenderContext::with_builtin_catalog("en-US");
//! assert_eq!(response::map_result(&register(&ctx, Some("Ana"))).status, 200);
//! assert_eq!(response::map_result(&register(&ctx, None)).status, 400);
//! ```

pub mod error;
pub mod fault;
pub mod locale;
pub mod message;
pub mod outcome;
pub mod resources;
pub mod response;
pub mod template;
pub mod tokens;
pub mod validator;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use fault::{Fault, FaultKind};
pub use locale::{negotiate_locale, LocaleCell, LocaleScope, DEFAULT_LOCALE};
pub use message::{entity_label, Message, MessageKind, RenderContext};
pub use outcome::{Outcome, OutcomeBuilder};
pub use resources::{keys, ResourceCatalog, ResourceStore};
pub use response::{map_error, map_fault, map_outcome, map_result, ErrorBody, Response};
pub use template::{normalize_tokens, Rendering, Template, TemplateEngine};
pub use tokens::{Token, TokenBag, TokenValue};
pub use validator::{Required, Validator};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
