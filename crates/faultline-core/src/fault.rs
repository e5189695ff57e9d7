//! Client-caused failures
//!
//! A [`Fault`] is returned as `Err(Fault)` from business logic and travels
//! unchanged to the transport boundary, where [`FaultKind`] selects the
//! status and the messages become the response body.
//!
//! ```
//! use faultline_core::{Fault, FaultKind, RenderContext};
//!
//! struct User;
//!
//! fn load_user(ctx: &RenderContext, id: u64) -> Result<(), Fault> {
//!     Err(Fault::not_found::<User>(ctx, id))
//! }
//!
//! let ctx = RenderContext::with_builtin_catalog("en-US");
//! let fault = load_user(&ctx, 42).unwrap_err();
//! assert_eq!(fault.kind(), FaultKind::NotFound);
//! assert_eq!(fault.status_code(), 404);
//! assert_eq!(fault.to_string(), "The User with identifier '42' could not be found.");
//! ```
//!
//! Copyright (c) 2025 Faultline Team
//! Licensed under the Apache-2.0 license

use crate::message::{Message, MessageKind, RenderContext};
use crate::resources::keys;
use crate::tokens::TokenBag;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Variant of a [`Fault`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FaultKind {
    Generic,
    Forbidden,
    NotAuthenticated,
    NotFound,
    Validation,
}

impl FaultKind {
    /// HTTP status suggested for this kind
    pub fn status_code(self) -> u16 {
        match self {
            FaultKind::Generic | FaultKind::Validation => 400,
            FaultKind::NotAuthenticated => 401,
            FaultKind::Forbidden => 403,
            FaultKind::NotFound => 404,
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FaultKind::Generic => "generic",
            FaultKind::Forbidden => "forbidden",
            FaultKind::NotAuthenticated => "not-authenticated",
            FaultKind::NotFound => "not-found",
            FaultKind::Validation => "validation",
        };
        f.write_str(name)
    }
}

/// A client-caused failure carrying localized messages
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{primary_text}")]
pub struct Fault {
    kind: FaultKind,
    messages: Vec<Message>,
    primary_text: String,
}

impl Fault {
    fn from_primary(kind: FaultKind, primary: Message) -> Self {
        let fault = Self {
            kind,
            primary_text: primary.content().to_string(),
            messages: vec![primary],
        };
        tracing::debug!(kind = %fault.kind, text = %fault.primary_text, "Fault raised");
        fault
    }

    /// Generic fault holding one error message rendered from `key`
    pub fn generic(ctx: &RenderContext, key: &str, tokens: Option<TokenBag>) -> Self {
        Self::from_primary(FaultKind::Generic, ctx.error(key, None, tokens))
    }

    /// Generic fault from a list of messages; the first one is the summary
    pub fn from_messages(messages: Vec<Message>) -> Self {
        let primary_text = messages
            .first()
            .map(|message| message.content().to_string())
            .unwrap_or_default();
        tracing::debug!(count = messages.len(), text = %primary_text, "Fault raised");
        Self {
            kind: FaultKind::Generic,
            messages,
            primary_text,
        }
    }

    /// Generic fault with summary text only and no detail messages
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            kind: FaultKind::Generic,
            messages: Vec::new(),
            primary_text: text.into(),
        }
    }

    /// Caller is not authenticated
    pub fn not_authenticated(ctx: &RenderContext) -> Self {
        Self::from_primary(FaultKind::NotAuthenticated, ctx.unauthorized())
    }

    /// Caller lacks permission
    pub fn forbidden(ctx: &RenderContext) -> Self {
        Self::from_primary(FaultKind::Forbidden, ctx.forbidden())
    }

    /// Entity of type `T` with `identity` does not exist
    pub fn not_found<T: ?Sized>(ctx: &RenderContext, identity: impl fmt::Display) -> Self {
        Self::from_primary(FaultKind::NotFound, ctx.not_found::<T>(identity))
    }

    /// Entity called `label` with `identity` does not exist
    pub fn not_found_labeled(
        ctx: &RenderContext,
        label: &str,
        identity: impl fmt::Display,
    ) -> Self {
        Self::from_primary(FaultKind::NotFound, ctx.not_found_labeled(label, identity))
    }

    /// Validation fault over the messages of a completed validator
    pub fn validation(ctx: &RenderContext, messages: Vec<Message>) -> Self {
        let summary = ctx.error(keys::VALIDATION_FAILED, None, None);
        tracing::debug!(count = messages.len(), "Validation fault raised");
        Self {
            kind: FaultKind::Validation,
            messages,
            primary_text: summary.content().to_string(),
        }
    }

    pub fn with_info(mut self, ctx: &RenderContext, key: &str, tokens: Option<TokenBag>) -> Self {
        self.messages.push(ctx.info(key, None, tokens));
        self
    }

    pub fn with_warning(
        mut self,
        ctx: &RenderContext,
        key: &str,
        tokens: Option<TokenBag>,
    ) -> Self {
        self.messages.push(ctx.warning(key, None, tokens));
        self
    }

    pub fn with_validation_error(
        mut self,
        ctx: &RenderContext,
        key: &str,
        tokens: Option<TokenBag>,
    ) -> Self {
        self.messages.push(ctx.validation_error(key, None, tokens));
        self
    }

    /// Append an error detail
    ///
    /// The appended message has the validation-error kind, the same as
    /// [`with_validation_error`](Fault::with_validation_error). Existing
    /// consumers match on that kind.
    pub fn with_error(self, ctx: &RenderContext, key: &str, tokens: Option<TokenBag>) -> Self {
        self.with_validation_error(ctx, key, tokens)
    }

    /// Append an already rendered message
    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn kind(&self) -> FaultKind {
        self.kind
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Summary text, also the `Display` output
    pub fn primary_text(&self) -> &str {
        &self.primary_text
    }

    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    /// Whether any message has the given kind
    pub fn has_message_kind(&self, kind: MessageKind) -> bool {
        self.messages.iter().any(|message| message.kind() == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens;

    fn ctx() -> RenderContext {
        RenderContext::with_builtin_catalog("en-US")
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(FaultKind::Generic.status_code(), 400);
        assert_eq!(FaultKind::Validation.status_code(), 400);
        assert_eq!(FaultKind::NotAuthenticated.status_code(), 401);
        assert_eq!(FaultKind::Forbidden.status_code(), 403);
        assert_eq!(FaultKind::NotFound.status_code(), 404);
    }

    #[test]
    fn test_not_found_labeled() {
        let ctx = ctx();
        let fault = Fault::not_found_labeled(&ctx, "User", "42");
        assert_eq!(fault.kind(), FaultKind::NotFound);
        assert_eq!(
            fault.primary_text(),
            "The User with identifier '42' could not be found."
        );
        assert_eq!(fault.messages().len(), 1);
        assert_eq!(fault.messages()[0].kind(), MessageKind::NotFound);
    }

    #[test]
    fn test_not_found_for_string_entity() {
        let ctx = ctx();
        let fault = Fault::not_found::<String>(&ctx, "1000");
        assert_eq!(
            fault.to_string(),
            "The String with identifier '1000' could not be found."
        );
    }

    #[test]
    fn test_generic_from_key() {
        let ctx = ctx();
        let fault = Fault::generic(&ctx, "error", None);
        assert_eq!(fault.kind(), FaultKind::Generic);
        assert_eq!(fault.status_code(), 400);
        assert_eq!(fault.messages()[0].kind(), MessageKind::Error);
        assert_eq!(fault.to_string(), "Something went wrong.");
    }

    #[test]
    fn test_from_messages_uses_first_as_summary() {
        let ctx = ctx();
        let fault = Fault::from_messages(vec![
            ctx.info("info", None, Some(tokens! { "type" => "context" })),
            ctx.warning("warning", None, None),
            ctx.error("error", None, None),
        ]);
        assert_eq!(fault.primary_text(), "Here is some information: context.");
        assert_eq!(fault.messages().len(), 3);
    }

    #[test]
    fn test_from_text_has_no_details() {
        let fault = Fault::from_text("Payment declined");
        assert!(fault.messages().is_empty());
        assert_eq!(fault.to_string(), "Payment declined");
    }

    #[test]
    fn test_extensions_keep_kind_and_summary() {
        let ctx = ctx();
        let fault = Fault::forbidden(&ctx)
            .with_info(&ctx, "info", Some(tokens! { "type" => "audit" }))
            .with_warning(&ctx, "warning", None);

        assert_eq!(fault.kind(), FaultKind::Forbidden);
        assert_eq!(
            fault.primary_text(),
            "You do not have permission to perform this action."
        );
        assert_eq!(fault.messages().len(), 3);
    }

    #[test]
    fn test_with_error_appends_validation_error_kind() {
        let ctx = ctx();
        let fault = Fault::not_authenticated(&ctx).with_error(&ctx, "error", None);
        assert_eq!(fault.messages()[1].kind(), MessageKind::ValidationError);
        assert!(!fault.has_message_kind(MessageKind::Error));
    }

    #[test]
    fn test_validation_fault() {
        let ctx = ctx();
        let details = vec![ctx.validation_error("property-required", None, Some(tokens! { "property" => "Name" }))];
        let fault = Fault::validation(&ctx, details);
        assert_eq!(fault.kind(), FaultKind::Validation);
        assert_eq!(fault.to_string(), "One or more validation errors occurred.");
        assert_eq!(fault.messages()[0].content(), "Name is required.");
    }

    #[test]
    fn test_fault_is_std_error() {
        fn boxed(ctx: &RenderContext) -> Box<dyn std::error::Error + Send + Sync> {
            Box::new(Fault::forbidden(ctx))
        }
        let ctx = ctx();
        let err = boxed(&ctx);
        assert!(err.downcast_ref::<Fault>().is_some());
    }
}
