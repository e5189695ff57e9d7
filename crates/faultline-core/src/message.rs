//! Localized messages and the context that renders them
//!
//! A [`Message`] is immutable once built and can only be produced by a
//! [`RenderContext`], which pairs a [`ResourceStore`] with the locale cell of
//! one execution context (a request, a CLI invocation).
//!
//! ```
//! use faultline_core::{tokens, MessageKind, RenderContext};
//!
//! let ctx = RenderContext::with_builtin_catalog("en-US");
//! let message = ctx.not_found_labeled("User", "42");
//! assert_eq!(message.kind(), MessageKind::NotFound);
//! assert_eq!(message.content(), "The User with identifier '42' could not be found.");
//!
//! let required = ctx.validation_error("property-required", None, Some(tokens! { "property" => "Email" }));
//! assert_eq!(required.content(), "Email is required.");
//! ```
//!
//! Copyright (c) 2025 Faultline Team
//! Licensed under the Apache-2.0 license

use crate::locale::LocaleCell;
use crate::resources::{keys, ResourceCatalog, ResourceStore};
use crate::template::TemplateEngine;
use crate::tokens::TokenBag;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Category of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageKind {
    Information,
    Warning,
    Error,
    ValidationError,
    Unauthorized,
    Forbidden,
    NotFound,
}

impl MessageKind {
    /// Every kind, in declaration order
    pub const ALL: [MessageKind; 7] = [
        MessageKind::Information,
        MessageKind::Warning,
        MessageKind::Error,
        MessageKind::ValidationError,
        MessageKind::Unauthorized,
        MessageKind::Forbidden,
        MessageKind::NotFound,
    ];

    /// Whether this kind signals a failure rather than advice
    pub fn is_failure(self) -> bool {
        !matches!(self, MessageKind::Information | MessageKind::Warning)
    }

    /// Wire name of the kind
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::Information => "information",
            MessageKind::Warning => "warning",
            MessageKind::Error => "error",
            MessageKind::ValidationError => "validation-error",
            MessageKind::Unauthorized => "unauthorized",
            MessageKind::Forbidden => "forbidden",
            MessageKind::NotFound => "not-found",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MessageKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        MessageKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown message kind '{}'", s))
    }
}

/// A rendered, localized message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    #[serde(rename = "type")]
    kind: MessageKind,
    #[serde(skip)]
    locale: String,
    content: String,
}

impl Message {
    pub(crate) fn new(kind: MessageKind, locale: String, content: String) -> Self {
        Self {
            kind,
            locale,
            content,
        }
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    /// Locale the message was rendered under
    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_failure(&self) -> bool {
        self.kind.is_failure()
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.content)
    }
}

/// Renders messages for one execution context
///
/// Holds a shared resource store and the context's own locale cell. Build one
/// per request; the cell is not shareable across threads.
pub struct RenderContext {
    store: Arc<dyn ResourceStore>,
    locale: LocaleCell,
}

impl RenderContext {
    /// Create a context over `store` with `locale` as the ambient locale
    pub fn new(store: Arc<dyn ResourceStore>, locale: impl Into<String>) -> Self {
        Self {
            store,
            locale: LocaleCell::new(locale),
        }
    }

    /// Context over the built-in English catalog
    pub fn with_builtin_catalog(locale: impl Into<String>) -> Self {
        Self::new(Arc::new(ResourceCatalog::builtin()), locale)
    }

    /// Ambient locale of this context
    pub fn locale(&self) -> String {
        self.locale.current()
    }

    pub fn locale_cell(&self) -> &LocaleCell {
        &self.locale
    }

    pub fn store(&self) -> &Arc<dyn ResourceStore> {
        &self.store
    }

    /// Render the template stored under `key` into a message
    ///
    /// `locale` overrides the ambient locale for this render only. Unknown
    /// keys are used as the template text.
    pub fn message(
        &self,
        kind: MessageKind,
        key: &str,
        locale: Option<&str>,
        tokens: Option<TokenBag>,
    ) -> Message {
        let scope = self.locale.acquire(locale);

        let template = self.store.resolve(key, scope.locale()).unwrap_or_else(|| {
            tracing::warn!(key = %key, locale = %scope.locale(), "No message template found for key");
            key.to_string()
        });

        let content = TemplateEngine::render(&template, tokens.as_ref());
        Message::new(kind, scope.locale().to_string(), content)
    }

    pub fn info(&self, key: &str, locale: Option<&str>, tokens: Option<TokenBag>) -> Message {
        self.message(MessageKind::Information, key, locale, tokens)
    }

    pub fn warning(&self, key: &str, locale: Option<&str>, tokens: Option<TokenBag>) -> Message {
        self.message(MessageKind::Warning, key, locale, tokens)
    }

    pub fn validation_error(
        &self,
        key: &str,
        locale: Option<&str>,
        tokens: Option<TokenBag>,
    ) -> Message {
        self.message(MessageKind::ValidationError, key, locale, tokens)
    }

    pub fn error(&self, key: &str, locale: Option<&str>, tokens: Option<TokenBag>) -> Message {
        self.message(MessageKind::Error, key, locale, tokens)
    }

    /// Message for an unauthenticated caller
    pub fn unauthorized(&self) -> Message {
        self.unauthorized_with(keys::UNAUTHORIZED, None, None)
    }

    /// Unauthorized message from a custom template
    pub fn unauthorized_with(
        &self,
        key: &str,
        locale: Option<&str>,
        tokens: Option<TokenBag>,
    ) -> Message {
        self.message(MessageKind::Unauthorized, key, locale, tokens)
    }

    /// Message for a caller lacking permission
    pub fn forbidden(&self) -> Message {
        self.forbidden_with(keys::FORBIDDEN, None, None)
    }

    /// Forbidden message from a custom template
    pub fn forbidden_with(
        &self,
        key: &str,
        locale: Option<&str>,
        tokens: Option<TokenBag>,
    ) -> Message {
        self.message(MessageKind::Forbidden, key, locale, tokens)
    }

    /// Not-found message labelled with the name of `T`
    ///
    /// For container types the first generic argument names the entity, so
    /// `Vec<User>` reads as `User`.
    pub fn not_found<T: ?Sized>(&self, identity: impl fmt::Display) -> Message {
        self.not_found_labeled(&entity_label::<T>(), identity)
    }

    /// Not-found message with an explicit entity label
    pub fn not_found_labeled(&self, label: &str, identity: impl fmt::Display) -> Message {
        let tokens = TokenBag::new()
            .with("type", label)
            .with("id", identity.to_string());
        self.message(MessageKind::NotFound, keys::NOT_FOUND, None, Some(tokens))
    }
}

impl fmt::Debug for RenderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderContext")
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

/// Display label for an entity type
///
/// Uses the first generic argument when there is one, with the module path
/// stripped.
pub fn entity_label<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let subject = match full.split_once('<') {
        Some((_, args)) => args
            .split([',', '<', '>'])
            .next()
            .unwrap_or(args),
        None => full,
    };
    let subject = subject.trim().trim_start_matches('&').trim_start_matches("mut ");
    subject.rsplit("::").next().unwrap_or(subject).to_string()
}
