//! Success results carrying an optional payload and advisory messages
//!
//! Copyright (c) 2025 Faultline Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::message::{Message, RenderContext};
use crate::tokens::TokenBag;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// A successful operation result
///
/// Either carries a value (`has_content`) or nothing, plus any messages
/// accumulated while it was built. Construct with [`Outcome::empty`] or
/// [`Outcome::of`].
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    has_content: bool,
    value: Option<T>,
    messages: Vec<Message>,
}

impl<T> Outcome<T> {
    /// Start building an outcome without a value
    pub fn empty(ctx: &RenderContext) -> OutcomeBuilder<'_, T> {
        OutcomeBuilder {
            ctx,
            outcome: Outcome {
                has_content: false,
                value: None,
                messages: Vec::new(),
            },
        }
    }

    /// Start building an outcome carrying `value`
    pub fn of(ctx: &RenderContext, value: T) -> OutcomeBuilder<'_, T> {
        OutcomeBuilder {
            ctx,
            outcome: Outcome {
                has_content: true,
                value: Some(value),
                messages: Vec::new(),
            },
        }
    }

    /// Assemble an outcome from a content flag and value, checking they agree
    pub fn from_parts(has_content: bool, value: Option<T>) -> Result<Self> {
        match (has_content, value.is_some()) {
            (false, true) => Err(Error::ContentMismatch {
                message: "a value cannot be set when the outcome has no content".to_string(),
            }),
            (true, false) => Err(Error::ContentMismatch {
                message: "an outcome with content requires a value".to_string(),
            }),
            _ => Ok(Self {
                has_content,
                value,
                messages: Vec::new(),
            }),
        }
    }

    pub fn has_content(&self) -> bool {
        self.has_content
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn into_value(self) -> Option<T> {
        self.value
    }

    /// Messages in the order they were added
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn has_messages(&self) -> bool {
        !self.messages.is_empty()
    }

    /// Whether any message is failure-signaling
    pub fn has_failures(&self) -> bool {
        self.messages.iter().any(Message::is_failure)
    }
}

impl<T: Serialize> Serialize for Outcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(value) = &self.value {
            map.serialize_entry("data", value)?;
        }
        if !self.messages.is_empty() {
            map.serialize_entry("messages", &self.messages)?;
        }
        map.end()
    }
}

/// Fluent builder for [`Outcome`]
///
/// Renders messages through the context it was created with. Finish with
/// [`build`](OutcomeBuilder::build) or `.into()`.
#[must_use = "call build() to obtain the outcome"]
pub struct OutcomeBuilder<'c, T> {
    ctx: &'c RenderContext,
    outcome: Outcome<T>,
}

impl<T> OutcomeBuilder<'_, T> {
    pub fn with_info(self, key: &str, tokens: Option<TokenBag>) -> Self {
        let message = self.ctx.info(key, None, tokens);
        self.with_message(message)
    }

    pub fn with_warning(self, key: &str, tokens: Option<TokenBag>) -> Self {
        let message = self.ctx.warning(key, None, tokens);
        self.with_message(message)
    }

    pub fn with_validation_error(self, key: &str, tokens: Option<TokenBag>) -> Self {
        let message = self.ctx.validation_error(key, None, tokens);
        self.with_message(message)
    }

    /// Append an already rendered message
    pub fn with_message(mut self, message: Message) -> Self {
        self.outcome.messages.push(message);
        self
    }

    /// Append copies of `messages`, keeping their order
    pub fn with_messages(mut self, messages: &[Message]) -> Self {
        self.outcome.messages.extend_from_slice(messages);
        self
    }

    pub fn build(self) -> Outcome<T> {
        self.outcome
    }
}

impl<T> From<OutcomeBuilder<'_, T>> for Outcome<T> {
    fn from(builder: OutcomeBuilder<'_, T>) -> Self {
        builder.build()
    }
}
