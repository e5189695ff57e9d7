//! Rule chain producing validation messages
//!
//! Every rule runs in call order; a failed rule appends a validation-error
//! message and the chain keeps going, so callers see all violations at once.
//!
//! ```
//! use faultline_core::{RenderContext, Validator};
//!
//! let ctx = RenderContext::with_builtin_catalog("en-US");
//! let name: Option<String> = None;
//!
//! let mut validator = Validator::new(&ctx);
//! validator
//!     .validate_property_is_required("Name", &name)
//!     .validate_string_length("Name", name.as_deref(), 3, 5);
//!
//! assert!(validator.has_errors());
//! assert_eq!(validator.messages().len(), 2);
//! ```

use crate::fault::Fault;
use crate::message::{Message, RenderContext};
use crate::resources::keys;
use crate::tokens::TokenBag;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

/// Values that can be checked for presence
///
/// `None`, blank strings and empty collections are absent; scalars are
/// always present.
pub trait Required {
    fn is_present(&self) -> bool;
}

impl<T: Required> Required for Option<T> {
    fn is_present(&self) -> bool {
        self.as_ref().is_some_and(Required::is_present)
    }
}

impl<T: Required + ?Sized> Required for &T {
    fn is_present(&self) -> bool {
        (**self).is_present()
    }
}

impl<T: Required + ?Sized> Required for Box<T> {
    fn is_present(&self) -> bool {
        (**self).is_present()
    }
}

impl Required for str {
    fn is_present(&self) -> bool {
        !self.trim().is_empty()
    }
}

impl Required for String {
    fn is_present(&self) -> bool {
        self.as_str().is_present()
    }
}

impl<T> Required for [T] {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl<T> Required for Vec<T> {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl<T> Required for VecDeque<T> {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl<K, V, S> Required for HashMap<K, V, S> {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl<T, S> Required for HashSet<T, S> {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl<K, V> Required for BTreeMap<K, V> {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl<T> Required for BTreeSet<T> {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl Required for serde_json::Value {
    fn is_present(&self) -> bool {
        match self {
            serde_json::Value::Null => false,
            serde_json::Value::String(value) => value.is_present(),
            serde_json::Value::Array(values) => !values.is_empty(),
            serde_json::Value::Object(map) => !map.is_empty(),
            serde_json::Value::Bool(_) | serde_json::Value::Number(_) => true,
        }
    }
}

macro_rules! impl_required_scalar {
    ($($ty:ty),*) => {
        $(
            impl Required for $ty {
                fn is_present(&self) -> bool {
                    true
                }
            }
        )*
    };
}

impl_required_scalar!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64
);

/// Ordered, non-short-circuiting validation rule chain
pub struct Validator<'c> {
    ctx: &'c RenderContext,
    messages: Vec<Message>,
    rules_evaluated: usize,
    has_errors: bool,
}

impl<'c> Validator<'c> {
    pub fn new(ctx: &'c RenderContext) -> Self {
        Self {
            ctx,
            messages: Vec::new(),
            rules_evaluated: 0,
            has_errors: false,
        }
    }

    /// Fails when `value` is absent
    pub fn validate_property_is_required<V>(&mut self, property: &str, value: &V) -> &mut Self
    where
        V: Required + ?Sized,
    {
        self.validate(
            keys::PROPERTY_REQUIRED,
            Some(TokenBag::new().with("property", property)),
            value.is_present(),
        )
    }

    /// Fails when the character count of `value` is outside `min..=max`
    ///
    /// An absent value has length zero.
    pub fn validate_string_length(
        &mut self,
        property: &str,
        value: Option<&str>,
        min: usize,
        max: usize,
    ) -> &mut Self {
        let length = value.map_or(0, |value| value.chars().count());
        let tokens = TokenBag::new()
            .with("property", property)
            .with("min", min)
            .with("max", max)
            .with("length", length);

        self.validate(
            keys::STRING_LENGTH,
            Some(tokens),
            min <= length && length <= max,
        )
    }

    /// Fails when the collection is absent or empty
    pub fn validate_collection_has_values<T>(
        &mut self,
        property: &str,
        values: Option<&[T]>,
    ) -> &mut Self {
        self.validate(
            keys::COLLECTION_HAS_VALUES,
            Some(TokenBag::new().with("property", property)),
            values.is_some_and(|values| !values.is_empty()),
        )
    }

    /// Generic rule: records `key` as a validation error unless the condition holds
    pub fn validate(
        &mut self,
        key: &str,
        tokens: Option<TokenBag>,
        condition_is_satisfied: bool,
    ) -> &mut Self {
        self.rules_evaluated += 1;

        if !condition_is_satisfied {
            tracing::debug!(key = %key, rule = self.rules_evaluated, "Validation rule failed");
            let message = self.ctx.validation_error(key, None, tokens);
            self.push(message);
        }

        self
    }

    /// Append an arbitrary message to the chain
    pub fn with_message(&mut self, message: Message) -> &mut Self {
        self.push(message);
        self
    }

    fn push(&mut self, message: Message) {
        self.has_errors |= message.is_failure();
        self.messages.push(message);
    }

    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn rules_evaluated(&self) -> usize {
        self.rules_evaluated
    }

    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }

    /// `Err` with a validation fault when any rule failed
    pub fn finish(self) -> Result<(), Fault> {
        if !self.has_errors {
            return Ok(());
        }
        let ctx = self.ctx;
        Err(Fault::validation(ctx, self.into_messages()))
    }
}

impl std::fmt::Debug for Validator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator")
            .field("rules_evaluated", &self.rules_evaluated)
            .field("has_errors", &self.has_errors)
            .field("messages", &self.messages)
            .finish()
    }
}
