//! Token bags: the ordered values substituted into message templates
//!
//! Copyright (c) 2025 Faultline Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single value that can be substituted into a template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
    /// Plain text
    Text(String),
    /// Signed integer
    Integer(i64),
    /// Unsigned integer too large for `Integer`
    Unsigned(u64),
    /// Floating point number
    Float(f64),
    /// Boolean flag
    Bool(bool),
}

impl TokenValue {
    /// Parse a loosely typed value, as typed on a command line
    ///
    /// Integers, floats and booleans are recognized; anything else is text.
    pub fn parse_loose(raw: &str) -> Self {
        if let Ok(value) = raw.parse::<i64>() {
            return TokenValue::Integer(value);
        }
        if let Ok(value) = raw.parse::<u64>() {
            return TokenValue::Unsigned(value);
        }
        if let Ok(value) = raw.parse::<f64>() {
            if value.is_finite() {
                return TokenValue::Float(value);
            }
        }
        match raw {
            "true" => TokenValue::Bool(true),
            "false" => TokenValue::Bool(false),
            _ => TokenValue::Text(raw.to_string()),
        }
    }

    /// Numeric view of the value, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TokenValue::Integer(value) => Some(*value as f64),
            TokenValue::Unsigned(value) => Some(*value as f64),
            TokenValue::Float(value) => Some(*value),
            TokenValue::Text(_) | TokenValue::Bool(_) => None,
        }
    }

    /// Integer view of the value, if it is integral
    pub fn as_i128(&self) -> Option<i128> {
        match self {
            TokenValue::Integer(value) => Some(i128::from(*value)),
            TokenValue::Unsigned(value) => Some(i128::from(*value)),
            TokenValue::Float(_) | TokenValue::Text(_) | TokenValue::Bool(_) => None,
        }
    }
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Text(value) => write!(f, "{}", value),
            TokenValue::Integer(value) => write!(f, "{}", value),
            TokenValue::Unsigned(value) => write!(f, "{}", value),
            TokenValue::Float(value) => write!(f, "{}", value),
            TokenValue::Bool(value) => write!(f, "{}", value),
        }
    }
}

impl From<String> for TokenValue {
    fn from(value: String) -> Self {
        TokenValue::Text(value)
    }
}

impl From<&str> for TokenValue {
    fn from(value: &str) -> Self {
        TokenValue::Text(value.to_string())
    }
}

impl From<&String> for TokenValue {
    fn from(value: &String) -> Self {
        TokenValue::Text(value.clone())
    }
}

impl From<char> for TokenValue {
    fn from(value: char) -> Self {
        TokenValue::Text(value.to_string())
    }
}

impl From<bool> for TokenValue {
    fn from(value: bool) -> Self {
        TokenValue::Bool(value)
    }
}

impl From<f32> for TokenValue {
    fn from(value: f32) -> Self {
        TokenValue::Float(f64::from(value))
    }
}

impl From<f64> for TokenValue {
    fn from(value: f64) -> Self {
        TokenValue::Float(value)
    }
}

impl From<u64> for TokenValue {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(value) => TokenValue::Integer(value),
            Err(_) => TokenValue::Unsigned(value),
        }
    }
}

impl From<usize> for TokenValue {
    fn from(value: usize) -> Self {
        TokenValue::from(value as u64)
    }
}

macro_rules! impl_from_small_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for TokenValue {
                fn from(value: $ty) -> Self {
                    TokenValue::Integer(i64::from(value))
                }
            }
        )*
    };
}

impl_from_small_int!(i8, i16, i32, i64, u8, u16, u32);

impl<T: Into<TokenValue>> From<Option<T>> for TokenValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_else(|| TokenValue::Text(String::new()))
    }
}

/// One named entry in a [`TokenBag`]
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    name: String,
    value: TokenValue,
    format: Option<String>,
}

impl Token {
    /// Token name as supplied by the caller
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Token value
    pub fn value(&self) -> &TokenValue {
        &self.value
    }

    /// Default format specifier used when the placeholder supplies none
    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    /// Whether this token answers to a placeholder name
    pub fn matches(&self, placeholder: &str) -> bool {
        self.name.to_lowercase() == placeholder.to_lowercase()
    }
}

/// Ordered mapping from token name to value
///
/// Names match placeholders case-insensitively. Inserting a name that already
/// exists replaces the value but keeps the original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenBag {
    tokens: Vec<Token>,
}

impl TokenBag {
    /// Create an empty bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a token, consuming and returning the bag
    pub fn with(mut self, name: impl Into<String>, value: impl Into<TokenValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Add a token with a default format specifier
    pub fn with_formatted(
        mut self,
        name: impl Into<String>,
        value: impl Into<TokenValue>,
        format: impl Into<String>,
    ) -> Self {
        self.upsert(Token {
            name: name.into(),
            value: value.into(),
            format: Some(format.into()),
        });
        self
    }

    /// Add or replace a token
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<TokenValue>) {
        self.upsert(Token {
            name: name.into(),
            value: value.into(),
            format: None,
        });
    }

    fn upsert(&mut self, token: Token) {
        match self.tokens.iter_mut().find(|existing| existing.matches(&token.name)) {
            Some(existing) => {
                existing.value = token.value;
                existing.format = token.format;
            }
            None => self.tokens.push(token),
        }
    }

    /// Look up a token by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&TokenValue> {
        self.position(name).map(|index| &self.tokens[index].value)
    }

    /// Index of a token in bag order (case-insensitive)
    pub fn position(&self, name: &str) -> Option<usize> {
        self.tokens.iter().position(|token| token.matches(name))
    }

    /// Token at a bag position
    pub fn at(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Iterate tokens in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    /// Number of tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the bag has no tokens
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for TokenBag
where
    K: Into<String>,
    V: Into<TokenValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bag = TokenBag::new();
        for (name, value) in iter {
            bag.insert(name, value);
        }
        bag
    }
}

/// Build a [`TokenBag`] inline
///
/// ```
/// use faultline_core::tokens;
///
/// let bag = tokens! { "name" => "Ana", "count" => 7 };
/// assert_eq!(bag.len(), 2);
/// ```
#[macro_export]
macro_rules! tokens {
    () => {
        $crate::TokenBag::new()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {
        $crate::TokenBag::new()$(.with($name, $value))+
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_is_preserved() {
        let bag = TokenBag::new().with("b", 1).with("a", 2).with("c", 3);
        let names: Vec<_> = bag.iter().map(Token::name).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let bag = tokens! { "Name" => "Ana" };
        assert_eq!(bag.get("name"), Some(&TokenValue::Text("Ana".to_string())));
        assert_eq!(bag.get("NAME"), Some(&TokenValue::Text("Ana".to_string())));
        assert_eq!(bag.position("nAmE"), Some(0));
    }

    #[test]
    fn test_reinsert_replaces_in_place() {
        let mut bag = tokens! { "a" => 1, "b" => 2 };
        bag.insert("A", 10);
        assert_eq!(bag.len(), 2);
        assert_eq!(bag.at(0).map(Token::value), Some(&TokenValue::Integer(10)));
    }

    #[test]
    fn test_formatted_token_keeps_spec() {
        let bag = TokenBag::new().with_formatted("price", 3.5, "F2");
        assert_eq!(bag.at(0).and_then(Token::format), Some("F2"));
    }

    #[test]
    fn test_parse_loose() {
        assert_eq!(TokenValue::parse_loose("42"), TokenValue::Integer(42));
        assert_eq!(TokenValue::parse_loose("-3"), TokenValue::Integer(-3));
        assert_eq!(TokenValue::parse_loose("2.5"), TokenValue::Float(2.5));
        assert_eq!(TokenValue::parse_loose("true"), TokenValue::Bool(true));
        assert_eq!(
            TokenValue::parse_loose("jimbo"),
            TokenValue::Text("jimbo".to_string())
        );
        assert_eq!(
            TokenValue::parse_loose("18446744073709551615"),
            TokenValue::Unsigned(u64::MAX)
        );
    }

    #[test]
    fn test_conversions() {
        assert_eq!(TokenValue::from(7u8), TokenValue::Integer(7));
        assert_eq!(TokenValue::from(u64::MAX), TokenValue::Unsigned(u64::MAX));
        assert_eq!(TokenValue::from(None::<&str>), TokenValue::Text(String::new()));
        assert_eq!(TokenValue::from(Some("x")), TokenValue::Text("x".to_string()));
    }

    #[test]
    fn test_collect_into_bag() {
        let bag: TokenBag = vec![("type", "User"), ("id", "42")].into_iter().collect();
        assert_eq!(bag.len(), 2);
        assert_eq!(bag.get("id").map(ToString::to_string), Some("42".to_string()));
    }

    #[test]
    fn test_empty_macro() {
        let bag: TokenBag = tokens! {};
        assert!(bag.is_empty());
    }
}
