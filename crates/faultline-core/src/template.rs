//! Named-token template engine
//!
//! Templates carry placeholders such as `{Name}` or `{Count:D3}`; doubled
//! braces (`{{`, `}}`) are literal braces. Rendering happens in four passes:
//!
//! 1. placeholder names are normalized by lower-casing their first character,
//! 2. every placeholder naming a bag key is rewritten to its positional form
//!    `{N[:spec]}`, where `N` is the key's index in bag order,
//! 3. any placeholder left unresolved marks the render as degraded: the
//!    caller's template is returned untouched and the gap is logged,
//! 4. positional placeholders are substituted, applying their format spec.
//!
//! A missing bag (`None`) skips every pass and returns the template as is.
//!
//! Copyright (c) 2025 Faultline Team
//! Licensed under the Apache-2.0 license

use crate::tokens::{TokenBag, TokenValue};
use regex::Regex;
use std::sync::OnceLock;

/// One parsed piece of a template
#[derive(Debug, Clone, PartialEq)]
enum Segment {
    /// Literal text: `text` has braces unescaped, `raw` is as written
    Literal { text: String, raw: String },
    /// A brace-delimited placeholder
    Placeholder(Placeholder),
}

/// A `{name[:spec]}` placeholder
#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    name: String,
    format: Option<String>,
    raw: String,
}

impl Placeholder {
    /// Placeholder name, trimmed
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Format specifier following the colon, verbatim
    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    /// The placeholder exactly as written, braces included
    pub fn raw(&self) -> String {
        format!("{{{}}}", self.raw)
    }

    /// Positional index when the placeholder is already numeric
    fn position(&self) -> Option<usize> {
        self.name.parse::<usize>().ok()
    }

    /// Whether the placeholder names a token (starts with a letter)
    fn is_named(&self) -> bool {
        self.name.chars().next().is_some_and(char::is_alphabetic)
    }
}

/// Result of rendering a template
#[derive(Debug, Clone, PartialEq)]
pub struct Rendering {
    /// Rendered text, or the original template when degraded
    pub text: String,
    /// Placeholders the token bag could not resolve
    pub missing: Vec<String>,
}

impl Rendering {
    /// Whether the render fell back to the original template
    pub fn is_degraded(&self) -> bool {
        !self.missing.is_empty()
    }
}

/// A parsed template
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parse a template string
    pub fn parse(source: &str) -> Self {
        Self {
            source: source.to_string(),
            segments: scan(source),
        }
    }

    /// The template as supplied
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Placeholders in template order
    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(placeholder) => Some(placeholder),
            Segment::Literal { .. } => None,
        })
    }

    /// Copy of this template with every placeholder name lower-camel-cased
    pub fn normalized(&self) -> Self {
        let segments = self
            .segments
            .iter()
            .map(|segment| match segment {
                Segment::Placeholder(placeholder) => Segment::Placeholder(Placeholder {
                    name: lower_first(&placeholder.name),
                    format: placeholder.format.clone(),
                    raw: lower_first(placeholder.raw.trim_start()),
                }),
                Segment::Literal { .. } => segment.clone(),
            })
            .collect::<Vec<_>>();

        Self {
            source: write_segments(&segments),
            segments,
        }
    }

    /// Rewrite named placeholders into positional ones for `tokens`
    ///
    /// Placeholders without a matching key are left in their named form.
    pub fn to_positional(&self, tokens: &TokenBag) -> String {
        let segments = self
            .segments
            .iter()
            .map(|segment| match segment {
                Segment::Placeholder(placeholder) if placeholder.is_named() => {
                    match tokens.position(&placeholder.name) {
                        Some(index) => Segment::Placeholder(positional(index, placeholder)),
                        None => segment.clone(),
                    }
                }
                _ => segment.clone(),
            })
            .collect::<Vec<_>>();

        write_segments(&segments)
    }

    /// Render against an optional token bag
    pub fn render(&self, tokens: Option<&TokenBag>) -> Rendering {
        let Some(tokens) = tokens else {
            return Rendering {
                text: self.source.clone(),
                missing: Vec::new(),
            };
        };

        let normalized = self.normalized();
        let mut resolved = Vec::with_capacity(normalized.segments.len());
        let mut missing = Vec::new();

        for segment in &normalized.segments {
            match segment {
                Segment::Literal { text, .. } => resolved.push(Resolved::Text(text.as_str())),
                Segment::Placeholder(placeholder) => {
                    let index = if placeholder.is_named() {
                        tokens.position(&placeholder.name)
                    } else {
                        placeholder.position().filter(|index| *index < tokens.len())
                    };

                    match index {
                        Some(index) => resolved.push(Resolved::Token(index, placeholder)),
                        None if placeholder.is_named() || placeholder.position().is_some() => {
                            missing.push(placeholder.raw())
                        }
                        None => resolved.push(Resolved::Verbatim(placeholder)),
                    }
                }
            }
        }

        if !missing.is_empty() {
            tracing::warn!(
                template = %self.source,
                missing = %missing.join(", "),
                "The message template references tokens that have not been supplied"
            );
            return Rendering {
                text: self.source.clone(),
                missing,
            };
        }

        let mut text = String::with_capacity(self.source.len());
        for piece in resolved {
            match piece {
                Resolved::Text(literal) => text.push_str(literal),
                Resolved::Verbatim(placeholder) => text.push_str(&placeholder.raw()),
                Resolved::Token(index, placeholder) => {
                    if let Some(token) = tokens.at(index) {
                        let spec = placeholder.format().or(token.format());
                        text.push_str(&format_value(token.value(), spec));
                    }
                }
            }
        }

        tracing::trace!(template = %self.source, rendered = %text, "Template rendered");

        Rendering {
            text,
            missing: Vec::new(),
        }
    }
}

/// A placeholder after coverage checking
enum Resolved<'a> {
    Text(&'a str),
    Token(usize, &'a Placeholder),
    Verbatim(&'a Placeholder),
}

/// Entry points of the template engine
pub struct TemplateEngine;

impl TemplateEngine {
    /// Render a template, returning only the text
    pub fn render(template: &str, tokens: Option<&TokenBag>) -> String {
        Self::render_detailed(template, tokens).text
    }

    /// Render a template and report unresolved placeholders
    pub fn render_detailed(template: &str, tokens: Option<&TokenBag>) -> Rendering {
        match tokens {
            None => Rendering {
                text: template.to_string(),
                missing: Vec::new(),
            },
            Some(_) => Template::parse(template).render(tokens),
        }
    }
}

/// Lower-case the first character of every placeholder name
///
/// Doubled braces are left as they are.
pub fn normalize_tokens(template: &str) -> String {
    Template::parse(template).normalized().source
}

fn lower_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn positional(index: usize, placeholder: &Placeholder) -> Placeholder {
    let raw = match &placeholder.format {
        Some(format) => format!("{}:{}", index, format),
        None => index.to_string(),
    };
    Placeholder {
        name: index.to_string(),
        format: placeholder.format.clone(),
        raw,
    }
}

/// Split a template into literals and placeholders
fn scan(source: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut text = String::new();
    let mut raw = String::new();
    let mut rest = source;

    while let Some(ch) = rest.chars().next() {
        match ch {
            '{' | '}' if rest[1..].starts_with(ch) => {
                text.push(ch);
                raw.push_str(&rest[..2]);
                rest = &rest[2..];
            }
            '{' => {
                let body = &rest[1..];
                match body.find(['{', '}']) {
                    Some(end) if body[end..].starts_with('}') && !body[..end].trim().is_empty() => {
                        if !raw.is_empty() {
                            segments.push(Segment::Literal {
                                text: std::mem::take(&mut text),
                                raw: std::mem::take(&mut raw),
                            });
                        }
                        segments.push(Segment::Placeholder(placeholder(&body[..end])));
                        rest = &body[end + 1..];
                    }
                    _ => {
                        text.push('{');
                        raw.push('{');
                        rest = body;
                    }
                }
            }
            _ => {
                text.push(ch);
                raw.push(ch);
                rest = &rest[ch.len_utf8()..];
            }
        }
    }

    if !raw.is_empty() {
        segments.push(Segment::Literal { text, raw });
    }

    segments
}

fn placeholder(raw: &str) -> Placeholder {
    let (name, format) = match raw.split_once(':') {
        Some((name, format)) => (name, Some(format.to_string())),
        None => (raw, None),
    };
    Placeholder {
        name: name.trim().to_string(),
        format,
        raw: raw.to_string(),
    }
}

/// Write segments back out in template syntax
fn write_segments(segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Literal { raw, .. } => out.push_str(raw),
            Segment::Placeholder(placeholder) => out.push_str(&placeholder.raw()),
        }
    }
    out
}

fn format_spec_regex() -> Option<&'static Regex> {
    static FORMAT_SPEC: OnceLock<Option<Regex>> = OnceLock::new();
    FORMAT_SPEC
        .get_or_init(|| Regex::new(r"^\s*([A-Za-z])(\d{1,2})?\s*$").ok())
        .as_ref()
}

/// Apply a format specifier to a token value
///
/// Supports `D`, `F`, `N`, `X`/`x`, `P` and `G` with an optional precision.
/// Anything else renders the plain value.
pub fn format_value(value: &TokenValue, spec: Option<&str>) -> String {
    let Some(captures) = spec
        .zip(format_spec_regex())
        .and_then(|(spec, pattern)| pattern.captures(spec))
    else {
        return value.to_string();
    };

    let letter = captures
        .get(1)
        .and_then(|m| m.as_str().chars().next())
        .unwrap_or('G');
    let precision = captures
        .get(2)
        .and_then(|m| m.as_str().parse::<usize>().ok());

    match letter {
        'D' | 'd' => match value.as_i128() {
            Some(number) => {
                let digits = number.unsigned_abs().to_string();
                let width = precision.unwrap_or(0);
                let sign = if number < 0 { "-" } else { "" };
                format!("{}{:0>width$}", sign, digits, width = width)
            }
            None => value.to_string(),
        },
        'F' | 'f' => match value.as_f64() {
            Some(number) => format!("{:.*}", precision.unwrap_or(2), number),
            None => value.to_string(),
        },
        'N' | 'n' => match value.as_f64() {
            Some(number) => group_thousands(&format!("{:.*}", precision.unwrap_or(2), number)),
            None => value.to_string(),
        },
        'P' | 'p' => match value.as_f64() {
            Some(number) => format!("{:.*} %", precision.unwrap_or(2), number * 100.0),
            None => value.to_string(),
        },
        'X' | 'x' => {
            let hex = match value {
                TokenValue::Integer(number) => format!("{:X}", number),
                TokenValue::Unsigned(number) => format!("{:X}", number),
                _ => return value.to_string(),
            };
            let hex = if letter == 'x' { hex.to_lowercase() } else { hex };
            format!("{:0>width$}", hex, width = precision.unwrap_or(0))
        }
        _ => value.to_string(),
    }
}

/// Insert `,` separators into the integral part of a formatted number
fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (integral, fraction) = match unsigned.split_once('.') {
        Some((integral, fraction)) => (integral, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integral.len() + integral.len() / 3);
    for (i, digit) in integral.chars().enumerate() {
        if i > 0 && (integral.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(fraction) => format!("{}{}.{}", sign, grouped, fraction),
        None => format!("{}{}", sign, grouped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens;

    #[test]
    fn test_scenario_full_bag() {
        let bag = tokens! { "name" => "Ana", "count" => 7 };
        assert_eq!(
            TemplateEngine::render("Hello {Name}, you have {Count:D} items", Some(&bag)),
            "Hello Ana, you have 7 items"
        );
    }

    #[test]
    fn test_scenario_missing_token_returns_original() {
        let bag = tokens! { "name" => "Ana" };
        let template = "Hello {Name}, you have {Count:D} items";
        let rendering = TemplateEngine::render_detailed(template, Some(&bag));
        assert_eq!(rendering.text, template);
        assert!(rendering.is_degraded());
        assert_eq!(rendering.missing, vec!["{count:D}".to_string()]);
    }

    #[test]
    fn test_no_bag_returns_template_unchanged() {
        let template = "Hello {Name} and {{literal}}";
        assert_eq!(TemplateEngine::render(template, None), template);
    }

    #[test]
    fn test_doubled_braces_are_literal() {
        let bag = tokens! { "name" => "Ana" };
        assert_eq!(
            TemplateEngine::render("{{Name}} is {Name}", Some(&bag)),
            "{Name} is Ana"
        );

        let empty = TokenBag::new();
        let rendering = TemplateEngine::render_detailed("use {{braces}} freely", Some(&empty));
        assert!(!rendering.is_degraded());
        assert_eq!(rendering.text, "use {braces} freely");
    }

    #[test]
    fn test_repeated_placeholder_resolves_each_time() {
        let bag = tokens! { "who" => "Bo" };
        assert_eq!(
            TemplateEngine::render("{Who}, {who}, {WHO}", Some(&bag)),
            "Bo, Bo, Bo"
        );
    }

    #[test]
    fn test_whitespace_inside_braces() {
        let bag = tokens! { "name" => "Ana" };
        assert_eq!(TemplateEngine::render("Hi { Name }!", Some(&bag)), "Hi Ana!");
    }

    #[test]
    fn test_to_positional_uses_bag_order() {
        let bag = tokens! { "count" => 7, "name" => "Ana" };
        let template = Template::parse("Hello {Name}, you have {Count:D} items");
        assert_eq!(
            template.to_positional(&bag),
            "Hello {1}, you have {0:D} items"
        );
    }

    #[test]
    fn test_to_positional_keeps_unknown_and_escapes() {
        let bag = tokens! { "name" => "Ana" };
        let template = Template::parse("{{x}} {Name} {Other}");
        assert_eq!(template.to_positional(&bag), "{{x}} {0} {Other}");
    }

    #[test]
    fn test_numeric_placeholders_address_bag_order() {
        let bag = tokens! { "a" => "first", "b" => "second" };
        assert_eq!(TemplateEngine::render("{1} then {0}", Some(&bag)), "second then first");

        let rendering = TemplateEngine::render_detailed("{5}", Some(&bag));
        assert!(rendering.is_degraded());
        assert_eq!(rendering.text, "{5}");
    }

    #[test]
    fn test_normalize_tokens() {
        assert_eq!(
            normalize_tokens("The {FirstName} of {{Literal}} is {Count:N2}"),
            "The {firstName} of {{Literal}} is {count:N2}"
        );
    }

    #[test]
    fn test_lone_braces_are_literal() {
        let bag = TokenBag::new();
        assert_eq!(TemplateEngine::render("a { b", Some(&bag)), "a { b");
        assert_eq!(TemplateEngine::render("a } b", Some(&bag)), "a } b");
        assert_eq!(TemplateEngine::render("empty {} here", Some(&bag)), "empty {} here");
    }

    #[test]
    fn test_non_alpha_placeholder_is_verbatim() {
        let bag = TokenBag::new();
        assert_eq!(TemplateEngine::render("odd {-x} token", Some(&bag)), "odd {-x} token");
    }

    #[test]
    fn test_placeholder_spec_overrides_bag_spec() {
        let bag = TokenBag::new().with_formatted("price", 3.14159, "F3");
        assert_eq!(TemplateEngine::render("{Price}", Some(&bag)), "3.142");
        assert_eq!(TemplateEngine::render("{Price:F1}", Some(&bag)), "3.1");
    }

    #[test]
    fn test_format_specs() {
        assert_eq!(format_value(&TokenValue::Integer(7), Some("D3")), "007");
        assert_eq!(format_value(&TokenValue::Integer(-7), Some("D3")), "-007");
        assert_eq!(format_value(&TokenValue::Float(2.5), Some("F")), "2.50");
        assert_eq!(format_value(&TokenValue::Integer(1234567), Some("N0")), "1,234,567");
        assert_eq!(format_value(&TokenValue::Float(-1234.5), Some("N1")), "-1,234.5");
        assert_eq!(format_value(&TokenValue::Integer(255), Some("X4")), "00FF");
        assert_eq!(format_value(&TokenValue::Integer(255), Some("x")), "ff");
        assert_eq!(format_value(&TokenValue::Float(0.125), Some("P1")), "12.5 %");
        assert_eq!(format_value(&TokenValue::Integer(5), Some("G")), "5");
    }

    #[test]
    fn test_numeric_spec_on_text_is_plain() {
        let value = TokenValue::Text("abc".to_string());
        assert_eq!(format_value(&value, Some("D2")), "abc");
        assert_eq!(format_value(&value, Some("yyyy-MM-dd")), "abc");
    }

    #[test]
    fn test_unicode_literals_survive() {
        let bag = tokens! { "nom" => "Zoë" };
        assert_eq!(
            TemplateEngine::render("Bonjour {Nom}, ça va?", Some(&bag)),
            "Bonjour Zoë, ça va?"
        );
    }
}
