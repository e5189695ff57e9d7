//! Shared utilities for command handlers

use crate::config::Config;
use crate::error::{Error, Result};
use faultline_core::{negotiate_locale, RenderContext, TokenBag, TokenValue};
use std::sync::Arc;

/// Parse repeated `NAME=VALUE` arguments into a token bag
///
/// No arguments means no bag at all, so templates render untouched.
pub fn parse_tokens(raw: &[String]) -> Result<Option<TokenBag>> {
    if raw.is_empty() {
        return Ok(None);
    }

    let mut bag = TokenBag::new();
    for entry in raw {
        let (name, value) = entry
            .split_once('=')
            .filter(|(name, _)| !name.trim().is_empty())
            .ok_or_else(|| Error::InvalidToken { raw: entry.clone() })?;
        bag.insert(name.trim(), TokenValue::parse_loose(value));
    }

    Ok(Some(bag))
}

/// Locale for this invocation
///
/// Explicit `--lng` / `--accept-language` go through request negotiation;
/// otherwise the configured default applies.
pub fn resolve_locale(
    lng: Option<&str>,
    accept_language: Option<&str>,
    config: &Config,
) -> String {
    if lng.is_some() || accept_language.is_some() {
        negotiate_locale(lng, accept_language)
    } else {
        config.locale.default.clone()
    }
}

/// Build the render context from configuration and the chosen locale
pub fn build_context(config: &Config, locale: String) -> Result<RenderContext> {
    let catalog = config.build_catalog()?;
    tracing::debug!(locale = %locale, locales = ?catalog.locales(), "Render context ready");
    Ok(RenderContext::new(Arc::new(catalog), locale))
}
