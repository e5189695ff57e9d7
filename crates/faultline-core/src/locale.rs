//! Ambient locale handling for message rendering
//!
//! Each execution context (one in-flight request, one CLI invocation) owns a
//! [`LocaleCell`]. Rendering acquires a [`LocaleScope`] on that cell; dropping
//! the scope restores whatever locale was in effect before, on every exit path.
//!
//! Copyright (c) 2025 Faultline Team
//! Licensed under the Apache-2.0 license

use std::cell::RefCell;
use std::fmt;

/// Locale used when a request supplies no preference
pub const DEFAULT_LOCALE: &str = "en-US";

/// Context-owned cell holding the ambient locale
///
/// The cell is deliberately not `Sync`: concurrent contexts must each own one.
pub struct LocaleCell {
    current: RefCell<String>,
}

impl LocaleCell {
    /// Create a cell with the given ambient locale
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            current: RefCell::new(locale.into()),
        }
    }

    /// The locale currently in effect
    pub fn current(&self) -> String {
        self.current.borrow().clone()
    }

    /// Override the ambient locale until the returned scope is dropped
    ///
    /// `None` keeps the ambient locale; the scope still restores it on drop so
    /// that nested scopes unwind uniformly.
    pub fn acquire(&self, locale: Option<&str>) -> LocaleScope<'_> {
        let active = match locale {
            Some(locale) if !locale.trim().is_empty() => locale.trim().to_string(),
            _ => self.current(),
        };
        let previous = self.current.replace(active.clone());

        tracing::trace!(previous = %previous, active = %active, "Locale scope acquired");

        LocaleScope {
            cell: self,
            previous: Some(previous),
            active,
        }
    }
}

impl Default for LocaleCell {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALE)
    }
}

impl fmt::Debug for LocaleCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocaleCell")
            .field("current", &*self.current.borrow())
            .finish()
    }
}

/// Guard restoring the previous locale of a [`LocaleCell`] when dropped
#[must_use = "the locale override ends as soon as the scope is dropped"]
pub struct LocaleScope<'a> {
    cell: &'a LocaleCell,
    previous: Option<String>,
    active: String,
}

impl LocaleScope<'_> {
    /// The locale in effect for this scope
    pub fn locale(&self) -> &str {
        &self.active
    }
}

impl Drop for LocaleScope<'_> {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            tracing::trace!(restored = %previous, "Locale scope released");
            *self.cell.current.borrow_mut() = previous;
        }
    }
}

/// Pick the locale for a request
///
/// A non-blank `lng` query value wins. Otherwise the first language in the
/// `Accept-Language` header is used, with any `;q=` parameters dropped.
/// Falls back to [`DEFAULT_LOCALE`].
pub fn negotiate_locale(query: Option<&str>, accept_language: Option<&str>) -> String {
    if let Some(lng) = query.map(str::trim).filter(|lng| !lng.is_empty()) {
        return lng.to_string();
    }

    accept_language
        .and_then(|header| header.split(',').next())
        .and_then(|first| first.split(';').next())
        .map(str::trim)
        .filter(|lang| !lang.is_empty() && *lang != "*")
        .map(str::to_string)
        .unwrap_or_else(|| DEFAULT_LOCALE.to_string())
}

/// Primary language subtag of a locale (`fr` for `fr-CA`)
pub fn language_of(locale: &str) -> &str {
    locale
        .split(['-', '_'])
        .next()
        .unwrap_or(locale)
}
