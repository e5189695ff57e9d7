//! Message template resources
//!
//! A [`ResourceStore`] resolves a template key for a locale. [`ResourceCatalog`]
//! is the bundled implementation: per-locale maps loaded from YAML or JSON
//! files, with an English built-in set covering every fixed key.

use crate::error::{Error, Result};
use crate::locale::{language_of, DEFAULT_LOCALE};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;

/// Template keys used by the library itself
pub mod keys {
    /// Caller is not authenticated
    pub const UNAUTHORIZED: &str = "unauthorized";
    /// Caller lacks permission
    pub const FORBIDDEN: &str = "forbidden";
    /// Entity lookup failed; tokens `type`, `id`
    pub const NOT_FOUND: &str = "not-found";
    /// Required property missing; token `property`
    pub const PROPERTY_REQUIRED: &str = "property-required";
    /// String length out of range; tokens `property`, `min`, `max`, `length`
    pub const STRING_LENGTH: &str = "string-length";
    /// Collection empty or absent; token `property`
    pub const COLLECTION_HAS_VALUES: &str = "collection-has-values";
    /// Summary text for a validation fault
    pub const VALIDATION_FAILED: &str = "validation-failed";
    /// Sample informational message
    pub const INFO: &str = "info";
    /// Sample warning message
    pub const WARNING: &str = "warning";
    /// Sample error message
    pub const ERROR: &str = "error";
    /// Sample validation error message
    pub const VALIDATION_ERROR: &str = "validation-error";
}

const BUILTIN_EN: &[(&str, &str)] = &[
    (keys::UNAUTHORIZED, "You must be signed in to perform this action."),
    (keys::FORBIDDEN, "You do not have permission to perform this action."),
    (keys::NOT_FOUND, "The {Type} with identifier '{Id}' could not be found."),
    (keys::PROPERTY_REQUIRED, "{Property} is required."),
    (
        keys::STRING_LENGTH,
        "{Property} must be between {Min} and {Max} characters long.",
    ),
    (
        keys::COLLECTION_HAS_VALUES,
        "{Property} must contain at least one value.",
    ),
    (keys::VALIDATION_FAILED, "One or more validation errors occurred."),
    (keys::INFO, "Here is some information: {Type}."),
    (keys::WARNING, "This is a warning."),
    (keys::ERROR, "Something went wrong."),
    (keys::VALIDATION_ERROR, "The email address '{Email}' is not accepted."),
];

/// Source of message templates
pub trait ResourceStore: Send + Sync {
    /// Template text for `key` in `locale`, if any
    fn resolve(&self, key: &str, locale: &str) -> Option<String>;
}

/// Per-locale template tables with a language and default-locale fallback
#[derive(Clone)]
pub struct ResourceCatalog {
    default_locale: String,
    // Keyed by lower-cased locale tag
    tables: HashMap<String, BTreeMap<String, String>>,
}

impl ResourceCatalog {
    /// Create an empty catalog falling back to `default_locale`
    pub fn new(default_locale: impl Into<String>) -> Self {
        Self {
            default_locale: default_locale.into(),
            tables: HashMap::new(),
        }
    }

    /// Catalog holding the built-in English templates
    pub fn builtin() -> Self {
        let mut catalog = Self::new(DEFAULT_LOCALE);
        for (key, template) in BUILTIN_EN {
            catalog.insert(DEFAULT_LOCALE, *key, *template);
        }
        catalog
    }

    /// Locale consulted last
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Add or replace one template
    pub fn insert(
        &mut self,
        locale: &str,
        key: impl Into<String>,
        template: impl Into<String>,
    ) {
        self.tables
            .entry(locale.to_lowercase())
            .or_default()
            .insert(key.into(), template.into());
    }

    /// Add a template, consuming and returning the catalog
    pub fn with(mut self, locale: &str, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.insert(locale, key, template);
        self
    }

    /// Locales with at least one template, sorted
    pub fn locales(&self) -> Vec<String> {
        let mut locales: Vec<_> = self.tables.keys().cloned().collect();
        locales.sort();
        locales
    }

    /// Keys defined for exactly `locale`, sorted
    pub fn keys(&self, locale: &str) -> Vec<&str> {
        self.tables
            .get(&locale.to_lowercase())
            .map(|table| table.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Merge a YAML or JSON file of `key: template` pairs
    ///
    /// The locale is the file stem, so `fr-FR.yaml` fills the `fr-FR` table.
    /// Returns the number of templates read.
    pub fn load_file(&mut self, path: &Path) -> Result<usize> {
        let locale = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .filter(|stem| !stem.is_empty())
            .ok_or_else(|| Error::resource_load(path, "file name is not a locale tag"))?
            .to_string();

        let is_json = match extension_of(path).as_deref() {
            Some("yaml") | Some("yml") => false,
            Some("json") => true,
            _ => return Err(Error::resource_load(path, "unsupported file extension")),
        };

        let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
            message: format!("Failed to read resources from {:?}", path),
            source: e,
        })?;

        let message = || format!("{}: expected a map of strings", path.display());
        let entries: BTreeMap<String, String> = if is_json {
            serde_json::from_str(&content).map_err(|source| Error::Json {
                message: message(),
                source,
            })?
        } else {
            serde_yaml::from_str(&content).map_err(|source| Error::Yaml {
                message: message(),
                source,
            })?
        };

        let count = entries.len();
        for (key, template) in entries {
            self.insert(&locale, key, template);
        }

        tracing::debug!(path = %path.display(), locale = %locale, count, "Loaded resource file");
        Ok(count)
    }

    /// Merge every `*.yaml`, `*.yml` and `*.json` file in a directory
    ///
    /// Files are loaded in name order. Returns the number of files read.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize> {
        let mut paths = std::fs::read_dir(dir)
            .map_err(|e| Error::Io {
                message: format!("Failed to read resource directory {:?}", dir),
                source: e,
            })?
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .filter(|path| path.is_file())
            .filter(|path| {
                matches!(
                    extension_of(path).as_deref(),
                    Some("yaml") | Some("yml") | Some("json")
                )
            })
            .collect::<Vec<_>>();
        paths.sort();

        for path in &paths {
            self.load_file(path)?;
        }

        Ok(paths.len())
    }

    fn lookup(&self, locale: &str, key: &str) -> Option<&String> {
        self.tables.get(&locale.to_lowercase())?.get(key)
    }
}

impl Default for ResourceCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for ResourceCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceCatalog")
            .field("default_locale", &self.default_locale)
            .field("locales", &self.locales())
            .finish()
    }
}

impl ResourceStore for ResourceCatalog {
    fn resolve(&self, key: &str, locale: &str) -> Option<String> {
        self.lookup(locale, key)
            .or_else(|| self.lookup(language_of(locale), key))
            .or_else(|| self.lookup(&self.default_locale, key))
            .cloned()
    }
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
}
