//! Resource-string catalogue for rule messages.
//!
//! Templates use `%s` positional placeholders filled in parameter order.
//! Catalogues ship as JSON:
//!
//! ```json
//! {
//!   "locale": "en-GB",
//!   "templates": {
//!     "CreditsRule": "...",
//!     "UserDoesNotHaveEnoughCredits": "...",
//!     "CreditsAssignedRule": "..."
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::ports::MessageFormatter;
use crate::domain::validation::MessageKey;
use crate::outbound::read_ambient_file;

const PLACEHOLDER: &str = "%s";

const EN_GB: [(MessageKey, &str); 3] = [
    (
        MessageKey::CreditsRule,
        "Not enough credits. This reservation requires %s credits but only %s are available.",
    ),
    (
        MessageKey::UserDoesNotHaveEnoughCredits,
        "%s does not have enough credits to cover their share. Current credits: %s.",
    ),
    (
        MessageKey::CreditsAssignedRule,
        "Not enough credits assigned. This reservation requires %s credits but only %s have been assigned.",
    ),
];

/// Validation errors returned by [`ResourceStrings::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogueValidationError {
    InvalidLocaleCode { locale: String },
    MissingTemplate { key: MessageKey },
    EmptyTemplate { key: MessageKey },
    PlaceholderMismatch { key: MessageKey, expected: usize, found: usize },
}

impl fmt::Display for CatalogueValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLocaleCode { locale } => {
                write!(f, "locale code '{locale}' must not be empty or padded")
            }
            Self::MissingTemplate { key } => write!(f, "catalogue has no template for {key}"),
            Self::EmptyTemplate { key } => write!(f, "template for {key} must not be empty"),
            Self::PlaceholderMismatch {
                key,
                expected,
                found,
            } => write!(
                f,
                "template for {key} must contain {expected} placeholders, found {found}"
            ),
        }
    }
}

impl std::error::Error for CatalogueValidationError {}

/// Errors raised while loading a catalogue from JSON.
#[derive(Debug, Error)]
pub enum CatalogueLoadError {
    #[error("read catalogue '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("catalogue is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalogue is invalid: {0}")]
    Invalid(#[from] CatalogueValidationError),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogueDto {
    locale: String,
    templates: BTreeMap<MessageKey, String>,
}

/// Validated message catalogue for one locale.
///
/// ## Invariants
/// - Every [`MessageKey`] has a non-empty template.
/// - Each template holds exactly as many `%s` placeholders as its key's arity.
///
/// # Examples
/// ```
/// use reservations::domain::ports::MessageFormatter;
/// use reservations::domain::validation::MessageKey;
/// use reservations::outbound::localization::ResourceStrings;
///
/// let strings = ResourceStrings::en_gb();
/// let text = strings.format(
///     MessageKey::CreditsRule,
///     &["5".to_owned(), "4".to_owned()],
/// );
/// assert!(text.contains("requires 5 credits"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceStrings {
    locale: String,
    templates: BTreeMap<MessageKey, String>,
}

impl ResourceStrings {
    /// Validate and create a catalogue.
    pub fn new(
        locale: impl Into<String>,
        templates: BTreeMap<MessageKey, String>,
    ) -> Result<Self, CatalogueValidationError> {
        let locale = locale.into();
        if locale.trim().is_empty() || locale.trim() != locale {
            return Err(CatalogueValidationError::InvalidLocaleCode { locale });
        }

        for key in MessageKey::ALL {
            let template = templates
                .get(&key)
                .ok_or(CatalogueValidationError::MissingTemplate { key })?;
            if template.trim().is_empty() {
                return Err(CatalogueValidationError::EmptyTemplate { key });
            }
            let found = template.matches(PLACEHOLDER).count();
            if found != key.arity() {
                return Err(CatalogueValidationError::PlaceholderMismatch {
                    key,
                    expected: key.arity(),
                    found,
                });
            }
        }

        Ok(Self { locale, templates })
    }

    /// Built-in British English catalogue.
    pub fn en_gb() -> Self {
        let templates = EN_GB
            .iter()
            .map(|(key, template)| (*key, (*template).to_owned()))
            .collect();
        Self {
            locale: "en-GB".to_owned(),
            templates,
        }
    }

    /// Parse and validate a JSON catalogue.
    pub fn from_json(json: &str) -> Result<Self, CatalogueLoadError> {
        let dto: CatalogueDto = serde_json::from_str(json)?;
        Ok(Self::new(dto.locale, dto.templates)?)
    }

    /// Read, parse, and validate a JSON catalogue file.
    pub fn from_path(path: &Path) -> Result<Self, CatalogueLoadError> {
        let json = read_ambient_file(path).map_err(|source| CatalogueLoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Locale the templates are written for.
    pub fn locale(&self) -> &str {
        self.locale.as_str()
    }

    /// Raw template for `key`.
    pub fn template(&self, key: MessageKey) -> &str {
        self.templates.get(&key).map_or("", String::as_str)
    }
}

impl Default for ResourceStrings {
    fn default() -> Self {
        Self::en_gb()
    }
}

impl MessageFormatter for ResourceStrings {
    fn format(&self, key: MessageKey, params: &[String]) -> String {
        let template = self.template(key);
        let mut rendered = String::with_capacity(template.len());
        let mut params = params.iter();
        let mut pieces = template.split(PLACEHOLDER);
        if let Some(first) = pieces.next() {
            rendered.push_str(first);
        }
        for piece in pieces {
            match params.next() {
                Some(param) => rendered.push_str(param),
                None => rendered.push_str(PLACEHOLDER),
            }
            rendered.push_str(piece);
        }
        rendered
    }
}
