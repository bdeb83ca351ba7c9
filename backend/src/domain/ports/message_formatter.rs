//! Port for rendering rule messages into user-facing text.
use crate::domain::validation::MessageKey;

/// Renders a message template with positional parameters.
///
/// Implementations own localisation. The domain only chooses the key and
/// supplies parameters already converted to display strings.
#[cfg_attr(test, mockall::automock)]
pub trait MessageFormatter: Send + Sync {
    /// Render the template for `key`, substituting `params` in order.
    fn format(&self, key: MessageKey, params: &[String]) -> String;
}
