//! Action tags.

use std::borrow::Cow;
use std::fmt;

/// Label used when an operation is tagged without an explicit action.
pub const DEFAULT_ACTION: &str = "DEFAULT_ACTION";

/// Declarative marker naming the semantic action of an operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionTag {
    action: Cow<'static, str>,
}

impl ActionTag {
    /// Tag with an explicit action label.
    #[must_use]
    pub const fn new(action: &'static str) -> Self {
        Self {
            action: Cow::Borrowed(action),
        }
    }

    /// Tag carrying [`DEFAULT_ACTION`].
    #[must_use]
    pub const fn unlabeled() -> Self {
        Self::new(DEFAULT_ACTION)
    }

    /// Tag with a label only known at runtime, e.g. from configuration.
    #[must_use]
    pub fn owned(action: impl Into<String>) -> Self {
        Self {
            action: Cow::Owned(action.into()),
        }
    }

    /// The action label.
    #[must_use]
    pub fn action(&self) -> &str {
        &self.action
    }
}

impl Default for ActionTag {
    fn default() -> Self {
        Self::unlabeled()
    }
}

impl fmt::Display for ActionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tag_uses_default_action() {
        assert_eq!(ActionTag::default().action(), "DEFAULT_ACTION");
        assert_eq!(ActionTag::unlabeled(), ActionTag::default());
    }

    #[test]
    fn test_explicit_and_owned_tags_compare_by_label() {
        const CREATE: ActionTag = ActionTag::new("CREATE_USER");
        assert_eq!(CREATE.action(), "CREATE_USER");
        assert_eq!(CREATE, ActionTag::owned("CREATE_USER"));
        assert_eq!(CREATE.to_string(), "CREATE_USER");
    }
}
