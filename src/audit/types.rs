//! Invocation record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted audit record describing one intercepted call.
///
/// Records are only produced by the stores; fields are read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationRecord {
    id: i64,
    method_name: String,
    arguments: String,
    caller_address: String,
    timestamp: DateTime<Utc>,
    return_value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    action: Option<String>,
}

impl InvocationRecord {
    /// Create a new builder for an invocation record.
    #[must_use]
    pub fn builder(method_name: impl Into<String>) -> InvocationRecordBuilder {
        InvocationRecordBuilder::new(method_name)
    }

    /// Store-assigned identifier.
    #[must_use]
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Name of the intercepted operation.
    #[must_use]
    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    /// Rendered argument list, e.g. `[42, User(...)]`.
    #[must_use]
    pub fn arguments(&self) -> &str {
        &self.arguments
    }

    /// Network origin of the triggering request; empty outside a request.
    #[must_use]
    pub fn caller_address(&self) -> &str {
        &self.caller_address
    }

    /// When the wrapped call completed.
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Rendered return value, `"null"` when the call returned nothing.
    #[must_use]
    pub fn return_value(&self) -> &str {
        &self.return_value
    }

    /// Action label, present only for tag-based matches.
    #[must_use]
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }
}

/// An invocation record that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInvocationRecord {
    pub method_name: String,
    pub arguments: String,
    pub caller_address: String,
    pub timestamp: DateTime<Utc>,
    pub return_value: String,
    pub action: Option<String>,
}

impl NewInvocationRecord {
    /// Attach the store-assigned id, producing the persisted record.
    #[must_use]
    pub fn into_record(self, id: i64) -> InvocationRecord {
        InvocationRecord {
            id,
            method_name: self.method_name,
            arguments: self.arguments,
            caller_address: self.caller_address,
            timestamp: self.timestamp,
            return_value: self.return_value,
            action: self.action,
        }
    }
}

/// Builder for invocation records.
///
/// The timestamp is taken when the builder is created.
#[derive(Debug, Clone)]
pub struct InvocationRecordBuilder {
    method_name: String,
    arguments: String,
    caller_address: String,
    timestamp: DateTime<Utc>,
    return_value: String,
    action: Option<String>,
}

impl InvocationRecordBuilder {
    /// Create a new builder with the method name.
    pub fn new(method_name: impl Into<String>) -> Self {
        Self {
            method_name: method_name.into(),
            arguments: "[]".to_string(),
            caller_address: String::new(),
            timestamp: Utc::now(),
            return_value: super::NULL_LITERAL.to_string(),
            action: None,
        }
    }

    /// Set a custom timestamp.
    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Set the rendered arguments.
    pub fn arguments(mut self, arguments: impl Into<String>) -> Self {
        self.arguments = arguments.into();
        self
    }

    /// Set the caller address.
    pub fn caller_address(mut self, address: impl Into<String>) -> Self {
        self.caller_address = address.into();
        self
    }

    /// Set the rendered return value.
    pub fn return_value(mut self, value: impl Into<String>) -> Self {
        self.return_value = value.into();
        self
    }

    /// Set the action label.
    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Build the pending record.
    pub fn build(self) -> NewInvocationRecord {
        NewInvocationRecord {
            method_name: self.method_name,
            arguments: self.arguments,
            caller_address: self.caller_address,
            timestamp: self.timestamp,
            return_value: self.return_value,
            action: self.action,
        }
    }
}
