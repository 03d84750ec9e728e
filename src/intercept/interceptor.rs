//! The audit interceptor.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use super::context::RequestContext;
use super::policy::{InterceptionRegistry, MatchedRule, Operation};
use crate::audit::{render_arguments, render_return, AuditValue, InvocationRecord, LogStore};
use crate::db::StoreError;

/// One call about to pass through the interceptor.
#[derive(Debug, Clone)]
pub struct Invocation<'a> {
    operation: &'a Operation,
    arguments: String,
}

impl<'a> Invocation<'a> {
    /// Capture the operation and its ordered argument list.
    ///
    /// Arguments are rendered here, before the wrapped call takes ownership
    /// of them, so they show the values as passed. Anything the call fills
    /// in, such as an id assigned on save, appears only in the return value.
    #[must_use]
    pub fn new(operation: &'a Operation, args: &[&dyn fmt::Display]) -> Self {
        Self {
            operation,
            arguments: render_arguments(args),
        }
    }

    #[must_use]
    pub fn operation(&self) -> &Operation {
        self.operation
    }

    /// Rendered argument list.
    #[must_use]
    pub fn arguments(&self) -> &str {
        &self.arguments
    }
}

/// Wraps operations and writes one invocation record per matched rule after
/// each successful call.
///
/// Runs inline on the caller's task: the record is written before the result
/// is handed back, and no state is shared between invocations.
#[derive(Clone)]
pub struct AuditInterceptor {
    store: Arc<dyn LogStore>,
    registry: Arc<InterceptionRegistry>,
}

impl fmt::Debug for AuditInterceptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuditInterceptor")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl AuditInterceptor {
    #[must_use]
    pub fn new(store: Arc<dyn LogStore>, registry: InterceptionRegistry) -> Self {
        Self {
            store,
            registry: Arc::new(registry),
        }
    }

    /// The frozen registration table.
    #[must_use]
    pub fn registry(&self) -> &InterceptionRegistry {
        &self.registry
    }

    /// Run `call` and audit it under every rule registered for the operation.
    ///
    /// A failing call is returned unchanged and nothing is recorded. Once the
    /// call succeeds, a failed store write is converted into `E` and returned
    /// instead of the result.
    ///
    /// # Errors
    ///
    /// Returns the wrapped call's error, or the store error converted to `E`.
    pub async fn intercept<T, E, F, Fut>(
        &self,
        ctx: &RequestContext,
        invocation: Invocation<'_>,
        call: F,
    ) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        T: AuditValue,
        E: From<StoreError>,
    {
        let rules = self.registry.rules_for(invocation.operation);
        let result = call().await?;

        if rules.is_empty() {
            return Ok(result);
        }

        let return_value = render_return(&result);
        for rule in rules {
            self.record(ctx, &invocation, &return_value, rule).await?;
        }

        Ok(result)
    }

    /// Build and persist the record for a single matched rule.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    pub async fn record(
        &self,
        ctx: &RequestContext,
        invocation: &Invocation<'_>,
        return_value: &str,
        rule: &MatchedRule,
    ) -> Result<InvocationRecord, StoreError> {
        let mut builder = InvocationRecord::builder(invocation.operation.name)
            .arguments(invocation.arguments.as_str())
            .caller_address(ctx.caller_address())
            .return_value(return_value);
        if let Some(action) = rule.action() {
            builder = builder.action(action);
        }

        match self.store.save(builder.build()).await {
            Ok(record) => {
                tracing::debug!(
                    request_id = %ctx.request_id(),
                    method = record.method_name(),
                    action = record.action().unwrap_or_default(),
                    record_id = record.id(),
                    "Audit record saved"
                );
                Ok(record)
            }
            Err(e) => {
                tracing::warn!(
                    request_id = %ctx.request_id(),
                    method = invocation.operation.name,
                    error = %e,
                    "Failed to save audit record"
                );
                Err(e)
            }
        }
    }
}
