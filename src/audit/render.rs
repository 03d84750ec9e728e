//! String renderings of call arguments and return values.

use std::fmt;

/// Rendering of an absent or void value.
pub const NULL_LITERAL: &str = "null";

/// A value whose rendering can be stored in an invocation record.
///
/// `None` means the value is absent and renders as [`NULL_LITERAL`].
pub trait AuditValue {
    fn audit_repr(&self) -> Option<String>;
}

impl AuditValue for () {
    fn audit_repr(&self) -> Option<String> {
        None
    }
}

impl<T: AuditValue> AuditValue for Option<T> {
    fn audit_repr(&self) -> Option<String> {
        self.as_ref().and_then(AuditValue::audit_repr)
    }
}

impl<T: AuditValue> AuditValue for Vec<T> {
    fn audit_repr(&self) -> Option<String> {
        let items: Vec<String> = self.iter().map(render_return).collect();
        Some(format!("[{}]", items.join(", ")))
    }
}

impl<T: AuditValue + ?Sized> AuditValue for &T {
    fn audit_repr(&self) -> Option<String> {
        (**self).audit_repr()
    }
}

macro_rules! display_audit_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl AuditValue for $ty {
                fn audit_repr(&self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )*
    };
}

display_audit_value!(String, str, bool, i32, i64, u32, u64, usize);

/// Render a return value, falling back to [`NULL_LITERAL`] when absent.
pub fn render_return<T: AuditValue + ?Sized>(value: &T) -> String {
    value
        .audit_repr()
        .unwrap_or_else(|| NULL_LITERAL.to_string())
}

/// Render an ordered argument list as `[a, b, c]`.
#[must_use]
pub fn render_arguments(args: &[&dyn fmt::Display]) -> String {
    let items: Vec<String> = args.iter().map(ToString::to_string).collect();
    format!("[{}]", items.join(", "))
}
