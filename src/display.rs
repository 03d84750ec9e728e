//! Colored CLI display utilities.

use std::io::{self, Write};

use owo_colors::OwoColorize;

use crate::audit::InvocationRecord;
use crate::intercept::{InterceptionRegistry, MatchedRule};

/// Maximum length for truncated display strings.
const DEFAULT_MAX_LEN: usize = 80;

/// Truncate a string to a maximum length, adding ellipsis if truncated.
#[must_use]
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".to_string()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{kept}...")
    }
}

/// Describe the rules for one operation, e.g. `layer + tag(CREATE_USER)`.
#[must_use]
pub fn describe_rules(rules: &[MatchedRule]) -> String {
    if rules.is_empty() {
        return "not audited".to_string();
    }
    rules
        .iter()
        .map(|rule| match rule {
            MatchedRule::LayerWide => "layer".to_string(),
            MatchedRule::Tagged(tag) => format!("tag({tag})"),
        })
        .collect::<Vec<_>>()
        .join(" + ")
}

/// Print the registration table.
pub fn print_rules(registry: &InterceptionRegistry) {
    for (namespace, name, rules) in registry.iter() {
        let described = describe_rules(rules);
        if rules.is_empty() {
            println!("{}::{} {}", namespace.dimmed(), name, described.dimmed());
        } else {
            println!("{}::{} {}", namespace.dimmed(), name.cyan(), described.green());
        }
    }
    println!(
        "{} {} of {} operations audited",
        "[RULES]".blue().bold(),
        registry.audited_count(),
        registry.len()
    );
    let _ = io::stdout().flush();
}

/// Print one stored record as a single colored line.
pub fn print_record(record: &InvocationRecord) {
    let action = record.action().unwrap_or("-");
    println!(
        "{} {} {} {} args={} ret={} from={}",
        record.timestamp().format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string().dimmed(),
        format!("#{}", record.id()).blue(),
        record.method_name().cyan(),
        action.yellow(),
        truncate(record.arguments(), DEFAULT_MAX_LEN),
        truncate(record.return_value(), DEFAULT_MAX_LEN),
        record.caller_address()
    );
    let _ = io::stdout().flush();
}
