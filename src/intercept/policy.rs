//! Matching rules deciding which operations are audited.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;

use super::tag::ActionTag;

/// Static descriptor of an interceptable operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    /// Namespace (layer) the operation belongs to, e.g. `"service"`.
    pub namespace: &'static str,
    /// Method identity recorded in audit records.
    pub name: &'static str,
    /// Declared action tag, if any.
    pub tag: Option<ActionTag>,
}

impl Operation {
    /// Untagged operation.
    #[must_use]
    pub const fn new(namespace: &'static str, name: &'static str) -> Self {
        Self {
            namespace,
            name,
            tag: None,
        }
    }

    /// Operation tagged with an explicit action label.
    #[must_use]
    pub const fn tagged(namespace: &'static str, name: &'static str, action: &'static str) -> Self {
        Self {
            namespace,
            name,
            tag: Some(ActionTag::new(action)),
        }
    }

    /// Operation tagged without a label; records carry `DEFAULT_ACTION`.
    #[must_use]
    pub const fn tagged_default(namespace: &'static str, name: &'static str) -> Self {
        Self {
            namespace,
            name,
            tag: Some(ActionTag::unlabeled()),
        }
    }

    fn key(&self) -> (&'static str, &'static str) {
        (self.namespace, self.name)
    }
}

/// A rule that matched an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", content = "action", rename_all = "snake_case")]
pub enum MatchedRule {
    /// The operation lives in an audited namespace. No action label.
    LayerWide,
    /// The operation carries an action tag.
    #[serde(serialize_with = "serialize_tag")]
    Tagged(ActionTag),
}

impl MatchedRule {
    /// Action label attached to records produced under this rule.
    #[must_use]
    pub fn action(&self) -> Option<&str> {
        match self {
            Self::LayerWide => None,
            Self::Tagged(tag) => Some(tag.action()),
        }
    }
}

/// Separator between namespace and name in configured tag keys.
pub const QUALIFIER: &str = "::";

fn serialize_tag<S: serde::Serializer>(tag: &ActionTag, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(tag.action())
}

/// The two independent interception rules.
///
/// - Layer-wide: every operation in one of the configured namespaces.
/// - Tag-based: every operation carrying an [`ActionTag`], either declared on
///   the operation or added here. Added tags are keyed either `namespace::name`,
///   which targets one operation, or a bare `name`, which applies in every
///   namespace. A qualified key wins over a bare one.
///
/// An operation matched by both rules is wrapped twice and yields two records
/// per call, one untagged and one tagged, unless `dedupe_dual_match` is set.
#[derive(Debug, Clone, Default)]
pub struct InterceptionPolicy {
    layer_namespaces: HashSet<String>,
    extra_tags: HashMap<String, ActionTag>,
    dedupe_dual_match: bool,
}

impl InterceptionPolicy {
    /// Policy with no rules; nothing is matched until rules are added.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Audit every operation in `namespace`.
    pub fn add_layer_namespace(&mut self, namespace: impl Into<String>) {
        self.layer_namespaces.insert(namespace.into());
    }

    /// Tag `operation` with `action`, overriding any declared tag.
    ///
    /// `operation` is `namespace::name` or a bare `name` matching that name
    /// in any namespace.
    pub fn tag_operation(&mut self, operation: impl Into<String>, action: impl Into<String>) {
        self.extra_tags
            .insert(operation.into(), ActionTag::owned(action));
    }

    /// Collapse dual matches into the tagged record only.
    pub fn set_dedupe_dual_match(&mut self, enabled: bool) {
        self.dedupe_dual_match = enabled;
    }

    /// Rules matching `operation`, layer-wide first.
    #[must_use]
    pub fn evaluate(&self, operation: &Operation) -> Vec<MatchedRule> {
        let mut rules = Vec::with_capacity(2);

        if self.layer_namespaces.contains(operation.namespace) {
            rules.push(MatchedRule::LayerWide);
        }

        let qualified = format!("{}{QUALIFIER}{}", operation.namespace, operation.name);
        let tag = self
            .extra_tags
            .get(&qualified)
            .or_else(|| self.extra_tags.get(operation.name))
            .or(operation.tag.as_ref());
        if let Some(tag) = tag {
            if self.dedupe_dual_match {
                rules.clear();
            }
            rules.push(MatchedRule::Tagged(tag.clone()));
        }

        rules
    }

    /// Evaluate every operation once and freeze the result.
    #[must_use]
    pub fn register<'a>(
        &self,
        operations: impl IntoIterator<Item = &'a Operation>,
    ) -> InterceptionRegistry {
        let entries: BTreeMap<_, _> = operations
            .into_iter()
            .map(|op| {
                let rules = self.evaluate(op);
                tracing::debug!(
                    namespace = op.namespace,
                    operation = op.name,
                    rules = rules.len(),
                    "Registered operation"
                );
                (op.key(), rules)
            })
            .collect();

        let registry = InterceptionRegistry { entries };
        tracing::info!(
            operations = registry.len(),
            audited = registry.audited_count(),
            "Interception rules registered"
        );
        registry
    }
}

/// Per-operation matched rules, computed once at registration time.
#[derive(Debug, Clone, Default)]
pub struct InterceptionRegistry {
    entries: BTreeMap<(&'static str, &'static str), Vec<MatchedRule>>,
}

impl InterceptionRegistry {
    /// Rules matching `operation`; empty if it was never registered.
    #[must_use]
    pub fn rules_for(&self, operation: &Operation) -> &[MatchedRule] {
        self.entries
            .get(&operation.key())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of registered operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of registered operations matched by at least one rule.
    #[must_use]
    pub fn audited_count(&self) -> usize {
        self.entries.values().filter(|rules| !rules.is_empty()).count()
    }

    /// Iterate `(namespace, name, rules)` in namespace/name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str, &[MatchedRule])> {
        self.entries
            .iter()
            .map(|((namespace, name), rules)| (*namespace, *name, rules.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static PERFORM: Operation = Operation::new("service", "performAction");
    static CREATE: Operation = Operation::tagged("service", "createUser", "CREATE_USER");
    static EXPORT: Operation = Operation::tagged_default("reports", "exportUsers");
    static HELPER: Operation = Operation::new("util", "normalize");

    fn service_policy() -> InterceptionPolicy {
        let mut policy = InterceptionPolicy::new();
        policy.add_layer_namespace("service");
        policy
    }

    #[test]
    fn test_layer_wide_match_has_no_action() {
        let rules = service_policy().evaluate(&PERFORM);
        assert_eq!(rules, vec![MatchedRule::LayerWide]);
        assert!(rules[0].action().is_none());
    }

    #[test]
    fn test_tag_outside_layer_matches_with_default_action() {
        let rules = service_policy().evaluate(&EXPORT);
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].action(), Some("DEFAULT_ACTION"));
    }

    #[test]
    fn test_dual_match_yields_both_rules() {
        let rules = service_policy().evaluate(&CREATE);
        assert_eq!(
            rules,
            vec![
                MatchedRule::LayerWide,
                MatchedRule::Tagged(ActionTag::new("CREATE_USER"))
            ]
        );
    }

    #[test]
    fn test_dedupe_keeps_only_tagged_rule() {
        let mut policy = service_policy();
        policy.set_dedupe_dual_match(true);

        let rules = policy.evaluate(&CREATE);
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].action(), Some("CREATE_USER"));

        assert_eq!(policy.evaluate(&PERFORM), vec![MatchedRule::LayerWide]);
    }

    #[test]
    fn test_unmatched_operation() {
        assert!(service_policy().evaluate(&HELPER).is_empty());
        assert!(InterceptionPolicy::new().evaluate(&PERFORM).is_empty());
    }

    #[test]
    fn test_tag_operation_adds_and_overrides() {
        let mut policy = service_policy();
        policy.tag_operation("performAction", "PERFORM_ACTION");
        policy.tag_operation("createUser", "ADD_USER");

        assert_eq!(
            policy.evaluate(&PERFORM)[1].action(),
            Some("PERFORM_ACTION")
        );
        assert_eq!(policy.evaluate(&CREATE)[1].action(), Some("ADD_USER"));
    }

    #[test]
    fn test_qualified_tag_targets_one_namespace() {
        static REPORT_CREATE: Operation = Operation::new("reports", "createUser");

        let mut policy = service_policy();
        policy.tag_operation("reports::createUser", "CREATE_REPORT");

        assert_eq!(
            policy.evaluate(&CREATE)[1].action(),
            Some("CREATE_USER")
        );
        assert_eq!(
            policy.evaluate(&REPORT_CREATE),
            vec![MatchedRule::Tagged(ActionTag::new("CREATE_REPORT"))]
        );
    }

    #[test]
    fn test_qualified_tag_wins_over_bare_name() {
        let mut policy = service_policy();
        policy.tag_operation("createUser", "ANY_CREATE");
        policy.tag_operation("service::createUser", "SERVICE_CREATE");

        assert_eq!(policy.evaluate(&CREATE)[1].action(), Some("SERVICE_CREATE"));
        assert_eq!(
            policy
                .evaluate(&Operation::new("reports", "createUser"))[0]
                .action(),
            Some("ANY_CREATE")
        );
    }

    #[test]
    fn test_registry_freezes_matches() {
        let mut policy = service_policy();
        let registry = policy.register([&PERFORM, &CREATE, &EXPORT, &HELPER]);

        // Later policy changes do not affect an existing registry.
        policy.set_dedupe_dual_match(true);

        assert_eq!(registry.len(), 4);
        assert_eq!(registry.audited_count(), 3);
        assert_eq!(registry.rules_for(&CREATE).len(), 2);
        assert!(registry.rules_for(&HELPER).is_empty());
        assert!(registry
            .rules_for(&Operation::new("service", "unregistered"))
            .is_empty());
    }

    #[test]
    fn test_registry_iter_is_sorted() {
        let registry = service_policy().register([&PERFORM, &EXPORT, &CREATE]);
        let names: Vec<_> = registry.iter().map(|(ns, name, _)| (ns, name)).collect();
        assert_eq!(
            names,
            vec![
                ("reports", "exportUsers"),
                ("service", "createUser"),
                ("service", "performAction"),
            ]
        );
    }

    #[test]
    fn test_matched_rule_serialize() {
        let json = serde_json::to_string(&MatchedRule::LayerWide).unwrap();
        assert_eq!(json, r#"{"rule":"layer_wide"}"#);

        let json =
            serde_json::to_string(&MatchedRule::Tagged(ActionTag::new("DELETE_USER"))).unwrap();
        assert_eq!(json, r#"{"rule":"tagged","action":"DELETE_USER"}"#);
    }
}
