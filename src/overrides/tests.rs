//! Override registry tests

use super::*;
use crate::schema::ScalarKind;

fn rule(endpoint: &str, action: &str, path: &str, kind: RuleKind) -> OverrideRule {
    OverrideRule {
        endpoint: endpoint.to_string(),
        action: action.to_string(),
        path: path.to_string(),
        rule: kind,
    }
}

#[test]
fn test_empty_registry_yields_empty_view() {
    let registry = OverrideRegistry::new();
    let view = registry.filter("components", "search");
    assert!(view.is_empty());
    assert!(!view.is_skipped("paging"));
    assert!(view.rename("paging").is_none());
}

#[test]
fn test_filter_scopes_to_one_action() {
    let registry = OverrideRegistry::from_rules(vec![
        rule("components", "search", "debt", RuleKind::Skip),
        rule("components", "show", "debt", RuleKind::Optional),
        rule("issues", "search", "debt", RuleKind::Rename {
            name: "TechnicalDebt".to_string(),
        }),
    ]);

    // A skip rule for endpoint A action X must not leak into action Y or
    // endpoint B.
    let view = registry.filter("components", "search");
    assert!(view.is_skipped("debt"));
    assert!(!view.is_optional("debt"));

    let view = registry.filter("components", "show");
    assert!(!view.is_skipped("debt"));
    assert!(view.is_optional("debt"));

    let view = registry.filter("issues", "search");
    assert!(!view.is_skipped("debt"));
    assert_eq!(view.rename("debt"), Some("TechnicalDebt".to_string()));

    let view = registry.filter("issues", "show");
    assert!(view.is_empty());
}

#[test]
fn test_force_type_lookup() {
    let registry = OverrideRegistry::from_rules(vec![rule(
        "measures",
        "component",
        "component.measures.value",
        RuleKind::ForceType {
            kind: ScalarKind::String,
        },
    )]);

    let view = registry.filter("measures", "component");
    assert_eq!(
        view.forced_kind("component.measures.value"),
        Some(ScalarKind::String)
    );
    assert_eq!(view.forced_kind("component.measures"), None);
}

#[test]
fn test_rules_parse_from_yaml() {
    let yaml = r#"
rules:
  - endpoint: components
    action: search
    path: components.qualifier
    type: rename
    name: ComponentQualifier
  - endpoint: components
    action: search
    path: components.tags
    type: skip
  - endpoint: measures
    action: component
    path: component.measures.value
    type: force_type
    kind: number
  - endpoint: projects
    action: search
    path: components.lastAnalysisDate
    type: optional
"#;

    let registry = OverrideRegistry::from_yaml_str(yaml).unwrap();
    assert_eq!(registry.len(), 4);

    let view = registry.filter("components", "search");
    assert_eq!(view.len(), 2);
    assert_eq!(
        view.rename("components.qualifier"),
        Some("ComponentQualifier".to_string())
    );
    assert!(view.is_skipped("components.tags"));

    let view = registry.filter("measures", "component");
    assert_eq!(
        view.forced_kind("component.measures.value"),
        Some(ScalarKind::Number)
    );

    let view = registry.filter("projects", "search");
    assert!(view.is_optional("components.lastAnalysisDate"));
}

#[test]
fn test_unmatched_rule_is_silently_unused() {
    // A rule referencing a path that never occurs in any example is not an
    // error at lookup time; it simply never fires.
    let registry = OverrideRegistry::from_rules(vec![rule(
        "components",
        "search",
        "no.such.path",
        RuleKind::Skip,
    )]);

    let view = registry.filter("components", "search");
    assert!(!view.is_skipped("components"));
    assert!(view.is_skipped("no.such.path"));
}
