//! 规则定义加载测试

use crate::data::{BAR_RULES, MISSING_ACTIONS, MOVIE_RULES, UNSUPPORTED_COMPOSITE};
use crate::TestEnvironment;
use rule_engine::{Rule, RuleError};

#[test]
fn test_load_simple_definitions_in_priority_order() {
    let env = TestEnvironment::new().unwrap();
    let rules = env.load_rules(BAR_RULES).unwrap();

    assert_eq!(rules.names(), vec!["age rule", "alcohol rule"]);
    let age_rule = rules.get("age rule").unwrap();
    assert_eq!(
        age_rule.description(),
        "Check if person's age is > 18 and mark the person as adult"
    );
    assert_eq!(age_rule.priority(), 1);
}

#[test]
fn test_load_composite_definitions() {
    let env = TestEnvironment::new().unwrap();
    let rules = env.load_rules(MOVIE_RULES).unwrap();

    // 成员规则只属于组合规则，不单独注册
    assert_eq!(rules.names(), vec!["movie id rule", "discount rule"]);
}

#[test]
fn test_invalid_definition_is_reported() {
    let env = TestEnvironment::new().unwrap();
    let err = env.load_rules(MISSING_ACTIONS).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<RuleError>(),
        Some(RuleError::InvalidDefinition { name, .. }) if name == "broken"
    ));
}

#[test]
fn test_unsupported_composite_type_is_reported() {
    let env = TestEnvironment::new().unwrap();
    let err = env.load_rules(UNSUPPORTED_COMPOSITE).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<RuleError>(),
        Some(RuleError::UnsupportedCompositeType(_))
    ));
}
