//! 规则引擎
//!
//! 提供可复用的产生式规则执行能力，支持：
//! - 以名称标识、按优先级排序的规则注册表
//! - 单元规则组与条件规则组
//! - 默认引擎（单次遍历）与推理引擎（循环直到无候选规则）
//! - 规则级与引擎级监听器
//! - 由外部定义记录构建规则

pub mod builder;
pub mod composite;
pub mod definition;
pub mod engine;
pub mod error;
pub mod facts;
pub mod inference;
pub mod listener;
pub mod parameters;
pub mod rule;
pub mod rules;

pub use builder::{conditions, Action, Condition, DefaultRule, RuleBuilder};
pub use composite::{ConditionalRuleGroup, UnitRuleGroup};
pub use definition::{CompositeRuleType, ExpressionCompiler, RuleDefinition, RuleFactory};
pub use engine::{
    CheckResult, DefaultRulesEngine, RulesEngine, RULES_EVALUATED_TOTAL, RULES_FAILED_TOTAL,
    RULES_FIRED_TOTAL,
};
pub use error::{Result, RuleError};
pub use facts::{Fact, Facts};
pub use inference::InferenceRulesEngine;
pub use listener::{RuleListener, RulesEngineListener};
pub use parameters::{RulesEngineParameters, DEFAULT_RULE_PRIORITY_THRESHOLD};
pub use rule::{Activation, Rule, DEFAULT_DESCRIPTION, DEFAULT_NAME, DEFAULT_PRIORITY};
pub use rules::Rules;
