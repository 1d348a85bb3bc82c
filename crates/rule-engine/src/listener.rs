//! 引擎监听器
//!
//! 监听器由引擎同步调用，按注册顺序依次通知。除 [`RuleListener::before_evaluate`]
//! 可以否决单条规则的评估外，监听器不会影响遍历过程。

use crate::error::RuleError;
use crate::facts::Facts;
use crate::rule::Rule;
use crate::rules::Rules;

/// 单条规则级别的监听器
#[allow(unused_variables)]
pub trait RuleListener: Send + Sync {
    /// 规则评估前触发，返回 `false` 时跳过该规则
    fn before_evaluate(&self, rule: &dyn Rule, facts: &Facts) -> bool {
        true
    }

    fn after_evaluate(&self, rule: &dyn Rule, facts: &Facts, evaluation_result: bool) {}

    fn on_evaluation_error(&self, rule: &dyn Rule, facts: &Facts, error: &RuleError) {}

    /// 规则条件不成立（包括评估出错被视为不成立）
    fn on_not_triggered(&self, rule: &dyn Rule, facts: &Facts) {}

    fn before_execute(&self, rule: &dyn Rule, facts: &Facts) {}

    fn on_success(&self, rule: &dyn Rule, facts: &Facts) {}

    fn on_failure(&self, rule: &dyn Rule, facts: &Facts, error: &RuleError) {}
}

/// 整次运行级别的监听器
#[allow(unused_variables)]
pub trait RulesEngineListener: Send + Sync {
    /// 规则集评估前触发
    fn before_evaluate(&self, rules: &Rules, facts: &Facts) {}

    /// 规则集执行后触发
    fn after_execute(&self, rules: &Rules, facts: &Facts) {}
}
