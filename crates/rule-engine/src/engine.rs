//! 规则引擎
//!
//! 按注册表顺序遍历规则，提供两种运行方式：
//! - `check`：只评估条件，返回每条规则的评估结果
//! - `fire`：评估条件并在条件成立时执行动作，遵循 [`RulesEngineParameters`] 的跳过、
//!   阈值和失败策略
//!
//! 条件评估出错时规则被视为未触发；动作出错时默认吞掉错误继续遍历，
//! 设置 `fails_on_exception` 后中止运行并返回错误。

use crate::error::{Result, RuleError};
use crate::facts::Facts;
use crate::listener::{RuleListener, RulesEngineListener};
use crate::parameters::RulesEngineParameters;
use crate::rule::{Activation, Rule};
use crate::rules::Rules;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// 被评估的规则数
pub const RULES_EVALUATED_TOTAL: &str = "rule_engine_rules_evaluated_total";
/// 动作执行成功的规则数
pub const RULES_FIRED_TOTAL: &str = "rule_engine_rules_fired_total";
/// 动作执行失败的规则数
pub const RULES_FAILED_TOTAL: &str = "rule_engine_rules_failed_total";

/// 规则引擎
pub trait RulesEngine {
    /// 引擎参数（副本）
    fn parameters(&self) -> RulesEngineParameters;

    fn rule_listeners(&self) -> &[Arc<dyn RuleListener>];

    fn rules_engine_listeners(&self) -> &[Arc<dyn RulesEngineListener>];

    /// 评估并执行规则
    fn fire(&self, rules: &Rules, facts: &mut Facts) -> Result<()>;

    /// 只评估规则条件
    fn check(&self, rules: &Rules, facts: &Facts) -> Result<CheckResult>;
}

/// `check` 的结果，按遍历顺序保存每条规则的评估结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckResult {
    results: Vec<(String, bool)>,
}

impl CheckResult {
    fn push(&mut self, rule: &dyn Rule, evaluation_result: bool) {
        self.results.push((rule.name().to_string(), evaluation_result));
    }

    /// 获取某条规则的评估结果，被监听器跳过的规则没有结果
    pub fn get(&self, name: &str) -> Option<bool> {
        self.results
            .iter()
            .find(|(rule, _)| rule == name)
            .map(|(_, result)| *result)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.results.iter().map(|(name, result)| (name.as_str(), *result))
    }

    /// 条件成立的规则名称
    pub fn triggered(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, result)| *result)
            .map(|(name, _)| name)
            .collect()
    }
}

/// 默认规则引擎
#[derive(Clone, Default)]
pub struct DefaultRulesEngine {
    parameters: RulesEngineParameters,
    rule_listeners: Vec<Arc<dyn RuleListener>>,
    rules_engine_listeners: Vec<Arc<dyn RulesEngineListener>>,
}

impl DefaultRulesEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parameters(parameters: RulesEngineParameters) -> Self {
        Self {
            parameters,
            ..Self::default()
        }
    }

    pub fn register_rule_listener(&mut self, listener: Arc<dyn RuleListener>) {
        self.rule_listeners.push(listener);
    }

    pub fn register_rule_listeners(&mut self, listeners: impl IntoIterator<Item = Arc<dyn RuleListener>>) {
        self.rule_listeners.extend(listeners);
    }

    pub fn register_rules_engine_listener(&mut self, listener: Arc<dyn RulesEngineListener>) {
        self.rules_engine_listeners.push(listener);
    }

    pub fn register_rules_engine_listeners(
        &mut self,
        listeners: impl IntoIterator<Item = Arc<dyn RulesEngineListener>>,
    ) {
        self.rules_engine_listeners.extend(listeners);
    }

    fn do_fire(&self, rules: &Rules, facts: &mut Facts) -> Result<()> {
        if rules.is_empty() {
            warn!("没有注册任何规则");
            return Ok(());
        }

        let threshold = self.parameters.priority_threshold();
        debug!(parameters = %self.parameters, rules = ?rules.names(), facts = %facts, "开始执行规则");

        for rule in rules {
            let rule = &**rule;
            let name = rule.name();

            if rule.priority() > threshold {
                debug!(
                    rule = name,
                    priority = rule.priority(),
                    threshold,
                    "规则优先级超过阈值，跳过剩余规则"
                );
                break;
            }

            if !self.should_be_evaluated(rule, facts) {
                debug!(rule = name, "规则被监听器跳过");
                continue;
            }

            metrics::counter!(RULES_EVALUATED_TOTAL, "engine" => "default").increment(1);
            let activation = match rule.activate(facts) {
                Ok(activation) => {
                    self.after_evaluate(rule, facts, activation.is_some());
                    activation
                }
                Err(error) if error.is_fatal() => {
                    self.on_evaluation_error(rule, facts, &error);
                    return Err(error);
                }
                Err(error) => {
                    warn!(rule = name, error = %error, "规则条件评估出错，按未触发处理");
                    self.on_evaluation_error(rule, facts, &error);
                    None
                }
            };

            let Some(activation) = activation else {
                debug!(rule = name, "规则条件不成立，未执行");
                self.on_not_triggered(rule, facts);
                if self.parameters.skip_on_first_non_triggered_rule() {
                    debug!("skip_on_first_non_triggered_rule 已设置，跳过剩余规则");
                    break;
                }
                continue;
            };

            if self.execute(rule, &activation, facts)? {
                if self.parameters.skip_on_first_applied_rule() {
                    debug!("skip_on_first_applied_rule 已设置，跳过剩余规则");
                    break;
                }
            } else if self.parameters.skip_on_first_failed_rule() {
                debug!("skip_on_first_failed_rule 已设置，跳过剩余规则");
                break;
            }
        }

        Ok(())
    }

    /// 执行一次激活，返回动作是否成功
    ///
    /// 动作失败且设置了 `fails_on_exception` 时返回错误。
    fn execute(&self, rule: &dyn Rule, activation: &Activation<'_>, facts: &mut Facts) -> Result<bool> {
        let name = rule.name();
        self.before_execute(rule, facts);

        match activation.run(rule, facts) {
            Ok(()) => {
                debug!(rule = name, "规则已执行");
                metrics::counter!(RULES_FIRED_TOTAL, "engine" => "default").increment(1);
                self.on_success(rule, facts);
                Ok(true)
            }
            Err(error) => {
                metrics::counter!(RULES_FAILED_TOTAL, "engine" => "default").increment(1);
                self.on_failure(rule, facts, &error);
                if self.parameters.fails_on_exception() {
                    return Err(RuleError::ActionFailed {
                        rule: name.to_string(),
                        source: Box::new(error),
                    });
                }
                warn!(rule = name, error = %error, "规则动作执行失败");
                Ok(false)
            }
        }
    }

    fn do_check(&self, rules: &Rules, facts: &Facts) -> Result<CheckResult> {
        let mut result = CheckResult::default();

        for rule in rules {
            let rule = &**rule;
            if !self.should_be_evaluated(rule, facts) {
                debug!(rule = rule.name(), "规则被监听器跳过");
                continue;
            }

            let evaluation_result = match rule.evaluate(facts) {
                Ok(evaluation_result) => {
                    self.after_evaluate(rule, facts, evaluation_result);
                    evaluation_result
                }
                Err(error) if error.is_fatal() => {
                    self.on_evaluation_error(rule, facts, &error);
                    return Err(error);
                }
                Err(error) => {
                    warn!(rule = rule.name(), error = %error, "规则条件评估出错，按未触发处理");
                    self.on_evaluation_error(rule, facts, &error);
                    false
                }
            };
            result.push(rule, evaluation_result);
        }

        Ok(result)
    }

    /// 任一监听器否决即跳过
    pub(crate) fn should_be_evaluated(&self, rule: &dyn Rule, facts: &Facts) -> bool {
        self.rule_listeners
            .iter()
            .all(|listener| listener.before_evaluate(rule, facts))
    }

    fn after_evaluate(&self, rule: &dyn Rule, facts: &Facts, evaluation_result: bool) {
        for listener in &self.rule_listeners {
            listener.after_evaluate(rule, facts, evaluation_result);
        }
    }

    fn on_evaluation_error(&self, rule: &dyn Rule, facts: &Facts, error: &RuleError) {
        for listener in &self.rule_listeners {
            listener.on_evaluation_error(rule, facts, error);
        }
    }

    fn on_not_triggered(&self, rule: &dyn Rule, facts: &Facts) {
        for listener in &self.rule_listeners {
            listener.on_not_triggered(rule, facts);
        }
    }

    fn before_execute(&self, rule: &dyn Rule, facts: &Facts) {
        for listener in &self.rule_listeners {
            listener.before_execute(rule, facts);
        }
    }

    fn on_success(&self, rule: &dyn Rule, facts: &Facts) {
        for listener in &self.rule_listeners {
            listener.on_success(rule, facts);
        }
    }

    fn on_failure(&self, rule: &dyn Rule, facts: &Facts, error: &RuleError) {
        for listener in &self.rule_listeners {
            listener.on_failure(rule, facts, error);
        }
    }

    pub(crate) fn before_rules(&self, rules: &Rules, facts: &Facts) {
        for listener in &self.rules_engine_listeners {
            listener.before_evaluate(rules, facts);
        }
    }

    pub(crate) fn after_rules(&self, rules: &Rules, facts: &Facts) {
        for listener in &self.rules_engine_listeners {
            listener.after_execute(rules, facts);
        }
    }
}

impl RulesEngine for DefaultRulesEngine {
    fn parameters(&self) -> RulesEngineParameters {
        self.parameters
    }

    fn rule_listeners(&self) -> &[Arc<dyn RuleListener>] {
        &self.rule_listeners
    }

    fn rules_engine_listeners(&self) -> &[Arc<dyn RulesEngineListener>] {
        &self.rules_engine_listeners
    }

    /// 运行级监听器在遍历前后各通知一次，中止运行时也会通知
    #[instrument(skip_all, fields(rules = rules.len()))]
    fn fire(&self, rules: &Rules, facts: &mut Facts) -> Result<()> {
        self.before_rules(rules, facts);
        let result = self.do_fire(rules, facts);
        self.after_rules(rules, facts);
        result
    }

    #[instrument(skip_all, fields(rules = rules.len()))]
    fn check(&self, rules: &Rules, facts: &Facts) -> Result<CheckResult> {
        self.before_rules(rules, facts);
        let result = self.do_check(rules, facts);
        self.after_rules(rules, facts);
        result
    }
}
