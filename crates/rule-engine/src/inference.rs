//! 推理引擎
//!
//! 反复选出条件成立的候选规则并交给 [`DefaultRulesEngine`] 执行，直到没有候选规则。
//! 规则动作需要改变事实使自身条件不再成立，否则循环不会结束；可以通过
//! `max_cycles` 设置循环上限。

use crate::engine::{CheckResult, DefaultRulesEngine, RulesEngine};
use crate::error::{Result, RuleError};
use crate::facts::Facts;
use crate::listener::{RuleListener, RulesEngineListener};
use crate::parameters::RulesEngineParameters;
use crate::rules::Rules;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// 推理规则引擎
#[derive(Clone, Default)]
pub struct InferenceRulesEngine {
    delegate: DefaultRulesEngine,
    rules_engine_listeners: Vec<Arc<dyn RulesEngineListener>>,
    max_cycles: Option<usize>,
}

impl InferenceRulesEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parameters(parameters: RulesEngineParameters) -> Self {
        Self {
            delegate: DefaultRulesEngine::with_parameters(parameters),
            ..Self::default()
        }
    }

    /// 设置推理循环上限
    pub fn with_max_cycles(mut self, max_cycles: usize) -> Self {
        self.max_cycles = Some(max_cycles);
        self
    }

    pub fn max_cycles(&self) -> Option<usize> {
        self.max_cycles
    }

    pub fn register_rule_listener(&mut self, listener: Arc<dyn RuleListener>) {
        self.delegate.register_rule_listener(listener);
    }

    pub fn register_rules_engine_listener(&mut self, listener: Arc<dyn RulesEngineListener>) {
        self.rules_engine_listeners.push(listener);
    }

    fn before_rules(&self, rules: &Rules, facts: &Facts) {
        for listener in &self.rules_engine_listeners {
            listener.before_evaluate(rules, facts);
        }
    }

    fn after_rules(&self, rules: &Rules, facts: &Facts) {
        for listener in &self.rules_engine_listeners {
            listener.after_execute(rules, facts);
        }
    }

    /// 选出本轮条件成立的规则
    fn select_candidates(&self, rules: &Rules, facts: &Facts) -> Result<Rules> {
        let mut candidates = Rules::new();

        for rule in rules {
            if !self.delegate.should_be_evaluated(&**rule, facts) {
                continue;
            }

            match rule.evaluate(facts) {
                Ok(true) => candidates.register(Arc::clone(rule))?,
                Ok(false) => {}
                Err(error) if error.is_fatal() => return Err(error),
                Err(error) => {
                    warn!(rule = rule.name(), error = %error, "候选规则评估出错，跳过");
                }
            }
        }

        Ok(candidates)
    }

    fn do_fire(&self, rules: &Rules, facts: &mut Facts) -> Result<()> {
        let mut cycles = 0;

        loop {
            let candidates = self.select_candidates(rules, facts)?;
            if candidates.is_empty() {
                debug!(cycles, "没有候选规则，推理结束");
                return Ok(());
            }

            cycles += 1;
            if let Some(max_cycles) = self.max_cycles {
                if cycles > max_cycles {
                    return Err(RuleError::InferenceLimitExceeded { cycles: max_cycles });
                }
            }

            debug!(cycle = cycles, candidates = ?candidates.names(), "执行候选规则");
            self.delegate.fire(&candidates, facts)?;
        }
    }
}

impl RulesEngine for InferenceRulesEngine {
    fn parameters(&self) -> RulesEngineParameters {
        self.delegate.parameters()
    }

    fn rule_listeners(&self) -> &[Arc<dyn RuleListener>] {
        self.delegate.rule_listeners()
    }

    fn rules_engine_listeners(&self) -> &[Arc<dyn RulesEngineListener>] {
        &self.rules_engine_listeners
    }

    #[instrument(skip_all, fields(rules = rules.len()))]
    fn fire(&self, rules: &Rules, facts: &mut Facts) -> Result<()> {
        self.before_rules(rules, facts);
        let result = self.do_fire(rules, facts);
        self.after_rules(rules, facts);
        result
    }

    /// 评估委托给内部引擎，运行级监听器由本引擎通知
    #[instrument(skip_all, fields(rules = rules.len()))]
    fn check(&self, rules: &Rules, facts: &Facts) -> Result<CheckResult> {
        self.before_rules(rules, facts);
        let result = self.delegate.check(rules, facts);
        self.after_rules(rules, facts);
        result
    }
}
