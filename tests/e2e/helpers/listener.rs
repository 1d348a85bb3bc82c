//! 记录事件的监听器

use parking_lot::Mutex;
use rule_engine::{Facts, Rule, RuleError, RuleListener, Rules, RulesEngineListener};

/// 按顺序记录所有回调
#[derive(Default)]
pub struct RecordingListener {
    events: Mutex<Vec<String>>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().clone()
    }

    /// 只保留指定前缀的事件
    pub fn events_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .filter(|event| event.starts_with(prefix))
            .cloned()
            .collect()
    }

    fn record(&self, event: String) {
        self.events.lock().push(event);
    }
}

impl RuleListener for RecordingListener {
    fn after_evaluate(&self, rule: &dyn Rule, _facts: &Facts, evaluation_result: bool) {
        self.record(format!("evaluated:{}:{}", rule.name(), evaluation_result));
    }

    fn on_evaluation_error(&self, rule: &dyn Rule, _facts: &Facts, _error: &RuleError) {
        self.record(format!("evaluation_error:{}", rule.name()));
    }

    fn on_success(&self, rule: &dyn Rule, _facts: &Facts) {
        self.record(format!("success:{}", rule.name()));
    }

    fn on_failure(&self, rule: &dyn Rule, _facts: &Facts, _error: &RuleError) {
        self.record(format!("failure:{}", rule.name()));
    }
}

impl RulesEngineListener for RecordingListener {
    fn before_evaluate(&self, rules: &Rules, _facts: &Facts) {
        self.record(format!("run_started:{}", rules.len()));
    }

    fn after_execute(&self, rules: &Rules, _facts: &Facts) {
        self.record(format!("run_finished:{}", rules.len()));
    }
}
