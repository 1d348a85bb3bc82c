//! 引擎参数

use serde::{Deserialize, Serialize};
use std::fmt;

/// 默认优先级阈值
pub const DEFAULT_RULE_PRIORITY_THRESHOLD: i32 = i32::MAX;

/// 控制引擎遍历行为的参数
///
/// 构造后只读，引擎对外只暴露副本。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesEngineParameters {
    /// 第一条规则执行成功后跳过其余规则
    skip_on_first_applied_rule: bool,
    /// 第一条规则执行失败后跳过其余规则
    skip_on_first_failed_rule: bool,
    /// 第一条规则未触发后跳过其余规则
    skip_on_first_non_triggered_rule: bool,
    /// 优先级数值超过阈值的规则及其后的规则都不再评估
    priority_threshold: i32,
    /// 动作失败时中止运行并把错误返回给调用方
    fails_on_exception: bool,
}

impl RulesEngineParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_skip_on_first_applied_rule(mut self, skip: bool) -> Self {
        self.skip_on_first_applied_rule = skip;
        self
    }

    pub fn with_skip_on_first_failed_rule(mut self, skip: bool) -> Self {
        self.skip_on_first_failed_rule = skip;
        self
    }

    pub fn with_skip_on_first_non_triggered_rule(mut self, skip: bool) -> Self {
        self.skip_on_first_non_triggered_rule = skip;
        self
    }

    pub fn with_priority_threshold(mut self, threshold: i32) -> Self {
        self.priority_threshold = threshold;
        self
    }

    pub fn with_fails_on_exception(mut self, fails: bool) -> Self {
        self.fails_on_exception = fails;
        self
    }

    pub fn skip_on_first_applied_rule(&self) -> bool {
        self.skip_on_first_applied_rule
    }

    pub fn skip_on_first_failed_rule(&self) -> bool {
        self.skip_on_first_failed_rule
    }

    pub fn skip_on_first_non_triggered_rule(&self) -> bool {
        self.skip_on_first_non_triggered_rule
    }

    pub fn priority_threshold(&self) -> i32 {
        self.priority_threshold
    }

    pub fn fails_on_exception(&self) -> bool {
        self.fails_on_exception
    }
}

impl Default for RulesEngineParameters {
    fn default() -> Self {
        Self {
            skip_on_first_applied_rule: false,
            skip_on_first_failed_rule: false,
            skip_on_first_non_triggered_rule: false,
            priority_threshold: DEFAULT_RULE_PRIORITY_THRESHOLD,
            fails_on_exception: false,
        }
    }
}

impl fmt::Display for RulesEngineParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Engine parameters {{ skipOnFirstAppliedRule = {}, skipOnFirstNonTriggeredRule = {}, \
             skipOnFirstFailedRule = {}, priorityThreshold = {}, failsOnException = {} }}",
            self.skip_on_first_applied_rule,
            self.skip_on_first_non_triggered_rule,
            self.skip_on_first_failed_rule,
            self.priority_threshold,
            self.fails_on_exception
        )
    }
}
