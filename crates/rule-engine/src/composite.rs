//! 组合规则
//!
//! 组合规则自身也是 [`Rule`]，其评估和执行委托给内部持有的成员注册表：
//! - [`UnitRuleGroup`]：全部成员触发时整组触发，执行时按顺序执行全部成员
//! - [`ConditionalRuleGroup`]：优先级最高的成员作为闸门，闸门触发后其余成员各自评估
//!
//! 评估阶段得到的成员集合通过 [`Activation`] 交给执行阶段，规则实例本身不保存任何
//! 调用期状态，因此同一个组合规则可以被多次运行共享。

use crate::error::{Result, RuleError};
use crate::facts::Facts;
use crate::rule::{Activation, Rule, DEFAULT_DESCRIPTION, DEFAULT_PRIORITY};
use crate::rules::Rules;
use std::sync::Arc;
use tracing::debug;

/// 全有或全无的规则组
pub struct UnitRuleGroup {
    name: String,
    description: String,
    priority: i32,
    rules: Rules,
}

impl UnitRuleGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_details(name, DEFAULT_DESCRIPTION, DEFAULT_PRIORITY)
    }

    pub fn with_details(name: impl Into<String>, description: impl Into<String>, priority: i32) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            priority,
            rules: Rules::new(),
        }
    }

    pub fn add_rule(&mut self, rule: Arc<dyn Rule>) -> Result<()> {
        self.rules.register(rule)
    }

    pub fn remove_rule(&mut self, name: &str) {
        self.rules.unregister_by_name(name);
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }
}

impl Rule for UnitRuleGroup {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn evaluate(&self, facts: &Facts) -> Result<bool> {
        Ok(self.activate(facts)?.is_some())
    }

    /// 按顺序执行全部成员的动作
    fn execute(&self, facts: &mut Facts) -> Result<()> {
        for rule in &self.rules {
            rule.execute(facts)?;
        }
        Ok(())
    }

    /// 空组永不触发；遇到第一个未触发的成员即返回
    fn activate(&self, facts: &Facts) -> Result<Option<Activation<'_>>> {
        if self.rules.is_empty() {
            return Ok(None);
        }

        let mut members = Vec::with_capacity(self.rules.len());
        for rule in &self.rules {
            match rule.activate(facts)? {
                Some(activation) => members.push((&**rule, activation)),
                None => {
                    debug!(group = %self.name, member = rule.name(), "成员未触发，规则组不触发");
                    return Ok(None);
                }
            }
        }

        Ok(Some(Activation::Members(members)))
    }
}

/// 条件规则组
///
/// 优先级最高（数值最小）的成员是闸门：闸门未触发时其余成员不会被评估；闸门触发后
/// 其余成员各自评估，整组结果为真。执行时先执行闸门，再按 `(priority, name)` 顺序
/// 执行评估为真的成员。最高优先级必须唯一，否则评估时返回
/// [`RuleError::MalformedComposite`]。
pub struct ConditionalRuleGroup {
    name: String,
    description: String,
    priority: i32,
    rules: Rules,
}

impl ConditionalRuleGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_details(name, DEFAULT_DESCRIPTION, DEFAULT_PRIORITY)
    }

    pub fn with_details(name: impl Into<String>, description: impl Into<String>, priority: i32) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            priority,
            rules: Rules::new(),
        }
    }

    pub fn add_rule(&mut self, rule: Arc<dyn Rule>) -> Result<()> {
        self.rules.register(rule)
    }

    pub fn remove_rule(&mut self, name: &str) {
        self.rules.unregister_by_name(name);
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// 选出闸门规则
    fn gate(&self) -> Result<&Arc<dyn Rule>> {
        let mut ordered = self.rules.iter();
        let Some(highest) = ordered.next() else {
            return Err(self.malformed("规则组没有成员".to_string()));
        };

        if let Some(next) = ordered.next() {
            if next.priority() == highest.priority() {
                return Err(self.malformed(format!(
                    "只能有一个最高优先级的规则, '{}' 与 '{}' 的优先级均为 {}",
                    highest.name(),
                    next.name(),
                    highest.priority()
                )));
            }
        }

        Ok(highest)
    }

    fn malformed(&self, reason: String) -> RuleError {
        RuleError::MalformedComposite {
            group: self.name.clone(),
            reason,
        }
    }
}

impl Rule for ConditionalRuleGroup {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn evaluate(&self, facts: &Facts) -> Result<bool> {
        Ok(self.activate(facts)?.is_some())
    }

    /// 直接调用时会先重新评估，再执行评估得到的成员
    fn execute(&self, facts: &mut Facts) -> Result<()> {
        match self.activate(facts)? {
            Some(activation) => activation.run(self, facts),
            None => Ok(()),
        }
    }

    fn activate(&self, facts: &Facts) -> Result<Option<Activation<'_>>> {
        let gate = self.gate()?;

        let Some(gate_activation) = gate.activate(facts)? else {
            debug!(group = %self.name, gate = gate.name(), "闸门规则未触发");
            return Ok(None);
        };

        let mut members = vec![(&**gate, gate_activation)];
        for rule in self.rules.iter().skip(1) {
            if let Some(activation) = rule.activate(facts)? {
                members.push((&**rule, activation));
            }
        }

        debug!(
            group = %self.name,
            gate = gate.name(),
            selected = members.len() - 1,
            "闸门规则已触发"
        );
        Ok(Some(Activation::Members(members)))
    }
}
