//! 条件、动作与规则构建器

use crate::error::Result;
use crate::facts::Facts;
use crate::rule::{Rule, DEFAULT_DESCRIPTION, DEFAULT_NAME, DEFAULT_PRIORITY};
use std::fmt;

/// 规则条件
pub trait Condition: Send + Sync {
    fn evaluate(&self, facts: &Facts) -> Result<bool>;
}

impl<F> Condition for F
where
    F: Fn(&Facts) -> Result<bool> + Send + Sync,
{
    fn evaluate(&self, facts: &Facts) -> Result<bool> {
        self(facts)
    }
}

/// 规则动作
pub trait Action: Send + Sync {
    fn execute(&self, facts: &mut Facts) -> Result<()>;
}

impl<F> Action for F
where
    F: Fn(&mut Facts) -> Result<()> + Send + Sync,
{
    fn execute(&self, facts: &mut Facts) -> Result<()> {
        self(facts)
    }
}

/// 常用条件
pub mod conditions {
    use super::Condition;
    use crate::error::Result;
    use crate::facts::Facts;

    /// 恒为真的条件
    pub fn always() -> Box<dyn Condition> {
        Box::new(|_: &Facts| -> Result<bool> { Ok(true) })
    }

    /// 恒为假的条件
    pub fn never() -> Box<dyn Condition> {
        Box::new(|_: &Facts| -> Result<bool> { Ok(false) })
    }
}

/// 由条件和动作列表组成的规则
pub struct DefaultRule {
    name: String,
    description: String,
    priority: i32,
    condition: Box<dyn Condition>,
    actions: Vec<Box<dyn Action>>,
}

impl Rule for DefaultRule {
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
        self.condition.evaluate(facts)
    }

    /// 按添加顺序执行动作，任一动作失败则跳过其余动作
    fn execute(&self, facts: &mut Facts) -> Result<()> {
        for action in &self.actions {
            action.execute(facts)?;
        }
        Ok(())
    }
}

impl fmt::Debug for DefaultRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultRule")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("priority", &self.priority)
            .field("actions", &self.actions.len())
            .finish()
    }
}

/// 规则构建器
///
/// 未指定条件时规则永不触发。
pub struct RuleBuilder {
    name: String,
    description: String,
    priority: i32,
    condition: Box<dyn Condition>,
    actions: Vec<Box<dyn Action>>,
}

impl RuleBuilder {
    pub fn new() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            priority: DEFAULT_PRIORITY,
            condition: conditions::never(),
            actions: Vec::new(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn when<F>(mut self, condition: F) -> Self
    where
        F: Fn(&Facts) -> Result<bool> + Send + Sync + 'static,
    {
        self.condition = Box::new(condition);
        self
    }

    /// 使用已构造好的条件（例如表达式编译器的产物）
    pub fn condition(mut self, condition: Box<dyn Condition>) -> Self {
        self.condition = condition;
        self
    }

    pub fn then<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut Facts) -> Result<()> + Send + Sync + 'static,
    {
        self.actions.push(Box::new(action));
        self
    }

    pub fn action(mut self, action: Box<dyn Action>) -> Self {
        self.actions.push(action);
        self
    }

    pub fn build(self) -> DefaultRule {
        DefaultRule {
            name: self.name,
            description: self.description,
            priority: self.priority,
            condition: self.condition,
            actions: self.actions,
        }
    }
}

impl Default for RuleBuilder {
    fn default() -> Self {
        Self::new()
    }
}
