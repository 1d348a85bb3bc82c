//! 规则定义与规则工厂
//!
//! 规则定义是外部读取器（YAML/JSON 等）产出的结构化记录，条件和动作以表达式文本给出。
//! [`RuleFactory`] 借助 [`ExpressionCompiler`] 把表达式编译为 [`Condition`] / [`Action`]，
//! 并按组合类型构建组合规则。

use crate::builder::{Action, Condition, RuleBuilder};
use crate::composite::{ConditionalRuleGroup, UnitRuleGroup};
use crate::error::{Result, RuleError};
use crate::rule::{Rule, DEFAULT_DESCRIPTION, DEFAULT_NAME, DEFAULT_PRIORITY};
use crate::rules::Rules;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, warn};

/// 规则定义
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuleDefinition {
    pub name: String,
    pub description: String,
    pub priority: i32,
    pub condition: Option<String>,
    pub actions: Vec<String>,
    pub composing_rules: Vec<RuleDefinition>,
    pub composite_rule_type: Option<String>,
}

impl RuleDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn is_composite_rule(&self) -> bool {
        !self.composing_rules.is_empty()
    }
}

impl Default for RuleDefinition {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            priority: DEFAULT_PRIORITY,
            condition: None,
            actions: Vec::new(),
            composing_rules: Vec::new(),
            composite_rule_type: None,
        }
    }
}

/// 支持的组合规则类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeRuleType {
    UnitRuleGroup,
    ConditionalRuleGroup,
}

impl FromStr for CompositeRuleType {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "UnitRuleGroup" => Ok(Self::UnitRuleGroup),
            "ConditionalRuleGroup" => Ok(Self::ConditionalRuleGroup),
            other => Err(RuleError::UnsupportedCompositeType(other.to_string())),
        }
    }
}

impl fmt::Display for CompositeRuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnitRuleGroup => write!(f, "UnitRuleGroup"),
            Self::ConditionalRuleGroup => write!(f, "ConditionalRuleGroup"),
        }
    }
}

/// 表达式编译器
///
/// 由具体的表达式语言实现，引擎本身不解析表达式。
#[cfg_attr(test, mockall::automock)]
pub trait ExpressionCompiler {
    fn compile_condition(&self, expression: &str) -> Result<Box<dyn Condition>>;

    fn compile_action(&self, expression: &str) -> Result<Box<dyn Action>>;
}

/// 规则工厂
pub struct RuleFactory<C> {
    compiler: C,
}

impl<C: ExpressionCompiler> RuleFactory<C> {
    pub fn new(compiler: C) -> Self {
        Self { compiler }
    }

    /// 根据定义创建规则
    pub fn create_rule(&self, definition: &RuleDefinition) -> Result<Arc<dyn Rule>> {
        self.validate_name(definition)?;

        if definition.is_composite_rule() {
            self.create_composite_rule(definition)
        } else {
            self.create_simple_rule(definition)
        }
    }

    /// 根据一组定义创建注册表
    pub fn create_rules(&self, definitions: &[RuleDefinition]) -> Result<Rules> {
        let mut rules = Rules::new();
        for definition in definitions {
            rules.register(self.create_rule(definition)?)?;
        }
        debug!(count = rules.len(), "规则定义已转换");
        Ok(rules)
    }

    fn validate_name(&self, definition: &RuleDefinition) -> Result<()> {
        if definition.name.is_empty() {
            return Err(RuleError::InvalidDefinition {
                name: definition.name.clone(),
                reason: "规则名称不能为空".to_string(),
            });
        }
        Ok(())
    }

    fn create_simple_rule(&self, definition: &RuleDefinition) -> Result<Arc<dyn Rule>> {
        let Some(condition) = definition.condition.as_deref() else {
            return Err(RuleError::InvalidDefinition {
                name: definition.name.clone(),
                reason: "必须指定规则条件".to_string(),
            });
        };

        if definition.actions.is_empty() {
            return Err(RuleError::InvalidDefinition {
                name: definition.name.clone(),
                reason: "必须指定至少一个规则动作".to_string(),
            });
        }

        let mut builder = RuleBuilder::new()
            .name(definition.name.as_str())
            .description(definition.description.as_str())
            .priority(definition.priority)
            .condition(self.compiler.compile_condition(condition)?);

        for action in &definition.actions {
            builder = builder.action(self.compiler.compile_action(action)?);
        }

        Ok(Arc::new(builder.build()))
    }

    /// 组合规则只使用成员规则，自身的条件和动作会被忽略
    fn create_composite_rule(&self, definition: &RuleDefinition) -> Result<Arc<dyn Rule>> {
        let name = definition.name.as_str();

        let composite_type = definition
            .composite_rule_type
            .as_deref()
            .ok_or_else(|| RuleError::InvalidDefinition {
                name: name.to_string(),
                reason: "组合规则必须指定 compositeRuleType".to_string(),
            })?
            .parse::<CompositeRuleType>()?;

        if let Some(condition) = &definition.condition {
            warn!(rule = name, condition = %condition, %composite_type, "组合规则的条件将被忽略");
        }
        if !definition.actions.is_empty() {
            warn!(rule = name, actions = ?definition.actions, %composite_type, "组合规则的动作将被忽略");
        }

        let mut members = Vec::with_capacity(definition.composing_rules.len());
        for member in &definition.composing_rules {
            members.push(self.create_rule(member)?);
        }

        let rule: Arc<dyn Rule> = match composite_type {
            CompositeRuleType::UnitRuleGroup => {
                let mut group =
                    UnitRuleGroup::with_details(name, definition.description.as_str(), definition.priority);
                for member in members {
                    group.add_rule(member)?;
                }
                Arc::new(group)
            }
            CompositeRuleType::ConditionalRuleGroup => {
                let mut group = ConditionalRuleGroup::with_details(
                    name,
                    definition.description.as_str(),
                    definition.priority,
                );
                for member in members {
                    group.add_rule(member)?;
                }
                Arc::new(group)
            }
        };

        Ok(rule)
    }
}
