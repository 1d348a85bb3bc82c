//! 规则契约
//!
//! 一条规则由唯一名称、描述、优先级（数值越小优先级越高）、条件和动作组成。
//! 同一注册表内规则按名称判等，按 `(priority, name)` 全序排列。

use crate::error::Result;
use crate::facts::Facts;
use std::cmp::Ordering;
use std::fmt;

/// 默认规则名称
pub const DEFAULT_NAME: &str = "rule";

/// 默认规则描述
pub const DEFAULT_DESCRIPTION: &str = "description";

/// 默认规则优先级
pub const DEFAULT_PRIORITY: i32 = i32::MAX - 1;

/// 规则
pub trait Rule: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        DEFAULT_DESCRIPTION
    }

    fn priority(&self) -> i32 {
        DEFAULT_PRIORITY
    }

    /// 评估规则条件
    ///
    /// 返回的错误不会中断引擎遍历，引擎会把该规则视为未触发。
    fn evaluate(&self, facts: &Facts) -> Result<bool>;

    /// 执行规则动作
    fn execute(&self, facts: &mut Facts) -> Result<()>;

    /// 评估规则并生成本次调用的激活记录
    ///
    /// 返回 `None` 表示未触发。激活记录携带评估阶段得到的状态（例如条件规则组中
    /// 评估成功的成员），执行阶段只依赖它而不依赖规则实例上的可变字段。
    fn activate(&self, facts: &Facts) -> Result<Option<Activation<'_>>> {
        Ok(self.evaluate(facts)?.then_some(Activation::Itself))
    }
}

impl fmt::Debug for dyn Rule + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name())
            .field("priority", &self.priority())
            .finish()
    }
}

/// 规则的全序：先比较优先级，再按名称字典序
pub fn compare_rules(a: &dyn Rule, b: &dyn Rule) -> Ordering {
    a.priority()
        .cmp(&b.priority())
        .then_with(|| a.name().cmp(b.name()))
}

/// 一次评估产生的激活记录
pub enum Activation<'a> {
    /// 执行规则自身的动作
    Itself,
    /// 依次执行成员规则的激活记录
    Members(Vec<(&'a dyn Rule, Activation<'a>)>),
}

impl Activation<'_> {
    /// 执行激活记录，`rule` 为产生该记录的规则
    pub fn run(&self, rule: &dyn Rule, facts: &mut Facts) -> Result<()> {
        match self {
            Self::Itself => rule.execute(facts),
            Self::Members(members) => {
                for (member, activation) in members {
                    activation.run(*member, facts)?;
                }
                Ok(())
            }
        }
    }

    /// 按执行顺序列出将被执行动作的规则名称
    pub fn execution_order<'r>(&'r self, rule: &'r dyn Rule) -> Vec<&'r str> {
        let mut names = Vec::new();
        self.collect_names(rule, &mut names);
        names
    }

    fn collect_names<'r>(&'r self, rule: &'r dyn Rule, names: &mut Vec<&'r str>) {
        match self {
            Self::Itself => names.push(rule.name()),
            Self::Members(members) => {
                for (member, activation) in members {
                    activation.collect_names(*member, names);
                }
            }
        }
    }
}

impl fmt::Debug for Activation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Itself => write!(f, "Itself"),
            Self::Members(members) => f
                .debug_list()
                .entries(members.iter().map(|(rule, activation)| (rule.name(), activation)))
                .finish(),
        }
    }
}
