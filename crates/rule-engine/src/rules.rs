//! 规则注册表
//!
//! 按名称去重、按 `(priority, name)` 升序排列的规则集合。引擎只使用这一种遍历顺序，
//! 与插入顺序无关。

use crate::error::{Result, RuleError};
use crate::rule::{compare_rules, Rule};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// 规则注册表
#[derive(Clone, Default)]
pub struct Rules {
    /// 始终保持有序
    rules: Vec<Arc<dyn Rule>>,
}

impl Rules {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从一组规则创建注册表，同名规则只保留最后一个
    pub fn from_rules(rules: impl IntoIterator<Item = Arc<dyn Rule>>) -> Result<Self> {
        let mut registry = Self::new();
        registry.register_all(rules)?;
        Ok(registry)
    }

    /// 注册规则
    ///
    /// 已存在同名规则时替换原规则，注册表中始终只保留一个条目。
    pub fn register(&mut self, rule: Arc<dyn Rule>) -> Result<()> {
        if rule.name().is_empty() {
            return Err(RuleError::InvalidInput("规则名称不能为空".to_string()));
        }

        if self.remove_by_name(rule.name()).is_some() {
            debug!(rule = rule.name(), "替换同名规则");
        }

        let index = self
            .rules
            .partition_point(|existing| compare_rules(&**existing, &*rule).is_lt());
        self.rules.insert(index, rule);
        Ok(())
    }

    /// 注册具体类型的规则
    pub fn register_rule(&mut self, rule: impl Rule + 'static) -> Result<()> {
        self.register(Arc::new(rule))
    }

    /// 批量注册规则
    pub fn register_all(&mut self, rules: impl IntoIterator<Item = Arc<dyn Rule>>) -> Result<()> {
        for rule in rules {
            self.register(rule)?;
        }
        Ok(())
    }

    /// 注销规则（按名称匹配），不存在时忽略
    pub fn unregister(&mut self, rule: &dyn Rule) {
        self.unregister_by_name(rule.name());
    }

    /// 批量注销规则
    pub fn unregister_all<'a>(&mut self, rules: impl IntoIterator<Item = &'a dyn Rule>) {
        for rule in rules {
            self.unregister(rule);
        }
    }

    /// 按名称注销规则，不存在时忽略
    pub fn unregister_by_name(&mut self, name: &str) {
        self.remove_by_name(name);
    }

    fn remove_by_name(&mut self, name: &str) -> Option<Arc<dyn Rule>> {
        let index = self.rules.iter().position(|rule| rule.name() == name)?;
        Some(self.rules.remove(index))
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Rule>> {
        self.rules.iter().find(|rule| rule.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn clear(&mut self) {
        self.rules.clear();
    }

    /// 按 `(priority, name)` 升序遍历
    pub fn iter(&self) -> std::slice::Iter<'_, Arc<dyn Rule>> {
        self.rules.iter()
    }

    /// 按遍历顺序列出规则名称
    pub fn names(&self) -> Vec<&str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }
}

impl<'a> IntoIterator for &'a Rules {
    type Item = &'a Arc<dyn Rule>;
    type IntoIter = std::slice::Iter<'a, Arc<dyn Rule>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

impl fmt::Debug for Rules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rules.iter()).finish()
    }
}
