//! 事实存储
//!
//! 规则条件和动作共享的键值存储。事实名唯一，值对引擎不透明（JSON 值），
//! 但不接受 `null`：某个事实“不存在”与“存在但为空”是两种不同的状态。

use crate::error::{Result, RuleError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// 单个事实（名称 + 值）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fact {
    pub name: String,
    pub value: Value,
}

impl Fact {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// 事实集合
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Facts {
    facts: BTreeMap<String, Value>,
}

impl Facts {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 JSON 对象创建
    pub fn from_json(json: &str) -> Result<Self> {
        let data: Value = serde_json::from_str(json)?;
        let Value::Object(map) = data else {
            return Err(RuleError::InvalidInput(
                "事实必须是一个 JSON 对象".to_string(),
            ));
        };

        let mut facts = Self::new();
        for (name, value) in map {
            facts.put(name, value)?;
        }
        Ok(facts)
    }

    /// 写入事实，同名事实会被替换，返回旧值
    pub fn put(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Result<Option<Value>> {
        let name = name.into();
        let value = value.into();

        if name.is_empty() {
            return Err(RuleError::InvalidInput("事实名称不能为空".to_string()));
        }
        if value.is_null() {
            return Err(RuleError::NullFact { name });
        }

        Ok(self.facts.insert(name, value))
    }

    /// 写入一个 [`Fact`]
    pub fn add(&mut self, fact: Fact) -> Result<Option<Value>> {
        self.put(fact.name, fact.value)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.facts.get(name)
    }

    /// 原地修改事实
    ///
    /// 修改作用在副本上，结果为 `null` 时返回 [`RuleError::NullFact`] 且原值保持不变；
    /// 事实不存在时返回 [`RuleError::FieldNotFound`]。
    pub fn update<F>(&mut self, name: &str, f: F) -> Result<()>
    where
        F: FnOnce(&mut Value),
    {
        let Some(current) = self.facts.get_mut(name) else {
            return Err(RuleError::FieldNotFound(name.to_string()));
        };

        let mut value = current.clone();
        f(&mut value);
        if value.is_null() {
            return Err(RuleError::NullFact {
                name: name.to_string(),
            });
        }

        *current = value;
        Ok(())
    }

    /// 按类型读取事实
    ///
    /// 事实不存在时返回 `Ok(None)`，存在但无法转换为 `T` 时返回 [`RuleError::TypeMismatch`]。
    pub fn get_as<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        let Some(value) = self.facts.get(name) else {
            return Ok(None);
        };

        serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|_| RuleError::TypeMismatch {
                expected: std::any::type_name::<T>().to_string(),
                actual: value_type_name(value).to_string(),
            })
    }

    /// 按类型读取必需的事实，不存在时返回 [`RuleError::FieldNotFound`]
    pub fn require<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        self.get_as(name)?
            .ok_or_else(|| RuleError::FieldNotFound(name.to_string()))
    }

    /// 获取字段值（支持点号分隔的路径，如 "order.amount" 或 "order.items.0.name"）
    pub fn get_field(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let mut current = self.facts.get(parts.next()?)?;

        for part in parts {
            match current {
                Value::Object(map) => {
                    current = map.get(part)?;
                }
                Value::Array(arr) => {
                    let index: usize = part.parse().ok()?;
                    current = arr.get(index)?;
                }
                _ => return None,
            }
        }

        Some(current)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.facts.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.facts.remove(name)
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    pub fn clear(&mut self) {
        self.facts.clear();
    }

    /// 按名称顺序遍历事实
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.facts.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// 导出为 JSON 对象快照
    pub fn to_value(&self) -> Value {
        let map: Map<String, Value> = self
            .facts
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        Value::Object(map)
    }
}

impl fmt::Display for Facts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries: Vec<String> = self
            .facts
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect();
        write!(f, "[{}]", entries.join(", "))
    }
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
