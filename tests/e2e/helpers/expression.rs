//! 测试用的最小表达式语言
//!
//! 条件：`<字段路径> <运算符> <JSON 字面量>`，运算符支持 `== != > >= < <=`。
//! 动作：`<事实名> = <JSON 字面量>` 或 `<事实名> += <数值>`。

use rule_engine::{Action, Condition, ExpressionCompiler, Facts, Result, RuleError};
use serde_json::Value;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy)]
enum Comparison {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl Comparison {
    fn parse(operator: &str) -> Option<Self> {
        match operator {
            "==" => Some(Self::Eq),
            "!=" => Some(Self::Neq),
            ">" => Some(Self::Gt),
            ">=" => Some(Self::Gte),
            "<" => Some(Self::Lt),
            "<=" => Some(Self::Lte),
            _ => None,
        }
    }

    fn apply(self, actual: &Value, expected: &Value) -> Result<bool> {
        match self {
            Self::Eq => Ok(loose_eq(actual, expected)),
            Self::Neq => Ok(!loose_eq(actual, expected)),
            _ => {
                let ordering = compare_numbers(actual, expected)?;
                Ok(match self {
                    Self::Gt => ordering == Ordering::Greater,
                    Self::Gte => ordering != Ordering::Less,
                    Self::Lt => ordering == Ordering::Less,
                    _ => ordering != Ordering::Greater,
                })
            }
        }
    }
}

fn loose_eq(actual: &Value, expected: &Value) -> bool {
    match (actual.as_f64(), expected.as_f64()) {
        (Some(a), Some(b)) => a == b,
        _ => actual == expected,
    }
}

fn compare_numbers(actual: &Value, expected: &Value) -> Result<Ordering> {
    match (actual.as_f64(), expected.as_f64()) {
        (Some(a), Some(b)) => a
            .partial_cmp(&b)
            .ok_or_else(|| RuleError::EvaluationError("无法比较 NaN".to_string())),
        _ => Err(RuleError::TypeMismatch {
            expected: "number".to_string(),
            actual: actual.to_string(),
        }),
    }
}

fn parse_literal(expression: &str, literal: &str) -> Result<Value> {
    serde_json::from_str(literal.trim())
        .map_err(|_| RuleError::InvalidInput(format!("无效的字面量: {}", expression)))
}

/// 把三段式表达式拆成 (左值, 运算符, 右值)
fn split(expression: &str) -> Result<(&str, &str, &str)> {
    let mut parts = expression.trim().splitn(3, ' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(left), Some(operator), Some(right)) if !left.is_empty() => {
            Ok((left, operator, right))
        }
        _ => Err(RuleError::InvalidInput(format!("无法解析表达式: {}", expression))),
    }
}

/// 测试用表达式编译器
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleExpressionCompiler;

impl ExpressionCompiler for SimpleExpressionCompiler {
    fn compile_condition(&self, expression: &str) -> Result<Box<dyn Condition>> {
        let (path, operator, literal) = split(expression)?;
        let comparison = Comparison::parse(operator)
            .ok_or_else(|| RuleError::InvalidInput(format!("未知运算符: {}", operator)))?;
        let expected = parse_literal(expression, literal)?;
        let path = path.to_string();

        Ok(Box::new(move |facts: &Facts| -> Result<bool> {
            match facts.get_field(&path) {
                Some(actual) => comparison.apply(actual, &expected),
                // 缺失的事实只满足不等比较
                None => Ok(matches!(comparison, Comparison::Neq)),
            }
        }) as Box<dyn Condition>)
    }

    fn compile_action(&self, expression: &str) -> Result<Box<dyn Action>> {
        let (name, operator, literal) = split(expression)?;
        let value = parse_literal(expression, literal)?;
        let name = name.to_string();

        match operator {
            "=" => Ok(Box::new(move |facts: &mut Facts| -> Result<()> {
                facts.put(name.as_str(), value.clone())?;
                Ok(())
            }) as Box<dyn Action>),
            "+=" => {
                let delta = value.as_i64().ok_or_else(|| {
                    RuleError::InvalidInput(format!("增量必须是整数: {}", expression))
                })?;
                Ok(Box::new(move |facts: &mut Facts| -> Result<()> {
                    let current = facts.get_as::<i64>(&name)?.unwrap_or(0);
                    facts.put(name.as_str(), current + delta)?;
                    Ok(())
                }) as Box<dyn Action>)
            }
            other => Err(RuleError::InvalidInput(format!("未知赋值运算符: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_condition_on_nested_field() {
        let condition = SimpleExpressionCompiler
            .compile_condition("person.age > 18")
            .unwrap();
        let mut facts = Facts::new();
        facts.put("person", json!({"age": 30})).unwrap();
        assert!(condition.evaluate(&facts).unwrap());
    }

    #[test]
    fn test_unknown_operator_is_rejected() {
        assert!(SimpleExpressionCompiler.compile_condition("a ~ 1").is_err());
    }
}
