//! 测试环境管理
//!
//! 统一管理测试所需的配置与规则工厂。

use anyhow::{Context, Result};
use rule_engine::{RuleDefinition, RuleFactory, Rules};
use rules_shared::AppConfig;

use super::super::data::ENGINE_CONFIG;
use super::super::helpers::SimpleExpressionCompiler;

/// 测试环境
pub struct TestEnvironment {
    pub config: AppConfig,
    pub factory: RuleFactory<SimpleExpressionCompiler>,
}

impl TestEnvironment {
    /// 使用默认测试配置创建环境
    pub fn new() -> Result<Self> {
        Self::with_config(ENGINE_CONFIG)
    }

    pub fn with_config(toml: &str) -> Result<Self> {
        let config = AppConfig::from_toml(toml).context("加载测试配置失败")?;
        Ok(Self {
            config,
            factory: RuleFactory::new(SimpleExpressionCompiler),
        })
    }

    /// 解析 JSON 规则定义并构建注册表
    pub fn load_rules(&self, json: &str) -> Result<Rules> {
        let definitions: Vec<RuleDefinition> =
            serde_json::from_str(json).context("解析规则定义失败")?;
        let rules = self
            .factory
            .create_rules(&definitions)
            .context("构建规则失败")?;
        Ok(rules)
    }
}
