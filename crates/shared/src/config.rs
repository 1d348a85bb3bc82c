//! 配置管理模块
//!
//! 支持多格式配置文件加载，环境变量覆盖，以及类型安全的配置访问。

use crate::observability::ObservabilityConfig;
use config::{Config, ConfigError, Environment, File, FileFormat};
use rule_engine::{DefaultRulesEngine, InferenceRulesEngine, RulesEngineParameters};
use serde::Deserialize;
use std::path::Path;

/// 推理引擎配置
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// 推理循环上限，为空时不限制
    pub max_cycles: Option<usize>,
}

/// 应用配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service_name: String,
    pub environment: String,
    pub engine: RulesEngineParameters,
    pub inference: InferenceConfig,
    pub observability: ObservabilityConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service_name: "rules-engine".to_string(),
            environment: "development".to_string(),
            engine: RulesEngineParameters::default(),
            inference: InferenceConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    ///
    /// 加载顺序（后加载的会覆盖先加载的同名配置项）：
    /// 1. config/default.toml（默认配置）
    /// 2. config/{environment}.toml（环境特定配置）
    /// 3. config/{service_name}.toml（服务特定配置）
    /// 4. 环境变量（RULES__ 前缀，如 RULES__ENGINE__PRIORITY_THRESHOLD -> engine.priority_threshold）
    pub fn load(service_name: &str) -> Result<Self, ConfigError> {
        let env = std::env::var("RULES_ENV").unwrap_or_else(|_| "development".to_string());
        let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

        Self::load_from(Path::new(&config_dir), service_name, &env)
    }

    /// 从指定目录加载配置
    pub fn load_from(config_dir: &Path, service_name: &str, env: &str) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("service_name", service_name)?
            .set_default("environment", env)?
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            .add_source(File::from(config_dir.join(format!("{}.toml", env))).required(false))
            .add_source(
                File::from(config_dir.join(format!("{}.toml", service_name))).required(false),
            )
            .add_source(
                Environment::with_prefix("RULES")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// 从 TOML 文本加载配置，不读取环境变量
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    /// 按配置构建默认引擎
    pub fn rules_engine(&self) -> DefaultRulesEngine {
        DefaultRulesEngine::with_parameters(self.engine)
    }

    /// 按配置构建推理引擎
    pub fn inference_engine(&self) -> InferenceRulesEngine {
        let engine = InferenceRulesEngine::with_parameters(self.engine);
        match self.inference.max_cycles {
            Some(max_cycles) => engine.with_max_cycles(max_cycles),
            None => engine,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
