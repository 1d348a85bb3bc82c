//! 统一可观测性模块
//!
//! 宿主程序通过单一入口点初始化日志。引擎本身只依赖 `tracing` 与 `metrics` 门面，
//! 不安装任何订阅者或导出器。

pub mod logging;
pub mod metrics;

use ::tracing::info;
use anyhow::Result;
use serde::Deserialize;

/// 日志输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// 结构化日志
    Json,
    /// 人类可读
    #[default]
    Pretty,
}

/// 可观测性配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// 日志级别（如 "info", "debug"），RUST_LOG 优先
    pub log_level: String,

    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

/// 可观测性资源守卫
///
/// 宿主程序应在运行期间持有该守卫。
pub struct ObservabilityGuard {
    _private: (),
}

impl Drop for ObservabilityGuard {
    fn drop(&mut self) {
        info!("Shutting down observability...");
    }
}

/// 统一初始化可观测性
///
/// 初始化顺序：
/// 1. Tracing（日志）
/// 2. 登记引擎指标说明
///
/// 全局订阅者只能安装一次，重复调用返回错误。
///
/// # Example
///
/// ```ignore
/// use rules_shared::{observability, AppConfig};
///
/// fn main() -> anyhow::Result<()> {
///     let config = AppConfig::load("rules-engine")?;
///     let _guard = observability::init(&config.observability)?;
///
///     // 应用逻辑...
///
///     Ok(())
/// }
/// ```
pub fn init(config: &ObservabilityConfig) -> Result<ObservabilityGuard> {
    logging::init(config)?;
    metrics::describe_engine_metrics();

    info!(
        log_level = %config.log_level,
        log_format = ?config.log_format,
        "Observability initialized"
    );

    Ok(ObservabilityGuard { _private: () })
}
