//! 共享库
//!
//! 包含宿主程序共用的配置加载与日志初始化代码。

pub mod config;
pub mod observability;

pub use config::{AppConfig, InferenceConfig};
pub use observability::{LogFormat, ObservabilityConfig, ObservabilityGuard};
