//! 规则引擎端到端测试
//!
//! 测试覆盖从配置与规则定义到引擎执行的完整流程，包括：
//! - 规则定义加载与校验
//! - 默认引擎遍历策略
//! - 组合规则
//! - 推理引擎

pub mod data;
pub mod helpers;
pub mod setup;
pub mod suites;

pub use setup::TestEnvironment;
