//! 测试数据

pub mod fixtures;

pub use fixtures::*;
