//! 测试环境搭建

pub mod environment;

pub use environment::TestEnvironment;
