//! 测试辅助工具

pub mod expression;
pub mod listener;

pub use expression::SimpleExpressionCompiler;
pub use listener::RecordingListener;
