//! 规则引擎错误类型

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("无效的输入: {0}")]
    InvalidInput(String),

    #[error("事实值不能为空: {name}")]
    NullFact { name: String },

    #[error("组合规则 '{group}' 定义错误: {reason}")]
    MalformedComposite { group: String, reason: String },

    #[error("条件评估失败: {0}")]
    EvaluationError(String),

    #[error("动作执行失败: {0}")]
    ExecutionError(String),

    #[error("规则 '{rule}' 的动作执行失败: {source}")]
    ActionFailed {
        rule: String,
        #[source]
        source: Box<RuleError>,
    },

    #[error("类型不匹配: 期望 {expected}, 实际 {actual}")]
    TypeMismatch { expected: String, actual: String },

    #[error("字段不存在: {0}")]
    FieldNotFound(String),

    #[error("规则定义 '{name}' 无效: {reason}")]
    InvalidDefinition { name: String, reason: String },

    #[error("不支持的组合规则类型: {0}")]
    UnsupportedCompositeType(String),

    #[error("推理循环超过上限: {cycles} 轮")]
    InferenceLimitExceeded { cycles: usize },

    #[error("JSON 序列化错误: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl RuleError {
    /// 评估阶段的错误是否必须越过规则边界向上传播
    ///
    /// 条件失败一律按“未触发”处理，只有组合规则本身定义错误才是致命的。
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::MalformedComposite { .. })
    }
}

pub type Result<T> = std::result::Result<T, RuleError>;
