//! 指标描述
//!
//! 引擎通过 `metrics` 门面计数，导出器由宿主程序安装。这里只登记指标说明，
//! 说明会出现在导出端的 HELP 注释中。

use rule_engine::{RULES_EVALUATED_TOTAL, RULES_FAILED_TOTAL, RULES_FIRED_TOTAL};

/// 登记规则引擎计数器的说明
pub fn describe_engine_metrics() {
    metrics::describe_counter!(RULES_EVALUATED_TOTAL, "Total number of rules evaluated");
    metrics::describe_counter!(RULES_FIRED_TOTAL, "Total number of rules whose actions succeeded");
    metrics::describe_counter!(RULES_FAILED_TOTAL, "Total number of rules whose actions failed");
}
