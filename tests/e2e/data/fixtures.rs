//! 规则定义与事实样例

/// 酒吧场景：先标记成年人，再拒绝未成年人购买酒精
pub const BAR_RULES: &str = r#"[
    {
        "name": "age rule",
        "description": "Check if person's age is > 18 and mark the person as adult",
        "priority": 1,
        "condition": "person.age > 18",
        "actions": ["adult = true"]
    },
    {
        "name": "alcohol rule",
        "description": "children are not allowed to buy alcohol",
        "priority": 2,
        "condition": "adult != true",
        "actions": ["refused = true", "reason = \"underage\""]
    }
]"#;

/// 组合规则场景：晚间场次且为 R 级影片时要求出示证件
pub const MOVIE_RULES: &str = r#"[
    {
        "name": "movie id rule",
        "description": "evening R rated movies require an id check",
        "priority": 1,
        "compositeRuleType": "UnitRuleGroup",
        "composingRules": [
            {
                "name": "time is evening",
                "priority": 1,
                "condition": "time >= 18",
                "actions": ["evening = true"]
            },
            {
                "name": "movie is rated R",
                "priority": 2,
                "condition": "rating == \"R\"",
                "actions": ["id_required = true"]
            }
        ]
    },
    {
        "name": "discount rule",
        "priority": 2,
        "compositeRuleType": "ConditionalRuleGroup",
        "composingRules": [
            {
                "name": "member",
                "priority": 0,
                "condition": "member == true",
                "actions": ["discount += 5"]
            },
            {
                "name": "matinee",
                "priority": 1,
                "condition": "time < 12",
                "actions": ["discount += 10"]
            },
            {
                "name": "student",
                "priority": 2,
                "condition": "student == true",
                "actions": ["discount += 20"]
            }
        ]
    }
]"#;

/// 推理场景：温度高于阈值时持续降温
pub const THERMOSTAT_RULES: &str = r#"[
    {
        "name": "decrease temperature",
        "priority": 1,
        "condition": "temperature > 25",
        "actions": ["temperature += -1", "cooling = true"]
    }
]"#;

/// 定义错误：简单规则缺少动作
pub const MISSING_ACTIONS: &str = r#"[
    {"name": "broken", "condition": "age > 18", "actions": []}
]"#;

/// 定义错误：不支持的组合类型
pub const UNSUPPORTED_COMPOSITE: &str = r#"[
    {
        "name": "activation group",
        "compositeRuleType": "ActivationRuleGroup",
        "composingRules": [
            {"name": "a", "condition": "x == 1", "actions": ["y = 1"]}
        ]
    }
]"#;

pub const ENGINE_CONFIG: &str = r#"
environment = "test"

[engine]
skip_on_first_applied_rule = false
fails_on_exception = false

[inference]
max_cycles = 100

[observability]
log_level = "debug"
log_format = "pretty"
"#;
