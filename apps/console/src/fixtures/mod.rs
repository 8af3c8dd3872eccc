use crate::models::{
    Alert, AlertLevel, AlertsPayload, ApiCallCounters, LevelAggregates, LogEntry, LogsPayload,
    Model, ModelStatus, ModelsPayload, NeuralHealthLevels, NeuralHealthPayload, NeuralStatus,
    PerformanceOverview, PoliciesPayload, Policy, PolicyStatus, StreamSnapshot, TierHealth,
};

/// 演示用的告警数据，便于在未接入后端时预览 UI，也供单元测试复用。
pub fn sample_alerts_payload() -> AlertsPayload {
    AlertsPayload {
        alerts: vec![
            Alert {
                id: 1,
                alert_id: "alt-latency".to_string(),
                timestamp: "2026-08-06T01:58:12Z".to_string(),
                level: AlertLevel::Critical,
                title: "L3 延迟超标".to_string(),
                message: "新皮质层平均延迟连续 5 分钟超过阈值".to_string(),
                source: "latency-watchdog".to_string(),
                component: "neocortex".to_string(),
                resolved: false,
                resolved_at: None,
            },
            Alert {
                id: 2,
                alert_id: "alt-degraded".to_string(),
                timestamp: "2026-08-06T01:45:03Z".to_string(),
                level: AlertLevel::Warning,
                title: "模型性能降级".to_string(),
                message: "Gemini 成功率降至 91%".to_string(),
                source: "model-monitor".to_string(),
                component: "router".to_string(),
                resolved: false,
                resolved_at: None,
            },
            Alert {
                id: 3,
                alert_id: "alt-restart".to_string(),
                timestamp: "2026-08-06T00:20:40Z".to_string(),
                level: AlertLevel::Info,
                title: "网关重启完成".to_string(),
                message: "计划内滚动重启已结束".to_string(),
                source: "gateway".to_string(),
                component: "edge".to_string(),
                resolved: true,
                resolved_at: Some("2026-08-06T00:25:00Z".to_string()),
            },
        ],
        unresolved_count: 2,
        critical_count: 1,
    }
}

pub fn sample_models_payload() -> ModelsPayload {
    let model = |id, name: &str, status, success, latency, scores: [f64; 4]| Model {
        id,
        name: name.to_string(),
        status,
        success_rate: success,
        avg_latency: latency,
        l1_score: scores[0],
        l2_score: scores[1],
        l3_score: scores[2],
        l4_score: scores[3],
    };

    ModelsPayload {
        models: vec![
            model(1, "Groq", ModelStatus::Operational, 99.1, 180.0, [9.4, 7.8, 7.2, 6.9]),
            model(2, "Claude", ModelStatus::Operational, 98.4, 820.0, [8.1, 9.2, 9.5, 8.8]),
            model(3, "Gemini", ModelStatus::Degraded, 91.0, 640.0, [8.0, 8.6, 9.0, 8.4]),
            model(4, "DeepSeek", ModelStatus::Operational, 97.2, 710.0, [7.5, 8.0, 8.7, 9.3]),
        ],
    }
}

pub fn sample_policies_payload() -> PoliciesPayload {
    PoliciesPayload {
        policies: vec![
            Policy {
                id: 1,
                policy_id: "pol-latency".to_string(),
                policy_name: "低延迟优先".to_string(),
                status: PolicyStatus::Active,
                version: "3.1.0".to_string(),
                expected_performance: 94.0,
                actual_performance: Some(95.2),
                degradation_threshold: 5.0,
                created_at: "2026-07-20T08:00:00Z".to_string(),
                deployed_at: Some("2026-08-01T09:30:00Z".to_string()),
                rolled_back_at: None,
                description: Some("优先命中低延迟模型，适合交互场景".to_string()),
            },
            Policy {
                id: 2,
                policy_id: "pol-balanced".to_string(),
                policy_name: "均衡路由".to_string(),
                status: PolicyStatus::Backup,
                version: "2.4.0".to_string(),
                expected_performance: 92.0,
                actual_performance: None,
                degradation_threshold: 5.0,
                created_at: "2026-07-02T08:00:00Z".to_string(),
                deployed_at: None,
                rolled_back_at: None,
                description: Some("成本与质量折中的默认方案".to_string()),
            },
            Policy {
                id: 3,
                policy_id: "pol-canary".to_string(),
                policy_name: "灰度验证".to_string(),
                status: PolicyStatus::Inactive,
                version: "0.9.2".to_string(),
                expected_performance: 90.0,
                actual_performance: Some(84.1),
                degradation_threshold: 3.0,
                created_at: "2026-06-11T08:00:00Z".to_string(),
                deployed_at: None,
                rolled_back_at: Some("2026-06-20T15:00:00Z".to_string()),
                description: None,
            },
        ],
        active_policy: Some("pol-latency".to_string()),
        backup_policies: vec!["pol-balanced".to_string()],
    }
}

pub fn sample_neural_status() -> NeuralStatus {
    let mut levels = std::collections::BTreeMap::new();
    levels.insert("L1".to_string(), "Groq".to_string());
    levels.insert("L2".to_string(), "Claude".to_string());
    levels.insert("L3".to_string(), "Gemini".to_string());
    levels.insert("L4".to_string(), "DeepSeek".to_string());

    NeuralStatus {
        timestamp: "2026-08-06T02:00:00Z".to_string(),
        neural_levels: levels,
        health: "normal".to_string(),
        availability: "99.5%".to_string(),
        uptime_hours: 312.4,
    }
}

pub fn sample_performance_overview() -> PerformanceOverview {
    PerformanceOverview {
        availability: "99.5%".to_string(),
        avg_latency_ms: 412.0,
        token_efficiency: 0.87,
        models_operational: 4,
        total_models: 5,
        timestamp: "2026-08-06T02:00:00Z".to_string(),
    }
}

pub fn sample_logs_payload() -> LogsPayload {
    let entry = |id, level: &str, component: &str, message: &str| LogEntry {
        id,
        timestamp: "2026-08-06T02:00:00Z".to_string(),
        level: level.to_string(),
        component: component.to_string(),
        message: message.to_string(),
    };

    LogsPayload {
        logs: vec![
            entry(1, "info", "router", "L3 路由命中 Gemini"),
            entry(2, "warning", "model-monitor", "Gemini 成功率低于 92%"),
            entry(3, "info", "policy", "pol-latency 健康检查通过"),
            entry(4, "debug", "stream", "neural_stream 推送 1 条快照"),
        ],
    }
}

pub fn sample_neural_health() -> NeuralHealthPayload {
    NeuralHealthPayload {
        neural_levels: NeuralHealthLevels {
            brainstem: TierHealth {
                health: 0.95,
                status: Some("normal".to_string()),
            },
            limbic: TierHealth {
                health: 0.93,
                status: Some("normal".to_string()),
            },
            neocortex: TierHealth {
                health: 0.94,
                status: Some("normal".to_string()),
            },
            neuronet: TierHealth {
                health: 0.98,
                status: Some("normal".to_string()),
            },
        },
        average_health: 0.95,
    }
}

/// 离线预览时按序列号生成的流快照。
pub fn sample_stream_snapshot(seq: u64) -> StreamSnapshot {
    StreamSnapshot {
        api_calls: ApiCallCounters {
            total: 1_000 + seq * 17,
        },
        levels: LevelAggregates {
            avg: 0.9 + (seq % 5) as f64 * 0.01,
        },
    }
}
