use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    Info,
    Warning,
    Critical,
}

impl AlertLevel {
    pub const ALL: [AlertLevel; 3] = [AlertLevel::Info, AlertLevel::Warning, AlertLevel::Critical];

    pub fn label(self) -> &'static str {
        match self {
            Self::Info => "信息",
            Self::Warning => "警告",
            Self::Critical => "紧急",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Alert {
    pub id: u64,
    pub alert_id: String,
    pub timestamp: String,
    pub level: AlertLevel,
    pub title: String,
    pub message: String,
    pub source: String,
    pub component: String,
    #[serde(default)]
    pub resolved: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AlertsPayload {
    #[serde(default)]
    pub alerts: Vec<Alert>,
    #[serde(default)]
    pub unresolved_count: u32,
    #[serde(default)]
    pub critical_count: u32,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ModelStatus {
    Operational,
    Degraded,
    Down,
}

impl ModelStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Operational => "运行中",
            Self::Degraded => "性能降级",
            Self::Down => "离线",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Model {
    pub id: u64,
    pub name: String,
    pub status: ModelStatus,
    pub success_rate: f64,
    pub avg_latency: f64,
    pub l1_score: f64,
    pub l2_score: f64,
    pub l3_score: f64,
    pub l4_score: f64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ModelsPayload {
    #[serde(default)]
    pub models: Vec<Model>,
}

/// 神经路由层级，仅作展示用途；打分与路由发生在后端。
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RoutingTier {
    L1,
    L2,
    L3,
    L4,
}

impl RoutingTier {
    pub const ALL: [RoutingTier; 4] = [
        RoutingTier::L1,
        RoutingTier::L2,
        RoutingTier::L3,
        RoutingTier::L4,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::L1 => "L1",
            Self::L2 => "L2",
            Self::L3 => "L3",
            Self::L4 => "L4",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::L1 => "脑干（基础）",
            Self::L2 => "边缘系统（情感）",
            Self::L3 => "新皮质（认知）",
            Self::L4 => "神经网络（学习）",
        }
    }

    pub fn score_of(self, model: &Model) -> f64 {
        match self {
            Self::L1 => model.l1_score,
            Self::L2 => model.l2_score,
            Self::L3 => model.l3_score,
            Self::L4 => model.l4_score,
        }
    }
}

/// 每个路由层级各选一个模型；键固定为 L1–L4。
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectedModels {
    #[serde(rename = "L1")]
    pub l1: String,
    #[serde(rename = "L2")]
    pub l2: String,
    #[serde(rename = "L3")]
    pub l3: String,
    #[serde(rename = "L4")]
    pub l4: String,
}

impl Default for SelectedModels {
    fn default() -> Self {
        Self {
            l1: "Groq".to_string(),
            l2: "Claude".to_string(),
            l3: "Gemini".to_string(),
            l4: "DeepSeek".to_string(),
        }
    }
}

impl SelectedModels {
    pub fn get(&self, tier: RoutingTier) -> &str {
        match tier {
            RoutingTier::L1 => &self.l1,
            RoutingTier::L2 => &self.l2,
            RoutingTier::L3 => &self.l3,
            RoutingTier::L4 => &self.l4,
        }
    }

    pub fn set(&mut self, tier: RoutingTier, name: String) {
        match tier {
            RoutingTier::L1 => self.l1 = name,
            RoutingTier::L2 => self.l2 = name,
            RoutingTier::L3 => self.l3 = name,
            RoutingTier::L4 => self.l4 = name,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PolicyStatus {
    Active,
    Inactive,
    Backup,
    Rollback,
}

impl PolicyStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "活跃",
            Self::Inactive => "停用",
            Self::Backup => "备份",
            Self::Rollback => "回滚",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Policy {
    pub id: u64,
    pub policy_id: String,
    pub policy_name: String,
    pub status: PolicyStatus,
    pub version: String,
    pub expected_performance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_performance: Option<f64>,
    pub degradation_threshold: f64,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployed_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rolled_back_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Policy {
    /// 实测相对预期的性能差；尚未测量时为 None。
    pub fn performance_delta(&self) -> Option<f64> {
        self.actual_performance
            .map(|actual| actual - self.expected_performance)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PoliciesPayload {
    #[serde(default)]
    pub policies: Vec<Policy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_policy: Option<String>,
    #[serde(default)]
    pub backup_policies: Vec<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct DeployRequest<'a> {
    pub policy_id: &'a str,
}

/// 部署接口的应答体；对账以随后的列表拉取为准。
#[derive(Clone, Debug, Default, Deserialize)]
pub struct DeployAck {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub policy_id: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NeuralStatus {
    pub timestamp: String,
    #[serde(default)]
    pub neural_levels: std::collections::BTreeMap<String, String>,
    #[serde(default)]
    pub health: String,
    #[serde(default)]
    pub availability: String,
    #[serde(default)]
    pub uptime_hours: f64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PerformanceOverview {
    #[serde(default)]
    pub availability: String,
    #[serde(default)]
    pub avg_latency_ms: f64,
    #[serde(default)]
    pub token_efficiency: f64,
    #[serde(default)]
    pub models_operational: u32,
    #[serde(default)]
    pub total_models: u32,
    pub timestamp: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LogEntry {
    pub id: u64,
    pub timestamp: String,
    pub level: String,
    pub component: String,
    pub message: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LogsPayload {
    #[serde(default)]
    pub logs: Vec<LogEntry>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct TierHealth {
    #[serde(default)]
    pub health: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct NeuralHealthLevels {
    #[serde(rename = "L1_Brainstem", default)]
    pub brainstem: TierHealth,
    #[serde(rename = "L2_Limbic", default)]
    pub limbic: TierHealth,
    #[serde(rename = "L3_Neocortex", default)]
    pub neocortex: TierHealth,
    #[serde(rename = "L4_NeuroNet", default)]
    pub neuronet: TierHealth,
}

impl NeuralHealthLevels {
    pub fn by_tier(&self, tier: RoutingTier) -> &TierHealth {
        match tier {
            RoutingTier::L1 => &self.brainstem,
            RoutingTier::L2 => &self.limbic,
            RoutingTier::L3 => &self.neocortex,
            RoutingTier::L4 => &self.neuronet,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct NeuralHealthPayload {
    #[serde(default)]
    pub neural_levels: NeuralHealthLevels,
    #[serde(default)]
    pub average_health: f64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ApiCallCounters {
    #[serde(default)]
    pub total: u64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct LevelAggregates {
    #[serde(default)]
    pub avg: f64,
}

/// 神经流推送的全量快照；每条消息整体替换上一条。
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct StreamSnapshot {
    #[serde(default)]
    pub api_calls: ApiCallCounters,
    #[serde(default)]
    pub levels: LevelAggregates,
}

/// "99.5%" 之类的后端字符串转为数值。
pub fn parse_percent(value: &str) -> Option<f64> {
    value.trim().trim_end_matches('%').trim().parse::<f64>().ok()
}

/// RFC 3339 时间戳的时钟展示；解析失败时原样返回。
pub fn fmt_clock(timestamp: &str) -> String {
    match OffsetDateTime::parse(timestamp, &Rfc3339) {
        Ok(dt) => format!("{:02}:{:02}:{:02}", dt.hour(), dt.minute(), dt.second()),
        Err(_) => timestamp.to_string(),
    }
}

pub fn fmt_date(timestamp: &str) -> String {
    match OffsetDateTime::parse(timestamp, &Rfc3339) {
        Ok(dt) => format!("{:04}-{:02}-{:02}", dt.year(), u8::from(dt.month()), dt.day()),
        Err(_) => timestamp.to_string(),
    }
}

pub fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| String::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alerts_payload_matches_wire_shape() {
        let body = serde_json::json!({
            "alerts": [{
                "id": 7,
                "alert_id": "alt-7",
                "timestamp": "2026-08-06T02:10:00Z",
                "level": "critical",
                "title": "L3 延迟超标",
                "message": "新皮质层平均延迟超过阈值",
                "source": "latency-watchdog",
                "component": "neocortex",
                "resolved": false,
                "resolved_at": null
            }],
            "unresolved_count": 1,
            "critical_count": 1
        });

        let payload: AlertsPayload = serde_json::from_value(body).unwrap();
        assert_eq!(payload.alerts.len(), 1);
        assert_eq!(payload.alerts[0].level, AlertLevel::Critical);
        assert!(!payload.alerts[0].resolved);
        assert_eq!(payload.unresolved_count, 1);
    }

    #[test]
    fn policies_payload_matches_wire_shape() {
        let body = serde_json::json!({
            "policies": [{
                "id": 1,
                "policy_id": "pol-balanced",
                "policy_name": "均衡路由",
                "status": "backup",
                "version": "2.4.0",
                "expected_performance": 92.0,
                "actual_performance": null,
                "degradation_threshold": 5.0,
                "created_at": "2026-08-01T00:00:00Z"
            }],
            "active_policy": "pol-latency",
            "backup_policies": ["pol-balanced"]
        });

        let payload: PoliciesPayload = serde_json::from_value(body).unwrap();
        assert_eq!(payload.policies[0].status, PolicyStatus::Backup);
        assert!(payload.policies[0].performance_delta().is_none());
        assert_eq!(payload.active_policy.as_deref(), Some("pol-latency"));
    }

    #[test]
    fn neural_health_payload_reads_nested_tiers() {
        let body = serde_json::json!({
            "neural_levels": {
                "L1_Brainstem": {"health": 0.95},
                "L2_Limbic": {"health": 0.93},
                "L3_Neocortex": {"health": 0.94},
                "L4_NeuroNet": {"health": 0.98}
            },
            "average_health": 0.95
        });

        let payload: NeuralHealthPayload = serde_json::from_value(body).unwrap();
        assert_eq!(payload.neural_levels.by_tier(RoutingTier::L4).health, 0.98);
        assert_eq!(payload.average_health, 0.95);
    }

    #[test]
    fn stream_snapshot_reads_push_shape() {
        let snapshot: StreamSnapshot =
            serde_json::from_str(r#"{"api_calls":{"total":1024},"levels":{"avg":0.94}}"#).unwrap();
        assert_eq!(snapshot.api_calls.total, 1024);
        assert_eq!(snapshot.levels.avg, 0.94);
    }

    #[test]
    fn selected_models_serializes_exactly_four_tier_keys() {
        let value = serde_json::to_value(SelectedModels::default()).unwrap();
        let map = value.as_object().unwrap();
        assert_eq!(map.len(), 4);
        for tier in RoutingTier::ALL {
            assert!(map.contains_key(tier.key()), "missing {}", tier.key());
        }
    }

    #[test]
    fn percent_strings_parse_leniently() {
        assert_eq!(parse_percent("99.5%"), Some(99.5));
        assert_eq!(parse_percent(" 87 % "), Some(87.0));
        assert_eq!(parse_percent("n/a"), None);
    }

    #[test]
    fn clock_formatting_falls_back_to_raw() {
        assert_eq!(fmt_clock("2026-08-06T02:10:09Z"), "02:10:09");
        assert_eq!(fmt_clock("not-a-time"), "not-a-time");
        assert_eq!(fmt_date("2026-08-06T02:10:09Z"), "2026-08-06");
    }
}
