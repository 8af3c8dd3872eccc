use dioxus::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::{
    Alert, AlertLevel, AlertsPayload, LogEntry, Model, ModelsPayload, NeuralHealthPayload,
    NeuralStatus, PerformanceOverview, PoliciesPayload, Policy, PolicyStatus, RoutingTier,
    SelectedModels, StreamSnapshot,
};

pub type AppSignal = Signal<AppState>;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActiveTab {
    #[default]
    Overview,
    Models,
    Policies,
    Alerts,
}

impl ActiveTab {
    pub const ALL: [ActiveTab; 4] = [
        ActiveTab::Overview,
        ActiveTab::Models,
        ActiveTab::Policies,
        ActiveTab::Alerts,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Overview => "总览",
            Self::Models => "模型",
            Self::Policies => "策略",
            Self::Alerts => "告警",
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AlertState {
    pub alerts: Vec<Alert>,
    pub unresolved_count: u32,
    pub critical_count: u32,
    pub is_loading: bool,
    pub error: Option<String>,
    /// None 表示不按级别过滤。
    pub level_filter: Option<AlertLevel>,
    pub show_resolved: bool,
}

impl AlertState {
    /// 每次轮询整体替换，服务端数据为准（last-fetch-wins）。
    pub fn apply_payload(&mut self, payload: AlertsPayload) {
        self.alerts = payload.alerts;
        self.unresolved_count = payload.unresolved_count;
        self.critical_count = payload.critical_count;
        self.is_loading = false;
        self.error = None;
    }

    /// 级别过滤 + 已解决开关：开启时只看已解决，关闭时只看未解决。
    pub fn filtered(&self) -> Vec<&Alert> {
        filter_alerts(&self.alerts, self.level_filter, self.show_resolved)
    }

    /// 本地乐观解决；未发起网络请求，下次轮询以服务端为准。
    // TODO: 后端补齐 PATCH /api/alerts/{id}/resolve 后，这里改为先调接口再落本地。
    pub fn resolve_local(&mut self, alert_id: &str, resolved_at: String) -> bool {
        let Some(alert) = self
            .alerts
            .iter_mut()
            .find(|alert| alert.alert_id == alert_id)
        else {
            return false;
        };

        if alert.resolved {
            return false;
        }

        alert.resolved = true;
        alert.resolved_at = Some(resolved_at);
        self.unresolved_count = self.unresolved_count.saturating_sub(1);
        true
    }
}

pub fn filter_alerts<'a>(
    alerts: &'a [Alert],
    level: Option<AlertLevel>,
    show_resolved: bool,
) -> Vec<&'a Alert> {
    alerts
        .iter()
        .filter(|alert| {
            let level_match = level.map(|wanted| alert.level == wanted).unwrap_or(true);
            let resolved_match = if show_resolved {
                alert.resolved
            } else {
                !alert.resolved
            };
            level_match && resolved_match
        })
        .collect()
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ModelState {
    pub models: Vec<Model>,
    pub selected: SelectedModels,
    pub is_loading: bool,
    pub error: Option<String>,
    /// 保存后的瞬时标记，3 秒后自动清除。
    pub saved: bool,
}

impl ModelState {
    pub fn apply_payload(&mut self, payload: ModelsPayload) {
        self.models = payload.models;
        self.is_loading = false;
        self.error = None;
    }

    pub fn select(&mut self, tier: RoutingTier, name: String) {
        self.selected.set(tier, name);
        self.saved = false;
    }

    pub fn find_selected(&self, tier: RoutingTier) -> Option<&Model> {
        let wanted = self.selected.get(tier);
        self.models.iter().find(|model| model.name == wanted)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PolicyState {
    pub policies: Vec<Policy>,
    pub active_policy: Option<String>,
    pub backup_policies: Vec<String>,
    pub is_loading: bool,
    /// 部署中的 policy_id；仅该策略的按钮被禁用。
    pub deploying: Option<String>,
    pub error: Option<String>,
    /// 部署成功的瞬时横幅，3 秒后自动清除。
    pub notice: Option<String>,
}

impl PolicyState {
    pub fn apply_payload(&mut self, payload: PoliciesPayload) {
        self.policies = payload.policies;
        self.active_policy = payload.active_policy;
        self.backup_policies = payload.backup_policies;
        self.is_loading = false;
        self.error = None;
    }

    /// 部署应答成功后的乐观标记；列表随后重新拉取对账。
    pub fn mark_active(&mut self, policy_id: &str) {
        self.active_policy = Some(policy_id.to_string());
        if let Some(policy) = self
            .policies
            .iter_mut()
            .find(|policy| policy.policy_id == policy_id)
        {
            policy.status = PolicyStatus::Active;
        }
    }

    pub fn active_record(&self) -> Option<&Policy> {
        let active = self.active_policy.as_deref()?;
        self.policies
            .iter()
            .find(|policy| policy.policy_id == active)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct OverviewState {
    pub neural: Option<NeuralStatus>,
    pub performance: Option<PerformanceOverview>,
    pub logs: Vec<LogEntry>,
    pub health: Option<NeuralHealthPayload>,
    pub is_loading: bool,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StreamState {
    pub is_connected: bool,
    pub snapshot: Option<StreamSnapshot>,
    pub error: Option<String>,
}

impl StreamState {
    /// 每条推送整体替换，不做合并（last message wins）。
    pub fn replace(&mut self, snapshot: StreamSnapshot) {
        self.snapshot = Some(snapshot);
        self.error = None;
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppState {
    pub active_tab: ActiveTab,
    pub alerts: AlertState,
    pub models: ModelState,
    pub policies: PolicyState,
    pub overview: OverviewState,
    pub stream: StreamState,
}

#[derive(Clone)]
pub struct AppActions {
    state: AppSignal,
}

impl AppActions {
    pub fn set_active_tab(&self, tab: ActiveTab) {
        let mut state = self.state;
        state.write().active_tab = tab;
    }

    pub fn set_alerts_loading(&self, loading: bool) {
        let mut state = self.state;
        state.write().alerts.is_loading = loading;
    }

    pub fn set_alerts_error(&self, message: Option<String>) {
        let mut state = self.state;
        let mut app = state.write();
        app.alerts.error = message;
        app.alerts.is_loading = false;
    }

    pub fn apply_alerts_payload(&self, payload: AlertsPayload) {
        let mut state = self.state;
        state.write().alerts.apply_payload(payload);
    }

    pub fn set_alert_level_filter(&self, level: Option<AlertLevel>) {
        let mut state = self.state;
        state.write().alerts.level_filter = level;
    }

    pub fn toggle_show_resolved(&self) {
        let mut state = self.state;
        let mut app = state.write();
        app.alerts.show_resolved = !app.alerts.show_resolved;
    }

    pub fn resolve_alert_local(&self, alert_id: &str) {
        let mut state = self.state;
        state
            .write()
            .alerts
            .resolve_local(alert_id, crate::models::now_rfc3339());
    }

    pub fn set_models_loading(&self, loading: bool) {
        let mut state = self.state;
        state.write().models.is_loading = loading;
    }

    pub fn set_models_error(&self, message: Option<String>) {
        let mut state = self.state;
        let mut app = state.write();
        app.models.error = message;
        app.models.is_loading = false;
    }

    pub fn apply_models_payload(&self, payload: ModelsPayload) {
        let mut state = self.state;
        state.write().models.apply_payload(payload);
    }

    pub fn select_model(&self, tier: RoutingTier, name: String) {
        let mut state = self.state;
        state.write().models.select(tier, name);
    }

    pub fn restore_selection(&self, selected: SelectedModels) {
        let mut state = self.state;
        state.write().models.selected = selected;
    }

    pub fn set_models_saved(&self, saved: bool) {
        let mut state = self.state;
        state.write().models.saved = saved;
    }

    pub fn set_policies_loading(&self, loading: bool) {
        let mut state = self.state;
        state.write().policies.is_loading = loading;
    }

    pub fn set_policies_error(&self, message: Option<String>) {
        let mut state = self.state;
        let mut app = state.write();
        app.policies.error = message;
        app.policies.is_loading = false;
    }

    pub fn apply_policies_payload(&self, payload: PoliciesPayload) {
        let mut state = self.state;
        state.write().policies.apply_payload(payload);
    }

    pub fn begin_deploy(&self, policy_id: String) {
        let mut state = self.state;
        let mut app = state.write();
        app.policies.deploying = Some(policy_id);
        app.policies.error = None;
    }

    pub fn finish_deploy(&self) {
        let mut state = self.state;
        state.write().policies.deploying = None;
    }

    pub fn mark_policy_active(&self, policy_id: &str) {
        let mut state = self.state;
        state.write().policies.mark_active(policy_id);
    }

    pub fn set_policy_notice(&self, notice: Option<String>) {
        let mut state = self.state;
        state.write().policies.notice = notice;
    }

    pub fn set_overview_loading(&self, loading: bool) {
        let mut state = self.state;
        state.write().overview.is_loading = loading;
    }

    pub fn set_neural_status(&self, status: NeuralStatus) {
        let mut state = self.state;
        state.write().overview.neural = Some(status);
    }

    pub fn set_performance_overview(&self, overview: PerformanceOverview) {
        let mut state = self.state;
        state.write().overview.performance = Some(overview);
    }

    pub fn set_logs(&self, logs: Vec<LogEntry>) {
        let mut state = self.state;
        state.write().overview.logs = logs;
    }

    pub fn set_neural_health(&self, health: NeuralHealthPayload) {
        let mut state = self.state;
        state.write().overview.health = Some(health);
    }

    pub fn set_stream_connected(&self, connected: bool) {
        let mut state = self.state;
        let mut app = state.write();
        app.stream.is_connected = connected;
        if connected {
            app.stream.error = None;
        }
    }

    pub fn set_stream_error(&self, message: Option<String>) {
        let mut state = self.state;
        let mut app = state.write();
        app.stream.error = message;
        app.stream.is_connected = false;
    }

    pub fn replace_stream_snapshot(&self, snapshot: StreamSnapshot) {
        let mut state = self.state;
        state.write().stream.replace(snapshot);
    }
}

pub fn use_app_state() -> AppSignal {
    use_context::<AppSignal>()
}

pub fn use_app_actions() -> AppActions {
    let state = use_app_state();
    AppActions { state }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::models::{ApiCallCounters, LevelAggregates};

    fn alert(alert_id: &str, level: AlertLevel, resolved: bool) -> Alert {
        Alert {
            id: 0,
            alert_id: alert_id.to_string(),
            timestamp: "2026-08-06T00:00:00Z".to_string(),
            level,
            title: format!("alert {alert_id}"),
            message: String::new(),
            source: "test".to_string(),
            component: "test".to_string(),
            resolved,
            resolved_at: resolved.then(|| "2026-08-06T00:01:00Z".to_string()),
        }
    }

    #[test]
    fn level_filter_returns_only_that_level() {
        let alerts = vec![
            alert("a", AlertLevel::Critical, false),
            alert("b", AlertLevel::Warning, false),
            alert("c", AlertLevel::Critical, false),
            alert("d", AlertLevel::Info, false),
        ];

        let filtered = filter_alerts(&alerts, Some(AlertLevel::Critical), false);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|a| a.level == AlertLevel::Critical));
    }

    #[test]
    fn resolved_toggle_selects_each_branch_explicitly() {
        let alerts = vec![
            alert("open", AlertLevel::Info, false),
            alert("closed", AlertLevel::Info, true),
        ];

        let unresolved = filter_alerts(&alerts, None, false);
        assert_eq!(unresolved.len(), 1);
        assert_eq!(unresolved[0].alert_id, "open");

        let resolved = filter_alerts(&alerts, None, true);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].alert_id, "closed");
    }

    #[test]
    fn critical_filter_with_resolved_hidden_keeps_open_critical_only() {
        let alerts = vec![
            alert("first", AlertLevel::Critical, false),
            alert("second", AlertLevel::Info, true),
        ];

        let filtered = filter_alerts(&alerts, Some(AlertLevel::Critical), false);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].alert_id, "first");
    }

    #[test]
    fn resolve_never_drives_counter_below_zero() {
        let mut state = AlertState::default();
        state.alerts = vec![alert("a", AlertLevel::Warning, false)];
        state.unresolved_count = 0;

        assert!(state.resolve_local("a", "2026-08-06T00:02:00Z".to_string()));
        assert_eq!(state.unresolved_count, 0);

        // 重复解决同一条不再计数，也不再改写 resolved_at。
        assert!(!state.resolve_local("a", "2026-08-06T00:03:00Z".to_string()));
        assert_eq!(
            state.alerts[0].resolved_at.as_deref(),
            Some("2026-08-06T00:02:00Z")
        );
    }

    #[test]
    fn resolve_decrements_once_per_alert() {
        let mut state = AlertState::default();
        state.apply_payload(fixtures::sample_alerts_payload());
        let before = state.unresolved_count;

        assert!(state.resolve_local("alt-latency", "2026-08-06T00:02:00Z".to_string()));
        assert_eq!(state.unresolved_count, before - 1);
        assert!(!state.resolve_local("no-such-id", "2026-08-06T00:02:00Z".to_string()));
        assert_eq!(state.unresolved_count, before - 1);
    }

    #[test]
    fn poll_overwrites_optimistic_resolution() {
        let mut state = AlertState::default();
        state.apply_payload(fixtures::sample_alerts_payload());
        state.resolve_local("alt-latency", "2026-08-06T00:02:00Z".to_string());

        // 服务端仍认为未解决；下一次轮询覆盖本地乐观值。
        state.apply_payload(fixtures::sample_alerts_payload());
        let record = state
            .alerts
            .iter()
            .find(|a| a.alert_id == "alt-latency")
            .unwrap();
        assert!(!record.resolved);
    }

    #[test]
    fn selection_always_keeps_four_tiers() {
        let mut state = ModelState::default();
        state.apply_payload(fixtures::sample_models_payload());
        state.select(RoutingTier::L2, "DeepSeek".to_string());

        for tier in RoutingTier::ALL {
            assert!(!state.selected.get(tier).is_empty());
        }
        assert_eq!(state.selected.get(RoutingTier::L2), "DeepSeek");
        assert!(!state.saved);
    }

    #[test]
    fn failed_deploy_leaves_previous_active_untouched() {
        let mut state = PolicyState::default();
        state.apply_payload(fixtures::sample_policies_payload());
        let active_before = state.active_record().cloned().unwrap();

        // 失败路径只记录错误，不触发 mark_active。
        state.error = Some("策略部署失败".to_string());

        let active_after = state.active_record().cloned().unwrap();
        assert_eq!(active_before.policy_id, active_after.policy_id);
        assert_eq!(active_before.status, active_after.status);
    }

    #[test]
    fn successful_deploy_marks_target_active_optimistically() {
        let mut state = PolicyState::default();
        state.apply_payload(fixtures::sample_policies_payload());

        state.mark_active("pol-balanced");
        assert_eq!(state.active_policy.as_deref(), Some("pol-balanced"));
        assert_eq!(
            state.active_record().unwrap().status,
            PolicyStatus::Active
        );
    }

    #[test]
    fn stream_snapshot_replaces_not_merges() {
        let mut state = StreamState::default();
        state.replace(StreamSnapshot {
            api_calls: ApiCallCounters { total: 10 },
            levels: LevelAggregates { avg: 0.9 },
        });
        state.replace(StreamSnapshot {
            api_calls: ApiCallCounters { total: 3 },
            levels: LevelAggregates::default(),
        });

        let snapshot = state.snapshot.as_ref().unwrap();
        assert_eq!(snapshot.api_calls.total, 3);
        assert_eq!(snapshot.levels.avg, 0.0);
    }
}
