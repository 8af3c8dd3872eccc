use dioxus::prelude::*;

use crate::hooks::alerts::use_alert_feed;
use crate::models::{fmt_clock, Alert, AlertLevel};
use crate::state::{use_app_actions, use_app_state};

fn level_card_class(level: AlertLevel) -> &'static str {
    match level {
        AlertLevel::Info => "rounded-lg border border-sky-300 bg-sky-50 p-3 space-y-2",
        AlertLevel::Warning => "rounded-lg border border-amber-300 bg-amber-50 p-3 space-y-2",
        AlertLevel::Critical => "rounded-lg border border-red-300 bg-red-50 p-3 space-y-2",
    }
}

fn level_text_class(level: AlertLevel) -> &'static str {
    match level {
        AlertLevel::Info => "text-sky-700",
        AlertLevel::Warning => "text-amber-700",
        AlertLevel::Critical => "text-red-700",
    }
}

#[component]
pub fn AlertPanel() -> Element {
    use_alert_feed();

    let actions = use_app_actions();
    let app_state = use_app_state();
    let alerts_state = app_state.read().alerts.clone();

    let filtered: Vec<Alert> = alerts_state
        .filtered()
        .into_iter()
        .cloned()
        .collect();

    let total = alerts_state.alerts.len();
    let critical_total = alerts_state
        .alerts
        .iter()
        .filter(|alert| alert.level == AlertLevel::Critical)
        .count();
    let warning_total = alerts_state
        .alerts
        .iter()
        .filter(|alert| alert.level == AlertLevel::Warning)
        .count();
    let resolved_total = alerts_state
        .alerts
        .iter()
        .filter(|alert| alert.resolved)
        .count();

    let empty_hint = if alerts_state.show_resolved {
        "暂无已解决的告警"
    } else {
        "暂无活跃告警"
    };

    let mut level_chips: Vec<(Option<AlertLevel>, &'static str)> = vec![(None, "全部")];
    for level in AlertLevel::ALL {
        level_chips.push((Some(level), level.label()));
    }

    let toggle_actions = actions.clone();

    rsx! {
        section { class: "space-y-3",
            header { class: "flex items-center justify-between",
                div { class: "flex flex-col gap-1",
                    h2 { class: "text-lg font-semibold text-slate-900", "系统告警" }
                    p { class: "text-xs text-slate-500", "告警由服务端产生；本地解决为乐观操作，下次轮询以服务端为准。" }
                }
                div { class: "flex gap-2 text-xs",
                    span { class: "rounded-full bg-red-600 px-3 py-1 font-semibold text-white",
                        "{alerts_state.critical_count} 紧急"
                    }
                    span { class: "rounded-full bg-amber-500 px-3 py-1 font-semibold text-white",
                        "{alerts_state.unresolved_count} 未解决"
                    }
                }
            }

            div { class: "flex flex-wrap gap-2",
                for (value, label) in level_chips {
                    {
                        let is_active = alerts_state.level_filter == value;
                        let chip_actions = actions.clone();
                        let chip_class = if is_active {
                            "rounded-full bg-slate-900 px-3 py-1 text-xs font-semibold text-white"
                        } else {
                            "rounded-full border border-slate-300 px-3 py-1 text-xs text-slate-600 hover:border-slate-500"
                        };
                        rsx! {
                            button {
                                key: "{label}",
                                class: chip_class,
                                onclick: move |_| chip_actions.set_alert_level_filter(value),
                                "{label}"
                            }
                        }
                    }
                }

                button {
                    class: if alerts_state.show_resolved {
                        "rounded-full border-2 border-emerald-500 bg-emerald-50 px-3 py-1 text-xs font-semibold text-emerald-700"
                    } else {
                        "rounded-full border border-slate-300 px-3 py-1 text-xs text-slate-600 hover:border-slate-500"
                    },
                    onclick: move |_| toggle_actions.toggle_show_resolved(),
                    "显示已解决"
                }
            }

            div { class: "max-h-[32rem] space-y-2 overflow-y-auto",
                if alerts_state.is_loading && alerts_state.alerts.is_empty() {
                    p { class: "p-4 text-center text-xs text-slate-500", "正在加载告警..." }
                } else if filtered.is_empty() {
                    p { class: "p-4 text-center text-xs text-slate-500 italic", "{empty_hint}" }
                } else {
                    for alert in filtered {
                        AlertCard { key: "{alert.alert_id}", alert: alert.clone() }
                    }
                }
            }

            footer { class: "grid grid-cols-2 gap-3 border-t border-slate-200 pt-3 text-xs text-slate-600 md:grid-cols-4",
                div {
                    p { class: "font-semibold text-slate-900", "{total}" }
                    p { "总告警" }
                }
                div {
                    p { class: "font-semibold text-red-600", "{critical_total}" }
                    p { "紧急" }
                }
                div {
                    p { class: "font-semibold text-amber-600", "{warning_total}" }
                    p { "警告" }
                }
                div {
                    p { class: "font-semibold text-emerald-600", "{resolved_total}" }
                    p { "已解决" }
                }
            }
        }
    }
}

#[component]
fn AlertCard(alert: Alert) -> Element {
    let actions = use_app_actions();

    let card_class = level_card_class(alert.level);
    let accent = level_text_class(alert.level);
    let opacity = if alert.resolved { "opacity-60" } else { "" };
    let clock = fmt_clock(&alert.timestamp);
    let alert_id = alert.alert_id.clone();

    rsx! {
        div { class: "{card_class} {opacity}",
            div { class: "flex items-start justify-between",
                div {
                    p { class: "text-sm font-semibold {accent}", "{alert.title}" }
                    p { class: "text-[11px] text-slate-500", "{clock}" }
                }
                if !alert.resolved {
                    button {
                        class: "rounded border border-slate-400 px-2 py-1 text-[11px] text-slate-600 hover:bg-slate-100",
                        onclick: move |_| actions.resolve_alert_local(&alert_id),
                        "标记解决"
                    }
                }
            }
            p { class: "text-xs text-slate-700", "{alert.message}" }
            div { class: "flex flex-wrap gap-3 text-[11px] text-slate-500",
                span { "来源 {alert.source}" }
                span { "组件 {alert.component}" }
                if let Some(ref resolved_at) = alert.resolved_at {
                    {
                        let resolved_clock = fmt_clock(resolved_at);
                        rsx! {
                            span { class: "text-emerald-600", "解决于 {resolved_clock}" }
                        }
                    }
                }
            }
        }
    }
}
