use dioxus::prelude::*;

use crate::models::{fmt_clock, parse_percent, RoutingTier};
use crate::state::use_app_state;

#[component]
pub fn OverviewPanel() -> Element {
    let app_state = use_app_state();
    let overview = app_state.read().overview.clone();

    if overview.is_loading && overview.neural.is_none() {
        return rsx! {
            section { class: "space-y-3",
                h2 { class: "text-lg font-semibold text-slate-900", "神经系统状态" }
                p { class: "p-4 text-center text-xs text-slate-500", "正在加载..." }
            }
        };
    }

    rsx! {
        section { class: "space-y-4",
            div { class: "space-y-2",
                h2 { class: "text-lg font-semibold text-slate-900", "神经系统状态" }
                NeuralMonitor {}
            }
            div { class: "space-y-2",
                h2 { class: "text-lg font-semibold text-slate-900", "性能指标" }
                PerformanceChart {}
            }
            div { class: "space-y-2",
                h2 { class: "text-lg font-semibold text-slate-900", "实时日志" }
                LogViewer {}
            }
        }
    }
}

#[component]
fn NeuralMonitor() -> Element {
    let app_state = use_app_state();
    let overview = app_state.read().overview.clone();

    let Some(neural) = overview.neural else {
        return rsx! {
            p { class: "text-xs italic text-slate-400", "暂无神经系统数据" }
        };
    };

    rsx! {
        div { class: "grid grid-cols-2 gap-3 md:grid-cols-4",
            for tier in RoutingTier::ALL {
                {
                    let assigned = neural
                        .neural_levels
                        .get(tier.key())
                        .cloned()
                        .unwrap_or_else(|| "-".to_string());
                    let health_pct = overview
                        .health
                        .as_ref()
                        .map(|payload| {
                            (payload.neural_levels.by_tier(tier).health * 100.0).clamp(0.0, 100.0)
                        });
                    let tier_key = tier.key();
                    let tier_label = tier.label();
                    rsx! {
                        div {
                            key: "{tier_key}",
                            class: "space-y-1 rounded-lg border-2 border-sky-500 bg-sky-50 p-3 text-center",
                            p { class: "text-xs text-slate-500", "{tier_key}" }
                            p { class: "text-base font-semibold text-sky-900", "{assigned}" }
                            p { class: "text-[10px] text-slate-400", "{tier_label}" }
                            if let Some(pct) = health_pct {
                                div { class: "h-1 w-full overflow-hidden rounded bg-slate-200",
                                    div { class: "h-full rounded bg-sky-500", style: "width: {pct}%" }
                                }
                                p { class: "text-[10px] text-slate-500", {format!("健康度 {pct:.0}%")} }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn PerformanceChart() -> Element {
    let app_state = use_app_state();
    let overview = app_state.read().overview.clone();

    let Some(performance) = overview.performance else {
        return rsx! {
            p { class: "text-xs italic text-slate-400", "暂无性能数据" }
        };
    };

    let availability = parse_percent(&performance.availability).unwrap_or_default();
    let metrics: Vec<(&'static str, f64, String)> = vec![
        ("可用性", availability, format!("{availability:.1}%")),
        (
            "Token 效率",
            performance.token_efficiency * 100.0,
            format!("{:.1}%", performance.token_efficiency * 100.0),
        ),
        (
            "平均延迟",
            performance.avg_latency_ms,
            format!("{:.1}ms", performance.avg_latency_ms),
        ),
        (
            "可用模型",
            f64::from(performance.models_operational),
            format!(
                "{}/{}",
                performance.models_operational, performance.total_models
            ),
        ),
    ];

    rsx! {
        div { class: "grid grid-cols-2 gap-3 md:grid-cols-4",
            for (label, value, display) in metrics {
                {
                    let bar_pct = value.clamp(0.0, 100.0);
                    rsx! {
                        div { key: "{label}", class: "space-y-1 rounded-lg border border-slate-200 bg-white p-3",
                            p { class: "text-xs text-slate-500", "{label}" }
                            p { class: "text-lg font-semibold text-slate-900", "{display}" }
                            div { class: "h-1 w-full overflow-hidden rounded bg-slate-200",
                                div { class: "h-full rounded bg-sky-500", style: "width: {bar_pct}%" }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn log_line_class(level: &str) -> &'static str {
    match level {
        "warning" => "text-amber-400",
        "error" => "text-red-400",
        "debug" => "text-violet-400",
        _ => "text-sky-300",
    }
}

#[component]
fn LogViewer() -> Element {
    let app_state = use_app_state();
    let logs = app_state.read().overview.logs.clone();

    rsx! {
        div { class: "max-h-52 space-y-0.5 overflow-y-auto rounded-lg bg-slate-800 p-3 font-mono text-[11px] text-slate-200",
            if logs.is_empty() {
                p { class: "text-slate-500", "暂无日志" }
            } else {
                for log in logs.iter() {
                    {
                        let line_class = log_line_class(&log.level);
                        let line = format!(
                            "[{}] [{}] {}: {}",
                            fmt_clock(&log.timestamp),
                            log.level.to_uppercase(),
                            log.component,
                            log.message
                        );
                        rsx! {
                            p { key: "{log.id}", class: line_class, "{line}" }
                        }
                    }
                }
            }
        }
    }
}
