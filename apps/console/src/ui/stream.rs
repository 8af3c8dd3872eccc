use dioxus::prelude::*;

use crate::state::use_app_state;
use crate::APP_CONFIG;

/// 右侧实时统计卡：数据全部来自 neural_stream 推送，最后一条为准。
#[component]
pub fn StreamStatsPanel() -> Element {
    let app_state = use_app_state();
    let stream = app_state.read().stream.clone();

    let (dot_class, dot_label) = if stream.is_connected {
        ("h-2 w-2 rounded-full bg-emerald-500", "已连接")
    } else {
        ("h-2 w-2 rounded-full bg-slate-400", "未连接")
    };

    let api_calls = stream
        .snapshot
        .as_ref()
        .map(|snapshot| snapshot.api_calls.total.to_string())
        .unwrap_or_else(|| "-".to_string());
    let avg_health = stream
        .snapshot
        .as_ref()
        .map(|snapshot| format!("{:.1}%", snapshot.levels.avg * 100.0))
        .unwrap_or_else(|| "-".to_string());

    let profile = APP_CONFIG
        .get()
        .map(|config| format!("{:?}", config.profile))
        .unwrap_or_else(|| "-".to_string());
    let endpoint = APP_CONFIG
        .get()
        .map(|config| config.api_base_url.clone())
        .unwrap_or_else(|| "未配置".to_string());

    rsx! {
        aside { class: "space-y-3",
            div { class: "space-y-2 rounded-lg border border-slate-200 bg-white p-4 shadow-sm",
                div { class: "flex items-center justify-between",
                    h3 { class: "text-sm font-semibold text-slate-900", "实时统计" }
                    div { class: "flex items-center gap-1.5",
                        span { class: dot_class }
                        span { class: "text-[11px] text-slate-500", "{dot_label}" }
                    }
                }
                div { class: "flex items-center justify-between text-xs text-slate-600",
                    span { "API 调用" }
                    span { class: "font-semibold text-slate-900", "{api_calls}" }
                }
                div { class: "flex items-center justify-between text-xs text-slate-600",
                    span { "神经健康度" }
                    span { class: "font-semibold text-slate-900", "{avg_health}" }
                }
            }

            div { class: "space-y-1 rounded-lg border border-slate-200 bg-white p-4 text-xs text-slate-600 shadow-sm",
                h3 { class: "text-sm font-semibold text-slate-900", "控制台信息" }
                p { "Profile {profile}" }
                p { class: "break-all", "API {endpoint}" }
            }
        }
    }
}
