use dioxus::prelude::*;

use crate::hooks::models::{use_model_catalog, use_selection_saver};
use crate::models::{Model, ModelStatus, RoutingTier};
use crate::state::{use_app_actions, use_app_state};

fn status_badge_class(status: ModelStatus) -> &'static str {
    match status {
        ModelStatus::Operational => "rounded-full bg-emerald-500 px-2 py-0.5 text-[11px] font-semibold text-white",
        ModelStatus::Degraded => "rounded-full bg-amber-500 px-2 py-0.5 text-[11px] font-semibold text-white",
        ModelStatus::Down => "rounded-full bg-red-500 px-2 py-0.5 text-[11px] font-semibold text-white",
    }
}

fn score_bar_class(score: f64) -> &'static str {
    if score >= 9.0 {
        "h-full rounded bg-emerald-500"
    } else if score >= 8.0 {
        "h-full rounded bg-sky-500"
    } else if score >= 7.0 {
        "h-full rounded bg-amber-500"
    } else {
        "h-full rounded bg-red-500"
    }
}

#[component]
pub fn ModelSelectorPanel() -> Element {
    use_model_catalog();
    let saver = use_selection_saver();

    let app_state = use_app_state();
    let model_state = app_state.read().models.clone();

    if model_state.is_loading && model_state.models.is_empty() {
        return rsx! {
            section { class: "space-y-3",
                h2 { class: "text-lg font-semibold text-slate-900", "模型选择器" }
                p { class: "p-4 text-center text-xs text-slate-500", "正在加载模型列表..." }
            }
        };
    }

    rsx! {
        section { class: "space-y-3",
            header { class: "flex flex-col gap-1",
                h2 { class: "text-lg font-semibold text-slate-900", "模型选择器" }
                p { class: "text-xs text-slate-500", "为每个路由层级指定模型；选择仅保存在浏览器本地。" }
            }

            if let Some(ref error) = model_state.error {
                div { class: "rounded-lg border border-red-300 bg-red-50 p-3 text-xs text-red-700",
                    "{error}"
                }
            }

            if model_state.saved {
                div { class: "rounded-lg border border-emerald-300 bg-emerald-50 p-3 text-xs text-emerald-700",
                    "选择已保存"
                }
            }

            div { class: "grid gap-3 md:grid-cols-2",
                for tier in RoutingTier::ALL {
                    {
                        let tier_key = tier.key();
                        rsx! {
                            TierCard { key: "{tier_key}", tier }
                        }
                    }
                }
            }

            button {
                class: "w-full rounded bg-slate-900 px-4 py-2 text-sm font-semibold text-white hover:bg-slate-800",
                onclick: move |_| (saver.save)(),
                "保存选择"
            }
        }
    }
}

#[component]
fn TierCard(tier: RoutingTier) -> Element {
    let actions = use_app_actions();
    let app_state = use_app_state();
    let model_state = app_state.read().models.clone();

    let current = model_state.selected.get(tier).to_string();
    let detail = model_state.find_selected(tier).cloned();
    let tier_title = format!("{} {}", tier.key(), tier.label());

    rsx! {
        div { class: "space-y-3 rounded-lg border border-slate-200 bg-white p-4 shadow-sm",
            p { class: "text-sm font-semibold text-slate-800", "{tier_title}" }

            select {
                class: "w-full cursor-pointer rounded border border-slate-300 px-2 py-1.5 text-sm",
                value: "{current}",
                onchange: move |evt| actions.select_model(tier, evt.value()),
                for model in model_state.models.iter() {
                    option {
                        key: "{model.id}",
                        value: "{model.name}",
                        selected: model.name == current,
                        "{model.name}"
                    }
                }
            }

            if let Some(model) = detail {
                ModelDetail { model, tier }
            } else {
                p { class: "text-[11px] italic text-slate-400", "所选模型不在当前列表中" }
            }
        }
    }
}

#[component]
fn ModelDetail(model: Model, tier: RoutingTier) -> Element {
    let tier_score = tier.score_of(&model);
    let score_pct = (tier_score / 10.0 * 100.0).clamp(0.0, 100.0);
    let badge = status_badge_class(model.status);
    let bar = score_bar_class(tier_score);
    let status_label = model.status.label();

    rsx! {
        div { class: "space-y-2 text-xs text-slate-600",
            div { class: "flex items-center justify-between",
                span { "状态" }
                span { class: badge, "{status_label}" }
            }
            div { class: "flex items-center justify-between",
                span { "成功率" }
                span { {format!("{:.1}%", model.success_rate)} }
            }
            div { class: "h-1.5 w-full overflow-hidden rounded bg-slate-200",
                div { class: bar, style: "width: {score_pct}%" }
            }
            div { class: "flex items-center justify-between",
                span { "平均延迟" }
                span { {format!("{:.0}ms", model.avg_latency)} }
            }
            div { class: "grid grid-cols-2 gap-1 text-[11px] text-slate-500",
                span { {format!("L1: {:.1}", model.l1_score)} }
                span { {format!("L3: {:.1}", model.l3_score)} }
                span { {format!("L2: {:.1}", model.l2_score)} }
                span { {format!("L4: {:.1}", model.l4_score)} }
            }
        }
    }
}
