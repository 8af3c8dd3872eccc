use dioxus::prelude::*;

use crate::hooks::policies::{use_policy_deployer, use_policy_roster};
use crate::models::{fmt_clock, fmt_date, Policy, PolicyStatus};
use crate::state::use_app_state;

fn status_badge_class(status: PolicyStatus) -> &'static str {
    match status {
        PolicyStatus::Active => "rounded-full bg-emerald-500 px-3 py-0.5 text-[11px] font-semibold text-white",
        PolicyStatus::Inactive => "rounded-full bg-slate-400 px-3 py-0.5 text-[11px] font-semibold text-white",
        PolicyStatus::Backup => "rounded-full bg-sky-500 px-3 py-0.5 text-[11px] font-semibold text-white",
        PolicyStatus::Rollback => "rounded-full bg-red-500 px-3 py-0.5 text-[11px] font-semibold text-white",
    }
}

#[component]
pub fn PolicyPanel() -> Element {
    use_policy_roster();
    let deployer = use_policy_deployer();

    let app_state = use_app_state();
    let policy_state = app_state.read().policies.clone();

    if policy_state.is_loading && policy_state.policies.is_empty() {
        return rsx! {
            section { class: "space-y-3",
                h2 { class: "text-lg font-semibold text-slate-900", "策略管理" }
                p { class: "p-4 text-center text-xs text-slate-500", "正在加载策略..." }
            }
        };
    }

    let active = policy_state.active_record().cloned();
    let deploying = policy_state.deploying.clone();
    let backup_list = policy_state.backup_policies.join("、");
    let deploy = std::rc::Rc::new(deployer.deploy);

    rsx! {
        section { class: "space-y-3",
            header { class: "flex flex-col gap-1",
                h2 { class: "text-lg font-semibold text-slate-900", "策略管理" }
                p { class: "text-xs text-slate-500", "部署后立即重新拉取列表，与服务端对账。" }
            }

            if let Some(ref error) = policy_state.error {
                div { class: "rounded-lg border border-red-300 bg-red-50 p-3 text-xs text-red-700",
                    "{error}"
                }
            }

            if let Some(ref notice) = policy_state.notice {
                div { class: "rounded-lg border border-emerald-300 bg-emerald-50 p-3 text-xs text-emerald-700",
                    "{notice}"
                }
            }

            if let Some(policy) = active {
                {
                    let deployed_label = policy
                        .deployed_at
                        .as_deref()
                        .map(|ts| format!("部署于 {} {}", fmt_date(ts), fmt_clock(ts)));
                    rsx! {
                        div { class: "space-y-1 rounded-lg border-2 border-sky-500 bg-sky-50 p-4 text-xs text-sky-900",
                            p { class: "text-sm font-semibold", "当前活跃策略" }
                            p { "ID {policy.policy_id}" }
                            p { "名称 {policy.policy_name}" }
                            p { "版本 {policy.version}" }
                            if let Some(label) = deployed_label {
                                p { "{label}" }
                            }
                        }
                    }
                }
            }

            div { class: "grid gap-3 md:grid-cols-2 lg:grid-cols-3",
                for policy in policy_state.policies.iter() {
                    {
                        let deploy = deploy.clone();
                        rsx! {
                            PolicyCard {
                                key: "{policy.policy_id}",
                                policy: policy.clone(),
                                deploying: deploying.clone(),
                                on_deploy: move |policy_id: String| (deploy)(policy_id),
                            }
                        }
                    }
                }
            }

            if !policy_state.backup_policies.is_empty() {
                div { class: "rounded-lg bg-slate-100 p-3 text-xs text-slate-600",
                    p {
                        span { class: "font-semibold", "备份策略: " }
                        "{backup_list}"
                    }
                    p { class: "mt-1 text-[11px]", "性能低于回滚阈值时由服务端自动回滚" }
                }
            }
        }
    }
}

#[component]
fn PolicyCard(
    policy: Policy,
    deploying: Option<String>,
    on_deploy: EventHandler<String>,
) -> Element {
    let is_active = policy.status == PolicyStatus::Active;
    let in_flight = deploying.as_deref() == Some(policy.policy_id.as_str());
    let badge = status_badge_class(policy.status);
    let status_label = policy.status.label();
    let card_class = if is_active {
        "space-y-3 rounded-lg border-2 border-sky-500 bg-sky-50 p-4"
    } else {
        "space-y-3 rounded-lg border border-slate-200 bg-white p-4"
    };
    let policy_id = policy.policy_id.clone();

    rsx! {
        div { class: card_class,
            div { class: "flex items-start justify-between",
                div {
                    p { class: "text-sm font-semibold text-slate-900", "{policy.policy_name}" }
                    p { class: "text-[11px] text-slate-500", "{policy.policy_id}" }
                }
                span { class: badge, "{status_label}" }
            }

            if let Some(ref description) = policy.description {
                p { class: "border-b border-slate-200 pb-2 text-xs text-slate-600", "{description}" }
            }

            PerformanceComparison { policy: policy.clone() }

            div { class: "space-y-0.5 text-[11px] text-slate-500",
                p { "版本 {policy.version}" }
                p { {format!("回滚阈值 {:.1}%", policy.degradation_threshold)} }
                p { {format!("创建于 {}", fmt_date(&policy.created_at))} }
            }

            if is_active {
                div { class: "rounded bg-emerald-100 p-2 text-center text-xs font-semibold text-emerald-700",
                    "当前活跃"
                }
            } else {
                button {
                    class: if in_flight {
                        "w-full cursor-not-allowed rounded bg-slate-300 px-3 py-1.5 text-xs font-semibold text-white"
                    } else {
                        "w-full rounded bg-sky-600 px-3 py-1.5 text-xs font-semibold text-white hover:bg-sky-700"
                    },
                    disabled: in_flight,
                    onclick: move |_| on_deploy.call(policy_id.clone()),
                    if in_flight { "部署中..." } else { "部署" }
                }
            }
        }
    }
}

#[component]
fn PerformanceComparison(policy: Policy) -> Element {
    let body = match policy.performance_delta() {
        None => rsx! {
            p { class: "text-xs text-slate-400", "（尚未测得实际性能）" }
        },
        Some(delta) => {
            let delta_class = if delta >= 0.0 {
                "font-semibold text-emerald-600"
            } else {
                "font-semibold text-red-600"
            };
            let actual = policy.actual_performance.unwrap_or_default();
            rsx! {
                p { {format!("预期 {:.1}%", policy.expected_performance)} }
                p { {format!("实际 {:.1}%", actual)} }
                p { class: delta_class, {format!("{}{:.1}%", if delta > 0.0 { "+" } else { "" }, delta)} }
            }
        }
    };

    rsx! {
        div { class: "rounded bg-slate-50 p-2 text-xs text-slate-600", {body} }
    }
}
