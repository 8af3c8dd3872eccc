#![allow(non_snake_case)]

mod api;
mod config;
mod fixtures;
mod hooks;
mod models;
mod services;
mod state;
mod ui;

use api::CortexClient;
use config::AppConfig;
use dioxus::prelude::*;
use dioxus_router::prelude::*;
use hooks::overview::use_overview_feed;
use hooks::stream::use_neural_stream;
use once_cell::sync::OnceCell;
use state::{use_app_actions, use_app_state, ActiveTab, AppState};
use tracing::{error, info};
use ui::alerts::AlertPanel;
use ui::models::ModelSelectorPanel;
use ui::notifications::NotificationCenter;
use ui::overview::OverviewPanel;
use ui::policies::PolicyPanel;
use ui::stream::StreamStatsPanel;

pub(crate) static APP_CONFIG: OnceCell<AppConfig> = OnceCell::new();
pub(crate) static API_CLIENT: OnceCell<CortexClient> = OnceCell::new();

fn main() {
    console_error_panic_hook::set_once();
    init_logging();
    bootstrap_infrastructure();
    launch(App);
}

fn init_logging() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let _ = dioxus_logger::init(tracing::Level::INFO);
    });
}

fn bootstrap_infrastructure() {
    let config = AppConfig::from_env();
    let _ = APP_CONFIG.set(config.clone());

    match CortexClient::new(config) {
        Ok(client) => {
            let _ = API_CLIENT.set(client);
            info!("Cortex API client initialized");
        }
        Err(err) => {
            report_client_error("初始化 Cortex API 客户端失败", &err);
        }
    }
}

fn report_client_error(context: &str, err: &anyhow::Error) {
    error!(%context, ?err, "api bootstrap error");
}

#[component]
fn App() -> Element {
    let app_state = use_signal(AppState::default);

    use_context_provider(|| app_state);

    rsx! {
        div { class: "relative",
            Router::<Route> {}
            NotificationCenter {}
        }
    }
}

#[derive(Clone, Routable, Debug, PartialEq)]
enum Route {
    #[route("/")]
    Dashboard {},
}

#[component]
fn Dashboard() -> Element {
    // 总览与实时流常驻外壳，不随标签页卸载；其余面板各自携带轮询。
    use_overview_feed();
    use_neural_stream();

    let app_state = use_app_state();
    let active_tab = app_state.read().active_tab;

    let api_endpoint = APP_CONFIG
        .get()
        .map(|c| c.api_base_url.clone())
        .unwrap_or_else(|| "未配置 API 地址".to_string());

    let body = match active_tab {
        ActiveTab::Overview => rsx! { OverviewPanel {} },
        ActiveTab::Models => rsx! { ModelSelectorPanel {} },
        ActiveTab::Policies => rsx! { PolicyPanel {} },
        ActiveTab::Alerts => rsx! { AlertPanel {} },
    };

    rsx! {
        div { class: "app-shell mx-auto max-w-6xl space-y-4 p-4",
            section { class: "rounded-lg border-b-2 border-sky-500 bg-white p-4 shadow-sm",
                h1 { class: "text-xl font-semibold text-slate-900", "Cortex 神经中枢控制台" }
                p { class: "text-sm text-slate-600", "后端 API: {api_endpoint}" }
            }

            TabNavigation {}

            div { class: "grid gap-4 lg:grid-cols-[1fr_18rem]",
                main { class: "rounded-lg border border-slate-200 bg-white p-4 shadow-sm",
                    {body}
                }
                StreamStatsPanel {}
            }

            footer { class: "border-t border-slate-200 pt-3 text-center text-[11px] text-slate-400",
                "Cortex Console · 外部神经系统的只读视窗"
            }
        }
    }
}

#[component]
fn TabNavigation() -> Element {
    let actions = use_app_actions();
    let app_state = use_app_state();
    let active_tab = app_state.read().active_tab;

    rsx! {
        div { class: "flex flex-wrap gap-2 border-b-2 border-slate-200 pb-3",
            for tab in ActiveTab::ALL {
                {
                    let is_active = tab == active_tab;
                    let label = tab.label();
                    let tab_actions = actions.clone();
                    let class = if is_active {
                        "rounded bg-sky-600 px-4 py-1.5 text-sm font-semibold text-white"
                    } else {
                        "rounded border border-slate-200 bg-white px-4 py-1.5 text-sm text-slate-600 hover:border-slate-400"
                    };
                    rsx! {
                        button {
                            key: "{label}",
                            class: class,
                            onclick: move |_| tab_actions.set_active_tab(tab),
                            "{label}"
                        }
                    }
                }
            }
        }
    }
}
