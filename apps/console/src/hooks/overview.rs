use dioxus::prelude::*;
use futures::join;
use gloo_timers::future::TimeoutFuture;

use crate::state::{use_app_actions, use_app_state};
use crate::API_CLIENT;

const POLL_INTERVAL_MS: u32 = 5_000;
const LOG_LIMIT: u32 = 10;

/// 总览轮询：状态、性能、日志、神经健康四路并发拉取，5 秒一轮。
/// 各路独立落盘，单路失败不影响其余面板的数据。
pub fn use_overview_feed() {
    let actions = use_app_actions();
    let state = use_app_state();

    use_future(move || {
        let actions = actions.clone();
        let state = state.clone();
        async move {
            let Some(client) = API_CLIENT.get().cloned() else {
                tracing::error!("overview feed unavailable: client not initialized");
                return;
            };

            loop {
                if state.read().overview.neural.is_none() {
                    actions.set_overview_loading(true);
                }

                let (status, performance, logs, health) = join!(
                    client.get_neural_status(),
                    client.get_performance_overview(),
                    client.get_logs(LOG_LIMIT),
                    client.get_neural_health(),
                );

                match status {
                    Ok(payload) => actions.set_neural_status(payload),
                    Err(err) => tracing::warn!("neural status poll failed: {err}"),
                }

                match performance {
                    Ok(payload) => actions.set_performance_overview(payload),
                    Err(err) => tracing::warn!("performance poll failed: {err}"),
                }

                match logs {
                    Ok(payload) => actions.set_logs(payload.logs),
                    Err(err) => tracing::warn!("logs poll failed: {err}"),
                }

                match health {
                    Ok(payload) => actions.set_neural_health(payload),
                    Err(err) => tracing::warn!("neural health poll failed: {err}"),
                }

                actions.set_overview_loading(false);

                TimeoutFuture::new(POLL_INTERVAL_MS).await;
            }
        }
    });
}
