use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;

use crate::state::{use_app_actions, use_app_state};
use crate::API_CLIENT;

const POLL_INTERVAL_MS: u32 = 5_000;

/// 告警轮询：挂载后立即拉取，此后每 5 秒一次。
/// 轮询任务归属组件作用域，卸载时随 future 一起取消，不会在卸载后写状态。
pub fn use_alert_feed() {
    let actions = use_app_actions();
    let state = use_app_state();

    use_future(move || {
        let actions = actions.clone();
        let state = state.clone();
        async move {
            let Some(client) = API_CLIENT.get().cloned() else {
                actions.set_alerts_error(Some("API 客户端未初始化".into()));
                return;
            };

            loop {
                // 仅首次加载展示 loading，避免每次轮询闪烁。
                if state.read().alerts.alerts.is_empty() {
                    actions.set_alerts_loading(true);
                }

                match client.get_alerts().await {
                    Ok(payload) => actions.apply_alerts_payload(payload),
                    Err(err) => {
                        // 轮询失败只记日志，面板维持上一次成功的数据。
                        tracing::warn!("alerts poll failed: {err}");
                        actions.set_alerts_loading(false);
                    }
                }

                TimeoutFuture::new(POLL_INTERVAL_MS).await;
            }
        }
    });
}
