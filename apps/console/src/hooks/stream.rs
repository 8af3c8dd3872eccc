use crate::state::use_app_actions;
use dioxus::prelude::*;

#[cfg(target_arch = "wasm32")]
use {
    crate::models::StreamSnapshot,
    crate::services::stream::{StreamCallbacks, StreamClient, StreamHandle},
    crate::APP_CONFIG,
    std::rc::Rc,
};

/// 订阅 /ws/neural_stream；每条推送整体替换统计快照。
/// 句柄存活在组件作用域内，卸载即关闭连接；断开后不重连（提示一次后静默）。
#[cfg(target_arch = "wasm32")]
pub fn use_neural_stream() {
    let actions = use_app_actions();
    let handle = use_signal(|| None::<Rc<StreamHandle>>);

    use_future(move || {
        let actions = actions.clone();
        let mut handle = handle;
        async move {
            let Some(config) = APP_CONFIG.get() else {
                actions.set_stream_error(Some("缺少控制台配置".into()));
                return;
            };

            let url = config.stream_endpoint();

            let open_actions = actions.clone();
            let message_actions = actions.clone();
            let error_actions = actions.clone();
            let callbacks = StreamCallbacks::new(
                move || open_actions.set_stream_connected(true),
                move |raw| match serde_json::from_str::<StreamSnapshot>(&raw) {
                    Ok(snapshot) => message_actions.replace_stream_snapshot(snapshot),
                    Err(err) => tracing::warn!("malformed stream message dropped: {err}"),
                },
                move |message| error_actions.set_stream_error(Some(message)),
            );

            match StreamClient::connect(&url, callbacks) {
                Ok(connected) => handle.set(Some(Rc::new(connected))),
                Err(err) => {
                    tracing::error!("neural stream connect failed: {err}");
                    actions.set_stream_error(Some(err.to_string()));
                }
            }
        }
    });
}

#[cfg(not(target_arch = "wasm32"))]
use gloo_timers::future::TimeoutFuture;

/// 原生目标没有浏览器 WebSocket，回放固定快照便于离线预览。
#[cfg(not(target_arch = "wasm32"))]
pub fn use_neural_stream() {
    let actions = use_app_actions();

    use_future(move || {
        let actions = actions.clone();
        async move {
            actions.set_stream_connected(true);

            for seq in 0u64..5 {
                TimeoutFuture::new(1_200).await;
                actions.replace_stream_snapshot(crate::fixtures::sample_stream_snapshot(seq));
            }
        }
    });
}
