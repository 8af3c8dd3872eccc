use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;

#[cfg(target_arch = "wasm32")]
use gloo_storage::{LocalStorage, Storage};

#[cfg(target_arch = "wasm32")]
use crate::models::SelectedModels;
use crate::state::{use_app_actions, use_app_state};
use crate::API_CLIENT;

const POLL_INTERVAL_MS: u32 = 10_000;
const SAVED_FLASH_MS: u32 = 3_000;

#[cfg(target_arch = "wasm32")]
const STORAGE_KEY: &str = "cortex.selected_models";

/// 模型列表轮询（10 秒一次），启动时先从 LocalStorage 恢复上次的层级选择。
pub fn use_model_catalog() {
    let actions = use_app_actions();
    let state = use_app_state();

    use_future(move || {
        let actions = actions.clone();
        let state = state.clone();
        async move {
            #[cfg(target_arch = "wasm32")]
            if let Ok(saved) = LocalStorage::get::<SelectedModels>(STORAGE_KEY) {
                actions.restore_selection(saved);
            }

            let Some(client) = API_CLIENT.get().cloned() else {
                actions.set_models_error(Some("API 客户端未初始化".into()));
                return;
            };

            loop {
                if state.read().models.models.is_empty() {
                    actions.set_models_loading(true);
                }

                match client.get_models().await {
                    Ok(payload) => actions.apply_models_payload(payload),
                    Err(err) => {
                        tracing::error!("model catalog poll failed: {err}");
                        actions.set_models_error(Some("模型列表加载失败".into()));
                    }
                }

                TimeoutFuture::new(POLL_INTERVAL_MS).await;
            }
        }
    });
}

pub struct SelectionSaver {
    pub save: Box<dyn Fn() + 'static>,
}

/// 保存当前选择：写入 LocalStorage 并闪现“已保存”3 秒。
// TODO: 后端提供 POST /api/config/models 后在此同步到服务端。
pub fn use_selection_saver() -> SelectionSaver {
    let actions = use_app_actions();
    let state = use_app_state();

    let save = Box::new(move || {
        let actions = actions.clone();
        let selected = state.read().models.selected.clone();
        spawn(async move {
            #[cfg(target_arch = "wasm32")]
            if let Err(err) = LocalStorage::set(STORAGE_KEY, &selected) {
                tracing::warn!("selection persist failed: {err}");
            }
            #[cfg(not(target_arch = "wasm32"))]
            let _ = &selected;

            actions.set_models_saved(true);
            TimeoutFuture::new(SAVED_FLASH_MS).await;
            actions.set_models_saved(false);
        });
    }) as Box<dyn Fn()>;

    SelectionSaver { save }
}
