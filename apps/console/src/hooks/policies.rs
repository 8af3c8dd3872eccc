use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;

use crate::state::{use_app_actions, use_app_state};
use crate::API_CLIENT;

const POLL_INTERVAL_MS: u32 = 15_000;
const NOTICE_FLASH_MS: u32 = 3_000;

/// 策略列表轮询，15 秒一次。
pub fn use_policy_roster() {
    let actions = use_app_actions();
    let state = use_app_state();

    use_future(move || {
        let actions = actions.clone();
        let state = state.clone();
        async move {
            let Some(client) = API_CLIENT.get().cloned() else {
                actions.set_policies_error(Some("API 客户端未初始化".into()));
                return;
            };

            loop {
                if state.read().policies.policies.is_empty() {
                    actions.set_policies_loading(true);
                }

                match client.get_policies().await {
                    Ok(payload) => actions.apply_policies_payload(payload),
                    Err(err) => {
                        tracing::error!("policy roster poll failed: {err}");
                        actions.set_policies_error(Some("策略列表加载失败".into()));
                    }
                }

                TimeoutFuture::new(POLL_INTERVAL_MS).await;
            }
        }
    });
}

pub struct PolicyDeployer {
    pub deploy: Box<dyn Fn(String) + 'static>,
}

/// 策略部署：POST 成功后乐观标记为活跃并闪现横幅，随即重新拉取列表对账。
/// 部署期间仅目标策略的按钮被禁用；不同策略的并发部署不做拦截。
pub fn use_policy_deployer() -> PolicyDeployer {
    let actions = use_app_actions();

    let deploy = Box::new(move |policy_id: String| {
        let actions = actions.clone();
        spawn(async move {
            let Some(client) = API_CLIENT.get().cloned() else {
                actions.set_policies_error(Some("API 客户端未初始化".into()));
                return;
            };

            actions.begin_deploy(policy_id.clone());

            let deployed = match client.deploy_policy(&policy_id).await {
                Ok(_ack) => {
                    actions.mark_policy_active(&policy_id);
                    actions.set_policy_notice(Some(format!("策略部署成功: {policy_id}")));

                    match client.get_policies().await {
                        Ok(payload) => actions.apply_policies_payload(payload),
                        Err(err) => tracing::warn!("policy reconcile fetch failed: {err}"),
                    }
                    true
                }
                Err(err) => {
                    tracing::error!("policy deploy failed: {err}");
                    actions.set_policies_error(Some(err.banner_message()));
                    false
                }
            };

            actions.finish_deploy();

            if deployed {
                TimeoutFuture::new(NOTICE_FLASH_MS).await;
                actions.set_policy_notice(None);
            }
        });
    }) as Box<dyn Fn(String)>;

    PolicyDeployer { deploy }
}
