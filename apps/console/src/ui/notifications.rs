use crate::state::{use_app_actions, use_app_state};
use dioxus::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Error,
    Warning,
}

impl ToastKind {
    fn accent_classes(self) -> (&'static str, &'static str) {
        match self {
            Self::Error => ("border-red-500 bg-red-50", "text-red-700"),
            Self::Warning => ("border-amber-500 bg-amber-50", "text-amber-700"),
        }
    }
}

#[component]
pub fn Toast(
    kind: ToastKind,
    title: String,
    message: String,
    on_close: EventHandler<MouseEvent>,
) -> Element {
    let (container_class, accent_text) = kind.accent_classes();

    rsx! {
        div { class: "pointer-events-auto rounded-lg border-l-4 p-4 shadow-lg {container_class}",
            div { class: "flex items-start justify-between gap-4",
                div { class: "space-y-1",
                    h3 { class: "text-sm font-semibold {accent_text}", "{title}" }
                    p { class: "text-xs text-slate-700", "{message}" }
                }
                button {
                    class: "rounded bg-slate-200 px-2 py-1 text-[11px] text-slate-600 transition hover:bg-slate-300",
                    onclick: move |evt| on_close.call(evt),
                    "关闭"
                }
            }
        }
    }
}

/// 面板内没有横幅位的错误走这里：告警轮询的引导错误、神经流中断。
#[component]
pub fn NotificationCenter() -> Element {
    let actions = use_app_actions();
    let snapshot = use_app_state().read().clone();

    let mut toasts: Vec<Element> = Vec::new();

    if let Some(error) = snapshot.alerts.error.clone() {
        let app_actions = actions.clone();
        toasts.push(rsx! {
            Toast {
                key: "alerts-error",
                kind: ToastKind::Error,
                title: "告警数据不可用".to_string(),
                message: error,
                on_close: move |_| app_actions.set_alerts_error(None),
            }
        });
    }

    if let Some(error) = snapshot.stream.error.clone() {
        let app_actions = actions.clone();
        toasts.push(rsx! {
            Toast {
                key: "stream-error",
                kind: ToastKind::Warning,
                title: "实时流中断".to_string(),
                message: error,
                on_close: move |_| app_actions.set_stream_error(None),
            }
        });
    }

    if toasts.is_empty() {
        return rsx! {};
    }

    rsx! {
        div { class: "pointer-events-none fixed right-4 top-4 z-50 flex w-80 flex-col gap-3",
            for toast in toasts {
                {toast}
            }
        }
    }
}
