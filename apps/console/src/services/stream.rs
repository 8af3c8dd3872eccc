use thiserror::Error;

pub struct StreamCallbacks {
    pub on_open: Box<dyn Fn() + 'static>,
    pub on_message: Box<dyn Fn(String) + 'static>,
    pub on_error: Box<dyn Fn(String) + 'static>,
}

impl StreamCallbacks {
    pub fn new(
        on_open: impl Fn() + 'static,
        on_message: impl Fn(String) + 'static,
        on_error: impl Fn(String) + 'static,
    ) -> Self {
        Self {
            on_open: Box::new(on_open),
            on_message: Box::new(on_message),
            on_error: Box::new(on_error),
        }
    }
}

#[derive(Debug, Error)]
pub enum StreamError {
    #[error("神经流初始化失败: {0}")]
    SocketInit(String),
    #[error("神经流在当前平台未实现: {0}")]
    Unsupported(String),
}

/// 持有浏览器 WebSocket 的句柄；随组件一同析构并关闭连接。
/// 连接断开后不做自动重连，推送静默停止（由调用方提示一次）。
pub struct StreamHandle {
    #[cfg(target_arch = "wasm32")]
    inner: std::rc::Rc<wasm::StreamInner>,
}

impl StreamHandle {
    pub fn close(&self) {
        #[cfg(target_arch = "wasm32")]
        self.inner.close();
    }
}

impl Drop for StreamHandle {
    fn drop(&mut self) {
        self.close();
    }
}

pub struct StreamClient;

impl StreamClient {
    pub fn connect(url: &str, callbacks: StreamCallbacks) -> Result<StreamHandle, StreamError> {
        #[cfg(target_arch = "wasm32")]
        {
            let inner = wasm::StreamInner::new(url, callbacks)?;
            inner.connect()?;
            Ok(StreamHandle { inner })
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (url, callbacks);
            Err(StreamError::Unsupported(
                "仅 wasm32 目标支持 WebSocket".into(),
            ))
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm {
    use super::{StreamCallbacks, StreamError};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use wasm_bindgen::{closure::Closure, JsCast, JsValue};
    use web_sys::{CloseEvent, Event, MessageEvent, WebSocket};

    pub struct StreamInner {
        url: String,
        callbacks: StreamCallbacks,
        socket: RefCell<Option<WebSocket>>,
        closed: Cell<bool>,
    }

    impl StreamInner {
        pub fn new(url: &str, callbacks: StreamCallbacks) -> Result<Rc<Self>, StreamError> {
            if url.trim().is_empty() {
                return Err(StreamError::SocketInit("URL 为空".into()));
            }

            Ok(Rc::new(Self {
                url: url.to_string(),
                callbacks,
                socket: RefCell::new(None),
                closed: Cell::new(false),
            }))
        }

        pub fn connect(self: &Rc<Self>) -> Result<(), StreamError> {
            match WebSocket::new(&self.url) {
                Ok(ws) => {
                    self.install_handlers(&ws);
                    self.socket.replace(Some(ws));
                    Ok(())
                }
                Err(err) => Err(StreamError::SocketInit(js_value_to_string(&err))),
            }
        }

        pub fn close(&self) {
            self.closed.set(true);
            if let Some(ws) = self.socket.borrow_mut().take() {
                let _ = ws.close();
            }
        }

        fn install_handlers(self: &Rc<Self>, ws: &WebSocket) {
            let inner = Rc::clone(self);
            let on_open = Closure::wrap(Box::new(move |_evt: Event| {
                (inner.callbacks.on_open)();
            }) as Box<dyn FnMut(_)>);
            ws.set_onopen(Some(on_open.as_ref().unchecked_ref()));
            on_open.forget();

            let inner = Rc::clone(self);
            let on_message = Closure::wrap(Box::new(move |evt: MessageEvent| {
                let data = evt.data();
                if let Some(text) = data.dyn_ref::<js_sys::JsString>().map(String::from) {
                    (inner.callbacks.on_message)(text);
                }
            }) as Box<dyn FnMut(_)>);
            ws.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
            on_message.forget();

            let inner = Rc::clone(self);
            let on_error = Closure::wrap(Box::new(move |_evt: Event| {
                if !inner.closed.get() {
                    (inner.callbacks.on_error)("神经流连接异常".into());
                }
            }) as Box<dyn FnMut(_)>);
            ws.set_onerror(Some(on_error.as_ref().unchecked_ref()));
            on_error.forget();

            let inner = Rc::clone(self);
            let on_close = Closure::wrap(Box::new(move |evt: CloseEvent| {
                if !inner.closed.get() {
                    (inner.callbacks.on_error)(format!(
                        "神经流连接已关闭 (code {})，实时统计停止更新",
                        evt.code()
                    ));
                }
            }) as Box<dyn FnMut(_)>);
            ws.set_onclose(Some(on_close.as_ref().unchecked_ref()));
            on_close.forget();
        }
    }

    fn js_value_to_string(value: &JsValue) -> String {
        value.as_string().unwrap_or_else(|| format!("{value:?}"))
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn native_target_reports_unsupported() {
        let callbacks = StreamCallbacks::new(|| {}, |_msg| {}, |_err| {});
        let result = StreamClient::connect("ws://localhost:8000/ws/neural_stream", callbacks);
        assert!(matches!(result, Err(StreamError::Unsupported(_))));
    }
}
