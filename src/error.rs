use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

#[derive(Debug, Error)]
pub enum Error {
    #[error("javascript error: {0}")]
    Js(String),

    #[error("request failed: {0}")]
    Request(#[from] gloo_net::Error),

    #[error("server responded with status {0}")]
    Status(u16),

    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<JsValue> for Error {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                value
                    .dyn_ref::<web_sys::js_sys::Error>()
                    .map(|e| String::from(e.message()))
            })
            .unwrap_or_else(|| format!("{:?}", value));
        Error::Js(message)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_names_the_code() {
        assert_eq!(Error::Status(502).to_string(), "server responded with status 502");
    }
}
