use crate::document::{self, DocumentNode};
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("no browser window available")]
    NoWindow,
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("could not read response body: {0}")]
    Body(String),
    #[error("malformed document: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Malformed(err.to_string())
    }
}

/// Maps a response status and body to the node list, independent of the transport.
pub fn decode_response(status: u16, body: &str) -> Result<Vec<DocumentNode>, FetchError> {
    if !(200..300).contains(&status) {
        return Err(FetchError::Status(status));
    }
    Ok(document::parse_document(body)?)
}

#[cfg(target_arch = "wasm32")]
mod transport {
    use super::FetchError;
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::Response;

    fn describe(value: &JsValue) -> String {
        if let Some(err) = value.dyn_ref::<js_sys::Error>() {
            return String::from(err.message());
        }
        value.as_string().unwrap_or_else(|| format!("{value:?}"))
    }

    pub async fn get_text(url: &str) -> Result<(u16, String), FetchError> {
        let window = web_sys::window().ok_or(FetchError::NoWindow)?;
        let response = JsFuture::from(window.fetch_with_str(url))
            .await
            .map_err(|e| FetchError::Network(describe(&e)))?;
        let response: Response = response
            .dyn_into()
            .map_err(|e| FetchError::Network(describe(&e)))?;
        let status = response.status();
        let text = response.text().map_err(|e| FetchError::Body(describe(&e)))?;
        let body = JsFuture::from(text)
            .await
            .map_err(|e| FetchError::Body(describe(&e)))?
            .as_string()
            .ok_or_else(|| FetchError::Body("response body is not text".to_string()))?;
        Ok((status, body))
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod transport {
    use super::FetchError;

    pub async fn get_text(_url: &str) -> Result<(u16, String), FetchError> {
        Err(FetchError::NoWindow)
    }
}

/// Retrieves the document tree with a single `GET`. No retry.
pub async fn fetch_document(url: &str) -> Result<Vec<DocumentNode>, FetchError> {
    let (status, body) = transport::get_text(url).await?;
    decode_response(status, &body)
}
