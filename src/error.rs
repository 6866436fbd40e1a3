//! Construction-time errors
//!
//! Per-frame work never fails; only building the backdrop can.

/// Fatal errors raised while wiring the backdrop to the page
#[derive(Debug, thiserror::Error)]
pub enum BackdropError {
    #[error("no browser window available")]
    NoWindow,
    #[error("canvas element `{0}` not found")]
    CanvasNotFound(String),
    #[error("element `{0}` is not a canvas")]
    NotACanvas(String),
    #[error("2d rendering context unavailable")]
    ContextUnavailable,
    #[error("invalid settings: {0}")]
    Settings(#[from] serde_json::Error),
}

#[cfg(target_arch = "wasm32")]
impl From<BackdropError> for wasm_bindgen::JsValue {
    fn from(err: BackdropError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = BackdropError::CanvasNotFound("background-canvas".into());
        assert_eq!(err.to_string(), "canvas element `background-canvas` not found");

        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: BackdropError = json_err.into();
        assert!(err.to_string().starts_with("invalid settings:"));
    }
}
