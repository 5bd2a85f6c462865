use wasm_bindgen::JsValue;

/// Failures an effect initializer can hit while wiring itself up.
///
/// An error aborts only the initializer that produced it; the registry logs
/// it and moves on to the next effect.
#[derive(Debug, thiserror::Error)]
pub enum EffectError {
    /// A selector the effect needs matched nothing in the document.
    #[error("missing element: {0}")]
    MissingElement(String),

    /// A decorative effect was asked to run without GSAP loaded.
    #[error("{0} needs GSAP")]
    NeedsGsap(&'static str),

    /// A browser or GSAP call threw.
    #[error("js error: {0}")]
    Js(String),

    /// The inline effects configuration could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    /// Tween variables could not be converted into a JS object.
    #[error("serialize error: {0}")]
    Serialize(#[from] serde_wasm_bindgen::Error),
}

impl From<JsValue> for EffectError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                web_sys::js_sys::Reflect::get(&value, &JsValue::from_str("message"))
                    .ok()
                    .and_then(|m| m.as_string())
            })
            .unwrap_or_else(|| format!("{:?}", value));
        EffectError::Js(message)
    }
}

pub type EffectResult<T = ()> = Result<T, EffectError>;
