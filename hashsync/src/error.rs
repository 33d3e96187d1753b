/// Errors that can happen when setting up hash navigation.
///
/// Navigating never fails; these only come from constructing hosts and from
/// parsing settings.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// There is no global `window`, e.g. when running in a web worker.
    #[error("no global `window` exists")]
    NoWindow,

    /// A browser API threw.
    #[error("javascript error: {0}")]
    Js(String),

    /// A [`FragmentTracking`](crate::FragmentTracking) name that does not exist.
    #[error("unknown fragment tracking {0:?}, expected \"verbatim\" or \"normalized\"")]
    UnknownTracking(String),
}

#[cfg(target_arch = "wasm32")]
pub(crate) trait JsErrorExt<T> {
    fn efix(self) -> Result<T, Error>;
}

#[cfg(target_arch = "wasm32")]
impl<T> JsErrorExt<T> for Result<T, wasm_bindgen::JsValue> {
    fn efix(self) -> Result<T, Error> {
        self.map_err(|value| Error::Js(format!("{value:?}")))
    }
}
