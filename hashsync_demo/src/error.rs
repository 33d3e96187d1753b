use crate::Button;

/// Errors that can happen when running the demo.
#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    /// A click on a button the current view does not show.
    #[error("the {0} button is not rendered")]
    NotRendered(Button),

    /// A `data-button` attribute naming no button.
    #[error("unknown button {0:?}")]
    UnknownButton(String),

    /// The navigation host could not be set up.
    #[error("navigation host unavailable")]
    Host(#[from] hashsync::Error),

    /// The page query string could not be read as settings.
    #[cfg(target_arch = "wasm32")]
    #[error("invalid query string")]
    Config(#[from] serde_qs::Error),

    /// A DOM call threw.
    #[cfg(target_arch = "wasm32")]
    #[error("dom error: {0}")]
    Dom(String),
}
