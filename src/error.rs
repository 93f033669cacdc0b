use thiserror::Error;

/// Errors surfaced by the lens core.
#[derive(Debug, Error)]
pub enum LensError {
    /// A node the experience cannot run without is absent from the scene.
    #[error("required scene node `{name}` was not found")]
    MissingNode { name: &'static str },

    /// A transition is already animating; the engine runs one job at a time.
    #[error("a screen transition is already in flight")]
    TransitionBusy,

    #[error("config error: {0}")]
    Config(String),
}

pub type LensResult<T> = std::result::Result<T, LensError>;
