pub mod app;
pub mod error;
pub mod host;
pub mod i18n;
pub mod screen;
pub mod transition;
pub mod ui;

pub use app::Lens;
pub use error::{LensError, LensResult};
