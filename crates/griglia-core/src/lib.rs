pub mod backend;
pub mod config;
pub mod error;
pub mod grid;
pub mod log;
pub mod method;
pub mod patterns;
pub mod rect;
pub mod screen;
pub mod window;

pub use backend::{PrimaryBackend, ScriptBackend, ScriptCommand};
pub use config::{ArrangeConfig, Config, TieBreak};
pub use error::{Error, Result};
pub use method::ManipulationMethod;
pub use patterns::{AppPattern, ResistanceCategory};
pub use rect::{Point, Rect, Size};
pub use screen::Screen;
pub use window::ManagedWindow;
