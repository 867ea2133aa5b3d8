pub mod context;
pub mod error;
pub mod session;

pub use context::AppState;
pub use error::{GatorError, Result};
pub use session::{resolve_current_user, Session};
