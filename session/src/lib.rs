pub mod batch;
pub mod command;
pub mod error;
pub mod session;
pub mod store;

pub use command::{Command, USAGE};
pub use error::SessionError;
pub use session::{Flow, Session};
pub use store::Loaded;
