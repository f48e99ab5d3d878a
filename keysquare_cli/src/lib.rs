mod command;
mod config;
mod error;
mod session;
pub use command::*;
pub use config::*;
pub use error::*;
pub use session::*;
