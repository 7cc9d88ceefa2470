pub mod board;
pub mod config;
pub mod state;

pub use board::*;
pub use config::*;
pub use state::*;
