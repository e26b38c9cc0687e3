pub mod commands;
pub mod config;
pub mod error;
pub mod game_data;

pub use commands::{run, write_output};
pub use config::{Command, Config};
pub use error::GraderError;
pub use game_data::{load_wagers, Game, GameFile};
