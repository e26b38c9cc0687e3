pub mod names;
pub mod play_parser;

pub use names::{clean_player_display_name, extract_names, norm_name, same_player_loose};
pub use play_parser::parse_play;
