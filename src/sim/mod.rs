mod arena;
mod ball;
mod boost_pad;
mod car;
pub mod consts;
mod dropshot_tiles;
mod game_mode;
mod game_state;
mod linear_piece_curve;
mod mutator_config;
mod phys_state;
mod team;
mod user_info_types;

pub use arena::*;
pub use ball::*;
pub use boost_pad::*;
pub use car::*;
pub use dropshot_tiles::*;
pub use game_mode::*;
pub use game_state::*;
pub use linear_piece_curve::*;
pub use mutator_config::*;
pub use phys_state::*;
pub use team::*;
pub use user_info_types::*;
