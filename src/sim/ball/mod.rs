mod ball;
mod ball_hit_info;
mod ball_state;

pub use ball::*;
pub use ball_hit_info::*;
pub use ball_state::*;
