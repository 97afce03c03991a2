mod boost_pad;
mod boost_pad_config;
mod boost_pad_grid;
mod boost_pad_state;

pub use boost_pad::*;
pub use boost_pad_config::*;
pub use boost_pad_grid::*;
pub use boost_pad_state::*;
