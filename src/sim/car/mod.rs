mod car;
mod car_config;
mod car_controls;
mod car_state;
pub(crate) mod vehicle;

pub use car::*;
pub use car_config::*;
pub use car_controls::*;
pub use car_state::*;
