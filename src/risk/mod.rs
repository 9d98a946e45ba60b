pub mod channel_config;
pub mod errors;
pub mod guard;
pub mod noise;
pub mod scorer;

pub use channel_config::*;
pub use errors::*;
pub use guard::*;
pub use noise::*;
pub use scorer::*;
