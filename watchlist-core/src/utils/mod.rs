pub mod constants;
pub mod settings;
pub mod tracing;

pub use constants::env;
pub use settings::*;
pub use self::tracing::init_tracing;
