pub mod args;
pub mod generate;
pub mod serve;
pub mod signals;

pub use args::{Args, Commands};
pub use generate::run_generate;
pub use serve::run_serve;
