pub mod args;
pub mod bags;
pub mod config;
pub mod constants;
pub mod errors;
pub mod fileloader;
pub mod logger;
pub mod macros;
pub mod output;
pub mod queue;
pub mod statics;
pub mod traits;
