pub mod config;
pub mod flow;

#[cfg(test)]
mod test_log;

pub use config::{Args, Config, ConfigError};
pub use flow::{run, FlowError, Outcome};
