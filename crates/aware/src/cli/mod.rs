//! Command-line interface module.

mod commands;
mod exempt;
mod policy;
mod run;

pub use commands::{Cli, Commands};
pub use exempt::handle_exempt_command;
pub use policy::handle_policy_command;
pub use run::run_bot;
