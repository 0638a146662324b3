//! CLI domain: outer-process flags, run context wiring, and error output.
//! The interactive command surface itself lives in the console.

mod output;
mod parse;
mod route;

pub use output::map_error;
pub use parse::Cli;
pub use route::RunContext;
