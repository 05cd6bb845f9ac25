// CLI subcommand handlers. main.rs parses arguments and dispatches here.

pub mod info;
pub mod route;
