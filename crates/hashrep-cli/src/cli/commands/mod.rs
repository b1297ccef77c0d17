//! CLI command handlers.

mod config_path;
mod lookup;
mod validate;

pub use config_path::run_config_path;
pub use lookup::{run_lookup, LookupArgs};
pub use validate::run_validate;
