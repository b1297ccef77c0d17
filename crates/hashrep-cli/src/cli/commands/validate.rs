//! `hashrep validate`: report option problems.

use hashrep_core::config::HashrepConfig;
use hashrep_core::validate::validate_options;

/// Print each validation error. Returns 0 when the options are usable, 2 otherwise.
pub fn run_validate(cfg: &HashrepConfig) -> i32 {
    let errors = validate_options(&cfg.lookup_options());
    if errors.is_empty() {
        println!("options OK");
        return 0;
    }
    for e in &errors {
        println!("{}", e);
    }
    2
}
