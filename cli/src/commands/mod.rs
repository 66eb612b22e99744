//! CLI command implementations

pub mod check;
pub mod defaults;
pub mod raw;
pub mod reset;
pub mod set;
pub mod show;

pub use check::check_command;
pub use defaults::defaults_command;
pub use raw::raw_command;
pub use reset::reset_command;
pub use set::{set_command, unset_command, EditValue};
pub use show::show_command;
