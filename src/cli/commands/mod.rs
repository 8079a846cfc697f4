//! Command implementations, one module per subcommand

pub mod appeal;
pub mod assign;
pub mod close;
pub mod completions;
pub mod decide;
pub mod deny;
pub mod fulfill;
pub mod import;
pub mod init;
pub mod letter;
pub mod list;
pub mod note;
pub mod overdue;
pub mod report;
pub mod show;
pub mod stats;
pub mod submit;
pub mod utils;
