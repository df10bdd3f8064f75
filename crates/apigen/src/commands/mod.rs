//! CLI subcommands.

pub mod check;
pub mod generate;
pub mod init;
