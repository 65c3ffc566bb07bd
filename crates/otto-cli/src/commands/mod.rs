//! CLI command implementations

pub mod init;
pub mod snapshot;
pub mod trace;
pub mod view;
