//! CLI command implementations

pub mod init;
pub mod scan;
pub mod serve;
pub mod validate;
