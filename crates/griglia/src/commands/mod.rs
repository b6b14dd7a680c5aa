pub mod init;
pub mod optimal;
pub mod plan;
