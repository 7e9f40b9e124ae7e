pub mod demo;
pub mod export;
pub mod init;
pub mod stats;
