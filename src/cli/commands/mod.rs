pub mod clock;
pub mod config;
pub mod db;
pub mod init;
pub mod list;
pub mod log;
pub mod status;
pub mod sweep;
