//! CLI commands for tagwise

pub mod dispatch;
pub mod init;
pub mod load;
pub mod recommend;
pub mod tags;
