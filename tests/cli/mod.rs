pub mod support;

mod errors;
mod init;
mod load;
mod logging;
mod recommend;
mod tags;
