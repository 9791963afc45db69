pub mod config;
pub mod db;
pub mod init;
pub mod log;
pub mod request;
pub mod routes;
pub mod seed;
pub mod tree;
