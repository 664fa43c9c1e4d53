pub mod auth;
pub mod config;
pub mod entrance;
pub mod local_file;
pub mod portal;
pub mod remote_file;
pub mod states;
pub mod sync;
