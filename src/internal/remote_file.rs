pub mod downloader;
pub mod functions;
pub mod structs;
