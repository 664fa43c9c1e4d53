pub mod download_name;
pub mod parse_page;
