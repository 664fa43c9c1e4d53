pub mod ensure_folder;
pub mod sanitize_name;
