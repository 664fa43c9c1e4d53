pub mod list_branches;
