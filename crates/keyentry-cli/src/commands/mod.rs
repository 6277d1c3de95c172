pub mod add;
pub mod check;
pub mod common;
pub mod completions;
pub mod delete;
pub mod list;
