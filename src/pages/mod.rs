pub mod editor;
pub mod not_found;
pub mod search;
