pub mod draw;
pub mod layout;
