pub mod handler;

pub use handler::{apply_name_edit, InputHandler, KeyAction, NameEdit};
