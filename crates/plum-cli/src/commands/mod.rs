pub mod add;
pub mod common;
pub mod daemon;
pub mod list;
pub mod remove;
pub mod settings;
pub mod sync;
pub mod update;
