pub mod commands;
pub mod driver;
pub mod recipe;
pub mod runtime;
pub mod settings;
pub mod toolchain;
