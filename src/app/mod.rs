// Application layer: the interactive operator shell.

pub mod menu;
pub mod shell;

pub use shell::{Flow, Shell};
