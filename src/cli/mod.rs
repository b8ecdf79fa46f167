pub mod command;
pub mod run;
pub mod terminal;

pub use run::run_app;
