use contact_book::prelude::run_app;
use log::debug;
use std::process::exit;

fn main() {
    env_logger::init();

    if let Err(e) = run_app() {
        debug!("Command failed: {e:?}");

        // The presenter has already shown reported errors
        if !e.is_reported() {
            eprintln!("Error: {e}");
        }
        exit(1);
    }
}
