//! IDEAL MENA coming-soon page
//!
//! Serve with `dx serve -p ideal-site`.

mod components;
mod shell;
mod site;

use dioxus_logger::tracing::Level;

fn main() {
    dioxus_logger::init(Level::INFO).expect("failed to init logger");
    dioxus::launch(shell::RootShell);
}
