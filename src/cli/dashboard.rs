use std::io;

use loomcart::{dashboard::Dashboard, render};

pub(crate) fn run() -> Result<(), String> {
    render::write_dashboard(io::stdout().lock(), &Dashboard::demo())
        .map_err(|error| format!("failed to write dashboard: {error}"))
}
