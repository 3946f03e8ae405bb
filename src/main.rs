pub use app::App;

pub mod app;
mod data;
mod form;
mod home;
mod login;

use cli_log::*;
use keyring::Entry;
use lazy_static::lazy_static;

lazy_static! {
    static ref TOKEN_MANAGER: Entry =
        Entry::new("windster", "token").expect("Failed to create token manager");
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    init_cli_log!("windster");
    color_eyre::install()?;
    let terminal = ratatui::init();
    let result = App::new().run(terminal).await;
    ratatui::restore();
    result
}
