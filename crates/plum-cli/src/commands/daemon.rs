use plum_api::config::{AppConfig, DEFAULT_PORT};

use crate::commands::common::Context;
use crate::error::CliError;
use crate::settings_file::load_settings;

pub async fn run_daemon(port: Option<u16>, context: &Context) -> Result<(), CliError> {
    let settings = load_settings(&context.settings_path)?;
    let port = port.unwrap_or(DEFAULT_PORT);
    let config = AppConfig::for_port(port, context.notes_path.clone(), settings.author);

    println!("listening on port {port}...");
    plum_api::serve(config).await?;
    Ok(())
}
