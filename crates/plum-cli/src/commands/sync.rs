use plum_core::sync::HttpSyncClient;
use plum_core::Settings;

use crate::commands::common::Context;
use crate::error::CliError;
use crate::settings_file::load_settings;

pub async fn run_sync(address: Option<&str>, context: &Context) -> Result<(), CliError> {
    let settings = load_settings(&context.settings_path)?;
    let address = resolve_sync_address(address, &settings)?;
    let client = HttpSyncClient::new(&address)?;

    tracing::info!("Syncing with {}", client.endpoint());
    let summary = context
        .open_notes(&settings)
        .initiate_exchange(&client)
        .await?;

    println!(
        "notes synced! (sent {}, received {})",
        summary.sent, summary.received
    );
    Ok(())
}

/// Explicit address first, then the `syncserver` setting
pub fn resolve_sync_address(
    explicit: Option<&str>,
    settings: &Settings,
) -> Result<String, CliError> {
    explicit
        .map(str::trim)
        .filter(|address| !address.is_empty())
        .or_else(|| settings.sync_server())
        .map(str::to_string)
        .ok_or(CliError::SyncNotConfigured)
}
