use crate::commands::common::{display_path, Context};
use crate::error::CliError;
use crate::settings_file::{load_settings, update_setting};

pub fn run_settings(
    key: Option<&str>,
    value: Option<&str>,
    context: &Context,
) -> Result<(), CliError> {
    let settings = match (key, value) {
        (Some(key), Some(value)) => update_setting(&context.settings_path, key.trim(), value)?,
        _ => load_settings(&context.settings_path)?,
    };

    println!("settings: {}", display_path(&context.settings_path));
    println!("author: {}", settings.author);
    println!("syncserver: {}", settings.sync_server().unwrap_or("(unset)"));
    Ok(())
}
