use crate::commands::common::{parse_note_id, Context};
use crate::error::CliError;
use crate::settings_file::load_settings;

pub async fn run_remove(id: &str, context: &Context) -> Result<(), CliError> {
    let note_id = parse_note_id(id)?;
    let settings = load_settings(&context.settings_path)?;
    let removed = context.open_notes(&settings).remove_note(note_id).await?;

    println!("{}", removed.id);
    Ok(())
}
