use plum_core::models::NoteChanges;

use crate::commands::common::{parse_note_id, parse_tags, Context};
use crate::error::CliError;
use crate::settings_file::load_settings;

pub async fn run_update(
    id: &str,
    kind: Option<&str>,
    tags: Option<&str>,
    text: Option<&str>,
    context: &Context,
) -> Result<(), CliError> {
    let note_id = parse_note_id(id)?;
    let changes = NoteChanges {
        kind: kind.map(|kind| kind.trim().to_string()),
        tags: tags.map(|tags| parse_tags(Some(tags))),
        text: text.map(str::to_string),
    };

    let settings = load_settings(&context.settings_path)?;
    let updated = context
        .open_notes(&settings)
        .update_note(note_id, changes)
        .await?;

    println!("{}", updated.id);
    Ok(())
}
