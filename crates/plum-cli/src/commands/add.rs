use plum_core::models::NoteDraft;

use crate::commands::common::{parse_tags, resolve_note_text, Context};
use crate::error::CliError;
use crate::settings_file::load_settings;

pub async fn run_add(
    kind: &str,
    tags: Option<&str>,
    text_parts: &[String],
    context: &Context,
) -> Result<(), CliError> {
    let text = resolve_note_text(text_parts)?;
    let settings = load_settings(&context.settings_path)?;

    let notes = context.open_notes(&settings);
    let note = notes
        .add_note(NoteDraft::new(kind.trim(), parse_tags(tags), text))
        .await?;

    println!("{}", note.id);
    Ok(())
}
