use plum_core::query::Query;

use crate::commands::common::{format_note_lines, note_to_list_item, Context, NoteListItem};
use crate::error::CliError;
use crate::settings_file::load_settings;

pub async fn run_list(clauses: &[String], as_json: bool, context: &Context) -> Result<(), CliError> {
    let query = Query::from_clauses(clauses)?;
    let settings = load_settings(&context.settings_path)?;
    let notes = context.open_notes(&settings).query_notes(&query).await?;

    if as_json {
        let json_items = notes
            .iter()
            .map(note_to_list_item)
            .collect::<Vec<NoteListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
        return Ok(());
    }

    if notes.is_empty() {
        println!("no notes found.");
        return Ok(());
    }

    for line in format_note_lines(&notes) {
        println!("{line}");
    }
    Ok(())
}
