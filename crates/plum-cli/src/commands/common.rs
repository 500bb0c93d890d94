use std::env;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use chrono::Local;
use plum_api::config::default_notes_path;
use plum_core::models::parse_tag_list;
use plum_core::services::NoteService;
use plum_core::{Collection, Note, NoteId, Settings};
use serde::Serialize;

use crate::error::CliError;

/// Paths every command works against
#[derive(Debug, Clone)]
pub struct Context {
    pub notes_path: PathBuf,
    pub settings_path: PathBuf,
}

impl Context {
    pub fn open_notes(&self, settings: &Settings) -> NoteService {
        NoteService::open_path(self.notes_path.clone(), settings.author.clone())
    }
}

#[derive(Debug, Serialize)]
pub struct NoteListItem {
    pub id: i64,
    pub kind: String,
    pub tags: Vec<String>,
    pub text: String,
    pub date: String,
    pub author: String,
    pub synced: bool,
}

pub fn resolve_notes_path(cli_notes_path: Option<PathBuf>) -> Result<PathBuf, CliError> {
    cli_notes_path
        .or_else(|| env::var_os("PLUM_NOTES_PATH").map(PathBuf::from))
        .or_else(default_notes_path)
        .ok_or_else(|| CliError::Config("Failed to resolve notes data directory".to_string()))
}

pub fn parse_note_id(id: &str) -> Result<NoteId, CliError> {
    id.parse::<NoteId>()
        .map_err(|_| CliError::InvalidNoteId(id.trim().to_string()))
}

pub fn parse_tags(tags: Option<&str>) -> Vec<String> {
    tags.map(parse_tag_list).unwrap_or_default()
}

pub fn resolve_note_text(text_parts: &[String]) -> Result<String, CliError> {
    if let Some(text) = normalize_content(&text_parts.join(" ")) {
        return Ok(text);
    }

    if let Some(text) = read_piped_stdin()? {
        return Ok(text);
    }

    Err(CliError::EmptyContent)
}

pub fn normalize_content(content: &str) -> Option<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn read_piped_stdin() -> Result<Option<String>, CliError> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    stdin.lock().read_to_string(&mut buffer)?;
    Ok(normalize_content(&buffer))
}

pub fn format_note_date(note: &Note) -> String {
    note.date
        .with_timezone(&Local)
        .format("%A, %-d %B %Y at %H:%M:%S")
        .to_string()
        .to_lowercase()
}

pub fn format_note_header(note: &Note) -> String {
    let mut header = format!(
        "id: {} | {} | kind: {}",
        note.id,
        format_note_date(note),
        note.kind
    );
    if !note.tags.is_empty() {
        header.push_str(&format!(" | tags: [{}]", note.tags.join(", ")));
    }
    if !note.author.is_empty() {
        header.push_str(&format!(" | by: {}", note.author));
    }
    header
}

pub fn format_note_lines(notes: &Collection) -> Vec<String> {
    notes
        .iter()
        .flat_map(|note| {
            [
                format_note_header(note),
                format!("'{}'", note.text),
                String::new(),
            ]
        })
        .collect()
}

pub fn note_to_list_item(note: &Note) -> NoteListItem {
    NoteListItem {
        id: note.id.get(),
        kind: note.kind.clone(),
        tags: note.tags.clone(),
        text: note.text.clone(),
        date: note.date.to_rfc3339(),
        author: note.author.clone(),
        synced: note.synced,
    }
}

pub fn display_path(path: &Path) -> String {
    path.display().to_string()
}
