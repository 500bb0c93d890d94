use chrono::DateTime;
use clap::Parser;
use plum_core::models::NoteDraft;
use plum_core::{Collection, Note, NoteId, Settings};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use crate::cli::{Cli, Commands};
use crate::commands::add::run_add;
use crate::commands::common::{
    format_note_header, format_note_lines, normalize_content, note_to_list_item, parse_note_id,
    parse_tags, resolve_notes_path, Context,
};
use crate::commands::list::run_list;
use crate::commands::remove::run_remove;
use crate::commands::settings::run_settings;
use crate::commands::sync::{resolve_sync_address, run_sync};
use crate::commands::update::run_update;
use crate::error::CliError;
use crate::settings_file::{load_settings, update_setting};

fn test_context(dir: &TempDir) -> Context {
    Context {
        notes_path: dir.path().join("data").join("notes.json"),
        settings_path: dir.path().join("config").join("settings.json"),
    }
}

fn sample_note(id: i64, tags: &[&str], author: &str) -> Note {
    Note::from_draft(
        NoteId::new(id),
        NoteDraft::new(
            "todo",
            tags.iter().map(ToString::to_string).collect(),
            "buy milk",
        ),
        author.to_string(),
        DateTime::parse_from_rfc3339("2024-03-01T09:30:00+00:00").unwrap(),
    )
}

#[test]
fn normalize_content_trims_and_rejects_empty() {
    assert_eq!(normalize_content("  hello  "), Some("hello".to_string()));
    assert_eq!(normalize_content(" \n\t "), None);
}

#[test]
fn normalize_content_keeps_multiline_text() {
    assert_eq!(
        normalize_content("line 1\nline 2\n"),
        Some("line 1\nline 2".to_string())
    );
}

#[test]
fn parse_note_id_rejects_non_numeric_input() {
    assert_eq!(parse_note_id(" 1709281800 ").unwrap(), NoteId::new(1_709_281_800));
    assert!(matches!(
        parse_note_id("abc").unwrap_err(),
        CliError::InvalidNoteId(id) if id == "abc"
    ));
}

#[test]
fn parse_tags_splits_and_trims() {
    assert_eq!(parse_tags(Some(" work, urgent ,,")), vec!["work", "urgent"]);
    assert!(parse_tags(None).is_empty());
}

#[test]
fn resolve_notes_path_prefers_explicit() {
    let explicit = std::path::PathBuf::from("/tmp/custom-notes.json");
    assert_eq!(resolve_notes_path(Some(explicit.clone())).unwrap(), explicit);
}

#[test]
fn cli_parses_bare_word_list_clauses() {
    let cli = Cli::try_parse_from(["plum", "list", "kind", "todo", "tags-all", "work,urgent"])
        .unwrap();
    match cli.command {
        Some(Commands::List { json, clauses }) => {
            assert!(!json);
            assert_eq!(clauses, vec!["kind", "todo", "tags-all", "work,urgent"]);
        }
        _ => panic!("expected list command"),
    }
}

#[test]
fn cli_passes_flag_style_clauses_through() {
    let cli = Cli::try_parse_from(["plum", "l", "--json", "--kind", "todo", "-t", "work"]).unwrap();
    match cli.command {
        Some(Commands::List { json, clauses }) => {
            assert!(json);
            assert_eq!(clauses, vec!["--kind", "todo", "-t", "work"]);
        }
        _ => panic!("expected list command"),
    }
}

#[test]
fn cli_accepts_command_aliases() {
    let cli = Cli::try_parse_from(["plum", "psync", "10.0.0.5:8080"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Sync { address: Some(ref address) }) if address == "10.0.0.5:8080"
    ));

    let cli = Cli::try_parse_from(["plum", "dsync", "9000"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::Daemon { port: Some(9000) })));

    let cli = Cli::try_parse_from(["plum", "rm", "42"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::Remove { ref id }) if id == "42"));
}

#[test]
fn cli_settings_key_requires_value() {
    assert!(Cli::try_parse_from(["plum", "settings", "author"]).is_err());
    assert!(Cli::try_parse_from(["plum", "settings", "author", "ana"]).is_ok());
    assert!(Cli::try_parse_from(["plum", "settings"]).is_ok());
}

#[test]
fn format_note_header_includes_tags_and_author() {
    let note = sample_note(1_709_281_800, &["work", "urgent"], "ana");
    let header = format_note_header(&note);

    assert!(header.starts_with("id: 1709281800 | "));
    assert!(header.contains(" at "));
    assert!(header.ends_with(" | kind: todo | tags: [work, urgent] | by: ana"));
    assert_eq!(header, header.to_lowercase());
}

#[test]
fn format_note_header_omits_empty_tags_and_author() {
    let note = sample_note(1, &[], "");
    let header = format_note_header(&note);

    assert!(header.ends_with(" | kind: todo"));
    assert!(!header.contains("tags:"));
    assert!(!header.contains("by:"));
}

#[test]
fn format_note_lines_quotes_text_in_id_order() {
    let notes: Collection = [sample_note(2, &[], "ana"), sample_note(1, &[], "ana")]
        .into_iter()
        .collect();
    let lines = format_note_lines(&notes);

    assert_eq!(lines.len(), 6);
    assert!(lines[0].starts_with("id: 1 | "));
    assert_eq!(lines[1], "'buy milk'");
    assert!(lines[3].starts_with("id: 2 | "));
}

#[test]
fn note_to_list_item_keeps_offset_timestamp() {
    let item = note_to_list_item(&sample_note(7, &["a"], "ana"));

    assert_eq!(item.id, 7);
    assert_eq!(item.date, "2024-03-01T09:30:00+00:00");
    assert!(!item.synced);
}

#[test]
fn resolve_sync_address_prefers_explicit_then_setting() {
    let mut settings = Settings::default();
    assert!(matches!(
        resolve_sync_address(None, &settings).unwrap_err(),
        CliError::SyncNotConfigured
    ));

    settings.set("syncserver", "10.0.0.5:8080");
    assert_eq!(resolve_sync_address(None, &settings).unwrap(), "10.0.0.5:8080");
    assert_eq!(
        resolve_sync_address(Some(" 127.0.0.1:9000 "), &settings).unwrap(),
        "127.0.0.1:9000"
    );
    assert_eq!(
        resolve_sync_address(Some("  "), &settings).unwrap(),
        "10.0.0.5:8080"
    );
}

#[tokio::test]
async fn add_update_remove_roundtrip_against_notes_file() {
    let dir = tempfile::tempdir().unwrap();
    let context = test_context(&dir);
    update_setting(&context.settings_path, "author", "ana").unwrap();

    run_add(
        "todo",
        Some("work"),
        &["buy".to_string(), "milk".to_string()],
        &context,
    )
    .await
    .unwrap();

    let settings = load_settings(&context.settings_path).unwrap();
    let notes = context.open_notes(&settings).list_notes().await.unwrap();
    assert_eq!(notes.len(), 1);
    let note = notes.iter().next().unwrap().clone();
    assert_eq!(note.text, "buy milk");
    assert_eq!(note.tags, vec!["work"]);
    assert_eq!(note.author, "ana");

    let id = note.id.to_string();
    run_update(&id, None, Some("home"), Some("buy oat milk"), &context)
        .await
        .unwrap();
    let updated = context
        .open_notes(&settings)
        .get_note(note.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.kind, "todo");
    assert_eq!(updated.tags, vec!["home"]);
    assert_eq!(updated.text, "buy oat milk");

    run_list(&["kind".to_string(), "todo".to_string()], true, &context)
        .await
        .unwrap();

    run_remove(&id, &context).await.unwrap();
    assert!(context
        .open_notes(&settings)
        .list_notes()
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn update_rejects_notes_of_another_author() {
    let dir = tempfile::tempdir().unwrap();
    let context = test_context(&dir);
    update_setting(&context.settings_path, "author", "ana").unwrap();
    run_add("todo", None, &["mine".to_string()], &context)
        .await
        .unwrap();

    let settings = load_settings(&context.settings_path).unwrap();
    let id = context
        .open_notes(&settings)
        .list_notes()
        .await
        .unwrap()
        .ids()
        .next()
        .unwrap();

    update_setting(&context.settings_path, "author", "bo").unwrap();
    let error = run_update(&id.to_string(), Some("journal"), None, None, &context)
        .await
        .unwrap_err();
    assert!(matches!(error, CliError::Core(plum_core::Error::NotOwner(_))));
}

#[tokio::test]
async fn remove_missing_note_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let context = test_context(&dir);

    let error = run_remove("12345", &context).await.unwrap_err();
    assert!(matches!(
        error,
        CliError::Core(plum_core::Error::NoteNotFound(_))
    ));
}

#[tokio::test]
async fn list_rejects_unpaired_clause() {
    let dir = tempfile::tempdir().unwrap();
    let context = test_context(&dir);

    let error = run_list(&["kind".to_string()], false, &context)
        .await
        .unwrap_err();
    assert!(matches!(
        error,
        CliError::Core(plum_core::Error::InvalidQuery(_))
    ));
}

#[test]
fn settings_command_rejects_unknown_key() {
    let dir = tempfile::tempdir().unwrap();
    let context = test_context(&dir);

    let error = run_settings(Some("theme"), Some("dark"), &context).unwrap_err();
    assert!(matches!(error, CliError::UnknownSetting(_)));
}

#[tokio::test]
async fn sync_requires_configured_server() {
    let dir = tempfile::tempdir().unwrap();
    let context = test_context(&dir);

    let error = run_sync(None, &context).await.unwrap_err();
    assert!(matches!(error, CliError::SyncNotConfigured));
}

#[tokio::test]
async fn sync_against_closed_port_is_unreachable_and_keeps_notes_synced() {
    let dir = tempfile::tempdir().unwrap();
    let context = test_context(&dir);
    run_add("todo", None, &["offline".to_string()], &context)
        .await
        .unwrap();

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap().to_string();
    drop(listener);

    let error = run_sync(Some(&address), &context).await.unwrap_err();
    assert!(matches!(
        error,
        CliError::Core(plum_core::Error::SyncUnreachable(_))
    ));

    let settings = load_settings(&context.settings_path).unwrap();
    let notes = context.open_notes(&settings).list_notes().await.unwrap();
    assert_eq!(notes.len(), 1);
    assert!(notes.iter().all(|note| note.synced));
}
