//! Query engine: composable filters over a collection
//!
//! Every filter returns a new collection and never touches its input. A
//! [`Query`] chains filters left to right, each one narrowing the previous
//! result.

mod date_range;

use crate::error::{Error, Result};
use crate::models::{parse_tag_list, Collection, NoteId};

pub use date_range::{DateRange, DATE_FORMAT};

/// Notes with exactly this id (zero or one)
pub fn by_id(id: NoteId, notes: &Collection) -> Collection {
    notes.get(id).cloned().into_iter().collect()
}

pub fn by_kind(kind: &str, notes: &Collection) -> Collection {
    notes.filtered(|note| note.kind == kind)
}

pub fn by_tag(tag: &str, notes: &Collection) -> Collection {
    notes.filtered(|note| note.has_tag(tag))
}

/// Notes carrying at least one of `tags`
pub fn by_any_tag<S: AsRef<str>>(tags: &[S], notes: &Collection) -> Collection {
    let mut matched = Collection::new();
    for tag in tags {
        matched.extend_from(by_tag(tag.as_ref(), notes));
    }
    matched
}

/// Notes carrying every one of `tags`
pub fn by_all_tags<S: AsRef<str>>(tags: &[S], notes: &Collection) -> Collection {
    tags.iter()
        .fold(notes.clone(), |narrowed, tag| by_tag(tag.as_ref(), &narrowed))
}

pub fn by_author(author: &str, notes: &Collection) -> Collection {
    notes.filtered(|note| note.author == author)
}

pub fn by_date_range(range: &DateRange, notes: &Collection) -> Collection {
    notes.filtered(|note| range.contains(&note.date))
}

/// One filter clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    Id(NoteId),
    Kind(String),
    TagsAny(Vec<String>),
    TagsAll(Vec<String>),
    DateRange(DateRange),
    Author(String),
}

impl Filter {
    /// Build a filter from a `(mode, value)` clause.
    ///
    /// Modes: `id`, `kind`, `tags-any`, `tags-all`, `date-range`, `author`,
    /// plus the short and long flag spellings (`-k`, `--kind`, ...).
    pub fn parse(mode: &str, value: &str) -> Result<Self> {
        match mode {
            "id" | "-i" | "--id" => value
                .parse::<NoteId>()
                .map(Self::Id)
                .map_err(|_| Error::InvalidQuery(format!("invalid note id '{value}'"))),
            "kind" | "-k" | "--kind" => Ok(Self::Kind(value.to_string())),
            "tags-any" | "tags" | "-t" | "--tags" => Ok(Self::TagsAny(required_tags(value)?)),
            "tags-all" | "exact-tags" | "-e" | "--exact-tags" => {
                Ok(Self::TagsAll(required_tags(value)?))
            }
            "date-range" | "date" | "-d" | "--date" => DateRange::parse(value).map(Self::DateRange),
            "author" | "-a" | "--author" => Ok(Self::Author(value.to_string())),
            other => Err(Error::InvalidQuery(format!(
                "unknown filter '{other}' (expected id, kind, tags-any, tags-all, date-range, author)"
            ))),
        }
    }

    pub fn apply(&self, notes: &Collection) -> Collection {
        match self {
            Self::Id(id) => by_id(*id, notes),
            Self::Kind(kind) => by_kind(kind, notes),
            Self::TagsAny(tags) => by_any_tag(tags, notes),
            Self::TagsAll(tags) => by_all_tags(tags, notes),
            Self::DateRange(range) => by_date_range(range, notes),
            Self::Author(author) => by_author(author, notes),
        }
    }
}

fn required_tags(value: &str) -> Result<Vec<String>> {
    let tags = parse_tag_list(value);
    if tags.is_empty() {
        Err(Error::InvalidQuery("tag filter needs at least one tag".to_string()))
    } else {
        Ok(tags)
    }
}

/// A left-to-right AND chain of filters; empty matches everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    filters: Vec<Filter>,
}

impl Query {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `mode value mode value ...`
    pub fn from_clauses<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        if args.len() % 2 != 0 {
            return Err(Error::InvalidQuery(format!(
                "filters come in mode/value pairs, got {} arguments",
                args.len()
            )));
        }

        let filters = args
            .chunks_exact(2)
            .map(|pair| Filter::parse(pair[0].as_ref(), pair[1].as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { filters })
    }

    #[must_use]
    pub fn with(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn apply(&self, notes: &Collection) -> Collection {
        self.filters
            .iter()
            .fold(notes.clone(), |narrowed, filter| filter.apply(&narrowed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Note, NoteDraft};
    use chrono::{FixedOffset, Local, TimeZone};
    use pretty_assertions::assert_eq;

    fn note(id: i64, kind: &str, tags: &[&str], author: &str) -> Note {
        Note::from_draft(
            NoteId::new(id),
            NoteDraft::new(kind, tags.iter().map(|t| (*t).to_string()).collect(), "text"),
            author,
            FixedOffset::east_opt(0).unwrap().timestamp_opt(id, 0).unwrap(),
        )
    }

    fn ids(notes: &Collection) -> Vec<i64> {
        notes.ids().map(NoteId::get).collect()
    }

    fn tagged() -> Collection {
        [note(1, "todo", &["a", "b"], ""), note(2, "todo", &["a"], "")]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_tags_all_requires_every_tag() {
        let query = Query::from_clauses(&["tags-all", "a,b"]).unwrap();
        assert_eq!(ids(&query.apply(&tagged())), vec![1]);
    }

    #[test]
    fn test_tags_any_unions_matches() {
        let query = Query::from_clauses(&["tags-any", "a,b"]).unwrap();
        assert_eq!(ids(&query.apply(&tagged())), vec![1, 2]);
    }

    #[test]
    fn test_tags_any_ignores_untagged() {
        let notes: Collection = [note(1, "x", &["a"], ""), note(2, "x", &[], "")]
            .into_iter()
            .collect();
        assert_eq!(ids(&by_any_tag(&["a", "zzz"], &notes)), vec![1]);
    }

    #[test]
    fn test_absent_id_is_empty_not_error() {
        let query = Query::from_clauses(&["id", "999"]).unwrap();
        assert!(query.apply(&tagged()).is_empty());
    }

    #[test]
    fn test_id_matches_single_note() {
        assert_eq!(ids(&by_id(NoteId::new(2), &tagged())), vec![2]);
    }

    #[test]
    fn test_kind_and_author_exact_match() {
        let notes: Collection = [
            note(1, "todo", &[], "ana"),
            note(2, "Todo", &[], ""),
            note(3, "journal", &[], "ana"),
        ]
        .into_iter()
        .collect();

        assert_eq!(ids(&by_kind("todo", &notes)), vec![1]);
        assert_eq!(ids(&by_author("ana", &notes)), vec![1, 3]);
        assert_eq!(ids(&by_author("", &notes)), vec![2]);
    }

    #[test]
    fn test_clauses_narrow_left_to_right() {
        let notes: Collection = [
            note(1, "todo", &["work"], "ana"),
            note(2, "todo", &["home"], "ana"),
            note(3, "journal", &["work"], "ana"),
        ]
        .into_iter()
        .collect();

        let query = Query::from_clauses(&["--kind", "todo", "-t", "work"]).unwrap();
        assert_eq!(ids(&query.apply(&notes)), vec![1]);
        assert_eq!(notes.len(), 3);
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let empty: [&str; 0] = [];
        assert_eq!(ids(&Query::from_clauses(&empty).unwrap().apply(&tagged())), vec![1, 2]);
    }

    #[test]
    fn test_date_range_filter() {
        let on = |d: u32, h: u32, m: u32, s: u32| {
            Local
                .with_ymd_and_hms(2024, 2, d, h, m, s)
                .earliest()
                .unwrap()
                .fixed_offset()
        };
        let mut inside = note(1, "x", &[], "");
        inside.date = on(3, 23, 59, 59);
        let mut outside = note(2, "x", &[], "");
        outside.date = on(4, 0, 0, 1);
        let notes: Collection = [inside, outside].into_iter().collect();

        let query = Query::from_clauses(&["date-range", "01/02/2024,03/02/2024"]).unwrap();
        assert_eq!(ids(&query.apply(&notes)), vec![1]);
    }

    #[test]
    fn test_invalid_clauses_are_rejected() {
        let cases: [&[&str]; 5] = [
            &["kind"],
            &["colour", "red"],
            &["id", "abc"],
            &["tags-all", " , "],
            &["kind", "todo", "date", "01/02/2024"],
        ];
        for clauses in cases {
            let error = Query::from_clauses(clauses).unwrap_err();
            assert!(matches!(error, Error::InvalidQuery(_)), "{clauses:?}");
        }
    }

    #[test]
    fn test_builder_matches_parsed_query() {
        let built = Query::new().with(Filter::Kind("todo".into()));
        assert_eq!(built, Query::from_clauses(&["kind", "todo"]).unwrap());
    }
}
