use serde::{Deserialize, Serialize};

/// Weight carried by tokens taken from an application's display name.
pub const NAME_WEIGHT: u32 = 1000;
/// Weight carried by tokens from generic name, comment and keyword hints.
pub const DETAIL_WEIGHT: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    pub word: String,
    pub weight: u32,
}

impl Keyword {
    pub fn new(word: &str, weight: u32) -> Self {
        Self {
            word: word.to_string(),
            weight,
        }
    }
}

/// Raw application metadata as handed over by a record source.
///
/// Absent fields are empty strings; they never match a non-empty query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppRecord {
    pub id: String,
    pub name: String,
    pub generic_name: String,
    pub comment: String,
    pub launch_command: String,
    pub keyword_hints: Option<String>,
}

impl AppRecord {
    pub fn new(
        id: &str,
        name: &str,
        generic_name: &str,
        comment: &str,
        launch_command: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            generic_name: generic_name.to_string(),
            comment: comment.to_string(),
            launch_command: launch_command.to_string(),
            keyword_hints: None,
        }
    }

    pub fn with_keyword_hints(mut self, hints: &str) -> Self {
        self.keyword_hints = Some(hints.to_string());
        self
    }
}

/// An indexed application. Everything but `count` is fixed after indexing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    pub id: String,
    pub name: String,
    pub generic_name: String,
    pub comment: String,
    pub launch_command: String,
    pub keywords: Vec<Keyword>,
    pub count: u32,
}

impl Application {
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }
}

/// A ranked hit. `app` indexes into the application list the ranking ran over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedResult {
    pub app: usize,
    pub score: i64,
}

/// Byte range of a query occurrence inside a displayed field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSpan {
    pub start: usize,
    pub len: usize,
}

/// ASCII-only lower-casing keeps byte offsets identical between the original
/// and the normalized text.
pub fn normalize_for_search(input: &str) -> String {
    input.to_ascii_lowercase()
}
