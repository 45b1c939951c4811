use serde::{Deserialize, Serialize};

/// Discrete input commands, processed one at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", content = "text", rename_all = "snake_case")]
pub enum Command {
    Insert(String),
    Backspace,
    Delete,
    MoveLeft,
    MoveRight,
    MoveHome,
    MoveEnd,
    SelectPrev,
    SelectNext,
    Confirm,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Unchanged,
    /// Query text changed; results must be recomputed.
    QueryChanged,
    /// Launch the result at this position in the current result list.
    Launch(usize),
    Exit,
}

/// Live query text, cursor (in characters) and selected result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    text: String,
    cursor: usize,
    selected: usize,
}

impl QueryState {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Replaces the whole query, leaving the cursor at the end.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.char_len();
    }

    pub fn apply(&mut self, command: Command, result_len: usize) -> Transition {
        match command {
            Command::Insert(input) => {
                let mut chars = input.chars();
                let (Some(c), None) = (chars.next(), chars.next()) else {
                    return Transition::Unchanged;
                };
                if c.is_control() {
                    return Transition::Unchanged;
                }
                let at = self.byte_offset(self.cursor);
                self.text.insert(at, c);
                self.cursor += 1;
                Transition::QueryChanged
            }
            Command::Backspace => {
                if self.cursor == 0 {
                    return Transition::Unchanged;
                }
                let at = self.byte_offset(self.cursor - 1);
                self.text.remove(at);
                self.cursor -= 1;
                Transition::QueryChanged
            }
            Command::Delete => {
                if self.cursor >= self.char_len() {
                    return Transition::Unchanged;
                }
                let at = self.byte_offset(self.cursor);
                self.text.remove(at);
                Transition::QueryChanged
            }
            Command::MoveLeft => {
                self.cursor = self.cursor.saturating_sub(1);
                Transition::Unchanged
            }
            Command::MoveRight => {
                self.cursor = (self.cursor + 1).min(self.char_len());
                Transition::Unchanged
            }
            Command::MoveHome => {
                self.cursor = 0;
                Transition::Unchanged
            }
            Command::MoveEnd => {
                self.cursor = self.char_len();
                Transition::Unchanged
            }
            Command::SelectPrev => {
                if result_len > 0 {
                    self.selected = if self.selected > 0 {
                        self.selected - 1
                    } else {
                        result_len - 1
                    };
                }
                Transition::Unchanged
            }
            Command::SelectNext => {
                if result_len > 0 {
                    self.selected = if self.selected + 1 < result_len {
                        self.selected + 1
                    } else {
                        0
                    };
                }
                Transition::Unchanged
            }
            Command::Confirm => {
                if self.selected < result_len {
                    Transition::Launch(self.selected)
                } else {
                    Transition::Unchanged
                }
            }
            Command::Cancel => Transition::Exit,
        }
    }

    /// Resets the selection to the top once it no longer points at a result.
    pub fn clamp_selection(&mut self, result_len: usize) {
        if self.selected >= result_len {
            self.selected = 0;
        }
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(offset, _)| offset)
            .unwrap_or(self.text.len())
    }
}
