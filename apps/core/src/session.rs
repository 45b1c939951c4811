use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

use crate::contract::{ResultView, SessionSnapshot};
use crate::indexer::index_records;
use crate::launch::{prepare_launch, LaunchError, LaunchPlan};
use crate::model::{AppRecord, Application, RankedResult};
use crate::query_state::{Command, QueryState, Transition};
use crate::search::{match_span, rank};
use crate::style::{StyleAttribute, StyleMap};
use crate::usage_store::{self, KeyValueStore, Preferences, StoreError};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("launch error: {0}")]
    Launch(#[from] LaunchError),
    #[error("no application at index {0}")]
    UnknownApplication(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Updated,
    /// The user confirmed the application at this index.
    Launch(usize),
    Exit,
}

/// Owns the indexed applications together with the live query and results.
pub struct LauncherSession {
    apps: Vec<Application>,
    query: QueryState,
    results: Vec<RankedResult>,
    style: StyleMap,
}

impl LauncherSession {
    pub fn new(mut apps: Vec<Application>, preferences: Preferences) -> Self {
        for app in &mut apps {
            app.count = preferences.count_for(&app.id);
        }
        info!(applications = apps.len(), "launcher session ready");

        Self {
            apps,
            query: QueryState::default(),
            results: Vec::new(),
            style: preferences.style,
        }
    }

    pub fn from_records(records: Vec<AppRecord>, preferences: Preferences) -> Self {
        Self::new(index_records(records), preferences)
    }

    pub fn handle(&mut self, command: Command) -> SessionEvent {
        match self.query.apply(command, self.results.len()) {
            Transition::QueryChanged => {
                self.rerank();
                SessionEvent::Updated
            }
            Transition::Unchanged => SessionEvent::Updated,
            Transition::Launch(position) => match self.results.get(position) {
                Some(result) => SessionEvent::Launch(result.app),
                None => SessionEvent::Updated,
            },
            Transition::Exit => SessionEvent::Exit,
        }
    }

    pub fn set_query(&mut self, text: &str) {
        self.query.set_text(text);
        self.rerank();
    }

    fn rerank(&mut self) {
        self.results = rank(&self.apps, self.query.text());
        self.query.clamp_selection(self.results.len());
        debug!(query = self.query.text(), results = self.results.len(), "re-ranked");
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn results(&self) -> &[RankedResult] {
        &self.results
    }

    pub fn applications(&self) -> &[Application] {
        &self.apps
    }

    pub fn application(&self, index: usize) -> Option<&Application> {
        self.apps.get(index)
    }

    pub fn prepare_launch(
        &self,
        index: usize,
        working_dir: &Path,
    ) -> Result<LaunchPlan, SessionError> {
        let app = self
            .application(index)
            .ok_or(SessionError::UnknownApplication(index))?;
        Ok(prepare_launch(app, working_dir)?)
    }

    /// Bumps the launch count and persists usage and style.
    pub fn record_launch(
        &mut self,
        index: usize,
        store: &mut dyn KeyValueStore,
    ) -> Result<(), SessionError> {
        let app = self
            .apps
            .get_mut(index)
            .ok_or(SessionError::UnknownApplication(index))?;
        app.count = app.count.saturating_add(1);
        info!(id = %app.id, count = app.count, "recorded launch");
        self.save(store)
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), SessionError> {
        usage_store::save(store, &self.apps, &self.style)?;
        Ok(())
    }

    pub fn style(&self) -> &StyleMap {
        &self.style
    }

    pub fn set_style(&mut self, attribute: StyleAttribute, value: &str) {
        self.style.set(attribute, value);
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let query = self.query.text();
        let results = self
            .results
            .iter()
            .filter_map(|result| {
                let app = self.apps.get(result.app)?;
                Some(ResultView {
                    index: result.app,
                    id: app.id.clone(),
                    name: app.name.clone(),
                    comment: app.comment.clone(),
                    score: result.score,
                    name_match: match_span(&app.name, query),
                    comment_match: match_span(&app.comment, query),
                })
            })
            .collect();

        SessionSnapshot {
            query: query.to_string(),
            cursor: self.query.cursor(),
            selected: self.query.selected(),
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{LauncherSession, SessionEvent};
    use crate::discovery::{DiscoveryProvider, RecordProvider};
    use crate::query_state::Command;
    use crate::usage_store::{MemoryStore, Preferences};

    fn session() -> LauncherSession {
        let records = RecordProvider::deterministic_fixture().discover().unwrap();
        LauncherSession::from_records(records, Preferences::default())
    }

    fn type_text(session: &mut LauncherSession, text: &str) {
        for c in text.chars() {
            session.handle(Command::Insert(c.to_string()));
        }
    }

    #[test]
    fn typing_reranks_and_navigation_does_not() {
        let mut session = session();
        type_text(&mut session, "term");
        assert_eq!(session.results().len(), 1);
        let before = session.results().to_vec();
        session.handle(Command::MoveHome);
        assert_eq!(session.results(), before.as_slice());
    }

    #[test]
    fn selection_resets_when_results_shrink() {
        let mut session = session();
        type_text(&mut session, "e");
        assert!(session.results().len() >= 2);
        session.handle(Command::SelectPrev);
        assert_eq!(session.query().selected(), session.results().len() - 1);
        type_text(&mut session, "rm");
        assert_eq!(session.query().selected(), 0);
    }

    #[test]
    fn confirm_without_results_is_a_no_op() {
        let mut session = session();
        assert_eq!(session.handle(Command::Confirm), SessionEvent::Updated);
        assert_eq!(session.handle(Command::Cancel), SessionEvent::Exit);
    }

    #[test]
    fn record_launch_persists_counts() {
        let mut session = session();
        type_text(&mut session, "files");
        let SessionEvent::Launch(index) = session.handle(Command::Confirm) else {
            panic!("expected a launch request");
        };
        let mut store = MemoryStore::default();
        session.record_launch(index, &mut store).unwrap();

        let id = session.application(index).unwrap().id.clone();
        assert_eq!(store.entries().unwrap(), &[(id, "1".to_string())]);
    }
}
