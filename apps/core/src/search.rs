use crate::model::{normalize_for_search, Application, MatchSpan, RankedResult};

pub const MAX_RESULTS: usize = 10;

const POSITION_BASE: i64 = 100;
const PREFIX_MULTIPLIER: i64 = 10_000;
const INFIX_MULTIPLIER: i64 = 100;

/// Ranks `apps` against `query`, best first, capped at [`MAX_RESULTS`].
///
/// Results carry indices into `apps`. Equal scores come back in no particular
/// order.
pub fn rank(apps: &[Application], query: &str) -> Vec<RankedResult> {
    let normalized_query = normalize_for_search(query);
    if normalized_query.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<RankedResult> = apps
        .iter()
        .enumerate()
        .filter_map(|(index, app)| {
            score_application(app, &normalized_query)
                .map(|score| RankedResult { app: index, score })
        })
        .collect();

    scored.sort_unstable_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(MAX_RESULTS);
    scored
}

/// Scores against the first keyword containing the query; later keywords are
/// never looked at, even if they would score higher.
pub fn score_application(app: &Application, normalized_query: &str) -> Option<i64> {
    if normalized_query.is_empty() {
        return None;
    }

    let (position, keyword, match_offset) = app
        .keywords
        .iter()
        .enumerate()
        .find_map(|(position, keyword)| {
            keyword
                .word
                .find(normalized_query)
                .map(|offset| (position, keyword, offset))
        })?;

    let multiplier = if match_offset == 0 {
        PREFIX_MULTIPLIER
    } else {
        INFIX_MULTIPLIER
    };
    let score = (POSITION_BASE - position as i64) * i64::from(keyword.weight) * multiplier
        + i64::from(app.count);

    (score > 0).then_some(score)
}

/// Locates the query inside a displayed field for highlighting.
pub fn match_span(text: &str, query: &str) -> Option<MatchSpan> {
    let normalized_query = normalize_for_search(query);
    if normalized_query.is_empty() {
        return None;
    }

    normalize_for_search(text)
        .find(&normalized_query)
        .map(|start| MatchSpan {
            start,
            len: normalized_query.len(),
        })
}
