use crate::model::{
    normalize_for_search, AppRecord, Application, Keyword, DETAIL_WEIGHT, NAME_WEIGHT,
};

/// Splits on single spaces, dropping the empty pieces left by runs of spaces.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(' ').filter(|token| !token.is_empty())
}

pub fn build_keywords(record: &AppRecord) -> Vec<Keyword> {
    let mut keywords = Vec::new();

    if let Some(hints) = record.keyword_hints.as_deref() {
        push_tokens(&mut keywords, &normalize_for_search(hints), DETAIL_WEIGHT);
    }

    push_tokens(&mut keywords, &normalize_for_search(&record.name), NAME_WEIGHT);

    let details = format!("{} {}", record.generic_name, record.comment);
    push_tokens(&mut keywords, &normalize_for_search(&details), DETAIL_WEIGHT);

    keywords
}

fn push_tokens(keywords: &mut Vec<Keyword>, text: &str, weight: u32) {
    keywords.extend(tokenize(text).map(|word| Keyword::new(word, weight)));
}

pub fn index_record(record: AppRecord) -> Application {
    let keywords = build_keywords(&record);
    Application {
        id: record.id,
        name: record.name,
        generic_name: record.generic_name,
        comment: record.comment,
        launch_command: record.launch_command,
        keywords,
        count: 0,
    }
}

pub fn index_records<I>(records: I) -> Vec<Application>
where
    I: IntoIterator<Item = AppRecord>,
{
    records.into_iter().map(index_record).collect()
}
