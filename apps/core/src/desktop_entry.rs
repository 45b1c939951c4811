use crate::model::AppRecord;

/// Reads the fields the launcher cares about from `.desktop` file text.
///
/// The first non-empty value of each field wins. `Keywords=` lines only count
/// while no launch command has been read yet, so hints listed after `Exec=`
/// are ignored.
pub fn parse_desktop_entry(id: &str, text: &str) -> AppRecord {
    let mut record = AppRecord {
        id: id.to_string(),
        ..AppRecord::default()
    };

    for line in text.lines() {
        if let Some(value) = line.strip_prefix("Name=") {
            fill_once(&mut record.name, value);
        }
        if let Some(value) = line.strip_prefix("GenericName=") {
            fill_once(&mut record.generic_name, value);
        }
        if let Some(value) = line.strip_prefix("Comment=") {
            fill_once(&mut record.comment, value);
        }
        if let Some(value) = line.strip_prefix("Exec=") {
            fill_once(&mut record.launch_command, value);
        }
        if record.launch_command.is_empty() {
            if let Some(value) = line.strip_prefix("Keywords=") {
                append_hints(&mut record.keyword_hints, value);
            }
        }
    }

    record
}

fn fill_once(field: &mut String, value: &str) {
    if field.is_empty() {
        *field = value.to_string();
    }
}

fn append_hints(hints: &mut Option<String>, value: &str) {
    match hints {
        Some(existing) => {
            existing.push(' ');
            existing.push_str(value);
        }
        None => *hints = Some(value.to_string()),
    }
}
