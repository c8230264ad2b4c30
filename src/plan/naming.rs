use crate::cue::models::{AlbumMetadata, TrackRecord};

/// Placeholders understood by the naming template, in substitution order.
pub const TEMPLATE_TOKENS: [&str; 6] = ["#a", "#c", "#d", "#n", "#p", "#t"];

/// Makes a metadata value safe to use as a single path component.
///
/// Double quotes are dropped, path separators, wildcards, DEL and other
/// control characters each become `--`.
pub fn sanitize(value: &str) -> String {
    let mut safe = String::with_capacity(value.len());

    for c in value.chars().filter(|&c| c != '"') {
        match c {
            '/' | '\\' | '?' | '%' | '*' | ':' | '|' | '<' | '>' | '\x7f' | '\x00'..='\x1f' => {
                safe.push_str("--")
            }
            _ => safe.push(c),
        }
    }

    safe
}

/// Expands the naming template for one track.
///
/// Tokens are replaced strictly in [`TEMPLATE_TOKENS`] order, each pass working
/// on the output of the previous one. A value that itself contains a later
/// token (an album titled "#n", say) is substituted again by that later pass.
pub fn expand_template(template: &str, album: &AlbumMetadata, track: &TrackRecord) -> String {
    let values = [
        &album.title,
        &album.performer,
        &album.date,
        &track.index,
        &track.performer,
        &track.title,
    ];

    TEMPLATE_TOKENS
        .iter()
        .zip(values)
        .fold(template.to_string(), |name, (token, value)| {
            name.replace(token, &sanitize(value))
        })
}

/// Pulls a shared subdirectory out of the expanded names.
///
/// Only the first name decides: if it has exactly one `/`, the part before it
/// is the directory for every track and each name keeps what follows its first `/`.
pub fn split_directory(names: Vec<String>) -> (Option<String>, Vec<String>) {
    let directory = match names.first() {
        Some(first) if first.matches('/').count() == 1 => first
            .split_once('/')
            .map(|(directory, _)| directory.to_string()),
        _ => None,
    };

    match directory {
        Some(directory) => {
            let names = names
                .into_iter()
                .map(|name| match name.split('/').nth(1) {
                    Some(file_name) => file_name.to_string(),
                    None => name,
                })
                .collect();
            (Some(directory), names)
        }
        None => (None, names),
    }
}
