/// Lowercase, hyphen-separated, URL-safe form of a display name.
///
/// Runs of anything other than ASCII letters and digits collapse into a single
/// `-`; leading and trailing separators are dropped. Accented Latin letters are
/// folded to their base letter first.
pub fn slugify(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_dash = false;
    for ch in input.chars().flat_map(fold_char) {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    out
}

/// Cut a slug to at most `max` bytes without leaving a trailing separator.
/// Slugs are ASCII, so byte and character counts agree.
pub fn truncate(slug: &str, max: usize) -> &str {
    if slug.len() <= max {
        return slug;
    }
    slug[..max].trim_end_matches('-')
}

fn fold_char(c: char) -> Vec<char> {
    match c {
        '&' => vec![' ', 'a', 'n', 'd', ' '],
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => vec!['a'],
        'ç' | 'Ç' => vec!['c'],
        'è' | 'é' | 'ê' | 'ë' | 'È' | 'É' | 'Ê' | 'Ë' => vec!['e'],
        'ì' | 'í' | 'î' | 'ï' | 'Ì' | 'Í' | 'Î' | 'Ï' => vec!['i'],
        'ñ' | 'Ñ' => vec!['n'],
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' => vec!['o'],
        'ù' | 'ú' | 'û' | 'ü' | 'Ù' | 'Ú' | 'Û' | 'Ü' => vec!['u'],
        'ß' => vec!['s', 's'],
        other => vec![other],
    }
}
