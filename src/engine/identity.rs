use std::path::MAIN_SEPARATOR;

/// Derives a migration id from a unit location.
///
/// Takes the last non-empty path segment and strips a single trailing
/// `suffix` from it. An empty result means the location is not a valid unit
/// and must be filtered by the caller.
pub fn derive_id(location: &str, suffix: &str) -> String {
    derive_id_with_separator(location, suffix, MAIN_SEPARATOR)
}

fn derive_id_with_separator(location: &str, suffix: &str, separator: char) -> String {
    let Some(segment) = location.rsplit(separator).find(|s| !s.is_empty()) else {
        return String::new();
    };

    if suffix.is_empty() {
        return segment.to_string();
    }

    segment.strip_suffix(suffix).unwrap_or(segment).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(parts: &[&str]) -> String {
        let sep = MAIN_SEPARATOR.to_string();
        format!("{}{}", sep, parts.join(&sep))
    }

    #[test]
    fn empty_location_gives_empty_id() {
        assert_eq!(derive_id("", ".sql"), "");
    }

    #[test]
    fn separator_only_gives_empty_id() {
        let sep = MAIN_SEPARATOR.to_string();
        assert_eq!(derive_id(&sep, ".sql"), "");
        assert_eq!(derive_id(&sep.repeat(3), ".sql"), "");
    }

    #[test]
    fn bare_name_is_unchanged() {
        assert_eq!(derive_id("unknown", ".sql"), "unknown");
        assert_eq!(derive_id("x", ".sql"), "x");
    }

    #[test]
    fn directory_gives_last_segment() {
        assert_eq!(derive_id(&path(&["path", "to", "dir"]), ".sql"), "dir");
    }

    #[test]
    fn trailing_separator_is_ignored() {
        let location = format!("{}{}", path(&["path", "to", "dir"]), MAIN_SEPARATOR);
        assert_eq!(derive_id(&location, ".sql"), "dir");
    }

    #[test]
    fn other_extensions_are_kept() {
        assert_eq!(derive_id(&path(&["path", "to", "file.rs"]), ".sql"), "file.rs");
    }

    #[test]
    fn strips_the_suffix() {
        assert_eq!(derive_id(&path(&["path", "to", "awesome.sql"]), ".sql"), "awesome");
    }

    #[test]
    fn strips_the_suffix_once() {
        assert_eq!(
            derive_id(&path(&["path", "to", "awesome.sql.sql"]), ".sql"),
            "awesome.sql"
        );
    }

    #[test]
    fn suffix_in_the_middle_is_kept() {
        assert_eq!(
            derive_id(&path(&["path", "to", "a.sql.bak"]), ".sql"),
            "a.sql.bak"
        );
    }

    #[test]
    fn suffix_only_segment_gives_empty_id() {
        assert_eq!(derive_id(&path(&["path", "to", ".sql"]), ".sql"), "");
    }

    #[test]
    fn conventional_unit_name() {
        assert_eq!(
            derive_id(&path(&["migration", "20190504_create_users.sql"]), ".sql"),
            "20190504_create_users"
        );
    }

    #[test]
    fn no_normalization() {
        assert_eq!(derive_id("20190101_A.sql", ".sql"), "20190101_A");
        assert_eq!(derive_id(" spaced .sql", ".sql"), " spaced ");
    }

    #[test]
    fn empty_suffix_keeps_segment() {
        assert_eq!(derive_id("a.sql", ""), "a.sql");
    }

    #[test]
    fn explicit_separator() {
        assert_eq!(derive_id_with_separator("a/b/c.sql", ".sql", '/'), "c");
        assert_eq!(derive_id_with_separator("a\\b\\c.sql", ".sql", '\\'), "c");
        assert_eq!(derive_id_with_separator("a\\b\\c.sql", ".sql", '/'), "a\\b\\c");
    }
}
