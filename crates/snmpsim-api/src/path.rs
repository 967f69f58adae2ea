// Per-segment path escaping.
//
// Resource identifiers (record-file paths in particular) may contain any
// character. Each `/`-delimited segment is encoded on its own so the
// separators the caller wrote survive as path structure.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Everything except the RFC 3986 unreserved set.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode every `/`-separated segment of `path` independently.
pub fn escape_path(path: &str) -> String {
    path.split('/')
        .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// Whether `path` has a `.` or `..` segment.
///
/// URL joining resolves those against the base, percent-encoded or not,
/// so such a path cannot be sent as written.
pub fn has_dot_segment(path: &str) -> bool {
    path.split('/').any(|segment| segment == "." || segment == "..")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_separators() {
        assert_eq!(
            escape_path("recordings/dir1/dir2/public.snmprec"),
            "recordings/dir1/dir2/public.snmprec"
        );
    }

    #[test]
    fn encodes_reserved_characters_inside_segments() {
        assert_eq!(
            escape_path("recordings/my lab/a?b#c.snmprec"),
            "recordings/my%20lab/a%3Fb%23c.snmprec"
        );
        assert_eq!(escape_path("x/50%/y+z"), "x/50%25/y%2Bz");
    }

    #[test]
    fn empty_segments_survive() {
        assert_eq!(escape_path("recordings//dir/"), "recordings//dir/");
    }

    #[test]
    fn detects_dot_segments() {
        assert!(has_dot_segment("recordings/../../secret/x.snmprec"));
        assert!(has_dot_segment("recordings/a/./b/x.snmprec"));
        assert!(has_dot_segment(".."));
        assert!(!has_dot_segment("recordings/.hidden/x..snmprec"));
        assert!(!has_dot_segment("recordings/dir1/dir2/public.snmprec"));
    }

    #[test]
    fn non_ascii_is_utf8_encoded() {
        assert_eq!(escape_path("daten/größe"), "daten/gr%C3%B6%C3%9Fe");
    }
}
