//! Issue marker embedded in task descriptions.
//!
//! A task is linked to an issue when its description contains
//! `GitHub Issue #<number>: <url>`. There is no structured metadata field,
//! so the marker text is the only correlation key between the two services
//! and its format must stay byte-for-byte stable.

/// Literal text that introduces the issue number.
pub const MARKER_PREFIX: &str = "GitHub Issue #";

/// Build the marker stored in a task description.
pub fn format_marker(issue_number: u64, url: &str) -> String {
    format!("{MARKER_PREFIX}{issue_number}: {url}")
}

/// The `GitHub Issue #<n>:` head of a marker.
pub fn marker_prefix(issue_number: u64) -> String {
    format!("{MARKER_PREFIX}{issue_number}:")
}

/// Extract the linked issue number from a task description.
///
/// Takes the text after the first `GitHub Issue #` up to the first `:`
/// and parses it as a base-10 number. Returns `None` when the prefix is
/// absent, the number does not parse, or the number is zero.
pub fn parse_marker(description: &str) -> Option<u64> {
    let start = description.find(MARKER_PREFIX)? + MARKER_PREFIX.len();
    let rest = &description[start..];
    // A second marker bounds the first one's number.
    let rest = rest.split(MARKER_PREFIX).next().unwrap_or(rest);
    let number_part = rest.split(':').next().unwrap_or(rest);

    match number_part.parse::<u64>() {
        Ok(0) | Err(_) => None,
        Ok(number) => Some(number),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_format_marker() {
        assert_eq!(
            format_marker(42, "https://github.com/o/r/issues/42"),
            "GitHub Issue #42: https://github.com/o/r/issues/42"
        );
        assert_eq!(marker_prefix(7), "GitHub Issue #7:");
    }

    #[test]
    fn test_parse_linked_description() {
        assert_eq!(parse_marker("GitHub Issue #42: https://x"), Some(42));
    }

    #[test]
    fn test_parse_without_marker_is_unlinked() {
        assert_eq!(parse_marker("no marker here"), None);
        assert_eq!(parse_marker(""), None);
    }

    #[test]
    fn test_parse_non_numeric_is_unlinked() {
        assert_eq!(parse_marker("GitHub Issue #abc: https://x"), None);
        assert_eq!(parse_marker("GitHub Issue #: https://x"), None);
        assert_eq!(parse_marker("GitHub Issue # 4: https://x"), None);
    }

    #[test]
    fn test_parse_zero_is_unlinked() {
        assert_eq!(parse_marker("GitHub Issue #0: https://x"), None);
    }

    #[test]
    fn test_parse_marker_inside_longer_description() {
        let description = "Notes from triage.\n\nGitHub Issue #128: https://github.com/o/r/issues/128";
        assert_eq!(parse_marker(description), Some(128));
    }

    #[test]
    fn test_parse_marker_without_colon_uses_remainder() {
        assert_eq!(parse_marker("GitHub Issue #15"), Some(15));
    }

    #[test]
    fn test_parse_uses_first_marker() {
        assert_eq!(
            parse_marker("GitHub Issue #3: https://a GitHub Issue #4: https://b"),
            Some(3)
        );
    }

    proptest! {
        #[test]
        fn prop_marker_round_trips(number in 1u64..=u64::from(u32::MAX), path in "[a-z0-9/]{0,40}") {
            let url = format!("https://github.com/{path}");
            prop_assert_eq!(parse_marker(&format_marker(number, &url)), Some(number));
        }
    }
}
