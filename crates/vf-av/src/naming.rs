//! Output file naming.

/// Base name used when no usable hint is supplied.
pub const DEFAULT_BASE_NAME: &str = "video";

/// Container extension appended to every derived name.
const EXTENSION: &str = ".mp4";

/// Longest base name kept, in characters. Keeps scratch paths under
/// filesystem name limits.
const MAX_BASE_CHARS: usize = 120;

/// Derive a filesystem- and shell-safe output name from a caller hint.
///
/// Keeps letters, digits, whitespace and hyphens (Unicode included) and drops
/// everything else, then appends `.mp4`. Control characters are dropped even
/// when they count as whitespace. An absent hint, or one with nothing left
/// after stripping, falls back to [`DEFAULT_BASE_NAME`].
///
/// ```
/// use vf_av::derive_file_name;
///
/// assert_eq!(derive_file_name(Some("My Clip!")), "My Clip.mp4");
/// assert_eq!(derive_file_name(None), "video.mp4");
/// ```
pub fn derive_file_name(hint: Option<&str>) -> String {
    derive_file_name_or(hint, DEFAULT_BASE_NAME)
}

/// Like [`derive_file_name`] but with a caller-chosen default base name.
///
/// The default is sanitized the same way; if that leaves nothing either,
/// [`DEFAULT_BASE_NAME`] is used.
pub fn derive_file_name_or(hint: Option<&str>, default_base: &str) -> String {
    let base = hint
        .map(sanitize)
        .filter(|s| !s.trim().is_empty())
        .or_else(|| Some(sanitize(default_base)).filter(|s| !s.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_BASE_NAME.to_string());

    format!("{base}{EXTENSION}")
}

fn sanitize(raw: &str) -> String {
    raw.chars()
        .filter(|&c| is_allowed(c))
        .take(MAX_BASE_CHARS)
        .collect()
}

fn is_allowed(c: char) -> bool {
    if c.is_control() {
        return false;
    }
    c.is_alphanumeric() || c.is_whitespace() || c == '-'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation() {
        assert_eq!(derive_file_name(Some("My Clip!")), "My Clip.mp4");
        assert_eq!(derive_file_name(Some("a_b.c")), "abc.mp4");
    }

    #[test]
    fn absent_or_empty_hint_uses_default() {
        assert_eq!(derive_file_name(None), "video.mp4");
        assert_eq!(derive_file_name(Some("")), "video.mp4");
    }

    #[test]
    fn fully_stripped_hint_uses_default() {
        assert_eq!(derive_file_name(Some("!!!")), "video.mp4");
        assert_eq!(derive_file_name(Some("  \t ")), "video.mp4");
    }

    #[test]
    fn keeps_unicode_letters_and_digits() {
        assert_eq!(derive_file_name(Some("Видео 2024")), "Видео 2024.mp4");
        assert_eq!(derive_file_name(Some("動画-１")), "動画-１.mp4");
    }

    #[test]
    fn existing_extension_is_not_special() {
        assert_eq!(derive_file_name(Some("clip.mp4")), "clipmp4.mp4");
    }

    #[test]
    fn hostile_hints_are_neutralized() {
        let hints = [
            "../../etc/passwd",
            "a/b\\c",
            "$(rm -rf ~)",
            "`whoami`; echo \"x\" | cat > 'y' & z",
            "line\nbreak\rcarriage\ttab\u{0}nul\u{7f}del",
            "C:\\Windows\\system32",
            "name*?<>|%{}[]",
        ];
        let forbidden = [
            '/', '\\', '$', '(', ')', '`', ';', '"', '\'', '|', '&', '>', '<', '*', '?', '%', '{',
            '}', '[', ']', ':', '.', '~',
        ];

        for hint in hints {
            let name = derive_file_name(Some(hint));
            assert!(name.ends_with(".mp4"), "{name:?}");
            let base = name.strip_suffix(".mp4").unwrap();
            assert!(!base.is_empty());
            assert!(
                !base.chars().any(|c| c.is_control() || forbidden.contains(&c)),
                "unsafe character survived in {name:?} (from {hint:?})"
            );
        }
    }

    #[test]
    fn long_hints_are_truncated() {
        let hint = "a".repeat(1000);
        let name = derive_file_name(Some(&hint));
        assert_eq!(name.chars().count(), MAX_BASE_CHARS + EXTENSION.len());
    }

    #[test]
    fn custom_default_is_sanitized() {
        assert_eq!(derive_file_name_or(None, "stream"), "stream.mp4");
        assert_eq!(derive_file_name_or(None, "my/stream"), "mystream.mp4");
        assert_eq!(derive_file_name_or(None, "///"), "video.mp4");
        assert_eq!(derive_file_name_or(Some("Clip"), "stream"), "Clip.mp4");
    }
}
