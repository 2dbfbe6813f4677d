//! Per-line classification shared by the extractor and the patcher.
//!
//! Lines are handled with their terminators attached so that untouched lines can
//! be copied back byte for byte.

const HEADER_KEYWORD: &str = "translate";
const STRINGS_IDENTIFIER: &str = "strings";
const PYTHON_IDENTIFIER: &str = "python";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Header<'a> {
    Dialogue(&'a str),
    Strings,
    /// A block the scanner does not track: another language, `python`, `style ...`.
    Foreign,
}

/// Splits text into lines, each keeping its `\n` or `\r\n`.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}

/// Recognizes `translate <language> <identifier>:` on an already trimmed line.
pub fn parse_header<'a>(trimmed: &'a str, language: Option<&str>) -> Option<Header<'a>> {
    let body = trimmed.strip_suffix(':')?;
    let mut tokens = body.split_whitespace();
    if tokens.next()? != HEADER_KEYWORD {
        return None;
    }
    let lang = tokens.next()?;
    let rest: Vec<&str> = tokens.collect();
    if language.is_some_and(|wanted| wanted != lang) {
        return Some(Header::Foreign);
    }
    match rest.as_slice() {
        [STRINGS_IDENTIFIER] => Some(Header::Strings),
        [PYTHON_IDENTIFIER] => Some(Header::Foreign),
        [tag] => Some(Header::Dialogue(tag)),
        _ => Some(Header::Foreign),
    }
}

/// Trims a line for classification, ignoring a leading byte order mark.
pub fn classify_text(raw: &str) -> &str {
    raw.trim_start_matches('\u{feff}').trim()
}

pub fn is_comment(trimmed: &str) -> bool {
    trimmed.starts_with('#')
}

pub fn is_old_literal(trimmed: &str) -> bool {
    trimmed.starts_with("old ")
}

pub fn is_new_literal(trimmed: &str) -> bool {
    trimmed.starts_with("new ")
}

/// True for a slot still awaiting its translation: `""`, `e ""`, `new ''`.
pub fn is_empty_slot(trimmed: &str) -> bool {
    matches!(trimmed, "\"\"" | "''") || trimmed.ends_with(" \"\"") || trimmed.ends_with(" ''")
}

/// True only for the literal `new ""` or `new ''`.
pub fn is_empty_new_literal(trimmed: &str) -> bool {
    matches!(trimmed, "new \"\"" | "new ''")
}

pub fn indentation(line: &str) -> &str {
    let content = line.trim_start();
    &line[..line.len() - content.len()]
}

pub fn terminator(line: &str) -> &str {
    if line.ends_with("\r\n") {
        &line[line.len() - 2..]
    } else if line.ends_with('\n') {
        &line[line.len() - 1..]
    } else {
        ""
    }
}

/// Builds the replacement for `target`: its indentation, the trimmed
/// `replacement`, then its original terminator.
pub fn rebuild_slot(target: &str, replacement: &str) -> String {
    let indent = indentation(target);
    let ending = terminator(target);
    let body = replacement.trim();
    let mut out = String::with_capacity(indent.len() + body.len() + ending.len());
    out.push_str(indent);
    out.push_str(body);
    out.push_str(ending);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_keeps_terminators() {
        let text = "a\r\nb\n\nc";
        let lines = split_lines(text);
        assert_eq!(lines, vec!["a\r\n", "b\n", "\n", "c"]);
        assert_eq!(lines.concat(), text);
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_parse_header() {
        assert_eq!(
            parse_header("translate spanish start_a1b2c3:", None),
            Some(Header::Dialogue("start_a1b2c3"))
        );
        assert_eq!(
            parse_header("translate spanish strings:", None),
            Some(Header::Strings)
        );
        assert_eq!(
            parse_header("translate spanish python:", None),
            Some(Header::Foreign)
        );
        assert_eq!(
            parse_header("translate spanish style default:", None),
            Some(Header::Foreign)
        );
        assert_eq!(parse_header("translate spanish start_a1b2c3", None), None);
        assert_eq!(parse_header("label start:", None), None);
        assert_eq!(parse_header("translate:", None), None);
    }

    #[test]
    fn test_parse_header_language_filter() {
        assert_eq!(
            parse_header("translate spanish tag1:", Some("spanish")),
            Some(Header::Dialogue("tag1"))
        );
        assert_eq!(
            parse_header("translate french tag1:", Some("spanish")),
            Some(Header::Foreign)
        );
        assert_eq!(
            parse_header("translate french strings:", Some("spanish")),
            Some(Header::Foreign)
        );
    }

    #[test]
    fn test_empty_slot() {
        assert!(is_empty_slot("\"\""));
        assert!(is_empty_slot("''"));
        assert!(is_empty_slot("e \"\""));
        assert!(is_empty_slot("new \"\""));
        assert!(is_empty_slot("new ''"));
        assert!(!is_empty_slot("e \"Hola\""));
        assert!(!is_empty_slot("new \"Comenzar\""));
        assert!(!is_empty_slot("e \"x\"\""));
    }

    #[test]
    fn test_empty_new_literal_is_exact() {
        assert!(is_empty_new_literal("new \"\""));
        assert!(is_empty_new_literal("new ''"));
        assert!(!is_empty_new_literal("new \"Ready\" \"\""));
        assert!(!is_empty_new_literal("new \"Comenzar\""));
    }

    #[test]
    fn test_classify_text_skips_bom() {
        assert_eq!(
            classify_text("\u{feff}translate spanish tag1:\r\n"),
            "translate spanish tag1:"
        );
        assert_eq!(classify_text("    # \"Hi\"  \n"), "# \"Hi\"");
    }

    #[test]
    fn test_rebuild_slot_uses_target_layout() {
        assert_eq!(
            rebuild_slot("        e \"\"\r\n", "  e \"Hola\"  "),
            "        e \"Hola\"\r\n"
        );
        assert_eq!(rebuild_slot("\t\"\"", "\"Hola\""), "\t\"Hola\"");
        assert_eq!(indentation("    x"), "    ");
        assert_eq!(terminator("x\n"), "\n");
        assert_eq!(terminator("x"), "");
    }
}
