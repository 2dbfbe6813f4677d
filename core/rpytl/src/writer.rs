use tracing::debug;

use crate::line;
use crate::scanner::{BlockScanner, Step};
use crate::types::{PatchOptions, PatchOutcome, TranslationTable};

// --- Patching (Lines + Table -> Lines) ---

/// Rewrites the translation slots of a target document from `table`.
///
/// Lines that are not eligible slots are copied unchanged, terminators included,
/// so the output always has the same number of lines as the input.
pub fn patch_lines<'a, I>(lines: I, table: &TranslationTable, options: &PatchOptions) -> PatchOutcome
where
    I: IntoIterator<Item = &'a str>,
{
    let mut scanner = BlockScanner::new(options.language.as_deref());
    let mut outcome = PatchOutcome {
        lines: Vec::new(),
        dialogue_applied: 0,
        strings_applied: 0,
    };

    for line in lines {
        let patched = match scanner.feed(line) {
            Step::DialogueSlot { tag, original } => {
                let patched = dialogue_replacement(line, &tag, &original, table, options)
                    .filter(|new_line| new_line != line);
                if patched.is_some() {
                    outcome.dialogue_applied += 1;
                }
                patched
            }
            Step::StringSlot { old } => {
                let patched =
                    string_replacement(line, &old, table).filter(|new_line| new_line != line);
                if patched.is_some() {
                    outcome.strings_applied += 1;
                }
                patched
            }
            Step::Header | Step::Passthrough => None,
        };
        outcome
            .lines
            .push(patched.unwrap_or_else(|| line.to_string()));
    }

    let dropped = scanner.finish();
    if dropped > 0 {
        debug!("{} incomplete blocks left untouched while patching", dropped);
    }

    outcome
}

fn dialogue_replacement(
    line: &str,
    tag: &str,
    original: &str,
    table: &TranslationTable,
    options: &PatchOptions,
) -> Option<String> {
    let entry = table.lookup_dialogue(tag, original)?;
    let slot = line.trim();

    if options.require_empty_slot && !line::is_empty_slot(slot) {
        debug!("Keeping existing translation for {}", tag);
        return None;
    }
    if line::is_empty_slot(entry.translated_line.trim()) {
        return None;
    }

    Some(line::rebuild_slot(line, &entry.translated_line))
}

fn string_replacement(line: &str, old: &str, table: &TranslationTable) -> Option<String> {
    if !line::is_empty_new_literal(line.trim()) {
        return None;
    }
    let entry = table.lookup_string(old)?;
    if line::is_empty_slot(&entry.new_line) {
        return None;
    }
    Some(line::rebuild_slot(line, &entry.new_line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::split_lines;
    use crate::reader::extract_translations;
    use crate::types::MatchMode;
    use pretty_assertions::assert_eq;

    fn patch(source: &str, target: &str, options: &PatchOptions) -> PatchOutcome {
        let table = extract_translations(split_lines(source), options);
        patch_lines(split_lines(target), &table, options)
    }

    const SOURCE: &str = "translate spanish tag1:\n\n  # \"Hello\"\n  \"Hola\"\n";

    #[test]
    fn test_fills_empty_slot_with_target_indentation() {
        let target = "translate spanish tag1:\n\n        # \"Hello\"\n        \"\"\n";
        let outcome = patch(SOURCE, target, &PatchOptions::default());

        assert_eq!(
            outcome.clone().into_text(),
            "translate spanish tag1:\n\n        # \"Hello\"\n        \"Hola\"\n"
        );
        assert_eq!(outcome.dialogue_applied, 1);
        assert_eq!(outcome.strings_applied, 0);
    }

    #[test]
    fn test_existing_translation_respects_require_empty_slot() {
        let target = "translate spanish tag1:\n    # \"Hello\"\n    \"Ya traducido\"\n";

        let kept = patch(SOURCE, target, &PatchOptions::default());
        assert_eq!(kept.clone().into_text(), target);
        assert_eq!(kept.applied(), 0);

        let overwrite = PatchOptions {
            require_empty_slot: false,
            ..PatchOptions::default()
        };
        let replaced = patch(SOURCE, target, &overwrite);
        assert_eq!(
            replaced.into_text(),
            "translate spanish tag1:\n    # \"Hello\"\n    \"Hola\"\n"
        );
    }

    #[test]
    fn test_strings_block() {
        let source = "translate spanish strings:\n    old \"Start\"\n    new \"Comenzar\"\n";
        let target = "translate spanish strings:\n\n    old \"Start\"\n    new \"\"\n\n    old \"Stop\"\n    new \"\"\n";
        let outcome = patch(source, target, &PatchOptions::default());

        assert_eq!(
            outcome.clone().into_text(),
            "translate spanish strings:\n\n    old \"Start\"\n    new \"Comenzar\"\n\n    old \"Stop\"\n    new \"\"\n"
        );
        assert_eq!(outcome.strings_applied, 1);
    }

    #[test]
    fn test_filled_string_is_never_overwritten() {
        let source = "translate spanish strings:\n    old \"Start\"\n    new \"Comenzar\"\n";
        let target = "translate spanish strings:\n    old \"Start\"\n    new \"Iniciar\"\n";
        let overwrite = PatchOptions {
            require_empty_slot: false,
            ..PatchOptions::default()
        };
        assert_eq!(patch(source, target, &overwrite).into_text(), target);
    }

    #[test]
    fn test_only_literal_empty_new_is_filled() {
        let source = "translate spanish strings:\n    old \"Start\"\n    new \"Comenzar\"\n";
        let target = "translate spanish strings:\n    old \"Start\"\n    new \"Go\" \"\"\n";
        let outcome = patch(source, target, &PatchOptions::default());
        assert_eq!(outcome.clone().into_text(), target);
        assert_eq!(outcome.strings_applied, 0);
    }

    #[test]
    fn test_bom_before_first_header_is_kept() {
        let target = "\u{feff}translate spanish tag1:\n    # \"Hello\"\n    \"\"\n";
        let outcome = patch(SOURCE, target, &PatchOptions::default());
        assert_eq!(
            outcome.clone().into_text(),
            "\u{feff}translate spanish tag1:\n    # \"Hello\"\n    \"Hola\"\n"
        );
        assert_eq!(outcome.dialogue_applied, 1);
    }

    #[test]
    fn test_text_mode_respects_require_empty_slot() {
        let target = "translate spanish other_a:\n    # \"Hello\"\n    \"Ya traducido\"\n";
        let by_text = PatchOptions {
            match_mode: MatchMode::ByText,
            ..PatchOptions::default()
        };
        let kept = patch(SOURCE, target, &by_text);
        assert_eq!(kept.clone().into_text(), target);
        assert_eq!(kept.applied(), 0);

        let overwrite = PatchOptions {
            require_empty_slot: false,
            ..by_text
        };
        let replaced = patch(SOURCE, target, &overwrite);
        assert_eq!(
            replaced.into_text(),
            "translate spanish other_a:\n    # \"Hello\"\n    \"Hola\"\n"
        );
    }

    #[test]
    fn test_reused_tag_with_different_text_is_left_alone() {
        let target = "translate spanish tag1:\n    # \"Goodbye\"\n    \"\"\n";
        let outcome = patch(SOURCE, target, &PatchOptions::default());
        assert_eq!(outcome.clone().into_text(), target);
        assert_eq!(outcome.applied(), 0);
    }

    #[test]
    fn test_text_mode_fills_every_matching_comment() {
        let target = "translate spanish other_a:\n    # \"Hello\"\n    \"\"\ntranslate spanish other_b:\n\t# \"Hello\"\n\t\"\"\n";
        let options = PatchOptions {
            match_mode: MatchMode::ByText,
            ..PatchOptions::default()
        };
        let outcome = patch(SOURCE, target, &options);
        assert_eq!(
            outcome.clone().into_text(),
            "translate spanish other_a:\n    # \"Hello\"\n    \"Hola\"\ntranslate spanish other_b:\n\t# \"Hello\"\n\t\"Hola\"\n"
        );
        assert_eq!(outcome.dialogue_applied, 2);
    }

    #[test]
    fn test_tag_mode_ignores_other_tags_with_same_text() {
        let target = "translate spanish other_a:\n    # \"Hello\"\n    \"\"\n";
        let outcome = patch(SOURCE, target, &PatchOptions::default());
        assert_eq!(outcome.into_text(), target);
    }

    #[test]
    fn test_patching_is_idempotent() {
        let target = "translate spanish tag1:\n    # \"Hello\"\n    \"\"\n";
        let options = PatchOptions::default();
        let first = patch(SOURCE, target, &options).into_text();
        let second = patch(SOURCE, &first, &options);
        assert_eq!(second.applied(), 0);
        assert_eq!(second.into_text(), first);
    }

    #[test]
    fn test_untouched_lines_are_byte_identical() {
        let target = "# game/script.rpy:3  \r\ntranslate spanish tag1:\r\n\r\n    # \"Hello\"   \r\n    \"\"\r\n    e \"trailing\"   \r\nlabel start:";
        let outcome = patch(SOURCE, target, &PatchOptions::default());
        let input = split_lines(target);

        assert_eq!(outcome.lines.len(), input.len());
        for (i, (out, inp)) in outcome.lines.iter().zip(&input).enumerate() {
            if i == 4 {
                assert_eq!(out, "    \"Hola\"\r\n");
            } else {
                assert_eq!(out, inp);
            }
        }
    }

    #[test]
    fn test_empty_source_translation_is_not_applied() {
        let source = "translate spanish tag1:\n    # \"Hello\"\n    \"\"\n";
        let target = "translate spanish tag1:\n    # \"Hello\"\n    \"Hola\"\n";
        let overwrite = PatchOptions {
            require_empty_slot: false,
            ..PatchOptions::default()
        };
        assert_eq!(patch(source, target, &overwrite).into_text(), target);
    }
}
