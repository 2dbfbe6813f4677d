use indexmap::map::Entry;
use tracing::debug;

use crate::scanner::{BlockScanner, Step};
use crate::types::{DialogueEntry, PatchOptions, StringEntry, TranslationTable};

// --- Extraction (Lines -> Table) ---

/// Builds the translation table from the lines of a translated source document.
///
/// Each dialogue block is keyed by tag or by original comment text depending on
/// `options.match_mode`; string pairs are keyed by their `old` line. When a key
/// repeats, the first definition is kept.
pub fn extract_translations<'a, I>(lines: I, options: &PatchOptions) -> TranslationTable
where
    I: IntoIterator<Item = &'a str>,
{
    let mut table = TranslationTable::new(options.match_mode);
    let mut scanner = BlockScanner::new(options.language.as_deref());

    for line in lines {
        match scanner.feed(line) {
            Step::DialogueSlot { tag, original } => {
                let key = table.match_mode.dialogue_key(&tag, &original).to_string();
                match table.dialogue.entry(key) {
                    Entry::Vacant(slot) => {
                        slot.insert(DialogueEntry {
                            tag,
                            original_text: original,
                            translated_line: line.trim_end().to_string(),
                        });
                    }
                    Entry::Occupied(existing) => {
                        debug!("Ignoring duplicate dialogue key {:?}", existing.key());
                    }
                }
            }
            Step::StringSlot { old } => match table.strings.entry(old) {
                Entry::Vacant(slot) => {
                    let old_literal = slot.key().clone();
                    slot.insert(StringEntry {
                        old_literal,
                        new_line: line.trim().to_string(),
                    });
                }
                Entry::Occupied(existing) => {
                    debug!("Ignoring duplicate string {:?}", existing.key());
                }
            },
            Step::Header | Step::Passthrough => {}
        }
    }

    let dropped = scanner.finish();
    if dropped > 0 {
        debug!("{} incomplete blocks skipped while extracting", dropped);
    }

    table
}
