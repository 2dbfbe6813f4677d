use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// How dialogue blocks are correlated between the source and the target.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Key on the block identifier, guarded by the original comment text.
    #[default]
    ByTag,
    /// Key on the original comment text, ignoring the block identifier.
    ByText,
}

impl MatchMode {
    /// Picks the lookup key for a dialogue block under this mode.
    pub fn dialogue_key<'a>(self, tag: &'a str, original_text: &'a str) -> &'a str {
        match self {
            MatchMode::ByTag => tag,
            MatchMode::ByText => original_text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchOptions {
    pub match_mode: MatchMode,
    /// Leave slots that already hold a translation untouched.
    pub require_empty_slot: bool,
    /// Only honour `translate <language> ...:` headers naming this language.
    pub language: Option<String>,
}

impl Default for PatchOptions {
    fn default() -> Self {
        Self {
            match_mode: MatchMode::ByTag,
            require_empty_slot: true,
            language: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DialogueEntry {
    pub tag: String,
    pub original_text: String,
    pub translated_line: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StringEntry {
    pub old_literal: String,
    pub new_line: String,
}

/// Translations recorded from a source document. Read-only once built.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTable {
    pub match_mode: MatchMode,
    pub dialogue: IndexMap<String, DialogueEntry>,
    pub strings: IndexMap<String, StringEntry>,
}

impl TranslationTable {
    pub fn new(match_mode: MatchMode) -> Self {
        Self {
            match_mode,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.dialogue.is_empty() && self.strings.is_empty()
    }

    /// Finds the recorded translation for a target dialogue block.
    ///
    /// In tag mode the stored original text must equal the target's, so a tag
    /// reused for different text never matches.
    pub fn lookup_dialogue(&self, tag: &str, original_text: &str) -> Option<&DialogueEntry> {
        let key = self.match_mode.dialogue_key(tag, original_text);
        self.dialogue
            .get(key)
            .filter(|entry| entry.original_text == original_text)
    }

    pub fn lookup_string(&self, old_literal: &str) -> Option<&StringEntry> {
        self.strings.get(old_literal)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchOutcome {
    pub lines: Vec<String>,
    pub dialogue_applied: usize,
    pub strings_applied: usize,
}

impl PatchOutcome {
    pub fn applied(&self) -> usize {
        self.dialogue_applied + self.strings_applied
    }

    pub fn into_text(self) -> String {
        self.lines.concat()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchStatus {
    /// At least one slot was rewritten and the target saved.
    Applied,
    /// Nothing eligible; the target was not written.
    Unchanged,
    /// The source held no translations; the target was never read.
    NoTranslations,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchReport {
    pub status: PatchStatus,
    pub dialogue_found: usize,
    pub strings_found: usize,
    pub dialogue_applied: usize,
    pub strings_applied: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeReport {
    pub files: Vec<(String, PatchReport)>,
    pub skipped: Vec<String>,
}

impl TreeReport {
    pub fn dialogue_applied(&self) -> usize {
        self.files.iter().map(|(_, r)| r.dialogue_applied).sum()
    }

    pub fn strings_applied(&self) -> usize {
        self.files.iter().map(|(_, r)| r.strings_applied).sum()
    }
}
