use std::mem;

use tracing::debug;

use crate::line::{self, Header};

/// Where the scanner stands inside the current block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BlockState {
    #[default]
    Idle,
    DialogueAwaitingOriginal {
        tag: String,
    },
    DialogueAwaitingTranslation {
        tag: String,
        original: String,
    },
    StringsAwaitingOld,
    StringsAwaitingNew {
        old: String,
    },
}

impl BlockState {
    /// A block that was opened but can no longer complete.
    fn is_incomplete(&self) -> bool {
        matches!(
            self,
            BlockState::DialogueAwaitingOriginal { .. }
                | BlockState::DialogueAwaitingTranslation { .. }
                | BlockState::StringsAwaitingNew { .. }
        )
    }
}

/// What a single line turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Header,
    Passthrough,
    /// The translation line of a dialogue block whose original comment was captured.
    DialogueSlot { tag: String, original: String },
    /// A `new` line directly following the captured `old` line.
    StringSlot { old: String },
}

/// Line-driven state machine recognizing dialogue and string blocks.
#[derive(Debug, Default)]
pub struct BlockScanner<'a> {
    state: BlockState,
    language: Option<&'a str>,
    dropped: usize,
}

impl<'a> BlockScanner<'a> {
    pub fn new(language: Option<&'a str>) -> Self {
        Self {
            state: BlockState::Idle,
            language,
            dropped: 0,
        }
    }

    pub fn state(&self) -> &BlockState {
        &self.state
    }

    pub fn feed(&mut self, raw: &str) -> Step {
        let trimmed = line::classify_text(raw);

        if let Some(header) = line::parse_header(trimmed, self.language) {
            self.abandon();
            self.state = match header {
                Header::Dialogue(tag) => BlockState::DialogueAwaitingOriginal {
                    tag: tag.to_string(),
                },
                Header::Strings => BlockState::StringsAwaitingOld,
                Header::Foreign => BlockState::Idle,
            };
            return Step::Header;
        }

        let (next, step) = match mem::take(&mut self.state) {
            BlockState::Idle => (BlockState::Idle, Step::Passthrough),
            BlockState::DialogueAwaitingOriginal { tag } => {
                if line::is_comment(trimmed) {
                    let original = trimmed.to_string();
                    (
                        BlockState::DialogueAwaitingTranslation { tag, original },
                        Step::Passthrough,
                    )
                } else {
                    (
                        BlockState::DialogueAwaitingOriginal { tag },
                        Step::Passthrough,
                    )
                }
            }
            BlockState::DialogueAwaitingTranslation { tag, original } => {
                if trimmed.is_empty() || line::is_comment(trimmed) {
                    (
                        BlockState::DialogueAwaitingTranslation { tag, original },
                        Step::Passthrough,
                    )
                } else {
                    (BlockState::Idle, Step::DialogueSlot { tag, original })
                }
            }
            BlockState::StringsAwaitingOld => {
                if line::is_old_literal(trimmed) {
                    let old = trimmed.to_string();
                    (BlockState::StringsAwaitingNew { old }, Step::Passthrough)
                } else {
                    (BlockState::StringsAwaitingOld, Step::Passthrough)
                }
            }
            BlockState::StringsAwaitingNew { old } => {
                if line::is_new_literal(trimmed) {
                    (BlockState::StringsAwaitingOld, Step::StringSlot { old })
                } else {
                    self.note_dropped(&BlockState::StringsAwaitingNew { old });
                    if line::is_old_literal(trimmed) {
                        let old = trimmed.to_string();
                        (BlockState::StringsAwaitingNew { old }, Step::Passthrough)
                    } else {
                        (BlockState::StringsAwaitingOld, Step::Passthrough)
                    }
                }
            }
        };

        self.state = next;
        step
    }

    /// Closes the scan and returns how many blocks never completed.
    pub fn finish(mut self) -> usize {
        self.abandon();
        self.dropped
    }

    fn abandon(&mut self) {
        let state = mem::take(&mut self.state);
        if state.is_incomplete() {
            self.note_dropped(&state);
        }
    }

    fn note_dropped(&mut self, state: &BlockState) {
        debug!("Dropping incomplete block: {:?}", state);
        self.dropped += 1;
    }
}
