//! Avatar face state.
//!
//! Holds what the face currently shows: expression, colour pair and
//! speech-bubble text.  Rendering is left to whatever display backend is
//! attached; this driver logs every change at `debug` level so a headless
//! unit still shows what the face would display.

use heapless::String;
use log::debug;

use crate::app::ports::SPEECH_TEXT_MAX;
use crate::comfort::{Expression, Palette};

/// Cut `text` to at most `max` bytes without splitting a UTF-8 sequence.
pub fn truncate_on_char_boundary(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

pub struct AvatarFace {
    expression: Expression,
    palette: Palette,
    speech: String<SPEECH_TEXT_MAX>,
}

impl AvatarFace {
    /// A neutral face in the boot colours with an empty bubble.
    pub fn new() -> Self {
        Self {
            expression: Expression::Neutral,
            palette: Palette::BOOT,
            speech: String::new(),
        }
    }

    pub fn set_expression(&mut self, expression: Expression) {
        if self.expression != expression {
            debug!("avatar: expression {:?} -> {:?}", self.expression, expression);
        }
        self.expression = expression;
    }

    pub fn set_palette(&mut self, palette: Palette) {
        if self.palette != palette {
            debug!(
                "avatar: palette {:#06x}/{:#06x}",
                palette.primary.0, palette.background.0
            );
        }
        self.palette = palette;
    }

    /// Replace the bubble text; anything past the bubble limit is dropped.
    pub fn set_speech_text(&mut self, text: &str) {
        self.speech.clear();
        // Cannot fail: the slice fits the buffer by construction.
        let _ = self
            .speech
            .push_str(truncate_on_char_boundary(text, SPEECH_TEXT_MAX));
        debug!("avatar: \"{}\"", self.speech);
    }

    pub fn expression(&self) -> Expression {
        self.expression
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn speech_text(&self) -> &str {
        &self.speech
    }
}

impl Default for AvatarFace {
    fn default() -> Self {
        Self::new()
    }
}
