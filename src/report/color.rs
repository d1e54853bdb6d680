use colored::Colorize;

/// 24-bit colouring through `colored`, or none at all.
///
/// `colored` still has the last word when enabled: it drops the escapes
/// when stdout is not a terminal or `NO_COLOR` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    use_color: bool,
}

// #ff6600, the orange of the WebSocket logo.
const ORANGE: (u8, u8, u8) = (255, 102, 0);
// #d3f9b5
const TEA_GREEN: (u8, u8, u8) = (211, 249, 181);

impl Palette {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn orange(&self, text: &str) -> String {
        self.paint(ORANGE, text)
    }

    pub fn green(&self, text: &str) -> String {
        self.paint(TEA_GREEN, text)
    }

    fn paint(&self, (r, g, b): (u8, u8, u8), text: &str) -> String {
        if self.use_color {
            text.truecolor(r, g, b).to_string()
        } else {
            text.to_string()
        }
    }
}
