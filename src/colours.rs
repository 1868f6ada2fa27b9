//! Colours, colour schemes, and terminal styling.

use ansi_term::Style;
use ansi_term::Color::*;


/// The **colours** are used to paint the output.
#[derive(Debug, Default)]
pub struct Colours {
    pub endpoint: Style,

    pub open: Style,
    pub cone: Style,
    pub symmetric: Style,
    pub unspecified: Style,

    pub behavior: Style,
    pub error: Style,
}

impl Colours {

    /// Create a new colour palette that has a variety of different styles
    /// defined. This is used by default.
    pub fn pretty() -> Self {
        Self {
            endpoint: Green.bold(),

            open: Green.bold(),
            cone: Yellow.normal(),
            symmetric: Red.normal(),
            unspecified: Purple.normal(),

            behavior: Cyan.normal(),
            error: Red.bold(),
        }
    }

    /// Create a new colour palette where no styles are defined, causing
    /// output to be rendered as plain text without any formatting.
    /// This is used when output is not to a terminal.
    pub fn plain() -> Self {
        Self::default()
    }
}
