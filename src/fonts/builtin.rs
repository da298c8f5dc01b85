// File: ./src/fonts/builtin.rs
// The 12 standard PDF text faces. They need no font file and never touch the filesystem.
use strum::{Display, EnumIter, IntoEnumIterator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum BuiltinFace {
    #[strum(to_string = "Helvetica")]
    Helvetica,
    #[strum(to_string = "Helvetica-Bold")]
    HelveticaBold,
    #[strum(to_string = "Helvetica-Oblique")]
    HelveticaOblique,
    #[strum(to_string = "Helvetica-BoldOblique")]
    HelveticaBoldOblique,
    #[strum(to_string = "Times-Roman")]
    TimesRoman,
    #[strum(to_string = "Times-Bold")]
    TimesBold,
    #[strum(to_string = "Times-Italic")]
    TimesItalic,
    #[strum(to_string = "Times-BoldItalic")]
    TimesBoldItalic,
    #[strum(to_string = "Courier")]
    Courier,
    #[strum(to_string = "Courier-Bold")]
    CourierBold,
    #[strum(to_string = "Courier-Oblique")]
    CourierOblique,
    #[strum(to_string = "Courier-BoldOblique")]
    CourierBoldOblique,
}

impl BuiltinFace {
    /// Case-insensitive lookup by PostScript name. `Times` is accepted for `Times-Roman`.
    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("Times") {
            return Some(BuiltinFace::TimesRoman);
        }
        BuiltinFace::iter().find(|face| face.to_string().eq_ignore_ascii_case(name))
    }

    /// The slanted sibling within the same family. Already slanted faces map to themselves.
    pub fn italic(self) -> Self {
        use BuiltinFace::*;
        match self {
            Helvetica | HelveticaOblique => HelveticaOblique,
            HelveticaBold | HelveticaBoldOblique => HelveticaBoldOblique,
            TimesRoman | TimesItalic => TimesItalic,
            TimesBold | TimesBoldItalic => TimesBoldItalic,
            Courier | CourierOblique => CourierOblique,
            CourierBold | CourierBoldOblique => CourierBoldOblique,
        }
    }

    pub fn is_monospace(self) -> bool {
        use BuiltinFace::*;
        matches!(
            self,
            Courier | CourierBold | CourierOblique | CourierBoldOblique
        )
    }

    pub fn is_bold(self) -> bool {
        use BuiltinFace::*;
        matches!(
            self,
            HelveticaBold
                | HelveticaBoldOblique
                | TimesBold
                | TimesBoldItalic
                | CourierBold
                | CourierBoldOblique
        )
    }

    /// Approximate advance of an average glyph in em units.
    /// Courier is exact; the proportional families are averaged over Latin text.
    pub fn average_advance(self) -> f32 {
        use BuiltinFace::*;
        if self.is_monospace() {
            return 0.6;
        }
        let base = match self {
            TimesRoman | TimesBold | TimesItalic | TimesBoldItalic => 0.47,
            _ => 0.53,
        };
        if self.is_bold() { base + 0.04 } else { base }
    }

    /// Builtin faces are written with single-byte encoding; only printable ASCII is safe.
    pub fn covers(self, c: char) -> bool {
        c == ' ' || c.is_ascii_graphic()
    }
}
