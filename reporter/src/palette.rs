//! Fixed criterion color palette.
//!
//! Each criterion id maps to an RGB color, used for the colored square in front of the criterion
//! label, and to the closest `w:highlight` color, used to mark the flagged excerpts in the
//! transcription. Ids without an entry get a neutral gray.

use crate::docx::model::HighlightColor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CriterionColor {
    /// RGB hex without `#`.
    pub hex: &'static str,
    pub highlight: HighlightColor,
}

pub const NEUTRAL: CriterionColor = CriterionColor {
    hex: "808080",
    highlight: HighlightColor::LightGray,
};

const PALETTE: [CriterionColor; 5] = [
    CriterionColor { hex: "2E75B6", highlight: HighlightColor::Cyan },
    CriterionColor { hex: "70AD47", highlight: HighlightColor::Green },
    CriterionColor { hex: "ED7D31", highlight: HighlightColor::Yellow },
    CriterionColor { hex: "7030A0", highlight: HighlightColor::Magenta },
    CriterionColor { hex: "C00000", highlight: HighlightColor::Red },
];

pub fn criterion_color(id: u8) -> CriterionColor {
    usize::from(id)
        .checked_sub(1)
        .and_then(|i| PALETTE.get(i))
        .copied()
        .unwrap_or(NEUTRAL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapped_ids_have_distinct_colors() {
        let colors: Vec<_> = (1..=5).map(criterion_color).collect();
        assert_eq!(colors[0].hex, "2E75B6");
        assert_eq!(colors[4].highlight, HighlightColor::Red);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a.hex, b.hex);
            }
        }
    }

    #[test]
    fn unmapped_ids_are_neutral() {
        assert_eq!(criterion_color(0), NEUTRAL);
        assert_eq!(criterion_color(6), NEUTRAL);
        assert_eq!(criterion_color(u8::MAX), NEUTRAL);
    }
}
