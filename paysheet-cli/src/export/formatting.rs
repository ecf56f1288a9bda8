//! Shared cell formats for report workbooks

use rust_xlsxwriter::{Color, Format, FormatBorder};

use crate::services::matching::MatchKind;

pub fn create_header_format() -> Format {
    Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xD9E1F2))
        .set_border(FormatBorder::Thin)
}

pub fn create_exact_match_format() -> Format {
    Format::new()
        .set_background_color(Color::RGB(0xC6EFCE))
        .set_border(FormatBorder::Thin)
}

pub fn create_semantic_match_format() -> Format {
    Format::new()
        .set_background_color(Color::RGB(0xDDEBF7))
        .set_border(FormatBorder::Thin)
}

pub fn create_not_matched_format() -> Format {
    Format::new()
        .set_background_color(Color::RGB(0xFCE4D6))
        .set_border(FormatBorder::Thin)
}

pub fn create_system_only_format() -> Format {
    Format::new()
        .set_background_color(Color::RGB(0xE0E0E0))
        .set_border(FormatBorder::Thin)
}

/// Format for a Match Type cell
pub fn match_kind_format(kind: &MatchKind) -> Format {
    match kind {
        MatchKind::Exact => create_exact_match_format(),
        MatchKind::Semantic => create_semantic_match_format(),
        MatchKind::Unmatched => create_not_matched_format(),
    }
}
