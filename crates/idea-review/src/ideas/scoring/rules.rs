use super::super::domain::{IdeaField, ScoringInput};
use super::{FieldScore, ScoreBreakdown};

const OUTLINE_MIN_CHARS: usize = 30;
const DETAILED_MIN_CHARS: usize = 100;
const THOROUGH_MIN_CHARS: usize = 300;

/// Relative weight of each section, in percent. Sums to 100.
pub(crate) fn weight_percent(field: IdeaField) -> u32 {
    match field {
        IdeaField::Problem => 25,
        IdeaField::Solution => 25,
        IdeaField::Market => 20,
        IdeaField::RevenueModel => 15,
        IdeaField::Team => 15,
    }
}

/// ECMAScript whitespace: Unicode `White_Space` minus NEL, plus the byte-order mark.
fn is_form_whitespace(c: char) -> bool {
    c == '\u{FEFF}' || (c != '\u{85}' && c.is_whitespace())
}

/// Length in UTF-16 code units after trimming, so astral characters count twice.
pub(crate) fn text_length(text: &str) -> usize {
    text.trim_matches(is_form_whitespace).encode_utf16().count()
}

/// Score one section from its trimmed UTF-16 length.
///
/// Absent text scores the same as an empty string.
pub fn score_field<'a>(text: impl Into<Option<&'a str>>) -> FieldScore {
    let length = text.into().map(text_length).unwrap_or(0);

    match length {
        0 => FieldScore::EMPTY,
        len if len < OUTLINE_MIN_CHARS => FieldScore::SPARSE,
        len if len < DETAILED_MIN_CHARS => FieldScore::OUTLINE,
        len if len < THOROUGH_MIN_CHARS => FieldScore::DETAILED,
        _ => FieldScore::THOROUGH,
    }
}

pub(crate) fn score_breakdown(input: &ScoringInput) -> ScoreBreakdown {
    ScoreBreakdown {
        problem: score_field(input.field(IdeaField::Problem)),
        solution: score_field(input.field(IdeaField::Solution)),
        market: score_field(input.field(IdeaField::Market)),
        revenue_model: score_field(input.field(IdeaField::RevenueModel)),
        team: score_field(input.field(IdeaField::Team)),
    }
}

/// Weighted total normalized to 0-100, rounding halves up.
///
/// Works on percent weights so ties such as 7.5 are exact.
pub(crate) fn weighted_score(breakdown: &ScoreBreakdown) -> u8 {
    let weighted: u32 = breakdown
        .iter()
        .map(|(field, score)| u32::from(score.value()) * weight_percent(field))
        .sum();

    ((weighted + 5) / 10) as u8
}
