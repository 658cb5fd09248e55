//! Property checks for the scoring engine over arbitrary text.

use idea_review::ideas::{
    compute_score_and_class, score_field, Classification, FieldScore, IdeaField, ScoringInput,
};
use proptest::prelude::*;

fn any_field() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        "[ \\t\\n]{0,8}".prop_map(Some),
        ".{0,400}".prop_map(Some),
    ]
}

fn any_input() -> impl Strategy<Value = ScoringInput> {
    (any_field(), any_field(), any_field(), any_field(), any_field()).prop_map(
        |(problem, solution, market, revenue_model, team)| ScoringInput {
            problem,
            solution,
            market,
            revenue_model,
            team,
        },
    )
}

fn any_section() -> impl Strategy<Value = IdeaField> {
    prop::sample::select(IdeaField::ALL.to_vec())
}

proptest! {
    #[test]
    fn scoring_is_deterministic(input in any_input()) {
        prop_assert_eq!(compute_score_and_class(&input), compute_score_and_class(&input));
    }

    #[test]
    fn score_and_breakdown_stay_in_range(input in any_input()) {
        let result = compute_score_and_class(&input);
        prop_assert!(result.score <= 100);
        for (_, score) in result.breakdown.iter() {
            prop_assert!([0, 2, 5, 8, 10].contains(&score.value()));
        }
    }

    #[test]
    fn classification_matches_thresholds(input in any_input()) {
        let result = compute_score_and_class(&input);
        let expected = match result.score {
            70..=100 => Classification::High,
            40..=69 => Classification::Moderate,
            _ => Classification::Low,
        };
        prop_assert_eq!(result.classification, expected);
    }

    #[test]
    fn suggestions_track_weak_sections(input in any_input()) {
        let result = compute_score_and_class(&input);
        let weak = result
            .breakdown
            .iter()
            .filter(|(_, score)| *score < FieldScore::OUTLINE)
            .count();
        let scope_note = usize::from(result.classification == Classification::Low);

        prop_assert_eq!(result.suggestions.len(), weak + scope_note);
        let mut unique = result.suggestions.clone();
        unique.sort();
        unique.dedup();
        prop_assert_eq!(unique.len(), result.suggestions.len());
    }

    #[test]
    fn longer_text_never_scores_lower(
        input in any_input(),
        field in any_section(),
        extra in ".{0,300}",
    ) {
        let before = compute_score_and_class(&input);
        let base = input.field(field).unwrap_or_default().to_string();
        let longer = format!("{base}{extra}");
        let extended = input.clone().with(field, longer.as_str());
        let after = compute_score_and_class(&extended);

        prop_assert!(score_field(base.as_str()) <= score_field(longer.as_str()));
        prop_assert!(before.breakdown.get(field) <= after.breakdown.get(field));
        prop_assert!(before.score <= after.score);
    }
}
