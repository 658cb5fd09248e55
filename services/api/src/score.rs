use clap::Args;
use idea_review::error::AppError;
use idea_review::ideas::{compute_score_and_class, IdeaField, ScoringInput, ScoringResult};
use std::fs;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct ScoreArgs {
    /// Problem statement
    #[arg(long)]
    pub(crate) problem: Option<String>,
    /// Proposed solution
    #[arg(long)]
    pub(crate) solution: Option<String>,
    /// Target market
    #[arg(long)]
    pub(crate) market: Option<String>,
    /// Revenue model
    #[arg(long)]
    pub(crate) revenue_model: Option<String>,
    /// Team description
    #[arg(long)]
    pub(crate) team: Option<String>,
    /// JSON file with problem/solution/market/revenueModel/team keys; flags override it
    #[arg(long)]
    pub(crate) input: Option<PathBuf>,
    /// Print the raw JSON result instead of the text summary
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let json = args.json;
    let input = scoring_input(args)?;
    let result = compute_score_and_class(&input);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_result(&result));
    }
    Ok(())
}

fn scoring_input(args: ScoreArgs) -> Result<ScoringInput, AppError> {
    let mut input = match &args.input {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => ScoringInput::default(),
    };

    let overrides = [
        (IdeaField::Problem, args.problem),
        (IdeaField::Solution, args.solution),
        (IdeaField::Market, args.market),
        (IdeaField::RevenueModel, args.revenue_model),
        (IdeaField::Team, args.team),
    ];
    for (field, text) in overrides {
        if let Some(text) = text {
            input.set(field, text);
        }
    }

    Ok(input)
}

pub(crate) fn render_result(result: &ScoringResult) -> String {
    let mut out = format!(
        "Score: {}/100 ({})\n\nBreakdown\n",
        result.score, result.classification
    );
    for (field, score) in result.breakdown.iter() {
        out.push_str(&format!("- {}: {}/10\n", field.label(), score.value()));
    }

    if result.suggestions.is_empty() {
        out.push_str("\nSuggestions: none\n");
    } else {
        out.push_str("\nSuggestions\n");
        for suggestion in &result.suggestions {
            out.push_str(&format!("- {suggestion}\n"));
        }
    }
    out
}
