use std::io::Write;

use super::repository::IdeaRecord;

const HEADERS: [&str; 10] = [
    "Title",
    "Problem",
    "Solution",
    "Market",
    "Revenue Model",
    "Team",
    "Score",
    "Classification",
    "Owner",
    "Created At",
];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush csv output: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv output was not valid utf-8")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Write one row per idea. Quoting of embedded commas, quotes and newlines is left to `csv`.
pub fn write_ideas_csv<W: Write>(records: &[IdeaRecord], writer: W) -> Result<W, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADERS)?;

    for record in records {
        let score = record.evaluation.score.to_string();
        let created_at = record.created_at.to_rfc3339();
        csv_writer.write_record([
            record.display_title().as_str(),
            record.content.problem.as_str(),
            record.content.solution.as_str(),
            record.content.market.as_str(),
            record.content.revenue_model.as_str(),
            record.content.team.as_str(),
            score.as_str(),
            record.evaluation.classification.label(),
            record.owner.0.as_str(),
            created_at.as_str(),
        ])?;
    }

    csv_writer
        .into_inner()
        .map_err(|err| ExportError::Io(err.into_error()))
}

pub fn ideas_to_csv(records: &[IdeaRecord]) -> Result<String, ExportError> {
    let buffer = write_ideas_csv(records, Vec::new())?;
    Ok(String::from_utf8(buffer)?)
}
