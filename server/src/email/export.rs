use anyhow::Context;

use crate::{model::BatchClassificationResult, prompt::tags::join_tags};

/// Two-column CSV (`Email,Tags`) with tags joined by `", "`.
pub fn batch_to_csv(batch: &BatchClassificationResult) -> anyhow::Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer
        .write_record(["Email", "Tags"])
        .context("Could not write CSV header")?;

    for result in &batch.results {
        writer
            .write_record([result.email.as_str(), join_tags(&result.tags).as_str()])
            .context("Could not write CSV row")?;
    }

    let bytes = writer.into_inner().context("Could not flush CSV writer")?;
    String::from_utf8(bytes).context("CSV output is not UTF-8")
}
