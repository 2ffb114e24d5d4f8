use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::{
    email::{export::batch_to_csv, EmailClassifier},
    error::AppJsonResult,
    model::{BatchClassificationResult, ClassificationResult, CsvExport, EmailBatchInput, EmailInput},
    state::BatchCache,
};

/// # POST /classify
pub async fn classify(
    State(classifier): State<EmailClassifier>,
    payload: Result<Json<EmailInput>, JsonRejection>,
) -> AppJsonResult<ClassificationResult> {
    let Json(EmailInput { content }) = payload?;

    Ok(Json(classifier.classify(&content).await))
}

/// # POST /classify-batch
pub async fn classify_batch(
    State(classifier): State<EmailClassifier>,
    State(batch_cache): State<BatchCache>,
    payload: Result<Json<EmailBatchInput>, JsonRejection>,
) -> AppJsonResult<BatchClassificationResult> {
    let Json(EmailBatchInput { emails }) = payload?;

    let batch = run_batch(&classifier, &batch_cache, &emails).await;

    Ok(Json(batch))
}

/// # POST /export-csv
pub async fn export_csv(
    State(classifier): State<EmailClassifier>,
    State(batch_cache): State<BatchCache>,
    payload: Result<Json<EmailBatchInput>, JsonRejection>,
) -> AppJsonResult<CsvExport> {
    let Json(EmailBatchInput { emails }) = payload?;

    let batch = match batch_cache.matching(&emails).await {
        Some(batch) => {
            tracing::info!("Using stored batch results for CSV export");
            batch
        }
        None => run_batch(&classifier, &batch_cache, &emails).await,
    };

    let csv = batch_to_csv(&batch)?;

    Ok(Json(CsvExport { csv }))
}

async fn run_batch(
    classifier: &EmailClassifier,
    batch_cache: &BatchCache,
    emails: &[String],
) -> BatchClassificationResult {
    let batch = classifier.classify_batch(emails).await;
    batch_cache.store(batch.clone()).await;
    batch
}
