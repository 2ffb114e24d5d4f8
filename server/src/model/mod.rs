pub mod classification;

pub use classification::{
    BatchClassificationResult, ClassificationResult, CsvExport, EmailBatchInput, EmailInput,
};
