pub mod error;

/// The file name batch predictions are downloaded as.
pub const DOWNLOAD_FILE_NAME: &str = "salary_predictions.csv";
