use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),
}

#[derive(Error, Debug)]
pub enum CsvError {
    #[error("Failed to open file: {0}")]
    FileOpen(#[from] std::io::Error),

    #[error("CSV file is empty")]
    EmptyFile,

    #[error("Unknown candidate type code {code} at row {row}")]
    UnknownCandidateCode { code: u8, row: usize },

    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),
}

#[derive(Error, Debug)]
pub enum CleanError {
    #[error("Unknown candidate type '{value}' for {party} in {year}")]
    UnknownCandidateType { value: String, party: String, year: i32 },
}

#[derive(Error, Debug)]
pub enum ScalerError {
    #[error("Input data is empty")]
    EmptyInput,

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Scaler has not been fitted")]
    NotFitted,
}

#[derive(Error, Debug)]
pub enum OptimizerError {
    #[error("Input data is empty")]
    EmptyInput,

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Input contains a non-finite value")]
    InvalidNumericValue,

    #[error("Numerical instability encountered during gradient computation")]
    NumericalInstability,
}

#[derive(Error, Debug)]
pub enum LossError {
    #[error("Input data is empty")]
    EmptyInput,

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Input contains a non-finite value")]
    InvalidNumericValue,

    #[error("Predictions must lie in [0, 1]")]
    InvalidPredictionRange,

    #[error("Actual values must be 0 or 1")]
    InvalidActualValue,
}

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Training data is empty")]
    EmptyTrainingData,

    #[error("Model has not been fitted")]
    NotFitted,

    #[error("Sample weights must sum to a positive value")]
    InvalidSampleWeights,

    #[error("Scaler error: {0}")]
    Scaler(#[from] ScalerError),

    #[error("Optimizer error: {0}")]
    Optimizer(#[from] OptimizerError),

    #[error("Loss error: {0}")]
    Loss(#[from] LossError),

    #[error("Failed to shape data into array: {0}")]
    ArrayShape(#[from] ndarray::ShapeError),
}

#[derive(Error, Debug)]
pub enum RequestError {
    #[error("Missing required fields: {0}")]
    MissingFields(String),

    #[error("Invalid numeric values provided")]
    NonNumeric,

    #[error("All numeric values must be positive")]
    NegativeValue,

    #[error("Invalid candidate type \"{0}\". Use: new, incumbent, experienced, mixed")]
    InvalidCandidateType(String),
}

#[derive(Error, Debug)]
#[error("Unknown model kind '{0}', expected 'logistic' or 'forest'")]
pub struct ModelKindParseError(pub String);
