use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Decimal value could not be represented as f64 in metric '{0}'")]
    NumericConversion(String),
}
