use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Not enough data to draw a chart: {0}")]
    NotEnoughData(String),

    #[error("Failed to draw chart: {0}")]
    Drawing(String),
}
