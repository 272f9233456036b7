use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FrameError {
    #[error("Cannot build a scene frame from zero records")]
    NoRecords,

    #[error("None of the {0} records has a projectable coordinate")]
    NoProjectableRecords(usize),

    #[error("Projection failed: {0}")]
    Projection(#[from] crate::projection::error::ProjectionError),
}
