//! Priority analysis: category classification, urgency scoring and the
//! ROI × urgency matrix.

pub mod classification;
pub mod matrix;
pub mod urgency;

pub use classification::CategoryClass;
pub use matrix::{
    cell_index, group_by_priority, PriorityMatrix, PriorityMatrixItem, Quadrant, CELL_WIDTH,
    GRID_SIZE, QUADRANT_THRESHOLD,
};
pub use urgency::{urgency_for, urgency_score, BASE_URGENCY, MAX_URGENCY};
