pub mod health;
pub mod predict;
pub mod predictions_csv;
