/*!
Salary class prediction. Employee records are encoded with the fixed tables in [`encoding`], passed to a [`Classifier`] such as a [`model::Model`] loaded from disk, and the predicted classes are returned either as a single label or as a `PredictedClass` column appended to an uploaded [`table::Table`].
*/

#![allow(clippy::tabs_in_doc_comments)]

mod error;

pub mod encoding;
pub mod model;
pub mod predict;
pub mod record;
pub mod table;

pub use self::{
	error::{Error, InvalidValue},
	predict::{predict_batch, predict_one, predict_table, Classifier},
	record::{EmployeeRecord, EncodedRecord},
};
