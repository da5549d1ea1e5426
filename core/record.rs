use crate::encoding::{EducationLevel, Gender, JobTitle};
use std::ops::RangeInclusive;
use thiserror::Error;

pub const AGE_COLUMN_NAME: &str = "Age";
pub const GENDER_COLUMN_NAME: &str = "Gender";
pub const EDUCATION_LEVEL_COLUMN_NAME: &str = "Education Level";
pub const JOB_TITLE_COLUMN_NAME: &str = "Job Title";
pub const YEARS_OF_EXPERIENCE_COLUMN_NAME: &str = "Years of Experience";

/// The columns an uploaded table must have, in the order the model consumes them.
pub const REQUIRED_COLUMN_NAMES: [&str; N_FEATURES] = [
	AGE_COLUMN_NAME,
	GENDER_COLUMN_NAME,
	EDUCATION_LEVEL_COLUMN_NAME,
	JOB_TITLE_COLUMN_NAME,
	YEARS_OF_EXPERIENCE_COLUMN_NAME,
];

/// The name of the column appended to batch predictions.
pub const PREDICTED_CLASS_COLUMN_NAME: &str = "PredictedClass";

/// The number of features in an encoded record.
pub const N_FEATURES: usize = 5;

pub const AGE_RANGE: RangeInclusive<u8> = 18..=65;
pub const YEARS_OF_EXPERIENCE_RANGE: RangeInclusive<u8> = 0..=40;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EmployeeRecord {
	pub age: u8,
	pub gender: Gender,
	pub education_level: EducationLevel,
	pub job_title: JobTitle,
	pub years_of_experience: u8,
}

/// An [`EmployeeRecord`] with its categorical fields replaced by their training codes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EncodedRecord {
	pub age: f32,
	pub gender: u8,
	pub education_level: u8,
	pub job_title: u8,
	pub years_of_experience: f32,
}

#[derive(Clone, Debug, Error, PartialEq)]
#[error("{field} must be between {} and {}, got {value}", .range.start(), .range.end())]
pub struct OutOfRangeError {
	pub field: &'static str,
	pub value: u8,
	pub range: RangeInclusive<u8>,
}

impl Default for EmployeeRecord {
	fn default() -> EmployeeRecord {
		EmployeeRecord {
			age: 30,
			gender: Gender::Male,
			education_level: EducationLevel::Bachelors,
			job_title: JobTitle::SoftwareEngineer,
			years_of_experience: 5,
		}
	}
}

impl EmployeeRecord {
	/// Check the numeric fields against the ranges offered by the form.
	pub fn check_ranges(&self) -> Result<(), OutOfRangeError> {
		if !AGE_RANGE.contains(&self.age) {
			return Err(OutOfRangeError {
				field: AGE_COLUMN_NAME,
				value: self.age,
				range: AGE_RANGE,
			});
		}
		if !YEARS_OF_EXPERIENCE_RANGE.contains(&self.years_of_experience) {
			return Err(OutOfRangeError {
				field: YEARS_OF_EXPERIENCE_COLUMN_NAME,
				value: self.years_of_experience,
				range: YEARS_OF_EXPERIENCE_RANGE,
			});
		}
		Ok(())
	}

	pub fn encode(&self) -> EncodedRecord {
		EncodedRecord {
			age: f32::from(self.age),
			gender: self.gender.code(),
			education_level: self.education_level.code(),
			job_title: self.job_title.code(),
			years_of_experience: f32::from(self.years_of_experience),
		}
	}
}

impl EncodedRecord {
	/// The feature row in [`REQUIRED_COLUMN_NAMES`] order.
	pub fn features(&self) -> [f32; N_FEATURES] {
		[
			self.age,
			f32::from(self.gender),
			f32::from(self.education_level),
			f32::from(self.job_title),
			self.years_of_experience,
		]
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_encode() {
		let record = EmployeeRecord {
			age: 30,
			gender: Gender::Male,
			education_level: EducationLevel::Masters,
			job_title: JobTitle::DataScientist,
			years_of_experience: 5,
		};
		let encoded = record.encode();
		assert_eq!(
			encoded,
			EncodedRecord {
				age: 30.0,
				gender: 0,
				education_level: 1,
				job_title: 1,
				years_of_experience: 5.0,
			}
		);
		assert_eq!(encoded.features(), [30.0, 0.0, 1.0, 1.0, 5.0]);
	}

	#[test]
	fn test_check_ranges() {
		let record = EmployeeRecord::default();
		assert_eq!(record.check_ranges(), Ok(()));
		let record = EmployeeRecord {
			age: 17,
			..EmployeeRecord::default()
		};
		let error = record.check_ranges().unwrap_err();
		assert_eq!(error.to_string(), "Age must be between 18 and 65, got 17");
		let record = EmployeeRecord {
			years_of_experience: 41,
			..EmployeeRecord::default()
		};
		assert_eq!(
			record.check_ranges().unwrap_err().field,
			YEARS_OF_EXPERIENCE_COLUMN_NAME
		);
		let record = EmployeeRecord {
			age: 65,
			years_of_experience: 40,
			..EmployeeRecord::default()
		};
		assert!(record.check_ranges().is_ok());
	}

	#[test]
	fn test_json() {
		let record: EmployeeRecord = serde_json::from_str(
			r#"{
				"age": 41,
				"gender": "Female",
				"education_level": "PhD",
				"job_title": "Web Developer",
				"years_of_experience": 12
			}"#,
		)
		.unwrap();
		assert_eq!(record.education_level, EducationLevel::Phd);
		assert_eq!(record.encode().features(), [41.0, 1.0, 2.0, 7.0, 12.0]);
	}
}
