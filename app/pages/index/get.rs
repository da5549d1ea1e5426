use super::page::{render, Props};
use crate::{common::error::Error, Context};
use anyhow::Result;
use derive_more::Display;
use hyper::{header, Body, Request, Response, StatusCode};
use salary_core::{
	encoding::UnknownLabelError,
	predict_one,
	record::{
		EmployeeRecord, OutOfRangeError, AGE_COLUMN_NAME, EDUCATION_LEVEL_COLUMN_NAME,
		GENDER_COLUMN_NAME, JOB_TITLE_COLUMN_NAME, YEARS_OF_EXPERIENCE_COLUMN_NAME,
	},
};
use std::collections::BTreeMap;

pub async fn get(context: &Context, request: Request<Body>) -> Result<Response<Body>> {
	let search_params: Option<BTreeMap<String, String>> = request
		.uri()
		.query()
		.map(|query| serde_urlencoded::from_str(query))
		.transpose()
		.map_err(|_| Error::BadRequest)?;
	let search_params = search_params.filter(|search_params| !search_params.is_empty());
	let (status, props) = match search_params {
		None => (StatusCode::OK, Props::default()),
		Some(search_params) => match record_from_search_params(&search_params) {
			Ok(record) => {
				let outcome = predict_one(context.classifier.as_ref(), &record).map_err(|error| {
					tracing::error!(%error, "failed to predict");
					error.to_string()
				});
				let props = Props {
					form_values: record,
					prediction: Some(outcome),
					..Props::default()
				};
				(StatusCode::OK, props)
			}
			Err(error) => {
				let props = Props {
					form_error: Some(error.to_string()),
					..Props::default()
				};
				(StatusCode::BAD_REQUEST, props)
			}
		},
	};
	let html = render(props);
	let response = Response::builder()
		.status(status)
		.header(header::CONTENT_TYPE, "text/html; charset=utf-8")
		.body(Body::from(html))?;
	Ok(response)
}

#[derive(Debug, Display, PartialEq)]
pub enum FormError {
	#[display(fmt = "{} is required", _0)]
	Missing(&'static str),
	#[display(fmt = "{} must be a whole number, got \"{}\"", _0, _1)]
	NotANumber(&'static str, String),
	#[display(fmt = "{}", _0)]
	UnknownLabel(UnknownLabelError),
	#[display(fmt = "{}", _0)]
	OutOfRange(OutOfRangeError),
}

/// Read a record from the form's query parameters. Every field is required and must be in the range the form offers.
pub fn record_from_search_params(
	search_params: &BTreeMap<String, String>,
) -> Result<EmployeeRecord, FormError> {
	let get = |name: &str, column_name: &'static str| {
		search_params
			.get(name)
			.map(|value| value.as_str())
			.ok_or(FormError::Missing(column_name))
	};
	let number = |name: &str, column_name: &'static str| {
		let value = get(name, column_name)?;
		lexical::parse::<u8, _>(value.trim())
			.map_err(|_| FormError::NotANumber(column_name, value.to_owned()))
	};
	let record = EmployeeRecord {
		age: number("age", AGE_COLUMN_NAME)?,
		gender: get("gender", GENDER_COLUMN_NAME)?
			.parse()
			.map_err(FormError::UnknownLabel)?,
		education_level: get("education_level", EDUCATION_LEVEL_COLUMN_NAME)?
			.parse()
			.map_err(FormError::UnknownLabel)?,
		job_title: get("job_title", JOB_TITLE_COLUMN_NAME)?
			.parse()
			.map_err(FormError::UnknownLabel)?,
		years_of_experience: number("years_of_experience", YEARS_OF_EXPERIENCE_COLUMN_NAME)?,
	};
	record.check_ranges().map_err(FormError::OutOfRange)?;
	Ok(record)
}

#[cfg(test)]
mod test {
	use super::*;
	use salary_core::encoding::{EducationLevel, Gender, JobTitle};

	fn search_params(query: &str) -> BTreeMap<String, String> {
		serde_urlencoded::from_str(query).unwrap()
	}

	#[test]
	fn test_record_from_search_params() {
		let record = record_from_search_params(&search_params(
			"age=30&gender=Male&education_level=Master%27s&job_title=Data+Scientist&years_of_experience=5",
		))
		.unwrap();
		assert_eq!(
			record,
			EmployeeRecord {
				age: 30,
				gender: Gender::Male,
				education_level: EducationLevel::Masters,
				job_title: JobTitle::DataScientist,
				years_of_experience: 5,
			}
		);
	}

	#[test]
	fn test_form_errors() {
		let error = |query: &str| {
			record_from_search_params(&search_params(query))
				.unwrap_err()
				.to_string()
		};
		assert_eq!(error("age=30"), "Gender is required");
		assert_eq!(
			error("age=thirty&gender=Male&education_level=PhD&job_title=Web+Developer&years_of_experience=5"),
			"Age must be a whole number, got \"thirty\""
		);
		assert_eq!(
			error("age=30&gender=Other&education_level=PhD&job_title=Web+Developer&years_of_experience=5"),
			"unknown Gender \"Other\""
		);
		assert_eq!(
			error("age=30&gender=Male&education_level=PhD&job_title=Web+Developer&years_of_experience=41"),
			"Years of Experience must be between 0 and 40, got 41"
		);
	}
}
