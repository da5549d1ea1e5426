use derive_more::{Display, Error};
use hyper::{Body, Response, StatusCode};

/// Errors a handler returns to have the router answer with a plain status response.
#[derive(Display, Debug, Error)]
pub enum Error {
	BadRequest,
	NotFound,
}

/// The number of unencodable cells listed on the page before the rest are summarized.
const MAX_LISTED_INVALID_VALUES: usize = 10;

pub fn status_response(status: StatusCode, body: impl Into<Body>) -> Response<Body> {
	let mut response = Response::new(body.into());
	*response.status_mut() = status;
	response
}

/// Inference failures are the server's fault. Every other prediction error is caused by the request.
pub fn prediction_error_status(error: &salary_core::Error) -> StatusCode {
	match error {
		salary_core::Error::Startup { .. } | salary_core::Error::Inference { .. } => {
			StatusCode::INTERNAL_SERVER_ERROR
		}
		salary_core::Error::Parse { .. }
		| salary_core::Error::Schema { .. }
		| salary_core::Error::Encoding { .. } => StatusCode::BAD_REQUEST,
	}
}

/// Lines pinpointing the cells that could not be encoded, if any.
pub fn prediction_error_details(error: &salary_core::Error) -> Vec<String> {
	let invalid = match error {
		salary_core::Error::Encoding { invalid } => invalid,
		_ => return Vec::new(),
	};
	let mut details: Vec<String> = invalid
		.iter()
		.take(MAX_LISTED_INVALID_VALUES)
		.map(ToString::to_string)
		.collect();
	if invalid.len() > MAX_LISTED_INVALID_VALUES {
		details.push(format!(
			"and {} more",
			invalid.len() - MAX_LISTED_INVALID_VALUES
		));
	}
	details
}

#[cfg(test)]
mod test {
	use super::*;
	use salary_core::InvalidValue;

	#[test]
	fn test_prediction_error_details() {
		let invalid = (1..=12)
			.map(|row| InvalidValue {
				row,
				column: "Gender",
				value: "Other".to_owned(),
			})
			.collect();
		let details = prediction_error_details(&salary_core::Error::Encoding { invalid });
		assert_eq!(details.len(), 11);
		assert_eq!(details[0], "row 1, Gender: \"Other\"");
		assert_eq!(details[10], "and 2 more");
		let error = salary_core::Error::Schema {
			missing: vec!["Job Title".to_owned()],
		};
		assert!(prediction_error_details(&error).is_empty());
		assert_eq!(prediction_error_status(&error), StatusCode::BAD_REQUEST);
	}
}
