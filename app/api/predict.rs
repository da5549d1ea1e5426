use crate::{common::error::prediction_error_status, Context};
use anyhow::Result;
use hyper::{header, Body, Request, Response, StatusCode};
use salary_core::{predict_one, EmployeeRecord};

#[derive(serde::Serialize)]
#[serde(untagged)]
enum PredictResponse {
	Prediction { prediction: String },
	Error { error: String },
}

/// Predict the class of a record posted as json, with its categorical fields given as labels.
pub async fn post(context: &Context, request: Request<Body>) -> Result<Response<Body>> {
	let body = hyper::body::to_bytes(request.into_body()).await?;
	let (status, response) = match serde_json::from_slice::<EmployeeRecord>(&body) {
		Err(error) => (
			StatusCode::BAD_REQUEST,
			PredictResponse::Error {
				error: error.to_string(),
			},
		),
		Ok(record) => match record.check_ranges() {
			Err(error) => (
				StatusCode::BAD_REQUEST,
				PredictResponse::Error {
					error: error.to_string(),
				},
			),
			Ok(()) => match predict_one(context.classifier.as_ref(), &record) {
				Ok(prediction) => (StatusCode::OK, PredictResponse::Prediction { prediction }),
				Err(error) => {
					tracing::error!(%error, "failed to predict");
					(
						prediction_error_status(&error),
						PredictResponse::Error {
							error: error.to_string(),
						},
					)
				}
			},
		},
	};
	let body = serde_json::to_vec(&response)?;
	let response = Response::builder()
		.status(status)
		.header(header::CONTENT_TYPE, "application/json")
		.body(Body::from(body))?;
	Ok(response)
}
