use crate::{
	common::{
		error::{prediction_error_details, prediction_error_status},
		DOWNLOAD_FILE_NAME,
	},
	Context,
};
use anyhow::Result;
use hyper::{header, Body, Request, Response};
use salary_core::predict_batch;

/// Predict every row of a csv file posted as the request body and answer with the file plus a `PredictedClass` column.
pub async fn post(context: &Context, request: Request<Body>) -> Result<Response<Body>> {
	let body = hyper::body::to_bytes(request.into_body()).await?;
	let table = match predict_batch(context.classifier.as_ref(), &body) {
		Ok(table) => table,
		Err(error) => {
			let mut message = error.to_string();
			for detail in prediction_error_details(&error) {
				message.push('\n');
				message.push_str(&detail);
			}
			let response = Response::builder()
				.status(prediction_error_status(&error))
				.header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
				.body(Body::from(message))?;
			return Ok(response);
		}
	};
	tracing::info!(n_rows = table.n_rows(), "predicted posted file");
	let csv = table.to_csv()?;
	let response = Response::builder()
		.header(header::CONTENT_TYPE, "text/csv; charset=utf-8")
		.header(
			header::CONTENT_DISPOSITION,
			format!("attachment; filename=\"{}\"", DOWNLOAD_FILE_NAME),
		)
		.body(Body::from(csv))?;
	Ok(response)
}
