use super::page::{render, BatchOutcome, BatchProps, Props};
use crate::{
	common::error::{prediction_error_details, prediction_error_status, Error},
	Context,
};
use anyhow::Result;
use hyper::{header, Body, Request, Response, StatusCode};
use multer::Multipart;
use salary_core::{predict_table, table::Table, Classifier};

/// The number of rows shown in the previews.
const PREVIEW_ROW_COUNT: usize = 5;

pub async fn post(context: &Context, request: Request<Body>) -> Result<Response<Body>> {
	let boundary = request
		.headers()
		.get(header::CONTENT_TYPE)
		.and_then(|content_type| content_type.to_str().ok())
		.and_then(|content_type| multer::parse_boundary(content_type).ok())
		.ok_or(Error::BadRequest)?;
	let mut file: Option<Vec<u8>> = None;
	let mut multipart = Multipart::new(request.into_body(), boundary);
	while let Some(mut field) = multipart.next_field().await.map_err(|_| Error::BadRequest)? {
		let name = field.name().map(ToOwned::to_owned);
		let mut field_data = Vec::new();
		while let Some(chunk) = field.chunk().await.map_err(|_| Error::BadRequest)? {
			field_data.extend_from_slice(&chunk);
		}
		if name.as_deref() == Some("file") {
			file = Some(field_data);
		}
	}
	let (status, batch) = match file {
		Some(file) => batch(context.classifier.as_ref(), &file)?,
		None => (
			StatusCode::BAD_REQUEST,
			BatchProps {
				uploaded_preview: None,
				outcome: BatchOutcome::Failure {
					message: "A file is required.".to_owned(),
					details: Vec::new(),
				},
			},
		),
	};
	let props = Props {
		batch: Some(batch),
		..Props::default()
	};
	let html = render(props);
	let response = Response::builder()
		.status(status)
		.header(header::CONTENT_TYPE, "text/html; charset=utf-8")
		.body(Body::from(html))?;
	Ok(response)
}

/// Predict every row of the uploaded file. The uploaded preview is shown whenever the file parses, even if the prediction fails.
fn batch(classifier: &dyn Classifier, file: &[u8]) -> Result<(StatusCode, BatchProps)> {
	let table = match Table::from_csv(file) {
		Ok(table) => table,
		Err(error) => return Ok(failure(None, error)),
	};
	let uploaded_preview = table.head(PREVIEW_ROW_COUNT);
	let table = match predict_table(classifier, table) {
		Ok(table) => table,
		Err(error) => return Ok(failure(Some(uploaded_preview), error)),
	};
	tracing::info!(n_rows = table.n_rows(), "predicted uploaded file");
	let csv = table.to_csv()?;
	let batch = BatchProps {
		uploaded_preview: Some(uploaded_preview),
		outcome: BatchOutcome::Success {
			predictions_preview: table.head(PREVIEW_ROW_COUNT),
			download_href: format!("data:text/csv;base64,{}", base64::encode(&csv)),
		},
	};
	Ok((StatusCode::OK, batch))
}

/// Inference failures are shown on the page like any other error, so the page is still answered with 200.
fn failure(uploaded_preview: Option<Table>, error: salary_core::Error) -> (StatusCode, BatchProps) {
	let status = match prediction_error_status(&error) {
		StatusCode::INTERNAL_SERVER_ERROR => {
			tracing::error!(%error, "failed to predict uploaded file");
			StatusCode::OK
		}
		status => status,
	};
	let batch = BatchProps {
		uploaded_preview,
		outcome: BatchOutcome::Failure {
			message: error.to_string(),
			details: prediction_error_details(&error),
		},
	};
	(status, batch)
}
