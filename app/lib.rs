/*!
The salary prediction web app. It serves a form that predicts the salary class of a single employee and an upload that predicts a whole csv file, plus a small json and csv api over the same [`Classifier`].
*/

use self::common::error::{status_response, Error};
use anyhow::Result;
use hyper::{header, Body, Method, Request, Response, StatusCode};
use salary_core::{model::Model, Classifier};
use std::{net::IpAddr, path::PathBuf, sync::Arc};

mod api;
pub mod common;
mod layouts;
mod pages;

pub struct Options {
	pub host: IpAddr,
	pub model: PathBuf,
	pub port: u16,
}

pub struct Context {
	pub classifier: Arc<dyn Classifier>,
}

pub async fn handle(context: Arc<Context>, request: Request<Body>) -> Response<Body> {
	let method = request.method().clone();
	let path = request.uri().path().to_owned();
	let path_components: Vec<_> = path.split('/').skip(1).collect();
	let result = match (&method, path_components.as_slice()) {
		(&Method::GET, &[""]) => self::pages::index::get(&context, request).await,
		(&Method::POST, &[""]) => self::pages::index::post(&context, request).await,
		(&Method::POST, &["predict"]) => self::api::predict::post(&context, request).await,
		(&Method::POST, &["predictions.csv"]) => {
			self::api::predictions_csv::post(&context, request).await
		}
		(&Method::GET, &["health"]) => self::api::health::get(&context, request).await,
		(&Method::GET, &["styles.css"]) => styles(),
		_ => Err(Error::NotFound.into()),
	};
	let response = match result {
		Ok(response) => response,
		Err(error) => {
			if let Some(error) = error.downcast_ref::<Error>() {
				match error {
					Error::BadRequest => status_response(StatusCode::BAD_REQUEST, "bad request"),
					Error::NotFound => status_response(StatusCode::NOT_FOUND, "not found"),
				}
			} else {
				tracing::error!(%error, "failed to handle request");
				status_response(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
			}
		}
	};
	tracing::info!(%method, %path, status = response.status().as_u16(), "request");
	response
}

fn styles() -> Result<Response<Body>> {
	let response = Response::builder()
		.header(header::CONTENT_TYPE, "text/css; charset=utf-8")
		.body(Body::from(include_str!("styles.css")))?;
	Ok(response)
}

/// Load the model and serve the app until the server fails. A model that cannot be loaded is fatal.
pub fn run(options: Options) -> Result<()> {
	tokio::runtime::Builder::new_multi_thread()
		.enable_all()
		.build()?
		.block_on(run_impl(options))
}

async fn run_impl(options: Options) -> Result<()> {
	tracing::info!(model = %options.model.display(), "loading the model");
	let model = Model::from_path(&options.model)?;
	tracing::info!(classes = ?model.classes(), "loaded the model");
	let context = Context {
		classifier: Arc::new(model),
	};
	salary_util::serve::serve(options.host, options.port, context, handle).await?;
	Ok(())
}

#[cfg(test)]
mod test {
	use super::*;
	use salary_core::{EncodedRecord, Error as PredictionError};

	/// Predicts ">100K" for anyone older than 40.
	struct AgeClassifier;

	impl Classifier for AgeClassifier {
		fn predict(&self, records: &[EncodedRecord]) -> Result<Vec<String>, PredictionError> {
			Ok(records
				.iter()
				.map(|record| {
					if record.age > 40.0 {
						">100K".to_owned()
					} else {
						"<=100K".to_owned()
					}
				})
				.collect())
		}
	}

	struct FailingClassifier;

	impl Classifier for FailingClassifier {
		fn predict(&self, _records: &[EncodedRecord]) -> Result<Vec<String>, PredictionError> {
			Err(PredictionError::Inference {
				message: "the model is broken".to_owned(),
			})
		}
	}

	fn context(classifier: Arc<dyn Classifier>) -> Arc<Context> {
		Arc::new(Context { classifier })
	}

	async fn send(context: Arc<Context>, request: Request<Body>) -> (StatusCode, String) {
		let response = handle(context, request).await;
		let status = response.status();
		let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
		(status, String::from_utf8(body.to_vec()).unwrap())
	}

	fn get(uri: &str) -> Request<Body> {
		Request::get(uri).body(Body::empty()).unwrap()
	}

	fn upload(csv: &str) -> Request<Body> {
		let body = format!(
			"--BOUNDARY\r\n\
			Content-Disposition: form-data; name=\"file\"; filename=\"employees.csv\"\r\n\
			Content-Type: text/csv\r\n\
			\r\n\
			{}\r\n\
			--BOUNDARY--\r\n",
			csv
		);
		Request::post("/")
			.header(header::CONTENT_TYPE, "multipart/form-data; boundary=BOUNDARY")
			.body(Body::from(body))
			.unwrap()
	}

	const EMPLOYEES_CSV: &str = "\
Age,Gender,Education Level,Job Title,Years of Experience
30,Male,Bachelor's,Software Engineer,5
45,Female,PhD,Data Scientist,20
";

	#[tokio::test]
	async fn test_form() {
		let (status, body) = send(context(Arc::new(AgeClassifier)), get("/")).await;
		assert_eq!(status, StatusCode::OK);
		assert!(body.starts_with("<!doctype html>"));
		assert!(body.contains("Predict Salary Class"));
		assert!(!body.contains("Prediction:"));
		// The input summary shows the default form values before anything is submitted.
		assert!(body.contains("Input Summary"));
		assert!(body.contains("<td class=\"table-cell table-align-left\">Software Engineer</td>"));
	}

	#[tokio::test]
	async fn test_form_prediction() {
		let uri = "/?age=45&gender=Female&education_level=Master%27s&job_title=Data+Scientist&years_of_experience=20";
		let (status, body) = send(context(Arc::new(AgeClassifier)), get(uri)).await;
		assert_eq!(status, StatusCode::OK);
		assert!(body.contains("Prediction: &gt;100K"));
		assert!(body.contains("Input Summary"));
		assert!(body.contains("<td class=\"table-cell table-align-left\">Master&apos;s</td>"));
	}

	#[tokio::test]
	async fn test_form_rejects_invalid_input() {
		let uri = "/?age=17&gender=Female&education_level=PhD&job_title=Data+Scientist&years_of_experience=2";
		let (status, body) = send(context(Arc::new(FailingClassifier)), get(uri)).await;
		assert_eq!(status, StatusCode::BAD_REQUEST);
		assert!(body.contains("Age must be between 18 and 65, got 17"));
		assert!(!body.contains("Error in prediction"));
	}

	#[tokio::test]
	async fn test_form_inference_failure() {
		let uri = "/?age=30&gender=Male&education_level=PhD&job_title=Web+Developer&years_of_experience=2";
		let (status, body) = send(context(Arc::new(FailingClassifier)), get(uri)).await;
		assert_eq!(status, StatusCode::OK);
		assert!(body.contains("Error in prediction: the model is broken"));
	}

	#[tokio::test]
	async fn test_upload() {
		let (status, body) = send(context(Arc::new(AgeClassifier)), upload(EMPLOYEES_CSV)).await;
		assert_eq!(status, StatusCode::OK);
		assert!(body.contains("Uploaded Data Preview:"));
		assert!(body.contains("Batch prediction complete!"));
		assert!(body.contains("download=\"salary_predictions.csv\""));
		let expected = "\
Age,Gender,Education Level,Job Title,Years of Experience,PredictedClass
30,Male,Bachelor's,Software Engineer,5,<=100K
45,Female,PhD,Data Scientist,20,>100K
";
		let href = format!("data:text/csv;base64,{}", base64::encode(expected));
		assert!(body.contains(&href));
	}

	#[tokio::test]
	async fn test_upload_missing_columns() {
		let csv = "Age,Gender,Education Level,Years of Experience\n30,Male,PhD,5\n";
		let (status, body) = send(context(Arc::new(AgeClassifier)), upload(csv)).await;
		assert_eq!(status, StatusCode::BAD_REQUEST);
		assert!(body.contains("Uploaded Data Preview:"));
		assert!(body.contains("Missing columns in CSV: Job Title"));
		assert!(!body.contains("Download Results CSV"));
	}

	#[tokio::test]
	async fn test_upload_invalid_values() {
		let csv = "Age,Gender,Education Level,Job Title,Years of Experience\n30,Other,PhD,Web Developer,5\n";
		let (status, body) = send(context(Arc::new(AgeClassifier)), upload(csv)).await;
		assert_eq!(status, StatusCode::BAD_REQUEST);
		assert!(body.contains(
			"Some values could not be encoded. Check for typos in categorical fields."
		));
		assert!(body.contains("<li>row 1, Gender: &quot;Other&quot;</li>"));
	}

	#[tokio::test]
	async fn test_upload_short_row() {
		let csv = "Age,Gender,Education Level,Job Title,Years of Experience\n30,Male,PhD\n";
		let (status, body) = send(context(Arc::new(AgeClassifier)), upload(csv)).await;
		assert_eq!(status, StatusCode::BAD_REQUEST);
		assert!(body.contains("Uploaded Data Preview:"));
		assert!(body.contains("<li>row 1, Job Title: &quot;&quot;</li>"));
		assert!(body.contains("<li>row 1, Years of Experience: &quot;&quot;</li>"));
	}

	#[tokio::test]
	async fn test_upload_without_file() {
		let request = Request::post("/")
			.header(header::CONTENT_TYPE, "multipart/form-data; boundary=BOUNDARY")
			.body(Body::from(
				"--BOUNDARY\r\n\
				Content-Disposition: form-data; name=\"notes\"\r\n\
				\r\n\
				hello\r\n\
				--BOUNDARY--\r\n",
			))
			.unwrap();
		let (status, body) = send(context(Arc::new(AgeClassifier)), request).await;
		assert_eq!(status, StatusCode::BAD_REQUEST);
		assert!(body.contains("A file is required."));
		let request = Request::post("/").body(Body::from("Age\n30\n")).unwrap();
		let (status, _) = send(context(Arc::new(AgeClassifier)), request).await;
		assert_eq!(status, StatusCode::BAD_REQUEST);
	}

	#[tokio::test]
	async fn test_predictions_csv() {
		let request = Request::post("/predictions.csv")
			.body(Body::from(EMPLOYEES_CSV))
			.unwrap();
		let response = handle(context(Arc::new(AgeClassifier)), request).await;
		assert_eq!(response.status(), StatusCode::OK);
		assert_eq!(
			response.headers()[header::CONTENT_DISPOSITION],
			"attachment; filename=\"salary_predictions.csv\""
		);
		let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
		insta::assert_snapshot!(String::from_utf8(body.to_vec()).unwrap(), @r###"
  Age,Gender,Education Level,Job Title,Years of Experience,PredictedClass
  30,Male,Bachelor's,Software Engineer,5,<=100K
  45,Female,PhD,Data Scientist,20,>100K
  "###);
	}

	#[tokio::test]
	async fn test_predictions_csv_errors() {
		let request = Request::post("/predictions.csv")
			.body(Body::from("Age,Gender\n30,Male\n"))
			.unwrap();
		let (status, body) = send(context(Arc::new(AgeClassifier)), request).await;
		assert_eq!(status, StatusCode::BAD_REQUEST);
		assert_eq!(
			body,
			"Missing columns in CSV: Education Level, Job Title, Years of Experience"
		);
		let request = Request::post("/predictions.csv")
			.body(Body::from(EMPLOYEES_CSV))
			.unwrap();
		let (status, body) = send(context(Arc::new(FailingClassifier)), request).await;
		assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
		assert_eq!(body, "Error in prediction: the model is broken");
	}

	#[tokio::test]
	async fn test_predict_json() {
		let record = r#"{
			"age": 30,
			"gender": "Male",
			"education_level": "Master's",
			"job_title": "Data Scientist",
			"years_of_experience": 5
		}"#;
		let request = Request::post("/predict").body(Body::from(record)).unwrap();
		let (status, body) = send(context(Arc::new(AgeClassifier)), request).await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(body, r#"{"prediction":"<=100K"}"#);
		let request = Request::post("/predict").body(Body::from(record)).unwrap();
		let (status, body) = send(context(Arc::new(FailingClassifier)), request).await;
		assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
		assert_eq!(body, r#"{"error":"Error in prediction: the model is broken"}"#);
		let request = Request::post("/predict")
			.body(Body::from(record.replace("Male", "Other")))
			.unwrap();
		let (status, _) = send(context(Arc::new(AgeClassifier)), request).await;
		assert_eq!(status, StatusCode::BAD_REQUEST);
	}

	#[tokio::test]
	async fn test_health_styles_and_not_found() {
		let (status, body) = send(context(Arc::new(AgeClassifier)), get("/health")).await;
		assert_eq!((status, body.as_str()), (StatusCode::OK, "ok"));
		let response = handle(context(Arc::new(AgeClassifier)), get("/styles.css")).await;
		assert_eq!(response.status(), StatusCode::OK);
		assert_eq!(
			response.headers()[header::CONTENT_TYPE],
			"text/css; charset=utf-8"
		);
		let (status, _) = send(context(Arc::new(AgeClassifier)), get("/missing")).await;
		assert_eq!(status, StatusCode::NOT_FOUND);
		let request = Request::delete("/").body(Body::empty()).unwrap();
		let (status, _) = send(context(Arc::new(AgeClassifier)), request).await;
		assert_eq!(status, StatusCode::NOT_FOUND);
	}
}
