use crate::PredictOptions;
use anyhow::{Context, Result};
use salary_core::{model::Model, predict_batch};
use std::io::Write;

pub(crate) fn predict(options: PredictOptions) -> Result<()> {
	let model = Model::from_path(&options.model)?;
	let file = std::fs::read(&options.file)
		.with_context(|| format!("failed to read {}", options.file.display()))?;
	let table = predict_batch(&model, &file)?;
	let csv = table.to_csv()?;
	match options.output {
		Some(output) => {
			std::fs::write(&output, &csv)
				.with_context(|| format!("failed to write {}", output.display()))?;
			tracing::info!(
				n_rows = table.n_rows(),
				output = %output.display(),
				"wrote predictions"
			);
		}
		None => {
			let stdout = std::io::stdout();
			let mut stdout = stdout.lock();
			stdout.write_all(&csv)?;
			stdout.flush()?;
		}
	}
	Ok(())
}

#[cfg(test)]
mod test {
	use super::*;
	use salary_core::model::LinearClassifier;

	#[test]
	fn test_predict() {
		let dir = tempfile::tempdir().unwrap();
		let model_path = dir.path().join("salary_predictor_model.bin");
		Model::Linear(LinearClassifier {
			biases: vec![-20.0],
			weights: vec![0.5, 0.0, 0.0, 0.0, 0.0],
			classes: vec!["<=100K".to_owned(), ">100K".to_owned()],
		})
		.to_path(&model_path)
		.unwrap();
		let file = dir.path().join("employees.csv");
		std::fs::write(
			&file,
			"Name,Age,Gender,Education Level,Job Title,Years of Experience\n\
			Ada,30,Female,PhD,Data Scientist,5\n\
			Alan,50,Male,Master's,Network Engineer,25\n",
		)
		.unwrap();
		let output = dir.path().join("predictions.csv");
		predict(PredictOptions {
			model: model_path,
			file,
			output: Some(output.clone()),
		})
		.unwrap();
		assert_eq!(
			std::fs::read_to_string(&output).unwrap(),
			"Name,Age,Gender,Education Level,Job Title,Years of Experience,PredictedClass\n\
			Ada,30,Female,PhD,Data Scientist,5,<=100K\n\
			Alan,50,Male,Master's,Network Engineer,25,>100K\n"
		);
	}

	#[test]
	fn test_predict_missing_model() {
		let dir = tempfile::tempdir().unwrap();
		let error = predict(PredictOptions {
			model: dir.path().join("missing.bin"),
			file: dir.path().join("employees.csv"),
			output: None,
		})
		.unwrap_err();
		assert!(error.to_string().starts_with("failed to load the model"));
	}
}
