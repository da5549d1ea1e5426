use crate::{
	encoding::{EDUCATION_LEVEL, GENDER, JOB_TITLE},
	error::{Error, InvalidValue},
	record::{
		EmployeeRecord, EncodedRecord, AGE_COLUMN_NAME, EDUCATION_LEVEL_COLUMN_NAME,
		GENDER_COLUMN_NAME, JOB_TITLE_COLUMN_NAME, PREDICTED_CLASS_COLUMN_NAME,
		REQUIRED_COLUMN_NAMES, YEARS_OF_EXPERIENCE_COLUMN_NAME,
	},
	table::Table,
};

/// Anything that maps encoded records to class labels. Implementations must return exactly one label per record, in order.
pub trait Classifier: Send + Sync {
	fn predict(&self, records: &[EncodedRecord]) -> Result<Vec<String>, Error>;
}

/// Predict the class of a single record.
pub fn predict_one(classifier: &dyn Classifier, record: &EmployeeRecord) -> Result<String, Error> {
	let encoded = record.encode();
	tracing::debug!(?encoded, "predicting one record");
	let mut predictions = classifier.predict(&[encoded])?;
	if predictions.len() != 1 {
		return Err(Error::inference(format!(
			"expected 1 prediction, got {}",
			predictions.len()
		)));
	}
	Ok(predictions.remove(0))
}

/// Parse `bytes` as a csv table and predict every row. See [`predict_table`].
pub fn predict_batch(classifier: &dyn Classifier, bytes: &[u8]) -> Result<Table, Error> {
	let table = Table::from_csv(bytes)?;
	predict_table(classifier, table)
}

/// Predict every row of `table` and set the `PredictedClass` column to the results. Either every row is predicted or none is. The classifier is only called once every cell has been encoded.
pub fn predict_table(classifier: &dyn Classifier, mut table: Table) -> Result<Table, Error> {
	let missing: Vec<String> = REQUIRED_COLUMN_NAMES
		.iter()
		.filter(|column_name| table.column_index(column_name).is_none())
		.map(|column_name| column_name.to_string())
		.collect();
	if !missing.is_empty() {
		return Err(Error::Schema { missing });
	}
	let records = encode_table(&table)?;
	if records.is_empty() {
		return Err(Error::parse("no rows to predict"));
	}
	tracing::debug!(n_rows = records.len(), "predicting table");
	let predictions = classifier.predict(&records)?;
	if predictions.len() != records.len() {
		return Err(Error::inference(format!(
			"expected {} predictions, got {}",
			records.len(),
			predictions.len()
		)));
	}
	table.set_column(PREDICTED_CLASS_COLUMN_NAME, predictions);
	Ok(table)
}

/// The indexes of the required columns in `table`, which must have all of them.
struct ColumnIndexes {
	age: usize,
	gender: usize,
	education_level: usize,
	job_title: usize,
	years_of_experience: usize,
}

fn encode_table(table: &Table) -> Result<Vec<EncodedRecord>, Error> {
	let index = |column_name: &str| {
		table
			.column_index(column_name)
			.ok_or_else(|| Error::Schema {
				missing: vec![column_name.to_owned()],
			})
	};
	let indexes = ColumnIndexes {
		age: index(AGE_COLUMN_NAME)?,
		gender: index(GENDER_COLUMN_NAME)?,
		education_level: index(EDUCATION_LEVEL_COLUMN_NAME)?,
		job_title: index(JOB_TITLE_COLUMN_NAME)?,
		years_of_experience: index(YEARS_OF_EXPERIENCE_COLUMN_NAME)?,
	};
	let mut records = Vec::with_capacity(table.n_rows());
	let mut invalid = Vec::new();
	for (row_index, row) in table.rows.iter().enumerate() {
		let row_number = row_index + 1;
		let mut check = |column: &'static str, value: &str, encoded: Option<()>| {
			if encoded.is_none() {
				invalid.push(InvalidValue {
					row: row_number,
					column,
					value: value.to_owned(),
				});
			}
		};
		let age = parse_number(&row[indexes.age]);
		check(AGE_COLUMN_NAME, &row[indexes.age], age.map(drop));
		let gender = GENDER.encode(&row[indexes.gender]);
		check(GENDER_COLUMN_NAME, &row[indexes.gender], gender.map(drop));
		let education_level = EDUCATION_LEVEL.encode(&row[indexes.education_level]);
		check(
			EDUCATION_LEVEL_COLUMN_NAME,
			&row[indexes.education_level],
			education_level.map(drop),
		);
		let job_title = JOB_TITLE.encode(&row[indexes.job_title]);
		check(
			JOB_TITLE_COLUMN_NAME,
			&row[indexes.job_title],
			job_title.map(drop),
		);
		let years_of_experience = parse_number(&row[indexes.years_of_experience]);
		check(
			YEARS_OF_EXPERIENCE_COLUMN_NAME,
			&row[indexes.years_of_experience],
			years_of_experience.map(drop),
		);
		if let (
			Some(age),
			Some(gender),
			Some(education_level),
			Some(job_title),
			Some(years_of_experience),
		) = (age, gender, education_level, job_title, years_of_experience)
		{
			records.push(EncodedRecord {
				age,
				gender,
				education_level,
				job_title,
				years_of_experience,
			});
		}
	}
	if !invalid.is_empty() {
		tracing::debug!(n_invalid = invalid.len(), "failed to encode table");
		return Err(Error::Encoding { invalid });
	}
	Ok(records)
}

/// Numeric cells may be surrounded by whitespace. Empty and non-finite values are invalid.
fn parse_number(value: &str) -> Option<f32> {
	lexical::parse::<f32, _>(value.trim())
		.ok()
		.filter(|value| value.is_finite())
}
