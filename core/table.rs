/*!
An uploaded csv file held as strings, so that the columns the model does not use are written back out exactly as they were read.
*/

use crate::error::Error;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Clone, Debug, PartialEq)]
pub struct Table {
	pub column_names: Vec<String>,
	/// Each row has one value per column.
	pub rows: Vec<Vec<String>>,
}

impl Table {
	/// Parse a csv file whose first record is the header. Rows shorter than the header are padded with empty values. Rows longer than the header are an error.
	pub fn from_csv(bytes: &[u8]) -> Result<Table, Error> {
		let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
		let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(bytes);
		let column_names: Vec<String> = reader
			.headers()
			.map_err(Error::parse)?
			.iter()
			.map(ToOwned::to_owned)
			.collect();
		if column_names.is_empty() {
			return Err(Error::parse("no columns to parse from file"));
		}
		for (index, column_name) in column_names.iter().enumerate() {
			if column_names[..index].contains(column_name) {
				return Err(Error::parse(format!(
					"duplicate column \"{}\"",
					column_name
				)));
			}
		}
		let n_columns = column_names.len();
		let mut rows = Vec::new();
		for (index, record) in reader.records().enumerate() {
			let record = record.map_err(Error::parse)?;
			if record.len() > n_columns {
				return Err(Error::parse(format!(
					"row {} has {} fields, but the header has {}",
					index + 1,
					record.len(),
					n_columns
				)));
			}
			let mut row: Vec<String> = record.iter().map(ToOwned::to_owned).collect();
			row.resize(n_columns, String::new());
			rows.push(row);
		}
		Ok(Table { column_names, rows })
	}

	pub fn to_csv(&self) -> Result<Vec<u8>, csv::Error> {
		let mut writer = csv::Writer::from_writer(Vec::new());
		writer.write_record(&self.column_names)?;
		for row in self.rows.iter() {
			writer.write_record(row)?;
		}
		writer
			.into_inner()
			.map_err(|error| csv::Error::from(error.into_error()))
	}

	pub fn n_rows(&self) -> usize {
		self.rows.len()
	}

	pub fn column_index(&self, column_name: &str) -> Option<usize> {
		self.column_names
			.iter()
			.position(|name| name == column_name)
	}

	pub fn column<'a>(&'a self, column_name: &str) -> Option<impl Iterator<Item = &'a str>> {
		let index = self.column_index(column_name)?;
		Some(self.rows.iter().map(move |row| row[index].as_str()))
	}

	/// The first `n` rows.
	pub fn head(&self, n: usize) -> Table {
		Table {
			column_names: self.column_names.clone(),
			rows: self.rows.iter().take(n).cloned().collect(),
		}
	}

	/// Replace the column named `column_name` with `values`, or append it as the last column if there is no such column. There must be one value per row.
	pub fn set_column(&mut self, column_name: &str, values: Vec<String>) {
		debug_assert_eq!(values.len(), self.rows.len());
		match self.column_index(column_name) {
			Some(index) => {
				for (row, value) in self.rows.iter_mut().zip(values) {
					row[index] = value;
				}
			}
			None => {
				self.column_names.push(column_name.to_owned());
				for (row, value) in self.rows.iter_mut().zip(values) {
					row.push(value);
				}
			}
		}
	}
}
