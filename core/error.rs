use thiserror::Error;

/// The ways a prediction request can fail. Every variant is terminal for the request that produced it.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
	/// The model artifact could not be read or is not a valid model.
	#[error("failed to load the model: {message}")]
	Startup { message: String },
	/// The model failed to produce predictions.
	#[error("Error in prediction: {message}")]
	Inference { message: String },
	/// The uploaded bytes are not a csv table.
	#[error("Error processing the file: {message}")]
	Parse { message: String },
	/// One or more of the required columns are absent, listed in required order.
	#[error("Missing columns in CSV: {}", .missing.join(", "))]
	Schema { missing: Vec<String> },
	/// One or more cells could not be encoded. Nothing was predicted.
	#[error("Some values could not be encoded. Check for typos in categorical fields.")]
	Encoding { invalid: Vec<InvalidValue> },
}

/// A cell that could not be encoded.
#[derive(Clone, Debug, PartialEq)]
pub struct InvalidValue {
	/// The 1-based index of the data row, not counting the header.
	pub row: usize,
	pub column: &'static str,
	pub value: String,
}

impl std::fmt::Display for InvalidValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "row {}, {}: \"{}\"", self.row, self.column, self.value)
	}
}

impl Error {
	pub(crate) fn startup(message: impl std::fmt::Display) -> Error {
		Error::Startup {
			message: message.to_string(),
		}
	}

	pub(crate) fn inference(message: impl std::fmt::Display) -> Error {
		Error::Inference {
			message: message.to_string(),
		}
	}

	pub(crate) fn parse(message: impl std::fmt::Display) -> Error {
		Error::Parse {
			message: message.to_string(),
		}
	}
}
