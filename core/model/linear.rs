use crate::record::N_FEATURES;
use ndarray::prelude::*;

/// A linear classifier over the encoded features.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub struct LinearClassifier {
	pub biases: Vec<f32>,
	/// The weights are row major with shape (n_outputs, n_features).
	pub weights: Vec<f32>,
	pub classes: Vec<String>,
}

impl LinearClassifier {
	/// Compute the logits for each row of `features`, one column per output.
	pub fn predict(&self, features: ArrayView2<f32>) -> Result<Array2<f32>, ndarray::ShapeError> {
		let weights = ArrayView2::from_shape((self.biases.len(), N_FEATURES), &self.weights)?;
		let mut logits = features.dot(&weights.t());
		logits += &ArrayView1::from(self.biases.as_slice());
		Ok(logits)
	}

	pub(super) fn validate(&self) -> Result<(), String> {
		let expected = self.biases.len() * N_FEATURES;
		if self.weights.len() != expected {
			return Err(format!(
				"expected {} weights, found {}",
				expected,
				self.weights.len()
			));
		}
		if self.weights.iter().chain(self.biases.iter()).any(|value| !value.is_finite()) {
			return Err("the weights must be finite".to_owned());
		}
		Ok(())
	}
}
