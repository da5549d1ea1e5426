/*!
The serialized salary classifier. A model file is a single major version byte followed by the model encoded as named MessagePack.
*/

use crate::{
	error::Error,
	predict::Classifier,
	record::{EncodedRecord, N_FEATURES},
};
use itertools::izip;
use ndarray::prelude::*;
use std::{
	io::{Read, Write},
	path::Path,
};

mod linear;
mod tree;

pub use self::linear::LinearClassifier;
pub use self::tree::{
	BranchNode, BranchSplit, LeafNode, Node, SplitDirection, Tree, TreeClassifier,
};

const MAJOR_VERSION: u8 = 0;

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub enum Model {
	Linear(LinearClassifier),
	Tree(TreeClassifier),
}

impl Model {
	/// Deserialize a `Model` from a slice.
	pub fn from_slice(slice: &[u8]) -> Result<Model, Error> {
		let (major_version, slice) = slice
			.split_first()
			.ok_or_else(|| Error::startup("the model file is empty"))?;
		check_major_version(*major_version)?;
		let model: Model = rmp_serde::from_slice(slice).map_err(Error::startup)?;
		model.validate()?;
		Ok(model)
	}

	/// Deserialize a `Model` by reading the file at `path`.
	pub fn from_path(path: &Path) -> Result<Model, Error> {
		let file = std::fs::File::open(path)
			.map_err(|error| Error::startup(format!("{}: {}", path.display(), error)))?;
		let mut reader = std::io::BufReader::new(file);
		let mut major_version = [0u8; 1];
		reader
			.read_exact(&mut major_version)
			.map_err(|_| Error::startup("the model file is empty"))?;
		check_major_version(major_version[0])?;
		let model: Model = rmp_serde::from_read(&mut reader).map_err(Error::startup)?;
		model.validate()?;
		Ok(model)
	}

	/// Write this model to the file at `path`.
	pub fn to_path(&self, path: &Path) -> anyhow::Result<()> {
		let file = std::fs::File::create(path)?;
		let mut writer = std::io::BufWriter::new(file);
		writer.write_all(&[MAJOR_VERSION])?;
		rmp_serde::encode::write_named(&mut writer, self)?;
		writer.flush()?;
		Ok(())
	}

	pub fn to_vec(&self) -> anyhow::Result<Vec<u8>> {
		let mut bytes = vec![MAJOR_VERSION];
		rmp_serde::encode::write_named(&mut bytes, self)?;
		Ok(bytes)
	}

	/// The labels this model predicts, in output order.
	pub fn classes(&self) -> &[String] {
		match self {
			Model::Linear(model) => &model.classes,
			Model::Tree(model) => &model.classes,
		}
	}

	fn biases(&self) -> &[f32] {
		match self {
			Model::Linear(model) => &model.biases,
			Model::Tree(model) => &model.biases,
		}
	}

	fn validate(&self) -> Result<(), Error> {
		let n_classes = self.classes().len();
		if n_classes < 2 {
			return Err(Error::startup(format!(
				"expected at least 2 classes, found {}",
				n_classes
			)));
		}
		let n_outputs = if n_classes == 2 { 1 } else { n_classes };
		if self.biases().len() != n_outputs {
			return Err(Error::startup(format!(
				"expected {} outputs for {} classes, found {}",
				n_outputs,
				n_classes,
				self.biases().len()
			)));
		}
		match self {
			Model::Linear(model) => model.validate(),
			Model::Tree(model) => model.validate(),
		}
		.map_err(Error::startup)
	}
}

fn check_major_version(major_version: u8) -> Result<(), Error> {
	if major_version != MAJOR_VERSION {
		return Err(Error::startup(format!(
			"unknown major version {}",
			major_version
		)));
	}
	Ok(())
}

impl Classifier for Model {
	fn predict(&self, records: &[EncodedRecord]) -> Result<Vec<String>, Error> {
		let mut features = Array2::zeros((records.len(), N_FEATURES));
		for (mut row, record) in izip!(features.axis_iter_mut(Axis(0)), records) {
			row.assign(&ArrayView1::from(&record.features()[..]));
		}
		let logits = match self {
			Model::Linear(model) => model.predict(features.view()).map_err(Error::inference)?,
			Model::Tree(model) => model.predict(features.view()),
		};
		let classes = self.classes();
		logits
			.axis_iter(Axis(0))
			.map(|logits| class_for_logits(classes, logits).map(ToOwned::to_owned))
			.collect()
	}
}

/// A single output is the logit of the second class. Otherwise the class with the largest logit wins, the first on ties.
fn class_for_logits<'a>(classes: &'a [String], logits: ArrayView1<f32>) -> Result<&'a str, Error> {
	if logits.iter().any(|logit| !logit.is_finite()) {
		return Err(Error::inference("the model produced a non-finite output"));
	}
	let class_index = if logits.len() == 1 {
		if logits[0] > 0.0 {
			1
		} else {
			0
		}
	} else {
		let mut class_index = 0;
		for (index, logit) in logits.iter().enumerate() {
			if *logit > logits[class_index] {
				class_index = index;
			}
		}
		class_index
	};
	classes
		.get(class_index)
		.map(String::as_str)
		.ok_or_else(|| Error::inference(format!("no class for output {}", class_index)))
}
