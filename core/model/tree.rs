use crate::record::N_FEATURES;
use ndarray::prelude::*;

/// A gradient boosted tree classifier. Trees are stored round major, each round holding one tree per output, so tree `i` contributes to output `i % n_outputs`.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub struct TreeClassifier {
	/// The initial logit of each output before any tree is applied.
	pub biases: Vec<f32>,
	pub trees: Vec<Tree>,
	pub classes: Vec<String>,
}

/// A Tree is described by a single vector of nodes. The root is the first node.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub struct Tree {
	pub nodes: Vec<Node>,
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub enum Node {
	Branch(BranchNode),
	Leaf(LeafNode),
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub struct BranchNode {
	pub left_child_index: usize,
	pub right_child_index: usize,
	pub split: BranchSplit,
}

/// Examples whose feature value is less than or equal to `split_value` go left.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub struct BranchSplit {
	pub feature_index: usize,
	pub split_value: f32,
	pub invalid_values_direction: SplitDirection,
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Copy, Debug, PartialEq)]
pub enum SplitDirection {
	Left,
	Right,
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub struct LeafNode {
	pub value: f32,
}

impl TreeClassifier {
	/// Compute the logits for each row of `features`, one column per output.
	pub fn predict(&self, features: ArrayView2<f32>) -> Array2<f32> {
		let n_outputs = self.biases.len();
		let mut logits = Array2::zeros((features.nrows(), n_outputs));
		for (features, mut logits) in features.axis_iter(Axis(0)).zip(logits.axis_iter_mut(Axis(0))) {
			logits.assign(&ArrayView1::from(self.biases.as_slice()));
			for (tree_index, tree) in self.trees.iter().enumerate() {
				logits[tree_index % n_outputs] += tree.predict(features);
			}
		}
		logits
	}

	pub(super) fn validate(&self) -> Result<(), String> {
		if self.trees.len() % self.biases.len() != 0 {
			return Err(format!(
				"expected a multiple of {} trees, found {}",
				self.biases.len(),
				self.trees.len()
			));
		}
		for (tree_index, tree) in self.trees.iter().enumerate() {
			tree.validate()
				.map_err(|message| format!("tree {}: {}", tree_index, message))?;
		}
		Ok(())
	}
}

impl Tree {
	/// Walk from the root to a leaf. Returns NaN if the walk leaves the tree.
	pub fn predict(&self, features: ArrayView1<f32>) -> f32 {
		let mut node_index = 0;
		loop {
			match self.nodes.get(node_index) {
				Some(Node::Branch(BranchNode {
					left_child_index,
					right_child_index,
					split:
						BranchSplit {
							feature_index,
							split_value,
							invalid_values_direction,
						},
					..
				})) => {
					let feature_value = match features.get(*feature_index) {
						Some(feature_value) => *feature_value,
						None => return f32::NAN,
					};
					node_index = if !feature_value.is_finite() {
						match invalid_values_direction {
							SplitDirection::Left => *left_child_index,
							SplitDirection::Right => *right_child_index,
						}
					} else if feature_value <= *split_value {
						*left_child_index
					} else {
						*right_child_index
					};
				}
				Some(Node::Leaf(LeafNode { value, .. })) => return *value,
				None => return f32::NAN,
			}
		}
	}

	/// Children must come after their parent, which guarantees that every walk reaches a leaf.
	fn validate(&self) -> Result<(), String> {
		if self.nodes.is_empty() {
			return Err("the tree has no nodes".to_owned());
		}
		for (node_index, node) in self.nodes.iter().enumerate() {
			if let Node::Branch(branch) = node {
				for child_index in [branch.left_child_index, branch.right_child_index].iter() {
					if *child_index <= node_index || *child_index >= self.nodes.len() {
						return Err(format!(
							"node {} has invalid child index {}",
							node_index, child_index
						));
					}
				}
				if branch.split.feature_index >= N_FEATURES {
					return Err(format!(
						"node {} splits on feature {} but there are only {} features",
						node_index, branch.split.feature_index, N_FEATURES
					));
				}
			}
		}
		Ok(())
	}
}

#[cfg(test)]
pub(crate) fn stump(feature_index: usize, split_value: f32, left: f32, right: f32) -> Tree {
	Tree {
		nodes: vec![
			Node::Branch(BranchNode {
				left_child_index: 1,
				right_child_index: 2,
				split: BranchSplit {
					feature_index,
					split_value,
					invalid_values_direction: SplitDirection::Left,
				},
			}),
			Node::Leaf(LeafNode { value: left }),
			Node::Leaf(LeafNode { value: right }),
		],
	}
}
