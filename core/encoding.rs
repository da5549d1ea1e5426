/*!
The fixed label to code tables the model was trained with. A label that is not in its table cannot be encoded. Lookups are exact, so `"male"` and `"Male "` are not `"Male"`.
*/

use thiserror::Error;

/// A fixed mapping from category labels to the integer codes used at training time.
#[derive(Debug)]
pub struct EncodingTable {
	pub column_name: &'static str,
	pub entries: &'static [(&'static str, u8)],
}

impl EncodingTable {
	pub fn encode(&self, label: &str) -> Option<u8> {
		self.entries
			.iter()
			.find(|(entry_label, _)| *entry_label == label)
			.map(|(_, code)| *code)
	}

	pub fn labels(&self) -> impl Iterator<Item = &'static str> {
		self.entries.iter().map(|(label, _)| *label)
	}
}

#[derive(Clone, Debug, Error, PartialEq)]
#[error("unknown {column_name} \"{label}\"")]
pub struct UnknownLabelError {
	pub column_name: &'static str,
	pub label: String,
}

macro_rules! categorical {
	(
		$(#[$meta:meta])*
		pub enum $name:ident: $table:ident($column_name:tt) {
			$($variant:ident => ($label:tt, $code:tt),)*
		}
	) => {
		$(#[$meta])*
		#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
		pub enum $name {
			$(
				#[serde(rename = $label)]
				$variant,
			)*
		}

		pub static $table: EncodingTable = EncodingTable {
			column_name: $column_name,
			entries: &[$(($label, $code)),*],
		};

		impl $name {
			pub const ALL: &'static [$name] = &[$($name::$variant),*];

			pub fn label(self) -> &'static str {
				match self {
					$($name::$variant => $label,)*
				}
			}

			pub fn code(self) -> u8 {
				match self {
					$($name::$variant => $code,)*
				}
			}
		}

		impl std::str::FromStr for $name {
			type Err = UnknownLabelError;
			fn from_str(label: &str) -> Result<$name, UnknownLabelError> {
				match label {
					$($label => Ok($name::$variant),)*
					_ => Err(UnknownLabelError {
						column_name: $column_name,
						label: label.to_owned(),
					}),
				}
			}
		}

		impl std::fmt::Display for $name {
			fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
				f.write_str(self.label())
			}
		}
	};
}

categorical! {
	pub enum Gender: GENDER("Gender") {
		Male => ("Male", 0),
		Female => ("Female", 1),
	}
}

categorical! {
	pub enum EducationLevel: EDUCATION_LEVEL("Education Level") {
		Bachelors => ("Bachelor's", 0),
		Masters => ("Master's", 1),
		Phd => ("PhD", 2),
	}
}

categorical! {
	pub enum JobTitle: JOB_TITLE("Job Title") {
		SoftwareEngineer => ("Software Engineer", 0),
		DataScientist => ("Data Scientist", 1),
		SystemAnalyst => ("System Analyst", 2),
		ProjectManager => ("Project Manager", 3),
		BusinessAnalyst => ("Business Analyst", 4),
		DevopsEngineer => ("DevOps Engineer", 5),
		DatabaseAdministrator => ("Database Administrator", 6),
		WebDeveloper => ("Web Developer", 7),
		MachineLearningEngineer => ("Machine Learning Engineer", 8),
		NetworkEngineer => ("Network Engineer", 9),
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_codes_match_training() {
		assert_eq!(GENDER.encode("Male"), Some(0));
		assert_eq!(GENDER.encode("Female"), Some(1));
		assert_eq!(EDUCATION_LEVEL.encode("Bachelor's"), Some(0));
		assert_eq!(EDUCATION_LEVEL.encode("Master's"), Some(1));
		assert_eq!(EDUCATION_LEVEL.encode("PhD"), Some(2));
		let job_titles: Vec<_> = JOB_TITLE
			.labels()
			.map(|label| JOB_TITLE.encode(label).unwrap())
			.collect();
		assert_eq!(job_titles, (0..10).collect::<Vec<u8>>());
		assert_eq!(JOB_TITLE.encode("Network Engineer"), Some(9));
	}

	#[test]
	fn test_unknown_labels() {
		assert_eq!(GENDER.encode("Other"), None);
		assert_eq!(GENDER.encode("male"), None);
		assert_eq!(GENDER.encode("Male "), None);
		assert_eq!(EDUCATION_LEVEL.encode(""), None);
		assert_eq!(
			"Chef".parse::<JobTitle>(),
			Err(UnknownLabelError {
				column_name: "Job Title",
				label: "Chef".to_owned(),
			})
		);
	}

	#[test]
	fn test_enums_agree_with_tables() {
		for gender in Gender::ALL {
			assert_eq!(GENDER.encode(gender.label()), Some(gender.code()));
			assert_eq!(gender.label().parse::<Gender>(), Ok(*gender));
		}
		for education_level in EducationLevel::ALL {
			assert_eq!(
				EDUCATION_LEVEL.encode(education_level.label()),
				Some(education_level.code())
			);
			assert_eq!(
				education_level.label().parse::<EducationLevel>(),
				Ok(*education_level)
			);
		}
		for job_title in JobTitle::ALL {
			assert_eq!(JOB_TITLE.encode(job_title.label()), Some(job_title.code()));
			assert_eq!(job_title.label().parse::<JobTitle>(), Ok(*job_title));
		}
		assert_eq!(GENDER.labels().count(), Gender::ALL.len());
		assert_eq!(EDUCATION_LEVEL.labels().count(), EducationLevel::ALL.len());
		assert_eq!(JOB_TITLE.labels().count(), JobTitle::ALL.len());
	}

	#[test]
	fn test_encoding_is_stable() {
		for _ in 0..3 {
			assert_eq!(JOB_TITLE.encode("Data Scientist"), Some(1));
			assert_eq!(EducationLevel::Masters.code(), 1);
		}
	}

	#[test]
	fn test_serde_uses_labels() {
		let json = serde_json::to_string(&EducationLevel::Bachelors).unwrap();
		assert_eq!(json, "\"Bachelor's\"");
		let job_title: JobTitle = serde_json::from_str("\"DevOps Engineer\"").unwrap();
		assert_eq!(job_title, JobTitle::DevopsEngineer);
	}
}
