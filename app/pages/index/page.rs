use crate::{common::DOWNLOAD_FILE_NAME, layouts::document::render_document};
use html::{component, html};
use salary_core::{
	encoding::{EducationLevel, Gender, JobTitle},
	record::{
		EmployeeRecord, AGE_COLUMN_NAME, AGE_RANGE, EDUCATION_LEVEL_COLUMN_NAME,
		GENDER_COLUMN_NAME, JOB_TITLE_COLUMN_NAME, YEARS_OF_EXPERIENCE_COLUMN_NAME,
		YEARS_OF_EXPERIENCE_RANGE,
	},
	table::Table,
};
use salary_ui as ui;

#[derive(Clone)]
pub struct Props {
	/// The values the form starts out with. They are also shown in the input summary.
	pub form_values: EmployeeRecord,
	pub form_error: Option<String>,
	pub prediction: Option<PredictionOutcome>,
	pub batch: Option<BatchProps>,
}

/// The predicted class, or the message of the error that prevented it.
pub type PredictionOutcome = Result<String, String>;

#[derive(Clone)]
pub struct BatchProps {
	/// The first rows of the uploaded file, if it could be parsed.
	pub uploaded_preview: Option<Table>,
	pub outcome: BatchOutcome,
}

#[derive(Clone)]
pub enum BatchOutcome {
	Success {
		predictions_preview: Table,
		download_href: String,
	},
	Failure {
		message: String,
		details: Vec<String>,
	},
}

impl Default for Props {
	fn default() -> Props {
		Props {
			form_values: EmployeeRecord::default(),
			form_error: None,
			prediction: None,
			batch: None,
		}
	}
}

pub fn render(props: Props) -> String {
	let body = html! {
		<div class="page">
			<ui::S1>
				<ui::H1 center={None}>{"Employee Salary Classification"}</ui::H1>
				<ui::P>
					{"Predict whether an employee's salary is >100K or <=100K from their details, one at a time or for a whole csv file."}
				</ui::P>
				<ui::S2>
					<ui::H2 center={None}>{"Input Employee Details"}</ui::H2>
					<PredictionForm values={props.form_values.clone()} />
					<InputSummary input={props.form_values} />
					{props.form_error.map(|form_error| html! {
						<ui::Alert level={ui::Level::Danger} title={None}>
							{form_error}
						</ui::Alert>
					})}
					{props.prediction.map(|outcome| html! {
						<PredictionResult outcome={outcome} />
					})}
				</ui::S2>
				<ui::S2>
					<ui::H2 center={None}>{"Batch Prediction (Upload CSV)"}</ui::H2>
					<UploadForm />
					{props.batch.map(|batch| html! {
						<BatchResult props={batch} />
					})}
				</ui::S2>
			</ui::S1>
		</div>
	};
	render_document("Employee Salary Classification", body)
}

fn select_options<T: std::fmt::Display>(values: &[T]) -> Vec<ui::SelectFieldOption> {
	values
		.iter()
		.map(|value| ui::SelectFieldOption {
			text: value.to_string(),
			value: value.to_string(),
		})
		.collect()
}

#[component]
fn PredictionForm(values: EmployeeRecord) {
	html! {
		<ui::Form action={None} enc_type={None} post={None}>
			<ui::SliderField
				label={Some(AGE_COLUMN_NAME.to_owned())}
				max={i64::from(*AGE_RANGE.end())}
				min={i64::from(*AGE_RANGE.start())}
				name={Some("age".to_owned())}
				value={i64::from(values.age)}
			/>
			<ui::SelectField
				disabled={None}
				label={Some(GENDER_COLUMN_NAME.to_owned())}
				name={Some("gender".to_owned())}
				options={select_options(Gender::ALL)}
				required={Some(true)}
				value={Some(values.gender.to_string())}
			/>
			<ui::SelectField
				disabled={None}
				label={Some(EDUCATION_LEVEL_COLUMN_NAME.to_owned())}
				name={Some("education_level".to_owned())}
				options={select_options(EducationLevel::ALL)}
				required={Some(true)}
				value={Some(values.education_level.to_string())}
			/>
			<ui::SelectField
				disabled={None}
				label={Some(JOB_TITLE_COLUMN_NAME.to_owned())}
				name={Some("job_title".to_owned())}
				options={select_options(JobTitle::ALL)}
				required={Some(true)}
				value={Some(values.job_title.to_string())}
			/>
			<ui::SliderField
				label={Some(YEARS_OF_EXPERIENCE_COLUMN_NAME.to_owned())}
				max={i64::from(*YEARS_OF_EXPERIENCE_RANGE.end())}
				min={i64::from(*YEARS_OF_EXPERIENCE_RANGE.start())}
				name={Some("years_of_experience".to_owned())}
				value={i64::from(values.years_of_experience)}
			/>
			<ui::Button
				button_type={ui::ButtonType::Submit}
				disabled={None}
				download={None}
				href={None}
			>
				{"Predict Salary Class"}
			</ui::Button>
		</ui::Form>
	}
}

#[component]
fn InputSummary(input: EmployeeRecord) {
	let summary = Table {
		column_names: vec![
			AGE_COLUMN_NAME.to_owned(),
			GENDER_COLUMN_NAME.to_owned(),
			EDUCATION_LEVEL_COLUMN_NAME.to_owned(),
			JOB_TITLE_COLUMN_NAME.to_owned(),
			YEARS_OF_EXPERIENCE_COLUMN_NAME.to_owned(),
		],
		rows: vec![vec![
			input.age.to_string(),
			input.gender.to_string(),
			input.education_level.to_string(),
			input.job_title.to_string(),
			input.years_of_experience.to_string(),
		]],
	};
	html! {
		<div class="input-summary">
			<ui::H2 center={None}>{"Input Summary"}</ui::H2>
			<DataTable table={summary} />
		</div>
	}
}

#[component]
fn PredictionResult(outcome: PredictionOutcome) {
	match outcome {
		Ok(class_name) => html! {
			<ui::Alert level={ui::Level::Success} title={None}>
				{format!("Prediction: {}", class_name)}
			</ui::Alert>
		},
		Err(message) => html! {
			<ui::Alert level={ui::Level::Danger} title={None}>
				{message}
			</ui::Alert>
		},
	}
}

#[component]
fn UploadForm() {
	html! {
		<ui::Form action={None} enc_type={Some("multipart/form-data".to_owned())} post={Some(true)}>
			<ui::FileField
				accept={Some(".csv,text/csv".to_owned())}
				disabled={None}
				label={Some("Upload a CSV file with employee details".to_owned())}
				name={Some("file".to_owned())}
				required={Some(true)}
			/>
			<ui::Button
				button_type={ui::ButtonType::Submit}
				disabled={None}
				download={None}
				href={None}
			>
				{"Upload and Predict"}
			</ui::Button>
		</ui::Form>
	}
}

#[component]
fn BatchResult(props: BatchProps) {
	let uploaded_preview = props.uploaded_preview.map(|table| html! {
		<div class="batch-preview">
			<ui::P>{"Uploaded Data Preview:"}</ui::P>
			<DataTable table={table} />
		</div>
	});
	let outcome = match props.outcome {
		BatchOutcome::Success {
			predictions_preview,
			download_href,
		} => html! {
			<div class="batch-success">
				<ui::Alert level={ui::Level::Success} title={None}>
					{"Batch prediction complete!"}
				</ui::Alert>
				<DataTable table={predictions_preview} />
				<ui::Button
					button_type={ui::ButtonType::Button}
					disabled={None}
					download={Some(DOWNLOAD_FILE_NAME.to_owned())}
					href={Some(download_href)}
				>
					{"Download Results CSV"}
				</ui::Button>
			</div>
		},
		BatchOutcome::Failure { message, details } => {
			let details = if details.is_empty() {
				None
			} else {
				Some(html! {
					<ul class="alert-details">
						{details.into_iter().map(|detail| html! { <li>{detail}</li> }).collect::<Vec<_>>()}
					</ul>
				})
			};
			html! {
				<ui::Alert level={ui::Level::Danger} title={None}>
					{message}
					{details}
				</ui::Alert>
			}
		}
	};
	html! {
		<div class="batch-result">
			{uploaded_preview}
			{outcome}
		</div>
	}
}

#[component]
fn DataTable(table: Table) {
	let header_cells = table
		.column_names
		.into_iter()
		.map(|column_name| html! {
			<ui::TableHeaderCell expand={None} text_align={None}>
				{column_name}
			</ui::TableHeaderCell>
		})
		.collect::<Vec<_>>();
	let rows = table
		.rows
		.into_iter()
		.map(|row| {
			let cells = row
				.into_iter()
				.map(|value| html! {
					<ui::TableCell expand={None} text_align={None}>
						{value}
					</ui::TableCell>
				})
				.collect::<Vec<_>>();
			html! {
				<ui::TableRow>
					{cells}
				</ui::TableRow>
			}
		})
		.collect::<Vec<_>>();
	html! {
		<ui::Table>
			<ui::TableHeader>
				<ui::TableRow>
					{header_cells}
				</ui::TableRow>
			</ui::TableHeader>
			<ui::TableBody>
				{rows}
			</ui::TableBody>
		</ui::Table>
	}
}
