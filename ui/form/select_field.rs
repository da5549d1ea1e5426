use super::FieldLabel;
use html::{component, html};

#[derive(Clone)]
pub struct SelectFieldOption {
	pub text: String,
	pub value: String,
}

/// A select whose option matching `value` starts out selected.
#[component]
pub fn SelectField(
	disabled: Option<bool>,
	label: Option<String>,
	name: Option<String>,
	options: Vec<SelectFieldOption>,
	required: Option<bool>,
	value: Option<String>,
) {
	html! {
		<FieldLabel html_for={None}>
			{label}
			<select
				class="form-select"
				disabled={disabled}
				name={name}
				required={required}
			>
				{
					options.into_iter().map(|option| {
						let selected = value.as_deref() == Some(option.value.as_str());
						html! {
							<option selected={selected} value={option.value}>
								{option.text}
							</option>
						}
					}).collect::<Vec<_>>()
				}
			</select>
		</FieldLabel>
	}
}
