use super::FieldLabel;
use html::{component, html};

#[component]
pub fn FileField(
	accept: Option<String>,
	disabled: Option<bool>,
	label: Option<String>,
	name: Option<String>,
	required: Option<bool>,
) {
	html! {
		<FieldLabel html_for={None}>
			{label}
			<input
				accept={accept}
				class="form-file-input"
				disabled={disabled}
				name={name}
				required={required}
				type="file"
			/>
		</FieldLabel>
	}
}
