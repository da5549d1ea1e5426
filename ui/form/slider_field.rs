use super::FieldLabel;
use html::{component, html};

/// A range input that shows its current value next to it.
#[component]
pub fn SliderField(
	label: Option<String>,
	max: i64,
	min: i64,
	name: Option<String>,
	value: i64,
) {
	html! {
		<FieldLabel html_for={None}>
			{label}
			<div class="slider-field">
				<input
					class="slider-range"
					max={max.to_string()}
					min={min.to_string()}
					name={name}
					oninput="this.nextElementSibling.value = this.value"
					type="range"
					value={value.to_string()}
				/>
				<output class="slider-value">{value.to_string()}</output>
			</div>
		</FieldLabel>
	}
}
