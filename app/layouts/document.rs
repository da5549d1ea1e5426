use html::{component, html};

#[component]
pub fn Document(title: String) {
	html! {
		<html lang="en">
			<head>
				<meta charset="utf-8" />
				<meta content="width=device-width, initial-scale=1" name="viewport" />
				<title>{title}</title>
				<link href="/styles.css" rel="stylesheet" />
				<meta
					content="Predict whether an employee earns more than 100K from a few details."
					name="description"
				/>
			</head>
			<body>
				{children}
			</body>
		</html>
	}
}

/// Render a full page, prefixed with the doctype.
pub fn render_document(title: &str, body: html::Node) -> String {
	let document = html! {
		<Document title={title.to_owned()}>
			{body}
		</Document>
	};
	format!("<!doctype html>{}", document.render_to_string())
}
