//! Form Page Rendering

use feature_encoder::{Answer, FeatureVector, FurnishingStatus, RawFeatureRecord};
use std::fmt::Write;

/// What happened on the last submit
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Nothing submitted yet
    Pending,
    /// Formatted price
    Price(String),
    /// Prediction error message
    Failed(String),
}

/// Everything the page shows
pub struct PageView<'a> {
    pub input: &'a RawFeatureRecord,
    pub summary: Option<&'a FeatureVector>,
    pub outcome: Outcome,
    pub load_error: Option<&'a str>,
}

const STYLE: &str = "body{font-family:sans-serif;margin:0;display:flex}\
aside{width:18rem;padding:1rem;background:#f0f2f6;min-height:100vh}\
main{padding:1rem 2rem;flex:1}\
label{display:block;margin-top:.75rem}\
table{border-collapse:collapse}td,th{border:1px solid #ccc;padding:.25rem .5rem}\
.error{background:#fde2e2;color:#7d1a1a;padding:.75rem}\
.success{background:#dff5e3;color:#1a5d2a;padding:.75rem}";

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn number_input(
    html: &mut String,
    name: &str,
    label: &str,
    value: i64,
    (min, max, step): (i64, i64, i64),
) {
    let _ = write!(
        html,
        r#"<label for="{name}">{label}</label><input type="number" id="{name}" name="{name}" min="{min}" max="{max}" step="{step}" value="{value}" required>"#,
    );
}

fn slider(html: &mut String, name: &str, label: &str, value: i64, min: i64, max: i64) {
    let _ = write!(
        html,
        r#"<label for="{name}">{label}</label><input type="range" id="{name}" name="{name}" min="{min}" max="{max}" value="{value}" oninput="this.nextElementSibling.value=this.value"><output>{value}</output>"#,
    );
}

fn select(html: &mut String, name: &str, label: &str, options: &[&str], current: &str) {
    let _ = write!(
        html,
        r#"<label for="{name}">{label}</label><select id="{name}" name="{name}">"#
    );
    for option in options {
        let selected = if option.eq_ignore_ascii_case(current.trim()) {
            " selected"
        } else {
            ""
        };
        let _ = write!(html, r#"<option value="{option}"{selected}>{option}</option>"#);
    }
    html.push_str("</select>");
}

fn sidebar(html: &mut String, input: &RawFeatureRecord) {
    let furnishing: Vec<&str> = FurnishingStatus::ALL.iter().map(|s| s.label()).collect();

    html.push_str(r#"<aside><h2>Input House Features</h2><form method="post" action="/">"#);
    number_input(html, "area", "Area (sq ft)", input.area, (500, 10_000, 50));
    slider(html, "bedrooms", "Bedrooms", input.bedrooms, 1, 10);
    slider(html, "bathrooms", "Bathrooms", input.bathrooms, 1, 5);
    slider(html, "stories", "Stories", input.stories, 1, 4);
    slider(html, "parking", "Parking spaces", input.parking, 0, 5);
    select(html, "mainroad", "On Main Road", &Answer::LABELS, &input.mainroad);
    select(html, "guestroom", "Has Guest Room", &Answer::LABELS, &input.guestroom);
    select(html, "basement", "Has Basement", &Answer::LABELS, &input.basement);
    select(
        html,
        "hotwaterheating",
        "Has Hot Water Heating",
        &Answer::LABELS,
        &input.hotwaterheating,
    );
    select(
        html,
        "airconditioning",
        "Has Air Conditioning",
        &Answer::LABELS,
        &input.airconditioning,
    );
    select(html, "furnishingstatus", "Furnishing Status", &furnishing, &input.furnishingstatus);
    html.push_str(r#"<p><button type="submit">Predict Price</button></p></form></aside>"#);
}

fn summary_table(html: &mut String, summary: &FeatureVector) {
    html.push_str("<h3>Input Summary</h3><table><tr>");
    for (name, _) in summary.named() {
        let _ = write!(html, "<th>{}</th>", escape(name));
    }
    html.push_str("</tr><tr>");
    for (_, value) in summary.named() {
        let _ = write!(html, "<td>{}</td>", value);
    }
    html.push_str("</tr></table>");
}

/// Render the whole page
pub fn render_page(view: &PageView<'_>) -> String {
    let mut html = String::with_capacity(8 * 1024);
    let _ = write!(
        html,
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>House Price Prediction App</title><style>{STYLE}</style></head><body>"
    );

    sidebar(&mut html, view.input);

    html.push_str("<main><h1>House Price Prediction App</h1>");
    html.push_str("<p>Enter the details in the sidebar to predict house price.</p>");

    if let Some(error) = view.load_error {
        let _ = write!(
            html,
            r#"<div class="error">Error loading model or scaler: {}</div>"#,
            escape(error)
        );
    }

    if let Some(summary) = view.summary {
        summary_table(&mut html, summary);
    }

    match &view.outcome {
        Outcome::Pending => {}
        Outcome::Price(price) => {
            let _ = write!(
                html,
                r#"<div class="success">Predicted House Price: {}</div>"#,
                escape(price)
            );
        }
        Outcome::Failed(message) => {
            let _ = write!(
                html,
                r#"<div class="error">Prediction error: {}</div>"#,
                escape(message)
            );
        }
    }

    html.push_str("</main></body></html>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use feature_encoder::FeatureEncoder;

    #[test]
    fn test_form_has_all_controls() {
        let input = RawFeatureRecord::default();
        let html = render_page(&PageView {
            input: &input,
            summary: None,
            outcome: Outcome::Pending,
            load_error: None,
        });

        for name in [
            "area",
            "bedrooms",
            "bathrooms",
            "stories",
            "parking",
            "mainroad",
            "guestroom",
            "basement",
            "hotwaterheating",
            "airconditioning",
            "furnishingstatus",
        ] {
            assert!(html.contains(&format!(r#"name="{name}""#)), "missing {name}");
        }
        assert!(html.contains("Predict Price"));
        assert!(html.contains(r#"step="50" value="500" required>"#));
        assert!(html.contains(r#"<option value="Unfurnished" selected>"#));
        assert!(!html.contains("Prediction error"));
    }

    #[test]
    fn test_summary_and_price() {
        let input = RawFeatureRecord::default();
        let summary = FeatureEncoder::new().encode_raw(&input).unwrap();
        let html = render_page(&PageView {
            input: &input,
            summary: Some(&summary),
            outcome: Outcome::Price("\u{20b9} 5,000,000.00".to_string()),
            load_error: None,
        });

        assert!(html.contains("Input Summary"));
        assert!(html.contains("<th>furnishingstatus_semi-furnished</th>"));
        assert!(html.contains("Predicted House Price: \u{20b9} 5,000,000.00"));
    }

    #[test]
    fn test_errors_are_escaped() {
        let input = RawFeatureRecord::default();
        let html = render_page(&PageView {
            input: &input,
            summary: None,
            outcome: Outcome::Failed("<bad>".to_string()),
            load_error: Some("missing & broken"),
        });

        assert!(html.contains("Prediction error: &lt;bad&gt;"));
        assert!(html.contains("Error loading model or scaler: missing &amp; broken"));
    }
}
