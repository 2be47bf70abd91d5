//! Form Page Routes

use axum::{
    extract::{rejection::FormRejection, State},
    response::Html,
    Form,
};
use feature_encoder::{FeatureEncoder, RawFeatureRecord};
use std::sync::Arc;

use crate::format::format_currency;
use crate::page::{render_page, Outcome, PageView};
use crate::error::ApiError;
use crate::routes::predict::{record_failure, run_prediction};
use crate::AppState;

/// Show the form with default inputs
pub async fn show(State(state): State<Arc<AppState>>) -> Html<String> {
    let input = RawFeatureRecord::default();
    let summary = FeatureEncoder::new().encode_raw(&input).ok();

    Html(render_page(&PageView {
        input: &input,
        summary: summary.as_ref(),
        outcome: Outcome::Pending,
        load_error: state.load_error(),
    }))
}

/// Handle "Predict Price"
pub async fn submit(
    State(state): State<Arc<AppState>>,
    form: Result<Form<RawFeatureRecord>, FormRejection>,
) -> Html<String> {
    let input = match form {
        Ok(Form(input)) => input,
        Err(rejection) => {
            let error = ApiError::InvalidBody(rejection.body_text());
            record_failure(&error);
            return Html(render_page(&PageView {
                input: &RawFeatureRecord::default(),
                summary: None,
                outcome: Outcome::Failed(error.to_string()),
                load_error: state.load_error(),
            }));
        }
    };

    let summary = FeatureEncoder::new().encode_raw(&input).ok();

    let outcome = match run_prediction(&state, &input) {
        Ok(prediction) => Outcome::Price(format_currency(
            &state.display.currency_symbol,
            prediction.price,
        )),
        Err(e) => Outcome::Failed(e.to_string()),
    };

    Html(render_page(&PageView {
        input: &input,
        summary: summary.as_ref(),
        outcome,
        load_error: state.load_error(),
    }))
}
