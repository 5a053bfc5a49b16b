use askama::Template;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use crate::error::AppResult;
use crate::models::Opportunity;
use crate::opportunities;
use crate::routes::home::Html;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/opportunities", get(opportunities_page))
}

#[derive(Template)]
#[template(path = "pages/opportunities.html")]
struct OpportunitiesTemplate {
    immediate: Vec<OpportunityView>,
    ongoing: Vec<OpportunityView>,
}

struct OpportunityView {
    title: String,
    description: String,
    category: String,
    institution_name: String,
    location: String,
}

impl From<Opportunity> for OpportunityView {
    fn from(opp: Opportunity) -> Self {
        OpportunityView {
            title: opp.title,
            description: opp.description,
            category: opp.category,
            institution_name: opp.institution_name,
            location: opp.location,
        }
    }
}

async fn opportunities_page(State(state): State<AppState>) -> AppResult<Response> {
    let listings = opportunities::listings(&state.backend).await?;

    Ok(Html(OpportunitiesTemplate {
        immediate: listings
            .immediate
            .into_iter()
            .map(OpportunityView::from)
            .collect(),
        ongoing: listings
            .ongoing
            .into_iter()
            .map(OpportunityView::from)
            .collect(),
    })
    .into_response())
}
