use askama::Template;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    routing::get,
    Form, Router,
};
use serde::Deserialize;
use tracing::{error, info};

use crate::services::{AuditLog, DriveApi, FormsApi};
use crate::web::input::{parse_count, Action, PageInput};
use crate::web::state::AppState;
use crate::web::views::{ErrorView, IndexPage, ResultView};
use crate::workflow::SubmissionFlow;

pub fn router<F, D, A>(state: AppState<F, D, A>) -> Router
where
    F: FormsApi + 'static,
    D: DriveApi + 'static,
    A: AuditLog + 'static,
{
    Router::new()
        .route("/", get(index::<F, D, A>).post(submit::<F, D, A>))
        .route("/health", get(health))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct IndexQuery {
    count: Option<String>,
}

async fn index<F, D, A>(
    State(_state): State<AppState<F, D, A>>,
    Query(query): Query<IndexQuery>,
) -> Result<Html<String>, StatusCode>
where
    F: FormsApi + 'static,
    D: DriveApi + 'static,
    A: AuditLog + 'static,
{
    let input = PageInput::blank(parse_count(query.count.as_deref()));
    render(IndexPage::from_input(&input))
}

async fn submit<F, D, A>(
    State(state): State<AppState<F, D, A>>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Html<String>, StatusCode>
where
    F: FormsApi + 'static,
    D: DriveApi + 'static,
    A: AuditLog + 'static,
{
    let input = PageInput::from_fields(&fields);
    let mut page = IndexPage::from_input(&input);

    if input.action == Action::Generate {
        info!(
            "收到生成请求: 培训师 {} / {}",
            input.trainer.trainer_name, input.trainer.institution_name
        );

        let submission = input.to_submission();
        let flow = SubmissionFlow::new(
            state.forms.as_ref(),
            state.drive.as_ref(),
            state.audit.as_ref(),
            &state.destination_folder_id,
        );

        match flow.run(&submission).await {
            Ok(outcome) => page.result = Some(ResultView::from(&outcome)),
            Err(e) => page.error = Some(ErrorView::from(&e)),
        }
    }

    render(page)
}

async fn health() -> &'static str {
    "ok"
}

fn render(page: IndexPage) -> Result<Html<String>, StatusCode> {
    page.render().map(Html).map_err(|e| {
        error!("页面渲染失败: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}
