use askama::Template;

use crate::error::SubmissionError;
use crate::models::TestConfig;
use crate::web::input::PageInput;
use crate::workflow::{FilingStatus, SubmissionOutcome};

#[derive(Debug, Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub trainer_name: String,
    pub college_name: String,
    pub test_title: String,
    pub count: usize,
    pub min_count: usize,
    pub max_count: usize,
    pub questions: Vec<QuestionView>,
    pub result: Option<ResultView>,
    pub error: Option<ErrorView>,
}

#[derive(Debug, Clone)]
pub struct QuestionView {
    pub number: usize,
    pub key: String,
    pub prompt: String,
    pub options: Vec<OptionView>,
}

#[derive(Debug, Clone)]
pub struct OptionView {
    pub index: usize,
    pub field: String,
    pub label: String,
    pub value: String,
    pub selected: bool,
}

/// 成功结果
#[derive(Debug, Clone)]
pub struct ResultView {
    pub view_url: String,
    pub qr_data_uri: Option<String>,
    /// 归档失败时的警告
    pub filing_warning: Option<String>,
}

/// 失败结果；审计失败时仍带有表单链接
#[derive(Debug, Clone)]
pub struct ErrorView {
    pub message: String,
    pub form_url: Option<String>,
}

impl IndexPage {
    pub fn from_input(input: &PageInput) -> Self {
        let questions = input
            .questions
            .iter()
            .enumerate()
            .map(|(i, q)| QuestionView {
                number: i + 1,
                key: format!("q{}", i),
                prompt: q.prompt.clone(),
                options: q
                    .options
                    .iter()
                    .enumerate()
                    .map(|(n, value)| OptionView {
                        index: n,
                        field: format!("q{}opt{}", i, n + 1),
                        label: format!("Option {}", n + 1),
                        value: value.clone(),
                        selected: n == q.correct_index,
                    })
                    .collect(),
            })
            .collect();

        Self {
            trainer_name: input.trainer.trainer_name.clone(),
            college_name: input.trainer.institution_name.clone(),
            test_title: input.test.title.clone(),
            count: input.test.question_count(),
            min_count: TestConfig::MIN_QUESTIONS,
            max_count: TestConfig::MAX_QUESTIONS,
            questions,
            result: None,
            error: None,
        }
    }
}

impl From<&SubmissionOutcome> for ResultView {
    fn from(outcome: &SubmissionOutcome) -> Self {
        let filing_warning = match &outcome.filing {
            FilingStatus::Filed => None,
            FilingStatus::Failed(msg) => Some(msg.clone()),
        };
        Self {
            view_url: outcome.view_url.clone(),
            qr_data_uri: outcome.qr_data_uri.clone(),
            filing_warning,
        }
    }
}

impl From<&SubmissionError> for ErrorView {
    fn from(err: &SubmissionError) -> Self {
        Self {
            message: err.to_string(),
            form_url: err.form_url().map(str::to_string),
        }
    }
}
