//! 表单构建服务 - 业务能力层
//!
//! 只负责把题目数据转换为 Forms API 请求，不关心传输。
//!
//! 输出顺序固定：
//! 1. 两个必填简答题（姓名、班级与专业）
//! 2. 每道题一个必填单选题，按录入顺序，选项不打乱
//!
//! 每个 createItem 的 location.index 等于它在序列中的位置。

use tracing::debug;

use crate::api::{
    BatchUpdateFormRequest, ChoiceOption, ChoiceQuestion, ChoiceType, CreateFormRequest,
    CreateItemRequest, FormInfo, Item, Location, QuestionItem, QuestionKind, QuestionSpec,
    Request, TextQuestion,
};
use crate::models::{FormSubmission, Question};

/// 固定的前置信息题
pub const LEAD_IN_ITEMS: [(&str, Option<&str>); 2] = [
    ("Student Full Name", Some("Enter your full name as per Aadhar.")),
    ("Batch & Specialization", None),
];

/// 表单构建服务
pub struct FormBuilder;

impl FormBuilder {
    /// forms.create 请求：标题与文档标题相同
    pub fn create_form_request(submission: &FormSubmission) -> CreateFormRequest {
        let title = submission.form_title();
        CreateFormRequest {
            info: FormInfo {
                document_title: title.clone(),
                title,
            },
        }
    }

    /// 生成全部 createItem 请求
    pub fn item_requests(questions: &[Question]) -> Vec<Request> {
        let lead_in = LEAD_IN_ITEMS
            .iter()
            .map(|(title, description)| text_item(title, *description));
        let choices = questions.iter().map(choice_item);

        let requests: Vec<Request> = lead_in
            .chain(choices)
            .enumerate()
            .map(|(index, item)| {
                Request::CreateItem(CreateItemRequest {
                    item,
                    location: Location { index },
                })
            })
            .collect();

        // 正确答案不会写入表单
        debug!(
            "已构建 {} 个 createItem 请求，{} 道题的答案未提交",
            requests.len(),
            questions.len()
        );

        requests
    }

    /// forms.batchUpdate 请求体
    pub fn batch_update_request(submission: &FormSubmission) -> BatchUpdateFormRequest {
        BatchUpdateFormRequest {
            requests: Self::item_requests(submission.questions()),
        }
    }
}

fn text_item(title: &str, description: Option<&str>) -> Item {
    Item {
        title: title.to_string(),
        description: description.map(str::to_string),
        question_item: QuestionItem {
            question: QuestionSpec {
                required: true,
                kind: QuestionKind::TextQuestion(TextQuestion::default()),
            },
        },
    }
}

fn choice_item(question: &Question) -> Item {
    Item {
        title: question.prompt.clone(),
        description: None,
        question_item: QuestionItem {
            question: QuestionSpec {
                required: true,
                kind: QuestionKind::ChoiceQuestion(ChoiceQuestion {
                    choice_type: ChoiceType::Radio,
                    options: question
                        .options
                        .iter()
                        .map(|value| ChoiceOption { value: value.clone() })
                        .collect(),
                    shuffle: false,
                }),
            },
        },
    }
}
