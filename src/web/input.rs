//! 表单字段解析
//!
//! 字段命名：
//! - `trainer_name`, `college_name`, `test_title`, `count`, `action`
//! - `q{i}` 题干，`q{i}opt1`..`q{i}opt4` 选项，`q{i}ans` 正确答案下标（从 0 开始）

use std::collections::HashMap;

use crate::models::question::OPTION_COUNT;
use crate::models::{FormSubmission, Question, TestConfig, TrainerInfo};

/// 解析题目数量，无法解析时取最小值（范围限制由 [`TestConfig`] 负责）
pub fn parse_count(raw: Option<&str>) -> usize {
    raw.and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(TestConfig::MIN_QUESTIONS)
}

/// 页面提交的动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// 仅重新渲染（题目数量或选项变化）
    Refresh,
    /// 生成表单
    Generate,
}

/// 一次页面提交的全部输入
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInput {
    pub trainer: TrainerInfo,
    pub test: TestConfig,
    pub questions: Vec<Question>,
    pub action: Action,
}

impl PageInput {
    /// 空白页面
    pub fn blank(count: usize) -> Self {
        let test = TestConfig::new("", count);
        Self {
            trainer: TrainerInfo::default(),
            questions: vec![Question::default(); test.question_count()],
            test,
            action: Action::Refresh,
        }
    }

    /// 从 urlencoded 字段解析
    ///
    /// 缺失的字段按空字符串处理；题目数量被限制在 [1, 50]，
    /// 每道题的正确答案下标会按当前选项重新校正。
    pub fn from_fields(fields: &[(String, String)]) -> Self {
        let map: HashMap<&str, &str> = fields
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        let text = |key: &str| map.get(key).copied().unwrap_or_default().to_string();

        let test = TestConfig::new(text("test_title"), parse_count(map.get("count").copied()));

        let questions = (0..test.question_count())
            .map(|i| {
                let options: [String; OPTION_COUNT] =
                    std::array::from_fn(|n| text(format!("q{}opt{}", i, n + 1).as_str()));
                let correct_index = map
                    .get(format!("q{}ans", i).as_str())
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                Question::new(text(format!("q{}", i).as_str()), options, correct_index)
            })
            .collect();

        let action = match map.get("action").copied() {
            Some("generate") => Action::Generate,
            _ => Action::Refresh,
        };

        Self {
            trainer: TrainerInfo::new(text("trainer_name"), text("college_name")),
            test,
            questions,
            action,
        }
    }

    /// 转换为只读提交数据
    pub fn to_submission(&self) -> FormSubmission {
        FormSubmission::new(self.trainer.clone(), self.test.clone(), self.questions.clone())
    }
}
