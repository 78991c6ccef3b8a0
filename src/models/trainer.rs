//! 培训师与测试配置

use serde::{Deserialize, Serialize};

/// 培训师信息（不做校验，允许空字符串）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainerInfo {
    pub trainer_name: String,
    pub institution_name: String,
}

impl TrainerInfo {
    pub fn new(trainer_name: impl Into<String>, institution_name: impl Into<String>) -> Self {
        Self {
            trainer_name: trainer_name.into(),
            institution_name: institution_name.into(),
        }
    }
}

/// 测试配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestConfig {
    pub title: String,
    question_count: usize,
}

impl TestConfig {
    pub const MIN_QUESTIONS: usize = 1;
    pub const MAX_QUESTIONS: usize = 50;

    /// 创建测试配置，题目数量被限制在 [1, 50]
    pub fn new(title: impl Into<String>, question_count: usize) -> Self {
        Self {
            title: title.into(),
            question_count: Self::clamp_count(question_count),
        }
    }

    pub fn question_count(&self) -> usize {
        self.question_count
    }

    pub fn clamp_count(count: usize) -> usize {
        count.clamp(Self::MIN_QUESTIONS, Self::MAX_QUESTIONS)
    }
}

impl Default for TestConfig {
    fn default() -> Self {
        Self::new("", Self::MIN_QUESTIONS)
    }
}
