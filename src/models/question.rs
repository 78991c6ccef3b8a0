//! 选择题模型
//!
//! 正确答案按选项下标记录，而不是按选项文本。
//! 选项被修改后，通过 [`Question::revalidate`] 重新校正下标。

use serde::{Deserialize, Serialize};

/// 每道题固定的选项数量
pub const OPTION_COUNT: usize = 4;

/// 单选题
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// 题干
    pub prompt: String,
    /// 四个选项，顺序即展示顺序
    pub options: [String; OPTION_COUNT],
    /// 正确答案在 options 中的下标
    pub correct_index: usize,
}

impl Question {
    /// 创建题目，并立即校正正确答案下标
    pub fn new(prompt: impl Into<String>, options: [String; OPTION_COUNT], correct_index: usize) -> Self {
        let mut question = Self {
            prompt: prompt.into(),
            options,
            correct_index,
        };
        question.revalidate();
        question
    }

    /// 当前正确答案的文本
    pub fn correct_answer(&self) -> &str {
        self.options
            .get(self.correct_index)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// 校正正确答案下标
    ///
    /// 下标越界，或指向空选项而其他选项非空时，重置为第一个非空选项；
    /// 全部为空时重置为 0。返回下标是否被修改。
    pub fn revalidate(&mut self) -> bool {
        let points_at_text = self
            .options
            .get(self.correct_index)
            .is_some_and(|opt| !opt.trim().is_empty());
        if points_at_text {
            return false;
        }

        let fallback = self
            .options
            .iter()
            .position(|opt| !opt.trim().is_empty())
            .unwrap_or(0);

        if fallback == self.correct_index {
            return false;
        }
        self.correct_index = fallback;
        true
    }
}
