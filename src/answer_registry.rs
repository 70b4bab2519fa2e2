use crate::error::NoSuchQuestionError;
use crate::structs::awl_type::QuestionNumber;

// 与前端题目顺序保持一致
const DEFAULT_ANSWERS: [&str; 14] = [
    "TQRG",
    "Sunday",
    "Maggi",
    "Ottawa",
    "modi and putin",
    "Battery",
    "map",
    "future",
    "age",
    "cold",
    "needle",
    "hole",
    "stamp",
    "rubber band",
];

/// 只读答案表，启动时构建一次
#[derive(Debug, Clone)]
pub struct AnswerRegistry {
    answers: Vec<String>,
}

impl AnswerRegistry {
    pub fn new(answers: Vec<String>) -> AnswerRegistry {
        AnswerRegistry { answers }
    }

    /// 题号从1开始
    pub fn lookup(&self, question_number: QuestionNumber) -> Result<&str, NoSuchQuestionError> {
        question_number
            .checked_sub(1)
            .and_then(|index| usize::try_from(index).ok())
            .and_then(|index| self.answers.get(index))
            .map(String::as_str)
            .ok_or(NoSuchQuestionError(question_number))
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.answers.iter().map(String::as_str)
    }
}

impl Default for AnswerRegistry {
    fn default() -> Self {
        AnswerRegistry::new(DEFAULT_ANSWERS.iter().map(|a| a.to_string()).collect())
    }
}
