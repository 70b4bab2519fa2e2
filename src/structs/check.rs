use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::structs::awl_type::QuestionNumber;

// 前端提交答案的请求体
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CheckRequest {
    // 可能是数字也可能是字符串，交给question_number()解析
    #[serde(default)]
    pub(crate) question_number: Option<Value>,
    #[serde(default)]
    pub(crate) user_answer: String,
    #[serde(default)]
    pub(crate) correct_answer: Option<String>,
}

impl CheckRequest {
    /// 解析题号，接受整数和纯数字字符串，小数向零取整
    pub fn question_number(&self) -> Option<QuestionNumber> {
        match self.question_number.as_ref()? {
            Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                    .map(|f| f.trunc() as i64)
            }),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

#[derive(Serialize, Debug, PartialEq)]
pub struct CheckResponse {
    pub(crate) correct: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) error: Option<String>,
}

impl CheckResponse {
    pub fn verdict(correct: bool) -> Self {
        CheckResponse { correct, error: None }
    }

    pub fn rejected(error: impl Into<String>) -> Self {
        CheckResponse { correct: false, error: Some(error.into()) }
    }
}
