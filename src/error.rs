use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::structs::check::CheckResponse;

/// 题号不在答案表范围内
#[derive(Debug, Error)]
#[error("no such question: {0}")]
pub struct NoSuchQuestionError(pub i64);

/// 客户端提交内容有误，统一以400返回
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("Invalid request body")]
    InvalidBody,
    #[error("Invalid question number")]
    InvalidQuestionNumber,
    #[error("Incorrect answer for this question")]
    AnswerMismatch,
}

impl From<NoSuchQuestionError> for CheckError {
    fn from(_: NoSuchQuestionError) -> Self {
        CheckError::InvalidQuestionNumber
    }
}

impl ResponseError for CheckError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(CheckResponse::rejected(self.to_string()))
    }
}

/// 调用Gemini时可能出现的错误，全部由validator吸收
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("rate limited by oracle")]
    RateLimited,
    #[error("oracle returned HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("request to oracle failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("could not decode oracle response: {0}")]
    Decode(#[source] reqwest::Error),
    #[error("oracle response has no text (block reason: {block_reason:?})")]
    EmptyResponse { block_reason: Option<String> },
}

/// 启动时读取配置失败
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
    #[error("answer list must not be empty")]
    EmptyAnswers,
    #[error("retry.max_attempts must be at least 1")]
    ZeroAttempts,
}
