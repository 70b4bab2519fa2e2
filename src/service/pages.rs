use std::path::PathBuf;

use actix_files::NamedFile;
use actix_web::{web, Either, HttpResponse};
use serde_json::json;

use crate::answer_registry::AnswerRegistry;
use crate::traits::oracle::AnswerOracle;
use crate::utils::is_page_exist;
use crate::validator::Validator;

const INDEX_PAGE: &str = "templates/index.html";

// 有前端页面时返回页面，否则只返回状态
pub(crate) async fn index() -> actix_web::Result<Either<NamedFile, HttpResponse>> {
    if is_page_exist(INDEX_PAGE) {
        return Ok(Either::Left(NamedFile::open(PathBuf::from(INDEX_PAGE))?));
    }
    Ok(Either::Right(HttpResponse::Ok().json(json!({"status": "ok"}))))
}

pub(crate) async fn health<O: AnswerOracle + 'static>(
    registry: web::Data<AnswerRegistry>,
    validator: web::Data<Validator<O>>,
) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "questions": registry.len(),
        "oracle": validator.has_oracle()
    }))
}
