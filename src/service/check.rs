use actix_web::{web, HttpResponse};

use crate::answer_registry::AnswerRegistry;
use crate::error::CheckError;
use crate::structs::check::{CheckRequest, CheckResponse};
use crate::traits::oracle::AnswerOracle;
use crate::utils::is_same_answer;
use crate::validator::Validator;

// 校验玩家提交的答案
pub(crate) async fn check_answer<O: AnswerOracle + 'static>(
    req_body: web::Json<CheckRequest>,
    registry: web::Data<AnswerRegistry>,
    validator: web::Data<Validator<O>>,
) -> Result<HttpResponse, CheckError> {
    let question_number = req_body.question_number().ok_or(CheckError::InvalidQuestionNumber)?;
    let expected = registry.lookup(question_number)?;

    // 前端带来的答案必须与答案表一致，防止页面过期或被篡改
    if let Some(claimed) = &req_body.correct_answer {
        if !is_same_answer(claimed, expected) {
            log::warn!("第{question_number}题的correctAnswer与答案表不一致");
            return Err(CheckError::AnswerMismatch);
        }
    }

    let correct = validator.validate(expected, &req_body.user_answer).await;
    log::info!("第{question_number}题校验结果: {correct}");
    Ok(HttpResponse::Ok().json(CheckResponse::verdict(correct)))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use serde_json::{json, Value};

    use crate::answer_registry::AnswerRegistry;
    use crate::answer_webserver::configure;
    use crate::traits::oracle::testing::FixedOracle;
    use crate::validator::{RetryPolicy, Validator};

    fn validator(oracle: FixedOracle, keys: &[&str]) -> web::Data<Validator<FixedOracle>> {
        let keys = keys.iter().map(|k| k.to_string()).collect();
        web::Data::new(Validator::new(oracle, keys, RetryPolicy::default()))
    }

    async fn post(
        oracle: FixedOracle,
        keys: &[&str],
        body: Value,
    ) -> (StatusCode, Value) {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AnswerRegistry::default()))
                .app_data(validator(oracle, keys))
                .configure(configure::<FixedOracle>),
        )
        .await;
        let req = test::TestRequest::post().uri("/check_answer").set_json(body).to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        (status, test::read_body_json(resp).await)
    }

    #[actix_web::test]
    async fn canonical_answers_pass_without_oracle() {
        let registry = AnswerRegistry::default();
        for (index, answer) in registry.iter().enumerate() {
            let submitted = format!("  {}\t", answer.to_uppercase());
            let (status, body) = post(
                FixedOracle::new("NO"),
                &[],
                json!({"questionNumber": index + 1, "userAnswer": submitted}),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, json!({"correct": true}));
        }
    }

    #[actix_web::test]
    async fn wrong_answer_without_oracle_is_incorrect() {
        let (status, body) =
            post(FixedOracle::new("YES"), &[], json!({"questionNumber": 4, "userAnswer": "Toronto"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"correct": false}));
    }

    #[actix_web::test]
    async fn oracle_decides_near_misses() {
        let oracle = FixedOracle::new("YES");
        let (status, body) = post(
            oracle.clone(),
            &["key"],
            json!({"questionNumber": "14", "userAnswer": "rubber bands"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"correct": true}));
        assert_eq!(oracle.call_count(), 1);
    }

    #[actix_web::test]
    async fn invalid_question_numbers_are_rejected() {
        for number in [json!(0), json!(-1), json!(15), json!("abc"), json!(null), json!(0.5), json!("2.5")] {
            let oracle = FixedOracle::new("YES");
            let (status, body) = post(
                oracle.clone(),
                &["key"],
                json!({"questionNumber": number, "userAnswer": "TQRG"}),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "questionNumber {number}");
            assert_eq!(body, json!({"correct": false, "error": "Invalid question number"}));
            assert_eq!(oracle.call_count(), 0);
        }

        let (status, _) = post(FixedOracle::new("YES"), &[], json!({"userAnswer": "TQRG"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn fractional_question_number_is_truncated() {
        let (status, body) = post(
            FixedOracle::new("NO"),
            &[],
            json!({"questionNumber": 2.7, "userAnswer": "sunday"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"correct": true}));
    }

    #[actix_web::test]
    async fn mismatching_correct_answer_skips_validation() {
        let oracle = FixedOracle::new("YES");
        let (status, body) = post(
            oracle.clone(),
            &["key"],
            json!({"questionNumber": 4, "userAnswer": "Toronto", "correctAnswer": "Toronto"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"correct": false, "error": "Incorrect answer for this question"}));
        assert_eq!(oracle.call_count(), 0);
    }

    #[actix_web::test]
    async fn matching_correct_answer_is_accepted_in_any_case() {
        let (status, body) = post(
            FixedOracle::new("NO"),
            &[],
            json!({"questionNumber": 1, "userAnswer": "tqrg", "correctAnswer": " tqrg "}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"correct": true}));
    }

    #[actix_web::test]
    async fn malformed_body_is_rejected() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AnswerRegistry::default()))
                .app_data(validator(FixedOracle::new("YES"), &[]))
                .configure(configure::<FixedOracle>),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/check_answer")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"correct": false, "error": "Invalid request body"}));
    }
}
