use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{error, web, App, HttpServer};

use crate::answer_registry::AnswerRegistry;
use crate::error::CheckError;
use crate::service::{check, pages};
use crate::traits::oracle::AnswerOracle;
use crate::validator::Validator;

// 注册全部路由
pub fn configure<O: AnswerOracle + 'static>(cfg: &mut web::ServiceConfig) {
    // 请求体解析失败时也返回统一的json格式
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        log::warn!("无法解析请求体: {err}");
        error::Error::from(CheckError::InvalidBody)
    });

    cfg.app_data(json_config)
        .route("/", web::get().to(pages::index))
        .route("/health", web::get().to(pages::health::<O>))
        .route("/check_answer", web::post().to(check::check_answer::<O>));
}

// 启动actix服务
pub async fn new_webserver<O>(
    addr: (String, u16),
    registry: AnswerRegistry,
    validator: Validator<O>,
) -> std::io::Result<()>
where
    O: AnswerOracle + Send + Sync + 'static,
{
    let registry = web::Data::new(registry);
    let validator = web::Data::new(validator);
    let server = HttpServer::new(move || {
        App::new()
            // 前端可能部署在其他域名下
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .app_data(registry.clone())
            .app_data(validator.clone())
            .configure(configure::<O>)
    })
    .bind(&addr)?
    .run();
    log::info!("HTTP服务启动成功，监听{}:{}", addr.0, addr.1);
    server.await
}
