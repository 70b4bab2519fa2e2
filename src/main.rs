use std::error::Error;

use crate::answer_registry::AnswerRegistry;
use crate::config::Config;
use crate::gemini_client::GeminiClient;
use crate::validator::{RetryPolicy, Validator};

mod answer_registry;
mod answer_webserver;
mod config;
mod error;
mod gemini_client;
mod utils;
mod validator;

mod service {
    pub mod check;
    pub mod pages;
}

mod structs {
    pub mod awl_type;
    pub mod check;
    pub mod gemini;
}

mod traits {
    pub mod oracle;
}

#[actix_web::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // 先读取.env，RUST_LOG和密钥都可以写在里面
    let loaded_env_file = config::load_env_file(".env");
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match loaded_env_file {
        Ok(true) => log::info!("已从.env读取环境变量"),
        Ok(false) => {}
        Err(e) => log::warn!("读取.env失败: {e}"),
    }

    let config = Config::load()?;
    let registry = match config.answers.clone() {
        Some(answers) => AnswerRegistry::new(answers),
        None => AnswerRegistry::default(),
    };
    log::info!("已载入{}道题目的答案", registry.len());

    let credentials = config.oracle.credentials();
    if credentials.is_empty() {
        log::warn!("WARNING: GEMINI_API_KEY is not set. Answer validation will be basic.");
    } else {
        log::info!("已配置{}个Gemini密钥，模型: {}", credentials.len(), config.oracle.model);
    }

    let client = GeminiClient::new(&config.oracle)?;
    let validator = Validator::new(client, credentials, RetryPolicy::from(&config.retry));

    answer_webserver::new_webserver(config.bind_address(), registry, validator).await?;
    Ok(())
}
