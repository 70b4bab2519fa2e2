use std::time::Duration;

use crate::config::RetryConfig;
use crate::error::OracleError;
use crate::structs::awl_type::ApiKey;
use crate::traits::oracle::AnswerOracle;
use crate::utils::is_same_answer;

/// 调用外部判定服务时的重试策略
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// 最多尝试几轮，每轮按顺序把所有密钥都试一遍
    pub max_attempts: u32,
    pub retry_delay: Duration,
    /// 被限流后的等待时间，同样消耗一轮
    pub rate_limit_cooldown: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        RetryPolicy {
            max_attempts: config.max_attempts,
            retry_delay: Duration::from_secs(config.retry_delay_secs),
            rate_limit_cooldown: Duration::from_secs(config.rate_limit_cooldown_secs),
        }
    }
}

/// 答案校验：先做精确匹配，不一致时再询问外部服务
pub struct Validator<O> {
    oracle: O,
    credentials: Vec<ApiKey>,
    policy: RetryPolicy,
}

impl<O: AnswerOracle> Validator<O> {
    pub fn new(oracle: O, credentials: Vec<ApiKey>, policy: RetryPolicy) -> Validator<O> {
        Validator { oracle, credentials, policy }
    }

    pub fn has_oracle(&self) -> bool {
        !self.credentials.is_empty()
    }

    pub async fn validate(&self, canonical: &str, submitted: &str) -> bool {
        let exact = is_same_answer(canonical, submitted);
        if exact || !self.has_oracle() {
            return exact;
        }

        match self.consult(&build_prompt(canonical, submitted)).await {
            Some(verdict) => verdict,
            None => {
                log::warn!("所有Gemini请求均失败，退回精确匹配");
                exact
            }
        }
    }

    // 返回None表示没有拿到可用的回答
    async fn consult(&self, prompt: &str) -> Option<bool> {
        let max_attempts = self.policy.max_attempts.max(1);
        for attempt in 1..=max_attempts {
            let mut rate_limited = false;
            for (index, key) in self.credentials.iter().enumerate() {
                match self.oracle.ask(key, prompt).await {
                    Ok(text) => {
                        log::debug!("Gemini回复: {:?}", text.trim());
                        return Some(is_affirmative(&text));
                    }
                    Err(OracleError::RateLimited) => {
                        rate_limited = true;
                        log::warn!("密钥#{} 被限流 (attempt {attempt}/{max_attempts})", index + 1);
                    }
                    Err(e) => {
                        log::warn!("密钥#{} 请求失败 (attempt {attempt}/{max_attempts}): {e}", index + 1);
                    }
                }
            }

            if attempt < max_attempts {
                let wait = if rate_limited {
                    self.policy.rate_limit_cooldown
                } else {
                    self.policy.retry_delay
                };
                if rate_limited {
                    log::warn!("Rate limit reached. Waiting {} seconds.", wait.as_secs());
                }
                tokio::time::sleep(wait).await;
            }
        }
        None
    }
}

// 回复以yes开头即视为正确
pub fn is_affirmative(reply: &str) -> bool {
    reply.trim().to_lowercase().starts_with("yes")
}

pub fn build_prompt(canonical: &str, submitted: &str) -> String {
    format!(
        r#"You are an answer validator for a treasure hunt. Compare the correct answer with the user's answer.
Decide whether the user's answer is essentially correct. Accept:
- slight spelling variations
- plural or singular forms
- minor grammatical differences
- close semantic matches

Respond with exactly one word: YES or NO.

Correct Answer: "{canonical}"
User Answer: "{submitted}"
"#
    )
}
