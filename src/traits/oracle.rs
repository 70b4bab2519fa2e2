use std::future::Future;

use crate::error::OracleError;

/// 外部语义判定服务，输入提示词，返回模型给出的原始文本
pub trait AnswerOracle {
    fn ask(&self, api_key: &str, prompt: &str) -> impl Future<Output = Result<String, OracleError>> + Send;
}

#[cfg(test)]
pub mod testing {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::AnswerOracle;
    use crate::error::OracleError;

    /// 始终返回同一个回复，并统计调用次数
    #[derive(Clone)]
    pub struct FixedOracle {
        reply: String,
        pub calls: Arc<AtomicUsize>,
    }

    impl FixedOracle {
        pub fn new(reply: &str) -> FixedOracle {
            FixedOracle { reply: reply.to_string(), calls: Arc::new(AtomicUsize::new(0)) }
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl AnswerOracle for FixedOracle {
        async fn ask(&self, _api_key: &str, _prompt: &str) -> Result<String, OracleError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.reply.clone())
        }
    }
}
