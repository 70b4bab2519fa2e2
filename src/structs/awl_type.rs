// 前端使用的题号，从1开始
pub type QuestionNumber = i64;
// Gemini API密钥
pub type ApiKey = String;
