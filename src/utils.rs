use std::path::Path;

// 去掉首尾空白并转为小写
pub fn normalize(answer: &str) -> String {
    answer.trim().to_lowercase()
}

pub fn is_same_answer(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

// 检测前端页面是否存在
pub fn is_page_exist(file_path: &str) -> bool {
    Path::new(file_path).is_file()
}
