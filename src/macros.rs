/// 快速创建 String 对象的宏
///
/// # 示例
/// ```
/// use sift::s;
/// let text = s!("hello world");
/// // 等价于 String::from("hello world")
/// ```
#[macro_export]
macro_rules! s {
    ($s:expr) => {
        String::from($s)
    };
}

/// 将表达式转换为可选字符串 (to optional string)
///
/// # 示例
/// ```
/// use sift::tos;
/// let opt_str = tos!(42);
/// // 返回 Some("42".to_string())
/// ```
#[macro_export]
macro_rules! tos {
    ($e:expr) => {
        Some($e.to_string())
    };
}
