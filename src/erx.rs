/// Layouted: 预设好的一些Layout快速方法
/// ResultE<T> = Result<T, Erx>;
/// ResultEX = ResultE<()>;
/// fn smp<T: ToString>(error: T) -> Erx
/// fn amp<T: ToString>(additional: &str) -> impl Fn(T) -> Erx
use crate::conf;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::Display;

lazy_static! {
    static ref APP_SHORT: String = conf::setup().read().expect("failed read setup object").short.clone();
}

/// Zero
pub static LAYOUTED_C_ZERO: &'static str = "0000";

/// ResultE<T> = Result<T, Erx>;
pub type ResultE<T> = Result<T, Erx>;

/// ResultEX = ResultE<()>;
pub type ResultEX = ResultE<()>;

/// Layouted: Some predefined Layouted methods
pub struct Layouted;

pub fn describe_error(e: &dyn std::error::Error) -> String {
    let mut description = e.to_string();
    let mut current = e.source();
    while let Some(source) = current {
        description.push_str(&format!("\nCaused by: {}", source));
        current = source.source();
    }
    description
}

/// emp: error message processor - 将标准错误类型转换为Erx错误类型
/// 保留完整的错误链描述，存放在extra的"ORIGIN"键中
pub fn emp<T: std::error::Error>(error: T) -> Erx {
    let extra = vec![(String::from("ORIGIN"), describe_error(&error))];
    let message = error.to_string();
    Erx { code: Default::default(), message, extra }
}

/// smp: simple convert T: ToString to Erx
pub fn smp<T: ToString>(error: T) -> Erx {
    Erx { code: Default::default(), message: error.to_string(), extra: Vec::new() }
}

/// amp: return a function that convert T: ToString to Erx
/// 生成的错误消息格式为: "{additional} : {原始错误消息}"
pub fn amp<T: ToString>(additional: &str) -> impl Fn(T) -> Erx {
    let additional = additional.to_string();
    move |err: T| Erx { code: Default::default(), message: format!("{} : {}", additional, err.to_string()), extra: Vec::new() }
}

/// Predefined Layouted Code with length 4
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum PreL4 {
    /// Common: 通用错误
    COMM,
    /// Conf: 配置错误
    CONF,
    /// Filter: 过滤表达式错误
    FILT,
    /// Query: 查询构建错误
    QURY,
    /// Mapping: 字段映射错误
    MAPG,
    /// Model: 模型错误
    MODE,
    /// Undefined: 未定义错误
    UNDF,
    ///
    OTHE,
}

impl PreL4 {
    pub fn four(&self) -> &'static str {
        match self {
            PreL4::COMM => "COMM",
            PreL4::CONF => "CONF",
            PreL4::FILT => "FILT",
            PreL4::QURY => "QURY",
            PreL4::MAPG => "MAPG",
            PreL4::MODE => "MODE",
            PreL4::UNDF => "UNDF",
            PreL4::OTHE => "OTHE",
        }
    }

    pub fn from_str(s: &str) -> Option<PreL4> {
        match s.to_uppercase().as_str() {
            "COMM" => Some(PreL4::COMM),
            "CONF" => Some(PreL4::CONF),
            "FILT" => Some(PreL4::FILT),
            "QURY" => Some(PreL4::QURY),
            "MAPG" => Some(PreL4::MAPG),
            "MODE" => Some(PreL4::MODE),
            "UNDF" => Some(PreL4::UNDF),
            "OTHE" => Some(PreL4::OTHE),
            _ => None,
        }
    }

    pub fn layoutc(&self, category: &str, detail: &str) -> LayoutedC {
        LayoutedC::new(self.four(), category, detail)
    }
}

impl Display for PreL4 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.four())
    }
}

impl From<&str> for PreL4 {
    fn from(s: &str) -> Self {
        PreL4::from_str(s).unwrap_or(PreL4::OTHE)
    }
}

impl From<PreL4> for String {
    fn from(value: PreL4) -> Self {
        value.four().to_string()
    }
}

impl Layouted {
    /// common: 通用错误
    pub fn common(category: &str, detail: &str) -> LayoutedC {
        LayoutedC::new(PreL4::COMM.four(), category, detail)
    }

    /// conf: 配置错误
    pub fn conf(category: &str, detail: &str) -> LayoutedC {
        LayoutedC::new(PreL4::CONF.four(), category, detail)
    }

    /// filter: 过滤表达式错误
    pub fn filter(category: &str, detail: &str) -> LayoutedC {
        LayoutedC::new(PreL4::FILT.four(), category, detail)
    }

    /// query: 查询构建错误
    pub fn query(category: &str, detail: &str) -> LayoutedC {
        LayoutedC::new(PreL4::QURY.four(), category, detail)
    }

    /// mapping: 字段映射错误
    pub fn mapping(category: &str, detail: &str) -> LayoutedC {
        LayoutedC::new(PreL4::MAPG.four(), category, detail)
    }

    /// model: 模型错误
    pub fn model(category: &str, detail: &str) -> LayoutedC {
        LayoutedC::new(PreL4::MODE.four(), category, detail)
    }
}

/// Code code format
/// aaaa-xxxx-yyyy-zzzz
///
///    aaaa : 应用标示，建议4位长度
///    xxxx : 单词字母，建议4位长度，用于区分大类（功能域）
///    yyyy : 字母或者数字，建议4位长度，用于区分子类
///    zzzz : 字母或者数字，建议4位长度，具体错误
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LayoutedC {
    pub application: String,
    pub domain: String,
    pub category: String,
    pub detail: String,
}

impl LayoutedC {
    pub fn okay() -> LayoutedC {
        LayoutedC {
            application: APP_SHORT.clone(),
            domain: LAYOUTED_C_ZERO.into(),
            category: LAYOUTED_C_ZERO.into(),
            detail: LAYOUTED_C_ZERO.into(),
        }
    }

    pub fn new(domain: &str, category: &str, detail: &str) -> LayoutedC {
        LayoutedC { application: APP_SHORT.clone(), domain: domain.into(), category: category.into(), detail: detail.into() }
    }

    pub fn is_okc(&self) -> bool {
        self.domain.replace("0", "").len() == 0 && self.category.replace("0", "").len() == 0 && self.detail.replace("0", "").len() == 0
    }

    pub fn layout_string(&self) -> String {
        format!("{}-{}-{}-{}", self.application, self.domain, self.category, self.detail)
    }
}

impl Default for LayoutedC {
    fn default() -> Self {
        LayoutedC { application: APP_SHORT.clone(), domain: PreL4::UNDF.into(), category: PreL4::UNDF.into(), detail: PreL4::UNDF.into() }
    }
}

impl From<LayoutedC> for String {
    fn from(value: LayoutedC) -> Self {
        value.layout_string()
    }
}

impl From<LayoutedC> for bool {
    fn from(value: LayoutedC) -> Self {
        value.is_okc()
    }
}

impl From<String> for LayoutedC {
    fn from(value: String) -> Self {
        let mut c = LayoutedC::default();
        let parts: Vec<&str> = value.split("-").collect();
        if let Some(application) = parts.get(0) {
            c.application = application.to_string();
        }
        if let Some(domain) = parts.get(1) {
            c.domain = domain.to_string();
        }
        if let Some(category) = parts.get(2) {
            c.category = category.to_string();
        }
        if let Some(detail) = parts.get(3) {
            c.detail = detail.to_string();
        }
        c
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Erx {
    code: LayoutedC,
    message: String,
    extra: Vec<(String, String)>,
}

impl Erx {
    pub fn new(message: &str) -> Erx {
        Erx { code: Default::default(), message: message.to_string(), extra: Vec::new() }
    }

    pub fn layouted(code: LayoutedC, message: &str) -> Erx {
        Erx { code, message: message.to_string(), extra: Vec::new() }
    }

    pub fn code(&self) -> LayoutedC {
        self.code.clone()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn description(&self) -> String {
        let mut description = self.code.layout_string();
        description.push_str(" ");
        description.push_str(&self.message);
        if self.extra.is_empty() {
            return description;
        }

        description.push_str(" { ");
        self.extra.iter().for_each(|x| {
            description.push_str(&format!("{}={} ,", x.0, x.1));
        });
        description.remove(description.len() - 1);
        description.push_str(" }");

        description
    }

    /// get extra
    pub fn extra(&self) -> &Vec<(String, String)> {
        &self.extra
    }

    /// add extra
    /// if key exists, replace value
    pub fn add_extra(&mut self, key: &str, value: &str) -> &mut Self {
        for (k, v) in self.extra.iter_mut() {
            if *k == key {
                *v = value.to_string();
                return self;
            }
        }

        self.extra.push((key.to_string(), value.to_string()));
        self
    }
}

impl Display for Erx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", serde_json::to_string(&self).unwrap_or_default())
    }
}

impl Default for Erx {
    fn default() -> Self {
        Erx { code: Default::default(), message: Default::default(), extra: Default::default() }
    }
}

impl From<Infallible> for Erx {
    fn from(_: Infallible) -> Self {
        Erx::default()
    }
}

impl From<&str> for Erx {
    fn from(s: &str) -> Self {
        s.to_string().into()
    }
}

impl From<String> for Erx {
    fn from(str: String) -> Erx {
        if str.is_empty() {
            return Erx::default();
        }

        serde_json::from_str(&str).unwrap_or_else(|_| Erx::new(&str))
    }
}

impl From<(&str, &str)> for Erx {
    fn from((code, message): (&str, &str)) -> Self {
        let code: LayoutedC = code.to_string().into();
        Erx { code, message: message.to_string(), extra: Default::default() }
    }
}
