pub mod clause;
pub mod codec;

use serde::{Deserialize, Serialize};

/// 过滤操作符
///
/// The wire tokens are the lowercase forms (`eq`, `startswith`, ...).
/// Anything else decodes to `Unrecognized`, which the predicate compiler
/// skips without error — unknown operators are tolerated, not rejected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOperator {
    Eq,             // 等于
    Neq,            // 不等于
    Gt,             // 大于
    Gte,            // 大于等于
    Lt,             // 小于
    Lte,            // 小于等于
    StartsWith,     // 前缀匹配
    EndsWith,       // 后缀匹配
    Contains,       // 模糊匹配
    DoesNotContain, // 反向模糊匹配
    IsNull,         // 为空
    IsNotNull,      // 不为空
    IsEmpty,        // 空串
    IsNotEmpty,     // 非空串
    Exists,         // 在列表中
    Unrecognized(String),
}

impl FilterOperator {
    pub fn as_str(&self) -> &str {
        match self {
            FilterOperator::Eq => "eq",
            FilterOperator::Neq => "neq",
            FilterOperator::Gt => "gt",
            FilterOperator::Gte => "gte",
            FilterOperator::Lt => "lt",
            FilterOperator::Lte => "lte",
            FilterOperator::StartsWith => "startswith",
            FilterOperator::EndsWith => "endswith",
            FilterOperator::Contains => "contains",
            FilterOperator::DoesNotContain => "doesnotcontain",
            FilterOperator::IsNull => "isnull",
            FilterOperator::IsNotNull => "isnotnull",
            FilterOperator::IsEmpty => "isempty",
            FilterOperator::IsNotEmpty => "isnotempty",
            FilterOperator::Exists => "exists",
            FilterOperator::Unrecognized(s) => s.as_str(),
        }
    }

    /// parse never fails: unknown tokens become `Unrecognized`
    pub fn parse(s: &str) -> FilterOperator {
        match s.trim().to_lowercase().as_str() {
            "eq" => FilterOperator::Eq,
            "neq" => FilterOperator::Neq,
            "gt" => FilterOperator::Gt,
            "gte" => FilterOperator::Gte,
            "lt" => FilterOperator::Lt,
            "lte" => FilterOperator::Lte,
            "startswith" => FilterOperator::StartsWith,
            "endswith" => FilterOperator::EndsWith,
            "contains" => FilterOperator::Contains,
            "doesnotcontain" => FilterOperator::DoesNotContain,
            "isnull" => FilterOperator::IsNull,
            "isnotnull" => FilterOperator::IsNotNull,
            "isempty" => FilterOperator::IsEmpty,
            "isnotempty" => FilterOperator::IsNotEmpty,
            "exists" => FilterOperator::Exists,
            other => FilterOperator::Unrecognized(other.to_string()),
        }
    }

    /// operators that embed no value in the predicate (IS NULL and friends)
    pub fn is_valueless(&self) -> bool {
        matches!(
            self,
            FilterOperator::IsNull | FilterOperator::IsNotNull | FilterOperator::IsEmpty | FilterOperator::IsNotEmpty
        )
    }

    pub fn is(&self, token: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(token)
    }
}

impl Default for FilterOperator {
    fn default() -> Self {
        FilterOperator::Eq
    }
}

impl std::fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for FilterOperator {
    fn from(s: &str) -> Self {
        FilterOperator::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_wire_tokens() {
        for token in [
            "eq", "neq", "gt", "gte", "lt", "lte", "startswith", "endswith", "contains", "doesnotcontain", "isnull",
            "isnotnull", "isempty", "isnotempty", "exists",
        ] {
            let op = FilterOperator::parse(token);
            assert_eq!(op.as_str(), token);
            assert!(!matches!(op, FilterOperator::Unrecognized(_)));
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(FilterOperator::parse("StartsWith"), FilterOperator::StartsWith);
        assert_eq!(FilterOperator::parse(" GTE "), FilterOperator::Gte);
    }

    #[test]
    fn unknown_token_is_unrecognized() {
        let op = FilterOperator::parse("bogus");
        assert_eq!(op, FilterOperator::Unrecognized("bogus".to_string()));
        assert_eq!(op.as_str(), "bogus");
    }

    #[test]
    fn valueless_set() {
        assert!(FilterOperator::IsNull.is_valueless());
        assert!(FilterOperator::IsNotEmpty.is_valueless());
        assert!(!FilterOperator::Exists.is_valueless());
        assert!(!FilterOperator::Eq.is_valueless());
    }
}
