use crate::filter::FilterOperator;
use serde::{Deserialize, Serialize};

/// 过滤条件
///
/// One decoded `field::value::operator` unit. `field` is normalized to
/// leading-uppercase by the codec so lookups can stay case-insensitive.
/// `resolved_column` is stamped by the caller's field map before the clause
/// reaches the predicate compiler; it never travels on the wire.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterClause {
    pub field: String,
    pub operator: FilterOperator,
    pub value: Option<String>,
    #[serde(skip)]
    pub resolved_column: Option<String>,
}

impl FilterClause {
    pub fn new(field: impl Into<String>, operator: FilterOperator, value: impl Into<String>) -> Self {
        Self { field: field.into(), operator, value: Some(value.into()), resolved_column: None }
    }

    pub fn valueless(field: impl Into<String>, operator: FilterOperator) -> Self {
        Self { field: field.into(), operator, value: None, resolved_column: None }
    }

    pub fn matches(&self, field: &str, operator: &str) -> bool {
        if !self.field.eq_ignore_ascii_case(field) {
            return false;
        }
        operator.is_empty() || self.operator.is(operator)
    }
}

/// Decoded clause list with typed lookups.
///
/// Linear scans throughout: a request carries single-digit to low-tens of
/// clauses, so no index is worth building.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Clauses(pub Vec<FilterClause>);

impl Clauses {
    pub fn new(clauses: Vec<FilterClause>) -> Self {
        Clauses(clauses)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FilterClause> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, FilterClause> {
        self.0.iter_mut()
    }

    /// first clause matching field (and operator, when given)
    pub fn clause_of(&self, field: &str, operator: &str) -> Option<&FilterClause> {
        self.0.iter().find(|c| c.matches(field, operator))
    }

    /// all clauses matching field
    pub fn clauses_of(&self, field: &str) -> Vec<&FilterClause> {
        self.0.iter().filter(|c| c.matches(field, "")).collect()
    }

    /// raw value of the first matching clause
    pub fn value_of(&self, field: &str, operator: &str) -> Option<&str> {
        self.clause_of(field, operator).and_then(|c| c.value.as_deref())
    }

    /// typed value of the first matching clause
    /// 解析失败时返回类型缺省值，不抛错 — 调用方必须容忍缺省值
    pub fn typed<T>(&self, field: &str, operator: &str) -> T
    where
        T: std::str::FromStr + Default,
    {
        self.value_of(field, operator).and_then(|v| v.trim().parse::<T>().ok()).unwrap_or_default()
    }

    /// existence check with the same matching rule
    pub fn any(&self, field: &str, operator: &str) -> bool {
        self.clause_of(field, operator).is_some()
    }
}

impl From<Vec<FilterClause>> for Clauses {
    fn from(clauses: Vec<FilterClause>) -> Self {
        Clauses(clauses)
    }
}

impl IntoIterator for Clauses {
    type Item = FilterClause;
    type IntoIter = std::vec::IntoIter<FilterClause>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
