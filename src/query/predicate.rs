use crate::filter::clause::{Clauses, FilterClause};
use crate::filter::FilterOperator;
use crate::query::mapping::{FieldDef, FieldMap, FieldType};
use chrono::NaiveDateTime;
use std::collections::HashMap;

/// LIKE 模式
pub struct Like {
    val: String,
}

impl Like {
    pub fn new(val: impl Into<String>) -> Self {
        Self { val: val.into() }
    }

    /// %v%
    pub fn full(&self) -> String {
        format!("%{}%", self.val)
    }

    /// v%
    pub fn prefix(&self) -> String {
        format!("{}%", self.val)
    }

    /// %v
    pub fn suffix(&self) -> String {
        format!("%{}", self.val)
    }
}

/// A typed bound value. The declared `FieldType` picks the conversion;
/// any conversion failure falls back to binding the raw text.
#[derive(Clone, Debug, PartialEq)]
pub enum Bind {
    Text(String),
    Bool(bool),
    /// integral values keep i64 width; going through f64 would corrupt
    /// 64-bit keys above 2^53
    Int(i64),
    Num(f64),
    DateTime(NaiveDateTime),
}

/// One compiled WHERE fragment with its named binds.
/// Placeholders are `:name` with `name = {field}__{index}`.
#[derive(Clone, Debug)]
pub struct Predicate {
    pub sql: String,
    pub binds: Vec<(String, Bind)>,
}

/// Parameterized predicate compiler.
///
/// One clause in, at most one WHERE fragment out. Values never reach the
/// SQL text: every value travels as a named bind. `Unrecognized` operators
/// compile to nothing, by design, so callers must not assume every clause
/// contributes a condition.
#[derive(Debug, Default)]
pub struct SqlBuilder {
    predicates: Vec<Predicate>,
    counters: HashMap<String, usize>,
}

const DATETIME_LAYOUTS: [&'static str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    for layout in DATETIME_LAYOUTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, layout) {
            return Some(dt);
        }
    }
    value.parse::<chrono::NaiveDate>().ok().and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// 宽松布尔解析: "true"/"1" → true, 其余 → false
fn parse_bool(value: &str) -> bool {
    let v = value.trim();
    v.eq_ignore_ascii_case("true") || v == "1"
}

fn typed_bind(value: &str, ty: FieldType) -> Bind {
    match ty {
        FieldType::Text | FieldType::Other => Bind::Text(value.to_string()),
        FieldType::Boolean => Bind::Bool(parse_bool(value)),
        FieldType::Numeric => {
            let v = value.trim();
            if let Ok(n) = v.parse::<i64>() {
                Bind::Int(n)
            } else if let Ok(n) = v.parse::<f64>() {
                Bind::Num(n)
            } else {
                Bind::Text(value.to_string())
            }
        },
        FieldType::DateTime => match parse_datetime(value) {
            Some(dt) => Bind::DateTime(dt),
            None => Bind::Text(value.to_string()),
        },
    }
}

impl SqlBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn predicates(&self) -> &Vec<Predicate> {
        &self.predicates
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// all binds of all fragments, in emission order
    pub fn binds(&self) -> Vec<(String, Bind)> {
        self.predicates.iter().flat_map(|p| p.binds.clone()).collect()
    }

    /// fragments joined with AND, `:name` placeholder form
    pub fn where_sql(&self) -> String {
        self.predicates.iter().map(|p| p.sql.clone()).collect::<Vec<String>>().join(" AND ")
    }

    /// Resolve and compile a whole clause list against one field map.
    /// Unmapped fields are skipped quietly, same as unknown operators.
    pub fn apply(&mut self, clauses: &mut Clauses, map: &FieldMap) -> &mut Self {
        for clause in clauses.iter_mut() {
            let def = match map.resolve(clause) {
                Some(def) => def.clone(),
                None => continue,
            };
            self.compile(clause, &def);
        }
        self
    }

    /// Compile one clause (its `resolved_column` must already be stamped).
    ///
    /// Returns whether a bound parameter was emitted: `false` for the
    /// null/empty checks, which embed no value, and for operators that
    /// compile to nothing.
    pub fn compile(&mut self, clause: &mut FilterClause, def: &FieldDef) -> bool {
        let col = clause.resolved_column.clone().expect("resolved_column must be set before predicate compilation");
        let col = col.as_str();
        let operator = clause.operator.clone();

        // the four null/empty checks bind nothing
        match operator {
            FilterOperator::IsNull => {
                self.push_plain(format!("{} IS NULL", col));
                return false;
            },
            FilterOperator::IsNotNull => {
                self.push_plain(format!("{} IS NOT NULL", col));
                return false;
            },
            FilterOperator::IsEmpty => {
                self.push_plain(format!("{} LIKE N''", col));
                return false;
            },
            FilterOperator::IsNotEmpty => {
                self.push_plain(format!("{} NOT LIKE N''", col));
                return false;
            },
            FilterOperator::Unrecognized(_) => {
                // tolerated, contributes nothing
                return false;
            },
            _ => {},
        }

        let raw = clause.value.clone().unwrap_or_default();
        let name = self.next_name(&clause.field);

        match operator {
            FilterOperator::Eq => {
                if def.ty == FieldType::Boolean && def.nullable && !parse_bool(&raw) {
                    // absent rows count as false
                    self.push(format!("({} IS NULL OR {} = :{})", col, col, name), name, typed_bind(&raw, def.ty));
                } else if def.ty == FieldType::Text {
                    self.push(format!("{} LIKE :{}", col, name), name, typed_bind(&raw, def.ty));
                } else {
                    self.push(format!("{} = :{}", col, name), name, typed_bind(&raw, def.ty));
                }
            },
            FilterOperator::Neq => {
                if def.ty == FieldType::Boolean && def.nullable && !parse_bool(&raw) {
                    self.push(format!("({} IS NOT NULL AND {} <> :{})", col, col, name), name, typed_bind(&raw, def.ty));
                } else if def.ty == FieldType::Text {
                    self.push(format!("{} NOT LIKE :{}", col, name), name, typed_bind(&raw, def.ty));
                } else {
                    self.push(format!("{} <> :{}", col, name), name, typed_bind(&raw, def.ty));
                }
            },
            FilterOperator::StartsWith => {
                clause.value = Some(Like::new(raw).prefix());
                let v = clause.value.clone().unwrap_or_default();
                self.push(format!("{} LIKE :{}", col, name), name, Bind::Text(v));
            },
            FilterOperator::EndsWith => {
                clause.value = Some(Like::new(raw).suffix());
                let v = clause.value.clone().unwrap_or_default();
                self.push(format!("{} LIKE :{}", col, name), name, Bind::Text(v));
            },
            FilterOperator::Contains => {
                clause.value = Some(Like::new(raw).full());
                let v = clause.value.clone().unwrap_or_default();
                self.push(format!("{} LIKE :{}", col, name), name, Bind::Text(v));
            },
            FilterOperator::DoesNotContain => {
                clause.value = Some(Like::new(raw).full());
                let v = clause.value.clone().unwrap_or_default();
                self.push(format!("{} NOT LIKE :{}", col, name), name, Bind::Text(v));
            },
            FilterOperator::Gt => {
                self.push(format!("{} > :{}", col, name), name, typed_bind(&raw, def.ty));
            },
            FilterOperator::Gte => {
                self.push(format!("{} >= :{}", col, name), name, typed_bind(&raw, def.ty));
            },
            FilterOperator::Lt => {
                self.push(format!("{} < :{}", col, name), name, typed_bind(&raw, def.ty));
            },
            FilterOperator::Lte => {
                // 日期上界取当天最后一毫秒（闭区间语义）
                if def.ty == FieldType::DateTime {
                    if let Some(snapped) = parse_datetime(&raw).and_then(end_of_day) {
                        clause.value = Some(snapped.format("%Y-%m-%dT%H:%M:%S%.3f").to_string());
                        self.push(format!("{} <= :{}", col, name), name, Bind::DateTime(snapped));
                        return true;
                    }
                }
                self.push(format!("{} <= :{}", col, name), name, typed_bind(&raw, def.ty));
            },
            FilterOperator::Exists => {
                // value is a `,`-delimited list; each item binds on its own
                let items: Vec<&str> = raw.split(',').map(|s| s.trim()).filter(|s| !s.is_empty()).collect();
                if items.is_empty() {
                    return false;
                }
                let mut binds: Vec<(String, Bind)> = Vec::with_capacity(items.len());
                let mut holes: Vec<String> = Vec::with_capacity(items.len());
                for (j, item) in items.iter().enumerate() {
                    let item_name = format!("{}_{}", name, j);
                    holes.push(format!(":{}", item_name));
                    binds.push((item_name, typed_bind(item, def.ty)));
                }
                self.predicates.push(Predicate { sql: format!("{} IN ({})", col, holes.join(", ")), binds });
            },
            // returned above; spelled out so a new operator fails to compile
            // here instead of panicking at runtime
            FilterOperator::IsNull
            | FilterOperator::IsNotNull
            | FilterOperator::IsEmpty
            | FilterOperator::IsNotEmpty
            | FilterOperator::Unrecognized(_) => unreachable!(),
        }

        true
    }

    /// parameter names are `{field}__{index}` so clauses targeting the same
    /// field (e.g. two range bounds) coexist in one query
    fn next_name(&mut self, field: &str) -> String {
        let counter = self.counters.entry(field.to_string()).or_insert(0);
        let name = format!("{}__{}", field, *counter);
        *counter += 1;
        name
    }

    fn push_plain(&mut self, sql: String) {
        self.predicates.push(Predicate { sql, binds: Vec::new() });
    }

    fn push(&mut self, sql: String, name: String, bind: Bind) {
        self.predicates.push(Predicate { sql, binds: vec![(name, bind)] });
    }
}

fn end_of_day(dt: NaiveDateTime) -> Option<NaiveDateTime> {
    dt.date().and_hms_milli_opt(23, 59, 59, 999)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_def(column: &str) -> FieldDef {
        FieldDef { column: column.to_string(), ty: FieldType::Text, nullable: false }
    }

    fn clause(field: &str, op: FilterOperator, value: &str, column: &str) -> FilterClause {
        let mut c = FilterClause::new(field, op, value);
        c.resolved_column = Some(column.to_string());
        c
    }

    #[test]
    fn contains_rewrites_to_full_wildcard() {
        let mut b = SqlBuilder::new();
        let mut c = clause("Name", FilterOperator::Contains, "abc", "name");
        assert!(b.compile(&mut c, &text_def("name")));
        assert_eq!(b.where_sql(), "name LIKE :Name__0");
        assert_eq!(c.value.as_deref(), Some("%abc%"));
        assert_eq!(b.binds(), vec![("Name__0".to_string(), Bind::Text("%abc%".to_string()))]);
    }

    #[test]
    fn startswith_and_endswith_patterns() {
        let mut b = SqlBuilder::new();
        let mut c = clause("Name", FilterOperator::StartsWith, "abc", "name");
        b.compile(&mut c, &text_def("name"));
        assert_eq!(c.value.as_deref(), Some("abc%"));

        let mut c = clause("Name", FilterOperator::EndsWith, "abc", "name");
        b.compile(&mut c, &text_def("name"));
        assert_eq!(c.value.as_deref(), Some("%abc"));

        let mut c = clause("Name", FilterOperator::DoesNotContain, "abc", "name");
        b.compile(&mut c, &text_def("name"));
        assert_eq!(b.predicates()[2].sql, "name NOT LIKE :Name__2");
    }

    #[test]
    fn eq_on_text_compiles_to_like() {
        let mut b = SqlBuilder::new();
        let mut c = clause("Category", FilterOperator::Eq, "shoes", "category");
        b.compile(&mut c, &text_def("category"));
        assert_eq!(b.where_sql(), "category LIKE :Category__0");
        // no wildcard rewrite for plain eq
        assert_eq!(c.value.as_deref(), Some("shoes"));
    }

    #[test]
    fn eq_nullable_boolean_false_is_null_aware() {
        let def = FieldDef { column: "visible".to_string(), ty: FieldType::Boolean, nullable: true };
        let mut b = SqlBuilder::new();
        let mut c = clause("Visible", FilterOperator::Eq, "false", "visible");
        b.compile(&mut c, &def);
        assert_eq!(b.where_sql(), "(visible IS NULL OR visible = :Visible__0)");
        assert_eq!(b.binds()[0].1, Bind::Bool(false));
    }

    #[test]
    fn eq_nullable_boolean_true_is_plain() {
        let def = FieldDef { column: "visible".to_string(), ty: FieldType::Boolean, nullable: true };
        let mut b = SqlBuilder::new();
        let mut c = clause("Visible", FilterOperator::Eq, "true", "visible");
        b.compile(&mut c, &def);
        assert_eq!(b.where_sql(), "visible = :Visible__0");
    }

    #[test]
    fn neq_nullable_boolean_false_is_null_aware() {
        let def = FieldDef { column: "visible".to_string(), ty: FieldType::Boolean, nullable: true };
        let mut b = SqlBuilder::new();
        let mut c = clause("Visible", FilterOperator::Neq, "false", "visible");
        b.compile(&mut c, &def);
        assert_eq!(b.where_sql(), "(visible IS NOT NULL AND visible <> :Visible__0)");
    }

    #[test]
    fn lte_snaps_datetime_to_end_of_day() {
        let def = FieldDef { column: "created_at".to_string(), ty: FieldType::DateTime, nullable: false };
        let mut b = SqlBuilder::new();
        let mut c = clause("Created", FilterOperator::Lte, "2024-01-01T00:00:00", "created_at");
        b.compile(&mut c, &def);
        assert_eq!(c.value.as_deref(), Some("2024-01-01T23:59:59.999"));
        let expected = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_milli_opt(23, 59, 59, 999).unwrap();
        assert_eq!(b.binds()[0].1, Bind::DateTime(expected));
    }

    #[test]
    fn lte_on_numeric_does_not_snap() {
        let def = FieldDef { column: "price".to_string(), ty: FieldType::Numeric, nullable: false };
        let mut b = SqlBuilder::new();
        let mut c = clause("Price", FilterOperator::Lte, "2000", "price");
        b.compile(&mut c, &def);
        assert_eq!(c.value.as_deref(), Some("2000"));
        assert_eq!(b.binds()[0].1, Bind::Int(2000));
    }

    #[test]
    fn null_checks_bind_nothing_and_signal_stop() {
        let mut b = SqlBuilder::new();
        let mut c = clause("Deleted", FilterOperator::IsNull, "", "deleted_at");
        assert!(!b.compile(&mut c, &text_def("deleted_at")));
        let mut c = clause("Deleted", FilterOperator::IsNotNull, "", "deleted_at");
        assert!(!b.compile(&mut c, &text_def("deleted_at")));
        let mut c = clause("Note", FilterOperator::IsEmpty, "", "note");
        assert!(!b.compile(&mut c, &text_def("note")));
        let mut c = clause("Note", FilterOperator::IsNotEmpty, "", "note");
        assert!(!b.compile(&mut c, &text_def("note")));

        assert_eq!(
            b.where_sql(),
            "deleted_at IS NULL AND deleted_at IS NOT NULL AND note LIKE N'' AND note NOT LIKE N''"
        );
        assert!(b.binds().is_empty());
    }

    #[test]
    fn unknown_operator_compiles_to_nothing() {
        let mut b = SqlBuilder::new();
        let mut c = clause("Name", FilterOperator::Unrecognized("bogus".to_string()), "x", "name");
        assert!(!b.compile(&mut c, &text_def("name")));
        assert!(b.is_empty());
    }

    #[test]
    fn exists_expands_delimited_list() {
        let def = FieldDef { column: "status".to_string(), ty: FieldType::Numeric, nullable: false };
        let mut b = SqlBuilder::new();
        let mut c = clause("Status", FilterOperator::Exists, "1, 2,3", "status");
        assert!(b.compile(&mut c, &def));
        assert_eq!(b.where_sql(), "status IN (:Status__0_0, :Status__0_1, :Status__0_2)");
        assert_eq!(b.binds().len(), 3);
        assert_eq!(b.binds()[2].1, Bind::Int(3));
    }

    #[test]
    fn exists_with_empty_list_is_skipped() {
        let mut b = SqlBuilder::new();
        let mut c = clause("Status", FilterOperator::Exists, " , ", "status");
        assert!(!b.compile(&mut c, &text_def("status")));
        assert!(b.is_empty());
    }

    #[test]
    fn same_field_clauses_get_suffixed_names() {
        let def = FieldDef { column: "price".to_string(), ty: FieldType::Numeric, nullable: false };
        let mut b = SqlBuilder::new();
        let mut lo = clause("Price", FilterOperator::Gte, "500", "price");
        let mut hi = clause("Price", FilterOperator::Lte, "2000", "price");
        b.compile(&mut lo, &def);
        b.compile(&mut hi, &def);
        assert_eq!(b.where_sql(), "price >= :Price__0 AND price <= :Price__1");
    }

    #[test]
    #[should_panic(expected = "resolved_column")]
    fn unresolved_clause_is_a_contract_violation() {
        let mut b = SqlBuilder::new();
        let mut c = FilterClause::new("Name", FilterOperator::Eq, "x");
        b.compile(&mut c, &text_def("name"));
    }

    #[test]
    fn numeric_binds_keep_integer_width() {
        let def = FieldDef { column: "id".to_string(), ty: FieldType::Numeric, nullable: false };
        let mut b = SqlBuilder::new();
        // an id above 2^53, where f64 starts dropping low bits
        let mut c = clause("Id", FilterOperator::Eq, "9007199254740993", "id");
        b.compile(&mut c, &def);
        assert_eq!(b.binds()[0].1, Bind::Int(9_007_199_254_740_993));

        let mut c = clause("Price", FilterOperator::Gte, "19.99", "price");
        b.compile(&mut c, &def);
        assert_eq!(b.binds()[1].1, Bind::Num(19.99));
    }

    #[test]
    fn numeric_conversion_failure_falls_back_to_text() {
        let def = FieldDef { column: "price".to_string(), ty: FieldType::Numeric, nullable: false };
        let mut b = SqlBuilder::new();
        let mut c = clause("Price", FilterOperator::Gt, "cheap", "price");
        b.compile(&mut c, &def);
        assert_eq!(b.binds()[0].1, Bind::Text("cheap".to_string()));
    }
}
