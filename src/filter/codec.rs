use crate::filter::clause::{Clauses, FilterClause};
use crate::filter::FilterOperator;

/// Clause separator on the wire.
pub const CLAUSE_SEP: &'static str = "|";
/// Field/value/operator separator on the wire.
pub const PART_SEP: &'static str = "::";

/// Decode a filter string (`field::value::operator` clauses joined by `|`).
///
/// Malformed segments are dropped, never rejected: empty segments and
/// segments without a `::` simply vanish. A missing operator segment
/// defaults to `eq`. Fields are trimmed and leading-uppercased so every
/// later lookup is case-insensitive against a normalized name.
///
/// 注意：值内不支持转义 `|` 或 `::`，这是与既有客户端兼容的线上格式约束。
pub fn decode(filters: &str) -> Clauses {
    let mut clauses: Vec<FilterClause> = Vec::new();

    for segment in filters.split(CLAUSE_SEP) {
        if segment.is_empty() || !segment.contains(PART_SEP) {
            continue;
        }

        let parts: Vec<&str> = segment.split(PART_SEP).collect();
        let field = normalize_field(parts[0]);
        if field.is_empty() {
            continue;
        }

        let value = parts.get(1).map(|v| v.to_string());
        let operator = match parts.get(2) {
            Some(op) => FilterOperator::parse(op),
            None => FilterOperator::Eq,
        };

        clauses.push(FilterClause { field, operator, value, resolved_column: None });
    }

    Clauses::new(clauses)
}

/// Encode clauses back into the wire form.
///
/// Lossless for field names and values that contain no `|` and no `::`
/// (see `decode`); the operator token always rides along, even `eq`.
pub fn encode(clauses: &Clauses) -> String {
    clauses
        .iter()
        .map(|c| format!("{}{}{}{}{}", c.field, PART_SEP, c.value.as_deref().unwrap_or(""), PART_SEP, c.operator.as_str()))
        .collect::<Vec<String>>()
        .join(CLAUSE_SEP)
}

/// Client-mirror value renderer: how a UI-state value becomes the wire text.
/// Strings and scalars render plainly, arrays join with `,`,
/// objects are rejected (empty string), null renders empty.
pub fn render_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Array(items) => items.iter().map(render_value).collect::<Vec<String>>().join(","),
        serde_json::Value::Object(_) => String::new(),
    }
}

/// Builder for the client side of the wire: UI state in, one string out.
#[derive(Default)]
pub struct Encoder {
    clauses: Clauses,
}

impl Encoder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn push(mut self, field: impl Into<String>, operator: FilterOperator, value: &serde_json::Value) -> Self {
        self.clauses.0.push(FilterClause {
            field: normalize_field(&field.into()),
            operator,
            value: Some(render_value(value)),
            resolved_column: None,
        });
        self
    }

    /// chrono datetimes render in the ISO-like form the reference client
    /// emits (quotes stripped from the JSON rendition)
    pub fn push_datetime(self, field: impl Into<String>, operator: FilterOperator, value: chrono::NaiveDateTime) -> Self {
        let rendered = serde_json::Value::String(value.format("%Y-%m-%dT%H:%M:%S%.3f").to_string());
        self.push(field, operator, &rendered)
    }

    pub fn build(self) -> String {
        encode(&self.clauses)
    }
}

/// trim + leading-uppercase, `name` and `Name` address the same field
pub fn normalize_field(field: &str) -> String {
    let trimmed = field.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_splits_clauses() {
        let clauses = decode("Status::Active::eq|Price::1000::gte|Name::phone::contains");
        assert_eq!(clauses.len(), 3);
        assert_eq!(clauses.value_of("Status", "eq"), Some("Active"));
        assert_eq!(clauses.value_of("Price", "gte"), Some("1000"));
        assert_eq!(clauses.value_of("Name", "contains"), Some("phone"));
    }

    #[test]
    fn decode_defaults_missing_operator_to_eq() {
        let clauses = decode("age::30");
        assert_eq!(clauses.len(), 1);
        let clause = clauses.clause_of("Age", "").unwrap();
        assert_eq!(clause.operator, FilterOperator::Eq);
        assert_eq!(clause.value.as_deref(), Some("30"));
    }

    #[test]
    fn decode_normalizes_field_case() {
        let lower = decode("name::x::eq");
        let upper = decode("Name::x::eq");
        assert_eq!(lower.clause_of("Name", "").unwrap().field, "Name");
        assert_eq!(lower, upper);
    }

    #[test]
    fn decode_drops_malformed_segments() {
        let clauses = decode("||no-delimiter|Name::ok::eq|::::");
        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses.value_of("Name", ""), Some("ok"));
    }

    #[test]
    fn decode_empty_string_yields_nothing() {
        assert!(decode("").is_empty());
    }

    #[test]
    fn encode_decode_round_trip() {
        let original = decode("Status::Active::eq|Price::1000::gte|Flag::true::neq|Tag::a,b,c::exists");
        let wire = encode(&original);
        assert_eq!(decode(&wire), original);
    }

    #[test]
    fn render_value_shapes() {
        assert_eq!(render_value(&json!("phone")), "phone");
        assert_eq!(render_value(&json!(1000)), "1000");
        assert_eq!(render_value(&json!(true)), "true");
        assert_eq!(render_value(&json!(["a", "b", 3])), "a,b,3");
        assert_eq!(render_value(&json!({"not": "allowed"})), "");
        assert_eq!(render_value(&serde_json::Value::Null), "");
    }

    #[test]
    fn encoder_builds_wire_string() {
        let wire = Encoder::new()
            .push("status", FilterOperator::Eq, &json!("Active"))
            .push("price", FilterOperator::Gte, &json!(1000))
            .build();
        assert_eq!(wire, "Status::Active::eq|Price::1000::gte");
    }

    #[test]
    fn encoder_renders_datetime_iso_like() {
        let dt = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let wire = Encoder::new().push_datetime("created", FilterOperator::Lte, dt).build();
        assert_eq!(wire, "Created::2024-01-01T00:00:00.000::lte");
    }

    #[test]
    fn normalize_field_examples() {
        assert_eq!(normalize_field(" name "), "Name");
        assert_eq!(normalize_field("Name"), "Name");
        assert_eq!(normalize_field(""), "");
        assert_eq!(normalize_field("_id"), "_id");
    }
}
