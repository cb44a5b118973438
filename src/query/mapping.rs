use crate::erx::{self, Layouted};
use crate::filter::clause::FilterClause;
use indexmap::IndexMap;

/// Declared type of a filterable field; picks the predicate shape and the
/// bind conversion in the compiler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldType {
    Text,
    Boolean,
    DateTime,
    Numeric,
    Other,
}

/// One filterable field: physical column (or expression), declared type,
/// nullability.
#[derive(Clone, Debug)]
pub struct FieldDef {
    pub column: String,
    pub ty: FieldType,
    pub nullable: bool,
}

/// Static field→column map for one entity.
///
/// Declared once per entity and validated at startup — a clause naming an
/// unmapped field is a request-time no-op, but a blank or duplicate mapping
/// is a programming mistake and fails fast.
///
/// Keys are case-folded: `Created`, `created` and `CREATED` address the
/// same entry, matching the clause model's field matching.
#[derive(Clone, Debug)]
pub struct FieldMap {
    entity: String,
    fields: IndexMap<String, FieldDef>,
}

impl FieldMap {
    pub fn for_entity(entity: impl Into<String>) -> Self {
        FieldMap { entity: entity.into(), fields: IndexMap::new() }
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }

    pub fn field(mut self, name: &str, column: &str, ty: FieldType, nullable: bool) -> Self {
        self.fields.insert(fold_field(name), FieldDef { column: column.to_string(), ty, nullable });
        self
    }

    pub fn text(self, name: &str, column: &str) -> Self {
        self.field(name, column, FieldType::Text, false)
    }

    pub fn boolean(self, name: &str, column: &str) -> Self {
        self.field(name, column, FieldType::Boolean, false)
    }

    pub fn nullable_boolean(self, name: &str, column: &str) -> Self {
        self.field(name, column, FieldType::Boolean, true)
    }

    pub fn datetime(self, name: &str, column: &str) -> Self {
        self.field(name, column, FieldType::DateTime, false)
    }

    pub fn numeric(self, name: &str, column: &str) -> Self {
        self.field(name, column, FieldType::Numeric, false)
    }

    /// Startup validation: blank columns are always a mistake.
    /// (Duplicates collapse in the map itself — last declaration wins —
    /// so the blank check is what is left to verify.)
    pub fn validate(&self) -> erx::ResultEX {
        if self.fields.is_empty() {
            return Err(erx::Erx::layouted(
                Layouted::mapping("VALI", "0001"),
                &format!("field map for '{}' declares no fields", self.entity),
            ));
        }

        for (name, def) in self.fields.iter() {
            if def.column.trim().is_empty() {
                return Err(erx::Erx::layouted(
                    Layouted::mapping("VALI", "0002"),
                    &format!("field '{}' of '{}' maps to a blank column", name, self.entity),
                ));
            }
        }

        Ok(())
    }

    pub fn get(&self, field: &str) -> Option<&FieldDef> {
        self.fields.get(&fold_field(field))
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Stamp `resolved_column` onto the clause. Unmapped fields resolve to
    /// `None` — the caller drops those clauses rather than erroring, the
    /// same skip-quietly policy the compiler applies to unknown operators.
    pub fn resolve<'a>(&'a self, clause: &mut FilterClause) -> Option<&'a FieldDef> {
        let def = self.get(&clause.field)?;
        clause.resolved_column = Some(def.column.clone());
        Some(def)
    }

    /// Resolve an order-by target. When `restrict` is set, targets outside
    /// the map are rejected instead of passed through verbatim.
    pub fn order_column(&self, order_by: &str, restrict: bool) -> erx::ResultE<String> {
        if let Some(def) = self.get(order_by) {
            return Ok(def.column.clone());
        }
        if restrict {
            return Err(erx::Erx::layouted(
                Layouted::mapping("ORDR", "0001"),
                &format!("order-by target '{}' is not declared on '{}'", order_by, self.entity),
            ));
        }
        Ok(order_by.to_string())
    }
}

/// full case-fold for map keys; the codec only uppercases the first letter,
/// which is not enough to make lookup case-insensitive
fn fold_field(field: &str) -> String {
    field.trim().to_lowercase()
}
