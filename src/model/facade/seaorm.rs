use crate::erx;
use crate::model::Paged;
use crate::query::envelope::{Dir, Resolved};
use crate::query::mapping::FieldMap;
use crate::query::predicate::{Bind, SqlBuilder};
use sea_orm::sea_query::Expr;
use sea_orm::{Condition, ConnectionTrait, EntityTrait, FromQueryResult, Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select};

fn bind_value(bind: &Bind) -> sea_orm::Value {
    match bind {
        Bind::Text(s) => sea_orm::Value::from(s.clone()),
        Bind::Bool(b) => sea_orm::Value::from(*b),
        Bind::Int(n) => sea_orm::Value::from(*n),
        Bind::Num(n) => sea_orm::Value::from(*n),
        Bind::DateTime(dt) => sea_orm::Value::from(*dt),
    }
}

/// Compiled predicates as one sea-orm `Condition` (all fragments ANDed).
///
/// The builder's `:name` placeholders are rewritten to positional `?` per
/// fragment and handed to `Expr::cust_with_values`, so values stay bound —
/// nothing is ever spliced into the SQL text.
pub fn condition(builder: &SqlBuilder) -> Condition {
    let mut cond = Condition::all();
    for predicate in builder.predicates() {
        if predicate.binds.is_empty() {
            cond = cond.add(Expr::cust(predicate.sql.as_str()));
            continue;
        }

        let mut sql = predicate.sql.clone();
        let mut values: Vec<sea_orm::Value> = Vec::with_capacity(predicate.binds.len());
        for (name, bind) in predicate.binds.iter() {
            sql = sql.replacen(&format!(":{}", name), "?", 1);
            values.push(bind_value(bind));
        }
        cond = cond.add(Expr::cust_with_values(sql.as_str(), values));
    }
    cond
}

/// Apply a resolved envelope onto a select: filters, order, paging.
///
/// Clauses naming unmapped fields drop out quietly; an order-by target
/// outside the map errs only when the envelope restricts order-by.
pub fn apply<E: EntityTrait>(select: Select<E>, resolved: &Resolved, map: &FieldMap) -> erx::ResultE<Select<E>> {
    let mut clauses = resolved.clauses.clone();
    let mut builder = SqlBuilder::new();
    builder.apply(&mut clauses, map);

    let mut select = select;
    if !builder.is_empty() {
        select = select.filter(condition(&builder));
    }

    let order_column = map.order_column(&resolved.order_by(), resolved.envelope.restrict_order_by)?;
    let order = match resolved.dir() {
        Dir::Asc => Order::Asc,
        Dir::Desc => Order::Desc,
    };
    select = select.order_by(Expr::cust(order_column.as_str()), order);

    if resolved.paging() {
        select = select.offset(resolved.skip() as u64).limit(resolved.take() as u64);
    }

    Ok(select)
}

/// Execute one grid request: filtered count plus the requested page.
///
/// The count runs on the filtered-but-unpaged select so `total` reflects the
/// whole matching set, not the page.
pub async fn paged<E, C>(db: &C, select: Select<E>, resolved: &Resolved, map: &FieldMap) -> erx::ResultE<Paged<E::Model>>
where
    E: EntityTrait,
    E::Model: FromQueryResult + Send + Sync,
    C: ConnectionTrait,
{
    let mut clauses = resolved.clauses.clone();
    let mut builder = SqlBuilder::new();
    builder.apply(&mut clauses, map);

    let mut counting = select.clone();
    if !builder.is_empty() {
        counting = counting.filter(condition(&builder));
    }
    let total = counting.count(db).await.map_err(erx::smp)? as usize;

    let records = apply(select, resolved, map)?.all(db).await.map_err(erx::smp)?;
    Ok(Paged::new(records, total))
}
