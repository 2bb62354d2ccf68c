use std::path::Path;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use dioxus::logger::tracing::debug;
use rusqlite::{params, types::Value, Row};

use crate::domain::entities::entity::{
    Entity, EntityId, EntityKind, EntityPage, EntityQuery, EntitySort, SORT_FIELD_CREATED,
    SORT_FIELD_NAME,
};
use crate::domain::entities::listing::SortOrder;
use crate::error::CatalogError;
use crate::infra::sqlite::schema::open_connection;

/// Maps a sort field to its ORDER BY expression. Only whitelisted fields
/// ever reach the SQL text.
fn order_expression(sort: &EntitySort) -> Result<String, CatalogError> {
    let column = match sort.field.as_str() {
        SORT_FIELD_NAME => "name COLLATE NOCASE",
        SORT_FIELD_CREATED => "created_at",
        other => return Err(CatalogError::UnknownSortField(other.to_string())),
    };
    let direction = match sort.order {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    };
    Ok(format!("{column} {direction}, id ASC"))
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn row_to_entity(row: &Row<'_>) -> rusqlite::Result<(String, String, String, String, i64)> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
}

fn hydrate_entity(raw: (String, String, String, String, i64)) -> Result<Entity> {
    let (id, name, kind, description, created_at) = raw;
    let kind = kind
        .parse::<EntityKind>()
        .map_err(|err| anyhow!("entity {id}: {err}"))?;
    let created_at = DateTime::<Utc>::from_timestamp(created_at, 0)
        .ok_or_else(|| anyhow!("entity {id}: created_at out of range: {created_at}"))?;
    Ok(Entity {
        id: EntityId(id),
        name,
        kind,
        description,
        created_at,
    })
}

pub fn query_page(db_path: &Path, query: &EntityQuery) -> Result<EntityPage, CatalogError> {
    if query.page_size <= 0 {
        return Err(CatalogError::InvalidPageSize(query.page_size));
    }

    let search = query.search.trim();
    let order_sql = match &query.sort {
        Some(sort) => order_expression(sort)?,
        None if !search.is_empty() => {
            "CASE WHEN name LIKE ? ESCAPE '\\' THEN 0 ELSE 1 END ASC, name COLLATE NOCASE ASC, id ASC"
                .to_string()
        }
        None => "name COLLATE NOCASE ASC, id ASC".to_string(),
    };

    query_page_sql(db_path, query, search, &order_sql).map_err(CatalogError::storage)
}

fn query_page_sql(
    db_path: &Path,
    query: &EntityQuery,
    search: &str,
    order_sql: &str,
) -> Result<EntityPage> {
    let conn = open_connection(db_path)?;

    let mut filter_clauses = Vec::<String>::new();
    let mut filter_params = Vec::<Value>::new();

    if !search.is_empty() {
        filter_clauses.push(
            "(name LIKE ? ESCAPE '\\' OR description LIKE ? ESCAPE '\\')".to_string(),
        );
        let pattern = format!("%{}%", escape_like(search));
        filter_params.push(Value::Text(pattern.clone()));
        filter_params.push(Value::Text(pattern));
    }

    if !query.kinds.is_empty() {
        let placeholders = std::iter::repeat_n("?", query.kinds.len())
            .collect::<Vec<_>>()
            .join(",");
        filter_clauses.push(format!("kind IN ({placeholders})"));
        filter_params.extend(
            query
                .kinds
                .iter()
                .map(|kind| Value::Text(kind.as_str().to_string())),
        );
    }

    let where_sql = if filter_clauses.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", filter_clauses.join(" AND "))
    };

    let count_sql = format!("SELECT COUNT(*) FROM entity {where_sql}");
    let total: i64 = conn
        .query_row(
            &count_sql,
            rusqlite::params_from_iter(filter_params.iter().cloned()),
            |row| row.get(0),
        )
        .context("failed to query filtered entity count")?;

    let offset = (query.page.max(1) - 1) * query.page_size;
    let row_sql = format!(
        "SELECT id, name, kind, description, created_at
         FROM entity {where_sql}
         ORDER BY {order_sql}
         LIMIT ? OFFSET ?"
    );

    let mut row_params = filter_params;
    if query.sort.is_none() && !search.is_empty() {
        row_params.push(Value::Text(format!("{}%", escape_like(search))));
    }
    row_params.push(Value::Integer(query.page_size));
    row_params.push(Value::Integer(offset));

    let mut stmt = conn
        .prepare(&row_sql)
        .context("failed to prepare entity page query")?;
    let raw_rows = stmt
        .query_map(rusqlite::params_from_iter(row_params), row_to_entity)
        .context("failed to query entity page")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("failed to collect entity page")?;

    let entities = raw_rows
        .into_iter()
        .map(hydrate_entity)
        .collect::<Result<Vec<_>>>()?;

    debug!(
        total,
        returned = entities.len(),
        page = query.page,
        "entity page loaded"
    );

    Ok(EntityPage { entities, total })
}

pub fn insert_entities(db_path: &Path, entities: &[Entity]) -> Result<usize> {
    let mut conn = open_connection(db_path)?;
    let tx = conn.transaction().context("failed to start transaction")?;

    let mut insert_stmt = tx
        .prepare(
            "INSERT INTO entity(id, name, kind, description, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                kind = excluded.kind,
                description = excluded.description,
                created_at = excluded.created_at",
        )
        .context("failed to prepare entity insert")?;

    for entity in entities {
        insert_stmt
            .execute(params![
                entity.id.0,
                entity.name,
                entity.kind.as_str(),
                entity.description,
                entity.created_at.timestamp(),
            ])
            .with_context(|| format!("failed to insert entity {}", entity.id))?;
    }
    drop(insert_stmt);

    tx.commit().context("failed to commit entity insert")?;
    Ok(entities.len())
}

pub fn count_entities(db_path: &Path) -> Result<i64> {
    let conn = open_connection(db_path)?;
    conn.query_row("SELECT COUNT(*) FROM entity", [], |row| row.get(0))
        .context("failed to count entities")
}
