use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, Utc};
use csv::StringRecord;

use crate::domain::entities::entity::{Entity, EntityId, EntityKind};

const REQUIRED_HEADERS: [&str; 5] = ["id", "name", "kind", "description", "created_at"];

fn header_positions(headers: &StringRecord) -> Result<[usize; 5]> {
    let mut positions = [0_usize; 5];
    for (slot, required) in positions.iter_mut().zip(REQUIRED_HEADERS) {
        *slot = headers
            .iter()
            .position(|header| header.trim().eq_ignore_ascii_case(required))
            .ok_or_else(|| anyhow!("csv header `{required}` is required"))?;
    }
    Ok(positions)
}

fn parse_record(record: &StringRecord, positions: &[usize; 5], line: usize) -> Result<Entity> {
    let field = |idx: usize| record.get(positions[idx]).unwrap_or("").trim();

    let id = field(0);
    if id.is_empty() {
        bail!("line {line}: entity id is empty");
    }
    let name = field(1);
    if name.is_empty() {
        bail!("line {line}: entity name is empty");
    }
    let kind = field(2)
        .parse::<EntityKind>()
        .map_err(|err| anyhow!("line {line}: {err}"))?;
    let created_at = DateTime::parse_from_rfc3339(field(4))
        .with_context(|| format!("line {line}: created_at must be RFC 3339"))?
        .with_timezone(&Utc);

    Ok(Entity {
        id: EntityId(id.to_string()),
        name: name.to_string(),
        kind,
        description: field(3).to_string(),
        created_at,
    })
}

/// Reads entities from a CSV file with the columns
/// `id,name,kind,description,created_at` in any order.
pub fn read_entities_csv(csv_path: &Path) -> Result<Vec<Entity>> {
    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("failed to open csv: {}", csv_path.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("failed to read headers from csv: {}", csv_path.display()))?
        .clone();
    let positions = header_positions(&headers)?;

    let mut entities = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.context("failed to parse csv record")?;
        // Line 1 is the header.
        entities.push(parse_record(&record, &positions, idx + 2)?);
    }
    Ok(entities)
}
