//! Fixed analytic reports run after a crawl.
//!
//! The group reports read `Group` nodes and `SUBSCRIBED_TO` edges. Nothing in
//! vkgraph writes those, so against a crawled-only database they return zero
//! and no rows.

use anyhow::Result;
use neo4rs::Row;
use serde_json::{Map, Value};
use tracing::info;

use crate::GraphStore;

/// How a returned column is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Int,
    /// Nullable text; bare nodes carry no name.
    Text,
}

/// One named column of a report result.
#[derive(Debug, Clone, Copy)]
pub struct ReportColumn {
    pub name: &'static str,
    pub kind: ColumnKind,
}

const fn int(name: &'static str) -> ReportColumn {
    ReportColumn { name, kind: ColumnKind::Int }
}

const fn text(name: &'static str) -> ReportColumn {
    ReportColumn { name, kind: ColumnKind::Text }
}

/// A named read-only query and the columns it returns.
#[derive(Debug, Clone, Copy)]
pub struct Report {
    pub title: &'static str,
    pub cypher: &'static str,
    pub columns: &'static [ReportColumn],
}

/// A flat key-value record.
pub type ReportRow = Map<String, Value>;

/// Reports in the order they are run.
pub const REPORTS: &[Report] = &[
    Report {
        title: "Total users",
        cypher: "MATCH (u:User) RETURN count(u) AS total_users",
        columns: &[int("total_users")],
    },
    Report {
        title: "Total groups",
        cypher: "MATCH (g:Group) RETURN count(g) AS total_groups",
        columns: &[int("total_groups")],
    },
    Report {
        title: "Top 5 users by follower count",
        cypher: "MATCH (u:User)<-[:FOLLOWS]-(f)
                 RETURN u.id AS user_id, u.name AS name, count(f) AS follower_count
                 ORDER BY follower_count DESC LIMIT 5",
        columns: &[int("user_id"), text("name"), int("follower_count")],
    },
    Report {
        title: "Top 5 most popular groups",
        cypher: "MATCH (g:Group)<-[:SUBSCRIBED_TO]-(u)
                 RETURN g.id AS group_id, g.name AS name, count(u) AS subscriber_count
                 ORDER BY subscriber_count DESC LIMIT 5",
        columns: &[int("group_id"), text("name"), int("subscriber_count")],
    },
    Report {
        title: "Users following each other",
        cypher: "MATCH (u1:User)-[:FOLLOWS]->(u2:User)
                 WHERE (u2)-[:FOLLOWS]->(u1)
                 RETURN u1.name AS name1, u2.name AS name2",
        columns: &[text("name1"), text("name2")],
    },
];

/// Run one report and decode every row.
pub async fn run_report(store: &GraphStore, report: &Report) -> Result<Vec<ReportRow>> {
    let rows = store.query(report.cypher).await?;
    rows.iter().map(|row| decode_row(row, report.columns)).collect()
}

/// Run every report in [`REPORTS`], logging the title and then each row.
pub async fn run_all_reports(store: &GraphStore) -> Result<()> {
    for report in REPORTS {
        let rows = run_report(store, report).await?;
        info!("{}:", report.title);
        for row in rows {
            let record = Value::Object(row);
            info!("{}", record);
        }
    }
    Ok(())
}

fn decode_row(row: &Row, columns: &[ReportColumn]) -> Result<ReportRow> {
    let mut record = Map::new();
    for column in columns {
        let value = match column.kind {
            ColumnKind::Int => Value::from(
                row.get::<i64>(column.name)
                    .map_err(|e| anyhow::anyhow!("Failed to get field '{}': {:?}", column.name, e))?,
            ),
            ColumnKind::Text => Value::from(
                row.get::<Option<String>>(column.name)
                    .map_err(|e| anyhow::anyhow!("Failed to get field '{}': {:?}", column.name, e))?,
            ),
        };
        record.insert(column.name.to_string(), value);
    }
    Ok(record)
}
