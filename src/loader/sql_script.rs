use std::{fs, sync::Arc};

use anyhow::{Context, Result};
use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseTransaction};

use crate::{
    engine::{Capabilities, Capability, UnitLoader},
    errors::LoadError,
};

pub const UP_MARKER: &str = "-- +migrate Up";
pub const DOWN_MARKER: &str = "-- +migrate Down";

/// A unit file split into its forward and backward SQL.
///
/// ```text
/// -- +migrate Up
/// CREATE TABLE users (name TEXT);
/// -- +migrate Down
/// DROP TABLE IF EXISTS users;
/// ```
///
/// Comments and blank lines may precede the first marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlScript {
    pub up: String,
    pub down: String,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    Up,
    Down,
}

impl SqlScript {
    pub fn parse(location: &str, source: &str) -> Result<Self, LoadError> {
        let mut up: Option<Vec<&str>> = None;
        let mut down: Option<Vec<&str>> = None;
        let mut current = None;

        for (idx, line) in source.lines().enumerate() {
            let trimmed = line.trim();
            let (marker, section, slot) = match trimmed {
                UP_MARKER => (UP_MARKER, Section::Up, &mut up),
                DOWN_MARKER => (DOWN_MARKER, Section::Down, &mut down),
                _ => {
                    match current {
                        Some(Section::Up) => up.get_or_insert_with(Vec::new).push(line),
                        Some(Section::Down) => down.get_or_insert_with(Vec::new).push(line),
                        None if trimmed.is_empty() || trimmed.starts_with("--") => {}
                        None => {
                            return Err(LoadError::StrayContent {
                                location: location.to_string(),
                                line: idx + 1,
                            });
                        }
                    }
                    continue;
                }
            };

            if slot.is_some() {
                return Err(LoadError::DuplicateSection {
                    location: location.to_string(),
                    marker,
                    line: idx + 1,
                });
            }
            *slot = Some(Vec::new());
            current = Some(section);
        }

        let up = up.ok_or_else(|| LoadError::MissingSection {
            location: location.to_string(),
            marker: UP_MARKER,
        })?;
        let down = down.ok_or_else(|| LoadError::MissingSection {
            location: location.to_string(),
            marker: DOWN_MARKER,
        })?;

        Ok(Self {
            up: up.join("\n").trim().to_string(),
            down: down.join("\n").trim().to_string(),
        })
    }
}

struct SqlBatch {
    sql: String,
}

#[async_trait]
impl Capability<DatabaseTransaction> for SqlBatch {
    async fn invoke(&self, tx: &DatabaseTransaction) -> Result<()> {
        if self.sql.is_empty() {
            return Ok(());
        }
        tx.execute_unprepared(&self.sql)
            .await
            .context("Failed to execute migration statements")?;
        Ok(())
    }
}

/// Loads units written as plain SQL files.
#[derive(Debug, Default, Clone)]
pub struct SqlScriptLoader;

impl SqlScriptLoader {
    pub fn new() -> Self {
        Self
    }
}

impl UnitLoader<DatabaseTransaction> for SqlScriptLoader {
    fn resolve(&self, location: &str) -> Result<Capabilities<DatabaseTransaction>, LoadError> {
        let source = fs::read_to_string(location).map_err(|source| LoadError::Io {
            location: location.to_string(),
            source,
        })?;
        let script = SqlScript::parse(location, &source)?;

        Ok(Capabilities {
            apply: Arc::new(SqlBatch { sql: script.up }),
            revert: Arc::new(SqlBatch { sql: script.down }),
        })
    }
}
