//! Reading a catalog of sources and volumes from TOML.

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use super::{resolve_source, Catalog, CatalogError, NewSource};
use crate::language::{Bounds, SourceKind};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default, rename = "source")]
    sources: Vec<SourceTable>,
    #[serde(default, rename = "volume")]
    volumes: Vec<VolumeTable>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SourceTable {
    name: String,
    abbreviation: String,
    volumes: Bounds,
    pages: Bounds,
    #[serde(default = "default_nearby")]
    nearby: u32,
    #[serde(default)]
    kind: SourceKind,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct VolumeTable {
    source: String,
    number: u32,
    #[serde(default)]
    notes: String,
    opened: Option<NaiveDate>,
    closed: Option<NaiveDate>,
}

fn default_nearby() -> u32 {
    1
}

/// Build a Catalog from the content of a TOML catalog file. Sources are
/// created first so that volumes may refer to them by abbreviation or name.
pub fn parse_catalog(content: &str) -> Result<Catalog, CatalogError> {
    let file: CatalogFile =
        toml::from_str(content).map_err(|error| CatalogError::Malformed(error.message().to_string()))?;

    let mut catalog = Catalog::new();

    for table in &file.sources {
        catalog.add_source(NewSource {
            name: &table.name,
            abbreviation: &table.abbreviation,
            volumes: table.volumes,
            pages: table.pages,
            nearby: table.nearby,
            kind: table.kind,
        })?;
    }

    for table in &file.volumes {
        let source = resolve_source(&catalog, &table.source)
            .map_err(|_| CatalogError::UnknownSource(table.source.clone()))?;
        catalog.add_volume(
            source.id,
            table.number,
            &table.notes,
            table.opened,
            table.closed,
        )?;
    }

    debug!(
        sources = file
            .sources
            .len(),
        volumes = file
            .volumes
            .len(),
        "loaded catalog"
    );
    Ok(catalog)
}
