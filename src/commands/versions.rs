// Versions command for listing Minecraft versions and their pack formats

use crate::config;
use crate::constants;
use crate::pack_type::PackType;
use crate::ui;
use crate::versions::{self, Catalog, DisplayOption};
use futures::future::join_all;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct CatalogOutput<'a> {
    pack_type: PackType,
    source: &'static str,
    versions: &'a [DisplayOption],
}

#[derive(Debug, Serialize)]
struct VersionsOutput<'a> {
    schema_version: u32,
    catalogs: Vec<CatalogOutput<'a>>,
}

/// Load the catalog for one pack type, with a spinner unless output is JSON
pub async fn load(pack_type: PackType, offline: bool, json: bool) -> Catalog {
    let source = versions::source_for(pack_type, offline);
    let pb = (!json).then(|| ui::spinner(&format!("Loading {} versions...", pack_type)));

    let catalog = versions::load_catalog(pack_type, source.as_ref(), config::fetch_timeout()).await;

    if let Some(pb) = pb {
        let msg = format!(
            "{} {} versions {}",
            catalog.options().len(),
            pack_type,
            console::style(format!("({})", catalog.origin())).dim()
        );
        if catalog.origin() == source.name() {
            ui::finish_spinner_success(&pb, &msg);
        } else {
            ui::finish_spinner_warning(&pb, &msg);
        }
    }

    catalog
}

pub async fn list_versions(
    pack_type: Option<PackType>,
    json: bool,
    offline: bool,
) -> anyhow::Result<i32> {
    let pack_types: Vec<PackType> = match pack_type {
        Some(pt) => vec![pt],
        None => PackType::ALL.to_vec(),
    };

    let catalogs = join_all(pack_types.into_iter().map(|pt| load(pt, offline, json))).await;

    if json {
        let output = VersionsOutput {
            schema_version: constants::SCHEMA_VERSION,
            catalogs: catalogs
                .iter()
                .map(|c| CatalogOutput {
                    pack_type: c.pack_type(),
                    source: c.origin(),
                    versions: c.options(),
                })
                .collect(),
        };
        ui::raw(&serde_json::to_string_pretty(&output)?);
        return Ok(0);
    }

    for catalog in &catalogs {
        ui::header(&format!("\n{}", catalog.pack_type()));
        for option in catalog.options() {
            ui::status(
                &format!("{:>14}", option.text),
                &format!("pack_format {}", option.format_id),
            );
        }
    }

    Ok(0)
}
