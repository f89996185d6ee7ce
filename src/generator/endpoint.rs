//! Data endpoint script generation.
//!
//! One script per page with loaders, placed where the client fetches its
//! data (`<path>/__data.php`). It includes the relocated units, runs their
//! loaders outermost first threading `$basedata` through, and either leaves
//! `$json_data_result` for the including page or answers an invalidation
//! request directly.

use crate::core::NavPath;
use crate::embed::php::{ENDPOINT_PHP, EndpointVars, LOAD_CALL_PHP, LoadCallVars};
use crate::route::DependencyChain;
use crate::utils::path::relative_slash;

use super::protocol::{
    DataEntry, INVALIDATED_PARAM, InvalidationEnvelope, LoadArgs, NodeTable, PhpVar, ToPhp,
    php_string,
};

/// Endpoint file name, next to the `__data.json` it supersedes.
pub const ENDPOINT_FILE: &str = "__data.php";

/// Static data file written by the prerenderer.
pub const DATA_JSON_FILE: &str = "__data.json";

/// Output-root relative endpoint location: `blog/__data.php`, `__data.php`.
pub fn endpoint_path(path: &NavPath) -> String {
    join_file(path, ENDPOINT_FILE)
}

/// Output-root relative static data location.
pub fn data_json_path(path: &NavPath) -> String {
    join_file(path, DATA_JSON_FILE)
}

fn join_file(path: &NavPath, file: &str) -> String {
    if path.is_root() {
        file.to_string()
    } else {
        format!("{}/{file}", path.relative())
    }
}

/// Render the endpoint script for a chain.
pub fn render_endpoint(chain: &DependencyChain<'_>) -> String {
    let dir = chain.path.relative();

    let includes = chain
        .units()
        .map(|unit| {
            let target = format!("/{}", relative_slash(dir, &unit.deployed));
            format!("include_once __DIR__ . {};", php_string(&target))
        })
        .collect::<Vec<_>>()
        .join("\n");

    let args = LoadArgs {
        routeid: &chain.path,
        parentdata: PhpVar::BASE_DATA,
    }
    .to_php();
    let entry = DataEntry::new(PhpVar::RES).to_php();

    let calls = chain
        .units()
        .map(|unit| {
            LOAD_CALL_PHP
                .render(&LoadCallVars {
                    name_literal: php_string(&unit.function),
                    function: unit.function.clone(),
                    args: args.clone(),
                    entry: entry.clone(),
                })
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    ENDPOINT_PHP.render(&EndpointVars {
        includes,
        calls,
        invalidated_param: php_string(INVALIDATED_PARAM),
        node_table: indent(&NodeTable::render_php(&PhpVar::RES, &PhpVar::NODES)),
        envelope: InvalidationEnvelope::single(PhpVar::NODES).to_php(),
    })
}

fn indent(block: &str) -> String {
    block
        .lines()
        .map(|line| format!("    {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
