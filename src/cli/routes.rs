//! Routes command: inspect loader chains without building.
//!
//! Resolves every prerendered page against the route tree and prints the
//! chains as JSON: include order, function names and deployed paths.

use anyhow::Result;

use crate::cli::RoutesArgs;
use crate::config::AdapterConfig;
use crate::core::NavPath;
use crate::kit::KitBuilder;
use crate::log;
use crate::route::{DependencyChain, RouteIndex};
use crate::utils::fs::write_file;
use crate::utils::plural_count;

pub fn run_routes(args: &RoutesArgs, config: &AdapterConfig, kit: &dyn KitBuilder) -> Result<()> {
    let index = RouteIndex::scan(&config.kit.routes, &config.kit.extension)?;
    let paths: Vec<NavPath> = kit.pages().iter().map(|page| page.path.clone()).collect();
    let resolution = index.resolve_all(&paths);

    let chains = select_chains(&resolution.chains, args.all);
    let formatted = if args.pretty {
        serde_json::to_string_pretty(&chains)?
    } else {
        serde_json::to_string(&chains)?
    };

    if let Some(ref output_path) = args.output {
        write_file(output_path, &formatted)?;
        log!("routes"; "wrote {} to {}", plural_count(chains.len(), "chain"), output_path.display());
    } else {
        println!("{formatted}");
    }

    Ok(())
}

/// Chains to print; pages without loaders only with `all`.
fn select_chains<'c, 'a>(
    chains: &'c [DependencyChain<'a>],
    all: bool,
) -> Vec<&'c DependencyChain<'a>> {
    chains.iter().filter(|chain| all || !chain.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::{RouteUnit, UnitKind};
    use serde_json::json;

    #[test]
    fn test_chain_json_shape() {
        let index = RouteIndex::from_units(vec![
            RouteUnit::new(NavPath::root(), UnitKind::Layout, "php"),
            RouteUnit::new(NavPath::new("/blog"), UnitKind::Page, "php"),
        ])
        .unwrap();
        let resolution = index.resolve_all(&[NavPath::new("/blog")]);

        let value = serde_json::to_value(select_chains(&resolution.chains, false)).unwrap();
        assert_eq!(
            value,
            json!([{
                "path": "/blog",
                "units": [
                    {
                        "source": "/+layout.server.php",
                        "kind": "layout",
                        "prefix": "/",
                        "function": "_layout_load",
                        "deployed": "_protected/_layout.php"
                    },
                    {
                        "source": "/blog/+page.server.php",
                        "kind": "page",
                        "prefix": "/blog",
                        "function": "_blog_page_load",
                        "deployed": "_protected/blog/_page.php"
                    }
                ]
            }])
        );
    }

    #[test]
    fn test_empty_chains_need_all() {
        let index = RouteIndex::default();
        let resolution = index.resolve_all(&[NavPath::new("/about")]);
        assert!(select_chains(&resolution.chains, false).is_empty());
        assert_eq!(select_chains(&resolution.chains, true).len(), 1);
    }
}
