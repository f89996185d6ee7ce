//! Strict prerenderability check.
//!
//! A PHP host cannot render routes on demand, so in strict mode every route
//! must be prerendered. Runs before any file is touched.

use super::{KitError, RouteDescriptor};

/// Inputs of the check, borrowed from config and manifest.
pub struct StrictCheck<'a> {
    pub strict: bool,
    pub fallback: bool,
    /// Route tree location as shown to the user (e.g. `src/routes`).
    pub routes_prefix: &'a str,
    pub routes: &'a [RouteDescriptor],
    pub prerender_entries: &'a [String],
}

impl StrictCheck<'_> {
    /// `Err(KitError::DynamicRoutes)` with an actionable report when strict
    /// mode is on, no fallback is configured and some route is dynamic.
    pub fn run(&self) -> Result<(), KitError> {
        if self.fallback || !self.strict {
            return Ok(());
        }

        let dynamic: Vec<_> = self
            .routes
            .iter()
            .filter(|r| !r.prerender.is_prerendered())
            .collect();
        if dynamic.is_empty() {
            return Ok(());
        }

        Err(KitError::DynamicRoutes(self.report(&dynamic)))
    }

    fn report(&self, dynamic: &[&RouteDescriptor]) -> String {
        let listed = dynamic
            .iter()
            .map(|r| format!("  - {}", join_route(self.routes_prefix, &r.id)))
            .collect::<Vec<_>>()
            .join("\n");

        let has_param_routes = self.routes.iter().any(RouteDescriptor::has_params);
        let default_entries = self.prerender_entries.len() == 1 && self.prerender_entries[0] == "*";

        let mut lines = vec![
            "all routes must be fully prerenderable, but found the following routes that are dynamic:".to_string(),
            listed,
            String::new(),
            "You have the following options:".to_string(),
            "  - set `build.fallback = true` (or pass `--fallback`) if the site ships a fallback page.".to_string(),
            "  - add `export const prerender = true` to your root `+layout.js/.ts` or `+layout.server.js/.ts` file. This will try to prerender all pages.".to_string(),
            "  - add `export const prerender = true` to any `+server.js/ts` files that are not fetched by page `load` functions.".to_string(),
        ];

        if has_param_routes || !default_entries {
            let why = if has_param_routes {
                " (routes with parameters are not part of entry points by default)"
            } else {
                ""
            };
            lines.push(format!(
                "  - adjust the `prerender.entries` config option{why}."
            ));
        }

        lines.push("  - set `build.strict = false` to ignore this error. Only do this if you are sure you don't need the routes in question, as they will be unavailable.".to_string());
        lines.push(String::new());
        lines.push("A PHP host only serves what was prerendered; routes that need on-demand rendering require a different adapter.".to_string());

        lines.join("\n")
    }
}

/// `("src/routes", "/blog")` -> `src/routes/blog`, `("src/routes", "/")` -> `src/routes`
fn join_route(prefix: &str, id: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    let id = id.trim_matches('/');
    match (prefix.is_empty(), id.is_empty()) {
        (true, _) => id.to_string(),
        (false, true) => prefix.to_string(),
        (false, false) => format!("{prefix}/{id}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kit::PrerenderOption;

    fn route(id: &str, prerender: bool) -> RouteDescriptor {
        RouteDescriptor {
            id: id.to_string(),
            prerender: PrerenderOption::Flag(prerender),
        }
    }

    fn check<'a>(routes: &'a [RouteDescriptor], entries: &'a [String]) -> StrictCheck<'a> {
        StrictCheck {
            strict: true,
            fallback: false,
            routes_prefix: "src/routes",
            routes,
            prerender_entries: entries,
        }
    }

    #[test]
    fn test_all_prerendered_passes() {
        let routes = [route("/", true), route("/blog", true)];
        let entries = ["*".to_string()];
        assert!(check(&routes, &entries).run().is_ok());
    }

    #[test]
    fn test_dynamic_route_reported() {
        let routes = [route("/", true), route("/admin", false)];
        let entries = ["*".to_string()];
        let err = check(&routes, &entries).run().unwrap_err();
        let KitError::DynamicRoutes(message) = err else {
            panic!("expected dynamic routes error");
        };
        assert!(message.contains("  - src/routes/admin"));
        assert!(!message.contains("  - src/routes\n"));
        assert!(!message.contains("prerender.entries"));
    }

    #[test]
    fn test_param_routes_mention_entries() {
        let routes = [route("/blog/[slug]", false)];
        let entries = ["*".to_string()];
        let KitError::DynamicRoutes(message) = check(&routes, &entries).run().unwrap_err() else {
            panic!("expected dynamic routes error");
        };
        assert!(message.contains("routes with parameters are not part of entry points"));
    }

    #[test]
    fn test_custom_entries_mention_entries() {
        let routes = [route("/admin", false)];
        let entries = ["/".to_string(), "/about".to_string()];
        let KitError::DynamicRoutes(message) = check(&routes, &entries).run().unwrap_err() else {
            panic!("expected dynamic routes error");
        };
        assert!(message.contains("adjust the `prerender.entries` config option."));
    }

    #[test]
    fn test_fallback_or_lenient_skips_check() {
        let routes = [route("/admin", false)];
        let entries = ["*".to_string()];

        let mut lenient = check(&routes, &entries);
        lenient.strict = false;
        assert!(lenient.run().is_ok());

        let mut fallback = check(&routes, &entries);
        fallback.fallback = true;
        assert!(fallback.run().is_ok());
    }

    #[test]
    fn test_join_route() {
        assert_eq!(join_route("src/routes", "/"), "src/routes");
        assert_eq!(join_route("src/routes/", "/blog"), "src/routes/blog");
        assert_eq!(join_route("", "/blog"), "blog");
    }
}
