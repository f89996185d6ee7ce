//! Embedded PHP templates.
//!
//! # Usage
//!
//! ```ignore
//! use embed::php::{ENDPOINT_PHP, EndpointVars};
//!
//! let vars = EndpointVars { includes, calls, invalidated_param, node_table, envelope };
//! let script = ENDPOINT_PHP.render(&vars);
//! ```

mod template;

pub use template::{Template, TemplateVars};

pub mod php {
    use super::{Template, TemplateVars};

    /// Variables for endpoint.php template.
    pub struct EndpointVars {
        /// One `include_once` per unit, chain order.
        pub includes: String,
        /// Rendered [`LOAD_CALL_PHP`] blocks, chain order.
        pub calls: String,
        /// Quoted invalidation query parameter.
        pub invalidated_param: String,
        /// Statements building the node table.
        pub node_table: String,
        /// Invalidation envelope array literal.
        pub envelope: String,
    }

    impl TemplateVars for EndpointVars {
        fn apply(&self, content: &str) -> String {
            content
                .replace("__INVALIDATED_PARAM__", &self.invalidated_param)
                .replace("__NODE_TABLE__", &self.node_table)
                .replace("__ENVELOPE__", &self.envelope)
                .replace("__CALLS__", &self.calls)
                .replace("__INCLUDES__", &self.includes)
        }
    }

    /// Data endpoint script, one per page with loaders.
    pub const ENDPOINT_PHP: Template<EndpointVars> =
        Template::new(include_str!("php/endpoint.php"));

    /// Variables for load_call.php template.
    pub struct LoadCallVars {
        /// Quoted function name for `function_exists`.
        pub name_literal: String,
        pub function: String,
        pub args: String,
        pub entry: String,
    }

    impl TemplateVars for LoadCallVars {
        fn apply(&self, content: &str) -> String {
            content
                .replace("__LOADER_NAME__", &self.name_literal)
                .replace("__LOADER__", &self.function)
                .replace("__ENTRY__", &self.entry)
                .replace("__ARGS__", &self.args)
        }
    }

    /// Guarded invocation of one loader.
    pub const LOAD_CALL_PHP: Template<LoadCallVars> =
        Template::new(include_str!("php/load_call.php"));

}
