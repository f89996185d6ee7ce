//! Client data protocol.
//!
//! The client runtime reads two shapes from a data endpoint:
//!
//! ```text
//! initial load    [{"type":"data","data":{..}}, ...]              one entry per truthy loader
//! invalidation    {"type":"data","nodes":[{"type":"data","data":<node table>,"uses":[]}]}
//! ```
//!
//! Both are modelled here once. `serde` gives the JSON shape, [`ToPhp`]
//! renders the same structures as PHP array literals for the generated
//! endpoint, so field names cannot drift between the two.

use serde::Serialize;

use crate::core::NavPath;

pub const FIELD_TYPE: &str = "type";
pub const FIELD_DATA: &str = "data";
pub const FIELD_NODES: &str = "nodes";
pub const FIELD_USES: &str = "uses";
pub const FIELD_ROUTE_ID: &str = "routeid";
pub const FIELD_PARENT_DATA: &str = "parentdata";

/// Query parameter the client adds when re-fetching data.
pub const INVALIDATED_PARAM: &str = "x-sveltekit-invalidated";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Data,
}

impl NodeType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Data => "data",
        }
    }
}

/// `{type: "data", data}`, one per loader that returned something.
#[derive(Debug, Clone, Serialize)]
pub struct DataEntry<T> {
    #[serde(rename = "type")]
    pub kind: NodeType,
    pub data: T,
}

impl<T> DataEntry<T> {
    pub fn new(data: T) -> Self {
        Self {
            kind: NodeType::Data,
            data,
        }
    }
}

/// `{type: "data", data, uses: []}`
#[derive(Debug, Clone, Serialize)]
pub struct DataNode<T> {
    #[serde(rename = "type")]
    pub kind: NodeType,
    pub data: T,
    pub uses: Vec<String>,
}

impl<T> DataNode<T> {
    pub fn new(data: T) -> Self {
        Self {
            kind: NodeType::Data,
            data,
            uses: Vec::new(),
        }
    }
}

/// Response body of an invalidation request.
#[derive(Debug, Clone, Serialize)]
pub struct InvalidationEnvelope<T> {
    #[serde(rename = "type")]
    pub kind: NodeType,
    pub nodes: Vec<DataNode<T>>,
}

impl<T> InvalidationEnvelope<T> {
    /// Envelope around a single node.
    pub fn single(data: T) -> Self {
        Self {
            kind: NodeType::Data,
            nodes: vec![DataNode::new(data)],
        }
    }
}

/// Argument array passed to every loader.
#[derive(Debug, Clone, Serialize)]
pub struct LoadArgs<'a> {
    pub routeid: &'a NavPath,
    pub parentdata: PhpVar,
}

/// Flattened result: the first element maps each key to the 1-based
/// position of its value, the values follow in key order.
///
/// `{a: 1, b: 2}` becomes `[{"a": 1, "b": 2}, 1, 2]`; a falsy result
/// becomes `[[]]`. The table only exists at request time, built by the
/// statements from [`NodeTable::render_php`].
pub struct NodeTable;

impl NodeTable {
    /// PHP statements building the table from `result` into `table`.
    ///
    /// A falsy `result` yields `[[]]`.
    pub fn render_php(result: &PhpVar, table: &PhpVar) -> String {
        let table = table.name();
        let counter = format!("{table}_index");
        format!(
            "{table} = [[]];\n\
             {counter} = 0;\n\
             foreach (({result} ?: []) as $key => $value) {{\n    \
                 {table}[0][$key] = ++{counter};\n    \
                 {table}[] = $value;\n\
             }}",
            result = result.name(),
        )
    }
}

// ============================================================================
// PHP rendering
// ============================================================================

/// Render a value as a PHP expression.
pub trait ToPhp {
    fn to_php(&self) -> String;
}

/// A PHP variable reference, rendered verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhpVar(&'static str);

impl PhpVar {
    pub const RES: Self = Self("$res");
    pub const BASE_DATA: Self = Self("$basedata");
    pub const SUB_RES: Self = Self("$subres");
    pub const JSON_RESULT: Self = Self("$json_data_result");
    pub const NODES: Self = Self("$new_res_nodes");

    pub const fn name(&self) -> &'static str {
        self.0
    }
}

impl Serialize for PhpVar {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0)
    }
}

impl ToPhp for PhpVar {
    fn to_php(&self) -> String {
        self.0.to_string()
    }
}

impl ToPhp for str {
    fn to_php(&self) -> String {
        php_string(self)
    }
}

impl ToPhp for NavPath {
    fn to_php(&self) -> String {
        php_string(self.as_str())
    }
}

impl ToPhp for NodeType {
    fn to_php(&self) -> String {
        php_string(self.as_str())
    }
}

impl<T: ToPhp> ToPhp for DataEntry<T> {
    fn to_php(&self) -> String {
        php_array(&[(FIELD_TYPE, self.kind.to_php()), (FIELD_DATA, self.data.to_php())])
    }
}

impl<T: ToPhp> ToPhp for DataNode<T> {
    fn to_php(&self) -> String {
        let uses = format!(
            "[{}]",
            self.uses.iter().map(|u| php_string(u)).collect::<Vec<_>>().join(", ")
        );
        php_array(&[
            (FIELD_TYPE, self.kind.to_php()),
            (FIELD_DATA, self.data.to_php()),
            (FIELD_USES, uses),
        ])
    }
}

impl<T: ToPhp> ToPhp for InvalidationEnvelope<T> {
    fn to_php(&self) -> String {
        let nodes = format!(
            "[{}]",
            self.nodes.iter().map(ToPhp::to_php).collect::<Vec<_>>().join(", ")
        );
        php_array(&[(FIELD_TYPE, self.kind.to_php()), (FIELD_NODES, nodes)])
    }
}

impl ToPhp for LoadArgs<'_> {
    fn to_php(&self) -> String {
        php_array(&[
            (FIELD_ROUTE_ID, self.routeid.to_php()),
            (FIELD_PARENT_DATA, self.parentdata.to_php()),
        ])
    }
}

/// `["k" => v, ...]`
fn php_array(fields: &[(&str, String)]) -> String {
    let body = fields
        .iter()
        .map(|(key, value)| format!("{} => {value}", php_string(key)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{body}]")
}

/// Double-quoted PHP string literal.
pub fn php_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
