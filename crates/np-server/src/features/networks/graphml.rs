//! Undirected graph of genes, regulators, biclusters and motifs, written as GraphML

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::collections::HashSet;

const GRAPHML_NS: &str = "http://graphml.graphdrawing.org/xmlns";

#[derive(Debug, thiserror::Error)]
#[error("Failed to write GraphML: {0}")]
pub struct GraphmlError(String);

#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Text(String),
    Number(f64),
    Flag(bool),
}

impl AttrValue {
    fn render(&self) -> String {
        match self {
            AttrValue::Text(s) => s.clone(),
            AttrValue::Number(n) => n.to_string(),
            AttrValue::Flag(b) => b.to_string(),
        }
    }
}

/// GraphML `<key>` declarations: (id, domain, attr.name, attr.type)
const KEYS: [(&str, &str, &str, &str); 6] = [
    ("type", "node", "type", "string"),
    ("name", "node", "name", "string"),
    ("consensus", "node", "consensus", "string"),
    ("e_value", "node", "e_value", "double"),
    ("expanded", "node", "expanded", "boolean"),
    ("edge_expanded", "edge", "expanded", "boolean"),
];

#[derive(Debug, Clone)]
struct Node {
    id: String,
    attrs: Vec<(&'static str, AttrValue)>,
}

#[derive(Debug, Clone)]
struct Edge {
    source: String,
    target: String,
    expanded: bool,
}

/// Nodes keep insertion order; adding a node id twice keeps the first one.
/// Edges are undirected and deduplicated.
#[derive(Debug, Default)]
pub struct NetworkGraph {
    nodes: Vec<Node>,
    node_ids: HashSet<String>,
    edges: Vec<Edge>,
    edge_keys: HashSet<(String, String)>,
}

impl NetworkGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node_ids.contains(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn add_node(&mut self, id: impl Into<String>, attrs: Vec<(&'static str, AttrValue)>) {
        let id = id.into();
        if self.node_ids.insert(id.clone()) {
            self.nodes.push(Node { id, attrs });
        }
    }

    pub fn add_edge(&mut self, source: impl Into<String>, target: impl Into<String>, expanded: bool) {
        let (source, target) = (source.into(), target.into());
        let key = if source <= target {
            (source.clone(), target.clone())
        } else {
            (target.clone(), source.clone())
        };
        if self.edge_keys.insert(key) {
            self.edges.push(Edge {
                source,
                target,
                expanded,
            });
        }
    }

    pub fn to_graphml(&self) -> Result<String, GraphmlError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        write(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        write(
            &mut writer,
            Event::Start(BytesStart::new("graphml").with_attributes([("xmlns", GRAPHML_NS)])),
        )?;

        for (id, domain, name, kind) in KEYS {
            write(
                &mut writer,
                Event::Empty(BytesStart::new("key").with_attributes([
                    ("id", id),
                    ("for", domain),
                    ("attr.name", name),
                    ("attr.type", kind),
                ])),
            )?;
        }

        write(
            &mut writer,
            Event::Start(BytesStart::new("graph").with_attributes([("edgedefault", "undirected")])),
        )?;

        for node in &self.nodes {
            write(
                &mut writer,
                Event::Start(BytesStart::new("node").with_attributes([("id", node.id.as_str())])),
            )?;
            for (key, value) in &node.attrs {
                write_data(&mut writer, key, &value.render())?;
            }
            write(&mut writer, Event::End(BytesEnd::new("node")))?;
        }

        for edge in &self.edges {
            let start = BytesStart::new("edge").with_attributes([
                ("source", edge.source.as_str()),
                ("target", edge.target.as_str()),
            ]);
            if edge.expanded {
                write(&mut writer, Event::Start(start))?;
                write_data(&mut writer, "edge_expanded", "true")?;
                write(&mut writer, Event::End(BytesEnd::new("edge")))?;
            } else {
                write(&mut writer, Event::Empty(start))?;
            }
        }

        write(&mut writer, Event::End(BytesEnd::new("graph")))?;
        write(&mut writer, Event::End(BytesEnd::new("graphml")))?;

        String::from_utf8(writer.into_inner()).map_err(|e| GraphmlError(e.to_string()))
    }
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), GraphmlError> {
    writer
        .write_event(event)
        .map_err(|e| GraphmlError(e.to_string()))
}

fn write_data(writer: &mut Writer<Vec<u8>>, key: &str, value: &str) -> Result<(), GraphmlError> {
    write(writer, Event::Start(BytesStart::new("data").with_attributes([("key", key)])))?;
    write(writer, Event::Text(BytesText::new(value)))?;
    write(writer, Event::End(BytesEnd::new("data")))
}
