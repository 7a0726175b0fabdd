//! GML export
//!
//! Writes every node and edge together with all of its attributes. Integers are
//! written bare, strings quoted; quotes, ampersands and anything outside
//! printable ASCII are written as `&#NNN;` character references.

use crate::attrs::{AttrValue, Attributes};
use crate::error::Result;
use crate::graph::AssemblyGraph;
use lazy_static::lazy_static;
use log::warn;
use regex::Regex;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

fn valid_key(key: &str) -> bool {
    lazy_static! {
        static ref RE_KEY: Regex = Regex::new(r"^[A-Za-z][0-9A-Za-z_]*$").unwrap();
    }
    RE_KEY.is_match(key)
}

/// Quote and escape a GML string value
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        if c == '"' || c == '&' || !(' '..='~').contains(&c) {
            out.push_str(&format!("&#{};", c as u32));
        } else {
            out.push(c);
        }
    }
    out.push('"');
    out
}

fn write_attrs<W: Write>(out: &mut W, attrs: &Attributes, reserved: &[&str]) -> Result<()> {
    for (key, value) in attrs {
        if !valid_key(key) || reserved.contains(&key.as_str()) {
            warn!("skipping attribute {:?}: not usable as a GML key", key);
            continue;
        }
        match value {
            AttrValue::Int(v) => writeln!(out, "    {} {}", key, v)?,
            AttrValue::Str(s) => writeln!(out, "    {} {}", key, escape(s))?,
        }
    }
    Ok(())
}

/// Write `graph` as GML
pub fn write_gml<W: Write>(graph: &AssemblyGraph, mut out: W) -> Result<()> {
    writeln!(out, "graph [")?;
    writeln!(out, "  directed 1")?;

    for (id, node) in graph.nodes().enumerate() {
        writeln!(out, "  node [")?;
        writeln!(out, "    id {}", id)?;
        writeln!(out, "    label {}", escape(&node.name))?;
        write_attrs(&mut out, &node.attrs, &["id", "label"])?;
        writeln!(out, "  ]")?;
    }

    for (edge, (source, target)) in graph.edges().zip(graph.edge_endpoints()) {
        writeln!(out, "  edge [")?;
        writeln!(out, "    source {}", source)?;
        writeln!(out, "    target {}", target)?;
        write_attrs(&mut out, edge.attrs, &["source", "target"])?;
        writeln!(out, "  ]")?;
    }

    writeln!(out, "]")?;
    out.flush()?;
    Ok(())
}

/// Write `graph` as GML to `path`
pub fn save_gml<P: AsRef<Path>>(graph: &AssemblyGraph, path: P) -> Result<()> {
    let file = File::create(path)?;
    write_gml(graph, BufWriter::new(file))
}
