//! GFA reader building the assembly graph
//!
//! Only segment (`S`) and edge (`E`/`L`) records contribute to the graph. Headers
//! and every other record type (fragments, gaps, paths, groups, comments) are
//! skipped.

use crate::attrs::{AttrValue, Attributes};
use crate::error::{PlotGfaError, Result};
use crate::features::FeatureTable;
use crate::graph::AssemblyGraph;
use crate::tig::{self, Strand};
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const LINK_WEIGHT: i64 = 2;
const LINK_COLOR: &str = "green";

/// Builds an [`AssemblyGraph`] from GFA records
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: AssemblyGraph,
    features: Option<FeatureTable>,
}

impl GraphBuilder {
    /// Builder without a feature table; nodes only get the default attributes
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder enriching nodes from `features`
    pub fn with_features(features: Option<FeatureTable>) -> Self {
        Self {
            graph: AssemblyGraph::new(),
            features,
        }
    }

    /// Builder for `path`, picking up its sibling feature table if one exists
    pub fn for_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::with_features(FeatureTable::for_gfa(path)?))
    }

    /// Read the GFA file at `path` and return the finished graph
    pub fn read_all<P: AsRef<Path>>(path: P) -> Result<AssemblyGraph> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PlotGfaError::FileNotFound(path.display().to_string()));
        }

        let mut builder = Self::for_file(path)?;
        let file = File::open(path)?;
        builder.parse(BufReader::new(file))?;
        Ok(builder.finish())
    }

    /// Process every record of a GFA stream
    pub fn parse<R: BufRead>(&mut self, reader: R) -> Result<()> {
        for (line_num, line_result) in reader.lines().enumerate() {
            let line = line_result?;
            self.process_line(&line, line_num + 1)?;
        }
        debug!(
            "parsed {} nodes and {} edges",
            self.graph.node_count(),
            self.graph.edge_count()
        );
        Ok(())
    }

    /// Dispatch a single GFA line on its record tag
    pub fn process_line(&mut self, line: &str, line_num: usize) -> Result<()> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            return Ok(());
        }

        let fields: Vec<&str> = line.split('\t').collect();
        match fields[0] {
            "H" => Ok(()),
            "S" => self.add_segment(&fields, line_num),
            "E" | "L" => self.add_link(&fields, line_num),
            _ => Ok(()),
        }
    }

    /// `S <name> ...`: two endpoint nodes joined by an intra-segment edge
    pub fn add_segment(&mut self, fields: &[&str], line: usize) -> Result<()> {
        if fields.len() < 2 {
            return Err(PlotGfaError::GfaParse {
                line,
                message: "Segment record requires at least 2 fields".to_string(),
            });
        }

        let segment = fields[1];
        let start = tig::start_node(segment);
        let end = tig::end_node(segment);
        let tig_id = tig::normalize(&start);

        self.graph.ensure_node(&start);
        self.graph.ensure_node(&end);

        self.annotate(&start, &tig_id, '+');
        let feats = self.annotate(&end, &tig_id, '-');

        self.graph.add_edge(&start, &end, feats);
        Ok(())
    }

    /// Set the identifiers and features of one endpoint node and return the
    /// features that were merged in.
    fn annotate(&mut self, name: &str, tig_id: &str, side: char) -> Attributes {
        let feats = FeatureTable::enrich(self.features.as_ref(), tig_id);
        if let Some(node) = self.graph.node_mut(name) {
            node.attrs
                .insert("tigID".to_string(), AttrValue::from(tig_id));
            node.attrs
                .insert("eTigID".to_string(), AttrValue::Str(format!("{}{}", tig_id, side)));
            node.attrs.extend(feats.clone());
        }
        feats
    }

    /// `E|L <origin> <strand> <dest> <strand> <cigar> ...`: a link between the
    /// endpoints selected by each strand
    pub fn add_link(&mut self, fields: &[&str], line: usize) -> Result<()> {
        if fields.len() < 6 {
            return Err(PlotGfaError::GfaParse {
                line,
                message: "Link record requires at least 6 fields".to_string(),
            });
        }

        let origin = fields[1];
        let origin_strand = fields[2];
        let dest = fields[3];
        let dest_strand = fields[4];

        let mut feats = Attributes::new();
        feats.insert("orginStrand".to_string(), AttrValue::from(origin_strand));
        feats.insert("destStrand".to_string(), AttrValue::from(dest_strand));
        feats.insert("cigar".to_string(), AttrValue::from(fields[5]));
        feats.insert("orginID".to_string(), AttrValue::Str(tig::normalize(origin)));
        feats.insert("destID".to_string(), AttrValue::Str(tig::normalize(dest)));
        feats.insert("weight".to_string(), AttrValue::Int(LINK_WEIGHT));
        feats.insert("color".to_string(), AttrValue::from(LINK_COLOR));

        let from = tig::origin_node(origin, Strand::parse(origin_strand));
        let to = tig::dest_node(dest, Strand::parse(dest_strand));
        self.graph.add_edge(&from, &to, feats);
        Ok(())
    }

    /// Hand over the finished graph
    pub fn finish(self) -> AssemblyGraph {
        self.graph
    }
}
