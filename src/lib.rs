//! plotgfa - plot GFA assembly graphs
//!
//! Reads a GFA file written by an assembler such as Canu and builds a directed
//! graph in which every segment is split into a start and an end node. Links
//! attach to the endpoint selected by their strands. The graph is then laid out,
//! drawn to a PNG and exported as GML.
//!
//! # Example
//!
//! ```no_run
//! use plotgfa::builder::GraphBuilder;
//! use plotgfa::visualize::Visualizer;
//!
//! // Parse a GFA file (and its `.layout.tigInfo` table, if present)
//! let graph = GraphBuilder::read_all("asm.contigs.gfa").unwrap();
//! println!("{}", graph.summary());
//!
//! // Write asm.contigs.gfa.png and asm.contigs.gfa.gml
//! Visualizer::default().visualize(&graph, "asm.contigs.gfa").unwrap();
//! ```

pub mod attrs;
pub mod builder;
pub mod cli;
pub mod error;
pub mod features;
pub mod font;
pub mod gml;
pub mod graph;
pub mod layout;
pub mod render;
pub mod tig;
pub mod visualize;

pub use attrs::{AttrValue, Attributes};
pub use builder::GraphBuilder;
pub use error::{PlotGfaError, Result};
pub use graph::AssemblyGraph;
pub use tig::normalize;
pub use visualize::Visualizer;
