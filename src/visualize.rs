//! Layout, drawing and export of a finished graph

use crate::error::Result;
use crate::gml;
use crate::graph::AssemblyGraph;
use crate::layout::{spring_layout, LayoutConfig};
use crate::render::{self, RenderConfig};
use log::info;
use std::path::{Path, PathBuf};

/// Files written next to the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFiles {
    /// `<input>.png`
    pub image: PathBuf,
    /// `<input>.gml`
    pub gml: PathBuf,
}

impl OutputFiles {
    /// Output paths for `input`; the extensions are appended, not substituted
    pub fn for_input<P: AsRef<Path>>(input: P) -> Self {
        let raw = input.as_ref().as_os_str();
        let with = |ext: &str| {
            let mut name = raw.to_os_string();
            name.push(ext);
            PathBuf::from(name)
        };
        Self {
            image: with(".png"),
            gml: with(".gml"),
        }
    }
}

/// Draws a graph and exports it
#[derive(Debug, Clone, Default)]
pub struct Visualizer {
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl Visualizer {
    pub fn new(layout: LayoutConfig, render: RenderConfig) -> Self {
        Self { layout, render }
    }

    /// Lay out `graph`, save it as `<input>.png` and serialize it to
    /// `<input>.gml`
    pub fn visualize<P: AsRef<Path>>(&self, graph: &AssemblyGraph, input: P) -> Result<OutputFiles> {
        let outputs = OutputFiles::for_input(input);

        let positions = spring_layout(graph, &self.layout);
        let img = render::render(graph, &positions, &self.render)?;
        render::save_image(&img, &outputs.image)?;
        info!("Wrote {}", outputs.image.display());

        gml::save_gml(graph, &outputs.gml)?;
        info!("Wrote {}", outputs.gml.display());

        Ok(outputs)
    }
}
