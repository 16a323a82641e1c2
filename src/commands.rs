//! CLI command implementations

use std::collections::{BTreeMap, HashSet};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context;
use trellis_core::{Diagram, ResourceId, Shape};
use trellis_xpdl::XpdlPackage;

use crate::config::Config;

fn load_diagram(input: &Path) -> anyhow::Result<Diagram> {
    let json = std::fs::read_to_string(input)
        .with_context(|| format!("Cannot read diagram {}", input.display()))?;
    let diagram = trellis_json::parse_diagram(&json)
        .with_context(|| format!("Cannot import diagram {}", input.display()))?;
    tracing::info!("Loaded {} shapes from {}", diagram.len(), input.display());
    Ok(diagram)
}

/// Convert an editor JSON diagram into an XPDL document.
pub fn convert(input: PathBuf, output: Option<PathBuf>, config: &Config) -> anyhow::Result<()> {
    let diagram = load_diagram(&input)?;

    let package = XpdlPackage::from_diagram(&diagram, &config.export_options())
        .context("Cannot export diagram to XPDL")?;
    let xml = trellis_xpdl::write_package(&package)?;

    match output {
        Some(path) => {
            std::fs::write(&path, &xml)
                .with_context(|| format!("Cannot write {}", path.display()))?;
            tracing::info!("Wrote XPDL package {} to {}", package.id, path.display());
        }
        None => println!("{}", xml),
    }
    Ok(())
}

/// Print a summary of a diagram: shape count, stencil usage and containment tree.
pub fn inspect(input: PathBuf) -> anyhow::Result<()> {
    let diagram = load_diagram(&input)?;
    print!("{}", summarize(&diagram));
    Ok(())
}

pub(crate) fn summarize(diagram: &Diagram) -> String {
    let mut out = String::new();

    let edges: usize = diagram.shapes().map(|s| s.outgoings().len()).sum();
    let _ = writeln!(out, "Diagram {}", diagram.root_id());
    if let Some(stencil_set) = diagram.stencil_set() {
        let _ = writeln!(out, "Stencil set: {}", stencil_set.namespace);
    }
    let _ = writeln!(out, "Shapes: {}", diagram.len());
    let _ = writeln!(out, "Edges: {}", edges);

    let mut stencils: BTreeMap<&str, usize> = BTreeMap::new();
    for shape in diagram.shapes() {
        *stencils.entry(shape.stencil_id().unwrap_or("<none>")).or_insert(0) += 1;
    }
    let _ = writeln!(out, "Stencils:");
    for (stencil, count) in &stencils {
        let _ = writeln!(out, "  {:<32} {}", stencil, count);
    }

    let _ = writeln!(out, "Containment:");
    let mut visited: HashSet<&ResourceId> = HashSet::new();
    let mut stack = vec![(diagram.root(), 1usize)];
    while let Some((shape, depth)) = stack.pop() {
        if !visited.insert(shape.resource_id()) {
            continue;
        }
        let _ = writeln!(out, "{}{}", "  ".repeat(depth), describe(shape));
        let children = diagram.children_of(shape.resource_id().as_str());
        stack.extend(children.into_iter().rev().map(|c| (c, depth + 1)));
    }

    out
}

fn describe(shape: &Shape) -> String {
    let mut line = shape.resource_id().to_string();
    if let Some(stencil) = shape.stencil_id() {
        let _ = write!(line, " [{}]", stencil);
    }
    if let Some(name) = shape.property("name").filter(|n| !n.is_empty()) {
        let _ = write!(line, " \"{}\"", name);
    }
    if let (Ok(width), Ok(height)) = (shape.width(), shape.height()) {
        let _ = write!(line, " {}x{}", width, height);
    }
    line
}
