//! Serializable report views and the section renderers shared by commands.
//!
//! Views are plain data built from library results; JSON output serializes
//! them as-is. Pretty renderers honor [`ReportConfig`] (member listing, path
//! listing, truncation). Text renderers always emit every row, one
//! tab-separated record per line, first column naming the record kind.

use std::io::{self, Write};

use sccdag_core::{Graph, PathKind, PathResult, SccResult, expand_order};
use sccdag_load::LoadedGraph;
use serde::Serialize;

use crate::config::ReportConfig;
use crate::output::{pretty_kv, pretty_section};

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// Header facts about the loaded graph.
#[derive(Debug, Clone, Serialize)]
pub struct GraphSummary {
    pub n: usize,
    pub edges: usize,
    pub directed: bool,
    pub source: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_model: Option<String>,
}

impl GraphSummary {
    #[must_use]
    pub fn of(loaded: &LoadedGraph) -> Self {
        Self {
            n: loaded.graph.n(),
            edges: loaded.edge_records,
            directed: loaded.graph.is_directed(),
            source: loaded.source,
            weight_model: loaded.weight_model.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ComponentView {
    pub id: usize,
    pub size: usize,
    pub members: Vec<usize>,
}

/// One view per component, in component-index order.
#[must_use]
pub fn component_views(scc: &SccResult) -> Vec<ComponentView> {
    scc.components
        .iter()
        .enumerate()
        .map(|(id, members)| ComponentView {
            id,
            size: members.len(),
            members: members.clone(),
        })
        .collect()
}

/// A condensation edge between component indices.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EdgeView {
    pub from: usize,
    pub to: usize,
    pub weight: i32,
}

#[must_use]
pub fn edge_views(dag: &Graph) -> Vec<EdgeView> {
    dag.edges()
        .map(|(from, to, weight)| EdgeView { from, to, weight })
        .collect()
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct DistanceView {
    pub component: usize,
    /// `null` when the component is unreachable from the source.
    pub distance: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PathView {
    pub target: usize,
    pub distance: i64,
    pub components: Vec<usize>,
    pub vertices: Vec<usize>,
}

/// Distances and paths from one solver run over the condensation.
#[derive(Debug, Clone, Serialize)]
pub struct PathsView {
    pub kind: PathKind,
    pub source_component: usize,
    pub reached: usize,
    pub distances: Vec<DistanceView>,
    pub paths: Vec<PathView>,
}

/// Build a [`PathsView`]. With `target` set only that component's path is
/// listed (none if it is unreached); otherwise every reached component's.
#[must_use]
pub fn paths_view(result: &PathResult, scc: &SccResult, target: Option<usize>) -> PathsView {
    let distances = result
        .dist
        .iter()
        .enumerate()
        .map(|(component, &distance)| DistanceView {
            component,
            distance,
        })
        .collect();

    let targets: Vec<usize> = match target {
        Some(t) => vec![t],
        None => (0..result.dist.len()).collect(),
    };
    let paths = targets
        .into_iter()
        .filter_map(|t| {
            let distance = result.distance(t)?;
            let components = result.path_to(t)?;
            let vertices = expand_order(&components, scc);
            Some(PathView {
                target: t,
                distance,
                components,
                vertices,
            })
        })
        .collect();

    PathsView {
        kind: result.kind,
        source_component: result.source,
        reached: result.reached_count(),
        distances,
        paths,
    }
}

/// The longest path from the source component and its length.
#[derive(Debug, Clone, Serialize)]
pub struct CriticalView {
    pub target: usize,
    pub length: i64,
    pub components: Vec<usize>,
    pub vertices: Vec<usize>,
}

/// Critical path of a longest-path result, `None` for an empty graph.
#[must_use]
pub fn critical_view(longest: &PathResult, scc: &SccResult) -> Option<CriticalView> {
    let (target, length) = longest.critical_target()?;
    let components = longest.reconstruct_path(target);
    let vertices = expand_order(&components, scc);
    Some(CriticalView {
        target,
        length,
        components,
        vertices,
    })
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// `[1, 2, 3]`
#[must_use]
pub fn bracketed(items: &[usize]) -> String {
    let inner: Vec<String> = items.iter().map(ToString::to_string).collect();
    format!("[{}]", inner.join(", "))
}

/// `1,2,3` for text rows.
#[must_use]
pub fn csv(items: &[usize]) -> String {
    let inner: Vec<String> = items.iter().map(ToString::to_string).collect();
    inner.join(",")
}

/// `C0 -> C2 -> C3`
#[must_use]
pub fn component_chain(components: &[usize]) -> String {
    let inner: Vec<String> = components.iter().map(|c| format!("C{c}")).collect();
    inner.join(" -> ")
}

#[must_use]
pub fn distance_label(distance: Option<i64>) -> String {
    distance.map_or_else(|| "INF".to_string(), |d| d.to_string())
}

const fn kind_label(kind: PathKind) -> &'static str {
    match kind {
        PathKind::Shortest => "shortest",
        PathKind::Longest => "longest",
    }
}

fn write_more(w: &mut dyn Write, rest: usize) -> io::Result<()> {
    if rest > 0 {
        writeln!(w, "  ... {rest} more")?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Pretty sections
// ---------------------------------------------------------------------------

pub fn pretty_graph(w: &mut dyn Write, graph: &GraphSummary) -> io::Result<()> {
    pretty_section(w, "Graph")?;
    pretty_kv(w, "vertices", graph.n.to_string())?;
    pretty_kv(w, "edges", graph.edges.to_string())?;
    pretty_kv(w, "directed", graph.directed.to_string())?;
    pretty_kv(w, "source", graph.source.to_string())?;
    pretty_kv(
        w,
        "weight model",
        graph.weight_model.as_deref().unwrap_or("unspecified"),
    )
}

pub fn pretty_components(
    w: &mut dyn Write,
    components: &[ComponentView],
    cfg: &ReportConfig,
) -> io::Result<()> {
    writeln!(w)?;
    pretty_section(
        w,
        &format!("Strongly connected components ({})", components.len()),
    )?;
    let (listed, rest) = cfg.limit(components);
    for c in listed {
        if cfg.show_members {
            writeln!(w, "C{} (size={}): {}", c.id, c.size, bracketed(&c.members))?;
        } else {
            writeln!(w, "C{} (size={})", c.id, c.size)?;
        }
    }
    write_more(w, rest)
}

pub fn pretty_condensation(
    w: &mut dyn Write,
    edges: &[EdgeView],
    cfg: &ReportConfig,
) -> io::Result<()> {
    writeln!(w)?;
    pretty_section(w, &format!("Condensation DAG ({} edges)", edges.len()))?;
    if edges.is_empty() {
        return writeln!(w, "(no edges between components)");
    }
    let (listed, rest) = cfg.limit(edges);
    for e in listed {
        writeln!(w, "C{} -> C{}(w={})", e.from, e.to, e.weight)?;
    }
    write_more(w, rest)
}

pub fn pretty_order(
    w: &mut dyn Write,
    component_order: &[usize],
    vertex_order: &[usize],
    components: &[ComponentView],
    cfg: &ReportConfig,
) -> io::Result<()> {
    writeln!(w)?;
    pretty_section(w, "Topological order of components")?;
    writeln!(w, "{}", bracketed(component_order))?;
    writeln!(w)?;
    writeln!(w, "Derived order of original vertices:")?;
    writeln!(w, "{}", bracketed(vertex_order))?;
    if cfg.show_members {
        let (listed, rest) = cfg.limit(component_order);
        for &c in listed {
            if let Some(view) = components.get(c) {
                writeln!(w, "  C{c} -> {}", bracketed(&view.members))?;
            }
        }
        write_more(w, rest)?;
    }
    Ok(())
}

pub fn pretty_paths(w: &mut dyn Write, view: &PathsView, cfg: &ReportConfig) -> io::Result<()> {
    writeln!(w)?;
    pretty_section(
        w,
        &format!(
            "{} paths from C{} ({} of {} components reached)",
            match view.kind {
                PathKind::Shortest => "Shortest",
                PathKind::Longest => "Longest",
            },
            view.source_component,
            view.reached,
            view.distances.len()
        ),
    )?;
    let (listed, rest) = cfg.limit(&view.distances);
    for d in listed {
        writeln!(w, "dist[C{}] = {}", d.component, distance_label(d.distance))?;
    }
    write_more(w, rest)?;

    if cfg.show_paths && !view.paths.is_empty() {
        writeln!(w)?;
        let (listed, rest) = cfg.limit(&view.paths);
        for p in listed {
            writeln!(
                w,
                "path to C{} (length {}): {}  vertices {}",
                p.target,
                p.distance,
                component_chain(&p.components),
                bracketed(&p.vertices)
            )?;
        }
        write_more(w, rest)?;
    }
    Ok(())
}

pub fn pretty_critical(w: &mut dyn Write, critical: Option<&CriticalView>) -> io::Result<()> {
    writeln!(w)?;
    pretty_section(w, "Critical path")?;
    match critical {
        Some(c) => {
            pretty_kv(w, "components", component_chain(&c.components))?;
            pretty_kv(w, "vertices", bracketed(&c.vertices))?;
            pretty_kv(w, "length", c.length.to_string())
        }
        None => writeln!(w, "(empty graph)"),
    }
}

// ---------------------------------------------------------------------------
// Text rows
// ---------------------------------------------------------------------------

pub fn text_graph(w: &mut dyn Write, graph: &GraphSummary) -> io::Result<()> {
    writeln!(
        w,
        "graph\tn={}\tedges={}\tdirected={}\tsource={}",
        graph.n, graph.edges, graph.directed, graph.source
    )
}

pub fn text_components(w: &mut dyn Write, components: &[ComponentView]) -> io::Result<()> {
    for c in components {
        writeln!(w, "component\t{}\t{}\t{}", c.id, c.size, csv(&c.members))?;
    }
    Ok(())
}

pub fn text_condensation(w: &mut dyn Write, edges: &[EdgeView]) -> io::Result<()> {
    for e in edges {
        writeln!(w, "edge\t{}\t{}\t{}", e.from, e.to, e.weight)?;
    }
    Ok(())
}

pub fn text_order(w: &mut dyn Write, label: &str, order: &[usize]) -> io::Result<()> {
    writeln!(w, "{label}\t{}", csv(order))
}

pub fn text_paths(w: &mut dyn Write, view: &PathsView) -> io::Result<()> {
    let kind = kind_label(view.kind);
    for d in &view.distances {
        writeln!(
            w,
            "dist\t{kind}\t{}\t{}",
            d.component,
            distance_label(d.distance)
        )?;
    }
    for p in &view.paths {
        writeln!(
            w,
            "path\t{kind}\t{}\t{}\t{}\t{}",
            p.target,
            p.distance,
            csv(&p.components),
            csv(&p.vertices)
        )?;
    }
    Ok(())
}

pub fn text_critical(w: &mut dyn Write, critical: Option<&CriticalView>) -> io::Result<()> {
    if let Some(c) = critical {
        writeln!(
            w,
            "critical\t{}\t{}\t{}",
            c.length,
            csv(&c.components),
            csv(&c.vertices)
        )?;
    }
    Ok(())
}
