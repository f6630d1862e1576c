//! Decompose a datastream collection into standalone component files.
//!
//! The walk starts at the selected datastream's `checklists` container,
//! dumps each referenced component to the relative path its ref names,
//! and then follows the ref's catalog (if any) to dump dependent
//! components into a subdirectory rooted at the parent file's
//! directory. Catalog entries point at component-refs, not components,
//! so the walk is a graph traversal; the current path of ref ids is
//! tracked to turn cycles into per-entry problems instead of unbounded
//! recursion.

use std::fs;
use std::path::Path;

use sds_xml::{Document, NodeId};

use crate::locate::{find_component, find_component_ref};
use crate::paths::{ensure_directory_path, split_dir_and_base};
use crate::report::{ProblemKind, Report};
use crate::{Error, Result};

/// The destination filename and the component to dump, parsed once per
/// component-ref from its `href`.
///
/// A ref's `href` carries both meanings at the top level: the text
/// after the leading `#` names the sibling `component` to resolve *and*
/// serves as the default relative output path.
struct RefTarget {
    component_id: String,
    dest: String,
}

fn ref_target(doc: &Document, component_ref: NodeId) -> Option<RefTarget> {
    let href = doc.attribute(component_ref, "href")?;
    if href.len() < 2 || !href.starts_with('#') {
        return None;
    }
    let id = &href[1..];
    Some(RefTarget {
        component_id: id.to_string(),
        dest: id.to_string(),
    })
}

/// Split a datastream collection into a tree of standalone files under
/// `target_dir`.
///
/// With `datastream_id` given, the first `data-stream` with that id is
/// selected; otherwise the first one in document order. An empty
/// `target_dir` means the current directory.
///
/// Returns a [`Report`] of files written and per-ref problems; only the
/// conditions listed on [`Error`] abort the whole call.
pub fn decompose(
    input_file: impl AsRef<Path>,
    datastream_id: Option<&str>,
    target_dir: &str,
) -> Result<Report> {
    let text = fs::read_to_string(input_file)?;
    let doc = Document::parse(&text)?;

    let datastream =
        select_datastream(&doc, datastream_id).ok_or_else(|| Error::DatastreamNotFound {
            id: datastream_id.map(String::from),
        })?;

    let checklists = doc
        .child_named(datastream, "checklists")
        .ok_or(Error::MissingChecklists)?;

    let target_dir = if target_dir.is_empty() { "." } else { target_dir };

    let mut report = Report::default();
    let mut walk_path = Vec::new();

    for component_ref in doc.children(checklists) {
        if doc.local_name(component_ref) != "component-ref" {
            continue;
        }
        dump_component_ref(
            &doc,
            datastream,
            component_ref,
            target_dir,
            &mut walk_path,
            &mut report,
        )?;
    }

    Ok(report)
}

fn select_datastream(doc: &Document, id: Option<&str>) -> Option<NodeId> {
    doc.children(doc.root()).find(|&candidate| {
        doc.local_name(candidate) == "data-stream"
            && match id {
                None => true,
                Some(want) => doc.attribute(candidate, "id") == Some(want),
            }
    })
}

/// Dump one top-level component-ref, using the path its `href` names as
/// the destination relative to `target_dir`.
fn dump_component_ref(
    doc: &Document,
    datastream: NodeId,
    component_ref: NodeId,
    target_dir: &str,
    walk_path: &mut Vec<String>,
    report: &mut Report,
) -> Result<()> {
    let Some(target) = ref_target(doc, component_ref) else {
        report.problem(ref_label(doc, component_ref), ProblemKind::MissingHref);
        return Ok(());
    };
    let dest = target.dest;
    dump_component_ref_as(doc, datastream, component_ref, target_dir, &dest, walk_path, report)
}

/// Dump a component-ref to `filename` (relative to `target_dir`), then
/// recurse into its catalog with the file's directory as the new root.
fn dump_component_ref_as(
    doc: &Document,
    datastream: NodeId,
    component_ref: NodeId,
    target_dir: &str,
    filename: &str,
    walk_path: &mut Vec<String>,
    report: &mut Report,
) -> Result<()> {
    if doc.attribute(component_ref, "id").is_none() {
        // Validated but not otherwise needed: the component id comes
        // from href, so the dump proceeds anyway.
        report.problem(filename, ProblemKind::MissingRefId);
    }

    let Some(target) = ref_target(doc, component_ref) else {
        report.problem(ref_label(doc, component_ref), ProblemKind::MissingHref);
        return Ok(());
    };

    let key = doc
        .attribute(component_ref, "id")
        .unwrap_or(&target.component_id)
        .to_string();
    if walk_path.contains(&key) {
        report.problem(key, ProblemKind::CatalogCycle);
        return Ok(());
    }
    walk_path.push(key);

    // Prefixing "./" makes a bare filename split into dir "." + name.
    let (file_reldir, file_basename) = split_dir_and_base(&format!("./{filename}"));
    let dump_dir = format!("{target_dir}/{file_reldir}");
    ensure_directory_path(&dump_dir)?;

    dump_component(
        doc,
        &target.component_id,
        &format!("{dump_dir}/{file_basename}"),
        report,
    )?;

    if let Some(catalog) = doc.child_named(component_ref, "catalog") {
        for entry in doc.children(catalog) {
            if doc.local_name(entry) != "uri" {
                continue;
            }

            let Some(name) = doc.attribute(entry, "name") else {
                report.problem(walk_path.last().cloned().unwrap_or_default(), ProblemKind::MissingCatalogName);
                continue;
            };

            let ref_id = match doc.attribute(entry, "uri") {
                Some(uri) if uri.len() >= 2 && uri.starts_with('#') => &uri[1..],
                _ => {
                    report.problem(name, ProblemKind::MissingCatalogUri);
                    continue;
                }
            };

            let Some(catalog_ref) = find_component_ref(doc, datastream, ref_id) else {
                report.problem(ref_id, ProblemKind::UnresolvedCatalogRef);
                continue;
            };

            dump_component_ref_as(doc, datastream, catalog_ref, &dump_dir, name, walk_path, report)?;
        }
    }

    walk_path.pop();
    Ok(())
}

/// Locate the component with `component_id`, deep-clone its payload
/// subtree into a fresh document (namespaces reconciled), and serialize
/// it to `dest`.
///
/// Missing component and missing payload are recoverable and recorded
/// on `report`; the source document is never modified.
pub fn dump_component(
    doc: &Document,
    component_id: &str,
    dest: &str,
    report: &mut Report,
) -> Result<()> {
    let Some(component) = find_component(doc, component_id) else {
        report.problem(component_id, ProblemKind::ComponentNotFound);
        return Ok(());
    };

    let Some(inner_root) = doc.children(component).next() else {
        report.problem(component_id, ProblemKind::EmptyComponent);
        return Ok(());
    };

    let extracted = doc.extract_subtree(inner_root);
    extracted.write_to(dest)?;
    report.files_written += 1;

    Ok(())
}

fn ref_label(doc: &Document, component_ref: NodeId) -> String {
    doc.attribute(component_ref, "id")
        .unwrap_or("<component-ref without id>")
        .to_string()
}
