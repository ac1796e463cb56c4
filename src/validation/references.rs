//! Referential integrity audit
//!
//! Dangling references are legal states of a loaded document. This audit is
//! the explicit check layered on top for callers that need completeness:
//! - references whose Serial names no legal target (after resolution)
//! - linked references whose Serial no longer matches the target (before build)
//! - serials repeated within one kind
//! - serials held by several kinds that one multi-kind reference can target
//! - cycles in the organisation parent hierarchy

use petgraph::algo::tarjan_scc;
use petgraph::{Directed, Graph};
use serde::Serialize;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::{debug, warn};

use crate::models::{Document, DuplicateSerial, EntityKind};
use crate::reference::{DanglingReference, Serial, TargetSerial};

/// A linked reference whose raw Serial differs from its target's Serial
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaleReference {
    pub owner_kind: EntityKind,
    pub owner_serial: Option<Serial>,
    pub field: &'static str,
    pub raw: Option<Serial>,
    pub target: Option<Serial>,
}

/// A Serial that resolves differently depending on kind priority
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmbiguousReference {
    pub owner_kind: EntityKind,
    pub owner_serial: Option<Serial>,
    pub field: &'static str,
    pub serial: Serial,
    /// Legal target kinds holding the Serial, in lookup priority order
    pub candidates: Vec<EntityKind>,
}

/// Result of a reference audit
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceAuditResult {
    pub dangling: Vec<DanglingReference>,
    pub stale: Vec<StaleReference>,
    pub duplicate_serials: Vec<DuplicateSerial>,
    pub ambiguous: Vec<AmbiguousReference>,
    /// Each cycle as the serials of the organisations on it
    pub hierarchy_cycles: Vec<Vec<Option<Serial>>>,
    /// Entities without a serial
    pub unidentified: usize,
}

impl ReferenceAuditResult {
    pub fn is_valid(&self) -> bool {
        self.dangling.is_empty()
            && self.stale.is_empty()
            && self.duplicate_serials.is_empty()
            && self.ambiguous.is_empty()
            && self.hierarchy_cycles.is_empty()
    }

    pub fn issue_count(&self) -> usize {
        self.dangling.len()
            + self.stale.len()
            + self.duplicate_serials.len()
            + self.ambiguous.len()
            + self.hierarchy_cycles.len()
    }
}

/// Reference validator
#[derive(Debug, Default)]
pub struct ReferenceValidator;

impl ReferenceValidator {
    pub fn new() -> Self {
        Self
    }

    /// Audit a document. Dangling references are only meaningful after the
    /// resolution pass has run.
    pub fn audit(&self, document: &Document) -> ReferenceAuditResult {
        let index = document.index();
        let mut result = ReferenceAuditResult {
            duplicate_serials: index.duplicates().to_vec(),
            unidentified: index.unidentified(),
            ..Default::default()
        };

        for handle in document.handles() {
            let owner_kind = handle.kind();
            let owner_serial = handle.serial();
            handle.with(|entity| {
                for reference in entity.references() {
                    let field = reference.field;
                    let target_kinds = field.target_kinds();

                    if let Some(raw) = field.raw() {
                        if !field.is_resolved() {
                            result.dangling.push(DanglingReference {
                                owner_kind,
                                owner_serial: owner_serial.clone(),
                                field: reference.name,
                                serial: raw.clone(),
                                target_kinds: target_kinds.to_vec(),
                            });
                        }
                        if target_kinds.len() > 1 {
                            let candidates: Vec<EntityKind> = target_kinds
                                .iter()
                                .copied()
                                .filter(|kind| index.contains(*kind, raw))
                                .collect();
                            if candidates.len() > 1 {
                                result.ambiguous.push(AmbiguousReference {
                                    owner_kind,
                                    owner_serial: owner_serial.clone(),
                                    field: reference.name,
                                    serial: raw.clone(),
                                    candidates,
                                });
                            }
                        }
                    }

                    let target = match field.target_serial() {
                        TargetSerial::NoTarget => continue,
                        TargetSerial::Serial(serial) => Some(serial),
                        TargetSerial::Unaddressable => None,
                    };
                    if target.as_ref() != field.raw() {
                        result.stale.push(StaleReference {
                            owner_kind,
                            owner_serial: owner_serial.clone(),
                            field: reference.name,
                            raw: field.raw().cloned(),
                            target,
                        });
                    }
                }
            });
        }

        result.hierarchy_cycles = self.hierarchy_cycles(document);

        if result.is_valid() {
            debug!("Reference audit passed for {} entities", document.len());
        } else {
            warn!("Reference audit found {} issue(s)", result.issue_count());
        }
        result
    }

    /// Cycles in the organisation parent hierarchy, following linked parents
    pub fn hierarchy_cycles(&self, document: &Document) -> Vec<Vec<Option<Serial>>> {
        let mut graph = Graph::<usize, (), Directed>::new();
        let mut node_map = HashMap::new();

        for (i, organisation) in document.organisations.iter().enumerate() {
            let node = graph.add_node(i);
            node_map.insert(Rc::as_ptr(organisation), node);
        }
        for organisation in &document.organisations {
            let child = node_map[&Rc::as_ptr(organisation)];
            if let Some(parent) = organisation.borrow().parent_ref.target() {
                // Parents outside the document cannot close a cycle.
                if let Some(&parent_node) = node_map.get(&Rc::as_ptr(parent)) {
                    graph.add_edge(child, parent_node, ());
                }
            }
        }

        tarjan_scc(&graph)
            .into_iter()
            .filter(|component| {
                component.len() > 1
                    || (component.len() == 1 && graph.contains_edge(component[0], component[0]))
            })
            .map(|component| {
                let mut members: Vec<usize> = component.iter().map(|n| graph[*n]).collect();
                members.sort_unstable();
                members
                    .into_iter()
                    .map(|i| document.organisations[i].borrow().common.serial.value().cloned())
                    .collect()
            })
            .collect()
    }
}

/// Audit a document with the default validator
pub fn audit(document: &Document) -> ReferenceAuditResult {
    ReferenceValidator::new().audit(document)
}
