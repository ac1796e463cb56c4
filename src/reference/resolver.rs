//! Two-phase linking between wire Serials and in-memory targets
//!
//! - `post_load` runs after parsing: every reference with a Serial is looked
//!   up in the document index and linked to the entity that holds it.
//! - `build` runs before serialization: every linked reference gets its
//!   Serial re-derived from the current target.
//!
//! Neither pass fails on a single bad reference. Dangling and unaddressable
//! references are counted in the returned reports for the caller to audit.

use serde::Serialize;
use tracing::{debug, info, warn};

use super::field::{Resolution, SerialLookup, TargetSerial};
use super::serial::Serial;
use crate::models::{EntityHandle, EntityKind};

/// A collection of entities the resolver can walk
pub trait EntitySource {
    type Index: SerialLookup;

    /// Every addressable entity, in document order
    fn handles(&self) -> Vec<EntityHandle>;

    /// Serial index over the same entities
    fn index(&self) -> Self::Index;
}

/// A reference whose Serial names no legal target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DanglingReference {
    pub owner_kind: EntityKind,
    pub owner_serial: Option<Serial>,
    pub field: &'static str,
    pub serial: Serial,
    pub target_kinds: Vec<EntityKind>,
}

/// Counts from one resolution pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionReport {
    pub resolved: usize,
    pub absent: usize,
    pub dangling: Vec<DanglingReference>,
}

impl ResolutionReport {
    pub fn is_complete(&self) -> bool {
        self.dangling.is_empty()
    }

    pub fn total(&self) -> usize {
        self.resolved + self.absent + self.dangling.len()
    }
}

/// A linked reference whose target cannot supply a Serial
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnaddressableTarget {
    pub owner_kind: EntityKind,
    pub owner_serial: Option<Serial>,
    pub field: &'static str,
    pub target_kind: Option<EntityKind>,
}

/// Counts from one build pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildReport {
    /// References whose Serial was derived from their target
    pub rebuilt: usize,
    /// References without a target; their Serial is left as is
    pub untouched: usize,
    pub unaddressable: Vec<UnaddressableTarget>,
}

/// Runs the resolution and build passes over an entity source
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceResolver;

impl ReferenceResolver {
    pub fn new() -> Self {
        Self
    }

    /// Link every reference to the entity its Serial names.
    ///
    /// Running it twice without mutation in between yields the same links.
    pub fn post_load<S: EntitySource>(&self, source: &S) -> ResolutionReport {
        let index = source.index();
        let mut report = ResolutionReport::default();

        for handle in source.handles() {
            let owner_kind = handle.kind();
            let owner_serial = handle.serial();
            handle.with_mut(|entity| {
                for reference in entity.references_mut() {
                    match reference.field.resolve_in(&index) {
                        Resolution::Absent => report.absent += 1,
                        Resolution::Resolved => {
                            debug!(
                                "Resolved {}.{} -> {:?}",
                                owner_kind,
                                reference.name,
                                reference.field.raw()
                            );
                            report.resolved += 1;
                        }
                        Resolution::Dangling => {
                            let Some(serial) = reference.field.raw().cloned() else {
                                continue;
                            };
                            warn!(
                                "Dangling reference {}.{} on {} -> '{}'",
                                owner_kind,
                                reference.name,
                                owner_serial
                                    .as_ref()
                                    .map(Serial::as_str)
                                    .unwrap_or("<no serial>"),
                                serial
                            );
                            report.dangling.push(DanglingReference {
                                owner_kind,
                                owner_serial: owner_serial.clone(),
                                field: reference.name,
                                serial,
                                target_kinds: reference.field.target_kinds().to_vec(),
                            });
                        }
                    }
                }
            });
        }

        info!(
            "Resolution pass: {} resolved, {} absent, {} dangling",
            report.resolved,
            report.absent,
            report.dangling.len()
        );
        report
    }

    /// Re-derive every linked reference's Serial from its target.
    ///
    /// References without a target keep their Serial, so dangling references
    /// survive a load/save cycle unchanged.
    pub fn build<S: EntitySource>(&self, source: &S) -> BuildReport {
        let mut report = BuildReport::default();

        for handle in source.handles() {
            let owner_kind = handle.kind();
            let owner_serial = handle.serial();

            // Read target serials first: a reference may point back at its owner.
            let (targets, kinds): (Vec<TargetSerial>, Vec<Option<EntityKind>>) =
                handle.with(|entity| {
                    entity
                        .references()
                        .iter()
                        .map(|r| {
                            (
                                r.field.target_serial(),
                                r.field.target_handle().map(|h| h.kind()),
                            )
                        })
                        .unzip()
                });

            handle.with_mut(|entity| {
                let fields = entity.references_mut();
                for ((reference, target), target_kind) in fields.into_iter().zip(targets).zip(kinds)
                {
                    match target {
                        TargetSerial::NoTarget => report.untouched += 1,
                        TargetSerial::Serial(serial) => {
                            reference.field.assign_raw(serial);
                            report.rebuilt += 1;
                        }
                        TargetSerial::Unaddressable => {
                            warn!(
                                "Cannot rebuild {}.{}: target has no serial",
                                owner_kind, reference.name
                            );
                            report.unaddressable.push(UnaddressableTarget {
                                owner_kind,
                                owner_serial: owner_serial.clone(),
                                field: reference.name,
                                target_kind,
                            });
                        }
                    }
                }
            });
        }

        info!(
            "Build pass: {} rebuilt, {} untouched, {} unaddressable",
            report.rebuilt,
            report.untouched,
            report.unaddressable.len()
        );
        report
    }
}
