//! Output formatting for CLI

use serde::Serialize;

use crate::format::FormatRegistry;
use crate::import::ImportError;
use crate::model::LoadedDocument;
use crate::validation::ReferenceAuditResult;

/// Machine-readable validation report
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport<'a> {
    pub entities: usize,
    pub import_errors: Vec<String>,
    pub resolved: usize,
    pub audit: &'a ReferenceAuditResult,
}

impl<'a> ValidationReport<'a> {
    pub fn new(loaded: &LoadedDocument, audit: &'a ReferenceAuditResult) -> Self {
        Self {
            entities: loaded.document.len(),
            import_errors: loaded.import_errors.iter().map(ImportError::to_string).collect(),
            resolved: loaded.resolution.resolved,
            audit,
        }
    }

    pub fn passed(&self) -> bool {
        self.import_errors.is_empty() && self.audit.is_valid()
    }
}

/// Format a validation report for a terminal
pub fn format_validation_output(loaded: &LoadedDocument, audit: &ReferenceAuditResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("\n✅ Loaded {} entities:\n", loaded.document.len()));
    for (kind, count) in loaded.document.counts() {
        if count > 0 {
            output.push_str(&format!("  {}: {}\n", kind, count));
        }
    }
    output.push_str(&format!(
        "  References: {} resolved, {} absent\n",
        loaded.resolution.resolved, loaded.resolution.absent
    ));

    if !loaded.import_errors.is_empty() {
        output.push_str("\n⚠️  Import Errors:\n");
        for error in &loaded.import_errors {
            output.push_str(&format!("  - {}\n", error));
        }
    }

    if !audit.dangling.is_empty() {
        output.push_str("\n⚠️  Dangling References:\n");
        for dangling in &audit.dangling {
            output.push_str(&format!(
                "  - {}[{}].{} -> '{}'\n",
                dangling.owner_kind,
                display_serial(dangling.owner_serial.as_ref()),
                dangling.field,
                dangling.serial
            ));
        }
    }

    if !audit.duplicate_serials.is_empty() {
        output.push_str("\n⚠️  Duplicate Serials:\n");
        for duplicate in &audit.duplicate_serials {
            output.push_str(&format!("  - {} '{}'\n", duplicate.kind, duplicate.serial));
        }
    }

    if !audit.ambiguous.is_empty() {
        output.push_str("\n⚠️  Ambiguous References:\n");
        for ambiguous in &audit.ambiguous {
            let kinds: Vec<String> = ambiguous.candidates.iter().map(|k| k.to_string()).collect();
            output.push_str(&format!(
                "  - {}[{}].{} -> '{}' matches {}\n",
                ambiguous.owner_kind,
                display_serial(ambiguous.owner_serial.as_ref()),
                ambiguous.field,
                ambiguous.serial,
                kinds.join(", ")
            ));
        }
    }

    if !audit.hierarchy_cycles.is_empty() {
        output.push_str("\n⚠️  Organisation Hierarchy Cycles:\n");
        for cycle in &audit.hierarchy_cycles {
            let members: Vec<&str> = cycle.iter().map(|s| display_serial(s.as_ref())).collect();
            output.push_str(&format!("  - {}\n", members.join(" -> ")));
        }
    }

    if loaded.import_errors.is_empty() && audit.is_valid() {
        output.push_str("\n✅ All checks passed!\n");
    }

    output
}

/// Table of registered format codes
pub fn format_registry_output(registry: &FormatRegistry) -> String {
    let mut output = String::new();
    let width = registry
        .entries()
        .map(|(code, _)| code.to_string().len())
        .max()
        .unwrap_or(0);
    for (code, format) in registry.entries() {
        output.push_str(&format!("{:<width$}  {}\n", code.to_string(), format, width = width));
    }
    output
}

fn display_serial(serial: Option<&crate::reference::Serial>) -> &str {
    serial.map(|s| s.as_str()).unwrap_or("?")
}
