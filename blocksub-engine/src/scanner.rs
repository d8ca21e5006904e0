//! Walks one region and rewrites every cell matched by the rule table.

use crate::{
    DiagnosticDeduplicator, GridHost, NotifyFlags, ReplacementSummary, RuleTable, reconcile,
};
use blocksub_types::{CellState, Identifier, RegionPos};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Scans regions of one host against one rule table snapshot.
pub struct RegionScanner<'a, H: GridHost + ?Sized> {
    host: &'a H,
    rules: &'a RuleTable,
    diagnostics: &'a DiagnosticDeduplicator,
}

impl<'a, H: GridHost + ?Sized> RegionScanner<'a, H> {
    pub fn new(host: &'a H, rules: &'a RuleTable, diagnostics: &'a DiagnosticDeduplicator) -> Self {
        Self {
            host,
            rules,
            diagnostics,
        }
    }

    /// Rewrites every matching cell of `region` and returns what changed.
    ///
    /// Per cell: read the state, look up its type, resolve the replacement's
    /// default, lift the attached payload, reconcile attributes, write the new
    /// state, then reattach the payload. Cells whose type has no rule, or
    /// whose replacement the host cannot resolve, are left untouched. The
    /// region is marked dirty only if at least one cell changed.
    pub fn scan(&self, region: RegionPos) -> ReplacementSummary {
        let mut summary = ReplacementSummary::new();
        if self.rules.is_empty() {
            return summary;
        }

        // Resolved once per replacement id for this scan.
        let mut defaults: HashMap<Identifier, Option<CellState>> = HashMap::new();

        for pos in region.cells(self.host.vertical_extent()) {
            let current = self.host.read_cell_state(region, pos);
            let source = current.id();
            let Some(replacement) = self.rules.lookup(source) else {
                continue;
            };

            let default = defaults
                .entry(replacement.clone())
                .or_insert_with(|| self.host.default_state_for(replacement))
                .clone();
            let Some(default) = default else {
                if self.diagnostics.report_unresolved_once(source, replacement) {
                    warn!(
                        "Replacement {} for {} is not a known cell type; cells left unchanged",
                        replacement, source
                    );
                }
                continue;
            };

            let payload = self.host.read_attached_payload(region, pos);

            let next = reconcile(&current, default, |attribute| {
                if self.diagnostics.report_once(source, replacement, attribute) {
                    warn!(
                        "Attribute '{}' of {} is unsupported by {}; dropped (reported once)",
                        attribute, source, replacement
                    );
                }
            });

            self.host.write_cell_state(region, pos, next, NotifyFlags::ALL);

            if let Some(payload) = payload {
                debug!("Carrying {} payload over at {}", payload.tag(), pos);
                self.host.write_attached_payload(region, pos, payload);
                self.host.mark_payload_changed(region, pos);
            }

            summary.record(source, replacement);
        }

        if !summary.is_empty() {
            self.host.mark_region_dirty(region);
        }

        summary
    }
}
