//! Cell substitution engine.
//!
//! Rewrites cells of a chunked voxel grid in place, replacing cell types by a
//! configurable rule table while carrying attributes and attached payloads
//! across the change:
//! - [`RuleTable`]: normalized source → replacement lookup
//! - [`reconcile`]: copies every attribute the replacement type supports
//! - [`DiagnosticDeduplicator`]: reports each missing attribute once per pair
//! - [`RegionScanner`]: walks one region and rewrites matching cells
//! - [`SummaryReporter`] / [`StartupSweeper`]: per-region and startup output
//! - [`Substitutor`]: owns the swappable settings and wires it all to a host
//!
//! The world itself is reached only through [`GridHost`] and [`HostEvents`].
//! [`MemoryWorld`] is an in-memory host for tests and simulation.

mod diagnostics;
mod host;
mod memory;
mod reconcile;
mod report;
mod rules;
mod scanner;
mod substitutor;
mod summary;
mod sweep;

pub use diagnostics::DiagnosticDeduplicator;
pub use host::{GridHost, HostEvents, NotifyFlags, ReadyCallback, RegionCallback};
pub use memory::{IoStats, MemoryWorld};
pub use reconcile::reconcile;
pub use report::SummaryReporter;
pub use rules::RuleTable;
pub use scanner::RegionScanner;
pub use substitutor::{EngineSettings, Substitutor, region_label};
pub use summary::{ReplacementSummary, pair_label};
pub use sweep::{StartupSweeper, SweepOutcome};
