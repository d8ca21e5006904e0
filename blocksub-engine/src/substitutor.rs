//! Orchestrator tying settings, diagnostics, and the host together.

use crate::{
    DiagnosticDeduplicator, GridHost, HostEvents, RegionScanner, ReplacementSummary, RuleTable,
    StartupSweeper, SummaryReporter, SweepOutcome,
};
use arc_swap::ArcSwap;
use blocksub_config::SubstitutionConfig;
use blocksub_types::RegionPos;
use std::sync::{Arc, Weak};
use tracing::{debug, info};

/// Immutable snapshot of everything a scan needs from configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineSettings {
    pub rules: RuleTable,
    pub log_replacements: bool,
    pub scan_on_startup: bool,
}

impl EngineSettings {
    pub fn from_config(config: &SubstitutionConfig) -> Self {
        Self {
            rules: RuleTable::from_config(config),
            log_replacements: config.log_replacements,
            scan_on_startup: config.scan_overworld_on_startup,
        }
    }
}

/// `"<x>, <z> in <world>"`.
pub fn region_label<H: GridHost + ?Sized>(host: &H, region: RegionPos) -> String {
    format!("{} in {}", region, host.world_name())
}

/// Owns the live settings and the diagnostic state for one process.
///
/// Settings live behind an [`ArcSwap`]: every scan loads one snapshot and
/// keeps it to the end, while [`reload`](Self::reload) publishes a new one
/// without blocking readers.
#[derive(Debug)]
pub struct Substitutor {
    settings: ArcSwap<EngineSettings>,
    diagnostics: DiagnosticDeduplicator,
    parallel_sweep: bool,
}

impl Substitutor {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            settings: ArcSwap::from_pointee(settings),
            diagnostics: DiagnosticDeduplicator::new(),
            parallel_sweep: false,
        }
    }

    pub fn from_config(config: &SubstitutionConfig) -> Self {
        Self::new(EngineSettings::from_config(config))
    }

    /// Run the startup sweep on the rayon pool.
    #[must_use]
    pub fn with_parallel_sweep(mut self, parallel: bool) -> Self {
        self.parallel_sweep = parallel;
        self
    }

    /// Current settings snapshot.
    pub fn settings(&self) -> Arc<EngineSettings> {
        self.settings.load_full()
    }

    /// Publishes settings built from `config` and forgets past diagnostics.
    pub fn reload(&self, config: &SubstitutionConfig) {
        let settings = EngineSettings::from_config(config);
        info!("Reloaded substitution config ({} rules)", settings.rules.len());
        self.install_settings(settings);
        self.diagnostics.clear();
    }

    /// Publishes `settings` as-is; diagnostics are kept.
    pub fn install_settings(&self, settings: EngineSettings) {
        self.settings.store(Arc::new(settings));
    }

    pub fn diagnostics(&self) -> &DiagnosticDeduplicator {
        &self.diagnostics
    }

    pub fn reset_diagnostics(&self) {
        self.diagnostics.clear();
    }

    /// Scans `region` against the current rule table without reporting.
    pub fn scan_region<H: GridHost + ?Sized>(
        &self,
        host: &H,
        region: RegionPos,
    ) -> ReplacementSummary {
        let settings = self.settings.load();
        RegionScanner::new(host, &settings.rules, &self.diagnostics).scan(region)
    }

    /// Handles a region becoming available: scan it, then report.
    pub fn handle_region_available<H: GridHost + ?Sized>(
        &self,
        host: &H,
        region: RegionPos,
    ) -> ReplacementSummary {
        let settings = self.settings.load_full();
        let summary = RegionScanner::new(host, &settings.rules, &self.diagnostics).scan(region);
        SummaryReporter::new(settings.log_replacements)
            .report(&region_label(host, region), &summary);
        summary
    }

    /// Handles process start: sweep every available region.
    pub fn handle_process_ready<H: GridHost + ?Sized>(&self, host: &H) -> SweepOutcome {
        let settings = self.settings.load_full();
        StartupSweeper::new(settings.scan_on_startup)
            .parallel(self.parallel_sweep)
            .sweep(host, |region| {
                RegionScanner::new(host, &settings.rules, &self.diagnostics).scan(region)
            })
    }

    /// Registers the region and startup hooks on `host`.
    ///
    /// Callbacks hold the host weakly so a host that owns its callbacks does
    /// not keep itself alive.
    pub fn install<H>(self: &Arc<Self>, host: &Arc<H>)
    where
        H: GridHost + HostEvents + 'static,
    {
        let weak: Weak<H> = Arc::downgrade(host);
        let this = Arc::clone(self);
        host.on_region_available(Box::new(move |region| {
            if let Some(host) = weak.upgrade() {
                this.handle_region_available(host.as_ref(), region);
            }
        }));

        let weak: Weak<H> = Arc::downgrade(host);
        let this = Arc::clone(self);
        host.on_process_ready(Box::new(move || {
            if let Some(host) = weak.upgrade() {
                this.handle_process_ready(host.as_ref());
            }
        }));

        debug!("Substitutor installed on {}", host.world_name());
    }
}
