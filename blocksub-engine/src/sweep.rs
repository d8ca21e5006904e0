//! One-shot scan of every region available at startup.

use crate::{GridHost, ReplacementSummary};
use blocksub_types::RegionPos;
use rayon::prelude::*;
use tracing::info;

/// Result of a startup sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepOutcome {
    /// Sweeping is turned off; nothing was listed or scanned.
    Disabled,
    Completed { regions: usize, replaced: usize },
}

impl SweepOutcome {
    /// Cells replaced by the sweep, 0 when disabled.
    pub fn total(&self) -> usize {
        match self {
            Self::Disabled => 0,
            Self::Completed { replaced, .. } => *replaced,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartupSweeper {
    enabled: bool,
    parallel: bool,
}

impl StartupSweeper {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            parallel: false,
        }
    }

    /// Scan regions on the rayon pool instead of one after another.
    #[must_use]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Runs `scan` over every region the host lists as available and logs one
    /// aggregate line.
    pub fn sweep<H, F>(&self, host: &H, scan: F) -> SweepOutcome
    where
        H: GridHost + ?Sized,
        F: Fn(RegionPos) -> ReplacementSummary + Sync,
    {
        if !self.enabled {
            info!("Startup scan of {} is disabled", host.world_name());
            return SweepOutcome::Disabled;
        }

        let regions = host.list_available_regions();
        let replaced: usize = if self.parallel {
            regions.par_iter().map(|region| scan(*region).total()).sum()
        } else {
            regions.iter().map(|region| scan(*region).total()).sum()
        };

        if replaced > 0 {
            info!(
                "Startup scan of {} replaced {} cells across {} regions",
                host.world_name(),
                replaced,
                regions.len()
            );
        } else {
            info!(
                "Startup scan of {} found nothing to replace in {} regions",
                host.world_name(),
                regions.len()
            );
        }

        SweepOutcome::Completed {
            regions: regions.len(),
            replaced,
        }
    }
}
