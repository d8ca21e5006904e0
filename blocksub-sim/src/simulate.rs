use crate::{FixtureError, WorldFixture};
use blocksub_config::SubstitutionConfig;
use blocksub_engine::{GridHost, MemoryWorld, Substitutor};
use blocksub_types::RegionPos;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, info};

/// What a simulation run did to the world.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulationReport {
    /// Regions available at startup.
    pub startup_regions: usize,
    /// Regions loaded after startup.
    pub deferred_regions: usize,
    pub cells_replaced: usize,
    pub payloads_carried: usize,
    pub dirty_regions: usize,
}

/// A finished run: the rewritten world and the engine that rewrote it.
pub struct Simulation {
    pub world: Arc<MemoryWorld>,
    pub engine: Arc<Substitutor>,
    pub report: SimulationReport,
}

/// Runs the engine over `fixture` the way a host would.
///
/// The engine is installed on the world, the process-ready hook fires the
/// startup sweep, then every deferred region is loaded on the rayon pool so
/// region scans race the way they do under a multi-threaded host.
pub fn simulate(
    fixture: &WorldFixture,
    config: &SubstitutionConfig,
) -> Result<Simulation, FixtureError> {
    let world = Arc::new(fixture.build()?);
    let engine = Arc::new(Substitutor::from_config(config).with_parallel_sweep(true));
    engine.install(&world);

    let startup_regions = world.list_available_regions().len();
    info!(
        "Starting {} with {} rules ({} regions available)",
        fixture.name,
        engine.settings().rules.len(),
        startup_regions
    );
    world.start();

    let deferred = fixture.deferred_regions();
    deferred.par_iter().for_each(|region: &RegionPos| {
        debug!("Loading deferred region {}", region);
        world.load_region(*region);
    });

    let stats = world.stats();
    let report = SimulationReport {
        startup_regions,
        deferred_regions: deferred.len(),
        cells_replaced: stats.cell_writes,
        payloads_carried: stats.payload_writes,
        dirty_regions: world
            .regions()
            .into_iter()
            .filter(|region| world.is_region_dirty(*region))
            .count(),
    };

    Ok(Simulation {
        world,
        engine,
        report,
    })
}
