//! World fixtures and the simulation driver behind the `blocksub-sim` binary.

mod fixture;
mod simulate;

pub use fixture::{CellFixture, FixtureError, RegionFixture, WorldFixture};
pub use simulate::{Simulation, SimulationReport, simulate};
