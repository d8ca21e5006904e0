use bitflags::bitflags;
use blocksub_types::{CellPos, CellState, Identifier, Payload, RegionPos};
use std::ops::Range;

bitflags! {
    /// Who the host should notify when a cell state is written.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct NotifyFlags: u8 {
        /// Re-evaluate neighbouring cells.
        const NEIGHBORS = 1;
        /// Push the change to observers of the region.
        const CLIENTS = 1 << 1;
        const ALL = Self::NEIGHBORS.bits() | Self::CLIENTS.bits();
    }
}

/// The grid runtime the engine rewrites.
///
/// Every call is synchronous and in-memory. The host guarantees a single
/// writer per region, so implementations only need to be safe across
/// distinct regions.
///
/// `write_cell_state` replaces a cell in one call; a host may drop the
/// attached payload when the cell type changes, which is why the scanner
/// reads the payload first and writes it back afterwards.
pub trait GridHost: Send + Sync {
    /// Human-readable name of the world, used in region labels.
    fn world_name(&self) -> &str;

    /// Vertical cell range of every region, bottom inclusive, top exclusive.
    fn vertical_extent(&self) -> Range<i32>;

    fn read_cell_state(&self, region: RegionPos, pos: CellPos) -> CellState;

    fn write_cell_state(
        &self,
        region: RegionPos,
        pos: CellPos,
        state: CellState,
        flags: NotifyFlags,
    );

    fn read_attached_payload(&self, region: RegionPos, pos: CellPos) -> Option<Payload>;

    fn write_attached_payload(&self, region: RegionPos, pos: CellPos, payload: Payload);

    /// Flags the payload at `pos` as changed so the host persists it.
    fn mark_payload_changed(&self, region: RegionPos, pos: CellPos) {
        let _ = (region, pos);
    }

    /// Default state for `id`, or `None` if the host does not know the type.
    fn default_state_for(&self, id: &Identifier) -> Option<CellState>;

    fn mark_region_dirty(&self, region: RegionPos);

    /// Regions currently loaded. Listing never loads anything new.
    fn list_available_regions(&self) -> Vec<RegionPos>;
}

pub type RegionCallback = Box<dyn Fn(RegionPos) + Send + Sync>;
pub type ReadyCallback = Box<dyn Fn() + Send + Sync>;

/// Lifecycle hooks exposed by the host.
pub trait HostEvents {
    /// Fires once per region becoming available, possibly from several
    /// worker threads at once (never twice concurrently for one region).
    fn on_region_available(&self, callback: RegionCallback);

    /// Fires once at startup, after the initial regions are enumerable.
    fn on_process_ready(&self, callback: ReadyCallback);
}
