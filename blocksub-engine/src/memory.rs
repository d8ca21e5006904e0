//! In-memory grid host.
//!
//! Backs the engine tests and the simulator. Cells not explicitly set read
//! as the fill type (`minecraft:air`). Like a real world, replacing a cell
//! with a different type drops the payload attached to it.

use crate::{GridHost, HostEvents, NotifyFlags, ReadyCallback, RegionCallback};
use blocksub_types::{
    CellPos, CellState, CellType, CellTypeRegistry, Identifier, Payload, RegionPos,
};
use parking_lot::{Mutex, RwLock};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::ops::Range;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

/// Snapshot of host call counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IoStats {
    pub cell_reads: usize,
    pub cell_writes: usize,
    pub payload_reads: usize,
    pub payload_writes: usize,
    pub neighbor_updates: usize,
    pub client_updates: usize,
}

impl IoStats {
    /// Grid accesses of any kind.
    pub fn total(&self) -> usize {
        self.cell_reads + self.cell_writes + self.payload_reads + self.payload_writes
    }
}

#[derive(Debug, Default)]
struct Counters {
    cell_reads: AtomicUsize,
    cell_writes: AtomicUsize,
    payload_reads: AtomicUsize,
    payload_writes: AtomicUsize,
    neighbor_updates: AtomicUsize,
    client_updates: AtomicUsize,
}

impl Counters {
    fn bump(counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> IoStats {
        IoStats {
            cell_reads: self.cell_reads.load(Ordering::Relaxed),
            cell_writes: self.cell_writes.load(Ordering::Relaxed),
            payload_reads: self.payload_reads.load(Ordering::Relaxed),
            payload_writes: self.payload_writes.load(Ordering::Relaxed),
            neighbor_updates: self.neighbor_updates.load(Ordering::Relaxed),
            client_updates: self.client_updates.load(Ordering::Relaxed),
        }
    }

    fn reset(&self) {
        for counter in [
            &self.cell_reads,
            &self.cell_writes,
            &self.payload_reads,
            &self.payload_writes,
            &self.neighbor_updates,
            &self.client_updates,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

#[derive(Debug, Default)]
struct RegionData {
    cells: HashMap<CellPos, CellState>,
    payloads: HashMap<CellPos, Payload>,
    changed_payloads: HashSet<CellPos>,
    dirty: bool,
}

type SharedRegion = Arc<Mutex<RegionData>>;

pub struct MemoryWorld {
    name: String,
    registry: CellTypeRegistry,
    fill: CellState,
    vertical: Range<i32>,
    regions: RwLock<HashMap<RegionPos, SharedRegion>>,
    available: RwLock<BTreeSet<RegionPos>>,
    region_callbacks: RwLock<Vec<RegionCallback>>,
    ready_callbacks: RwLock<Vec<ReadyCallback>>,
    counters: Counters,
}

impl MemoryWorld {
    /// Creates an empty world over `vertical`.
    ///
    /// `minecraft:air` is registered as a plain type if the registry lacks it.
    pub fn new(
        name: impl Into<String>,
        mut registry: CellTypeRegistry,
        vertical: Range<i32>,
    ) -> blocksub_types::Result<Self> {
        let air = Identifier::normalize("air")?;
        let fill = match registry.get(&air).map(CellType::default_state) {
            Some(state) => state,
            None => registry.register(CellType::plain(air)).default_state(),
        };

        Ok(Self {
            name: name.into(),
            registry,
            fill,
            vertical,
            regions: RwLock::new(HashMap::new()),
            available: RwLock::new(BTreeSet::new()),
            region_callbacks: RwLock::new(Vec::new()),
            ready_callbacks: RwLock::new(Vec::new()),
            counters: Counters::default(),
        })
    }

    pub fn registry(&self) -> &CellTypeRegistry {
        &self.registry
    }

    /// The state unset cells read as.
    pub fn fill(&self) -> &CellState {
        &self.fill
    }

    fn region(&self, region: RegionPos) -> Option<SharedRegion> {
        self.regions.read().get(&region).cloned()
    }

    fn region_or_insert(&self, region: RegionPos) -> SharedRegion {
        if let Some(data) = self.region(region) {
            return data;
        }
        Arc::clone(self.regions.write().entry(region).or_default())
    }

    // ── Fixture access (not counted) ─────────────────────────────

    /// Places `state` at `pos` without touching its payload.
    pub fn set_cell(&self, pos: CellPos, state: CellState) {
        self.region_or_insert(pos.region())
            .lock()
            .cells
            .insert(pos, state);
    }

    pub fn cell(&self, pos: CellPos) -> CellState {
        self.region(pos.region())
            .and_then(|data| data.lock().cells.get(&pos).cloned())
            .unwrap_or_else(|| self.fill.clone())
    }

    pub fn set_payload(&self, pos: CellPos, payload: Payload) {
        self.region_or_insert(pos.region())
            .lock()
            .payloads
            .insert(pos, payload);
    }

    pub fn payload(&self, pos: CellPos) -> Option<Payload> {
        self.region(pos.region())
            .and_then(|data| data.lock().payloads.get(&pos).cloned())
    }

    /// Explicitly set cells of `region`, ordered by position.
    pub fn region_cells(&self, region: RegionPos) -> Vec<(CellPos, CellState)> {
        let mut cells: Vec<_> = self
            .region(region)
            .map(|data| {
                data.lock()
                    .cells
                    .iter()
                    .map(|(pos, state)| (*pos, state.clone()))
                    .collect()
            })
            .unwrap_or_default();
        cells.sort_by_key(|(pos, _)| *pos);
        cells
    }

    /// Payloads of `region`, ordered by position.
    pub fn region_payloads(&self, region: RegionPos) -> Vec<(CellPos, Payload)> {
        let mut payloads: Vec<_> = self
            .region(region)
            .map(|data| {
                data.lock()
                    .payloads
                    .iter()
                    .map(|(pos, payload)| (*pos, payload.clone()))
                    .collect()
            })
            .unwrap_or_default();
        payloads.sort_by_key(|(pos, _)| *pos);
        payloads
    }

    /// Every region holding data, sorted.
    pub fn regions(&self) -> Vec<RegionPos> {
        let mut regions: Vec<_> = self.regions.read().keys().copied().collect();
        regions.sort();
        regions
    }

    pub fn is_region_dirty(&self, region: RegionPos) -> bool {
        self.region(region).is_some_and(|data| data.lock().dirty)
    }

    pub fn payload_changed(&self, pos: CellPos) -> bool {
        self.region(pos.region())
            .is_some_and(|data| data.lock().changed_payloads.contains(&pos))
    }

    pub fn stats(&self) -> IoStats {
        self.counters.snapshot()
    }

    pub fn reset_stats(&self) {
        self.counters.reset();
    }

    // ── Lifecycle ────────────────────────────────────────────────

    /// Marks `region` available without notifying anyone.
    pub fn make_available(&self, region: RegionPos) {
        self.available.write().insert(region);
    }

    pub fn is_available(&self, region: RegionPos) -> bool {
        self.available.read().contains(&region)
    }

    /// Marks `region` available and fires the region callbacks on the
    /// calling thread.
    pub fn load_region(&self, region: RegionPos) {
        self.make_available(region);
        debug!("Region {} of {} became available", region, self.name);
        for callback in self.region_callbacks.read().iter() {
            callback(region);
        }
    }

    /// Fires the process-ready callbacks.
    pub fn start(&self) {
        for callback in self.ready_callbacks.read().iter() {
            callback();
        }
    }
}

impl GridHost for MemoryWorld {
    fn world_name(&self) -> &str {
        &self.name
    }

    fn vertical_extent(&self) -> Range<i32> {
        self.vertical.clone()
    }

    fn read_cell_state(&self, region: RegionPos, pos: CellPos) -> CellState {
        Counters::bump(&self.counters.cell_reads);
        self.region(region)
            .and_then(|data| data.lock().cells.get(&pos).cloned())
            .unwrap_or_else(|| self.fill.clone())
    }

    fn write_cell_state(
        &self,
        region: RegionPos,
        pos: CellPos,
        state: CellState,
        flags: NotifyFlags,
    ) {
        Counters::bump(&self.counters.cell_writes);
        if flags.contains(NotifyFlags::NEIGHBORS) {
            Counters::bump(&self.counters.neighbor_updates);
        }
        if flags.contains(NotifyFlags::CLIENTS) {
            Counters::bump(&self.counters.client_updates);
        }

        let data = self.region_or_insert(region);
        let mut data = data.lock();
        let new_id = state.id().clone();
        let previous = data.cells.insert(pos, state);
        let old_id = previous.as_ref().unwrap_or(&self.fill).id();
        if *old_id != new_id {
            data.payloads.remove(&pos);
        }
    }

    fn read_attached_payload(&self, region: RegionPos, pos: CellPos) -> Option<Payload> {
        Counters::bump(&self.counters.payload_reads);
        self.region(region)
            .and_then(|data| data.lock().payloads.get(&pos).cloned())
    }

    fn write_attached_payload(&self, region: RegionPos, pos: CellPos, payload: Payload) {
        Counters::bump(&self.counters.payload_writes);
        self.region_or_insert(region)
            .lock()
            .payloads
            .insert(pos, payload);
    }

    fn mark_payload_changed(&self, region: RegionPos, pos: CellPos) {
        self.region_or_insert(region)
            .lock()
            .changed_payloads
            .insert(pos);
    }

    fn default_state_for(&self, id: &Identifier) -> Option<CellState> {
        self.registry.default_state(id)
    }

    fn mark_region_dirty(&self, region: RegionPos) {
        self.region_or_insert(region).lock().dirty = true;
    }

    fn list_available_regions(&self) -> Vec<RegionPos> {
        self.available.read().iter().copied().collect()
    }
}

impl HostEvents for MemoryWorld {
    fn on_region_available(&self, callback: RegionCallback) {
        self.region_callbacks.write().push(callback);
    }

    fn on_process_ready(&self, callback: ReadyCallback) {
        self.ready_callbacks.write().push(callback);
    }
}
