//! Ratio-ordered crew allocation.
//!
//! Islands are indexed by money/marine ratio in an [OrderedRatioStore]. A
//! single crew pool is spread greedily best-ratio-first, and a batch of crew
//! sizes is answered in one descending sweep: a smaller crew's raid path is
//! always a prefix of a larger crew's, so each request resumes where the
//! previous (smaller) one stopped.

use serde::Serialize;

use crate::config::EngineConfig;
use crate::data::island::{check_fields, Island, IslandId};
use crate::error::AllocationError;
use crate::navigator::engagement::rounded_plunder;
use crate::structures::{OrderedRatioStore, RatioKey};

/// Crew sent to one island by [CrewAllocator::select_islands].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CrewAssignment {
    pub island: IslandId,
    pub crew_sent: u32,
}

/// A crew size tagged with its position in the caller's list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CrewRequest {
    size: u32,
    original_index: usize,
}

#[derive(Debug, Clone)]
pub struct CrewAllocator {
    islands: Vec<Island>,
    store: OrderedRatioStore<IslandId>,
    crew: u32,
    config: EngineConfig,
}

impl CrewAllocator {
    pub fn new(islands: Vec<Island>, crew: u32) -> Result<Self, AllocationError> {
        Self::with_config(islands, crew, EngineConfig::default())
    }

    pub fn with_config(
        islands: Vec<Island>,
        crew: u32,
        config: EngineConfig,
    ) -> Result<Self, AllocationError> {
        let mut allocator = Self {
            islands: Vec::with_capacity(islands.len()),
            store: OrderedRatioStore::new(),
            crew,
            config,
        };
        allocator.add_islands(islands)?;
        Ok(allocator)
    }

    /// Index more islands. Every island is validated before any is added, so a
    /// rejected batch leaves the allocator unchanged.
    pub fn add_islands<I>(&mut self, islands: I) -> Result<Vec<IslandId>, AllocationError>
    where
        I: IntoIterator<Item = Island>,
    {
        let islands: Vec<Island> = islands.into_iter().collect();
        for island in &islands {
            island.validate()?;
        }

        let mut ids = Vec::with_capacity(islands.len());
        for island in islands {
            let id = IslandId(self.islands.len());
            self.store.insert(RatioKey::new(island.ratio_unchecked(), id), id);
            self.islands.push(island);
            ids.push(id);
        }
        tracing::debug!(added = ids.len(), indexed = self.store.len(), "islands indexed");
        Ok(ids)
    }

    pub fn island(&self, id: IslandId) -> Option<&Island> {
        self.islands.get(id.0)
    }

    pub fn islands(&self) -> &[Island] {
        &self.islands
    }

    /// First island registered under `name`.
    pub fn id_of(&self, name: &str) -> Option<IslandId> {
        self.islands
            .iter()
            .position(|island| island.name == name)
            .map(IslandId)
    }

    /// Key the island is currently stored under.
    pub fn key_of(&self, id: IslandId) -> Option<RatioKey> {
        self.island(id)
            .map(|island| RatioKey::new(island.ratio_unchecked(), id))
    }

    pub fn store(&self) -> &OrderedRatioStore<IslandId> {
        &self.store
    }

    /// Spread the crew pool over islands, best ratio first.
    ///
    /// Each island receives as many crew as it has marines, until the pool
    /// runs dry. Neither the islands nor the store are modified.
    pub fn select_islands(&self) -> Vec<CrewAssignment> {
        let mut remaining = self.crew;
        let mut plan = Vec::new();
        if remaining == 0 {
            return plan;
        }

        for (_, &id) in self.store.descending() {
            let crew_sent = remaining.min(self.islands[id.0].marines);
            plan.push(CrewAssignment { island: id, crew_sent });
            remaining -= crew_sent;
            if remaining == 0 {
                break;
            }
        }
        plan
    }

    /// Plunder each crew size would collect on its own against the full set
    /// of islands, returned in the order the sizes were given.
    ///
    /// O(n + c log c) for n islands and c sizes; the sort is skipped when the
    /// sizes are already non-decreasing.
    pub fn select_islands_from_crew_numbers(&self, crew_numbers: &[u32]) -> Vec<f64> {
        if crew_numbers.is_empty() {
            return Vec::new();
        }

        let mut requests: Vec<CrewRequest> = crew_numbers
            .iter()
            .enumerate()
            .map(|(original_index, &size)| CrewRequest {
                size,
                original_index,
            })
            .collect();
        if !requests.windows(2).all(|pair| pair[0].size <= pair[1].size) {
            // stable: equal sizes keep caller order
            requests.sort_by_key(|request| request.size);
        }

        let rounding = self.config.rounding;
        let mut totals = vec![0.0; requests.len()];
        let mut current = 0;
        let mut remaining = requests[0].size;
        // plunder of every island the sweep has fully passed
        let mut base = 0.0;

        'islands: for (_, &id) in self.store.descending() {
            let island = &self.islands[id.0];
            if island.money <= 0.0 {
                continue;
            }

            // Each request is rounded against the untouched island, as if it
            // had sailed alone; fragments are never rounded separately.
            let mut on_island = 0;
            loop {
                let take = remaining.min(island.marines - on_island);
                on_island += take;
                remaining -= take;
                if remaining > 0 {
                    break;
                }

                totals[current] =
                    base + rounded_plunder(on_island, island.money, island.marines, rounding);
                current += 1;
                if current == requests.len() {
                    break 'islands;
                }
                remaining = requests[current].size - requests[current - 1].size;
            }
            base += rounded_plunder(island.marines, island.money, island.marines, rounding);
        }

        // Islands ran out: larger requests cannot collect anything more.
        for total in totals.iter_mut().skip(current) {
            *total = base;
        }

        let mut results = vec![0.0; requests.len()];
        for (request, total) in requests.iter().zip(totals) {
            results[request.original_index] = total;
        }
        tracing::debug!(
            requests = results.len(),
            islands = self.store.len(),
            "crew sizes resolved"
        );
        results
    }

    /// Change an island's money and marines, moving it to its new ratio key.
    ///
    /// The new values are checked before the island is un-indexed; a failure
    /// leaves the store untouched.
    pub fn update_island(
        &mut self,
        id: IslandId,
        new_money: f64,
        new_marines: u32,
    ) -> Result<(), AllocationError> {
        let old_key = self
            .key_of(id)
            .ok_or(AllocationError::UnknownIsland { id })?;
        check_fields(&self.islands[id.0].name, new_money, new_marines)?;

        self.store.delete(&old_key)?;
        let island = &mut self.islands[id.0];
        island.money = new_money;
        island.marines = new_marines;
        let new_key = RatioKey::new(island.ratio_unchecked(), id);
        self.store.insert(new_key, id);

        tracing::debug!(
            island = %island.name,
            old_ratio = old_key.ratio,
            new_ratio = new_key.ratio,
            "island re-keyed"
        );
        Ok(())
    }
}
