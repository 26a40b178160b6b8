//! Daily raid simulation for a fixed number of pirate crews.
//!
//! Each day the raidable islands are heapified by the money a crew of the
//! day's size could take from them. Pirates, in order, raid the top island;
//! a raided island goes back on the heap with its priority recomputed only
//! while it is still worth raiding.

use serde::Serialize;

use crate::config::EngineConfig;
use crate::data::island::{Island, IslandId};
use crate::navigator::engagement::{engage, obtainable, Engagement};
use crate::structures::MaxPriorityHeap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IdleReason {
    /// No island left that beats staying home.
    NoTargets,
    /// The pirate has no crew to send.
    NoCrew,
}

/// What one pirate did on a simulated day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Assignment {
    Raid {
        island: IslandId,
        crew_sent: u32,
        plunder: f64,
    },
    Idle {
        reason: IdleReason,
    },
}

impl Assignment {
    pub fn island(&self) -> Option<IslandId> {
        match self {
            Self::Raid { island, .. } => Some(*island),
            Self::Idle { .. } => None,
        }
    }

    pub fn crew_sent(&self) -> u32 {
        match self {
            Self::Raid { crew_sent, .. } => *crew_sent,
            Self::Idle { .. } => 0,
        }
    }

    pub fn plunder(&self) -> f64 {
        match self {
            Self::Raid { plunder, .. } => *plunder,
            Self::Idle { .. } => 0.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DailyRaidSimulator {
    pirates: usize,
    islands: Vec<Island>,
    config: EngineConfig,
}

impl DailyRaidSimulator {
    pub fn new(pirates: usize) -> Self {
        Self::with_config(pirates, EngineConfig::default())
    }

    pub fn with_config(pirates: usize, config: EngineConfig) -> Self {
        Self {
            pirates,
            islands: Vec::new(),
            config,
        }
    }

    /// Append islands to the running collection. Nothing is filtered or
    /// reordered until the next simulated day.
    pub fn add_islands<I>(&mut self, islands: I) -> Vec<IslandId>
    where
        I: IntoIterator<Item = Island>,
    {
        let start = self.islands.len();
        self.islands.extend(islands);
        for island in &self.islands[start..] {
            if !island.money.is_finite() || island.money < 0.0 {
                tracing::warn!(
                    island = %island.name,
                    money = island.money,
                    "island will never be raided"
                );
            }
        }
        (start..self.islands.len()).map(IslandId).collect()
    }

    pub fn island(&self, id: IslandId) -> Option<&Island> {
        self.islands.get(id.0)
    }

    pub fn islands(&self) -> &[Island] {
        &self.islands
    }

    /// Islands that would be put on the heap if a day started now.
    pub fn raidable_count(&self) -> usize {
        let threshold = self.config.raid_ratio_threshold;
        self.islands
            .iter()
            .filter(|island| is_raidable(island, threshold))
            .count()
    }

    /// Run one day: one [Assignment] per pirate, in pirate order. Raids
    /// deplete the islands for every later day.
    pub fn simulate_day(&mut self, crew: u32) -> Vec<Assignment> {
        let threshold = self.config.raid_ratio_threshold;
        let rounding = self.config.rounding;

        let mut heap = MaxPriorityHeap::heapify(
            self.islands
                .iter()
                .enumerate()
                .filter(|(_, island)| is_raidable(island, threshold))
                .map(|(index, island)| (raid_priority(crew, island), IslandId(index))),
        );
        let candidates = heap.len();

        let mut day = Vec::with_capacity(self.pirates);
        for _ in 0..self.pirates {
            if crew == 0 {
                day.push(Assignment::Idle {
                    reason: IdleReason::NoCrew,
                });
                continue;
            }
            let Some((_, id)) = heap.extract_max() else {
                day.push(Assignment::Idle {
                    reason: IdleReason::NoTargets,
                });
                continue;
            };

            let island = &mut self.islands[id.0];
            let Engagement { plunder, engaged } =
                engage(crew, island.money, island.marines, rounding);
            island.money -= plunder;
            island.marines -= engaged;
            if is_raidable(island, threshold) {
                heap.insert(raid_priority(crew, island), id);
            }

            day.push(Assignment::Raid {
                island: id,
                crew_sent: engaged,
                plunder,
            });
        }

        tracing::info!(
            pirates = self.pirates,
            crew,
            candidates,
            raids = day.iter().filter(|a| a.island().is_some()).count(),
            plunder = day.iter().map(Assignment::plunder).sum::<f64>(),
            "day simulated"
        );
        day
    }

    /// Run `days` consecutive days with the same crew size.
    pub fn simulate_days(&mut self, crew: u32, days: usize) -> Vec<Vec<Assignment>> {
        (0..days).map(|_| self.simulate_day(crew)).collect()
    }
}

/// Only finite, non-negative money can be split into shares.
fn is_raidable(island: &Island, threshold: f64) -> bool {
    island.money.is_finite()
        && island.money >= 0.0
        && island.ratio().is_some_and(|ratio| ratio > threshold)
}

fn raid_priority(crew: u32, island: &Island) -> f64 {
    obtainable(crew, island.money, island.marines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_island_is_drained_in_ten_raids() {
        let mut sim = DailyRaidSimulator::new(11);
        let ids = sim.add_islands(vec![Island::new("A", 400.0, 100)]);
        let day = sim.simulate_day(10);

        assert_eq!(day.len(), 11);
        for assignment in &day[..10] {
            assert_eq!(
                *assignment,
                Assignment::Raid {
                    island: ids[0],
                    crew_sent: 10,
                    plunder: 40.0
                }
            );
        }
        assert_eq!(
            day[10],
            Assignment::Idle {
                reason: IdleReason::NoTargets
            }
        );
        assert_eq!(sim.island(ids[0]), Some(&Island::new("A", 0.0, 0)));
    }

    #[test]
    fn zero_crew_idles_every_pirate() {
        let mut sim = DailyRaidSimulator::new(3);
        sim.add_islands(vec![Island::new("A", 400.0, 100)]);
        let day = sim.simulate_day(0);
        assert!(day.iter().all(|a| *a
            == Assignment::Idle {
                reason: IdleReason::NoCrew
            }));
        assert_eq!(sim.islands()[0], Island::new("A", 400.0, 100));
    }

    #[test]
    fn islands_at_or_below_threshold_are_never_raided() {
        let mut sim = DailyRaidSimulator::new(4);
        sim.add_islands(vec![
            Island::new("Even", 200.0, 100),
            Island::new("Poor", 50.0, 100),
            Island::new("Unguarded", 500.0, 0),
        ]);
        assert_eq!(sim.raidable_count(), 0);
        let day = sim.simulate_day(20);
        assert!(day.iter().all(|a| a.island().is_none()));
    }

    #[test]
    fn unbounded_money_is_never_raided() {
        let mut sim = DailyRaidSimulator::new(2);
        let ids = sim.add_islands(vec![
            Island::new("Inf", f64::INFINITY, 10),
            Island::new("Nan", f64::NAN, 10),
        ]);
        assert_eq!(sim.raidable_count(), 0);
        let day = sim.simulate_day(5);
        assert!(day.iter().all(|a| *a
            == Assignment::Idle {
                reason: IdleReason::NoTargets
            }));
        let inf = sim.island(ids[0]).unwrap();
        assert_eq!(inf.money, f64::INFINITY);
        assert_eq!(inf.marines, 10);
    }

    #[test]
    fn plunder_matches_the_money_removed() {
        let mut sim = DailyRaidSimulator::new(1);
        let ids = sim.add_islands(vec![Island::new("Half", 2.5, 1)]);
        let day = sim.simulate_day(1);
        assert_eq!(day[0].plunder(), 2.5);
        assert_eq!(sim.island(ids[0]), Some(&Island::new("Half", 0.0, 0)));
    }

    #[test]
    fn priority_uses_obtainable_money_not_ratio() {
        let mut sim = DailyRaidSimulator::new(1);
        // ratio 20 but only 100 money; ratio 4 but 40 crew can take 160.
        let ids = sim.add_islands(vec![Island::new("Rich", 100.0, 5), Island::new("Big", 400.0, 100)]);
        let day = sim.simulate_day(40);
        assert_eq!(day[0].island(), Some(ids[1]));
        assert_eq!(day[0].plunder(), 160.0);
    }

    #[test]
    fn depletion_carries_over_to_the_next_day() {
        let mut sim = DailyRaidSimulator::new(2);
        sim.add_islands(vec![Island::new("A", 400.0, 100)]);
        let days = sim.simulate_days(10, 6);
        let raided: usize = days
            .iter()
            .flatten()
            .filter(|a| a.island().is_some())
            .count();
        assert_eq!(raided, 10);
        assert!(days[5].iter().all(|a| a.island().is_none()));
    }
}
