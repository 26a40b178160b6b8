//! Dataset checks run by `plunder validate` before any engine sees the rows.

use std::collections::HashSet;
use std::fmt;

use crate::data::loader::RawIsland;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// The row cannot become an island.
    Error,
    /// The row loads but the engines skip it.
    Warning,
    /// The island never beats the raid threshold.
    Info,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        })
    }
}

/// One problem with one row, optionally narrowed to a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub level: Level,
    pub row: usize,
    pub field: Option<&'static str>,
    pub message: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] islands[{}]", self.level, self.row)?;
        if let Some(field) = self.field {
            write!(f, ".{field}")?;
        }
        write!(f, ": {}", self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct DatasetReport {
    findings: Vec<Finding>,
}

impl DatasetReport {
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.tally(Level::Error) > 0
    }

    pub fn tally(&self, level: Level) -> usize {
        self.findings.iter().filter(|finding| finding.level == level).count()
    }

    fn note(&mut self, level: Level, row: usize, field: Option<&'static str>, message: impl Into<String>) {
        self.findings.push(Finding {
            level,
            row,
            field,
            message: message.into(),
        });
    }
}

/// Check every row of a dataset. Rows with errors are the ones
/// [usable_islands](crate::data::loader::usable_islands) would drop.
pub fn validate_islands(islands: &[RawIsland], raid_ratio_threshold: f64) -> DatasetReport {
    let mut report = DatasetReport::default();
    let mut names = HashSet::new();

    for (row, island) in islands.iter().enumerate() {
        if island.name.trim().is_empty() {
            report.note(Level::Error, row, Some("name"), "missing non-empty 'name'");
        } else if !names.insert(island.name.as_str()) {
            report.note(
                Level::Warning,
                row,
                Some("name"),
                format!("duplicate name '{}'", island.name),
            );
        }

        let money_ok = island.money.is_finite() && island.money >= 0.0;
        if !money_ok {
            report.note(
                Level::Error,
                row,
                Some("money"),
                format!("money must be finite and not negative, got {}", island.money),
            );
        }

        let marines = match u32::try_from(island.marines) {
            Ok(0) => {
                report.note(
                    Level::Warning,
                    row,
                    Some("marines"),
                    "no marines: ratio is undefined, island will be skipped",
                );
                continue;
            }
            Ok(marines) => marines,
            Err(_) => {
                report.note(
                    Level::Error,
                    row,
                    Some("marines"),
                    format!("marines out of range, got {}", island.marines),
                );
                continue;
            }
        };

        let ratio = island.money / f64::from(marines);
        if money_ok && ratio <= raid_ratio_threshold {
            report.note(
                Level::Info,
                row,
                None,
                format!("ratio {ratio:.3} does not beat the raid threshold {raid_ratio_threshold}"),
            );
        }
    }

    report
}
