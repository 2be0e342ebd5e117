use {
    super::types::StakeStatus,
    stakeview_common::{PeriodCatalog, StakeRecord},
};

/// Display state of `record` at `now`. A stake whose period is missing from
/// the catalog cannot mature and stays `ActiveAccruing` while active.
pub fn classify(record: &StakeRecord, catalog: &PeriodCatalog, now: i64) -> StakeStatus {
    if !record.active {
        return StakeStatus::Withdrawn;
    }
    match catalog.get(record.period_index) {
        Some(period) if record.elapsed_secs(now) >= period.duration_secs => {
            StakeStatus::ActiveMaturityReached
        }
        _ => StakeStatus::ActiveAccruing,
    }
}
