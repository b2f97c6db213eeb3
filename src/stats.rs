use rustc_hash::FxHashMap;

use crate::{
    entities::{
        project::ProjectId,
        request::{Kind, Request, Status},
        unit::{EquipmentUnit, UnitId},
    },
    time::Time,
};

/// Append-only record of every request that reached a terminal status.
/// Pending requests never appear here.
#[derive(Debug, Default)]
pub(crate) struct Log {
    inner: Vec<Request>,
}

impl Log {
    delegate::delegate! {
        to self.inner {
            pub(crate) fn push(&mut self, request: Request);
            pub(crate) fn len(&self) -> usize;
        }
    }

    pub(crate) fn records(&self) -> &[Request] {
        &self.inner
    }
}

/// Per-source behavior over a whole run. Means and variances cover only the
/// non-rejected subset; variances are the population form `E[X²] − E[X]²`.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct SourceStats {
    pub id: ProjectId,
    pub total: usize,
    pub rejected: usize,
    pub p_reject: f64,
    pub mean_wait: f64,
    pub mean_service: f64,
    pub mean_sojourn: f64,
    pub var_wait: f64,
    pub var_service: f64,
}

/// Per-unit behavior over a whole run.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct UnitStats {
    pub id: UnitId,
    pub kind: Kind,
    pub busy_time: f64,
    pub utilization: f64,
}

/// Post-hoc summary of a completed run: per-source rows in ascending id
/// order, per-unit rows in fleet order, and grand means and totals. Grand
/// means divide by the configured source and unit counts, so sources that
/// never generated contribute zero.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Summary {
    pub sources: Vec<SourceStats>,
    pub units: Vec<UnitStats>,

    pub mean_p_reject: f64,
    pub mean_utilization: f64,
    pub mean_sojourn: f64,

    pub completed: usize,
    pub rejected: usize,
    pub total_wait: f64,
    pub total_time: f64,
}

// Every ratio in the summary yields 0 when the denominator is 0: a source
// with no requests or an empty run is a zero row, not an error.
fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

#[derive(Debug, Default)]
struct SourceAcc {
    total: usize,
    rejected: usize,
    wait: f64,
    wait_sq: f64,
    service: f64,
    service_sq: f64,
}

impl Summary {
    pub(crate) fn compute(
        records: &[Request],
        units: &[EquipmentUnit],
        total_time: Time,
        nr_sources: usize,
    ) -> Self {
        let mut groups: FxHashMap<ProjectId, SourceAcc> = FxHashMap::default();
        for request in records {
            let acc = groups.entry(request.project).or_default();
            acc.total += 1;
            if request.status() == Status::Rejected {
                acc.rejected += 1;
            } else {
                let wait = request.waited().into_f64();
                let service = request.service.into_f64();
                acc.wait += wait;
                acc.wait_sq += wait * wait;
                acc.service += service;
                acc.service_sq += service * service;
            }
        }

        let mut completed = 0;
        let mut rejected = 0;
        let mut total_wait = 0.0;
        let mut sources: Vec<SourceStats> = groups
            .into_iter()
            .map(|(id, acc)| {
                let served = (acc.total - acc.rejected) as f64;
                let mean_wait = ratio(acc.wait, served);
                let mean_service = ratio(acc.service, served);
                completed += acc.total - acc.rejected;
                rejected += acc.rejected;
                total_wait += acc.wait;
                SourceStats {
                    id,
                    total: acc.total,
                    rejected: acc.rejected,
                    p_reject: ratio(acc.rejected as f64, acc.total as f64),
                    mean_wait,
                    mean_service,
                    mean_sojourn: mean_wait + mean_service,
                    var_wait: ratio(acc.wait_sq, served) - mean_wait * mean_wait,
                    var_service: ratio(acc.service_sq, served) - mean_service * mean_service,
                }
            })
            .collect();
        sources.sort_by_key(|stats| stats.id);

        let elapsed = total_time.into_f64();
        let units: Vec<UnitStats> = units
            .iter()
            .map(|unit| UnitStats {
                id: unit.id(),
                kind: unit.kind(),
                busy_time: unit.busy_time().into_f64(),
                utilization: ratio(unit.busy_time().into_f64(), elapsed),
            })
            .collect();

        Summary {
            mean_p_reject: ratio(sources.iter().map(|s| s.p_reject).sum(), nr_sources as f64),
            mean_sojourn: ratio(sources.iter().map(|s| s.mean_sojourn).sum(), nr_sources as f64),
            mean_utilization: ratio(
                units.iter().map(|u| u.utilization).sum(),
                units.len() as f64,
            ),
            sources,
            units,
            completed,
            rejected,
            total_wait,
            total_time: elapsed,
        }
    }
}
