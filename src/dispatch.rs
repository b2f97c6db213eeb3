use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::{
    buffer::Buffer,
    entities::{
        project::ProjectId,
        request::Request,
        unit::{EquipmentUnit, UnitId},
    },
    stats::Log,
    time::Time,
};

/// Assignments made by one selection round. Most ticks produce few.
pub(crate) type Assignments = SmallVec<[Assignment; 8]>;

#[derive(Debug, Copy, Clone, derive_new::new)]
pub(crate) struct Assignment {
    pub(crate) unit: UnitId,
    pub(crate) project: ProjectId,
}

/// Admission control: the new arrival is always admitted. When the buffer is
/// full, exactly one buffered request is evicted from the slot at the write
/// cursor, marked rejected, and logged. Eviction is positional, blind to the
/// victim's priority and wait time.
///
/// Returns the evicted request's source, if any.
pub(crate) fn place(buffer: &mut Buffer, log: &mut Log, request: Request) -> Option<ProjectId> {
    match buffer.try_insert(request) {
        Ok(()) => None,
        Err(request) => {
            debug_assert!(buffer.is_full(), "insert only fails when full");
            let mut victim = buffer
                .take_at_cursor()
                .expect("full buffer has an occupied cursor slot");
            victim.reject();
            let evicted = victim.project;
            log.push(victim);
            assert!(
                buffer.try_insert(request).is_ok(),
                "eviction freed exactly one slot"
            );
            Some(evicted)
        }
    }
}

/// Priority matching: groups occupied slots by source, serves only the
/// numerically smallest source id this round, and hands its buffered requests
/// to free units in unit order. Lower-priority groups wait for a later round
/// even while units sit free. Equipment kind is never compared.
pub(crate) fn select(units: &mut [EquipmentUnit], buffer: &mut Buffer, now: Time) -> Assignments {
    let mut assigned = Assignments::new();

    let mut groups: FxHashMap<ProjectId, Vec<usize>> = FxHashMap::default();
    for (slot, request) in buffer.occupied() {
        groups.entry(request.project).or_default().push(slot);
    }
    let target = match groups.keys().min() {
        Some(&id) => id,
        None => return assigned,
    };

    let mut slots = groups.remove(&target).expect("target group exists").into_iter();
    for unit in units.iter_mut().filter(|unit| unit.is_free()) {
        let slot = match slots.next() {
            Some(slot) => slot,
            None => break,
        };
        let request = buffer.take_slot(slot).expect("grouped slot is occupied");
        assigned.push(Assignment::new(unit.id(), target));
        unit.assign(request, now);
    }
    assigned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        entities::request::{Kind, Status},
        time::Delta,
    };

    fn request(project: usize, arrived: f64) -> Request {
        Request::builder()
            .project(ProjectId::new(project))
            .kind(Kind::ConcreteMixer)
            .priority(project)
            .service(Delta::new(7.0))
            .arrived(Time::new(arrived))
            .build()
    }

    fn units(count: usize) -> Vec<EquipmentUnit> {
        (1..=count)
            .map(|i| {
                EquipmentUnit::builder()
                    .id(UnitId::new(i))
                    .kind(Kind::Excavator)
                    .build()
            })
            .collect()
    }

    #[test]
    fn full_buffer_placement_keeps_occupancy() {
        let mut buffer = Buffer::new(3);
        let mut log = Log::default();
        for i in 0..3 {
            assert!(place(&mut buffer, &mut log, request(1, i as f64)).is_none());
        }
        let evicted = place(&mut buffer, &mut log, request(2, 3.0));
        assert_eq!(evicted, Some(ProjectId::new(1)));
        assert_eq!(buffer.occupied_count(), 3);
        assert_eq!(log.len(), 1);
        assert_eq!(log.records()[0].status(), Status::Rejected);
    }

    #[test]
    fn capacity_one_eviction_chain() {
        // Single source, no equipment ever freed: each arrival evicts the
        // previous occupant and only the last survives.
        let mut buffer = Buffer::new(1);
        let mut log = Log::default();
        place(&mut buffer, &mut log, request(1, 0.0));
        place(&mut buffer, &mut log, request(1, 1.0));
        place(&mut buffer, &mut log, request(1, 2.0));
        assert_eq!(log.len(), 2);
        assert_eq!(log.records()[0].arrived, Time::new(0.0));
        assert_eq!(log.records()[1].arrived, Time::new(1.0));
        let survivor: Vec<_> = buffer.occupied().collect();
        assert_eq!(survivor.len(), 1);
        assert_eq!(survivor[0].1.arrived, Time::new(2.0));
    }

    #[test]
    fn drains_highest_priority_group_in_one_round() {
        let mut buffer = Buffer::new(10);
        let mut log = Log::default();
        for i in 0..3 {
            place(&mut buffer, &mut log, request(2, i as f64));
        }
        place(&mut buffer, &mut log, request(5, 3.0));
        let mut fleet = units(4);
        let assigned = select(&mut fleet, &mut buffer, Time::new(4.0));
        assert_eq!(assigned.len(), 3);
        assert!(assigned.iter().all(|a| a.project == ProjectId::new(2)));
        // The lower-priority source keeps its slot until a later round.
        let remaining: Vec<_> = buffer.occupied().collect();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].1.project, ProjectId::new(5));
        assert_eq!(fleet.iter().filter(|u| u.is_free()).count(), 1);
    }

    #[test]
    fn lower_priority_waits_even_with_free_units() {
        let mut buffer = Buffer::new(10);
        let mut log = Log::default();
        place(&mut buffer, &mut log, request(3, 0.0));
        place(&mut buffer, &mut log, request(7, 0.0));
        let mut fleet = units(2);
        let first = select(&mut fleet, &mut buffer, Time::new(1.0));
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].project, ProjectId::new(3));
        assert_eq!(buffer.occupied_count(), 1);
        // A later round picks up the remaining group.
        let second = select(&mut fleet, &mut buffer, Time::new(2.0));
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].project, ProjectId::new(7));
    }

    #[test]
    fn no_unit_serves_twice_per_round() {
        let mut buffer = Buffer::new(10);
        let mut log = Log::default();
        for i in 0..5 {
            place(&mut buffer, &mut log, request(1, i as f64));
        }
        let mut fleet = units(2);
        let assigned = select(&mut fleet, &mut buffer, Time::new(5.0));
        assert_eq!(assigned.len(), 2);
        assert_eq!(buffer.occupied_count(), 3);
        assert!(fleet.iter().all(|u| !u.is_free()));
        let mut served: Vec<_> = assigned.iter().map(|a| a.unit).collect();
        served.dedup();
        assert_eq!(served.len(), 2);
    }

    #[test]
    fn empty_buffer_selects_nothing() {
        let mut buffer = Buffer::new(4);
        let mut fleet = units(2);
        assert!(select(&mut fleet, &mut buffer, Time::ZERO).is_empty());
    }
}
