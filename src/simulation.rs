use crate::{
    buffer::Buffer,
    dispatch,
    entities::{project::Project, unit::EquipmentUnit},
    stats::Log,
    time::Time,
    variates::Variates,
};

/// The simulation proper: advances the clock tick by tick and orchestrates
/// generation, admission, completion, and selection. The driver is the only
/// component with global control flow; requests hand off strictly downward
/// from project to buffer to unit to log.
#[derive(Debug, typed_builder::TypedBuilder)]
pub(crate) struct Simulation {
    // Run-time
    #[builder(default, setter(skip))]
    cur_time: Time,
    #[builder(default, setter(skip))]
    generated: usize,
    #[builder(default, setter(skip))]
    log: Log,

    // Entities
    variates: Variates,
    projects: Vec<Project>,
    units: Vec<EquipmentUnit>,
    buffer: Buffer,

    // Used for termination
    budget: usize,
}

/// What a finished run hands to the aggregator.
#[derive(Debug)]
pub(crate) struct Outcome {
    pub(crate) log: Log,
    pub(crate) units: Vec<EquipmentUnit>,
    pub(crate) elapsed: Time,
}

impl Simulation {
    /// Runs until the arrival budget is exhausted and the admitted backlog is
    /// fully drained: buffer empty and every unit free.
    pub(crate) fn run(mut self) -> Outcome {
        while !self.should_stop() {
            self.step();
        }
        self.finish()
    }

    fn step(&mut self) {
        // One arrival while the budget lasts. Placement precedes completion
        // and selection, so a same-tick arrival occupies a slot before
        // eviction pressure is evaluated.
        if self.generated < self.budget {
            let pick = self.variates.project(self.projects.len());
            let request = self.projects[pick].generate(self.cur_time, &mut self.variates);
            tracing::trace!(
                time = %self.cur_time,
                project = %request.project,
                kind = %request.kind,
                "arrival"
            );
            if let Some(evicted) = dispatch::place(&mut self.buffer, &mut self.log, request) {
                tracing::debug!(time = %self.cur_time, project = %evicted, "evicted");
            }
            self.generated += 1;
        }

        // Completions run before selection: a unit freed this tick can take
        // buffered work in the same tick.
        for unit in &mut self.units {
            if let Some(done) = unit.complete(self.cur_time) {
                tracing::trace!(
                    time = %self.cur_time,
                    unit = %unit.id(),
                    project = %done.project,
                    due = %unit.completes_at(),
                    "completed"
                );
                self.log.push(done);
            }
        }

        let assigned = dispatch::select(&mut self.units, &mut self.buffer, self.cur_time);
        for assignment in &assigned {
            tracing::trace!(
                time = %self.cur_time,
                unit = %assignment.unit,
                project = %assignment.project,
                "assigned"
            );
        }

        tracing::debug!(
            time = %self.cur_time,
            buffer = %self.buffer,
            occupied = self.buffer.occupied_count(),
            assigned = assigned.len(),
            free = self.units.iter().filter(|unit| unit.is_free()).count(),
            terminal = self.log.len(),
            "tick"
        );

        self.cur_time += self.variates.interarrival();
    }

    fn should_stop(&self) -> bool {
        self.generated >= self.budget
            && self.buffer.is_empty()
            && self.units.iter().all(EquipmentUnit::is_free)
    }

    fn finish(self) -> Outcome {
        Outcome {
            log: self.log,
            units: self.units,
            elapsed: self.cur_time,
        }
    }
}
