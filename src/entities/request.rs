use crate::{
    entities::project::ProjectId,
    time::{Delta, Time},
};

/// One unit of work requiring one equipment unit for a fixed duration.
///
/// A request is owned by exactly one holder at a time: the generating project
/// (transiently), a buffer slot, an equipment unit, or the completion log.
/// Ownership moves by hand-off, never by sharing.
#[derive(Debug, Clone, typed_builder::TypedBuilder, serde::Serialize)]
pub struct Request {
    pub project: ProjectId,
    pub kind: Kind,
    pub priority: usize,
    pub service: Delta,
    pub arrived: Time,

    #[builder(default, setter(skip))]
    status: Status,
    #[builder(default, setter(skip))]
    waited: Delta,
    #[builder(default, setter(skip))]
    completed: Option<Time>,
}

// State transitions. Each terminal field is written in exactly one place;
// a second write is an internal-consistency fault.
impl Request {
    /// Marks the request processed and records how long it sat buffered.
    /// Called once, when an equipment unit takes the request.
    pub(crate) fn start_service(&mut self, now: Time) {
        debug_assert!(self.status == Status::Pending, "request already terminal");
        self.waited = now - self.arrived;
        self.status = Status::Processed;
    }

    /// Stamps the completion instant. Called once, when the owning unit
    /// recognizes the service interval has elapsed.
    pub(crate) fn finish(&mut self, now: Time) {
        debug_assert!(self.completed.is_none(), "completion stamped twice");
        self.completed = Some(now);
    }

    /// Marks the request rejected. Called once, on eviction from the buffer.
    pub(crate) fn reject(&mut self) {
        debug_assert!(self.status == Status::Pending, "request already terminal");
        self.status = Status::Rejected;
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn waited(&self) -> Delta {
        self.waited
    }

    pub fn completed(&self) -> Option<Time> {
        self.completed
    }
}

#[derive(
    Debug, Copy, Clone, PartialEq, Eq, derivative::Derivative, serde::Serialize, serde::Deserialize,
)]
#[derivative(Default)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[derivative(Default)]
    Pending,
    Processed,
    Rejected,
}

/// Equipment category label. Carried by both requests and units but never
/// compared by dispatch: any free unit may take any request.
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    derive_more::Display,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    #[display(fmt = "excavator")]
    Excavator,
    #[display(fmt = "crane")]
    Crane,
    #[display(fmt = "concrete_mixer")]
    ConcreteMixer,
}

impl Kind {
    pub const ALL: [Kind; 3] = [Kind::Excavator, Kind::Crane, Kind::ConcreteMixer];
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> Request {
        Request::builder()
            .project(ProjectId::new(3))
            .kind(Kind::Crane)
            .priority(3)
            .service(Delta::new(7.0))
            .arrived(Time::new(2.0))
            .build()
    }

    #[test]
    fn starts_pending() {
        let req = request();
        assert_eq!(req.status(), Status::Pending);
        assert_eq!(req.waited(), Delta::ZERO);
        assert!(req.completed().is_none());
    }

    #[test]
    fn service_records_wait() {
        let mut req = request();
        req.start_service(Time::new(5.5));
        assert_eq!(req.status(), Status::Processed);
        assert_eq!(req.waited(), Delta::new(3.5));
    }

    #[test]
    #[should_panic(expected = "already terminal")]
    fn terminal_status_set_once() {
        let mut req = request();
        req.reject();
        req.start_service(Time::new(5.5));
    }
}
