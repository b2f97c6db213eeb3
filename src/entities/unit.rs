use crate::{
    entities::request::{Kind, Request},
    time::{Delta, Time},
};

entity_id!(UnitId);

/// A single-capacity server. The unit is busy exactly while it holds a
/// request; there is no separate status flag to fall out of sync.
#[derive(Debug, typed_builder::TypedBuilder)]
pub(crate) struct EquipmentUnit {
    id: UnitId,
    kind: Kind,

    #[builder(default, setter(skip))]
    current: Option<Request>,
    #[builder(default, setter(skip))]
    completes_at: Time,
    #[builder(default, setter(skip))]
    busy: Delta,
}

impl EquipmentUnit {
    pub(crate) fn id(&self) -> UnitId {
        self.id
    }

    pub(crate) fn kind(&self) -> Kind {
        self.kind
    }

    pub(crate) fn is_free(&self) -> bool {
        self.current.is_none()
    }

    /// Cumulative busy time. Charged with the full service duration at
    /// assignment, not incrementally.
    pub(crate) fn busy_time(&self) -> Delta {
        self.busy
    }

    /// The instant the in-flight request's service interval elapses.
    /// Meaningful only while busy.
    pub(crate) fn completes_at(&self) -> Time {
        self.completes_at
    }

    /// Takes ownership of `request` and begins servicing it.
    pub(crate) fn assign(&mut self, mut request: Request, now: Time) {
        debug_assert!(self.is_free(), "assignment to a busy unit");
        request.start_service(now);
        self.completes_at = now + request.service;
        self.busy += request.service;
        self.current = Some(request);
    }

    /// If busy and the service interval has elapsed, stamps the request's
    /// completion instant and hands it back for logging. The hand-back is the
    /// only transition back to free.
    pub(crate) fn complete(&mut self, now: Time) -> Option<Request> {
        if self.current.is_none() || now < self.completes_at {
            return None;
        }
        let mut request = self.current.take()?;
        request.finish(now);
        Some(request)
    }
}
