use crate::{entities::request::Request, time::Time, variates::Variates};

entity_id!(ProjectId);

/// A prioritized source of requests. Priority equals the project id; smaller
/// ids are served first. Projects are immutable and do not track the
/// requests they produce.
#[derive(Debug, Copy, Clone, derive_new::new)]
pub(crate) struct Project {
    id: ProjectId,
}

impl Project {
    /// Produces a new pending request stamped with the current time, a drawn
    /// service duration and equipment kind, and this project's priority.
    pub(crate) fn generate(&self, now: Time, variates: &mut Variates) -> Request {
        Request::builder()
            .project(self.id)
            .kind(variates.kind())
            .priority(self.id.into_usize())
            .service(variates.service())
            .arrived(now)
            .build()
    }
}
