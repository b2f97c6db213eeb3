use std::fmt;

use crate::entities::request::Request;

/// Fixed-capacity staging area for requests awaiting assignment.
///
/// Not a queue: an indexed arena of optional slots plus a single rotating
/// write cursor. Insertion probes from the cursor and wraps once, so slot
/// order follows insertion sequence only until the probe skips over a
/// later-vacated gap. Eviction targets whatever sits at the cursor now, not
/// the oldest entry.
#[derive(Debug)]
pub(crate) struct Buffer {
    slots: Vec<Option<Request>>,
    cursor: usize,
}

impl Buffer {
    pub(crate) fn new(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self { slots, cursor: 0 }
    }

    /// Stores `request` in the first empty slot found while scanning from the
    /// cursor, wrapping once, and advances the cursor past it. Hands the
    /// request back only when every slot is occupied.
    pub(crate) fn try_insert(&mut self, request: Request) -> Result<(), Request> {
        let capacity = self.slots.len();
        for probe in 0..capacity {
            let index = (self.cursor + probe) % capacity;
            if self.slots[index].is_none() {
                self.slots[index] = Some(request);
                self.cursor = (index + 1) % capacity;
                return Ok(());
            }
        }
        Err(request)
    }

    /// Removes and returns the request at the cursor slot, if any. The cursor
    /// stays put; used only by the admission-control eviction path.
    pub(crate) fn take_at_cursor(&mut self) -> Option<Request> {
        self.slots[self.cursor].take()
    }

    /// Removes the request in `slot`, if any. Used by dispatch, which holds
    /// slot indices from a prior scan.
    pub(crate) fn take_slot(&mut self, slot: usize) -> Option<Request> {
        self.slots[slot].take()
    }

    /// Occupied slots in index order.
    pub(crate) fn occupied(&self) -> impl Iterator<Item = (usize, &Request)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|request| (index, request)))
    }

    pub(crate) fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub(crate) fn is_full(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_some())
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_none())
    }
}

impl fmt::Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for slot in &self.slots {
            match slot {
                Some(request) => write!(f, "{} ", request.project)?,
                None => write!(f, "- ")?,
            }
        }
        write!(f, "]")
    }
}
