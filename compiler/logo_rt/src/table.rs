//! Per-activation handle table.
//!
//! Slot 0 is never used, so [`ValueRef::NULL`] can never name a live
//! value. A value registered by an entry point is watched: it stays in
//! its slot until the activation ends. Retaining pins the slot; when the
//! last pin is released the slot is freed and may be reused.

use logo_value::Handle;

use crate::ValueRef;

struct Slot {
    value: Handle,
    pins: u32,
}

pub struct HandleTable {
    slots: Vec<Option<Slot>>,
    free: Vec<u32>,
}

impl Default for HandleTable {
    fn default() -> Self {
        HandleTable {
            slots: vec![None],
            free: Vec::new(),
        }
    }
}

impl HandleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a value on the watch list.
    pub fn register(&mut self, value: Handle) -> ValueRef {
        let slot = Some(Slot { value, pins: 0 });
        if let Some(index) = self.free.pop() {
            self.slots[index as usize] = slot;
            return ValueRef(index);
        }
        let Ok(index) = u32::try_from(self.slots.len()) else {
            return ValueRef::NULL;
        };
        self.slots.push(slot);
        ValueRef(index)
    }

    pub fn get(&self, value: ValueRef) -> Option<&Handle> {
        self.slots
            .get(value.0 as usize)
            .and_then(Option::as_ref)
            .map(|slot| &slot.value)
    }

    fn slot_mut(&mut self, value: ValueRef) -> Option<&mut Slot> {
        if value.is_null() {
            return None;
        }
        self.slots.get_mut(value.0 as usize).and_then(Option::as_mut)
    }

    /// Pin a slot. False for a dead or null reference.
    pub fn retain(&mut self, value: ValueRef) -> bool {
        match self.slot_mut(value) {
            Some(slot) => {
                slot.pins = slot.pins.saturating_add(1);
                true
            }
            None => false,
        }
    }

    /// Drop one pin. The slot is freed when its last pin goes.
    ///
    /// Releasing a slot that was never retained is refused, so a watched
    /// value cannot be freed out from under the activation.
    pub fn release(&mut self, value: ValueRef) -> bool {
        let Some(slot) = self.slot_mut(value) else {
            return false;
        };
        if slot.pins == 0 {
            return false;
        }
        slot.pins -= 1;
        if slot.pins == 0 {
            self.slots[value.0 as usize] = None;
            self.free.push(value.0);
        }
        true
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
