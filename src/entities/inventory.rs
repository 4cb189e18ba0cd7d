//! Fixed-capacity item slots.

use serde::{Deserialize, Serialize};

use crate::animation::FrameRef;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Weapon,
    HealthPack,
    /// Sentinel for an unoccupied slot.
    #[default]
    Empty,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub kind: ItemKind,
    pub name: String,
    /// Icon frame in the renderer's atlas, if the item has one.
    #[serde(default)]
    pub icon: Option<FrameRef>,
}

impl Item {
    pub fn new(kind: ItemKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            icon: None,
        }
    }

    pub fn with_icon(mut self, icon: FrameRef) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.kind == ItemKind::Empty
    }
}

/// Ordered slots whose count never changes after construction.
#[derive(Clone, Debug, PartialEq)]
pub struct Inventory {
    slots: Box<[Item]>,
    selected: usize,
    pub is_open: bool,
}

impl Inventory {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![Item::empty(); capacity].into_boxed_slice(),
            selected: 0,
            is_open: false,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[Item] {
        &self.slots
    }

    /// Number of occupied slots.
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|item| !item.is_empty()).count()
    }

    /// Put `item` into the first empty slot. Returns `false`, leaving every
    /// slot untouched, when the inventory is full or `item` is itself empty.
    pub fn add_item(&mut self, item: Item) -> bool {
        if item.is_empty() {
            return false;
        }
        match self.slots.iter_mut().find(|slot| slot.is_empty()) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Select a slot, clamping out-of-range indices to the last slot.
    pub fn select(&mut self, index: usize) {
        self.selected = index.min(self.capacity().saturating_sub(1));
    }

    /// The item in the selected slot, or `None` when that slot is empty.
    pub fn selected_item(&self) -> Option<&Item> {
        self.slots
            .get(self.selected)
            .filter(|item| !item.is_empty())
    }

    /// Remove and return the selected item, leaving the slot empty.
    pub fn take_selected(&mut self) -> Option<Item> {
        let slot = self.slots.get_mut(self.selected)?;
        if slot.is_empty() {
            return None;
        }
        Some(std::mem::take(slot))
    }
}
