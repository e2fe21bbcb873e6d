//! Behavioural properties of `EditStack` over a small slot-based target.

use rstest::rstest;

use worldedit_core::abstract_editor::{ApplyFlags, Edit, EditFlags, EditStack, Editable};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Slots {
    values: Vec<i32>,
}

impl Slots {
    fn new(len: usize) -> Self {
        Self {
            values: vec![0; len],
        }
    }
}

impl Editable for Slots {}

/// Sets one slot. Coalesces with later edits to the same slot.
#[derive(Debug)]
struct SetSlot {
    slot: usize,
    old_value: i32,
    new_value: i32,
    flags: EditFlags,
}

impl Edit<Slots> for SetSlot {
    fn apply(&mut self, target: &mut Slots) {
        target.values[self.slot] = self.new_value;
    }

    fn revert(&mut self, target: &mut Slots) {
        target.values[self.slot] = self.old_value;
    }

    fn is_coalescable(&self, other: &dyn Edit<Slots>) -> bool {
        other
            .as_any()
            .downcast_ref::<SetSlot>()
            .is_some_and(|other| other.slot == self.slot)
    }

    fn coalesce(&mut self, other: &mut dyn Edit<Slots>) {
        if let Some(other) = other.as_any_mut().downcast_mut::<SetSlot>() {
            self.new_value = other.new_value;
        }
    }

    fn description(&self) -> &str {
        "Set slot"
    }

    fn flags(&self) -> &EditFlags {
        &self.flags
    }

    fn flags_mut(&mut self) -> &mut EditFlags {
        &mut self.flags
    }
}

/// Builds and applies a `SetSlot` capturing the current value as "old".
fn set_slot(
    stack: &mut EditStack<Slots>,
    target: &mut Slots,
    slot: usize,
    value: i32,
    flags: ApplyFlags,
) {
    let edit = SetSlot {
        slot,
        old_value: target.values[slot],
        new_value: value,
        flags: EditFlags::default(),
    };
    stack.apply(Box::new(edit), target, flags);
}

#[rstest]
#[case::single(&[(0, 1)])]
#[case::distinct_slots(&[(0, 1), (1, 2), (2, 3)])]
#[case::same_slot(&[(1, 5), (1, 6), (1, 7)])]
#[case::interleaved(&[(0, 1), (1, 2), (0, 3), (2, 4), (2, 5), (1, 6)])]
fn revert_all_then_reapply_all_round_trips(#[case] writes: &[(usize, i32)]) {
    let mut stack = EditStack::with_reserve(8);
    let mut slots = Slots::new(3);
    let initial = slots.clone();

    for &(slot, value) in writes {
        set_slot(&mut stack, &mut slots, slot, value, ApplyFlags::default());
    }
    let edited = slots.clone();

    stack.revert_all(&mut slots);
    assert_eq!(slots, initial);
    assert!(stack.applied_is_empty());

    stack.reapply_all(&mut slots);
    assert_eq!(slots, edited);
    assert!(stack.reverted_is_empty());
}

#[rstest]
#[case(2)]
#[case(10)]
#[case(200)]
fn consecutive_same_field_edits_collapse(#[case] count: i32) {
    let mut stack = EditStack::with_reserve(8);
    let mut slots = Slots::new(1);
    slots.values[0] = -1;

    for value in 0..count {
        set_slot(&mut stack, &mut slots, 0, value, ApplyFlags::default());
    }

    assert_eq!(stack.applied_len(), 1);
    assert_eq!(slots.values[0], count - 1);

    stack.revert(1, &mut slots);
    assert_eq!(slots.values[0], -1);
}

#[test]
fn different_fields_do_not_collapse() {
    let mut stack = EditStack::with_reserve(8);
    let mut slots = Slots::new(2);

    set_slot(&mut stack, &mut slots, 0, 1, ApplyFlags::default());
    set_slot(&mut stack, &mut slots, 1, 1, ApplyFlags::default());
    set_slot(&mut stack, &mut slots, 0, 2, ApplyFlags::default());

    assert_eq!(stack.applied_len(), 3);
}

#[test]
fn applying_after_revert_invalidates_redo() {
    let mut stack = EditStack::with_reserve(8);
    let mut slots = Slots::new(2);

    set_slot(&mut stack, &mut slots, 0, 1, ApplyFlags::default());
    set_slot(&mut stack, &mut slots, 1, 2, ApplyFlags::default());
    stack.revert(2, &mut slots);
    assert_eq!(stack.reverted_len(), 2);

    set_slot(&mut stack, &mut slots, 0, 9, ApplyFlags::default());
    assert_eq!(stack.reverted_len(), 0);

    stack.reapply(1, &mut slots);
    assert_eq!(slots.values, vec![9, 0]);
}

#[test]
fn coalescing_after_revert_is_blocked() {
    let mut stack = EditStack::with_reserve(8);
    let mut slots = Slots::new(2);

    set_slot(&mut stack, &mut slots, 0, 1, ApplyFlags::default());
    set_slot(&mut stack, &mut slots, 1, 1, ApplyFlags::default());
    stack.revert(1, &mut slots);

    // The surviving top was closed by the revert.
    set_slot(&mut stack, &mut slots, 0, 2, ApplyFlags::default());
    assert_eq!(stack.applied_len(), 2);

    stack.revert(1, &mut slots);
    assert_eq!(slots.values[0], 1);
}

#[rstest]
#[case(1)]
#[case(3)]
#[case(16)]
fn transparent_followers_group_with_their_leader(#[case] followers: usize) {
    let mut stack = EditStack::with_reserve(8);
    let mut slots = Slots::new(followers + 2);

    set_slot(&mut stack, &mut slots, 0, 1, ApplyFlags::default());
    set_slot(&mut stack, &mut slots, 1, 1, ApplyFlags::closed());
    for slot in 2..followers + 2 {
        set_slot(
            &mut stack,
            &mut slots,
            slot,
            1,
            ApplyFlags {
                closed: true,
                transparent: true,
            },
        );
    }
    let edited = slots.clone();

    stack.revert(1, &mut slots);
    assert_eq!(stack.applied_len(), 1);
    assert_eq!(stack.reverted_len(), followers + 1);
    assert_eq!(slots.values[0], 1);
    assert!(slots.values[1..].iter().all(|&v| v == 0));

    stack.reapply(1, &mut slots);
    assert_eq!(slots, edited);
    assert!(stack.reverted_is_empty());
}

#[test]
fn transparent_bottom_edit_reverts_alone_then_stops() {
    let mut stack = EditStack::with_reserve(8);
    let mut slots = Slots::new(2);

    set_slot(&mut stack, &mut slots, 0, 1, ApplyFlags::transparent());
    stack.revert(1, &mut slots);

    assert!(stack.applied_is_empty());
    assert_eq!(stack.reverted_len(), 1);
    assert_eq!(slots.values[0], 0);
}

#[test]
fn reapply_skips_nothing_past_count() {
    let mut stack = EditStack::with_reserve(8);
    let mut slots = Slots::new(3);

    set_slot(&mut stack, &mut slots, 0, 1, ApplyFlags::default());
    set_slot(&mut stack, &mut slots, 1, 1, ApplyFlags::default());
    set_slot(&mut stack, &mut slots, 2, 1, ApplyFlags::default());
    stack.revert_all(&mut slots);

    stack.reapply(2, &mut slots);
    assert_eq!(slots.values, vec![1, 1, 0]);
    assert_eq!(stack.reverted_len(), 1);
}
