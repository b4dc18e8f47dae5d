//! # Active Lifetime List
//!
//! Intrusive doubly linked list over the active slots, ordered by
//! activation tick.
//!
//! The pool's clock never moves backwards, so entries are appended with
//! non-decreasing activation ticks and the head is always the oldest
//! active slot. Expiry therefore only ever inspects the head: a sweep
//! pops entries until it meets one still alive, and the cost of a tick
//! is proportional to the number of expirations, not to the number of
//! active slots.
//!
//! Links are slot indices into a pre-allocated array, not pointers, so
//! the whole structure is safe code and never allocates after
//! construction.

/// Nil link marker.
const NIL: u32 = u32::MAX;

/// Per-slot link record.
#[derive(Clone, Copy, Debug)]
struct Link {
    /// Previous active slot in activation order, or nil.
    prev: u32,
    /// Next active slot in activation order, or nil.
    next: u32,
    /// Clock value when the slot was activated.
    activated_at: u64,
    /// Whether the slot is currently threaded into the list.
    linked: bool,
}

impl Default for Link {
    fn default() -> Self {
        Self {
            prev: NIL,
            next: NIL,
            activated_at: 0,
            linked: false,
        }
    }
}

/// Intrusive activation-order list over active slot indices.
///
/// Supports O(1) insertion at the tail, O(1) removal by index, and
/// pop-from-head expiry in O(1) per expired entry.
pub struct ActiveList {
    /// Link records, one per slot.
    links: Box<[Link]>,
    /// Oldest active slot, or nil when empty.
    head: u32,
    /// Newest active slot, or nil when empty.
    tail: u32,
    /// Number of active slots.
    len: usize,
}

impl ActiveList {
    /// Creates an empty list covering `capacity` slots.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Number of slot indices to cover
    ///
    /// # Panics
    ///
    /// Panics if capacity is zero or exceeds `u32::MAX`.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than zero");
        assert!(
            capacity <= u32::MAX as usize,
            "Capacity cannot exceed u32::MAX"
        );

        Self {
            links: vec![Link::default(); capacity].into_boxed_slice(),
            head: NIL,
            tail: NIL,
            len: 0,
        }
    }

    /// Returns the number of active slots.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Checks if no slot is active.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Checks if a slot is currently tracked as active.
    #[inline]
    #[must_use]
    pub fn contains(&self, index: u32) -> bool {
        self.links
            .get(index as usize)
            .is_some_and(|link| link.linked)
    }

    /// Returns the activation tick of an active slot.
    ///
    /// # Returns
    ///
    /// The clock value at activation, or None if the slot is not
    /// active.
    #[inline]
    #[must_use]
    pub fn activation_tick(&self, index: u32) -> Option<u64> {
        self.links
            .get(index as usize)
            .filter(|link| link.linked)
            .map(|link| link.activated_at)
    }

    /// Appends a slot at the tail of the list.
    ///
    /// # Arguments
    ///
    /// * `index` - The slot index to activate; must not already be
    ///   tracked
    /// * `activated_at` - Current clock value; must not be less than
    ///   the tail's activation tick so the list stays ordered
    pub fn push_back(&mut self, index: u32, activated_at: u64) {
        debug_assert!(!self.contains(index), "Slot already active");

        if self.tail == NIL {
            self.head = index;
        } else {
            let tail_idx = self.tail as usize;
            debug_assert!(
                self.links[tail_idx].activated_at <= activated_at,
                "Activation ticks must be monotonic"
            );
            self.links[tail_idx].next = index;
        }

        self.links[index as usize] = Link {
            prev: self.tail,
            next: NIL,
            activated_at,
            linked: true,
        };
        self.tail = index;
        self.len += 1;
    }

    /// Unlinks a slot from anywhere in the list.
    ///
    /// # Arguments
    ///
    /// * `index` - The slot index to deactivate
    ///
    /// # Returns
    ///
    /// The slot's activation tick, or None if it was not active.
    pub fn remove(&mut self, index: u32) -> Option<u64> {
        let idx = index as usize;
        let link = *self.links.get(idx).filter(|link| link.linked)?;

        if link.prev == NIL {
            self.head = link.next;
        } else {
            self.links[link.prev as usize].next = link.next;
        }

        if link.next == NIL {
            self.tail = link.prev;
        } else {
            self.links[link.next as usize].prev = link.prev;
        }

        self.links[idx] = Link::default();
        self.len -= 1;
        Some(link.activated_at)
    }

    /// Pops the oldest slot if its lifetime has elapsed.
    ///
    /// Call in a loop until None to drain everything expired this tick,
    /// oldest first.
    ///
    /// # Arguments
    ///
    /// * `now` - Current clock value
    /// * `ttl` - Lifetime in ticks; a slot expires once `now` is at
    ///   least `ttl` ticks past its activation
    ///
    /// # Returns
    ///
    /// The expired slot index, or None if the oldest slot (and
    /// therefore every slot) is still alive.
    pub fn pop_expired(&mut self, now: u64, ttl: u64) -> Option<u32> {
        if self.head == NIL {
            return None;
        }

        let index = self.head;
        let activated_at = self.links[index as usize].activated_at;
        if now - activated_at < ttl {
            return None;
        }

        self.remove(index);
        Some(index)
    }

    /// Iterates over active slots in activation order, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        std::iter::successors((self.head != NIL).then_some(self.head), |&index| {
            let next = self.links[index as usize].next;
            (next != NIL).then_some(next)
        })
    }

    /// Unlinks every slot and empties the list.
    ///
    /// This is a **zero-allocation** operation.
    pub fn clear(&mut self) {
        for link in self.links.iter_mut() {
            *link = Link::default();
        }
        self.head = NIL;
        self.tail = NIL;
        self.len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_iterate_in_order() {
        let mut active = ActiveList::new(8);
        active.push_back(5, 0);
        active.push_back(1, 0);
        active.push_back(7, 2);

        let order: Vec<u32> = active.iter().collect();
        assert_eq!(order, vec![5, 1, 7]);
        assert_eq!(active.len(), 3);
        assert!(active.contains(1));
        assert!(!active.contains(0));
    }

    #[test]
    fn test_remove_head_middle_tail() {
        let mut active = ActiveList::new(8);
        active.push_back(0, 0);
        active.push_back(1, 0);
        active.push_back(2, 0);
        active.push_back(3, 0);

        assert_eq!(active.remove(0), Some(0)); // head
        assert_eq!(active.remove(2), Some(0)); // middle
        assert_eq!(active.remove(3), Some(0)); // tail

        let order: Vec<u32> = active.iter().collect();
        assert_eq!(order, vec![1]);
        assert_eq!(active.remove(1), Some(0));
        assert!(active.is_empty());
        assert_eq!(active.iter().count(), 0);
    }

    #[test]
    fn test_remove_untracked_returns_none() {
        let mut active = ActiveList::new(4);
        active.push_back(2, 10);

        assert_eq!(active.remove(3), None);
        assert_eq!(active.remove(2), Some(10));
        assert_eq!(active.remove(2), None);
    }

    #[test]
    fn test_activation_tick() {
        let mut active = ActiveList::new(4);
        active.push_back(1, 42);

        assert_eq!(active.activation_tick(1), Some(42));
        assert_eq!(active.activation_tick(0), None);
    }

    #[test]
    fn test_pop_expired_boundary() {
        let mut active = ActiveList::new(4);
        active.push_back(0, 10);

        // Age 2 of 3: still alive
        assert_eq!(active.pop_expired(12, 3), None);
        // Age 3 of 3: expired
        assert_eq!(active.pop_expired(13, 3), Some(0));
        assert_eq!(active.pop_expired(13, 3), None);
    }

    #[test]
    fn test_pop_expired_drains_oldest_first() {
        let mut active = ActiveList::new(8);
        active.push_back(4, 0);
        active.push_back(5, 1);
        active.push_back(6, 5);

        // At tick 6 with ttl 5, slots activated at 0 and 1 are due
        assert_eq!(active.pop_expired(6, 5), Some(4));
        assert_eq!(active.pop_expired(6, 5), Some(5));
        assert_eq!(active.pop_expired(6, 5), None);
        assert!(active.contains(6));
    }

    #[test]
    fn test_relink_after_expiry() {
        let mut active = ActiveList::new(4);
        active.push_back(0, 0);
        active.push_back(1, 0);

        assert_eq!(active.pop_expired(10, 5), Some(0));

        // Slot 0 can come straight back at the tail
        active.push_back(0, 10);
        let order: Vec<u32> = active.iter().collect();
        assert_eq!(order, vec![1, 0]);
    }

    #[test]
    fn test_clear() {
        let mut active = ActiveList::new(4);
        active.push_back(0, 0);
        active.push_back(1, 0);

        active.clear();
        assert!(active.is_empty());
        assert!(!active.contains(0));
        assert_eq!(active.pop_expired(100, 1), None);
    }

    #[test]
    #[should_panic(expected = "Capacity must be greater than zero")]
    fn test_zero_capacity_panics() {
        let _ = ActiveList::new(0);
    }
}
