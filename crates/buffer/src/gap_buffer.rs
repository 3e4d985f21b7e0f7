// Chunk: docs/chunks/gap_buffer - Generic gap buffer storage

//! Gap buffer implementation shared by the text bytes and the line index.
//!
//! A gap buffer is a fixed-size array with a movable unused region (the gap).
//! Every insert or remove first relocates the gap to the edit position with a
//! single block move, then shrinks or grows the gap in place. Edits that
//! cluster around one spot are O(1) amortized; moving the gap is
//! O(gap_distance).
//!
//! Out-of-range reads return `T::default()` and out-of-range mutations are
//! silent no-ops. Only indexed access (`buf[i]`) asserts, since a bad index
//! there is a defect in the caller rather than bad input.

use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

const DEFAULT_INITIAL_CAPACITY: usize = 20;
const DEFAULT_GROWTH_THRESHOLD: usize = 4084;
const DEFAULT_SMALL_STEP: usize = 12;
const DEFAULT_LARGE_STEP: usize = 4096;

/// Allocation policy for a [`GapBuffer`].
///
/// While the capacity is below `threshold`, each growth step adds
/// `capacity + small_step` slots (roughly doubling). From `threshold` on,
/// each step adds a flat `large_step` slots. Steps repeat until the gap is
/// strictly larger than the pending insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthPolicy {
    /// Capacity allocated up front.
    pub initial_capacity: usize,
    /// Capacity at which growth switches from doubling to `large_step`.
    pub threshold: usize,
    pub small_step: usize,
    pub large_step: usize,
}

impl GrowthPolicy {
    /// Returns how many slots to add to a buffer currently holding `capacity`.
    fn increment(&self, capacity: usize) -> usize {
        let inc = if capacity < self.threshold {
            capacity + self.small_step
        } else {
            self.large_step
        };
        // A zeroed policy from a settings file must not stall growth.
        inc.max(1)
    }
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            threshold: DEFAULT_GROWTH_THRESHOLD,
            small_step: DEFAULT_SMALL_STEP,
            large_step: DEFAULT_LARGE_STEP,
        }
    }
}

/// A resizable contiguous store of `T` with one movable gap.
///
/// Storage is `[head | gap | tail]`. Logical index `i` maps to physical
/// index `i` when `i < gap_pos`, otherwise to `i + gap_len`.
pub struct GapBuffer<T> {
    /// Backing storage; its length is the capacity. Gap slots hold stale values.
    data: Box<[T]>,
    /// Physical index where the gap starts (equal to its logical position).
    gap_pos: usize,
    /// Number of unused slots in the gap.
    gap_len: usize,
    policy: GrowthPolicy,
}

impl<T: Copy + Default> GapBuffer<T> {
    /// Creates an empty buffer with the default growth policy.
    pub fn new() -> Self {
        Self::with_policy(GrowthPolicy::default())
    }

    /// Creates an empty buffer with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_policy(GrowthPolicy {
            initial_capacity: capacity,
            ..GrowthPolicy::default()
        })
    }

    /// Creates an empty buffer that allocates according to `policy`.
    pub fn with_policy(policy: GrowthPolicy) -> Self {
        let capacity = policy.initial_capacity;
        Self {
            data: vec![T::default(); capacity].into_boxed_slice(),
            gap_pos: 0,
            gap_len: capacity,
            policy,
        }
    }

    /// Returns the logical number of elements (excluding the gap).
    pub fn len(&self) -> usize {
        self.data.len() - self.gap_len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of allocated slots, gap included.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Returns the logical position of the gap.
    pub fn gap_position(&self) -> usize {
        self.gap_pos
    }

    pub fn policy(&self) -> GrowthPolicy {
        self.policy
    }

    fn physical(&self, pos: usize) -> usize {
        if pos < self.gap_pos {
            pos
        } else {
            pos + self.gap_len
        }
    }

    /// Returns the element at logical `pos`, or `T::default()` when out of range.
    pub fn at(&self, pos: usize) -> T {
        if pos >= self.len() {
            return T::default();
        }
        self.data[self.physical(pos)]
    }

    /// Inserts `value` at logical `pos`. No-op when `pos > len()`.
    pub fn insert(&mut self, pos: usize, value: T) {
        if pos > self.len() {
            return;
        }

        self.ensure_capacity(1);
        self.move_gap(pos);

        self.data[pos] = value;
        self.gap_pos += 1;
        self.gap_len -= 1;
    }

    /// Inserts all of `items` at logical `pos`. No-op when `pos > len()`.
    pub fn insert_slice(&mut self, pos: usize, items: &[T]) {
        if pos > self.len() || items.is_empty() {
            return;
        }

        self.ensure_capacity(items.len());
        self.move_gap(pos);

        self.data[pos..pos + items.len()].copy_from_slice(items);
        self.gap_pos += items.len();
        self.gap_len -= items.len();
    }

    /// Removes `len` elements starting at logical `pos`.
    ///
    /// No-op when `len == 0` or when the range runs past the end. The removed
    /// slots are absorbed into the gap without being cleared.
    pub fn remove(&mut self, pos: usize, len: usize) {
        match pos.checked_add(len) {
            Some(end) if len > 0 && end <= self.len() => {}
            _ => return,
        }

        self.move_gap(pos);
        self.gap_len += len;
    }

    /// Drops every element, keeping the allocation.
    pub fn clear(&mut self) {
        self.gap_pos = 0;
        self.gap_len = self.data.len();
    }

    /// Returns a contiguous mutable view of up to `len` elements starting at `pos`.
    ///
    /// The gap is moved to the end of the requested range so the view never
    /// straddles it. The view is clamped to the logical end and is empty when
    /// `pos > len()`. Holding it borrows the buffer, so it cannot outlive the
    /// next mutation.
    pub fn data(&mut self, pos: usize, len: usize) -> &mut [T] {
        if pos > self.len() {
            return &mut [];
        }
        let end = pos.saturating_add(len).min(self.len());
        self.move_gap(end);
        &mut self.data[pos..end]
    }

    /// Returns the contiguous run beginning at logical `pos`.
    ///
    /// The run ends at the gap when `pos` is before it, otherwise at the
    /// logical end. Empty when `pos >= len()`.
    pub fn const_data(&self, pos: usize) -> &[T] {
        if pos >= self.len() {
            return &[];
        }
        if pos < self.gap_pos {
            &self.data[pos..self.gap_pos]
        } else {
            &self.data[pos + self.gap_len..]
        }
    }

    /// Returns the elements before and after the gap, in logical order.
    pub fn as_slices(&self) -> (&[T], &[T]) {
        (
            &self.data[..self.gap_pos],
            &self.data[self.gap_pos + self.gap_len..],
        )
    }

    /// Iterates over the logical contents.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        let (head, tail) = self.as_slices();
        head.iter().chain(tail.iter()).copied()
    }

    pub fn to_vec(&self) -> Vec<T> {
        let (head, tail) = self.as_slices();
        let mut out = Vec::with_capacity(self.len());
        out.extend_from_slice(head);
        out.extend_from_slice(tail);
        out
    }

    /// Relocates the gap so it starts at logical `pos` (`pos <= len()`).
    ///
    /// Only the elements between the old and new gap positions are moved.
    fn move_gap(&mut self, pos: usize) {
        debug_assert!(pos <= self.len(), "gap target {pos} past length {}", self.len());

        if pos < self.gap_pos {
            // Shift [pos..gap_pos] up behind the gap.
            self.data
                .copy_within(pos..self.gap_pos, pos + self.gap_len);
        } else if pos > self.gap_pos {
            // Shift the first (pos - gap_pos) tail elements down in front of the gap.
            let tail = self.gap_pos + self.gap_len;
            self.data
                .copy_within(tail..pos + self.gap_len, self.gap_pos);
        }

        self.gap_pos = pos;
    }

    /// Guarantees the gap can take `size` more elements.
    ///
    /// On growth the gap is first moved to the logical end, then the content
    /// is copied in order into a larger allocation.
    fn ensure_capacity(&mut self, size: usize) {
        if size < self.gap_len {
            return;
        }

        let len = self.len();
        self.move_gap(len);

        let old_capacity = self.data.len();
        let mut capacity = old_capacity;
        let mut gap_len = self.gap_len;
        while gap_len <= size {
            let inc = self.policy.increment(capacity);
            capacity += inc;
            gap_len += inc;
        }

        let mut data = vec![T::default(); capacity].into_boxed_slice();
        data[..len].copy_from_slice(&self.data[..len]);
        self.data = data;
        self.gap_len = gap_len;

        tracing::debug!(old_capacity, capacity, len, "gap buffer grew");
    }
}

impl<T: Copy + Default> Default for GapBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + Default> Index<usize> for GapBuffer<T> {
    type Output = T;

    fn index(&self, pos: usize) -> &T {
        assert!(
            pos < self.len(),
            "gap buffer index {pos} out of range for length {}",
            self.len()
        );
        &self.data[self.physical(pos)]
    }
}

impl<T: Copy + Default> IndexMut<usize> for GapBuffer<T> {
    fn index_mut(&mut self, pos: usize) -> &mut T {
        assert!(
            pos < self.len(),
            "gap buffer index {pos} out of range for length {}",
            self.len()
        );
        let physical = self.physical(pos);
        &mut self.data[physical]
    }
}

impl<T: Copy + Default + fmt::Debug> fmt::Debug for GapBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (head, tail) = self.as_slices();
        f.debug_struct("GapBuffer")
            .field("head", &head)
            .field("gap", &(self.gap_pos..self.gap_pos + self.gap_len))
            .field("tail", &tail)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bytes(s: &str) -> GapBuffer<u8> {
        let mut buf = GapBuffer::new();
        buf.insert_slice(0, s.as_bytes());
        buf
    }

    fn contents(buf: &GapBuffer<u8>) -> String {
        String::from_utf8(buf.to_vec()).unwrap()
    }

    #[test]
    fn test_new_empty() {
        let buf: GapBuffer<u8> = GapBuffer::new();
        assert!(buf.is_empty());
        assert_eq!(buf.len(), 0);
        assert_eq!(buf.capacity(), 20);
        assert_eq!(buf.gap_position(), 0);
    }

    #[test]
    fn test_insert_single() {
        let mut buf = GapBuffer::new();
        buf.insert(0, b'a');
        buf.insert(1, b'c');
        buf.insert(1, b'b');
        assert_eq!(contents(&buf), "abc");
        assert_eq!(buf.len(), 3);
    }

    #[test]
    fn test_insert_slice_at_middle() {
        let mut buf = bytes("helloworld");
        buf.insert_slice(5, b", ");
        assert_eq!(contents(&buf), "hello, world");
        assert_eq!(buf.gap_position(), 7);
    }

    #[test]
    fn test_insert_past_end_is_noop() {
        let mut buf = bytes("abc");
        buf.insert(4, b'x');
        buf.insert_slice(10, b"xyz");
        assert_eq!(contents(&buf), "abc");
    }

    #[test]
    fn test_insert_at_end() {
        let mut buf = bytes("abc");
        buf.insert(3, b'd');
        assert_eq!(contents(&buf), "abcd");
    }

    #[test]
    fn test_remove() {
        let mut buf = bytes("hello brave world");
        buf.remove(5, 6);
        assert_eq!(contents(&buf), "hello world");
        assert_eq!(buf.gap_position(), 5);
    }

    #[test]
    fn test_remove_noops() {
        let mut buf = bytes("abc");
        buf.remove(1, 0);
        buf.remove(2, 2);
        buf.remove(usize::MAX, 2);
        assert_eq!(contents(&buf), "abc");
    }

    #[test]
    fn test_remove_everything() {
        let mut buf = bytes("abc");
        buf.remove(0, 3);
        assert!(buf.is_empty());
        buf.insert_slice(0, b"xy");
        assert_eq!(contents(&buf), "xy");
    }

    #[test]
    fn test_at_with_gap_in_middle() {
        let mut buf = bytes("hllo");
        buf.insert(1, b'e');
        assert_eq!(buf.gap_position(), 2);
        assert_eq!(buf.at(0), b'h');
        assert_eq!(buf.at(1), b'e');
        assert_eq!(buf.at(2), b'l');
        assert_eq!(buf.at(4), b'o');
    }

    #[test]
    fn test_at_out_of_range_is_default() {
        let buf = bytes("abc");
        assert_eq!(buf.at(3), 0);
        assert_eq!(buf.at(100), 0);
    }

    #[test]
    fn test_index_mut() {
        let mut buf = bytes("abc");
        buf.insert(1, b'X');
        buf[2] = b'B';
        assert_eq!(buf[0], b'a');
        assert_eq!(contents(&buf), "aXBc");
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_index_past_end_panics() {
        let mut buf = bytes("abc");
        buf[3] = b'd';
    }

    #[test]
    fn test_growth_doubles_below_threshold() {
        let mut buf = GapBuffer::new();
        for i in 0..19u8 {
            buf.insert(i as usize, i);
        }
        assert_eq!(buf.capacity(), 20);

        // The last free slot is never handed out: growth adds 20 + 12.
        buf.insert(19, 19);
        assert_eq!(buf.capacity(), 52);
        assert_eq!(buf.to_vec(), (0..20u8).collect::<Vec<_>>());
    }

    #[test]
    fn test_growth_uses_large_step_above_threshold() {
        let policy = GrowthPolicy {
            initial_capacity: 4,
            threshold: 8,
            small_step: 2,
            large_step: 100,
        };
        let mut buf: GapBuffer<u8> = GapBuffer::with_policy(policy);

        buf.insert_slice(0, b"abcd");
        assert_eq!(buf.capacity(), 10);

        buf.insert_slice(2, b"123456");
        assert_eq!(buf.capacity(), 110);
        assert_eq!(contents(&buf), "ab123456cd");
    }

    #[test]
    fn test_growth_preserves_content_with_gap_in_middle() {
        let mut buf = bytes("headtail");
        buf.insert(4, b'-');
        let filler = vec![b'.'; 200];
        buf.insert_slice(5, &filler);
        assert_eq!(buf.len(), 209);
        assert!(contents(&buf).starts_with("head-..."));
        assert!(contents(&buf).ends_with("...tail"));
    }

    #[test]
    fn test_data_is_contiguous_across_gap() {
        let mut buf = bytes("helloworld");
        buf.insert(5, b' ');
        assert_eq!(buf.gap_position(), 6);

        let view = buf.data(0, 11);
        assert_eq!(view, b"hello world");
        view[0] = b'H';
        assert_eq!(contents(&buf), "Hello world");
    }

    #[test]
    fn test_data_clamps() {
        let mut buf = bytes("abc");
        assert_eq!(buf.data(1, 100), b"bc");
        assert!(buf.data(4, 1).is_empty());
    }

    #[test]
    fn test_const_data_stops_at_gap() {
        let mut buf = bytes("helloworld");
        buf.insert(5, b' ');
        assert_eq!(buf.const_data(0), b"hello ");
        assert_eq!(buf.const_data(3), b"lo ");
        assert_eq!(buf.const_data(6), b"world");
        assert!(buf.const_data(11).is_empty());
    }

    #[test]
    fn test_as_slices() {
        let mut buf = bytes("abcdef");
        buf.remove(2, 1);
        assert_eq!(buf.as_slices(), (&b"ab"[..], &b"def"[..]));
    }

    #[test]
    fn test_clear() {
        let mut buf = bytes("abcdef");
        let capacity = buf.capacity();
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.capacity(), capacity);
    }

    #[test]
    fn test_generic_over_offsets() {
        let mut buf: GapBuffer<usize> = GapBuffer::with_capacity(2);
        buf.insert(0, 0);
        buf.insert_slice(1, &[10, 30]);
        buf.insert(2, 20);
        assert_eq!(buf.to_vec(), vec![0, 10, 20, 30]);
        buf.remove(1, 2);
        assert_eq!(buf.to_vec(), vec![0, 30]);
    }

    #[test]
    fn test_zero_policy_still_grows() {
        let policy = GrowthPolicy {
            initial_capacity: 0,
            threshold: 0,
            small_step: 0,
            large_step: 0,
        };
        let mut buf: GapBuffer<u8> = GapBuffer::with_policy(policy);
        buf.insert_slice(0, b"abc");
        assert_eq!(contents(&buf), "abc");
    }
}
