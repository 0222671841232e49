//! Zero-copy character sequence views
//!
//! A [`CharView`] presents a slice of UTF-16 code units over backing storage
//! shared between a view and every sub-view cut from it. Slicing never copies
//! the units; only the lazily built string form copies, and that at most once
//! per view instance.
//!
//! Internally a view is one of four shapes — empty, whole backing array,
//! prefix, or general offset+length — chosen to keep the common cases small.
//! The shapes are not observable: every operation behaves identically across
//! them.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};

use once_cell::race::OnceBox;

#[derive(Clone)]
enum Repr {
    Empty,
    Full(Arc<[u16]>),
    Prefix { units: Arc<[u16]>, len: usize },
    Slice { units: Arc<[u16]>, offset: usize, len: usize },
}

/// A read-only view of UTF-16 code units with constant-time sub-slicing.
///
/// Views hand out individual code units, not code points: a supplementary
/// character shows up as its surrogate pair, two units, left to the consumer
/// to recombine. Content produced by the decoding layer is always valid
/// UTF-16.
///
/// Out-of-range indices are caller bugs and panic; see [`get`](Self::get)
/// for the checked variant.
pub struct CharView {
    repr: Repr,
    text: OnceBox<String>,
}

impl CharView {
    /// The empty view. Carries no backing storage and never allocates.
    pub fn empty() -> Self {
        Self {
            repr: Repr::Empty,
            text: OnceBox::new(),
        }
    }

    /// Create a view owning a copy of `units` as its backing storage.
    pub fn from_units(units: &[u16]) -> Self {
        if units.is_empty() {
            return Self::empty();
        }
        Self {
            repr: Repr::Full(Arc::from(units)),
            text: OnceBox::new(),
        }
    }

    /// Number of code units in the view.
    pub fn len(&self) -> usize {
        match &self.repr {
            Repr::Empty => 0,
            Repr::Full(units) => units.len(),
            Repr::Prefix { len, .. } => *len,
            Repr::Slice { len, .. } => *len,
        }
    }

    /// Whether the view contains no code units.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The viewed code units as a slice.
    pub fn as_units(&self) -> &[u16] {
        match &self.repr {
            Repr::Empty => &[],
            Repr::Full(units) => units,
            Repr::Prefix { units, len } => &units[..*len],
            Repr::Slice { units, offset, len } => &units[*offset..offset + len],
        }
    }

    /// The code unit at `index`.
    ///
    /// # Panics
    ///
    /// Panics when `index >= len()`.
    pub fn unit_at(&self, index: usize) -> u16 {
        let units = self.as_units();
        match units.get(index) {
            Some(&unit) => unit,
            None => panic!(
                "unit index {index} out of range for view of length {}",
                units.len()
            ),
        }
    }

    /// The code unit at `index`, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<u16> {
        self.as_units().get(index).copied()
    }

    /// A lazy iterator over the code units. Each call starts a fresh pass.
    pub fn units(&self) -> impl Iterator<Item = u16> + '_ {
        self.as_units().iter().copied()
    }

    /// A view of the units in `start..end`, sharing this view's backing
    /// storage. A zero-length range returns the empty view without
    /// allocating.
    ///
    /// # Panics
    ///
    /// Panics when `start > end` or `end > len()`.
    pub fn sub_view(&self, start: usize, end: usize) -> CharView {
        let len = self.len();
        assert!(
            start <= end && end <= len,
            "sub-view range {start}..{end} out of range for view of length {len}"
        );
        if start == end {
            return Self::empty();
        }
        if start == 0 && end == len {
            return self.clone();
        }
        let repr = match &self.repr {
            Repr::Empty => return Self::empty(),
            Repr::Full(units) | Repr::Prefix { units, .. } => {
                if start == 0 {
                    Repr::Prefix {
                        units: units.clone(),
                        len: end,
                    }
                } else {
                    Repr::Slice {
                        units: units.clone(),
                        offset: start,
                        len: end - start,
                    }
                }
            }
            Repr::Slice { units, offset, .. } => Repr::Slice {
                units: units.clone(),
                offset: offset + start,
                len: end - start,
            },
        };
        Self {
            repr,
            text: OnceBox::new(),
        }
    }

    /// The string form of the view, built on first call and cached for the
    /// lifetime of this view instance.
    ///
    /// Unpaired surrogates — impossible in decoder-produced content — render
    /// as U+FFFD.
    pub fn to_text(&self) -> &str {
        self.text
            .get_or_init(|| Box::new(String::from_utf16_lossy(self.as_units())))
            .as_str()
    }
}

impl Clone for CharView {
    /// Clones share backing storage; the cached string form is per instance
    /// and starts out unset on the clone.
    fn clone(&self) -> Self {
        Self {
            repr: self.repr.clone(),
            text: OnceBox::new(),
        }
    }
}

impl Default for CharView {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<&str> for CharView {
    fn from(s: &str) -> Self {
        let units: Vec<u16> = s.encode_utf16().collect();
        Self::from_units(&units)
    }
}

impl PartialEq for CharView {
    fn eq(&self, other: &Self) -> bool {
        self.as_units() == other.as_units()
    }
}

impl Eq for CharView {}

impl PartialOrd for CharView {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CharView {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_units().cmp(other.as_units())
    }
}

impl Hash for CharView {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_units().hash(state);
    }
}

impl fmt::Display for CharView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_text())
    }
}

impl fmt::Debug for CharView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CharView").field(&self.to_text()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::ToString;
    use std::vec::Vec;

    fn backing(view: &CharView) -> Option<&Arc<[u16]>> {
        match &view.repr {
            Repr::Empty => None,
            Repr::Full(units) => Some(units),
            Repr::Prefix { units, .. } => Some(units),
            Repr::Slice { units, .. } => Some(units),
        }
    }

    #[test]
    fn test_basic_access() {
        let view = CharView::from("abc");
        assert_eq!(view.len(), 3);
        assert!(!view.is_empty());
        assert_eq!(view.unit_at(0), u16::from(b'a'));
        assert_eq!(view.get(2), Some(u16::from(b'c')));
        assert_eq!(view.get(3), None);
        assert_eq!(view.to_text(), "abc");
    }

    #[test]
    fn test_empty_view() {
        let view = CharView::empty();
        assert_eq!(view.len(), 0);
        assert!(view.is_empty());
        assert_eq!(view.to_text(), "");
        assert!(backing(&view).is_none());
        assert!(backing(&CharView::from_units(&[])).is_none());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_unit_at_out_of_range_panics() {
        CharView::from("ab").unit_at(2);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_sub_view_end_past_length_panics() {
        CharView::from("ab").sub_view(0, 3);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_sub_view_inverted_range_panics() {
        CharView::from("abcd").sub_view(3, 1);
    }

    #[test]
    fn test_sub_view_whole_range_equals_original() {
        let view = CharView::from("hello");
        let whole = view.sub_view(0, view.len());
        assert_eq!(whole, view);
        assert_eq!(whole.to_text(), "hello");
    }

    #[test]
    fn test_zero_length_sub_view_has_no_backing() {
        let view = CharView::from("hello");
        for i in 0..=view.len() {
            let empty = view.sub_view(i, i);
            assert!(empty.is_empty());
            assert!(backing(&empty).is_none());
        }
    }

    #[test]
    fn test_sub_view_shapes() {
        let view = CharView::from("abcdef");
        let prefix = view.sub_view(0, 3);
        assert!(matches!(prefix.repr, Repr::Prefix { .. }));
        assert_eq!(prefix.to_text(), "abc");

        let middle = view.sub_view(2, 5);
        assert!(matches!(middle.repr, Repr::Slice { .. }));
        assert_eq!(middle.to_text(), "cde");
    }

    #[test]
    fn test_sub_views_share_backing() {
        let view = CharView::from("abcdef");
        let prefix = view.sub_view(0, 4);
        let middle = view.sub_view(1, 5);
        let nested = middle.sub_view(1, 3);
        let base = backing(&view).unwrap();
        assert!(Arc::ptr_eq(base, backing(&prefix).unwrap()));
        assert!(Arc::ptr_eq(base, backing(&middle).unwrap()));
        assert!(Arc::ptr_eq(base, backing(&nested).unwrap()));
        assert_eq!(nested.to_text(), "cd");
    }

    #[test]
    fn test_nested_prefix_of_slice_stays_general() {
        let view = CharView::from("abcdef");
        let middle = view.sub_view(2, 6);
        // A prefix of a general slice still needs its offset.
        let sub = middle.sub_view(0, 2);
        assert!(matches!(sub.repr, Repr::Slice { .. }));
        assert_eq!(sub.to_text(), "cd");
    }

    #[test]
    fn test_text_is_cached_per_instance() {
        let view = CharView::from("cached");
        let first = view.to_text().as_ptr();
        let second = view.to_text().as_ptr();
        assert_eq!(first, second);
    }

    #[test]
    fn test_clone_shares_backing_not_cache() {
        let view = CharView::from("abc");
        let _ = view.to_text();
        let clone = view.clone();
        assert!(Arc::ptr_eq(
            backing(&view).unwrap(),
            backing(&clone).unwrap()
        ));
        assert!(clone.text.get().is_none());
        assert_eq!(clone.to_text(), "abc");
    }

    #[test]
    fn test_surrogate_pair_exposed_as_two_units() {
        let view = CharView::from("a😀b");
        assert_eq!(view.len(), 4);
        assert_eq!(view.unit_at(1), 0xD83D);
        assert_eq!(view.unit_at(2), 0xDE00);
        assert_eq!(view.to_text(), "a😀b");
        assert_eq!(view.units().count(), 4);
    }

    #[test]
    fn test_unpaired_surrogate_renders_replacement() {
        let view = CharView::from_units(&[u16::from(b'x'), 0xD800]);
        assert_eq!(view.to_text(), "x\u{FFFD}");
    }

    #[test]
    fn test_units_iterator_restarts() {
        let view = CharView::from("abc");
        let first: Vec<u16> = view.units().collect();
        let second: Vec<u16> = view.units().collect();
        assert_eq!(first, second);
        assert_eq!(first, [0x61, 0x62, 0x63]);
    }

    #[test]
    fn test_equality_ignores_shape() {
        let big = CharView::from("xabcx");
        let middle = big.sub_view(1, 4);
        let standalone = CharView::from("abc");
        assert_eq!(middle, standalone);
        let prefix = CharView::from("abcz").sub_view(0, 3);
        assert_eq!(prefix, standalone);
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        assert!(CharView::from("ab") < CharView::from("ac"));
        assert!(CharView::from("ab") < CharView::from("abc"));
    }

    #[test]
    fn test_display_renders_content() {
        let view = CharView::from("line text");
        assert_eq!(view.to_string(), "line text");
    }
}
