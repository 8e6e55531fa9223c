//! Comparison sorts for small record collections.
//!
//! Every strategy takes a caller-supplied three-way comparison. Under a total
//! order all four produce the same result; they differ only in stability and
//! cost:
//!
//! | strategy | stable | worst case |
//! |----------|--------|------------|
//! | bubble   | yes    | O(n²)      |
//! | quick    | no     | O(n²) (last-element pivot on sorted input) |
//! | merge    | yes    | O(n log n) |
//! | heap     | no     | O(n log n) |

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::Error;

/// Supported sorting strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortAlgorithm {
    Bubble,
    Quick,
    #[default]
    Merge,
    Heap,
}

impl SortAlgorithm {
    pub const ALL: [SortAlgorithm; 4] = [
        SortAlgorithm::Bubble,
        SortAlgorithm::Quick,
        SortAlgorithm::Merge,
        SortAlgorithm::Heap,
    ];

    /// Whether equal elements keep their relative order.
    pub fn is_stable(self) -> bool {
        matches!(self, SortAlgorithm::Bubble | SortAlgorithm::Merge)
    }
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            SortAlgorithm::Bubble => "bubble",
            SortAlgorithm::Quick => "quick",
            SortAlgorithm::Merge => "merge",
            SortAlgorithm::Heap => "heap",
        };
        f.write_str(value)
    }
}

impl FromStr for SortAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bubble" => Ok(SortAlgorithm::Bubble),
            "quick" | "quicksort" => Ok(SortAlgorithm::Quick),
            "merge" | "mergesort" => Ok(SortAlgorithm::Merge),
            "heap" | "heapsort" => Ok(SortAlgorithm::Heap),
            _ => Err(Error::UnsupportedAlgorithm {
                kind: "sort",
                name: s.to_string(),
            }),
        }
    }
}

/// Sort `items` in place with the selected strategy.
pub fn sort_by<T, F>(items: &mut Vec<T>, algorithm: SortAlgorithm, compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    match algorithm {
        SortAlgorithm::Bubble => bubble_sort(items, compare),
        SortAlgorithm::Quick => quick_sort(items, compare),
        SortAlgorithm::Merge => merge_sort(items, compare),
        SortAlgorithm::Heap => heap_sort(items, compare),
    }
}

/// Adjacent-swap passes, stopping after the first pass without swaps.
pub fn bubble_sort<T, F>(items: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let n = items.len();
    for pass in 0..n.saturating_sub(1) {
        let mut swapped = false;
        for j in 0..n - pass - 1 {
            if compare(&items[j], &items[j + 1]) == Ordering::Greater {
                items.swap(j, j + 1);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }
}

/// Lomuto-partition quicksort with the last element as pivot.
pub fn quick_sort<T, F>(items: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    quick_sort_slice(items, &mut compare);
}

fn quick_sort_slice<T, F>(mut items: &mut [T], compare: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    // Recurse into the smaller side and loop on the larger one to bound stack depth.
    while items.len() > 1 {
        let pivot = partition(items, compare);
        let (left, rest) = items.split_at_mut(pivot);
        let right = &mut rest[1..];
        if left.len() < right.len() {
            quick_sort_slice(left, compare);
            items = right;
        } else {
            quick_sort_slice(right, compare);
            items = left;
        }
    }
}

fn partition<T, F>(items: &mut [T], compare: &mut F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    let pivot = items.len() - 1;
    let mut store = 0;
    for j in 0..pivot {
        if compare(&items[j], &items[pivot]) != Ordering::Greater {
            items.swap(store, j);
            store += 1;
        }
    }
    items.swap(store, pivot);
    store
}

/// Top-down merge sort: split at the midpoint, sort halves, merge stably.
pub fn merge_sort<T, F>(items: &mut Vec<T>, mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    merge_sort_vec(items, &mut compare);
}

fn merge_sort_vec<T, F>(items: &mut Vec<T>, compare: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return;
    }

    let mid = items.len() / 2;
    let mut right = items.split_off(mid);
    merge_sort_vec(items, compare);
    merge_sort_vec(&mut right, compare);

    let left = std::mem::take(items);
    items.reserve(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    while let (Some(l), Some(r)) = (left.peek(), right.peek()) {
        // Ties take from the left run, which keeps the merge stable.
        let next = if compare(l, r) == Ordering::Greater {
            right.next()
        } else {
            left.next()
        };
        items.extend(next);
    }
    items.extend(left);
    items.extend(right);
}

/// In-place heap sort using a max-heap.
pub fn heap_sort<T, F>(items: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let n = items.len();
    for root in (0..n / 2).rev() {
        sift_down(items, root, n, &mut compare);
    }
    for end in (1..n).rev() {
        items.swap(0, end);
        sift_down(items, 0, end, &mut compare);
    }
}

fn sift_down<T, F>(items: &mut [T], mut root: usize, len: usize, compare: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    loop {
        let left = 2 * root + 1;
        let right = left + 1;
        let mut largest = root;

        if left < len && compare(&items[left], &items[largest]) == Ordering::Greater {
            largest = left;
        }
        if right < len && compare(&items[right], &items[largest]) == Ordering::Greater {
            largest = right;
        }
        if largest == root {
            return;
        }

        items.swap(root, largest);
        root = largest;
    }
}
