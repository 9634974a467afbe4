use crate::Reflect;

/// A trait for fixed-size heterogeneous sequences.
pub trait Tuple: Reflect {
    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns `true` for the empty tuple.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the element at `index`.
    fn get(&self, index: usize) -> Option<&dyn Reflect>;
}

/// A trait for ordered homogeneous sequences.
///
/// ```
/// use std::collections::VecDeque;
/// use jk_reflect::ops::List;
///
/// let list: VecDeque<i32> = [1, 2].into_iter().collect();
/// let list: &dyn List = &list;
/// assert_eq!(list.get(1).unwrap().downcast_ref::<i32>(), Some(&2));
/// assert!(list.get(2).is_none());
/// ```
pub trait List: Reflect {
    /// Returns the number of items.
    fn len(&self) -> usize;

    /// Returns `true` if the list contains no items.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the item at `index`.
    fn get(&self, index: usize) -> Option<&dyn Reflect>;
}

/// A trait for sets.
pub trait Set: Reflect {
    /// Returns the number of items.
    fn len(&self) -> usize;

    /// Returns `true` if the set contains no items.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over the items, in the set's own order.
    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_>;
}

/// A trait for maps.
///
/// ```
/// use std::collections::BTreeMap;
/// use jk_reflect::ops::Map;
///
/// let map: BTreeMap<&str, u8> = [("a", 1), ("b", 2)].into_iter().collect();
/// let map: &dyn Map = &map;
/// let keys: Vec<_> = map.iter().map(|(k, _)| *k.downcast_ref::<&str>().unwrap()).collect();
/// assert_eq!(keys, ["a", "b"]);
/// ```
pub trait Map: Reflect {
    /// Returns the number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the map contains no entries.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over the entries, in the map's own order.
    fn iter(&self) -> Box<dyn Iterator<Item = (&dyn Reflect, &dyn Reflect)> + '_>;
}
