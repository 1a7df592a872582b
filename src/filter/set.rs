//! Bitmask set over a closed enumeration.

use std::marker::PhantomData;

use crate::enumerant::Enumerant;

/// Set of enumerants, at most 32 values per enumeration
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumSet<T: Enumerant> {
    bits: u32,
    marker: PhantomData<T>,
}

impl<T: Enumerant> EnumSet<T> {
    pub fn empty() -> Self {
        Self {
            bits: 0,
            marker: PhantomData,
        }
    }

    /// Every value selected
    pub fn all() -> Self {
        T::ALL.iter().copied().collect()
    }

    pub fn insert(&mut self, value: T) {
        self.bits |= 1 << value.ordinal();
    }

    pub fn remove(&mut self, value: T) {
        self.bits &= !(1 << value.ordinal());
    }

    pub fn contains(&self, value: T) -> bool {
        self.bits & (1 << value.ordinal()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn is_all(&self) -> bool {
        *self == Self::all()
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Members in declaration order
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        T::ALL.iter().copied().filter(move |value| self.contains(*value))
    }
}

impl<T: Enumerant> Default for EnumSet<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Enumerant> FromIterator<T> for EnumSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::empty();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

impl<T: Enumerant> std::fmt::Display for EnumSet<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(value.name())?;
        }
        Ok(())
    }
}

impl<T: Enumerant> std::fmt::Debug for EnumSet<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter().map(T::name)).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::{Linkage, SymbolKind};

    #[test]
    fn test_all_and_empty() {
        let all = EnumSet::<SymbolKind>::all();
        assert_eq!(all.len(), 6);
        assert!(all.is_all());
        assert!(EnumSet::<SymbolKind>::empty().is_empty());
    }

    #[test]
    fn test_insert_remove() {
        let mut set = EnumSet::<Linkage>::empty();
        set.insert(Linkage::External);
        assert!(set.contains(Linkage::External));
        assert!(!set.contains(Linkage::Internal));
        set.remove(Linkage::External);
        assert!(set.is_empty());
    }

    #[test]
    fn test_display_in_declaration_order() {
        let set: EnumSet<SymbolKind> = [SymbolKind::Enum, SymbolKind::Class].into_iter().collect();
        assert_eq!(set.to_string(), "Class,Enum");
        assert_eq!(format!("{:?}", set), r#"{"Class", "Enum"}"#);
    }
}
