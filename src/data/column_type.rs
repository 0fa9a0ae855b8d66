use strum_macros::{Display, IntoStaticStr};

/// The closed set of column types the MiniDB format knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum ColumnType {
    Int8,
    UInt8,
    Int16,
    Int32,
    Float64,
    String,
}

impl ColumnType {
    /// Tie-breaks during narrowing follow this order, i.e. Int8 beats UInt8.
    pub const CANONICAL_ORDER: [ColumnType; 6] = [
        ColumnType::Int8,
        ColumnType::UInt8,
        ColumnType::Int16,
        ColumnType::Int32,
        ColumnType::Float64,
        ColumnType::String,
    ];

    /// The wire tag written into the column directory.
    pub const fn tag(self) -> u8 {
        match self {
            ColumnType::String => 0x01,
            ColumnType::Int8 => 0x11,
            ColumnType::UInt8 => 0x12,
            ColumnType::Int16 => 0x13,
            ColumnType::Int32 => 0x14,
            ColumnType::Float64 => 0x21,
        }
    }

    pub fn from_tag(tag: u8) -> Option<ColumnType> {
        ColumnType::CANONICAL_ORDER
            .into_iter()
            .find(|t| t.tag() == tag)
    }

    /// Number of bytes a value occupies. Strings are variable (null terminated), hence `None`.
    pub const fn width(self) -> Option<usize> {
        match self {
            ColumnType::Int8 | ColumnType::UInt8 => Some(1),
            ColumnType::Int16 => Some(2),
            ColumnType::Int32 => Some(4),
            ColumnType::Float64 => Some(8),
            ColumnType::String => None,
        }
    }

    /// Width used for comparisons. String is "largest", so it only ever wins when it's the last one standing.
    pub const fn width_rank(self) -> usize {
        match self.width() {
            Some(w) => w,
            None => usize::MAX,
        }
    }

    const fn bit(self) -> u8 {
        match self {
            ColumnType::Int8 => 1 << 0,
            ColumnType::UInt8 => 1 << 1,
            ColumnType::Int16 => 1 << 2,
            ColumnType::Int32 => 1 << 3,
            ColumnType::Float64 => 1 << 4,
            ColumnType::String => 1 << 5,
        }
    }
}

/// The types not (yet) ruled out for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateSet(u8);

impl CandidateSet {
    pub const fn all() -> Self {
        CandidateSet(0b0011_1111)
    }

    pub const fn empty() -> Self {
        CandidateSet(0)
    }

    pub fn contains(&self, t: ColumnType) -> bool {
        self.0 & t.bit() != 0
    }

    pub fn insert(&mut self, t: ColumnType) {
        self.0 |= t.bit();
    }

    pub fn remove(&mut self, t: ColumnType) {
        self.0 &= !t.bit();
    }

    /// Keeps only the candidates for which `keep` returns true.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(ColumnType) -> bool,
    {
        for t in ColumnType::CANONICAL_ORDER {
            if self.contains(t) && !keep(t) {
                self.remove(t);
            }
        }
    }

    /// Iterates the remaining candidates in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = ColumnType> + '_ {
        ColumnType::CANONICAL_ORDER
            .into_iter()
            .filter(move |t| self.contains(*t))
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Smallest width wins; on a tie, the one that comes first in canonical order.
    /// An empty set can't come out of narrowing (String is always valid), but if it does, we fall back to String.
    pub fn narrowest(&self) -> ColumnType {
        self.iter()
            .min_by_key(|t| t.width_rank()) // min_by_key returns the first of equal minima
            .unwrap_or(ColumnType::String)
    }
}

impl Default for CandidateSet {
    fn default() -> Self {
        Self::all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip() {
        for t in ColumnType::CANONICAL_ORDER {
            assert_eq!(Some(t), ColumnType::from_tag(t.tag()));
        }
        assert_eq!(None, ColumnType::from_tag(0x00));
        assert_eq!(None, ColumnType::from_tag(0x15));
    }

    #[test]
    fn display_upper_case_names() {
        let names: Vec<String> = ColumnType::CANONICAL_ORDER
            .iter()
            .map(|t| t.to_string())
            .collect();
        assert_eq!(
            vec!["INT8", "UINT8", "INT16", "INT32", "FLOAT64", "STRING"],
            names
        );
        let s: &'static str = ColumnType::UInt8.into();
        assert_eq!("UINT8", s);
    }

    #[test]
    fn widths() {
        assert_eq!(Some(1), ColumnType::Int8.width());
        assert_eq!(Some(1), ColumnType::UInt8.width());
        assert_eq!(Some(2), ColumnType::Int16.width());
        assert_eq!(Some(4), ColumnType::Int32.width());
        assert_eq!(Some(8), ColumnType::Float64.width());
        assert_eq!(None, ColumnType::String.width());
        assert!(ColumnType::String.width_rank() > ColumnType::Float64.width_rank());
    }

    #[test]
    fn all_contains_every_type() {
        let all = CandidateSet::all();
        assert_eq!(6, all.len());
        assert_eq!(
            ColumnType::CANONICAL_ORDER.to_vec(),
            all.iter().collect::<Vec<ColumnType>>()
        );
    }

    #[test]
    fn narrowest_prefers_int8_over_uint8() {
        assert_eq!(ColumnType::Int8, CandidateSet::all().narrowest());
    }

    #[test]
    fn narrowest_after_removal() {
        let mut set = CandidateSet::all();
        set.remove(ColumnType::Int8);
        assert_eq!(ColumnType::UInt8, set.narrowest());
        set.retain(|t| t != ColumnType::UInt8 && t != ColumnType::Int16);
        assert_eq!(ColumnType::Int32, set.narrowest());
        set.retain(|t| t == ColumnType::String);
        assert_eq!(ColumnType::String, set.narrowest());
    }

    #[test]
    fn narrowest_of_empty_falls_back_to_string() {
        let set = CandidateSet::empty();
        assert!(set.is_empty());
        assert_eq!(ColumnType::String, set.narrowest());
    }

    #[test]
    fn insert_after_remove() {
        let mut set = CandidateSet::empty();
        set.insert(ColumnType::Float64);
        set.insert(ColumnType::String);
        assert!(set.contains(ColumnType::Float64));
        assert!(!set.contains(ColumnType::Int32));
        assert_eq!(ColumnType::Float64, set.narrowest());
    }
}
