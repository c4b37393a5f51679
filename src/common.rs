//!
//! symbols, sequences and vocabularies
//!
use crate::error::HmmError;
use fnv::FnvHashMap;

/// single ASCII symbol of a hidden state or an observable
pub type Symbol = u8;

/// index of a state in its vocabulary
pub type StateId = usize;

/// index of an observable in its vocabulary
pub type ObsId = usize;

/// Type of symbol sequence, one realized path of the hidden chain
pub type Sequence = Vec<u8>;

/// Convert Sequence(Vec<u8>) into &str
/// useful in displaying
pub fn sequence_to_string(seq: &Sequence) -> &str {
    std::str::from_utf8(seq).unwrap()
}

///
/// Finite symbol vocabulary, order-preserving and unique.
///
/// Symbol order follows the declaration order of the input record, so
/// ids are stable across tables built from the same vocabulary.
///
#[derive(Debug, Clone)]
pub struct Vocab {
    symbols: Vec<Symbol>,
    index: FnvHashMap<Symbol, usize>,
}

impl Vocab {
    /// Constructor. A repeated symbol is an error.
    pub fn new(symbols: Vec<Symbol>) -> Result<Vocab, HmmError> {
        let mut index = FnvHashMap::default();
        for (i, &s) in symbols.iter().enumerate() {
            if index.insert(s, i).is_some() {
                return Err(HmmError::DuplicateSymbol(s as char));
            }
        }
        Ok(Vocab { symbols, index })
    }
    /// the number of symbols
    pub fn len(&self) -> usize {
        self.symbols.len()
    }
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
    /// symbol of the id, panics if out of range
    pub fn symbol(&self, id: usize) -> Symbol {
        self.symbols[id]
    }
    /// id of the symbol, `None` if the symbol is not in the vocabulary
    pub fn index_of(&self, symbol: Symbol) -> Option<usize> {
        self.index.get(&symbol).copied()
    }
    pub fn contains(&self, symbol: Symbol) -> bool {
        self.index.contains_key(&symbol)
    }
    /// iterator of `(id, symbol)` in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (usize, Symbol)> + '_ {
        self.symbols.iter().copied().enumerate()
    }
    ///
    /// first symbol shared with the other vocabulary, if any.
    /// The model constructor rejects overlapping vocabularies.
    ///
    pub fn overlap(&self, other: &Vocab) -> Option<Symbol> {
        self.symbols.iter().copied().find(|&s| other.contains(s))
    }
    pub fn is_disjoint(&self, other: &Vocab) -> bool {
        self.overlap(other).is_none()
    }
}

impl std::fmt::Display for Vocab {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let strs: Vec<String> = self.symbols.iter().map(|&s| (s as char).to_string()).collect();
        write!(f, "{}", strs.join(" "))
    }
}

//
// tests
//
