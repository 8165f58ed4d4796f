//! Success sets: the status codes a request treats as success.

use smallvec::SmallVec;

/// An ordered, de-duplicated set of HTTP status codes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SuccessCodes {
    codes: SmallVec<[u16; 4]>,
}

impl SuccessCodes {
    /// Build a set from any list of codes.
    pub fn new(codes: impl IntoIterator<Item = u16>) -> Self {
        let mut codes: SmallVec<[u16; 4]> = codes.into_iter().collect();
        codes.sort_unstable();
        codes.dedup();
        Self { codes }
    }

    /// Whether `status` is a success.
    #[inline]
    pub fn contains(&self, status: u16) -> bool {
        self.codes.binary_search(&status).is_ok()
    }

    /// A copy of this set with `status` removed.
    pub fn without(&self, status: u16) -> Self {
        Self {
            codes: self.codes.iter().copied().filter(|c| *c != status).collect(),
        }
    }

    /// The codes, in ascending order.
    pub fn as_slice(&self) -> &[u16] {
        &self.codes
    }

    /// Number of codes in the set.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the set is empty (every response is a failure).
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl<const N: usize> From<[u16; N]> for SuccessCodes {
    fn from(codes: [u16; N]) -> Self {
        Self::new(codes)
    }
}

impl FromIterator<u16> for SuccessCodes {
    fn from_iter<I: IntoIterator<Item = u16>>(iter: I) -> Self {
        Self::new(iter)
    }
}
