use smallvec::SmallVec;

use crate::{EmptyPolicy, StorageView};

/// Inline buffer for dimension sequences. Rank four or less never touches
/// the heap.
pub type DimVec = SmallVec<[i64; 4]>;

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("Dimension {index} is {value}, which does not fit the legacy 64-bit layout.")]
    DimOverflow { index: usize, value: usize },
}

/// An owned dims sequence in the legacy element type.
///
/// The host runtime tracks sizes as `usize` and strides as `isize`; the
/// legacy API reads both as `i64`. `DimBuffer` performs that conversion once
/// and hands out borrowed [`StorageView`]s over the result.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct DimBuffer(DimVec);

impl DimBuffer {
    pub fn as_slice(&self) -> &[i64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow a view over this buffer with the given empty-sequence policy.
    pub fn view(&self, policy: EmptyPolicy) -> StorageView<'_> {
        StorageView::new(&self.0, policy)
    }
}

impl TryFrom<&[usize]> for DimBuffer {
    type Error = BridgeError;

    fn try_from(dims: &[usize]) -> Result<Self, Self::Error> {
        let mut out = DimVec::with_capacity(dims.len());
        for (index, &value) in dims.iter().enumerate() {
            let dim =
                i64::try_from(value).map_err(|_| BridgeError::DimOverflow { index, value })?;
            out.push(dim);
        }
        Ok(Self(out))
    }
}

impl From<&[isize]> for DimBuffer {
    fn from(dims: &[isize]) -> Self {
        Self(dims.iter().map(|&d| d as i64).collect())
    }
}

impl From<Vec<i64>> for DimBuffer {
    fn from(dims: Vec<i64>) -> Self {
        Self(dims.into())
    }
}

impl std::fmt::Debug for DimBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut dims = format!("[{}", self.0.first().unwrap_or(&0));
        for dim in self.0.iter().skip(1) {
            dims.push_str(&format!("x{}", dim));
        }
        write!(f, "{}]", dims)
    }
}
