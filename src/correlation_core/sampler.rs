//! Complete-case pairing of two answer columns

/// Answers from respondents who answered both variables of a pair
///
/// `x` and `y` always have the same length; slot `i` of each came from the same respondent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairedSample {
    x: Vec<u8>,
    y: Vec<u8>,
}

impl PairedSample {
    /// Keep only the slots where both columns hold an answer, preserving order
    ///
    /// Slots past the end of the shorter column are ignored; the engine rejects
    /// unequal columns before pairing.
    pub fn from_columns(a: &[Option<u8>], b: &[Option<u8>]) -> Self {
        let (x, y) = a
            .iter()
            .zip(b)
            .filter_map(|(va, vb)| Some(((*va)?, (*vb)?)))
            .unzip();

        Self { x, y }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn x(&self) -> &[u8] {
        &self.x
    }

    pub fn y(&self) -> &[u8] {
        &self.y
    }

    /// Iterate `(x, y)` coordinate pairs
    pub fn pairs(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// Same sample with the axes swapped
    pub fn swapped(&self) -> Self {
        Self {
            x: self.y.clone(),
            y: self.x.clone(),
        }
    }
}

impl From<(Vec<u8>, Vec<u8>)> for PairedSample {
    /// Build a sample from already-complete sequences, truncating to the shorter one
    fn from((mut x, mut y): (Vec<u8>, Vec<u8>)) -> Self {
        let n = x.len().min(y.len());
        x.truncate(n);
        y.truncate(n);
        Self { x, y }
    }
}
