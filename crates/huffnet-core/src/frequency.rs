use serde::{Deserialize, Serialize};

use huffnet_dsa::LEAF_COUNT;

use crate::error::ConfigError;

/// Byte frequencies sampled from live game traffic.
///
/// Deployed peers build their trees from this exact table; changing a single
/// entry changes the wire format.
pub const DEFAULT_FREQUENCIES: [u32; LEAF_COUNT] = [
    101342, 9667, 3497, 1072, 0, 3793, 0, 0, 2815, 5235, 0, 0, 0, 3570, 0, 0,
    0, 1383, 0, 0, 0, 2970, 0, 0, 2857, 0, 0, 0, 0, 0, 0, 0,
    0, 1199, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1494,
    1974, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1351, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1475,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

/// An immutable table of 256 symbol weights.
///
/// Serialized as a plain list of 256 integers so a trained table can be
/// dropped straight into a config file.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct FrequencyModel {
    weights: [u32; LEAF_COUNT],
}

impl FrequencyModel {
    pub const fn new(weights: [u32; LEAF_COUNT]) -> Self {
        Self { weights }
    }

    #[inline(always)]
    pub fn as_array(&self) -> &[u32; LEAF_COUNT] {
        &self.weights
    }

    #[inline(always)]
    pub fn get(&self, symbol: u8) -> u32 {
        self.weights[symbol as usize]
    }

    /// Sum of all weights.
    pub fn total(&self) -> u64 {
        self.weights.iter().map(|&w| u64::from(w)).sum()
    }

    /// The symbol with the largest weight; the lowest byte value wins ties.
    pub fn most_frequent(&self) -> u8 {
        let mut best = 0u8;
        for symbol in 1..=u8::MAX {
            if self.get(symbol) > self.get(best) {
                best = symbol;
            }
        }
        best
    }
}

impl Default for FrequencyModel {
    fn default() -> Self {
        Self::new(DEFAULT_FREQUENCIES)
    }
}

impl std::fmt::Debug for FrequencyModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrequencyModel")
            .field("total", &self.total())
            .field("nonzero", &self.weights.iter().filter(|&&w| w > 0).count())
            .finish()
    }
}

impl TryFrom<Vec<u32>> for FrequencyModel {
    type Error = ConfigError;

    fn try_from(weights: Vec<u32>) -> Result<Self, Self::Error> {
        let len = weights.len();
        let weights: [u32; LEAF_COUNT] = weights.try_into().map_err(|_| {
            ConfigError::Invalid(format!("frequency table needs {LEAF_COUNT} entries, got {len}"))
        })?;
        Ok(Self::new(weights))
    }
}

impl From<FrequencyModel> for Vec<u32> {
    fn from(model: FrequencyModel) -> Self {
        model.weights.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_favours_zero_byte() {
        let model = FrequencyModel::default();
        assert_eq!(model.most_frequent(), 0);
        assert_eq!(model.get(0), 101_342);
        assert_eq!(model.get(191), 1_475);
    }

    #[test]
    fn short_table_is_rejected() {
        let err = FrequencyModel::try_from(vec![1u32; 255]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
