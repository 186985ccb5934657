//! Core data types: items, the item catalog, genomes and the problem
//! definition that ties a catalog to a knapsack capacity.

use crate::error::{ConfigError, ParseGenomeError};
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// A single item that may be packed into the knapsack.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    /// Value gained by packing the item.
    pub value: f64,
    /// Weight the item adds to the knapsack.
    pub weight: f64,
}

impl Item {
    /// Creates an item. Validation happens when it joins an [`ItemCatalog`].
    pub fn new(value: f64, weight: f64) -> Self {
        Self { value, weight }
    }
}

/// Immutable, ordered list of items.
///
/// The catalog length fixes the genome length for the whole run.
///
/// # Examples
///
/// ```
/// use knapsack_ga::ga::{Item, ItemCatalog};
///
/// let catalog = ItemCatalog::new(vec![Item::new(10.0, 5.0), Item::new(20.0, 10.0)]).unwrap();
/// assert_eq!(catalog.len(), 2);
///
/// let same = ItemCatalog::from_columns(&[10.0, 20.0], &[5.0, 10.0]).unwrap();
/// assert_eq!(catalog, same);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemCatalog {
    items: Vec<Item>,
}

impl ItemCatalog {
    /// Builds a catalog, rejecting empty lists and negative or non-finite
    /// values and weights.
    pub fn new(items: Vec<Item>) -> Result<Self, ConfigError> {
        if items.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        for (index, item) in items.iter().enumerate() {
            check_item_field(index, "value", item.value)?;
            check_item_field(index, "weight", item.weight)?;
        }
        Ok(Self { items })
    }

    /// Builds a catalog from parallel value and weight columns.
    pub fn from_columns(values: &[f64], weights: &[f64]) -> Result<Self, ConfigError> {
        if values.len() != weights.len() {
            return Err(ConfigError::ItemCountMismatch {
                values: values.len(),
                weights: weights.len(),
            });
        }
        let items = values
            .iter()
            .zip(weights)
            .map(|(&value, &weight)| Item { value, weight })
            .collect();
        Self::new(items)
    }

    /// Number of items (the genome length).
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always `false` for a validated catalog.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The items, in catalog order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Returns the item at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }
}

fn check_item_field(index: usize, field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidItem {
            index,
            field,
            value,
        })
    }
}

/// How the initial population's bits are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Initialization {
    /// Each bit is a fair coin flip.
    #[default]
    Uniform,

    /// Each bit is set when a digit drawn from `{0, 1, 2}` equals 1.
    ///
    /// Sets bits with probability 1/3 rather than 1/2. Kept only to
    /// reproduce runs of older tooling that initialized genomes this way.
    OneInThree,
}

/// Fixed-length include/exclude bit vector over the catalog.
///
/// Bit `i` set means item `i` is packed. Operators never edit a genome that
/// already sits in a population; they build a new one instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Genome {
    bits: Vec<bool>,
}

impl Genome {
    /// Wraps the given bits.
    pub fn new(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// An empty knapsack over `len` items.
    pub fn zeros(len: usize) -> Self {
        Self {
            bits: vec![false; len],
        }
    }

    /// Draws a random genome of `len` bits.
    pub fn random<R: Rng>(len: usize, init: Initialization, rng: &mut R) -> Self {
        let bits = (0..len)
            .map(|_| match init {
                Initialization::Uniform => rng.random_bool(0.5),
                Initialization::OneInThree => rng.random_range(0..3u8) == 1,
            })
            .collect();
        Self { bits }
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether the genome has no bits.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// The raw bits.
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Returns bit `index`, if in range.
    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    /// Number of packed items.
    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Zero-based indices of the packed items, ascending.
    pub fn selected(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits
            .iter()
            .enumerate()
            .filter_map(|(i, &b)| b.then_some(i))
    }

    /// Returns a copy with bit `locus` flipped.
    ///
    /// # Panics
    /// Panics if `locus` is out of range.
    pub fn with_flipped(&self, locus: usize) -> Self {
        let mut bits = self.bits.clone();
        bits[locus] = !bits[locus];
        Self { bits }
    }
}

impl fmt::Display for Genome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.bits {
            f.write_str(if b { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for Genome {
    type Err = ParseGenomeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bits = s
            .chars()
            .enumerate()
            .map(|(position, found)| match found {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(ParseGenomeError { position, found }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { bits })
    }
}

/// A knapsack instance: the catalog plus the weight capacity.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Problem {
    catalog: ItemCatalog,
    capacity: f64,
}

impl Problem {
    /// Pairs a catalog with a capacity.
    pub fn new(catalog: ItemCatalog, capacity: f64) -> Result<Self, ConfigError> {
        if !capacity.is_finite() || capacity < 0.0 {
            return Err(ConfigError::InvalidCapacity(capacity));
        }
        Ok(Self { catalog, capacity })
    }

    /// Fifteen-item instance with capacity 100, handy for demos and benches.
    pub fn demo() -> Self {
        const ITEMS: [(f64, f64); 15] = [
            (24.0, 12.0),
            (13.0, 7.0),
            (23.0, 11.0),
            (15.0, 8.0),
            (14.0, 9.0),
            (3.0, 6.0),
            (2.0, 5.0),
            (7.0, 14.0),
            (32.0, 12.0),
            (14.0, 91.0),
            (51.0, 23.0),
            (23.0, 7.0),
            (4.0, 5.0),
            (65.0, 30.0),
            (3.0, 4.0),
        ];
        let items = ITEMS
            .iter()
            .map(|&(value, weight)| Item { value, weight })
            .collect();
        Self {
            catalog: ItemCatalog { items },
            capacity: 100.0,
        }
    }

    /// The item catalog.
    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    /// The weight capacity.
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Genome length for this instance.
    pub fn item_count(&self) -> usize {
        self.catalog.len()
    }
}
