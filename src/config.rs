//! Construction parameters for a [`LinkedHashTree`](crate::LinkedHashTree).

use crate::error::ConfigError;

pub const DEFAULT_INITIAL_CAPACITY: usize = 16;
pub const DEFAULT_LOAD_FACTOR: f32 = 0.75;

/// Bucket sizing and mutability of a new container.
///
/// ```rust
/// use linked_hash_tree::Config;
///
/// let config = Config::new().initial_capacity(64).load_factor(0.5);
/// assert!(config.validate().is_ok());
/// assert!(Config::new().initial_capacity(0).validate().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    /// Bucket count at construction and after every `clear`.
    pub initial_capacity: usize,

    /// Entries per bucket above which the bucket array doubles.
    pub load_factor: f32,

    /// When false, every mutating call fails with `Error::ReadOnly`.
    pub modifiable: bool,
}

impl Config {
    pub fn new() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
            modifiable: true,
        }
    }

    pub fn initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    pub fn load_factor(mut self, load_factor: f32) -> Self {
        self.load_factor = load_factor;
        self
    }

    pub fn modifiable(mut self, modifiable: bool) -> Self {
        self.modifiable = modifiable;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_capacity == 0 {
            return Err(ConfigError::new("initial capacity must be greater than zero"));
        }
        if !self.load_factor.is_finite() || self.load_factor <= 0.0 {
            return Err(ConfigError::new(format!(
                "load factor must be finite and greater than zero, got {}",
                self.load_factor
            )));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
