use serde::{Deserialize, Serialize};

/// Configuration for chunking behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkerConfig {
    /// Minimum number of lines a chunk must accumulate before a boundary
    /// may close it. The final chunk of a file is exempt.
    pub min_chunk_size: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self { min_chunk_size: 5 }
    }
}

impl ChunkerConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.min_chunk_size == 0 {
            return Err("min_chunk_size must be > 0".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(ChunkerConfig::default().validate().is_ok());
        assert_eq!(ChunkerConfig::default().min_chunk_size, 5);
    }

    #[test]
    fn zero_minimum_is_rejected() {
        let config = ChunkerConfig { min_chunk_size: 0 };
        assert!(config.validate().is_err());
    }
}
