//! Workload configuration module.
//!
//! Shapes the benchmark that drives the trie: how many endpoints exist, how
//! many concurrent lookups run, and which runtime executes them.

use super::{ConfigResult, Validate};
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Runtime flavor used to execute workload tasks.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RuntimeFlavor {
    /// All tasks interleave cooperatively on one thread
    #[default]
    CurrentThread,
    /// Tasks are spread over a work-stealing thread pool
    MultiThread,
}

/// Workload configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkloadConfig {
    /// Number of distinct endpoints inserted into the trie
    pub num_endpoints: usize,

    /// Number of concurrent lookup tasks per strategy
    pub num_tasks: usize,

    /// Length of the generated request in bytes
    pub request_length: usize,

    /// Fraction of the request inserted as the shared prefix (0.0 to 1.0)
    pub prefix_fraction: f64,

    /// Seed for request generation; random when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Runtime flavor
    pub runtime: RuntimeFlavor,

    /// Worker threads for the multi-thread runtime
    pub worker_threads: usize,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            num_endpoints: 500,
            num_tasks: 10_000,
            request_length: 2048,
            prefix_fraction: 0.5,
            seed: None,
            runtime: RuntimeFlavor::default(),
            worker_threads: num_cpus::get(),
        }
    }
}

impl Validate for WorkloadConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.num_endpoints == 0 {
            return Err(ConfigError::ValidationError(
                "num_endpoints must be greater than 0".to_string(),
            ));
        }

        if self.num_tasks == 0 {
            return Err(ConfigError::ValidationError(
                "num_tasks must be greater than 0".to_string(),
            ));
        }

        if self.request_length == 0 {
            return Err(ConfigError::ValidationError(
                "request_length must be greater than 0".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.prefix_fraction) {
            return Err(ConfigError::ValueOutOfRange {
                key: "workload.prefix_fraction".to_string(),
                message: "must be between 0.0 and 1.0 inclusive".to_string(),
            });
        }

        if self.runtime == RuntimeFlavor::MultiThread && self.worker_threads == 0 {
            return Err(ConfigError::ValidationError(
                "worker_threads must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl WorkloadConfig {
    /// Length in bytes of the prefix inserted for every endpoint.
    pub fn prefix_length(&self) -> usize {
        (self.request_length as f64 * self.prefix_fraction) as usize
    }
}
