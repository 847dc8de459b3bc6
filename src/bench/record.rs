use std::time::Duration;

use serde::Serialize;

/// Average cost of one operation on one structure at one capacity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchRecord {
    pub structure: &'static str,
    pub capacity: usize,
    pub operation: &'static str,
    pub nanos_per_op: f64,
}

impl BenchRecord {
    pub fn from_total(
        structure: &'static str,
        capacity: usize,
        operation: &'static str,
        total: Duration,
        ops: usize,
    ) -> Self {
        let nanos_per_op = if ops == 0 {
            0.0
        } else {
            total.as_nanos() as f64 / ops as f64
        };

        BenchRecord {
            structure,
            capacity,
            operation,
            nanos_per_op,
        }
    }
}
