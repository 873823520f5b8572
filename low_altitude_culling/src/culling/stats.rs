/// Cumulative culling counters.
///
/// Updated once per completed run. Consumers get copies; only the culler
/// records into it.

/// Aggregate counters across all culling runs since init or last reset.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CullingStats {
    /// Completed runs
    pub total_executions: u64,
    /// Entities processed (reached the distance test, or were tracked/selected)
    pub total_processed_entities: u64,
    /// Entities newly hidden by the frustum test
    pub total_culled_entities: u64,
    /// Entities newly hidden by the distance test
    pub total_distance_culled_entities: u64,
    /// Duration of the last run in milliseconds
    pub last_execution_time_ms: f64,
    /// Running mean of run durations in milliseconds
    pub average_execution_time_ms: f64,
}

impl CullingStats {
    /// Record one completed run.
    ///
    /// The mean is updated incrementally:
    /// `avg = (avg * (n - 1) + duration) / n` with `n` the new execution count.
    pub fn record(
        &mut self,
        processed: u64,
        frustum_culled: u64,
        distance_culled: u64,
        duration_ms: f64,
    ) {
        self.total_executions += 1;
        self.total_processed_entities += processed;
        self.total_culled_entities += frustum_culled;
        self.total_distance_culled_entities += distance_culled;
        self.last_execution_time_ms = duration_ms;

        let n = self.total_executions as f64;
        self.average_execution_time_ms =
            (self.average_execution_time_ms * (n - 1.0) + duration_ms) / n;
    }

    /// Zero every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod tests;
