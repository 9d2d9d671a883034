use super::provider::ProcessSample;
use super::snapshot::ProcessEntry;

pub const TOP_PROCESS_LIMIT: usize = 10;

/// Drop unavailable samples, then keep the `limit` busiest processes.
///
/// The sort is stable, so processes with equal CPU keep their input order.
pub fn top_processes<I>(samples: I, limit: usize) -> Vec<ProcessEntry>
where
    I: IntoIterator<Item = ProcessSample>,
{
    let mut skipped = 0usize;
    let mut entries: Vec<ProcessEntry> = samples
        .into_iter()
        .filter_map(|sample| match sample {
            Ok(reading) => Some(ProcessEntry {
                pid: reading.pid,
                name: reading.name,
                cpu: reading.cpu_percent,
                memory: reading.memory_percent,
            }),
            Err(reason) => {
                tracing::trace!(?reason, "skipping process");
                skipped += 1;
                None
            }
        })
        .collect();

    if skipped > 0 {
        tracing::debug!(skipped, listed = entries.len(), "dropped unavailable processes");
    }

    entries.sort_by(|a, b| b.cpu.total_cmp(&a.cpu));
    entries.truncate(limit);
    entries
}
