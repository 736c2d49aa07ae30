use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

pub(crate) const OPERATION_SCAN: &str = "scan";
pub(crate) const MODE_SEQUENTIAL: &str = "sequential";
pub(crate) const MODE_PARALLEL: &str = "parallel";

#[derive(Clone, Debug)]
pub struct ScanUsage {
    pub operation: &'static str,
    pub mode: &'static str,
    pub count: u64,
}

type UsageKey = (&'static str, &'static str);

fn usage_map() -> &'static Mutex<HashMap<UsageKey, u64>> {
    static COUNTS: OnceLock<Mutex<HashMap<UsageKey, u64>>> = OnceLock::new();
    COUNTS.get_or_init(|| Mutex::new(HashMap::new()))
}

pub(crate) fn record_scan(operation: &'static str, mode: &'static str) {
    if operation.is_empty() || mode.is_empty() {
        return;
    }
    if let Ok(mut guard) = usage_map().lock() {
        let entry = guard.entry((operation, mode)).or_insert(0);
        *entry = entry.saturating_add(1);
    }
}

pub fn snapshot() -> Vec<ScanUsage> {
    usage_map()
        .lock()
        .map(|guard| {
            guard
                .iter()
                .map(|(&(operation, mode), &count)| ScanUsage {
                    operation,
                    mode,
                    count,
                })
                .collect()
        })
        .unwrap_or_default()
}
