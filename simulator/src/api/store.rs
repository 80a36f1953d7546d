use mineguardcore::report::HistoryRecord;

/// In-memory stand-in for the inspections table; newest entries first, ids
/// assigned on insert like the real database would.
#[derive(Debug, Clone, Default)]
pub struct InspectionStore {
    entries: Vec<HistoryRecord>,
    next_id: i64,
}

impl InspectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, mut record: HistoryRecord) -> HistoryRecord {
        self.next_id += 1;
        record.id = self.next_id;
        self.entries.insert(0, record.clone());
        record
    }

    pub fn snapshot(&self) -> Vec<HistoryRecord> {
        self.entries.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(job_id: &str) -> HistoryRecord {
        HistoryRecord {
            id: 0,
            job_id: job_id.into(),
            filename: "site.kml".into(),
            created_at: "2024-05-01T12:00:00Z".into(),
            illegal_area_m2: Some(500.0),
            volume_m3: Some(1200.0),
            avg_depth_m: Some(3.5),
            truckloads: Some(80.0),
            report_url: None,
            map_url: None,
            model_url: None,
        }
    }

    #[test]
    fn inserts_assign_ids_and_keep_newest_first() {
        let mut store = InspectionStore::new();
        assert!(store.is_empty());

        let first = store.insert(record("a1"));
        let second = store.insert(record("b2"));
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        let snapshot = store.snapshot();
        assert_eq!(store.len(), 2);
        assert_eq!(snapshot[0].job_id, "b2");
        assert_eq!(snapshot[1].job_id, "a1");
    }
}
