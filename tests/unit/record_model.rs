/// Tests of the record model through the public API
use chrono::NaiveDate;
use habit_streak_tracker::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[cfg(test)]
mod record_model_tests {
    use super::*;

    #[test]
    fn test_read_habit_scenario() {
        let mut store = RecordStore::new();
        store.add_habit("Read").unwrap();
        store.upsert_entry("Read", date(2024, 3, 1), true).unwrap();
        store.upsert_entry("Read", date(2024, 3, 2), true).unwrap();

        let record = store.record("Read").unwrap();
        assert_eq!(current_streak(record, date(2024, 3, 2)), 2);

        store.upsert_entry("Read", date(2024, 3, 3), false).unwrap();
        let record = store.record("Read").unwrap();
        assert_eq!(current_streak(record, date(2024, 3, 3)), 0);
    }

    #[test]
    fn test_habit_without_entries_has_zero_streak() {
        let mut store = RecordStore::new();
        store.add_habit("Meditate").unwrap();
        let streak = Streak::calculate(store.record("Meditate").unwrap(), date(2024, 1, 1));
        assert_eq!(streak.current_streak, 0);
        assert_eq!(streak.today, None);
    }

    #[test]
    fn test_duplicate_add_keeps_single_habit() {
        let mut store = RecordStore::new();
        store.add_habit("Read").unwrap();
        store.upsert_entry("Read", date(2024, 3, 1), true).unwrap();

        let err = store.add_habit("Read").unwrap_err();
        assert!(matches!(
            err,
            DomainError::DuplicateHabit { reason: RejectReason::AlreadyExists, .. }
        ));
        assert_eq!(store.habit_names().count(), 1);
        assert_eq!(store.get_entries("Read").unwrap().len(), 1);
    }

    #[test]
    fn test_february_projection() {
        let mut store = RecordStore::new();
        store.add_habit("Run").unwrap();
        let record = store.record("Run").unwrap();

        assert_eq!(MonthGrid::project(record, 2, 2024).unwrap().days.len(), 29);
        assert_eq!(MonthGrid::project(record, 2, 2023).unwrap().days.len(), 28);
        assert_eq!(days_in_month(2, 2024).unwrap(), 29);
        assert_eq!(days_in_month(2, 2023).unwrap(), 28);
    }

    #[test]
    fn test_projection_reflects_edits() {
        let mut store = RecordStore::new();
        store.add_habit("Run").unwrap();
        store.upsert_entry("Run", date(2023, 2, 28), true).unwrap();

        let grid = MonthGrid::project(store.record("Run").unwrap(), 2, 2023).unwrap();
        assert!(grid.cell(28).unwrap().completed);
        assert_eq!(grid.completed_days(), 1);
        assert_eq!(grid.first_weekday_offset, first_weekday_offset(2, 2023).unwrap());
    }

    #[test]
    fn test_rows_round_trip_modulo_order() {
        let mut store = RecordStore::new();
        store.add_habit("Read").unwrap();
        store.add_habit("Stretch").unwrap();
        for day in 1..=5 {
            store.upsert_entry("Read", date(2024, 3, day), day % 2 == 0).unwrap();
        }
        store.upsert_entry("Stretch", date(2024, 1, 31), true).unwrap();

        let mut rows = store_to_rows(&store);
        rows.rotate_left(3);

        let report = store_from_rows(&rows).unwrap();
        assert!(report.skipped.is_empty());
        assert_eq!(report.store, store);
    }

    #[test]
    fn test_one_malformed_row_among_five() {
        let rows = vec![
            SheetRow::new("01/03/2024", "Read", "True"),
            SheetRow::new("02/03/2024", "Read", "True"),
            SheetRow::new("03/13/2024", "Read", "True"),
            SheetRow::new("01/03/2024", "Walk", "False"),
            SheetRow::new("04/03/2024", "Walk", "True"),
        ];

        let report = store_from_rows(&rows).unwrap();
        assert_eq!(report.entries(), 4);
        assert_eq!(report.skipped.len(), 1);
    }
}

#[cfg(test)]
mod memory_sheet_tests {
    use super::*;

    #[test]
    fn test_memory_sheet_round_trip() {
        let sheet = MemorySheet::new();
        let mut store = RecordStore::new();
        store.add_habit("Read").unwrap();
        store.upsert_entry("Read", date(2024, 3, 1), true).unwrap();

        let written = tokio_test::block_on(sheet.save_all(&store)).unwrap();
        assert_eq!(written, 1);
        assert_eq!(sheet.rows(), vec![SheetRow::new("01/03/2024", "Read", "True")]);

        let report = tokio_test::block_on(sheet.load_all()).unwrap();
        assert_eq!(report.store, store);
    }
}
