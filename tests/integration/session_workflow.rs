/// Session workflows against SQLite sheet files
use chrono::NaiveDate;
use habit_streak_tracker::*;
use tempfile::NamedTempFile;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[cfg(test)]
mod session_workflow_tests {
    use super::*;

    #[tokio::test]
    async fn test_server_creation() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let server = HabitTrackerServer::new(temp_file.path(), Some(date(2024, 3, 2))).await;

        let server = server.expect("Failed to create server");
        assert!(server.session().store().is_empty());
        assert_eq!(server.session().today(), date(2024, 3, 2));
    }

    #[tokio::test]
    async fn test_save_and_reopen() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let db_path = temp_file.path().to_path_buf();

        let sheet = SqliteSheet::open(&db_path).expect("Failed to open sheet");
        let mut session = Session::open(Box::new(sheet)).await.with_today(date(2024, 3, 2));
        session.apply(Command::AddHabit { name: "Read".into() }).unwrap();
        session
            .apply(Command::SetDay { habit: "Read".into(), date: date(2024, 3, 1), completed: true })
            .unwrap();
        session.apply(Command::CheckIn { habit: "Read".into(), done: true }).unwrap();
        assert_eq!(session.save().await.unwrap(), 2);

        // Second session over the same file sees the saved data
        let sheet = SqliteSheet::open(&db_path).expect("Failed to reopen sheet");
        let reopened = Session::open(Box::new(sheet)).await.with_today(date(2024, 3, 2));
        assert_eq!(reopened.store(), session.store());
        assert_eq!(reopened.streak("Read").unwrap().current_streak, 2);
    }

    #[tokio::test]
    async fn test_unsaved_changes_are_not_persisted() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let db_path = temp_file.path().to_path_buf();

        let sheet = SqliteSheet::open(&db_path).unwrap();
        let mut session = Session::open(Box::new(sheet)).await;
        session.apply(Command::AddHabit { name: "Read".into() }).unwrap();
        session
            .apply(Command::SetDay { habit: "Read".into(), date: date(2024, 3, 1), completed: true })
            .unwrap();
        drop(session);

        let sheet = SqliteSheet::open(&db_path).unwrap();
        let reopened = Session::open(Box::new(sheet)).await;
        assert!(reopened.store().is_empty());
    }

    #[tokio::test]
    async fn test_load_skips_malformed_rows_from_sheet() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let sheet = SqliteSheet::open(temp_file.path()).unwrap();
        sheet
            .write_rows(&[
                SheetRow::new("Date", "Habit", "Completed"),
                SheetRow::new("01/03/2024", "Read", "True"),
                SheetRow::new("02/03/2024", "Read", "True"),
                SheetRow::new("not a date", "Read", "True"),
                SheetRow::new("01/03/2024", "Run", "True"),
                SheetRow::new("02/03/2024", "Run", "False"),
            ])
            .unwrap();

        let mut session = Session::new(Box::new(sheet)).with_today(date(2024, 3, 2));
        let report = session.reload().await.unwrap();

        assert_eq!(report.entries(), 4);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(session.streak("Read").unwrap().current_streak, 2);
        assert_eq!(session.streak("Run").unwrap().current_streak, 0);
    }

    #[tokio::test]
    async fn test_all_rows_malformed_starts_empty() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let sheet = SqliteSheet::open(temp_file.path()).unwrap();
        sheet
            .write_rows(&[SheetRow::new("yesterday", "Read", "True")])
            .unwrap();

        let session = Session::open(Box::new(sheet)).await;
        assert!(session.store().is_empty());
    }

    #[tokio::test]
    async fn test_tools_drive_session() {
        let mut session = Session::new(Box::new(MemorySheet::new())).with_today(date(2024, 2, 29));

        let added = tools::add_habit(&mut session, tools::AddHabitParams { name: "Read".into() }).unwrap();
        assert!(added.success);
        let empty = tools::add_habit(&mut session, tools::AddHabitParams { name: String::new() }).unwrap();
        assert!(!empty.success);
        assert_eq!(empty.message, "Please enter a habit name.");

        let checked = tools::check_in(
            &mut session,
            tools::CheckInParams { habit: "Read".into(), done: true },
        )
        .unwrap();
        assert_eq!(checked.current_streak, 1);
        assert_eq!(checked.tier, StreakTier::GreatJob);

        let edited = tools::edit_day(
            &mut session,
            tools::EditDayParams { habit: "Read".into(), date: "2024-02-28".into(), completed: None },
        )
        .unwrap();
        assert!(edited.completed);
        assert_eq!(edited.current_streak, 2);

        let calendar = tools::get_habit_calendar(
            &session,
            tools::CalendarParams { habit: "Read".into(), month: None, year: None },
        )
        .unwrap();
        assert_eq!(calendar.grid.days.len(), 29);
        assert_eq!(calendar.grid.completed_days(), 2);

        let saved = tools::save_habits(&session).await.unwrap();
        assert_eq!(saved.rows, 2);

        let bad_date = tools::edit_day(
            &mut session,
            tools::EditDayParams { habit: "Read".into(), date: "28/02/2024".into(), completed: Some(true) },
        );
        assert!(matches!(bad_date, Err(ServerError::Domain(DomainError::InvalidDate(_)))));
    }
}
