//! End-to-end persistence tests against the sqlite backing.

use chrono::{TimeZone, Utc};
use tempfile::tempdir;

use tribe_intel::models::analytics::EventKind;
use tribe_intel::models::role::{Mode, Role};
use tribe_intel::models::TribePreferences;
use tribe_intel::store::{PreferenceStore, SqliteStore};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn preferences_and_history_survive_reopen() {
    init_logging();
    let dir = tempdir().unwrap();
    let path = dir.path().join("tribe.sqlite3");

    let mut prefs = TribePreferences::default();
    prefs.default_mode = Mode::Executive;
    prefs.max_insights = 3;

    {
        let store = PreferenceStore::new(SqliteStore::new(path.clone()).unwrap());
        store.save_user_preferences(&prefs).unwrap();
        store
            .save_role_detection(
                Role::Executive,
                Role::Executive,
                0.9,
                Utc.with_ymd_and_hms(2026, 3, 4, 9, 0, 0).unwrap(),
            )
            .unwrap();
        store.record_satisfaction(4.0).unwrap();
    }

    let store = PreferenceStore::new(SqliteStore::new(path).unwrap());
    assert_eq!(store.load_user_preferences().unwrap(), Some(prefs));
    let history = store.load_role_history().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].confirmed_role, Role::Executive);
    assert_eq!(store.load_satisfaction_scores().unwrap(), vec![4.0]);
}

#[test]
fn export_import_round_trip_across_backings() {
    init_logging();
    let dir = tempdir().unwrap();

    let source = PreferenceStore::new(SqliteStore::new(dir.path().join("a.sqlite3")).unwrap());
    source
        .save_user_preferences(&TribePreferences::default())
        .unwrap();
    let start = Utc.with_ymd_and_hms(2026, 3, 4, 9, 0, 0).unwrap();
    source
        .record_event(EventKind::SessionStart, None, start)
        .unwrap();
    source
        .record_event(
            EventKind::ModeSwitch,
            Some(Mode::Executive),
            start + chrono::Duration::seconds(30),
        )
        .unwrap();
    source
        .record_event(
            EventKind::SessionEnd,
            None,
            start + chrono::Duration::minutes(10),
        )
        .unwrap();
    source.record_satisfaction(5.0).unwrap();

    let exported = source.export_data().unwrap();

    let target = PreferenceStore::new(SqliteStore::new(dir.path().join("b.sqlite3")).unwrap());
    target.import_data(&exported).unwrap();

    assert_eq!(
        target.load_user_preferences().unwrap(),
        source.load_user_preferences().unwrap()
    );
    assert_eq!(target.load_events().unwrap(), source.load_events().unwrap());

    let analytics = target.get_usage_analytics().unwrap();
    assert_eq!(analytics.total_sessions, 1);
    assert_eq!(analytics.mode_switches, 1);
    assert_eq!(analytics.most_used_mode, Some(Mode::Executive));
    assert_eq!(analytics.session_duration_ms, 600_000);
    assert!((analytics.average_satisfaction - 5.0).abs() < 1e-9);
}

#[test]
fn clear_all_data_erases_the_backing() {
    init_logging();
    let dir = tempdir().unwrap();
    let path = dir.path().join("tribe.sqlite3");

    {
        let store = PreferenceStore::new(SqliteStore::new(path.clone()).unwrap());
        store
            .save_user_preferences(&TribePreferences::default())
            .unwrap();
        store.clear_all_data().unwrap();
    }

    let store = PreferenceStore::new(SqliteStore::new(path).unwrap());
    assert!(store.load_user_preferences().unwrap().is_none());
    assert!(store.load_role_history().unwrap().is_empty());
}
