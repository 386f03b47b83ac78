//! Tests for the planner session.

use serde_json::json;

use super::*;
use crate::{
    db::MemoryStorage,
    error::PlannerError,
    models::FestivalMeta,
    store::storage_key,
};

mod session_tests {
    use super::*;

    const FEST: &str = "test-fest";
    const OTHER: &str = "other-fest";

    fn set(id: &str, day: &str, stage: &str, band: &str, start: &str, end: &str) -> serde_json::Value {
        json!({
            "id": id,
            "dayId": day,
            "stageId": stage,
            "bandName": band,
            "genres": ["Punk"],
            "start": format!("2026-07-17T{start}:00"),
            "end": format!("2026-07-17T{end}:00"),
        })
    }

    fn festival_document(id: &str, sets: Vec<serde_json::Value>) -> String {
        json!({
            "festival": {
                "id": id,
                "name": format!("Festival {id}"),
                "days": [
                    { "id": "fri", "label": "Friday" },
                    { "id": "sat", "label": "Saturday" }
                ],
                "stages": [
                    { "id": "main", "label": "Main" },
                    { "id": "pit", "label": "Pit" }
                ],
                "sets": sets
            }
        })
        .to_string()
    }

    fn catalog() -> Catalog {
        let mut catalog = Catalog::empty();
        catalog.register(
            FestivalMeta {
                id: FEST.to_string(),
                name: "Test Fest".to_string(),
                location: None,
                dates: None,
            },
            festival_document(
                FEST,
                vec![
                    set("S1", "fri", "main", "First Band", "10:00", "11:00"),
                    set("S2", "fri", "pit", "Second Band", "10:30", "11:30"),
                    set("S3", "sat", "main", "Third Band", "12:00", "13:00"),
                ],
            ),
        );
        catalog.register(
            FestivalMeta {
                id: OTHER.to_string(),
                name: "Other Fest".to_string(),
                location: None,
                dates: None,
            },
            festival_document(OTHER, vec![set("O1", "sat", "main", "Other Band", "20:00", "21:00")]),
        );
        catalog
    }

    fn open_with<S: Storage>(storage: S, url: Option<&str>) -> (PlannerSession<S>, ManualClock) {
        let clock = ManualClock::default();
        let mut builder = PlannerSession::builder(catalog(), storage).with_clock(clock.clone());
        if let Some(url) = url {
            builder = builder.with_location(Location::parse(url).unwrap());
        }
        (builder.open(FEST).unwrap(), clock)
    }

    fn open(url: Option<&str>) -> (PlannerSession<MemoryStorage>, ManualClock) {
        open_with(MemoryStorage::new(), url)
    }

    fn planned(session: &PlannerSession<impl Storage>) -> Vec<String> {
        session.store().planned_ids().to_vec()
    }

    fn titles(session: &PlannerSession<impl Storage>) -> Vec<String> {
        session
            .notifications()
            .map(|n| n.title.clone().unwrap_or_default())
            .collect()
    }

    /// Storage that reads fine but refuses every write.
    struct ReadOnlyStorage;

    impl Storage for ReadOnlyStorage {
        fn read(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn write(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(PlannerError::Configuration {
                message: "quota exceeded".to_string(),
            })
        }
    }

    struct WorkingClipboard(Vec<String>);

    impl Clipboard for WorkingClipboard {
        fn copy(&mut self, text: &str) -> std::result::Result<(), ClipboardError> {
            self.0.push(text.to_string());
            Ok(())
        }
    }

    struct BlockedClipboard;

    impl Clipboard for BlockedClipboard {
        fn copy(&mut self, _text: &str) -> std::result::Result<(), ClipboardError> {
            Err(ClipboardError("permission denied".to_string()))
        }
    }

    #[test]
    fn test_open_defaults() {
        let (session, _) = open(None);
        assert_eq!(session.festival().id, FEST);
        assert_eq!(session.filters().day_id, "fri");
        assert_eq!(session.filters().view_mode, ViewMode::List);
        assert_eq!(
            session.location().as_str(),
            "https://festplan.app/festivals/test-fest"
        );
        assert_eq!(session.notifications().count(), 0);
        assert_eq!(session.import_count(), 1);
    }

    #[test]
    fn test_open_unknown_festival_fails() {
        let result = PlannerSession::builder(catalog(), MemoryStorage::new()).open("nope");
        assert!(matches!(result, Err(PlannerError::FestivalNotFound { .. })));
    }

    #[test]
    fn test_import_keeps_only_known_ids() {
        let (session, _) = open(Some(
            "https://festplan.app/festivals/test-fest?plan=S3,S1,S9,S1",
        ));
        assert_eq!(planned(&session), ["S3", "S1"]);
        assert_eq!(session.imported_sets(), 2);

        let notification = session.notifications().next().unwrap();
        assert_eq!(notification.title.as_deref(), Some("Plan loaded"));
        assert_eq!(notification.message, "Loaded 2 sets from shared link.");
        assert_eq!(notification.variant, NotificationVariant::Success);

        // Canonicalized: sorted, unknown IDs dropped.
        assert_eq!(session.location().param(PLAN_PARAM).as_deref(), Some("S1,S3"));
        assert_eq!(session.location().history_len(), 1);
    }

    #[test]
    fn test_import_single_set_message() {
        let (session, _) = open(Some("https://festplan.app/festivals/test-fest?plan=S2"));
        assert_eq!(planned(&session), ["S2"]);
        assert_eq!(
            session.notifications().next().unwrap().message,
            "Loaded 1 set from shared link."
        );
    }

    #[test]
    fn test_import_with_no_valid_ids_is_silent() {
        let mut storage = MemoryStorage::new();
        storage
            .write(
                &storage_key(FEST),
                r#"{"plannedSetIds":["S2"],"favoriteSetIds":[]}"#,
            )
            .unwrap();
        let (session, _) = open_with(
            storage,
            Some("https://festplan.app/festivals/test-fest?plan=X1,X2"),
        );

        assert_eq!(planned(&session), ["S2"]);
        assert_eq!(session.imported_sets(), 0);
        assert_eq!(session.notifications().count(), 0);
        assert_eq!(session.location().param(PLAN_PARAM).as_deref(), Some("S2"));
    }

    #[test]
    fn test_import_replaces_hydrated_plan() {
        let mut storage = MemoryStorage::new();
        storage
            .write(
                &storage_key(FEST),
                r#"{"plannedSetIds":["S2"],"favoriteSetIds":["S2"]}"#,
            )
            .unwrap();
        let (session, _) = open_with(
            storage,
            Some("https://festplan.app/festivals/test-fest?plan=S1"),
        );
        assert_eq!(planned(&session), ["S1"]);
        assert_eq!(session.store().favorite_ids(), ["S2"]);
    }

    #[test]
    fn test_hydration_drops_stale_ids() {
        let mut storage = MemoryStorage::new();
        storage
            .write(
                &storage_key(FEST),
                r#"{"plannedSetIds":["S1","gone"],"favoriteSetIds":["gone"]}"#,
            )
            .unwrap();
        let (session, _) = open_with(storage, None);
        assert_eq!(planned(&session), ["S1"]);
        assert!(session.store().favorite_ids().is_empty());
    }

    #[test]
    fn test_export_follows_plan_without_reimport() {
        let (mut session, _) = open(None);
        assert_eq!(session.location().param(PLAN_PARAM), None);

        session.toggle_planned("S2");
        session.toggle_planned("S1");
        assert_eq!(session.location().param(PLAN_PARAM).as_deref(), Some("S1,S2"));
        assert!(session.share_url().contains("plan=S1%2CS2"));

        session.toggle_planned("S2");
        assert_eq!(session.location().param(PLAN_PARAM).as_deref(), Some("S1"));

        session.toggle_planned("S1");
        assert_eq!(session.location().param(PLAN_PARAM), None);
        assert!(!session.share_url().contains('?'));

        assert_eq!(session.location().history_len(), 1);
        assert_eq!(session.import_count(), 1);
    }

    #[test]
    fn test_export_keeps_other_params() {
        let (mut session, _) = open(Some(
            "https://festplan.app/festivals/test-fest?ref=poster&plan=S1",
        ));
        session.toggle_planned("S3");
        assert_eq!(
            session.location().as_str(),
            "https://festplan.app/festivals/test-fest?ref=poster&plan=S1%2CS3"
        );
    }

    #[test]
    fn test_toggle_unknown_set_is_ignored() {
        let (mut session, _) = open(None);
        session.toggle_planned("nope");
        session.toggle_favorite("nope");
        assert!(planned(&session).is_empty());
        assert!(session.store().favorite_ids().is_empty());
    }

    #[test]
    fn test_adding_is_silent_removing_offers_undo() {
        let (mut session, _) = open(None);
        session.toggle_planned("S1");
        assert_eq!(session.notifications().count(), 0);

        session.toggle_planned("S1");
        assert!(planned(&session).is_empty());
        let notification = session.notifications().next().unwrap();
        assert_eq!(notification.title.as_deref(), Some("Removed from plan"));
        assert_eq!(notification.message, "First Band");
        assert_eq!(notification.duration_ms, REMOVE_UNDO_MS);
        let action = notification.action.as_ref().unwrap();
        assert_eq!(action.label, "Undo");
        assert_eq!(
            action.undo,
            UndoAction::RestoreSet {
                set_id: "S1".to_string(),
                band_name: "First Band".to_string(),
            }
        );
    }

    #[test]
    fn test_remove_undo_restores_set() {
        let (mut session, _) = open(None);
        session.toggle_planned("S1");
        session.toggle_planned("S2");
        let id = session.remove_from_plan("S1").unwrap();

        assert!(session.activate(id));
        assert_eq!(planned(&session), ["S2", "S1"]);
        assert!(session.notification(id).is_none());
        assert_eq!(titles(&session), ["Restored"]);
        assert_eq!(session.location().param(PLAN_PARAM).as_deref(), Some("S1,S2"));

        // The action ran once; the notification is gone.
        assert!(!session.activate(id));
    }

    #[test]
    fn test_remove_unplanned_set_does_nothing() {
        let (mut session, _) = open(None);
        assert_eq!(session.remove_from_plan("S1"), None);
        assert_eq!(session.notifications().count(), 0);
    }

    #[test]
    fn test_undo_expires_with_notification() {
        let (mut session, clock) = open(None);
        session.toggle_planned("S1");
        let id = session.remove_from_plan("S1").unwrap();

        clock.advance_ms(REMOVE_UNDO_MS - 1);
        assert_eq!(session.tick(), 0);
        assert!(session.notification(id).is_some());

        clock.advance_ms(1);
        assert_eq!(session.tick(), 1);
        assert!(session.notification(id).is_none());
        assert!(!session.activate(id));
        assert!(planned(&session).is_empty());
    }

    #[test]
    fn test_dismiss_cancels_timer() {
        let (mut session, clock) = open(None);
        session.toggle_planned("S1");
        let id = session.remove_from_plan("S1").unwrap();
        assert_eq!(session.pending_timers(), 1);

        assert!(session.dismiss(id));
        assert_eq!(session.pending_timers(), 0);
        assert!(!session.dismiss(id));

        clock.advance_ms(REMOVE_UNDO_MS);
        assert_eq!(session.tick(), 0);
    }

    #[test]
    fn test_clear_and_undo_restores_snapshot() {
        let (mut session, _) = open(None);
        for id in ["S3", "S1", "S2"] {
            session.toggle_planned(id);
        }
        session.toggle_favorite("S3");

        let id = session.clear_plan().unwrap();
        assert!(planned(&session).is_empty());
        assert_eq!(session.location().param(PLAN_PARAM), None);

        let notification = session.notification(id).unwrap();
        assert_eq!(notification.title.as_deref(), Some("Plan cleared"));
        assert_eq!(notification.message, "Removed 3 sets.");
        assert_eq!(notification.duration_ms, CLEAR_UNDO_MS);

        assert!(session.activate(id));
        assert_eq!(planned(&session), ["S3", "S1", "S2"]);
        assert_eq!(session.store().favorite_ids(), ["S3"]);

        let restored = session.notifications().next().unwrap();
        assert_eq!(restored.title.as_deref(), Some("Restored"));
        assert_eq!(restored.message, "Your plan is back.");
        assert_eq!(restored.duration_ms, RESTORED_MS);
    }

    #[test]
    fn test_clear_empty_plan_is_noop() {
        let (mut session, _) = open(None);
        assert_eq!(session.clear_plan(), None);
        assert_eq!(session.notifications().count(), 0);
    }

    #[test]
    fn test_clear_message_singular() {
        let (mut session, _) = open(None);
        session.toggle_planned("S1");
        let id = session.clear_plan().unwrap();
        assert_eq!(session.notification(id).unwrap().message, "Removed 1 set.");
    }

    #[test]
    fn test_notifications_capped_newest_first() {
        let (mut session, _) = open(None);
        for id in ["S1", "S2", "S3"] {
            session.toggle_planned(id);
        }
        let first = session.remove_from_plan("S1").unwrap();
        session.remove_from_plan("S2");
        session.remove_from_plan("S3");
        session.toggle_planned("S1");
        session.toggle_planned("S1");
        session.toggle_planned("S2");
        session.toggle_planned("S2");

        assert_eq!(session.notifications().count(), notifications::MAX_ACTIVE);
        assert!(session.notification(first).is_none());
        assert_eq!(session.notifications().next().unwrap().message, "Second Band");
        // Evicted notifications take their timers with them.
        assert_eq!(session.pending_timers(), notifications::MAX_ACTIVE);
    }

    #[test]
    fn test_conflict_jump_scrolls_then_clears_highlight() {
        let (mut session, clock) = open(None);
        session.open_drawer();
        session.resolve_conflict("S2");
        assert!(!session.is_drawer_open());

        clock.advance_ms(SCROLL_DELAY_MS - 1);
        session.tick();
        assert!(session.take_scroll_signals().is_empty());
        assert_eq!(session.highlighted_set_id(), None);

        clock.advance_ms(1);
        session.tick();
        assert_eq!(
            session.take_scroll_signals(),
            [ScrollSignal {
                target_set_id: "S2".to_string(),
                highlight_duration_ms: HIGHLIGHT_MS,
            }]
        );
        assert_eq!(session.highlighted_set_id(), Some("S2"));
        assert!(session.take_scroll_signals().is_empty());

        clock.advance_ms(HIGHLIGHT_MS);
        session.tick();
        assert_eq!(session.highlighted_set_id(), None);
        assert_eq!(session.pending_timers(), 0);
    }

    #[test]
    fn test_newer_conflict_jump_supersedes_pending_one() {
        let (mut session, clock) = open(None);
        session.resolve_conflict("S1");
        clock.advance_ms(40);
        session.resolve_conflict("S2");

        clock.advance_ms(SCROLL_DELAY_MS);
        session.tick();
        let signals = session.take_scroll_signals();
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].target_set_id, "S2");
    }

    #[test]
    fn test_conflict_jump_to_unknown_set_is_ignored() {
        let (mut session, _) = open(None);
        session.open_drawer();
        session.resolve_conflict("nope");
        assert!(session.is_drawer_open());
        assert_eq!(session.pending_timers(), 0);
    }

    #[test]
    fn test_write_failure_reported_once_per_action() {
        let (mut session, _) = open_with(ReadOnlyStorage, None);
        session.toggle_planned("S1");

        assert_eq!(planned(&session), ["S1"]);
        let notification = session.notifications().next().unwrap();
        assert_eq!(notification.title.as_deref(), Some("Couldn't save plan"));
        assert_eq!(notification.variant, NotificationVariant::Danger);
        assert_eq!(session.notifications().count(), 1);
        assert_eq!(session.location().param(PLAN_PARAM).as_deref(), Some("S1"));
    }

    #[test]
    fn test_import_counted_even_when_save_fails() {
        let (session, _) = open_with(
            ReadOnlyStorage,
            Some("https://festplan.app/festivals/test-fest?plan=S1,S2"),
        );
        assert_eq!(session.imported_sets(), 2);
        assert_eq!(planned(&session), ["S1", "S2"]);
        assert_eq!(titles(&session), ["Plan loaded", "Couldn't save plan"]);
    }

    #[test]
    fn test_copy_share_link() {
        let (mut session, _) = open(None);
        session.toggle_planned("S1");
        let mut clipboard = WorkingClipboard(Vec::new());

        let outcome = session.copy_share_link(&mut clipboard);
        assert_eq!(outcome, ShareOutcome::Copied(session.share_url()));
        assert_eq!(clipboard.0, [session.share_url()]);
        assert_eq!(titles(&session), ["Link copied"]);
    }

    #[test]
    fn test_copy_share_link_falls_back_to_manual() {
        let (mut session, _) = open(None);
        let outcome = session.copy_share_link(&mut BlockedClipboard);

        assert!(matches!(outcome, ShareOutcome::Manual(_)));
        assert_eq!(outcome.url(), "https://festplan.app/festivals/test-fest");
        let notification = session.notifications().next().unwrap();
        assert_eq!(notification.title.as_deref(), Some("Copy link"));
        assert_eq!(notification.variant, NotificationVariant::Default);
        assert_eq!(notification.duration_ms, MANUAL_COPY_MS);
    }

    #[test]
    fn test_navigate_does_not_reimport() {
        let (mut session, _) = open(None);
        session.toggle_planned("S1");

        session.navigate(
            Location::parse("https://festplan.app/festivals/test-fest?plan=S2,S3").unwrap(),
        );
        assert_eq!(planned(&session), ["S1"]);
        assert_eq!(session.location().param(PLAN_PARAM).as_deref(), Some("S1"));
        assert_eq!(session.location().history_len(), 2);
        assert_eq!(session.import_count(), 1);
    }

    #[test]
    fn test_switch_festival_reloads_everything() {
        let (mut session, _) = open(None);
        session.toggle_planned("S1");
        session.set_query("band");
        session.open_drawer();

        let switched = session
            .switch_festival(
                OTHER,
                Location::parse("https://festplan.app/festivals/other-fest?plan=O1").unwrap(),
            )
            .unwrap();
        assert!(switched);
        assert_eq!(session.festival().id, OTHER);
        assert_eq!(planned(&session), ["O1"]);
        assert_eq!(session.filters().day_id, "fri");
        assert!(session.filters().search_query.is_empty());
        assert!(!session.is_drawer_open());
        assert_eq!(session.import_count(), 2);
        assert_eq!(session.store().storage().len(), 2);

        session
            .switch_festival(
                FEST,
                Location::for_festival("https://festplan.app", FEST).unwrap(),
            )
            .unwrap();
        assert_eq!(planned(&session), ["S1"]);
        assert_eq!(session.location().param(PLAN_PARAM).as_deref(), Some("S1"));
    }

    #[test]
    fn test_switch_festival_drops_pending_undo() {
        let (mut session, _) = open(None);
        session.toggle_planned("S1");
        let cleared = session.clear_plan().unwrap();

        session
            .switch_festival(
                OTHER,
                Location::parse("https://festplan.app/festivals/other-fest?plan=O1").unwrap(),
            )
            .unwrap();
        assert_eq!(titles(&session), ["Plan loaded"]);
        assert_eq!(session.pending_timers(), 1);

        assert!(!session.activate(cleared));
        assert_eq!(planned(&session), ["O1"]);
        let stored = session
            .store()
            .storage()
            .read(&storage_key(OTHER))
            .unwrap()
            .unwrap();
        assert!(stored.contains("\"O1\""));
        assert!(!stored.contains("\"S1\""));
    }

    #[test]
    fn test_switch_to_same_festival_is_noop() {
        let (mut session, _) = open(None);
        let location = Location::parse("https://festplan.app/festivals/test-fest?plan=S2").unwrap();
        assert!(!session.switch_festival(FEST, location).unwrap());
        assert!(planned(&session).is_empty());
        assert_eq!(session.import_count(), 1);
    }

    #[test]
    fn test_switch_to_unknown_festival_keeps_session() {
        let (mut session, _) = open(None);
        session.toggle_planned("S1");
        let location = Location::parse("https://festplan.app/festivals/nope").unwrap();

        let result = session.switch_festival("nope", location);
        assert!(matches!(result, Err(PlannerError::FestivalNotFound { .. })));
        assert_eq!(session.festival().id, FEST);
        assert_eq!(planned(&session), ["S1"]);
    }

    #[test]
    fn test_filters() {
        let (mut session, _) = open(None);
        assert_eq!(session.visible_sets().len(), 2);

        assert!(session.set_day("sat"));
        assert!(!session.set_day("sat"));
        assert!(!session.set_day("sun"));
        assert_eq!(session.filters().day_id, "sat");
        assert_eq!(session.visible_sets().len(), 1);

        session.set_day("fri");
        session.set_query("  SECOND ");
        assert_eq!(session.visible_sets()[0].id, "S2");

        session.set_query("");
        session.toggle_favorite("S1");
        session.toggle_favorites_only();
        let ids: Vec<&str> = session.visible_sets().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["S1"]);

        session.toggle_genre("Jazz");
        assert!(session.visible_sets().is_empty());
        assert_eq!(session.all_genres(), ["Punk"]);

        session.set_view_mode(ViewMode::Timeline);
        assert_eq!(session.filters().view_mode, ViewMode::Timeline);
    }

    #[test]
    fn test_apply_query() {
        let (mut session, _) = open(None);
        session.toggle_favorite("S3");
        session.set_view_mode(ViewMode::Plan);

        session
            .apply_query(&LineupQuery {
                day: Some("sat".to_string()),
                search: Some("third".to_string()),
                genres: vec!["punk".to_string()],
                favorites_only: true,
            })
            .unwrap();
        assert_eq!(session.filters().day_id, "sat");
        assert_eq!(session.filters().view_mode, ViewMode::Plan);
        assert_eq!(session.visible_sets()[0].id, "S3");

        session.apply_query(&LineupQuery::default()).unwrap();
        assert_eq!(session.filters().day_id, "fri");
        assert!(session.filters().selected_genres.is_empty());
        assert_eq!(session.visible_sets().len(), 2);
    }

    #[test]
    fn test_apply_query_rejects_unknown_day() {
        let (mut session, _) = open(None);
        session.set_query("first");
        let result = session.apply_query(&LineupQuery {
            day: Some("mon".to_string()),
            ..LineupQuery::default()
        });
        assert!(matches!(result, Err(PlannerError::InvalidInput { .. })));
        assert_eq!(session.filters().search_query, "first");
    }

    #[test]
    fn test_sets_by_stage_lists_every_stage() {
        let (session, _) = open(None);
        let stages = session.sets_by_stage();
        assert_eq!(stages.len(), 2);
        assert_eq!(stages[0].stage.id, "main");
        assert_eq!(stages[0].sets[0].id, "S1");
        assert_eq!(stages[1].sets[0].id, "S2");
    }

    #[test]
    fn test_plan_views_and_conflicts() {
        let (mut session, _) = open(None);
        for id in ["S3", "S2", "S1"] {
            session.toggle_planned(id);
        }

        let ids: Vec<&str> = session.planned_sets().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["S1", "S2", "S3"]);

        let days = session.plan_by_day();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].day.id, "fri");
        assert_eq!(days[0].sets.len(), 2);
        assert_eq!(days[1].sets[0].id, "S3");

        let conflicts = session.conflicts();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].pair_key, "S1|S2");

        let conflicting = session.conflicting_ids();
        assert!(conflicting.contains("S1") && conflicting.contains("S2"));
        assert!(!conflicting.contains("S3"));
    }
}
