use chrono::NaiveDate;
use studydesk_core::{
    ensure_seeded_on, AccountError, AccountService, AgendaService, AssessmentId, DomainStore,
    GradeService, MemoryMedium, NewClassSession, ServiceError, Shift, Status, TransportService,
    Weekday,
};

fn seeded_store() -> DomainStore<MemoryMedium> {
    let store = DomainStore::new(MemoryMedium::new());
    ensure_seeded_on(&store, day(17)).unwrap();
    store
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
}

#[test]
fn grade_edits_persist_and_drive_evaluation() {
    let store = seeded_store();
    let grades = GradeService::new(&store);

    grades
        .set_score("calc1", AssessmentId::FirstExam, Some(9.0))
        .unwrap();
    let in_progress = grades.evaluate_subject("calc1").unwrap();
    assert_eq!(in_progress.average, Some(9.0));
    assert_eq!(in_progress.status, Status::InProgress);

    for (id, score) in [
        (AssessmentId::SecondExam, 5.0),
        (AssessmentId::AppliedWorkI, 6.0),
        (AssessmentId::AppliedWorkII, 6.0),
    ] {
        grades.set_score("calc1", id, Some(score)).unwrap();
    }
    // (18 + 10 + 6 + 6) / 6 = 6.67
    let done = grades.evaluate_subject("calc1").unwrap();
    assert_eq!(done.average, Some(6.67));
    assert_eq!(done.status, Status::Failed);

    let updated = grades
        .set_weight("calc1", AssessmentId::FirstExam, 6.0)
        .unwrap();
    assert_eq!(updated.assessment(AssessmentId::FirstExam).unwrap().weight, 6.0);
    // (54 + 10 + 6 + 6) / 10 = 7.6
    assert_eq!(grades.evaluate_subject("calc1").unwrap().status, Status::Passed);

    // Other subjects are untouched.
    assert_eq!(grades.evaluate_subject("linalg").unwrap().average, None);
    assert!(grades.report().contains("Subject: Calculus I\n  E1 - Exam 1: score 9 (weight 6)\n"));
}

#[test]
fn clearing_a_score_returns_subject_to_in_progress() {
    let store = seeded_store();
    let grades = GradeService::new(&store);
    for id in AssessmentId::ALL {
        grades.set_score("hci", id, Some(8.0)).unwrap();
    }
    assert_eq!(grades.evaluate_subject("hci").unwrap().status, Status::Passed);

    grades.set_score("hci", AssessmentId::AppliedWorkII, None).unwrap();
    assert_eq!(grades.evaluate_subject("hci").unwrap().status, Status::InProgress);
}

#[test]
fn grade_service_reports_unknown_subject() {
    let store = seeded_store();
    let grades = GradeService::new(&store);
    let err = grades
        .set_score("astronomy", AssessmentId::FirstExam, Some(5.0))
        .unwrap_err();
    assert!(matches!(err, ServiceError::SubjectNotFound(id) if id == "astronomy"));
}

#[test]
fn agenda_adds_lists_and_exports_sessions() {
    let store = seeded_store();
    let agenda = AgendaService::new(&store);

    assert_eq!(agenda.sessions_on(day(17)).len(), 2);
    assert_eq!(
        agenda.highlighted_dates(),
        vec![day(17), day(18), day(20), day(21)]
    );

    let added = agenda
        .add_session(NewClassSession {
            calendar_date: day(19),
            name: "  Software Engineering ".to_string(),
            start_time: "14:00".to_string(),
            end_time: "15:40".to_string(),
            room: Some("   ".to_string()),
            instructor: Some("Prof. Ana".to_string()),
        })
        .unwrap();
    assert_eq!(added.name, "Software Engineering");
    assert_eq!(added.room, None);
    assert_eq!(agenda.sessions_on(day(19)), vec![added.clone()]);

    let summary = agenda.day_summary(day(19)).unwrap();
    assert_eq!(
        summary,
        "Classes on Monday, October 19\n--------------------------\nSoftware Engineering - 14:00 to 15:40 (Prof. Ana)"
    );

    let rows = agenda.day_rows(day(19)).unwrap();
    assert_eq!(rows[0], vec!["Subject", "Start", "End", "Instructor", "Room"]);
    assert_eq!(
        rows[1],
        vec!["Software Engineering", "14:00", "15:40", "Prof. Ana", "-"]
    );
}

#[test]
fn agenda_rejects_invalid_sessions_and_empty_exports() {
    let store = seeded_store();
    let agenda = AgendaService::new(&store);

    let err = agenda
        .add_session(NewClassSession {
            calendar_date: day(19),
            name: "Late Lab".to_string(),
            start_time: "16:00".to_string(),
            end_time: "15:00".to_string(),
            room: None,
            instructor: None,
        })
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidClassSession(_)));
    assert!(agenda.sessions_on(day(19)).is_empty());

    assert!(matches!(
        agenda.day_rows(day(25)).unwrap_err(),
        ServiceError::EmptyDay(date) if date == day(25)
    ));
}

#[test]
fn agenda_update_replaces_by_id() {
    let store = seeded_store();
    let agenda = AgendaService::new(&store);
    let mut session = agenda.sessions_on(day(18)).remove(0);

    session.room = Some("Room 999".to_string());
    agenda.update_session(session.clone()).unwrap();
    assert_eq!(agenda.sessions_on(day(18)), vec![session.clone()]);

    session.id = uuid::Uuid::new_v4();
    assert!(matches!(
        agenda.update_session(session).unwrap_err(),
        ServiceError::ClassSessionNotFound(_)
    ));
}

#[test]
fn agenda_edits_session_listed_from_fallback_defaults() {
    let medium = MemoryMedium::with_entries([("studydesk.class_sessions", "{corrupt")]);
    let store = DomainStore::new(&medium);
    let agenda = AgendaService::new(&store);

    let first: Vec<_> = store.class_sessions().into_iter().map(|s| s.id).collect();
    let second: Vec<_> = store.class_sessions().into_iter().map(|s| s.id).collect();
    assert_eq!(first, second);

    let mut session = store.class_sessions().remove(0);
    session.name = "  Calculus I (make-up)  ".to_string();
    session.instructor = Some("   ".to_string());
    agenda.update_session(session.clone()).unwrap();

    let stored = store.class_sessions();
    assert_eq!(stored.len(), 5);
    let edited = stored.iter().find(|s| s.id == session.id).unwrap();
    assert_eq!(edited.name, "Calculus I (make-up)");
    assert_eq!(edited.instructor, None);
}

#[test]
fn transport_lines_are_replaced_or_appended() {
    let medium = MemoryMedium::new();
    let store = DomainStore::new(&medium);
    let transport = TransportService::new(&store);
    store.replace_transport_schedules(&[]).unwrap();

    assert!(transport.lines_for(Weekday::Monday, Shift::Morning).is_empty());

    let saved = transport
        .save_lines(Weekday::Monday, Shift::Morning, "06:30 - A\n\n  07:10 - B  \n")
        .unwrap();
    assert_eq!(saved, vec!["06:30 - A", "07:10 - B"]);

    transport
        .save_lines(Weekday::Monday, Shift::Morning, "09:00 - C")
        .unwrap();
    assert_eq!(store.transport_schedules().len(), 1);
    assert_eq!(
        transport.schedule_text(Weekday::Monday, Shift::Morning),
        "Transport schedule - Monday - Morning\n-------------------------------\n09:00 - C"
    );
}

#[test]
fn transport_save_keeps_other_pairs() {
    let store = seeded_store();
    let transport = TransportService::new(&store);
    let before = transport.lines_for(Weekday::Tuesday, Shift::Evening);

    transport
        .save_lines(Weekday::Tuesday, Shift::Morning, "")
        .unwrap();
    assert!(transport.lines_for(Weekday::Tuesday, Shift::Morning).is_empty());
    assert_eq!(transport.lines_for(Weekday::Tuesday, Shift::Evening), before);
    assert_eq!(store.transport_schedules().len(), 21);
}

#[test]
fn toggling_favorites_flips_membership() {
    let store = seeded_store();
    let transport = TransportService::new(&store);

    assert!(transport.toggle_favorite(Weekday::Friday).unwrap());
    assert!(!transport.toggle_favorite(Weekday::Monday).unwrap());
    assert_eq!(
        transport.favorite_days().into_iter().collect::<Vec<_>>(),
        vec![Weekday::Wednesday, Weekday::Friday]
    );
}

#[test]
fn account_register_login_logout_flow() {
    let store = seeded_store();
    let accounts = AccountService::new(&store);

    let registered = accounts.register("ana@campus.edu", "pw1").unwrap();
    assert_eq!(accounts.current_user(), Some(registered.clone()));

    let dup = accounts.register("ana@campus.edu", "other").unwrap_err();
    assert!(matches!(dup, AccountError::EmailTaken(_)));
    // Emails are case-sensitive.
    accounts.register("Ana@campus.edu", "pw2").unwrap();
    assert_eq!(store.users().len(), 2);

    accounts.logout().unwrap();
    assert_eq!(accounts.current_user(), None);

    assert!(matches!(
        accounts.login("ana@campus.edu", "wrong").unwrap_err(),
        AccountError::InvalidCredentials
    ));
    let logged_in = accounts.login("ana@campus.edu", "pw1").unwrap();
    assert_eq!(logged_in, registered);
    assert_eq!(accounts.current_user(), Some(registered));
}
