//! Integration tests for calendar generation across the full pipeline.
//!
//! These tests drive the public API the way the command line tool does:
//! a raw table goes in, iCalendar documents come out, and the documents
//! are checked by parsing them back instead of eyeballing substrings.
//!
//! These tests ensure that:
//! 1. Each requested teacher gets one document holding their lessons
//! 2. History and series paragraphs survive escaping and line folding
//! 3. Shared rows stay out of personal calendars unless opted in
//! 4. Malformed rows degrade into diagnostics, never into failures
//! 5. Archive members match the individual documents byte for byte
//! 6. Identical inputs produce identical documents, run after run

use std::collections::HashMap;
use std::io::{BufReader, Cursor, Read};

use ical::parser::ical::component::{IcalCalendar, IcalEvent};

use rooster_rust::api::{collect_teachers, generate_calendars, CalendarBundle, GenerateOptions};
use rooster_rust::io::{ScheduleLoader, ScheduleSourceType};
use rooster_rust::parsing::columns::detect_columns;
use rooster_rust::parsing::{CellValue, ColumnMap, RawTable};

// ==================== Helper Functions ====================

const HEADERS: [&str; 7] = [
    "Datum",
    "Van",
    "Tot",
    "Student groep",
    "Zaal",
    "Beschrijving NL",
    "Docenten",
];

fn create_test_table(rows: &[[&str; 7]]) -> RawTable {
    RawTable::new(
        HEADERS.iter().map(|h| h.to_string()).collect(),
        rows.iter()
            .map(|row| {
                row.iter()
                    .map(|cell| CellValue::Text(cell.to_string()))
                    .collect()
            })
            .collect(),
    )
}

fn generate(table: &RawTable, teachers: &[&str], options: &GenerateOptions) -> CalendarBundle {
    let names: Vec<String> = teachers.iter().map(|t| t.to_string()).collect();
    generate_calendars(table, &ColumnMap::default(), &names, options)
        .expect("generation should succeed")
}

fn parse_document(document: &str) -> IcalCalendar {
    ical::IcalParser::new(BufReader::new(document.as_bytes()))
        .next()
        .expect("document contains a calendar")
        .expect("document parses cleanly")
}

fn event_property(event: &IcalEvent, name: &str) -> Option<String> {
    event
        .properties
        .iter()
        .find(|p| p.name == name)
        .and_then(|p| p.value.clone())
}

fn calendar_property(calendar: &IcalCalendar, name: &str) -> Option<String> {
    calendar
        .properties
        .iter()
        .find(|p| p.name == name)
        .and_then(|p| p.value.clone())
}

// The parser unfolds long lines but hands values back still escaped.
fn unescape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

fn event_description(event: &IcalEvent) -> String {
    unescape_text(&event_property(event, "DESCRIPTION").expect("event has a description"))
}

// ==================== Single Row Generation ====================

#[test]
fn test_single_row_becomes_one_event() {
    let table = create_test_table(&[[
        "11-03-2024",
        "9:00",
        "10:30",
        "B1",
        "A1.08",
        "Intro",
        "jansen",
    ]]);

    let bundle = generate(&table, &["jansen"], &GenerateOptions::default());

    assert!(bundle.report.is_valid);
    assert_eq!(bundle.calendars.len(), 1);

    let calendar = bundle.get("jansen").expect("calendar for jansen");
    assert_eq!(calendar.num_entries, 1);

    let parsed = parse_document(&calendar.document);
    assert_eq!(parsed.events.len(), 1);

    let event = &parsed.events[0];
    assert_eq!(
        event_property(event, "SUMMARY").as_deref(),
        Some("Intro - jansen")
    );
    assert_eq!(
        event_property(event, "DTSTART").as_deref(),
        Some("20240311T090000")
    );
    assert_eq!(
        event_property(event, "DTEND").as_deref(),
        Some("20240311T103000")
    );
    assert_eq!(
        event_property(event, "UID").as_deref(),
        Some("rooster-0-20240311T090000@rooster-omzetter")
    );
    assert_eq!(event_description(event), "Intro - Groep: B1\nLokaal: A1.08");
}

#[test]
fn test_document_carries_calendar_identity() {
    let table = create_test_table(&[[
        "11-03-2024",
        "9:00",
        "10:30",
        "B1",
        "A1.08",
        "Intro",
        "jansen",
    ]]);

    let bundle = generate(&table, &["jansen"], &GenerateOptions::default());
    let document = &bundle.get("jansen").unwrap().document;

    assert!(document.contains("PRODID:-//Rooster Omzetter//NONSGML v1.0//NL"));

    let parsed = parse_document(document);
    assert_eq!(calendar_property(&parsed, "VERSION").as_deref(), Some("2.0"));
}

#[test]
fn test_multiple_teachers_share_one_lesson() {
    let table = create_test_table(&[[
        "11-03-2024",
        "9:00",
        "10:30",
        "B1",
        "A1.08",
        "Duoles",
        "jansen, bakker",
    ]]);

    let bundle = generate(&table, &["jansen", "bakker"], &GenerateOptions::default());

    // Both get the event, and the comma in the title survives escaping.
    for teacher in ["jansen", "bakker"] {
        let parsed = parse_document(&bundle.get(teacher).unwrap().document);
        assert_eq!(parsed.events.len(), 1, "one event for {}", teacher);

        let summary = unescape_text(&event_property(&parsed.events[0], "SUMMARY").unwrap());
        assert_eq!(summary, "Duoles - jansen, bakker");
    }
}

// ==================== History And Series Paragraphs ====================

#[test]
fn test_repeated_lesson_links_future_and_previous() {
    let table = create_test_table(&[
        ["11-03-2024", "9:00", "10:30", "B1", "A1.08", "Intro", "jansen"],
        ["18-03-2024", "9:00", "10:30", "B1", "A1.08", "Intro", "jansen"],
    ]);

    let bundle = generate(&table, &["jansen"], &GenerateOptions::default());
    let parsed = parse_document(&bundle.get("jansen").unwrap().document);
    assert_eq!(parsed.events.len(), 2);

    // Events come out in schedule order; the first looks forward, both to
    // the repeat of its own topic and to the series continuation.
    assert_eq!(
        event_description(&parsed.events[0]),
        "Intro - Groep: B1\nLokaal: A1.08\n\
         \n\
         Toekomstige lessen:\n\
         Intro , maandag 18 maart 2024\n\
         \n\
         Andere lessen in deze serie (komend, met docent):\n\
         maandag 18 maart 2024 – Intro – jansen (lokaal: A1.08)"
    );

    // The second looks back, and nothing lies ahead of it.
    assert_eq!(
        event_description(&parsed.events[1]),
        "Intro - Groep: B1\nLokaal: A1.08\n\
         \n\
         Vorige lessen:\n\
         Intro , maandag 11 maart 2024"
    );
}

#[test]
fn test_series_continues_with_another_teacher() {
    let table = create_test_table(&[
        ["11-03-2024", "9:00", "10:30", "B1", "A1.08", "Training 5", "jansen"],
        ["18-03-2024", "9:00", "10:30", "B1", "A2.01", "Training 6", "bakker"],
    ]);

    let bundle = generate(&table, &["jansen", "bakker"], &GenerateOptions::default());

    // Jansen's entry announces the continuation, naming who takes over.
    let jansen = parse_document(&bundle.get("jansen").unwrap().document);
    assert_eq!(jansen.events.len(), 1);
    assert_eq!(
        event_description(&jansen.events[0]),
        "Training 5 - Groep: B1\nLokaal: A1.08\n\
         \n\
         Andere lessen in deze serie (komend, met docent):\n\
         maandag 18 maart 2024 – Training 6 – bakker (lokaal: A2.01)"
    );

    // Bakker's entry closes the series and has nothing to add.
    let bakker = parse_document(&bundle.get("bakker").unwrap().document);
    assert_eq!(
        event_description(&bakker.events[0]),
        "Training 6 - Groep: B1\nLokaal: A2.01"
    );
}

// ==================== Shared Rows ====================

#[test]
fn test_shared_rows_stay_out_of_personal_calendars() {
    let table = create_test_table(&[
        ["11-03-2024", "9:00", "10:30", "B1", "Aula", "Opening", "Allen"],
        ["18-03-2024", "9:00", "10:30", "B1", "A1.08", "Intro", "jansen"],
    ]);

    let bundle = generate(&table, &["jansen"], &GenerateOptions::default());
    let parsed = parse_document(&bundle.get("jansen").unwrap().document);

    assert_eq!(parsed.events.len(), 1);
    assert_eq!(
        event_property(&parsed.events[0], "SUMMARY").as_deref(),
        Some("Intro - jansen")
    );
}

#[test]
fn test_shared_rows_append_when_opted_in() {
    let table = create_test_table(&[
        ["11-03-2024", "9:00", "10:30", "B1", "Aula", "Opening", "Allen"],
        ["18-03-2024", "9:00", "10:30", "B1", "A1.08", "Intro", "jansen"],
    ]);

    let options = GenerateOptions {
        include_shared: true,
        ..GenerateOptions::default()
    };
    let bundle = generate(&table, &["jansen"], &options);
    let parsed = parse_document(&bundle.get("jansen").unwrap().document);

    // Own lessons first, the shared block after them, even though the
    // shared row is the earlier one.
    assert_eq!(parsed.events.len(), 2);
    assert_eq!(
        event_property(&parsed.events[0], "SUMMARY").as_deref(),
        Some("Intro - jansen")
    );
    assert_eq!(
        event_property(&parsed.events[1], "SUMMARY").as_deref(),
        Some("Opening - Allen")
    );
}

#[test]
fn test_shared_calendar_honors_inclusion_toggles() {
    let table = create_test_table(&[
        ["11-03-2024", "9:00", "10:30", "B1", "Aula", "Opening", "allen"],
        ["15-03-2024", "16:00", "17:00", "B1", "Aula", "Borrel", "allen"],
        ["18-03-2024", "9:00", "10:30", "B1", "A1.08", "Intro", "jansen"],
    ]);

    let options = GenerateOptions {
        include_shared: true,
        shared_inclusion: HashMap::from([(1, false)]),
    };
    let bundle = generate(&table, &["allen"], &options);
    let parsed = parse_document(&bundle.get("allen").unwrap().document);

    assert_eq!(parsed.events.len(), 1);
    assert_eq!(
        event_property(&parsed.events[0], "SUMMARY").as_deref(),
        Some("Opening - allen")
    );
    assert_eq!(bundle.report.stats.shared_rows, 2);
    assert_eq!(bundle.report.stats.shared_included, 1);
}

// ==================== Malformed Input ====================

#[test]
fn test_unparseable_date_skips_the_row_with_a_diagnostic() {
    let table = create_test_table(&[
        ["not-a-date", "9:00", "10:30", "B1", "A1.08", "Mysterie", "jansen"],
        ["11-03-2024", "9:00", "10:30", "B1", "A1.08", "Intro", "jansen"],
    ]);

    let bundle = generate(&table, &["jansen"], &GenerateOptions::default());
    let calendar = bundle.get("jansen").unwrap();

    // The dated row made it; the dateless one sorted to the end of the
    // partition and was skipped there.
    assert_eq!(calendar.num_entries, 1);
    let parsed = parse_document(&calendar.document);
    assert_eq!(
        event_property(&parsed.events[0], "SUMMARY").as_deref(),
        Some("Intro - jansen")
    );

    assert_eq!(bundle.report.stats.unknown_dates, 1);
    assert_eq!(bundle.report.stats.rows_skipped, 1);
    assert!(bundle
        .report
        .warnings
        .iter()
        .any(|w| w == "Regel overgeslagen (pos=1) door fout: onbekende datum"));
    assert!(bundle.report.is_valid, "skips are warnings, not errors");
}

#[test]
fn test_dateless_shared_row_reports_its_own_diagnostic() {
    let table = create_test_table(&[[
        "geen datum",
        "9:00",
        "10:30",
        "B1",
        "Aula",
        "Opening",
        "allen",
    ]]);

    let options = GenerateOptions {
        include_shared: true,
        ..GenerateOptions::default()
    };
    let bundle = generate(&table, &["allen"], &options);

    assert_eq!(bundle.get("allen").unwrap().num_entries, 0);
    assert!(bundle
        .report
        .warnings
        .iter()
        .any(|w| w == "'Allen'-regel overgeslagen (pos=0) door fout: onbekende datum"));
}

#[test]
fn test_malformed_time_falls_back_to_midnight() {
    let table = create_test_table(&[[
        "11-03-2024",
        "9u30",
        "10:30",
        "B1",
        "A1.08",
        "Intro",
        "jansen",
    ]]);

    let bundle = generate(&table, &["jansen"], &GenerateOptions::default());
    let calendar = bundle.get("jansen").unwrap();

    assert_eq!(calendar.num_entries, 1);
    let parsed = parse_document(&calendar.document);
    assert_eq!(
        event_property(&parsed.events[0], "DTSTART").as_deref(),
        Some("20240311T000000")
    );
    assert_eq!(bundle.report.stats.malformed_times, 1);
    assert!(bundle
        .report
        .warnings
        .iter()
        .any(|w| w.contains("Onverwacht tijdformaat")));
}

#[test]
fn test_missing_column_is_a_clean_error() {
    let table = RawTable::new(vec!["Datum".to_string(), "Van".to_string()], vec![]);

    let names = vec!["jansen".to_string()];
    let result = generate_calendars(
        &table,
        &ColumnMap::default(),
        &names,
        &GenerateOptions::default(),
    );

    let message = format!(
        "{:#}",
        result.expect_err("two columns cannot satisfy the mapping")
    );
    assert!(
        message.contains("niet gevonden in de tabel"),
        "unexpected error: {}",
        message
    );
}

// ==================== Packaging ====================

#[test]
fn test_archive_members_mirror_the_documents() {
    let table = create_test_table(&[
        ["11-03-2024", "9:00", "10:30", "B1", "A1.08", "Intro", "jansen"],
        ["12-03-2024", "9:00", "10:30", "B2", "A1.09", "Verdieping", "bakker"],
    ]);

    let bundle = generate(&table, &["jansen", "bakker"], &GenerateOptions::default());
    let bytes = bundle.zip_archive().expect("archive builds");

    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("archive reopens");
    assert_eq!(archive.len(), 2);

    for calendar in &bundle.calendars {
        let mut member = archive
            .by_name(&format!("{}.ics", calendar.teacher))
            .expect("one member per teacher");
        let mut content = String::new();
        member.read_to_string(&mut content).expect("member reads");
        assert_eq!(content, calendar.document);
    }
}

// ==================== Determinism ====================

#[test]
fn test_documents_are_byte_identical_across_runs() {
    let rows = [
        ["11-03-2024", "9:00", "10:30", "B1", "A1.08", "Training 5", "jansen"],
        ["18-03-2024", "9:00", "10:30", "B1", "A1.08", "Training 6", "bakker"],
        ["25-03-2024", "9:00", "10:30", "B1", "Aula", "Afsluiting", "allen"],
    ];
    let options = GenerateOptions {
        include_shared: true,
        ..GenerateOptions::default()
    };
    let teachers = ["jansen", "bakker", "allen"];

    let first = generate(&create_test_table(&rows), &teachers, &options);
    let second = generate(&create_test_table(&rows), &teachers, &options);

    for (a, b) in first.calendars.iter().zip(&second.calendars) {
        assert_eq!(a.teacher, b.teacher);
        assert_eq!(a.document, b.document, "document for {} drifted", a.teacher);
    }
}

// ==================== File Loading ====================

#[test]
fn test_csv_file_generates_calendars_end_to_end() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("rooster.csv");
    std::fs::write(
        &path,
        "Datum,Van,Tot,Student groep,Zaal,Beschrijving NL,Docenten\n\
         11-03-2024,9:00,10:30,B1,A1.08,Intro,jansen\n",
    )
    .expect("fixture written");

    let loaded = ScheduleLoader::load_from_file(&path).expect("file loads");
    assert_eq!(loaded.source_type, ScheduleSourceType::Csv);
    assert_eq!(loaded.num_rows, 1);

    let roster = collect_teachers(&loaded.table, &ColumnMap::default()).expect("roster");
    assert_eq!(roster, vec!["jansen"]);

    let names = vec!["jansen".to_string()];
    let bundle = generate_calendars(
        &loaded.table,
        &ColumnMap::default(),
        &names,
        &GenerateOptions::default(),
    )
    .expect("generation succeeds");

    let parsed = parse_document(&bundle.get("jansen").unwrap().document);
    assert_eq!(parsed.events.len(), 1);
    assert_eq!(
        event_property(&parsed.events[0], "SUMMARY").as_deref(),
        Some("Intro - jansen")
    );
}

#[test]
fn test_renamed_headers_are_detected_and_usable() {
    let headers = [
        "Wanneer",
        "Aanvang",
        "Einde",
        "Leergroep",
        "Lokaal/zaal",
        "Beschrijving",
        "Docent(en)",
    ];
    let rows = [
        ["11-03-2024", "09:00", "10:30", "B1", "A1.08", "Anatomie 1", "jansen"],
        ["18-03-2024", "09:00", "10:30", "B1", "A1.08", "Anatomie 2", "jansen"],
        ["25-03-2024", "09:00", "10:30", "B1", "A1.08", "Anatomie 3", "jansen"],
    ];
    let table = RawTable::new(
        headers.iter().map(|h| h.to_string()).collect(),
        rows.iter()
            .map(|row| {
                row.iter()
                    .map(|cell| CellValue::Text(cell.to_string()))
                    .collect()
            })
            .collect(),
    );

    let map = detect_columns(&table)
        .into_column_map()
        .expect("the full layout is detectable");
    let names = vec!["jansen".to_string()];
    let bundle = generate_calendars(&table, &map, &names, &GenerateOptions::default())
        .expect("generation succeeds");

    let calendar = bundle.get("jansen").unwrap();
    assert_eq!(calendar.num_entries, 3);

    // The middle lesson sees its numbered neighbours as one series.
    let parsed = parse_document(&calendar.document);
    let middle = event_description(&parsed.events[1]);
    assert!(middle.contains("Andere lessen in deze serie"));
    assert!(middle.contains("maandag 25 maart 2024 – Anatomie 3 – jansen (lokaal: A1.08)"));
}
