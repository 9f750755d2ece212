//! Integration tests for the resolution cascades against the in-memory
//! repository. No backend required.

use std::sync::Arc;

use cartaz_common::{FieldValue, MemoryRepository, Record, RecordStatus, RecordType};
use cartaz_resolve::{EventResolver, LineupResolver, VenueResolver};

fn repo() -> Arc<MemoryRepository> {
    Arc::new(MemoryRepository::new())
}

// ---------------------------------------------------------------------------
// Venue cascade
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unlinked_event_resolves_label_venue() {
    let repo = repo();
    repo.insert(
        Record::new(1, RecordType::Event, "Baile da Fundição")
            .with_field("event_location", "Fundição Progresso | Lapa"),
    );
    let event = repo.snapshot(RecordType::Event, 1).unwrap();

    let venue = VenueResolver::new(repo).resolve(&event).await;
    assert_eq!(venue.name, "Fundição Progresso");
    assert_eq!(venue.region, "Lapa");
    assert!(venue.id.is_none());
    assert!(venue.coordinates.is_none());
    assert!(venue.images.is_empty());
}

#[tokio::test]
async fn linked_venue_resolves_fields_and_coordinates() {
    let repo = repo();
    repo.insert(
        Record::new(10, RecordType::Venue, "circo-voador")
            .with_field("venue_name", "Circo Voador")
            .with_field("address", "Rua dos Arcos 1")
            .with_field("city", "Rio de Janeiro")
            .with_field("region", "Lapa")
            .with_field("latitude", -22.912)
            .with_field("longitude", -43.179)
            .with_field("venue_image_1", "front.jpg"),
    );
    repo.insert(Record::new(1, RecordType::Event, "Show").with_field("event_venue", 10i64));
    let event = repo.snapshot(RecordType::Event, 1).unwrap();

    let venue = VenueResolver::new(repo).resolve(&event).await;
    assert_eq!(venue.id, Some(10));
    assert_eq!(venue.name, "Circo Voador");
    assert_eq!(venue.address, "Rua dos Arcos 1");
    assert_eq!(venue.images, vec!["front.jpg"]);
    let coords = venue.coordinates.expect("coordinates resolved");
    assert_eq!(coords.lat, -22.912);
    assert_eq!(coords.lng, -43.179);
}

#[tokio::test]
async fn legacy_list_venue_reference_takes_first_element() {
    let repo = repo();
    repo.insert(Record::new(10, RecordType::Venue, "Circo Voador"));
    repo.insert(Record::new(1, RecordType::Event, "Show").with_field(
        "local",
        FieldValue::List(vec![FieldValue::Id(10), FieldValue::Id(11)]),
    ));
    let event = repo.snapshot(RecordType::Event, 1).unwrap();

    let venue = VenueResolver::new(repo).resolve(&event).await;
    assert_eq!(venue.id, Some(10));
    // No venue_name field — falls back to the record title.
    assert_eq!(venue.name, "Circo Voador");
}

#[tokio::test]
async fn hidden_venue_degrades_to_label() {
    let repo = repo();
    repo.insert(Record::new(10, RecordType::Venue, "Gone").with_status(RecordStatus::Hidden));
    repo.insert(
        Record::new(1, RecordType::Event, "Show")
            .with_field("event_venue", 10i64)
            .with_field("event_location", "Praça XV | Centro"),
    );
    let event = repo.snapshot(RecordType::Event, 1).unwrap();

    let venue = VenueResolver::new(repo).resolve(&event).await;
    assert!(venue.id.is_none());
    assert_eq!(venue.name, "Praça XV");
    assert_eq!(venue.region, "Centro");
}

#[tokio::test]
async fn venue_missing_coordinates_falls_back_to_event_fields() {
    let repo = repo();
    repo.insert(Record::new(10, RecordType::Venue, "Armazém"));
    repo.insert(
        Record::new(1, RecordType::Event, "Show")
            .with_field("event_venue", 10i64)
            .with_field("map_lat", -22.9)
            .with_field("map_lng", -43.2),
    );
    let event = repo.snapshot(RecordType::Event, 1).unwrap();

    let venue = VenueResolver::new(repo).resolve(&event).await;
    let coords = venue.coordinates.expect("event-level fallback");
    assert_eq!((coords.lat, coords.lng), (-22.9, -43.2));
}

#[tokio::test]
async fn coordinate_invariant_holds_for_partial_data() {
    // A venue with only a latitude must resolve as unresolved, never half-set.
    let repo = repo();
    repo.insert(Record::new(10, RecordType::Venue, "Meio").with_field("latitude", -22.9));
    repo.insert(Record::new(1, RecordType::Event, "Show").with_field("event_venue", 10i64));
    let event = repo.snapshot(RecordType::Event, 1).unwrap();

    let venue = VenueResolver::new(repo).resolve(&event).await;
    assert!(venue.coordinates.is_none());
}

// ---------------------------------------------------------------------------
// Lineup
// ---------------------------------------------------------------------------

#[tokio::test]
async fn lineup_resolves_ids_sorts_by_start_and_keeps_literals() {
    let repo = repo();
    repo.insert(
        Record::new(5, RecordType::Performer, "marina-lima").with_field("stage_name", "Marina Lima"),
    );
    repo.insert(Record::new(1, RecordType::Event, "Noite").with_field(
        "timetable",
        r#"[{"dj": 5, "start": "23:00"}, {"dj": "DJ Convidado", "start": "22:00"}]"#,
    ));
    let event = repo.snapshot(RecordType::Event, 1).unwrap();

    let slots = LineupResolver::new(repo).resolve(&event).await;
    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0].name, "DJ Convidado");
    assert_eq!(slots[0].start, "22:00");
    assert_eq!(slots[1].name, "Marina Lima");
    assert_eq!(slots[1].start, "23:00");
}

#[tokio::test]
async fn lineup_drops_unknown_performers_and_dedups() {
    let repo = repo();
    repo.insert(
        Record::new(5, RecordType::Performer, "marina-lima").with_field("stage_name", "Marina Lima"),
    );
    repo.insert(Record::new(1, RecordType::Event, "Noite").with_field(
        "timetable",
        r#"[
            {"dj": 5, "start": "21:00"},
            {"dj": 99, "start": "22:00"},
            {"dj": "Marina Lima", "start": "23:00"},
            {"start": "23:30"}
        ]"#,
    ));
    let event = repo.snapshot(RecordType::Event, 1).unwrap();

    let slots = LineupResolver::new(repo).resolve(&event).await;
    // Unknown id 99 and the performer-less row are dropped; the literal
    // duplicate of Marina Lima is deduplicated to the first occurrence.
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].name, "Marina Lima");
    assert_eq!(slots[0].start, "21:00");
}

#[tokio::test]
async fn legacy_single_name_joins_with_empty_start_and_sorts_last() {
    let repo = repo();
    repo.insert(
        Record::new(1, RecordType::Event, "Noite")
            .with_field("timetable", r#"[{"dj": "Abre Alas", "start": "22:00"}]"#)
            .with_field("dj_name", "Velho Convidado"),
    );
    let event = repo.snapshot(RecordType::Event, 1).unwrap();

    let slots = LineupResolver::new(repo).resolve(&event).await;
    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0].name, "Abre Alas");
    assert_eq!(slots[1].name, "Velho Convidado");
    assert!(slots[1].start.is_empty());
}

#[tokio::test]
async fn timeless_slots_keep_their_input_order_after_the_timed_ones() {
    let repo = repo();
    repo.insert(Record::new(1, RecordType::Event, "Noite").with_field(
        "timetable",
        r#"[
            {"dj": "Primeiro Sem Hora"},
            {"dj": "Com Hora", "start": "23:00"},
            {"dj": "Segundo Sem Hora"},
            {"dj": "Terceiro Sem Hora"}
        ]"#,
    ));
    let event = repo.snapshot(RecordType::Event, 1).unwrap();

    let slots = LineupResolver::new(repo).resolve(&event).await;
    let names: Vec<&str> = slots.iter().map(|s| s.name.as_str()).collect();
    // Timed slots come first; the timeless ones trail in the order they were
    // written, not reshuffled by the sort.
    assert_eq!(
        names,
        vec![
            "Com Hora",
            "Primeiro Sem Hora",
            "Segundo Sem Hora",
            "Terceiro Sem Hora"
        ]
    );
    assert!(slots[1..].iter().all(|s| s.start.is_empty()));
}

// ---------------------------------------------------------------------------
// Full event facade
// ---------------------------------------------------------------------------

#[tokio::test]
async fn resolved_event_assembles_all_parts() {
    let repo = repo();
    repo.insert(
        Record::new(10, RecordType::Venue, "Circo Voador")
            .with_field("city", "Rio de Janeiro")
            .with_field("latitude", -22.912)
            .with_field("longitude", -43.179),
    );
    repo.insert(
        Record::new(1, RecordType::Event, "Virada Cultural")
            .with_field("event_start_date", "2025-11-20")
            .with_field("start_date", "20/11/2024") // legacy key loses to current
            .with_field("event_start_time", "20:00")
            .with_field("event_venue", 10i64)
            .with_field("ticket_url", "https://tickets.example/virada")
            .with_field("featured", "1")
            .with_field("event_image_1", "one.jpg")
            .with_field("event_image_2", "two.jpg")
            .with_field("timetable", r#"[{"dj": "Aurora", "start": "20:00", "end": "21:30"}]"#)
            .with_terms("category", vec![7])
            .with_terms("sound", vec![20, 21]),
    );
    let event = repo.snapshot(RecordType::Event, 1).unwrap();

    let resolved = EventResolver::new(repo).resolve(&event).await;
    assert_eq!(resolved.title, "Virada Cultural");
    assert_eq!(
        resolved.start_date,
        chrono::NaiveDate::from_ymd_opt(2025, 11, 20)
    );
    assert_eq!(resolved.start_time, "20:00");
    assert!(resolved.featured);
    assert_eq!(resolved.images, vec!["one.jpg", "two.jpg"]);
    assert_eq!(resolved.categories, vec![7]);
    assert_eq!(resolved.sounds, vec![20, 21]);
    assert!(resolved.event_types.is_empty());
    assert_eq!(resolved.venue.name, "Circo Voador");
    assert!(resolved.venue.coordinates.is_some());
    assert_eq!(resolved.lineup.len(), 1);
    assert_eq!(resolved.lineup[0].end, "21:30");
}

#[tokio::test]
async fn malformed_start_date_resolves_to_unknown() {
    let repo = repo();
    repo.insert(
        Record::new(1, RecordType::Event, "Sem Data").with_field("event_start_date", "someday"),
    );
    let event = repo.snapshot(RecordType::Event, 1).unwrap();

    let resolved = EventResolver::new(repo).resolve(&event).await;
    assert!(resolved.start_date.is_none());
}
