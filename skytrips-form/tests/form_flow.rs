use async_trait::async_trait;
use chrono::NaiveDate;
use skytrips_autocomplete::FieldPhase;
use skytrips_calendar::{CalendarEvent, CalendarPhase};
use skytrips_core::{
    DateRange, Location, LocationGroup, LocationLookup, LookupError, SearchRequest, TripType,
};
use skytrips_form::{FormError, SearchForm, SearchPage};
use skytrips_store::{Config, MemoryStore, Preferences};
use std::sync::{Arc, Mutex};
use std::time::Duration;

struct MockLookup {
    groups: Vec<LocationGroup>,
}

#[async_trait]
impl LocationLookup for MockLookup {
    async fn search(&self, _query: &str) -> Result<Vec<LocationGroup>, LookupError> {
        Ok(self.groups.clone())
    }

    async fn mark_popular(&self, _code: &str) -> Result<(), LookupError> {
        Ok(())
    }
}

fn sydney() -> Location {
    Location::new("SYD", "Sydney Kingsford Smith", "Sydney", "Australia")
}

fn kathmandu() -> Location {
    Location::new("KTM", "Tribhuvan Intl Airport", "Kathmandu", "Nepal")
}

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 9, d).unwrap()
}

fn today() -> NaiveDate {
    date(1)
}

type Executed = Arc<Mutex<Vec<SearchRequest>>>;

fn recording_executor() -> (Executed, skytrips_form::SearchExecutor) {
    let executed: Executed = Arc::new(Mutex::new(Vec::new()));
    let sink = executed.clone();
    let executor: skytrips_form::SearchExecutor = Box::new(move |request: &SearchRequest| {
        sink.lock().unwrap().push(request.clone());
    });
    (executed, executor)
}

fn page(store: Arc<MemoryStore>) -> (SearchPage<MemoryStore>, Executed) {
    let lookup = Arc::new(MockLookup {
        groups: vec![LocationGroup::new(
            "Kathmandu",
            "Nepal",
            "Bagmati",
            vec![kathmandu()],
        )],
    });
    let (executed, executor) = recording_executor();
    let page = SearchPage::new(store, lookup, today(), &Config::default(), executor);
    (page, executed)
}

async fn settle() {
    tokio::time::sleep(Duration::from_millis(20)).await;
}

#[tokio::test(start_paused = true)]
async fn test_duplicate_airport_is_rejected_and_field_stays_unset() {
    let (mut page, _executed) = page(Arc::new(MemoryStore::new()));

    page.origin_field().select_row(sydney());
    // before the coordinator has seen the origin commit, the destination
    // field has no exclusion yet - the same code can come through the UI
    page.destination_field().select_row(sydney());
    settle().await;

    let errors = page.pump();

    assert_eq!(
        errors,
        vec![FormError::DuplicateAirport("Sydney".to_string())]
    );
    assert_eq!(
        errors[0].to_string(),
        "Sydney cannot be used for both departure and destination"
    );
    assert_eq!(page.form().origin().code, "SYD");
    assert!(!page.form().destination().is_selected());

    settle().await;
    let snapshot = page.destination_field().snapshot();
    assert_eq!(snapshot.phase, FieldPhase::Idle);
    assert!(snapshot.text.is_empty());

    // and from now on the destination field renders SYD rows disabled
    assert!(page
        .destination_field()
        .snapshot()
        .row_disabled(&sydney()));
}

#[tokio::test(start_paused = true)]
async fn test_search_page_end_to_end() {
    let store = Arc::new(MemoryStore::new());
    let (mut page, executed) = page(store.clone());

    page.origin_field().select_row(sydney());
    settle().await;
    page.pump();

    // traveller types the destination and picks from live results
    page.destination_field().type_text("kathmandu");
    for _ in 0..100 {
        if page.destination_field().snapshot().phase == FieldPhase::Results {
            break;
        }
        settle().await;
    }
    page.destination_field().select_row(kathmandu());
    settle().await;
    page.pump();

    page.calendar_event(CalendarEvent::Opened);
    page.calendar_event(CalendarEvent::DayPicked(date(10)));
    page.calendar_event(CalendarEvent::Applied);

    let request = page.submit().expect("form should be submittable");

    assert_eq!(request.origin.code, "SYD");
    assert_eq!(request.destination.code, "KTM");
    assert_eq!(request.legs.len(), 1);
    assert_eq!(request.legs[0].date, date(10));
    assert_eq!(request.currency, "USD");
    assert_eq!(executed.lock().unwrap().len(), 1);

    // accepted search landed in the recency list and the reload prefill
    assert_eq!(page.form().recent_searches().len(), 1);
    let prefs = Preferences::new(store);
    let pair = prefs.airport_pair().expect("airport pair persisted");
    assert_eq!(pair.origin.code, "SYD");
    assert_eq!(pair.destination.code, "KTM");
}

#[tokio::test(start_paused = true)]
async fn test_duplicate_submission_does_not_grow_recents() {
    let (mut page, executed) = page(Arc::new(MemoryStore::new()));

    page.origin_field().select_row(sydney());
    page.destination_field().select_row(kathmandu());
    settle().await;
    page.pump();
    page.calendar_event(CalendarEvent::Opened);
    page.calendar_event(CalendarEvent::DayPicked(date(10)));

    page.submit().expect("first submit");
    page.submit().expect("second submit");

    assert_eq!(executed.lock().unwrap().len(), 2);
    assert_eq!(page.form().recent_searches().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_replay_repopulates_all_children_and_resubmits() {
    let (mut page, executed) = page(Arc::new(MemoryStore::new()));

    page.origin_field().select_row(sydney());
    page.destination_field().select_row(kathmandu());
    settle().await;
    page.pump();
    page.set_trip_type(TripType::RoundTrip);
    page.calendar_event(CalendarEvent::Opened);
    page.calendar_event(CalendarEvent::DayPicked(date(10)));
    page.calendar_event(CalendarEvent::DayPicked(date(14)));
    page.submit().expect("initial submit");

    // wipe the visible form, as if the user had cleared everything
    page.origin_field().set_value(Location::empty());
    page.destination_field().set_value(Location::empty());
    settle().await;

    let recent = page.form().recent_searches()[0].clone();
    let request = page.replay(&recent).expect("replay should submit");

    assert_eq!(request.trip_type, TripType::RoundTrip);
    assert_eq!(request.legs.len(), 2);
    assert_eq!(executed.lock().unwrap().len(), 2);

    settle().await;
    assert_eq!(page.origin_field().snapshot().text, "Sydney (SYD)");
    assert_eq!(
        page.destination_field().snapshot().text,
        "Kathmandu (KTM)"
    );
    assert_eq!(
        page.calendar().range(),
        DateRange::new(Some(date(10)), Some(date(14)))
    );
}

#[tokio::test(start_paused = true)]
async fn test_swap_is_all_or_nothing() {
    let (mut page, _executed) = page(Arc::new(MemoryStore::new()));

    page.origin_field().select_row(sydney());
    settle().await;
    page.pump();

    let err = page.swap().unwrap_err();
    assert_eq!(err, FormError::SwapMissingDestination);
    assert_eq!(page.form().origin().code, "SYD");
    assert!(!page.form().destination().is_selected());

    page.destination_field().select_row(kathmandu());
    settle().await;
    page.pump();

    page.swap().expect("both sides selected");
    assert_eq!(page.form().origin().code, "KTM");
    assert_eq!(page.form().destination().code, "SYD");

    settle().await;
    assert_eq!(page.origin_field().snapshot().text, "Kathmandu (KTM)");
    assert_eq!(page.destination_field().snapshot().text, "Sydney (SYD)");
}

#[tokio::test(start_paused = true)]
async fn test_trip_type_flip_opens_calendar_and_flip_back_drops_return() {
    let (mut page, _executed) = page(Arc::new(MemoryStore::new()));

    page.calendar_event(CalendarEvent::Opened);
    page.calendar_event(CalendarEvent::DayPicked(date(10)));
    page.calendar_event(CalendarEvent::Applied);
    assert!(!page.calendar().is_open());

    page.set_trip_type(TripType::RoundTrip);
    assert!(page.calendar().is_open());
    assert_eq!(page.calendar().phase(), CalendarPhase::SelectingEnd);
    assert_eq!(page.form().trip_type(), TripType::RoundTrip);

    page.calendar_event(CalendarEvent::DayPicked(date(14)));
    assert_eq!(page.form().dates().end, Some(date(14)));

    page.set_trip_type(TripType::OneWay);
    assert_eq!(page.form().dates().end, None);
    assert_eq!(page.form().dates().start, Some(date(10)));
}

#[tokio::test(start_paused = true)]
async fn test_prefilled_airport_pair_reaches_the_fields() {
    let store = Arc::new(MemoryStore::new());
    Preferences::new(store.clone()).save_airport_pair(&sydney(), &kathmandu());

    let (page, _executed) = page(store);

    assert_eq!(page.form().origin().code, "SYD");
    assert_eq!(page.origin_field().snapshot().text, "Sydney (SYD)");
    assert_eq!(page.destination_field().snapshot().phase, FieldPhase::Selected);
}

#[test]
fn test_submit_rejects_unordered_return_date() {
    let (_executed, executor) = recording_executor();
    let mut form = SearchForm::new(Arc::new(MemoryStore::new()), 6, executor);

    form.set_origin(sydney()).unwrap();
    form.set_destination(kathmandu()).unwrap();
    form.set_trip_type(TripType::RoundTrip);
    form.set_dates(DateRange::new(Some(date(10)), Some(date(8))));

    let err = form.submit().unwrap_err();
    assert_eq!(err, FormError::ReturnBeforeDeparture);
    assert_eq!(err.to_string(), "return date must be after departure date");

    // a same-day return is accepted
    form.set_dates(DateRange::new(Some(date(10)), Some(date(10))));
    assert!(form.submit().is_ok());
}

#[test]
fn test_validation_errors_short_circuit_at_submit() {
    let (executed, executor) = recording_executor();
    let mut form = SearchForm::new(Arc::new(MemoryStore::new()), 6, executor);

    assert_eq!(form.submit().unwrap_err(), FormError::MissingOrigin);

    form.set_origin(sydney()).unwrap();
    assert_eq!(form.submit().unwrap_err(), FormError::MissingDestination);

    form.set_destination(kathmandu()).unwrap();
    assert_eq!(form.submit().unwrap_err(), FormError::MissingDepartureDate);

    // nothing was executed or recorded along the way
    assert!(executed.lock().unwrap().is_empty());
    assert!(form.recent_searches().is_empty());
}
