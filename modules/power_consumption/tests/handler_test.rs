use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use formkit::{FixedClock, FormSession, FormState, RecordStore};
use power_consumption::config::PowerConsumptionConfig;
use power_consumption::domain::service::Service;
use power_consumption::{
    ConsumptionRepository, InMemoryConsumptionStore, PowerConsumptionFormHandler,
    PowerConsumptionRecord, RoiCalculation,
};

fn noon(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0).unwrap()
}

fn reading(customer: &str, date: Option<DateTime<Utc>>, kw: f64, kwh: f64) -> PowerConsumptionRecord {
    PowerConsumptionRecord {
        customer: customer.into(),
        date,
        kw,
        kwh,
    }
}

struct Harness {
    handler: Arc<PowerConsumptionFormHandler>,
    store: Arc<InMemoryConsumptionStore>,
    service: Arc<Service>,
}

impl Harness {
    /// Clock pinned to 2025-03-15 12:00 UTC.
    fn new() -> Self {
        let store = Arc::new(InMemoryConsumptionStore::new());
        let service = Arc::new(Service::new(
            store.clone(),
            Arc::new(FixedClock(noon(2025, 3, 15))),
            PowerConsumptionConfig::default(),
        ));
        Self {
            handler: Arc::new(PowerConsumptionFormHandler::new(service.clone())),
            store,
            service,
        }
    }

    async fn open(&self, name: &str, record: PowerConsumptionRecord) -> FormSession<PowerConsumptionRecord> {
        FormSession::open(
            self.handler.clone(),
            self.store.clone(),
            FormState::new(name, true, record),
        )
        .await
        .unwrap()
    }

    async fn save_reading(&self, name: &str, record: PowerConsumptionRecord) {
        let mut session = self.open(name, record).await;
        session.save().await.unwrap();
    }
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[tokio::test]
async fn future_dated_reading_blocks_the_save() {
    let h = Harness::new();
    let mut session = h
        .open("PC-0001", reading("ACME", Some(noon(2025, 3, 16)), 2.0, 10.0))
        .await;

    let err = session.save().await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(
        err.to_string(),
        "Power consumption can not be recorded for future dates"
    );
    assert!(RecordStore::list(h.store.as_ref()).await.unwrap().is_empty());
    assert!(h.store.roi_rows().is_empty());
}

#[tokio::test]
async fn reading_dated_exactly_now_is_accepted() {
    let h = Harness::new();
    let mut session = h
        .open("PC-0001", reading("ACME", Some(noon(2025, 3, 15)), 2.0, 10.0))
        .await;
    session.save().await.unwrap();
    assert_eq!(RecordStore::list(h.store.as_ref()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn past_dated_reading_is_accepted() {
    let h = Harness::new();
    h.save_reading("PC-0001", reading("ACME", Some(noon(2025, 3, 14)), 2.0, 10.0))
        .await;
    assert_eq!(RecordStore::list(h.store.as_ref()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn undated_reading_saves_without_aggregation() {
    let h = Harness::new();
    h.save_reading("PC-0001", reading("ACME", None, 2.0, 10.0)).await;
    assert_eq!(RecordStore::list(h.store.as_ref()).await.unwrap().len(), 1);
    assert!(h.store.roi_rows().is_empty());
}

#[tokio::test]
async fn first_save_creates_the_monthly_roi() {
    let h = Harness::new();
    h.save_reading("PC-0001", reading("ACME", Some(noon(2025, 3, 10)), 2.0, 10.0))
        .await;

    let rows = h.store.roi_rows();
    assert_eq!(rows.len(), 1);
    let roi = &rows[0];
    assert_eq!(roi.name, "ACME--March--2025-1");
    assert_eq!((roi.customer.as_str(), roi.month, roi.year), ("ACME", 3, 2025));
    assert_close(roi.average_kw, 2.0);
    assert_close(roi.average_kwh, 10.0);
    // Noon reading lands in the high bucket, the low one stays empty.
    assert_close(roi.low_tariff, 0.0);
    assert_close(roi.high_tariff, 0.3 * 10.0);
}

#[tokio::test]
async fn later_readings_update_the_same_roi() {
    let h = Harness::new();
    h.save_reading("PC-0001", reading("ACME", Some(noon(2025, 3, 10)), 2.0, 10.0))
        .await;
    h.save_reading("PC-0002", reading("ACME", Some(at(2025, 3, 11, 23, 30)), 4.0, 20.0))
        .await;

    let rows = h.store.roi_rows();
    assert_eq!(rows.len(), 1, "second reading must not create a second aggregate");
    let roi = &rows[0];
    assert_eq!(roi.name, "ACME--March--2025-1");
    assert_close(roi.average_kw, 3.0);
    assert_close(roi.average_kwh, 15.0);
    assert_close(roi.low_tariff, 0.1 * 20.0);
    assert_close(roi.high_tariff, 0.3 * 10.0);
}

#[tokio::test]
async fn tariff_buckets_split_at_the_boundary_hours() {
    let h = Harness::new();
    // 23:00 and 05:59 are night hours, 06:00 and 22:59 are not.
    h.save_reading("PC-0001", reading("ACME", Some(at(2025, 3, 1, 23, 0)), 1.0, 8.0))
        .await;
    h.save_reading("PC-0002", reading("ACME", Some(at(2025, 3, 2, 5, 59)), 1.0, 12.0))
        .await;
    h.save_reading("PC-0003", reading("ACME", Some(at(2025, 3, 3, 6, 0)), 1.0, 30.0))
        .await;
    h.save_reading("PC-0004", reading("ACME", Some(at(2025, 3, 4, 22, 59)), 1.0, 50.0))
        .await;

    let rows = h.store.roi_rows();
    assert_eq!(rows.len(), 1);
    assert_close(rows[0].low_tariff, 0.1 * 10.0);
    assert_close(rows[0].high_tariff, 0.3 * 40.0);
}

#[tokio::test]
async fn aggregate_name_sequence_counts_existing_aggregates() {
    let h = Harness::new();
    h.store
        .upsert_roi(RoiCalculation {
            name: "ACME--February--2025-1".into(),
            customer: "ACME".into(),
            month: 2,
            year: 2025,
            average_kw: 1.0,
            average_kwh: 5.0,
            low_tariff: 0.0,
            high_tariff: 1.5,
        })
        .await
        .unwrap();

    h.save_reading("PC-0001", reading("ACME", Some(noon(2025, 3, 10)), 2.0, 10.0))
        .await;

    let mut names: Vec<_> = h.store.roi_rows().into_iter().map(|r| r.name).collect();
    names.sort();
    assert_eq!(names, vec!["ACME--February--2025-1", "ACME--March--2025-2"]);
}

#[tokio::test]
async fn readings_from_other_months_and_customers_stay_out() {
    let h = Harness::new();
    h.save_reading("PC-0001", reading("ACME", Some(noon(2025, 2, 20)), 9.0, 90.0))
        .await;
    h.save_reading("PC-0002", reading("Globex", Some(noon(2025, 3, 5)), 7.0, 70.0))
        .await;
    h.save_reading("PC-0003", reading("ACME", Some(noon(2025, 3, 10)), 2.0, 10.0))
        .await;

    let march_acme = h
        .store
        .find_roi("ACME", 3, 2025)
        .await
        .unwrap()
        .unwrap();
    assert_close(march_acme.average_kw, 2.0);
    assert_close(march_acme.average_kwh, 10.0);
}

#[tokio::test]
async fn report_averages_per_customer_and_joins_names() {
    let h = Harness::new();
    h.store.set_customer_full_name("ACME", "Acme Corporation");
    h.save_reading("PC-0001", reading("ACME", Some(noon(2025, 3, 1)), 2.0, 10.0))
        .await;
    h.save_reading("PC-0002", reading("ACME", Some(noon(2025, 3, 2)), 4.0, 20.0))
        .await;
    h.save_reading("PC-0003", reading("Globex", Some(noon(2025, 3, 3)), 6.0, 60.0))
        .await;

    let rows = h.service.average_consumption_report(None, None).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].customer, "ACME");
    assert_eq!(rows[0].full_name.as_deref(), Some("Acme Corporation"));
    assert_close(rows[0].average_kw, 3.0);
    assert_close(rows[0].average_kwh, 15.0);
    assert_eq!(rows[1].customer, "Globex");
    assert_eq!(rows[1].full_name, None);
}

#[tokio::test]
async fn report_window_filters_readings() {
    let h = Harness::new();
    h.save_reading("PC-0001", reading("ACME", Some(noon(2025, 2, 1)), 9.0, 90.0))
        .await;
    h.save_reading("PC-0002", reading("ACME", Some(noon(2025, 3, 1)), 2.0, 10.0))
        .await;

    let rows = h
        .service
        .average_consumption_report(
            Some(at(2025, 3, 1, 0, 0)),
            Some(at(2025, 4, 1, 0, 0)),
        )
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_close(rows[0].average_kwh, 10.0);
}
