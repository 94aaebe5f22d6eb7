//! Tests for time-window and step filters.

use cellcap_analysis::{
    AnalysisError, TimeKey, isolate_step_index, isolate_step_index_in_interval,
    isolate_time_interval, merge_runs,
};
use cellcap_model::TableSchema;
use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;

fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2021, 1, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

fn date_time_column(times: &[NaiveDateTime]) -> Column {
    let stamps: Vec<i64> = times
        .iter()
        .map(|t| t.and_utc().timestamp_millis())
        .collect();
    Column::new("Date_Time".into(), stamps)
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))
        .unwrap()
}

fn test_log() -> DataFrame {
    let times = [at(21, 23), at(22, 0), at(24, 12), at(26, 6), at(28, 23), at(29, 0)];
    DataFrame::new(vec![
        date_time_column(&times),
        Column::new("Step_Index".into(), vec![12i64, 13, 13, 14, 13, 13]),
        Column::new(
            "Test_Time(s)".into(),
            vec![
                0.0,
                3600.0,
                2.0 * 86400.0,
                4.0 * 86400.0,
                6.0 * 86400.0,
                7.0 * 86400.0,
            ],
        ),
    ])
    .unwrap()
}

fn test_times(df: &DataFrame) -> Vec<f64> {
    df.column("Test_Time(s)")
        .unwrap()
        .f64()
        .unwrap()
        .into_no_null_iter()
        .collect()
}

#[test]
fn day_bounds_cover_whole_stop_day() {
    let df = test_log();
    let start: TimeKey = "2021-01-22".parse().unwrap();
    let stop: TimeKey = "2021-01-28".parse().unwrap();
    let schema = TableSchema::default();

    let window = isolate_time_interval(&df, &schema.date_time, &start, &stop).unwrap();

    assert_eq!(window.height(), 4);
    assert_eq!(
        test_times(&window),
        vec![3600.0, 2.0 * 86400.0, 4.0 * 86400.0, 6.0 * 86400.0]
    );
}

#[test]
fn instant_bounds_are_inclusive() {
    let df = test_log();
    let window = isolate_time_interval(
        &df,
        "Date_Time",
        &TimeKey::Instant(at(22, 0)),
        &TimeKey::Instant(at(26, 6)),
    )
    .unwrap();
    assert_eq!(window.height(), 3);
}

#[test]
fn empty_window_keeps_schema() {
    let df = test_log();
    let window = isolate_time_interval(
        &df,
        "Date_Time",
        &TimeKey::Instant(at(25, 0)),
        &TimeKey::Instant(at(25, 23)),
    )
    .unwrap();
    assert_eq!(window.height(), 0);
    assert_eq!(window.width(), df.width());
}

#[test]
fn interval_requires_datetime_index() {
    let df = test_log();
    let key = TimeKey::Instant(at(22, 0));
    assert!(matches!(
        isolate_time_interval(&df, "Test_Time(s)", &key, &key),
        Err(AnalysisError::InvalidIndex { .. })
    ));
    assert!(matches!(
        isolate_time_interval(&df, "Timestamp", &key, &key),
        Err(AnalysisError::ColumnNotFound { column }) if column == "Timestamp"
    ));
}

#[test]
fn step_filter_matches_integer_steps() {
    let df = test_log();
    let step = isolate_step_index(&df, 13, &TableSchema::default().step_index).unwrap();
    assert_eq!(step.height(), 4);
    assert_eq!(test_times(&step)[0], 3600.0);
}

#[test]
fn step_filter_matches_float_steps() {
    let df = DataFrame::new(vec![
        Column::new("Step_Index".into(), vec![1.0, 13.0, 13.0, 13.5]),
        Column::new("Test_Time(s)".into(), vec![0.0, 1.0, 2.0, 3.0]),
    ])
    .unwrap();
    let step = isolate_step_index(&df, 13, "Step_Index").unwrap();
    assert_eq!(test_times(&step), vec![1.0, 2.0]);
}

#[test]
fn step_filter_requires_column() {
    let df = test_log();
    assert!(matches!(
        isolate_step_index(&df, 13, "Step"),
        Err(AnalysisError::ColumnNotFound { .. })
    ));
}

#[test]
fn step_in_interval_applies_both_filters() {
    let df = test_log();
    let start: TimeKey = "2021-01-22".parse().unwrap();
    let stop: TimeKey = "2021-01-28".parse().unwrap();
    let schema = TableSchema::default();

    let selected = isolate_step_index_in_interval(
        &df,
        &schema.date_time,
        &start,
        &stop,
        13,
        &schema.step_index,
    )
    .unwrap();

    assert_eq!(
        test_times(&selected),
        vec![3600.0, 2.0 * 86400.0, 6.0 * 86400.0]
    );
}

#[test]
fn merge_runs_orders_by_time() {
    let first = DataFrame::new(vec![
        date_time_column(&[at(22, 0), at(24, 0)]),
        Column::new("Test_Time(s)".into(), vec![1.0, 3.0]),
    ])
    .unwrap();
    let second = DataFrame::new(vec![
        date_time_column(&[at(21, 0), at(23, 0)]),
        Column::new("Test_Time(s)".into(), vec![0.0, 2.0]),
    ])
    .unwrap();

    let merged = merge_runs(&[first, second], &TableSchema::default().date_time).unwrap();

    assert_eq!(test_times(&merged), vec![0.0, 1.0, 2.0, 3.0]);
}

#[test]
fn merge_runs_needs_input() {
    assert!(matches!(
        merge_runs(&[], "Date_Time"),
        Err(AnalysisError::EmptyInput { .. })
    ));
}
