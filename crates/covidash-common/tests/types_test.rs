//! Integration tests for the shared dataset types.

use chrono::NaiveDate;
use covidash_common::{format_count, DashError, LogFormat, LoggingConfig, Metric, Observation};

#[test]
fn test_upstream_records_parse() {
    let json = r#"[
        {"date": "2020-03-22", "Country/Region": "China", "Province/State": "Hubei",
         "cases": 67800, "deaths": 3144, "recovered": 59433},
        {"date": "2020-03-22", "Country/Region": "Italy", "cases": 59138, "deaths": 5476}
    ]"#;
    let rows: Vec<Observation> = serde_json::from_str(json).unwrap();

    assert_eq!(rows[0].province.as_deref(), Some("Hubei"));
    assert_eq!(rows[0].value(Metric::Recovered), 59_433);
    assert_eq!(rows[1].province, None);
    assert_eq!(rows[1].recovered, 0);
    assert_eq!(rows[1].date, NaiveDate::from_ymd_opt(2020, 3, 22).unwrap());
}

#[test]
fn test_serialized_names_match_upstream() {
    let row = Observation::new("Peru", NaiveDate::from_ymd_opt(2020, 3, 6).unwrap(), 1, 0, 0);
    let json = serde_json::to_value(&row).unwrap();
    assert_eq!(json["Country/Region"], "Peru");
    assert_eq!(json["date"], "2020-03-06");
    assert!(json.get("Province/State").is_none());
}

#[test]
fn test_negative_count_is_rejected() {
    let json = r#"[{"date": "2020-03-22", "Country/Region": "Peru", "cases": -1}]"#;
    let err: DashError = serde_json::from_str::<Vec<Observation>>(json).unwrap_err().into();
    assert!(matches!(err, DashError::Serialization(_)));
}

#[test]
fn test_metric_columns_line_up() {
    for metric in Metric::ALL {
        let parsed: Metric = metric.as_str().parse().unwrap();
        assert_eq!(parsed, metric);
        assert!(metric.daily_column().ends_with(metric.as_str()));
    }
    assert_eq!(format_count(67_800), "67,800");
}

#[test]
fn test_logging_config_from_json() {
    let config: LoggingConfig =
        serde_json::from_str(r#"{"level": "debug", "format": "json"}"#).unwrap();
    assert_eq!(config.level, "debug");
    assert_eq!(config.format, LogFormat::Json);
    assert!(config.file_path.is_none());
}
