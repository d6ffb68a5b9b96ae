//! FILENAME: tests/test_catalog_reports.rs
//! Provider and product reports.

mod common;

use common::*;
use engine::Selection;
use projection_engine::DetailLevel;
use report::{generate_report, OutputFormat, ReportConfig, ReportError, TimeFrame};
use summary_engine::{related_products, ChartType};

#[test]
fn test_provider_report_top_ratings_and_activity() {
    let providers = sample_providers();
    let config = ReportConfig {
        item_count: 3,
        chart_type: ChartType::Pie,
        report_title: "Proveedores".into(),
        ..ReportConfig::default()
    };

    let output = generate_report(&providers, &config, OutputFormat::Csv, now()).unwrap();
    let summary = &output.summary;

    let top: Vec<f64> = summary.top_n.iter().map(|r| r.score).collect();
    assert_eq!(top, vec![4.9, 4.8, 4.5]);

    let average = summary.average_rating.value().unwrap();
    assert!((average - 4.28).abs() < 1e-9);
    assert_eq!(summary.growth_delta.as_ref().unwrap().display, "-10.0%");

    let pie: Vec<(&str, f64)> = output
        .chart
        .points
        .iter()
        .map(|p| (p.label.as_str(), p.value))
        .collect();
    assert_eq!(pie, vec![("Ferretería", 40.0), ("Eléctrico", 40.0), ("Pintura", 20.0)]);
}

#[test]
fn test_provider_names_sort_with_accents() {
    let providers = sample_providers();
    let output = generate_report(&providers, &ReportConfig::default(), OutputFormat::Csv, now()).unwrap();

    let names: Vec<String> = csv_lines(&output.artifact)
        .iter()
        .skip(1)
        .map(|line| line.split(',').next().unwrap_or_default().to_string())
        .collect();
    assert_eq!(names, vec!["Ácme", "Alfa", "beta", "Omega", "Zeta"]);
}

#[test]
fn test_provider_status_and_year_frame() {
    let providers = sample_providers();

    let inactive = ReportConfig { status: Selection::only("inactivo"), ..ReportConfig::default() };
    let output = generate_report(&providers, &inactive, OutputFormat::Csv, now()).unwrap();
    let lines = csv_lines(&output.artifact);
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("Zeta,"));
    assert!(lines[1].ends_with(",Inactivo"));

    let this_year = ReportConfig { time_frame: TimeFrame::Year, ..ReportConfig::default() };
    let output = generate_report(&providers, &this_year, OutputFormat::Csv, now()).unwrap();
    assert_eq!(output.summary.count, 1);
}

#[test]
fn test_product_report_ignores_time_frame() {
    let products = sample_products();
    let config = ReportConfig {
        time_frame: TimeFrame::Month,
        export_type: DetailLevel::Combined,
        ..ReportConfig::default()
    };
    let output = generate_report(&products, &config, OutputFormat::Csv, now()).unwrap();
    assert_eq!(output.summary.count, 3);
    assert!(output.summary.growth_delta.is_none());
    assert!(!output.summary.average_rating.has_data);
    assert_eq!(output.labels.len(), 10);
}

#[test]
fn test_product_report_rejects_status() {
    let products = sample_products();
    let config = ReportConfig { status: Selection::only("activo"), ..ReportConfig::default() };
    assert!(matches!(
        generate_report(&products, &config, OutputFormat::Csv, now()),
        Err(ReportError::InvalidConfig(_))
    ));
}

#[test]
fn test_related_products_for_catalog() {
    let products = sample_products();
    let related = related_products(&products[0], &products, 2);
    let ids: Vec<&str> = related.iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec!["101", "102"]);
    assert!(related.iter().all(|r| r.record.id != "100"));
}
