use analytics::ValueChainEngine;
use analyzer::derive_recommendations;
use charts::{ChartFiles, ChartMetric};
use chrono::NaiveDate;
use configuration::ReportSettings;
use core_types::{Actor, ValueChain};
use plotters::prelude::*;
use report::{ReportContent, ReportError, ReportExporter, build_document};
use rust_decimal_macros::dec;
use plotters::style::{FontDesc, FontFamily, FontStyle};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

// Tests that compare the temp dir before and after an export must not overlap.
static SCRATCH_LOCK: Mutex<()> = Mutex::new(());

fn scratch_lock() -> MutexGuard<'static, ()> {
    SCRATCH_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Real charts need a system sans-serif font for their labels.
fn fonts_available() -> bool {
    FontDesc::new(FontFamily::SansSerif, 12.0, FontStyle::Normal)
        .box_size("Actor")
        .is_ok()
}

fn sample_chain() -> ValueChain {
    ValueChain::new(
        Some("Maize".to_string()),
        vec![
            Actor::new("Farmer", dec!(0), dec!(10)),
            Actor::new("Processor", dec!(10), dec!(25)),
            Actor::new("Retailer", dec!(25), dec!(40)),
        ],
    )
}

/// A chart stand-in drawn without any text, so no system fonts are needed.
fn blank_png(path: &Path) {
    let root = BitMapBackend::new(path, (300, 160)).into_drawing_area();
    root.fill(&WHITE).unwrap();
    root.draw(&Rectangle::new([(20, 40), (80, 150)], BLUE.filled())).unwrap();
    root.present().unwrap();
}

fn stand_in_charts(dir: &Path) -> ChartFiles {
    let files = ChartFiles {
        gross_margin: dir.join(ChartMetric::GrossMargin.file_name()),
        value_share: dir.join(ChartMetric::ValueShare.file_name()),
    };
    blank_png(&files.gross_margin);
    blank_png(&files.value_share);
    files
}

fn chart_scratch_dirs() -> HashSet<PathBuf> {
    std::fs::read_dir(std::env::temp_dir())
        .unwrap()
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("valuechain-charts-"))
        })
        .collect()
}

#[test]
fn builds_pdf_with_table_recommendations_and_charts() {
    let dir = tempfile::tempdir().unwrap();
    let files = stand_in_charts(dir.path());

    let analysis = ValueChainEngine::new().calculate(&sample_chain());
    let recommendations = derive_recommendations(&analysis.metrics);
    let content = ReportContent {
        title: "Agricultural Value Chain Analysis Report",
        generated_at: NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap(),
        analysis: &analysis,
        recommendations: &recommendations,
        logo: None,
    };

    let bytes = build_document(&content, &files).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn builds_pdf_with_logo() {
    let dir = tempfile::tempdir().unwrap();
    let files = stand_in_charts(dir.path());
    let logo_path = dir.path().join("logo.png");
    blank_png(&logo_path);

    let analysis = ValueChainEngine::new().calculate(&sample_chain());
    let content = ReportContent {
        title: "With Logo",
        generated_at: chrono::Local::now().naive_local(),
        analysis: &analysis,
        recommendations: &[],
        logo: Some(image::open(&logo_path).unwrap()),
    };

    let bytes = build_document(&content, &files).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn exports_full_report_and_cleans_up_charts() {
    if !fonts_available() {
        eprintln!("skipping: no sans-serif font installed for chart labels");
        return;
    }
    let _lock = scratch_lock();
    let before = chart_scratch_dirs();
    let out_dir = tempfile::tempdir().unwrap();
    let output = out_dir.path().join(report::REPORT_FILE_NAME);

    // Each actor earns 2 on a rising price, so margins fall below 20% from the third on.
    let actors = (1..=10i64)
        .map(|i| Actor::new(format!("Actor {i}"), (i * 4 - 2).into(), (i * 4).into()))
        .collect();
    let analysis = ValueChainEngine::new().calculate(&ValueChain::new(None, actors));
    let recommendations = derive_recommendations(&analysis.metrics);
    assert!(!recommendations.is_empty());

    let settings = ReportSettings {
        logo_path: out_dir.path().join("missing-logo.png"),
        ..ReportSettings::default()
    };
    let written = ReportExporter::new(settings)
        .export(&analysis, &recommendations, &output)
        .unwrap();

    assert_eq!(written, output);
    let bytes = std::fs::read(&output).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    assert!(chart_scratch_dirs().is_subset(&before));
}

#[test]
fn failed_export_leaves_no_scratch_dir_or_output() {
    let _lock = scratch_lock();
    let before = chart_scratch_dirs();
    let out_dir = tempfile::tempdir().unwrap();
    let output = out_dir.path().join(report::REPORT_FILE_NAME);

    let settings = ReportSettings {
        logo_path: out_dir.path().join("missing-logo.png"),
        ..ReportSettings::default()
    };
    let empty = ValueChainEngine::new().calculate(&ValueChain::default());

    let err = ReportExporter::new(settings).export(&empty, &[], &output).unwrap_err();

    assert!(matches!(err, ReportError::Chart(_)));
    assert!(!output.exists());
    assert!(chart_scratch_dirs().is_subset(&before));
}
