use decaysim_core::repo::element_repo::{ElementRepository, SqliteElementRepository};
use decaysim_core::report::REPORT_CONTENT_TYPE;
use decaysim_core::{NewElement, PlotRenderer, ReportError, ReportExporter, SimulationRecord};
use std::fs;

mod common;
use common::{Fixture, OTHER_OWNER, OWNER};

fn carbon_record(fixture: &Fixture) -> SimulationRecord {
    let carbon = fixture.element("Carbon-14");
    fixture.store.create(OWNER, &carbon, 100.0, 5730.0).unwrap()
}

#[test]
fn export_produces_pdf_and_keeps_plot_on_disk() {
    let fixture = Fixture::new();
    let record = carbon_record(&fixture);
    let exporter = ReportExporter::new(PlotRenderer::default(), fixture.dir.path().join("plots"));

    let report = exporter
        .export_for_owner(&fixture.store, record.id, OWNER)
        .unwrap();

    assert_eq!(report.filename, format!("simulation_{}.pdf", record.id));
    assert_eq!(report.content_type, REPORT_CONTENT_TYPE);
    assert!(report.bytes.starts_with(b"%PDF"));

    let plot_path = exporter.plot_path_for(&record);
    assert!(plot_path.ends_with(format!("simulation_{}.png", record.id)));
    assert!(fs::metadata(plot_path).unwrap().len() > 0);
}

#[test]
fn export_to_explicit_path_renders_there() {
    let fixture = Fixture::new();
    let record = carbon_record(&fixture);
    let exporter = ReportExporter::new(PlotRenderer::default(), fixture.dir.path());
    let target = fixture.dir.path().join("custom").join("carbon.png");

    let report = exporter.export(&record, &target).unwrap();

    assert!(report.bytes.starts_with(b"%PDF"));
    assert!(target.is_file());
}

#[test]
fn foreign_owner_cannot_export_or_view() {
    let fixture = Fixture::new();
    let record = carbon_record(&fixture);
    let exporter = ReportExporter::new(PlotRenderer::default(), fixture.dir.path().join("plots"));

    let export = exporter
        .export_for_owner(&fixture.store, record.id, OTHER_OWNER)
        .unwrap_err();
    assert!(matches!(export, ReportError::NotFound(id) if id == record.id));

    let detail = exporter
        .detail(&fixture.store, record.id, OTHER_OWNER)
        .unwrap_err();
    assert!(matches!(detail, ReportError::NotFound(id) if id == record.id));

    assert!(!exporter.plot_path_for(&record).exists());
}

#[test]
fn unwritable_plot_dir_is_an_export_failure() {
    let fixture = Fixture::new();
    let record = carbon_record(&fixture);
    let blocker = fixture.dir.path().join("blocker");
    fs::write(&blocker, b"not a directory").unwrap();
    let exporter = ReportExporter::new(PlotRenderer::default(), blocker.join("plots"));

    let err = exporter
        .export_for_owner(&fixture.store, record.id, OWNER)
        .unwrap_err();

    assert!(matches!(err, ReportError::ExportFailure(_)));
}

#[test]
fn detail_formats_values_and_embeds_chart() {
    let fixture = Fixture::new();
    let record = carbon_record(&fixture);
    let exporter = ReportExporter::new(PlotRenderer::default(), fixture.dir.path().join("plots"));

    let detail = exporter.detail(&fixture.store, record.id, OWNER).unwrap();

    assert_eq!(detail.record, record);
    assert_eq!(detail.display.lambda, "1.20968e-04");
    assert!(detail.display.nt.starts_with("50.0000"));
    assert_eq!(detail.display.timestamp, "2023-11-14 22:13:20");
    assert!(detail.plot_markup.contains("decay-plot"));
    assert!(!exporter.plot_path_for(&record).exists());
}

#[test]
fn largest_accepted_elapsed_time_still_has_a_detail_view() {
    let fixture = Fixture::new();
    let carbon = fixture.element("Carbon-14");
    let record = fixture.store.create(OWNER, &carbon, 10.0, 1e308).unwrap();
    let exporter = ReportExporter::new(PlotRenderer::default(), fixture.dir.path().join("plots"));

    let detail = exporter.detail(&fixture.store, record.id, OWNER).unwrap();

    assert_eq!(detail.display.nt, "0.00000");
    assert!(detail.plot_markup.contains("decay-plot"));
}

#[test]
fn report_renders_names_and_units_outside_latin_1() {
    let fixture = Fixture::new();
    let radon = {
        let conn = fixture.store.database().connect().unwrap();
        let repo = SqliteElementRepository::new(&conn);
        let id = repo
            .insert_element(&NewElement::new("Радон-222", 3.8235, "дни", "граммы"))
            .unwrap();
        repo.get_element(id).unwrap().unwrap()
    };
    let record = fixture.store.create(OWNER, &radon, 5.0, 3.8235).unwrap();
    let exporter = ReportExporter::new(PlotRenderer::default(), fixture.dir.path().join("plots"));

    let report = exporter
        .export_for_owner(&fixture.store, record.id, OWNER)
        .unwrap();

    assert!(report.bytes.starts_with(b"%PDF"));
    assert_eq!(report.filename, format!("simulation_{}.pdf", record.id));
}
