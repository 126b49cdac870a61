use bulletin_engine::infrastructure::{BulletinDataSource, MarkStore, TomlDataSource};
use bulletin_engine::models::{
    EvaluationMark, GradeContext, GradeLevel, MarkValue, Period,
};
use bulletin_engine::services::BulletinEngine;
use bulletin_engine::workflow::{BulletinFlow, MarkEditor};
use std::fs;
use std::path::Path;

const INDICATORS: &str = r#"
[[indicators]]
id = "ps-1"
description = "Se reconoce como persona única"
domain_tag = "Personal Social"
applicable_levels = "3 años; 4 años"
display_order = 1

[[indicators]]
id = "co-1"
description = "Escucha cuentos y leyendas"
domain_tag = "Comunicación"
applicable_levels = "todos"
display_order = 2

[[indicators]]
id = "cu-1"
description = "Gatea explorando el espacio"
applicable_levels = "cuna gateadores"
"#;

const STUDENT_ANA: &str = r#"
[student]
id = "ana"
full_name = "Ana Quispe"
grade = "3 años"

[[marks]]
indicator_id = "ps-1"
period = 1
value = "acquired"

[[observations]]
period = 1
strengths = "Participa con entusiasmo"
areas_to_support = "Esperar su turno"
"#;

const STUDENT_LUIS: &str = r#"
[student]
id = "luis"
full_name = "Luis Mamani"
grade = "cuna"
sub_level = "gateadores"
"#;

fn write_data_dir(root: &Path) {
    fs::create_dir_all(root.join("students")).unwrap();
    fs::write(root.join("indicators.toml"), INDICATORS).unwrap();
    fs::write(root.join("students/ana.toml"), STUDENT_ANA).unwrap();
    fs::write(root.join("students/luis.toml"), STUDENT_LUIS).unwrap();
    fs::write(root.join("students/notes.txt"), "ignored").unwrap();
}

#[test]
fn test_roster_and_indicator_filtering() {
    let dir = tempfile::tempdir().unwrap();
    write_data_dir(dir.path());

    tokio_test::block_on(async {
        let source = TomlDataSource::open(dir.path()).await.unwrap();

        assert_eq!(source.roster_ids().await.unwrap(), vec!["ana", "luis"]);

        let three = source
            .fetch_indicators(&GradeContext::new(GradeLevel::ThreeYears))
            .await
            .unwrap();
        let ids: Vec<&str> = three.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["ps-1", "co-1"]);

        let crawlers = source
            .fetch_indicators(&GradeContext::new(GradeLevel::Nursery).with_sub_level("gateadores"))
            .await
            .unwrap();
        assert!(crawlers.iter().any(|i| i.id == "cu-1"));
        assert!(crawlers.iter().all(|i| i.id != "ps-1"));

        let luis = source.fetch_student("luis").await.unwrap();
        assert_eq!(luis.grade, GradeLevel::Nursery);
        assert_eq!(luis.sub_level.as_deref(), Some("gateadores"));
    });
}

#[test]
fn test_missing_student_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    write_data_dir(dir.path());

    tokio_test::block_on(async {
        let source = TomlDataSource::open(dir.path()).await.unwrap();
        assert!(source.fetch_student("nadie").await.is_err());
        assert!(source.fetch_student("../indicators").await.is_err());
    });
}

#[test]
fn test_open_without_indicator_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let result = tokio_test::block_on(TomlDataSource::open(dir.path()));
    assert!(result.is_err());
}

#[tokio::test]
async fn test_save_mark_upserts_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    write_data_dir(dir.path());
    let source = TomlDataSource::open(dir.path()).await.unwrap();

    source
        .save_mark(&EvaluationMark::new("ana", "ps-1", Period::First, MarkValue::InProgress))
        .await
        .unwrap();
    source
        .save_mark(&EvaluationMark::new("ana", "co-1", Period::Second, MarkValue::Started))
        .await
        .unwrap();

    // 重新打开，确认写入了磁盘
    let reopened = TomlDataSource::open(dir.path()).await.unwrap();
    let marks = reopened.fetch_evaluation_marks("ana").await.unwrap();
    assert_eq!(marks.len(), 2);
    let ps = marks.iter().find(|m| m.indicator_id == "ps-1").unwrap();
    assert_eq!(ps.value, MarkValue::InProgress);

    // 观察记录在重写后保留
    let observations = reopened.fetch_observations("ana").await.unwrap();
    assert_eq!(observations.len(), 1);
    assert_eq!(observations[0].areas_to_support, "Esperar su turno");
}

#[tokio::test]
async fn test_generate_and_edit_from_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    write_data_dir(dir.path());
    let source = TomlDataSource::open(dir.path()).await.unwrap();

    {
        let mut editor = MarkEditor::open(&source, "ana", Period::First).await.unwrap();
        editor
            .write("co-1", Period::First, MarkValue::Acquired)
            .await
            .unwrap();
        editor
            .write("co-1", Period::Third, MarkValue::Started)
            .await
            .unwrap();
    }

    let flow = BulletinFlow::new(source, BulletinEngine::builtin());
    let bulletin = flow.generate_for_student("ana").await.unwrap();

    assert_eq!(bulletin.student_name, "Ana Quispe");
    assert_eq!(bulletin.layout.rows().count(), 2);

    let co = bulletin.grid.row("co-1").unwrap();
    assert_eq!(co.cell(Period::First).explicit, MarkValue::Acquired);
    assert!(co.cell(Period::Third).ghost);
    assert_eq!(co.cell(Period::Third).explicit, MarkValue::Unset);

    assert_eq!(bulletin.observations[0].strengths, "Participa con entusiasmo");

    let json = serde_json::to_value(&bulletin).unwrap();
    assert_eq!(json["grid"]["rows"].as_array().unwrap().len(), 2);
}
