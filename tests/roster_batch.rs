use bulletin_engine::infrastructure::{BulletinDataSource, InMemoryDataSource};
use bulletin_engine::models::{
    Destination, EvaluationMark, GradeContext, GradeLevel, Indicator, MarkValue, Observation,
    Period, StudentRecord,
};
use bulletin_engine::rules::five_years;
use bulletin_engine::services::{BulletinEngine, EditOutcome};
use bulletin_engine::workflow::{BulletinFlow, MarkEditor};
use bulletin_engine::generate_bulletins_for_roster;

fn student(id: &str, grade: GradeLevel) -> StudentRecord {
    StudentRecord {
        id: id.to_string(),
        full_name: format!("Alumno {}", id),
        grade,
        sub_level: None,
    }
}

fn three_year_indicators() -> Vec<Indicator> {
    vec![
        Indicator::new("ps-1", "Se reconoce como persona única")
            .with_tag("Personal Social")
            .with_levels("3 años"),
        Indicator::new("pm-1", "Corre y salta con equilibrio")
            .with_tag("psicomotriz")
            .with_levels("3 años, 4 años"),
        Indicator::new("co-1", "Escucha cuentos y leyendas")
            .with_tag("COMUNICACION")
            .with_levels("todos"),
        Indicator::new("ma-1", "Agrupa objetos por color")
            .with_tag("Matemática")
            .with_levels("3 años"),
        Indicator::new("x-5", "Solo para cinco años")
            .with_tag("Matemática")
            .with_levels("5 años"),
    ]
}

/// 5 岁班白名单的全部标准描述，上游标签故意写乱
fn five_year_indicators() -> Vec<Indicator> {
    five_years::ALLOW_LIST
        .iter()
        .flat_map(|bucket| bucket.entries.iter())
        .enumerate()
        .map(|(i, entry)| {
            Indicator::new(format!("i{:02}", i), *entry)
                .with_tag("Área antigua")
                .with_levels("5 años")
                .with_order(100 - i as i32)
        })
        .collect()
}

#[tokio::test]
async fn test_roster_partial_failure() {
    let ids: Vec<String> = (1..=5).map(|i| format!("s{}", i)).collect();
    let source = ids
        .iter()
        .fold(InMemoryDataSource::new(three_year_indicators()), |source, id| {
            source.with_student(student(id, GradeLevel::ThreeYears))
        })
        .fail_for("s3");
    let flow = BulletinFlow::new(source, BulletinEngine::builtin());

    let outcome = generate_bulletins_for_roster(&flow, &ids).await;

    let succeeded: Vec<&str> = outcome
        .succeeded
        .iter()
        .map(|b| b.student_id.as_str())
        .collect();
    assert_eq!(succeeded, vec!["s1", "s2", "s4", "s5"]);
    assert_eq!(outcome.failed_student_ids, vec!["s3".to_string()]);
    assert_eq!(outcome.total(), 5);
}

#[tokio::test]
async fn test_roster_unknown_student_is_skipped() {
    let source = InMemoryDataSource::new(three_year_indicators())
        .with_student(student("s1", GradeLevel::ThreeYears));
    let flow = BulletinFlow::new(source, BulletinEngine::builtin());

    let ids = vec!["s1".to_string(), "ghost".to_string()];
    let outcome = generate_bulletins_for_roster(&flow, &ids).await;

    assert_eq!(outcome.succeeded.len(), 1);
    assert_eq!(outcome.failed_student_ids, vec!["ghost".to_string()]);
}

#[tokio::test]
async fn test_bulletin_filters_levels_and_overlays_marks() {
    let source = InMemoryDataSource::new(three_year_indicators())
        .with_student(student("s1", GradeLevel::ThreeYears))
        .with_marks([
            EvaluationMark::new("s1", "ps-1", Period::First, MarkValue::Acquired),
            EvaluationMark::new("s1", "co-1", Period::First, MarkValue::Started),
            EvaluationMark::new("s2", "ps-1", Period::First, MarkValue::Started),
        ])
        .with_observation(Observation {
            student_id: "s1".into(),
            period: Period::Second,
            strengths: "Comparte con sus compañeros".into(),
            areas_to_support: String::new(),
        });
    let flow = BulletinFlow::new(source, BulletinEngine::builtin());
    let ctx = GradeContext::new(GradeLevel::ThreeYears);

    let bulletin = flow.generate_bulletin("s1", &ctx).await.unwrap();

    assert_eq!(bulletin.layout.rows().count(), 4);
    assert!(bulletin.grid.row("x-5").is_none());

    let ps = bulletin.grid.row("ps-1").unwrap();
    assert_eq!(ps.cell(Period::First).explicit, MarkValue::Acquired);
    assert!(ps.cell(Period::Second).ghost);
    assert!(ps.cell(Period::Third).ghost);

    let co = bulletin.grid.row("co-1").unwrap();
    assert_eq!(co.cell(Period::First).displayed(), MarkValue::Started);
    assert!(!co.cell(Period::Second).ghost);

    assert_eq!(bulletin.observations.len(), 3);
    assert_eq!(bulletin.observations[1].strengths, "Comparte con sus compañeros");
    assert_eq!(bulletin.observations[0].strengths, "");
}

#[tokio::test]
async fn test_five_year_bulletin_uses_fixed_slices() {
    let source = InMemoryDataSource::new(five_year_indicators())
        .with_student(student("s1", GradeLevel::FiveYears));
    let flow = BulletinFlow::new(source, BulletinEngine::builtin());

    let bulletin = flow.generate_for_student("s1").await.unwrap();
    let layout = &bulletin.layout;

    // Personal Social 10 + Psicomotriz 前 6
    assert_eq!(layout.row_count(Destination::Left), 16);
    // Psicomotriz 余下 2 + Comunicación 10 + Matemática 前 4
    assert_eq!(layout.row_count(Destination::Right), 16);
    // Matemática 后 5 + Ciencia y Tecnología 6
    assert_eq!(layout.row_count(Destination::Continuation), 11);

    // 组内顺序按白名单，而不是 display_order
    let first: Vec<&str> = layout
        .rows_in(Destination::Left)
        .take(2)
        .map(|row| row.indicator.id.as_str())
        .collect();
    assert_eq!(first, vec!["i00", "i01"]);

    let json = serde_json::to_value(&bulletin).unwrap();
    assert_eq!(json["student_id"], "s1");
    assert_eq!(json["grade"]["grade"], "5 años");
    assert_eq!(json["layout"]["left_column"][0]["kind"], "category_header");
}

#[tokio::test]
async fn test_mark_editor_only_writes_current_period() {
    let source = InMemoryDataSource::new(three_year_indicators())
        .with_student(student("s1", GradeLevel::ThreeYears))
        .with_marks([EvaluationMark::new(
            "s1",
            "ps-1",
            Period::First,
            MarkValue::InProgress,
        )]);

    let mut editor = MarkEditor::open(&source, "s1", Period::Second).await.unwrap();

    let rejected = editor
        .write("ps-1", Period::First, MarkValue::Acquired)
        .await
        .unwrap();
    assert!(matches!(rejected, EditOutcome::Rejected { .. }));
    assert_eq!(source.fetch_evaluation_marks("s1").await.unwrap().len(), 1);

    let applied = editor
        .write("ps-1", Period::Second, MarkValue::Acquired)
        .await
        .unwrap();
    match applied {
        EditOutcome::Applied { ghost_periods, .. } => {
            assert_eq!(ghost_periods, vec![Period::Third])
        }
        other => panic!("unexpected outcome: {:?}", other),
    }

    let stored = source.stored_marks().unwrap();
    assert_eq!(stored.len(), 2);
    assert!(stored
        .iter()
        .all(|m| !(m.period == Period::Third && m.value.is_set())));
    assert_eq!(
        editor.sheet().displayed("ps-1", Period::Third),
        MarkValue::Acquired
    );
}

#[tokio::test]
async fn test_mark_editor_keeps_sheet_when_save_fails() {
    let source = InMemoryDataSource::new(three_year_indicators())
        .with_student(student("s1", GradeLevel::ThreeYears))
        .fail_saves();

    let mut editor = MarkEditor::open(&source, "s1", Period::First).await.unwrap();

    let result = editor
        .write("ps-1", Period::First, MarkValue::Acquired)
        .await;
    assert!(result.is_err(), "存储失败应向上传递");

    assert_eq!(editor.sheet().value("ps-1", Period::First), MarkValue::Unset);
    assert_eq!(
        editor.sheet().displayed("ps-1", Period::Third),
        MarkValue::Unset,
        "失败的写入不应产生幽灵标记"
    );
    assert!(source.stored_marks().unwrap().is_empty());
}

#[tokio::test]
async fn test_generate_for_student_reads_profile_once() {
    let source = InMemoryDataSource::new(three_year_indicators())
        .with_student(student("s1", GradeLevel::ThreeYears));
    let flow = BulletinFlow::new(source, BulletinEngine::builtin());

    let bulletin = flow.generate_for_student("s1").await.unwrap();
    assert_eq!(bulletin.student_id, "s1");
    assert_eq!(flow.source().student_fetches(), 1);
}
