use exam_forecast::clients::{ExplanationOracle, LlmClient};
use exam_forecast::{App, Command, Config};
use serde_json::{json, Value};
use std::path::Path;

fn write(path: &Path, value: &Value) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

fn seed_raw_papers(data_dir: &Path) {
    let folder = data_dir.join("raw").join("class10").join("general");
    write(
        &folder.join("science_2023.json"),
        &json!({
            "meta": { "year": 2023 },
            "sections": [
                { "section": "A", "type": "MCQ", "questions": [
                    { "chapter": "Light", "topic": "Refraction", "marks": 1, "questionText": "What is refractive index?" },
                    { "chapter": "Light", "topic": "Mirrors", "marks": 1, "questionText": "Define principal focus." },
                    { "chapter": "Acids", "topic": "pH Scale", "marks": 1, "questionText": "pH of pure water?" }
                ] },
                { "section": "C", "type": "SA", "questions": [
                    { "chapter": "Light", "topic": "Refraction", "marks": 3, "questionText": "State the laws of refraction." }
                ] }
            ]
        }),
    );
    write(
        &folder.join("science_2024.json"),
        &json!({
            "meta": { "year": 2024 },
            "sections": [
                { "section": "A", "type": "MCQ", "questions": [
                    { "chapter": "Light", "topic": "Refraction", "marks": 1, "questionText": "Unit of power of a lens?" },
                    { "chapter": "Acids", "topic": "pH Scale", "marks": 1, "questionText": "pH of pure water?" }
                ] },
                { "section": "D", "type": "LA", "questions": [
                    { "chapter": "Light", "topic": "Refraction", "marks": 5, "questionText": "Derive the lens formula." }
                ] }
            ]
        }),
    );
}

fn config(root: &Path) -> Config {
    Config {
        data_dir: root.join("data"),
        cache_dir: root.join("cache"),
        current_year: 2025,
        max_concurrent_papers: 2,
        ..Config::default()
    }
}

#[tokio::test]
async fn test_build_then_query_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path());
    seed_raw_papers(&config.data_dir);

    let app = App::initialize(config.clone()).await.unwrap();

    let build = app
        .execute(Command::parse(["build", "science", "class10", "general"]).unwrap())
        .await
        .unwrap();
    assert_eq!(build["sourceFiles"], 2);
    assert_eq!(build["questionBank"]["questions"], 7);

    // Refraction 每年只记一次最高分: 20 + 8 + 10 + 15 = 53
    let topics = app
        .execute(Command::parse(["topics", "class10_science", "pass"]).unwrap())
        .await
        .unwrap();
    assert_eq!(topics["mode"], "PASS");
    assert_eq!(topics["threshold"], 75);
    assert_eq!(topics["class"], 10);
    assert_eq!(topics["highProbabilityTopics"][0]["name"], "Refraction");
    assert_eq!(topics["highProbabilityTopics"][0]["probability"], 53.0);
    assert_eq!(topics["highProbabilityTopics"][1]["name"], "pH Scale");
    assert_eq!(topics["totalTopics"], 3);
    assert_eq!(topics["filteredCount"], 2);

    let paper = app
        .execute(Command::parse(["paper", "class10_science"]).unwrap())
        .await
        .unwrap();
    assert_eq!(paper["meta"]["subject"], "Science");
    assert_eq!(paper["meta"]["maximumMarks"], 80);
    let section_a = paper["sections"][0]["questions"].as_array().unwrap();
    // 5 道 1 分题中有 2 道题干相同，只能选出 4 道
    assert_eq!(section_a.len(), 4);
    assert_eq!(section_a[0]["topic"], "Refraction");
    assert!(config.cache_dir.join("papers").join("class10_science__class10.json").exists());

    // 缓存命中后结果不变
    let again = app
        .execute(Command::parse(["paper", "class10_science"]).unwrap())
        .await
        .unwrap();
    assert_eq!(paper, again);

    let questions = app
        .execute(
            Command::parse(["questions", "class10_science", "--chapter", "Light", "--limit", "2"])
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(questions["total"], 2);
    assert_eq!(questions["questions"][0]["chapter"], "Light");
}

#[tokio::test]
async fn test_explain_without_api_key_uses_canned_text() {
    let dir = tempfile::tempdir().unwrap();
    let app = App::initialize(config(dir.path())).await.unwrap();

    let value = app
        .execute(Command::parse(["explain", "Science", "2", "Define", "refraction."]).unwrap())
        .await
        .unwrap();
    assert_eq!(value["subject"], "science");
    assert_eq!(value["questionText"], "Define refraction.");
    assert!(value["familiarExplanation"].as_str().unwrap().contains("2 marks"));
    // 固定模板不写入缓存
    assert!(!dir.path().join("cache").join("explanations.json").exists());
}

#[tokio::test]
async fn test_warm_counts_missing_subjects_as_failures() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path());
    seed_raw_papers(&config.data_dir);

    let app = App::initialize(config).await.unwrap();
    app.execute(Command::parse(["build", "science", "class10", "general"]).unwrap())
        .await
        .unwrap();

    let stats = app.warm().await.unwrap();
    assert_eq!(stats.total, 17);
    assert_eq!(stats.success, 1);
    assert_eq!(stats.failed, 16);
}

#[tokio::test]
async fn test_unknown_mode_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let app = App::initialize(config(dir.path())).await.unwrap();

    let err = app
        .execute(Command::parse(["topics", "class10_science", "HARD"]).unwrap())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("HARD"));
}

#[tokio::test]
#[ignore] // 需要 GEMINI_API_KEY，手动运行：cargo test -- --ignored
async fn test_live_explanation() {
    exam_forecast::utils::logging::init(true);

    let config = Config::from_env().expect("读取配置失败");
    let client = LlmClient::from_config(&config).expect("未配置 GEMINI_API_KEY");

    let explanation = client
        .explain("physics", "State Gauss's law in electrostatics.", 2)
        .await
        .expect("调用模型失败");

    assert!(explanation.is_complete(), "模型返回应包含两段讲解");
}
