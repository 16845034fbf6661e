mod common;

use common::{write_file, ScriptedPrompter};
use kiln::answers::{Answer, AnswerSet};
use kiln::cli::{build_declarations, try_parse_from, AnswerKinds, RawCliValues};
use kiln::config::{Question, QuestionType};
use kiln::error::Error;
use kiln::reconciler::{add_derived_variants, filter_cli_values, reconcile};
use kiln::renderer::MiniJinjaRenderer;
use serde_json::Number;
use tempfile::TempDir;

fn parse(questions: &[Question], args: &[&str]) -> (AnswerKinds, RawCliValues) {
    let (declarations, kinds) = build_declarations(questions).unwrap();
    let mut argv = vec!["kiln"];
    argv.extend_from_slice(args);
    (kinds, try_parse_from(&declarations, argv).unwrap())
}

fn run(
    questions: &[Question],
    args: &[&str],
    prompter: &ScriptedPrompter,
) -> kiln::error::Result<AnswerSet> {
    let engine = MiniJinjaRenderer::new().unwrap();
    let (kinds, raw) = parse(questions, args);
    reconcile(questions, &kinds, &raw, prompter, &engine)
}

fn list(items: &[&str]) -> Answer {
    Answer::List(items.iter().map(|s| s.to_string()).collect())
}

#[test]
fn test_scaffold_scenario() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("answers.json");
    write_file(&config, r#"{"projectName": "Demo App"}"#);

    let questions = vec![
        Question::new("projectName", QuestionType::Input, "Project name"),
        Question::new("features", QuestionType::Checkbox, "Features")
            .with_choices(["auth", "logging", "metrics"]),
    ];
    let prompter = ScriptedPrompter::new();
    let answers = run(
        &questions,
        &["--config", config.to_str().unwrap(), "--features=auth,logging"],
        &prompter,
    )
    .unwrap();

    assert!(prompter.asked().is_empty());
    assert_eq!(answers.get("projectName"), Some(&Answer::from("Demo App")));
    assert_eq!(answers.get("features"), Some(&list(&["auth", "logging"])));
    assert_eq!(answers.get("projectName_snake"), Some(&Answer::from("demo_app")));
    assert_eq!(answers.get("projectName_pascal"), Some(&Answer::from("DemoApp")));
    assert_eq!(answers.get("projectName_param"), Some(&Answer::from("demo-app")));
    assert_eq!(answers.get("features_snake"), Some(&list(&["auth", "logging"])));
    assert_eq!(answers.get("features_pascal"), Some(&list(&["Auth", "Logging"])));
    assert_eq!(answers.get("features_param"), Some(&list(&["auth", "logging"])));
    assert!(!answers.contains_name("config"));
}

#[test]
fn test_cli_wins_over_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("answers.json");
    write_file(&config, r#"{"projectName": "from file", "license": "MIT"}"#);

    let questions = vec![
        Question::new("projectName", QuestionType::Input, "Project name"),
        Question::new("license", QuestionType::Input, "License"),
    ];
    let prompter = ScriptedPrompter::new();
    let answers = run(
        &questions,
        &["--config", config.to_str().unwrap(), "--project-name", "from cli"],
        &prompter,
    )
    .unwrap();

    assert!(prompter.asked().is_empty());
    assert_eq!(answers.get("projectName"), Some(&Answer::from("from cli")));
    assert_eq!(answers.get("license"), Some(&Answer::from("MIT")));
}

#[test]
fn test_known_answers_skip_prompt_even_if_when_holds() {
    let questions = vec![
        Question::new("projectName", QuestionType::Input, "Project name").with_when("true"),
        Question::new("description", QuestionType::Input, "Description"),
    ];
    let prompter = ScriptedPrompter::new().respond("description", "A demo");
    let answers = run(&questions, &["--project-name", "demo"], &prompter).unwrap();

    assert_eq!(prompter.asked(), vec!["description"]);
    assert_eq!(answers.get("description"), Some(&Answer::from("A demo")));
}

#[test]
fn test_bare_flag_for_value_question_is_ignored() {
    let questions = vec![Question::new("projectName", QuestionType::Input, "Project name")];
    let prompter = ScriptedPrompter::new().respond("projectName", "asked");
    let answers = run(&questions, &["--project-name"], &prompter).unwrap();

    assert_eq!(prompter.asked(), vec!["projectName"]);
    assert_eq!(answers.get("projectName"), Some(&Answer::from("asked")));
}

#[test]
fn test_confirm_flag_is_an_answer() {
    let questions = vec![
        Question::new("useDocker", QuestionType::Confirm, "Use Docker?"),
        Question::new("port", QuestionType::Number, "Port"),
    ];
    let prompter = ScriptedPrompter::new();
    let answers = run(&questions, &["--use-docker", "--port", "8080"], &prompter).unwrap();

    assert!(prompter.asked().is_empty());
    assert_eq!(answers.get("useDocker"), Some(&Answer::Bool(true)));
    assert_eq!(answers.get("port"), Some(&Answer::Number(Number::from(8080))));
    assert!(!answers.contains_name("useDocker_snake"));
    assert!(!answers.contains_name("port_snake"));
}

#[test]
fn test_filter_drops_unknown_keys() {
    let questions = vec![Question::new("name", QuestionType::Input, "Name")];
    let (kinds, raw) = parse(&questions, &["--name", "demo", "--config", "x.json"]);
    let answers = filter_cli_values(&raw, &kinds);

    assert_eq!(answers.len(), 1);
    assert_eq!(answers.get("name"), Some(&Answer::from("demo")));
}

#[test]
fn test_falsy_answers_have_no_variants() {
    let questions = vec![
        Question::new("name", QuestionType::Input, "Name"),
        Question::new("image", QuestionType::Input, "Image").with_when("false"),
    ];
    let prompter = ScriptedPrompter::new().respond("name", "");
    let answers = run(&questions, &[], &prompter).unwrap();

    assert_eq!(prompter.asked(), vec!["name"]);
    assert_eq!(answers.get("name"), Some(&Answer::from("")));
    assert!(answers.contains_name("image"));
    assert!(answers.get("image").is_none());
    for key in ["name_snake", "name_pascal", "name_param", "image_snake"] {
        assert!(!answers.contains_name(key), "unexpected key {key}");
    }
}

#[test]
fn test_derived_variants_follow_schema() {
    let questions = vec![Question::new("moduleName", QuestionType::Rawlist, "Module")];
    let mut answers = AnswerSet::new();
    answers.insert("moduleName", "UserAccount");
    answers.insert("unrelated", "Not A Question");
    add_derived_variants(&mut answers, &questions);

    assert_eq!(answers.get("moduleName_snake"), Some(&Answer::from("user_account")));
    assert_eq!(answers.get("moduleName_param"), Some(&Answer::from("user-account")));
    assert!(!answers.contains_name("unrelated_snake"));
}

#[test]
fn test_unknown_config_keys_are_ignored() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("answers.json");
    write_file(&config, r#"{"name": "demo", "extra": {"nested": true}}"#);

    let questions = vec![Question::new("name", QuestionType::Input, "Name")];
    let prompter = ScriptedPrompter::new();
    let answers = run(&questions, &["--config", config.to_str().unwrap()], &prompter).unwrap();

    assert!(!answers.contains_name("extra"));
    assert_eq!(answers.get("name"), Some(&Answer::from("demo")));
}

#[test]
fn test_missing_config_file_fails_before_prompting() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("missing.json");

    let questions = vec![Question::new("name", QuestionType::Input, "Name")];
    let prompter = ScriptedPrompter::new().respond("name", "demo");
    let result = run(&questions, &["--config", config.to_str().unwrap()], &prompter);

    assert!(matches!(result, Err(Error::ConfigFileReadError { .. })));
    assert!(prompter.asked().is_empty());
}

#[test]
fn test_invalid_config_json_fails_before_prompting() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("answers.json");
    write_file(&config, r#"{"name": "demo""#);

    let questions = vec![Question::new("name", QuestionType::Input, "Name")];
    let prompter = ScriptedPrompter::new().respond("name", "demo");
    let result = run(&questions, &["--config", config.to_str().unwrap()], &prompter);

    assert!(matches!(result, Err(Error::ConfigFileParseError { .. })));
    assert!(prompter.asked().is_empty());
}

#[test]
fn test_config_values_of_other_shapes_pass_through() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("answers.json");
    write_file(&config, r#"{"useDocker": "yes", "projectName": ["Demo", "App"]}"#);

    let questions = vec![
        Question::new("useDocker", QuestionType::Confirm, "Docker?"),
        Question::new("projectName", QuestionType::Input, "Project name"),
    ];
    let prompter = ScriptedPrompter::new();
    let answers = run(&questions, &["--config", config.to_str().unwrap()], &prompter).unwrap();

    assert!(prompter.asked().is_empty());
    assert_eq!(answers.get("useDocker"), Some(&Answer::from("yes")));
    assert_eq!(answers.get("projectName"), Some(&list(&["Demo", "App"])));
    assert_eq!(answers.get("projectName_snake"), Some(&list(&["demo", "app"])));
}

#[test]
fn test_null_in_config_is_not_asked_again() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("answers.json");
    write_file(&config, r#"{"name": null}"#);

    let questions = vec![Question::new("name", QuestionType::Input, "Name")];
    let prompter = ScriptedPrompter::new().respond("name", "typed");
    let answers = run(&questions, &["--config", config.to_str().unwrap()], &prompter).unwrap();

    assert!(prompter.asked().is_empty());
    assert!(answers.contains_name("name"));
    assert!(answers.get("name").is_none());
    assert!(!answers.contains_name("name_snake"));
}

#[test]
fn test_cli_value_overrides_null_in_config() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("answers.json");
    write_file(&config, r#"{"name": null}"#);

    let questions = vec![Question::new("name", QuestionType::Input, "Name")];
    let prompter = ScriptedPrompter::new();
    let answers = run(
        &questions,
        &["--config", config.to_str().unwrap(), "--name", "from cli"],
        &prompter,
    )
    .unwrap();

    assert!(prompter.asked().is_empty());
    assert_eq!(answers.get("name"), Some(&Answer::from("from cli")));
}
