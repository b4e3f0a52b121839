use pretty_assertions::assert_eq;
use serde_json::json;

use super::*;

#[test]
fn demo_routes_file_parses() {
    let file = RoutesFile::parse(include_str!("../demo-routes.toml")).unwrap();

    assert_eq!(file.logging, LoggingConfig::default());
    assert_eq!(file.routes.len(), 3);

    let durations = &file.routes[0];
    assert_eq!(durations.endpoint.as_str(), "/commute/durations");
    assert_eq!(durations.method, RequestMethod::Post);
    assert_eq!(
        durations.reply.as_ref().unwrap()["payload"]["addressDurations"][0]["address"],
        json!("1 Main St")
    );

    assert_eq!(file.routes[1].method, RequestMethod::Get);
    assert_eq!(file.routes[2].reply, None);
}

#[test]
fn empty_routes_file_uses_defaults() {
    let file = RoutesFile::parse("").unwrap();

    assert_eq!(file.logging.level, "info");
    assert_eq!(file.logging.format, LogFormat::Pretty);
    assert!(file.routes.is_empty());
}

#[test]
fn routes_file_rejects_unknown_sections() {
    assert!(RoutesFile::parse("[server]\nport = 1").is_err());
    assert!(RoutesFile::parse("[channel]\ncapacity = 8").is_err());
}

#[test]
fn route_requires_non_empty_endpoint() {
    assert!(RoutesFile::parse("[[routes]]\nendpoint = \"\"").is_err());
}

#[test]
fn command_line_builds_request_and_overrides_logging() {
    let args = CliArgs::try_parse_from([
        "bridge-cli",
        "--routes",
        "routes.toml",
        "--method",
        "post",
        "--body",
        r#"{"origin":"A"}"#,
        "--log-format",
        "json",
        "--log-level",
        "debug",
        "/commute/durations",
    ])
    .unwrap();

    let request = args.to_request();
    assert_eq!(request.endpoint, "/commute/durations");
    assert_eq!(request.method, RequestMethod::Post);
    assert_eq!(request.body, Some(json!({ "origin": "A" })));
    assert_eq!(request.params, None);

    let mut logging = LoggingConfig::default();
    logging.apply_overrides(&args);
    assert_eq!(logging.level, "debug");
    assert_eq!(logging.format, LogFormat::Json);
}

#[test]
fn method_defaults_to_get_on_the_command_line() {
    let args = CliArgs::try_parse_from(["bridge-cli", "-r", "routes.toml", "/items"]).unwrap();

    assert_eq!(args.method, RequestMethod::Get);
}

#[test]
fn invalid_json_body_is_rejected() {
    let result = CliArgs::try_parse_from([
        "bridge-cli",
        "-r",
        "routes.toml",
        "--body",
        "{not json",
        "/items",
    ]);

    assert!(result.is_err());
}
