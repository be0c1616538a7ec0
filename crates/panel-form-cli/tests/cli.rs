use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;
use serde_json::Value;

const COMPLETE_ENV: &str = "\
# agent settings
METRIC_PUSH_METHOD=grafana_agent
GRAFANA_AGENT_REMOTE_WRITE_URL=https://prometheus.grafana.net/api/prom/push
GRAFANA_AGENT_REMOTE_WRITE_USER=123456
GRAFANA_AGENT_REMOTE_WRITE_PASSWORD=glc_secret
DONOR=edge-01
IPINFO_API_TOKEN=token
CF_API_TOKEN=cf-token
CF_ZONE_ID=zone
CF_CLEAN_IP_DOMAIN=npmjs.com
";

fn panel_form() -> Command {
    Command::cargo_bin("panel-form").expect("panel-form binary")
}

fn env_file(temp: &assert_fs::TempDir, content: &str) -> std::path::PathBuf {
    let env = temp.child(".env");
    env.write_str(content).expect("write env");
    env.path().to_path_buf()
}

fn json_output(command: &mut Command) -> Value {
    let output = command.output().expect("run panel-form");
    serde_json::from_slice(&output.stdout).expect("json on stdout")
}

fn field<'a>(report: &'a Value, name: &str) -> &'a Value {
    report["fields"]
        .as_array()
        .and_then(|fields| fields.iter().find(|field| field["name"] == name))
        .unwrap_or_else(|| panic!("field {name} reported"))
}

#[test]
fn host_accepts_plain_domain() {
    panel_form()
        .args(["host", "www.example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("www.example.com: valid"));
}

#[test]
fn host_rejects_scheme_and_bare_ip() {
    panel_form()
        .args(["host", "https://www.example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("without http:// or https://"));

    panel_form()
        .args(["host", "104.17.223.1"])
        .assert()
        .failure();

    panel_form()
        .args(["host", "104.17.223.1", "--allow-ip"])
        .assert()
        .success();
}

#[test]
fn schema_prints_built_in_panel() {
    let schema = json_output(panel_form().arg("schema"));
    assert_eq!(schema["id"], "agent-panel");
    assert_eq!(schema["fields"].as_array().map(Vec::len), Some(23));
}

#[test]
fn json_schema_describes_form_and_config() {
    let form = json_output(panel_form().args(["schema", "--json-schema"]));
    assert!(form["properties"]["fields"].is_object());

    let config = json_output(panel_form().args(["schema", "--json-schema", "--of", "config"]));
    assert!(config["properties"]["custom_dns"].is_object());
}

#[test]
fn complete_env_is_valid() {
    let temp = assert_fs::TempDir::new().expect("temp dir");
    let env = env_file(&temp, COMPLETE_ENV);

    let report = json_output(
        panel_form()
            .arg("check")
            .arg("--env")
            .arg(&env)
            .args(["--json", "--strict"]),
    );
    assert_eq!(report["valid"], true);
    assert_eq!(field(&report, "PUSHGATEWAY_URL")["visible"], false);
    assert_eq!(field(&report, "GRAFANA_AGENT_REMOTE_WRITE_URL")["required"], true);
    assert_eq!(
        field(&report, "GRAFANA_AGENT_REMOTE_WRITE_PASSWORD")["value"],
        "********"
    );
    assert_eq!(field(&report, "CF_ENABLE")["value"], "true");
}

#[test]
fn switching_metric_backend_fails_strict_check() {
    let temp = assert_fs::TempDir::new().expect("temp dir");
    let env = env_file(&temp, COMPLETE_ENV);

    panel_form()
        .arg("check")
        .arg("--env")
        .arg(&env)
        .args(["--set", "METRIC_PUSH_METHOD=pushgateway", "--strict"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("PUSHGATEWAY_URL"))
        .stdout(predicate::str::contains("form is invalid: 3 issue(s)"))
        .stderr(predicate::str::contains("form has 3 validity issue(s)"));
}

#[test]
fn unchecking_all_inbounds_reports_group_message() {
    let temp = assert_fs::TempDir::new().expect("temp dir");
    let env = env_file(&temp, COMPLETE_ENV);

    let report = json_output(
        panel_form()
            .arg("check")
            .arg("--env")
            .arg(&env)
            .args(["--uncheck", "XRAY_INBOUNDS", "--uncheck", "CF_ENABLE", "--json"]),
    );
    assert_eq!(report["valid"], false);
    assert_eq!(
        report["issues"][0]["message"],
        "Please select at least one inbound protocol."
    );
    assert_eq!(field(&report, "CF_ONLY")["visible"], false);
    assert_eq!(field(&report, "CF_ENABLE")["value"], "false");
}

#[test]
fn unknown_element_is_an_error() {
    panel_form()
        .args(["check", "--set", "NOT_A_FIELD=1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no element named 'NOT_A_FIELD'"));

    panel_form()
        .args(["check", "--check", "XRAY_INBOUNDS=vless-unknown"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("XRAY_INBOUNDS=vless-unknown"));
}

#[test]
fn config_file_can_drop_host_rules() {
    let temp = assert_fs::TempDir::new().expect("temp dir");
    let env = env_file(
        &temp,
        &format!("{COMPLETE_ENV}NGINX_FAKE_WEBSITE=https://www.bing.com\n"),
    );
    let config = temp.child("panel.toml");
    config.write_str("host_fields = []\n").expect("write config");

    panel_form()
        .arg("check")
        .arg("--env")
        .arg(&env)
        .arg("--strict")
        .assert()
        .failure();

    panel_form()
        .arg("check")
        .arg("--env")
        .arg(&env)
        .arg("--config")
        .arg(config.path())
        .arg("--strict")
        .assert()
        .success()
        .stdout(predicate::str::contains("form is valid"));
}

#[test]
fn custom_schema_file_is_checked() {
    let temp = assert_fs::TempDir::new().expect("temp dir");
    let schema = temp.child("relay.toml");
    schema
        .write_str(
            r#"
id = "relay"
title = "Relay"

[[fields]]
name = "MODE"
type = "select"
default = "direct"
options = ["direct", "proxy"]

[[fields]]
name = "UPSTREAM"
type = "text"
condition = { field = "MODE", value = "proxy" }
"#,
        )
        .expect("write schema");

    panel_form()
        .arg("check")
        .arg("--schema")
        .arg(schema.path())
        .arg("--strict")
        .assert()
        .success();

    let report = json_output(
        panel_form()
            .arg("check")
            .arg("--schema")
            .arg(schema.path())
            .args(["--set", "MODE=proxy", "--json"]),
    );
    assert_eq!(field(&report, "UPSTREAM")["required"], true);
    assert_eq!(report["issues"][0]["name"], "UPSTREAM");
}

#[test]
fn broken_schema_names_the_file() {
    let temp = assert_fs::TempDir::new().expect("temp dir");
    let schema = temp.child("broken.json");
    schema.write_str("{\"id\": 3}").expect("write schema");

    panel_form()
        .arg("schema")
        .arg("--file")
        .arg(schema.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load schema"))
        .stderr(predicate::str::contains("broken.json"));
}

#[test]
fn set_rejects_value_outside_select_options() {
    panel_form()
        .args(["check", "--set", "METRIC_PUSH_METHOD=prometheus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "'prometheus' is not an option of METRIC_PUSH_METHOD",
        ))
        .stderr(predicate::str::contains("grafana_agent, pushgateway"));
}

#[test]
fn unknown_stored_option_renders_first_option() {
    let temp = assert_fs::TempDir::new().expect("temp dir");
    let env = env_file(
        &temp,
        &COMPLETE_ENV.replace("METRIC_PUSH_METHOD=grafana_agent", "METRIC_PUSH_METHOD=prometheus"),
    );

    let report = json_output(panel_form().arg("check").arg("--env").arg(&env).arg("--json"));
    assert_eq!(field(&report, "METRIC_PUSH_METHOD")["value"], "grafana_agent");
    assert_eq!(field(&report, "PUSHGATEWAY_URL")["visible"], false);
    assert_eq!(report["valid"], true);
}
