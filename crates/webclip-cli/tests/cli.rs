//! End-to-end tests running the `clip` binary against files on disk.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use serde_json::Value;
use tempfile::TempDir;

const PAGE: &str = r#"<!doctype html>
<html>
<head>
  <title>Fallback Title</title>
  <meta property="og:title" content="Field Notes">
  <meta name="description" content="Notes from the field.">
  <meta name="keywords" content="birds,walks">
  <script type="application/ld+json">
    {"@type": "BlogPosting", "headline": "Field Notes", "author": {"@type": "Person", "name": "Ada"},
     "datePublished": "2024-04-05"}
  </script>
</head>
<body><article><p>Saw a <em>heron</em>.</p></article></body>
</html>"#;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let ws = Self {
            dir: TempDir::new().unwrap(),
        };
        ws.write("page.html", PAGE);
        ws
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, contents).unwrap();
        path
    }

    fn config_path(&self) -> PathBuf {
        self.path("config/config.toml")
    }

    fn clip(&self, args: &[&str]) -> Output {
        self.clip_with_stdin(args, None)
    }

    fn clip_with_stdin(&self, args: &[&str], stdin: Option<&str>) -> Output {
        let mut child = Command::new(env!("CARGO_BIN_EXE_clip"))
            .args(args)
            .current_dir(self.dir.path())
            .env("WEBCLIP_CONFIG", self.config_path())
            .env("RUST_LOG", "off")
            .env("NO_COLOR", "1")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .unwrap();

        let mut pipe = child.stdin.take().unwrap();
        if let Some(input) = stdin {
            pipe.write_all(input.as_bytes()).unwrap();
        }
        drop(pipe);

        child.wait_with_output().unwrap()
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

fn page_args<'a>(html: &'a str) -> Vec<&'a str> {
    vec!["--html", html, "--url", "https://www.example.org/notes#:~:text=heron"]
}

// ==================== vars ====================

#[test]
fn test_vars_json() {
    let ws = Workspace::new();
    let mut args = vec!["--json", "vars"];
    args.extend(page_args("page.html"));
    let output = ws.clip(&args);

    assert!(output.status.success(), "{}", stderr(&output));
    let out = json(&output);
    assert_eq!(out["noteName"], "Field Notes");
    let vars = &out["variables"];
    assert_eq!(vars["title"], "Field Notes");
    assert_eq!(vars["author"], "Ada");
    assert_eq!(vars["published"], "2024-04-05");
    assert_eq!(vars["domain"], "example.org");
    assert_eq!(vars["url"], "https://www.example.org/notes");
    assert_eq!(vars["content"], "Saw a _heron_.");
    assert_eq!(vars["meta:name:keywords"], "birds,walks");
    assert_eq!(vars["schema:author.name"], "Ada");
    assert_eq!(vars["highlights"], "[]");
}

#[test]
fn test_vars_table() {
    let ws = Workspace::new();
    let mut args = vec!["vars"];
    args.extend(page_args("page.html"));
    let output = ws.clip(&args);

    assert!(output.status.success(), "{}", stderr(&output));
    let table = stdout(&output);
    assert!(table.starts_with("Name"));
    assert!(table.lines().any(|l| l.starts_with("title ") && l.ends_with("Field Notes")));
}

#[test]
fn test_vars_with_highlights_and_schema_file() {
    let ws = Workspace::new();
    ws.write("ld.json", r#"{"@type": "Article", "author": [{"name": "Grace"}, {"name": "Lin"}]}"#);
    ws.write(
        "highlights.json",
        r#"[{"id": "1712275200000", "content": "<p>a <b>heron</b></p>", "notes": ["tall"]}]"#,
    );
    let mut args = vec!["--json", "vars", "--schema", "ld.json", "--highlights", "highlights.json"];
    args.extend(page_args("page.html"));
    let output = ws.clip(&args);

    assert!(output.status.success(), "{}", stderr(&output));
    let vars = &json(&output)["variables"];
    assert_eq!(vars["author"], "Grace, Lin");
    assert_eq!(vars["content"], "a **heron**");
    let highlights: Value = serde_json::from_str(vars["highlights"].as_str().unwrap()).unwrap();
    assert_eq!(highlights[0]["timestamp"], "2024-04-05T00:00:00.000Z");
    assert_eq!(highlights[0]["notes"][0], "tall");
}

#[test]
fn test_vars_invalid_url_is_extract_error() {
    let ws = Workspace::new();
    let output = ws.clip(&["--json", "vars", "--html", "page.html", "--url", "nowhere"]);

    assert_eq!(output.status.code(), Some(2));
    let err: Value = serde_json::from_str(&stderr(&output)).unwrap();
    assert_eq!(err["error"]["code"], "EXTRACT_ERROR");
    assert!(err["error"]["message"]
        .as_str()
        .unwrap()
        .starts_with("unable to initialize page content"));
}

#[test]
fn test_vars_missing_file_is_io_error() {
    let ws = Workspace::new();
    let output = ws.clip(&["vars", "--html", "missing.html", "--url", "https://example.org/"]);

    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("missing.html"));
}

// ==================== render ====================

#[test]
fn test_render_note() {
    let ws = Workspace::new();
    ws.write(
        "note.md",
        "---\ntitle: \"{{title}}\"\nsource: {{url}}\ntags: {{meta:name:keywords}}\n---\n> {{description}}\n\n{{content}}\n",
    );
    let mut args = vec!["render", "--template", "note.md"];
    args.extend(page_args("page.html"));
    let output = ws.clip(&args);

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "---\ntitle: \"Field Notes\"\nsource: https://www.example.org/notes\ntags: birds,walks\n---\n> Notes from the field.\n\nSaw a _heron_.\n"
    );
}

#[test]
fn test_render_json() {
    let ws = Workspace::new();
    ws.write("note.md", "# {{title}}");
    let mut args = vec!["--json", "render", "-t", "note.md"];
    args.extend(page_args("page.html"));
    let output = ws.clip(&args);

    assert!(output.status.success(), "{}", stderr(&output));
    let out = json(&output);
    assert_eq!(out["noteName"], "Field Notes");
    assert_eq!(out["content"], "# Field Notes");
}

// ==================== eval / filter ====================

#[test]
fn test_eval_against_data_file() {
    let ws = Workspace::new();
    ws.write("data.json", r#"[{"name": "heron", "tags": "tall,grey"}, {"name": "wren", "tags": "small"}]"#);
    let output = ws.clip(&["eval", "-t", "${name}: ${tags|split(\",\"):join}", "-d", "data.json"]);

    // `join` is not a filter; the chain keeps `split` and drops the rest.
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "heron: [\"tall\",\"grey\"]\n\nwren: [\"small\"]\n");
}

#[test]
fn test_eval_from_stdin() {
    let ws = Workspace::new();
    let output = ws.clip_with_stdin(&["eval", "-t", "<${a.b[1]}>", "-d", "-"], Some(r#"{"a": {"b": [1, 2]}}"#));

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "<2>\n");
}

#[test]
fn test_eval_template_from_file() {
    let ws = Workspace::new();
    ws.write("item.tpl", "- ${str|replace(\"a\":\"o\")}");
    let output = ws.clip_with_stdin(&["eval", "-t", "@item.tpl", "-d", "-"], Some("banana"));

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "- bonono\n");
}

#[test]
fn test_filter_single_with_args() {
    let ws = Workspace::new();
    let output = ws.clip(&["filter", "replace", "--args", "(world:there)", "--input", "hello world"]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "hello there\n");
}

#[test]
fn test_filter_chain_from_stdin() {
    let ws = Workspace::new();
    let output = ws.clip_with_stdin(&["--json", "filter", "split(\",\"):wrap(a,b)"], Some("1,2,3,4"));

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(json(&output)["output"], r#"[{"a":"1","b":"2"},{"a":"3","b":"4"}]"#);
}

#[test]
fn test_filter_unknown_name_suggests() {
    let ws = Workspace::new();
    let output = ws.clip(&["filter", "txt", "--input", "<b>x</b>"]);

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("txt"));
    assert!(err.contains("text"));
}

#[test]
fn test_filter_duration() {
    let ws = Workspace::new();
    let output = ws.clip(&["filter", "dur", "--input", "PT1H2M3S"]);
    assert_eq!(stdout(&output), "01:02:03\n");
}

// ==================== config ====================

#[test]
fn test_config_init_set_show() {
    let ws = Workspace::new();

    let output = ws.clip(&["config", "init"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(ws.config_path().exists());

    let output = ws.clip(&["config", "init"]);
    assert_eq!(output.status.code(), Some(5));
    assert!(stderr(&output).contains("--force"));

    let output = ws.clip(&["config", "set", "highlighter.behavior", "no-highlights"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let output = ws.clip(&["--json", "config", "show"]);
    let out = json(&output);
    assert_eq!(out["exists"], true);
    assert_eq!(out["effective"]["highlight_behavior"], "no-highlights");
    assert_eq!(out["effective"]["highlighter_enabled"], true);
}

#[test]
fn test_config_disables_highlight_body() {
    let ws = Workspace::new();
    ws.write("highlights.json", r#"["only this"]"#);
    assert!(ws.clip(&["config", "set", "highlighter.enabled", "false"]).status.success());

    let mut args = vec!["--json", "vars", "--highlights", "highlights.json"];
    args.extend(page_args("page.html"));
    let output = ws.clip(&args);

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(json(&output)["variables"]["content"], "Saw a _heron_.");
}

#[test]
fn test_config_set_unknown_key() {
    let ws = Workspace::new();
    let output = ws.clip(&["--json", "config", "set", "token", "x"]);

    assert_eq!(output.status.code(), Some(5));
    let err: Value = serde_json::from_str(&stderr(&output)).unwrap();
    assert_eq!(err["error"]["code"], "CONFIG_ERROR");
}

#[test]
fn test_config_path_uses_env() {
    let ws = Workspace::new();
    let output = ws.clip(&["config", "path"]);
    assert_eq!(stdout(&output).trim(), ws.config_path().display().to_string());
}

// ==================== completions ====================

#[test]
fn test_completions_bash() {
    let ws = Workspace::new();
    let output = ws.clip(&["completions", "bash"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("clip"));
}
