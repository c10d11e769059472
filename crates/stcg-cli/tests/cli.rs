use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn stcg(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_stcg"))
        .current_dir(dir)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to launch stcg")
}

#[test]
fn test_renders_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("enum.tpl"),
        "enum Color {\n[!for c in colors!]\n    [>c<],\n[!endfor!]\n};\n",
    )
    .unwrap();
    fs::write(dir.path().join("model.json"), r#"{"colors": ["Red", "Green"]}"#).unwrap();

    let out = stcg(dir.path(), &["-d", "model.json", "enum.tpl"]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(
        String::from_utf8_lossy(&out.stdout),
        "enum Color {\n    Red,\n    Green,\n};\n"
    );
}

#[test]
fn test_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("t.tpl"), "name=[>name<]").unwrap();
    fs::write(dir.path().join("model.yaml"), "$schema: ./schema.json\nname: widget\n").unwrap();

    let out = stcg(dir.path(), &["-d", "model.yaml", "-o", "out.txt", "t.tpl"]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(out.stdout.is_empty());
    assert_eq!(
        fs::read_to_string(dir.path().join("out.txt")).unwrap(),
        "name=widget"
    );
}

#[test]
fn test_custom_markers() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("t.tpl"), "t1<output>\"text1\"</output>t2").unwrap();

    let out = stcg(
        dir.path(),
        &[
            "--code-begin",
            "<code>",
            "--code-end",
            "</code>",
            "--output-begin",
            "<output>",
            "--output-end",
            "</output>",
            "t.tpl",
        ],
    );
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout), "t1text1t2");
}

#[test]
fn test_emit_program() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("t.tpl"), "a[>b<]").unwrap();

    let out = stcg(dir.path(), &["--emit-program", "t.tpl"]);
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8_lossy(&out.stdout),
        "{{- __out__(\"a\") -}}\n{{- __out__(b) -}}\n"
    );
}

#[test]
fn test_syntax_error_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("t.tpl"), "oops [!").unwrap();

    let out = stcg(dir.path(), &["t.tpl"]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Marker not closed"), "stderr: {}", stderr);
}

#[test]
fn test_missing_template() {
    let dir = tempfile::tempdir().unwrap();
    let out = stcg(dir.path(), &["nope.tpl"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("failed to read template"));
}
