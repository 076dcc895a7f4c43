//! Multi-file programs, directory discovery and YAML configuration

mod common;

use std::fs;
use std::path::PathBuf;

use autoclient_compiler::{Program, TransformConfig, TransformReport};
use common::*;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn load(dir: &std::path::Path, config: TransformConfig) -> Program {
    let mut program = Program::new(config).expect("valid config");
    program.load_paths(&[dir.to_path_buf()]).expect("load failed");
    program
}

#[test]
fn test_fixture_project() {
    let mut program = load(&fixtures_dir().join("project"), TransformConfig::default());
    assert_eq!(program.file_count(), 3);

    let files = program.transform().unwrap();
    let relative: Vec<PathBuf> = files.iter().map(|f| f.relative.clone()).collect();
    assert_eq!(
        relative,
        vec![
            PathBuf::from("api/client.ts"),
            PathBuf::from("types/endpoints.ts"),
            PathBuf::from("types/models.ts"),
        ]
    );

    let client = &files[0];
    assert!(client.is_clean(), "{:?}", client.diagnostics);
    assert_eq!(client.rewritten_calls, 5);
    assert_eq!(client.elided_imports, 1);
    assert!(!client.text.contains("auto-client-api"));
    assert!(client.text.contains("import { V } from \"./validation\";"));

    let expected = [
        "export const isPage = new V({ items: V.ArrayOf(new V({ createdAt: V.String, updatedAt: V.Optional(V.String) })), total: V.Number, cursor: V.Optional(V.String) });",
        "export const createUser = register(\"/api/users\", \"POST\", \"member\", true, true, new V({ name: V.String, role: V.OneOfStrict(\"Role\", \"admin\", \"editor\", \"viewer\"), tags: V.Optional(V.ArrayOf(V.String)) }))(handleCreate);",
        "export const listUsers = register({ paramKeys: [\"cursor\", \"limit\"], url: \"/api/users\", method: \"GET\", requiresMember: \"none\", needsToken: false });",
        "export const healthURL = \"/health\";",
        "health: caller({ url: \"/health\", method: \"GET\", requiresMember: \"none\", needsToken: false, useValidator: false, paramKeys: [] })",
    ];
    for line in expected {
        assert!(client.text.contains(line), "missing `{line}` in\n{}", client.text);
    }

    for declarations in &files[1..] {
        assert_eq!(declarations.rewritten_calls, 0);
        assert_eq!(
            declarations.text,
            fs::read_to_string(&declarations.path).unwrap()
        );
    }
}

#[test]
fn test_directory_discovery_skips_ignored_dirs() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    for sub in ["src", "node_modules/pkg", ".cache", "dist"] {
        fs::create_dir_all(root.join(sub)).unwrap();
    }
    fs::write(root.join("src/a.ts"), "export type A = string;\n").unwrap();
    fs::write(root.join("src/b.tsx"), "export type B = number;\n").unwrap();
    fs::write(root.join("src/notes.md"), "# not code\n").unwrap();
    fs::write(root.join("node_modules/pkg/index.ts"), "export type C = 1;\n").unwrap();
    fs::write(root.join(".cache/x.ts"), "export type D = 2;\n").unwrap();
    fs::write(root.join("dist/out.ts"), "export type E = 3;\n").unwrap();

    let program = load(root, TransformConfig::default());
    assert_eq!(program.file_count(), 2);
    assert!(program.table().declaration("A").is_some());
    assert!(program.table().declaration("C").is_none());

    let only_ts = load(root, TransformConfig::default().extensions(vec!["ts".into()]));
    assert_eq!(only_ts.file_count(), 1);
}

#[test]
fn test_yaml_config_drives_transform() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("autoclient.yaml");
    fs::write(
        &config_path,
        "version: 1\nmarker_modules: [\"@acme/api\"]\nelide_marker_imports: false\nlabel_unions: false\n",
    )
    .unwrap();

    let config = TransformConfig::from_yaml(&config_path).unwrap();
    assert_eq!(config.max_depth, TransformConfig::default().max_depth);

    let files = rewrite_program(
        &[(
            "a.ts",
            "import { validator } from \"@acme/api\";\ntype Id = string | number;\nvalidator<Id>(V);\n",
        )],
        config,
    );
    assert_eq!(
        files[0].text,
        "import { validator } from \"@acme/api\";\ntype Id = string | number;\nV.Or(V.String, V.Number);\n"
    );
}

#[test]
fn test_invalid_yaml_config_rejected() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("bad.yaml");
    fs::write(&config_path, "version: 1\nmax_depth: 0\n").unwrap();
    assert!(TransformConfig::from_yaml(&config_path).is_err());

    fs::write(&config_path, "marker_modules: []\n").unwrap();
    assert!(TransformConfig::from_yaml(&config_path).is_err());
}

#[test]
fn test_report_collects_diagnostics() {
    let files = rewrite_program(
        &[
            (
                "ok.ts",
                "import { apiURL } from \"auto-client-api\";\nconst u = apiURL<Ep>();\n",
            ),
            (
                "bad.ts",
                "import { apiURL } from \"auto-client-api\";\nconst u = apiURL<NoUrl>();\nconst w = apiURL<Ep>(1);\n",
            ),
            (
                "types.ts",
                &format!(
                    "{}{}",
                    fixture_endpoint("Ep", "/ep", "GET", false),
                    fixture_endpoint_without("NoUrl", "url")
                ),
            ),
        ],
        TransformConfig::default(),
    );

    let report = TransformReport::from_files(&files);
    assert_eq!(report.total_rewritten, 1);
    assert_eq!(report.total_errors, 2);
    assert_eq!(report.diagnostic_count(), 2);
    assert!(report.diagnostics().all(|d| d.file == "bad.ts"));
    assert_eq!(
        report.diagnostics().next().map(|d| d.missing_fields.clone()),
        Some(vec!["url".to_string()])
    );

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json["files"][1]["diagnostics"][0]["severity"], "error");
    assert_eq!(json["total_rewritten"], 1);
}
