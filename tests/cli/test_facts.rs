// `pact facts` listing.
use std::process::Command;

use super::common::{geometry_model, pact_bin, setup_project};

#[test]
fn test_facts_listing() {
    let (_dir, root) = setup_project(&geometry_model(), None);
    let out = Command::new(pact_bin())
        .current_dir(&root)
        .args(["facts", "--model", "model.json"])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("geo"), "{}", stdout);
    assert!(!stdout.contains("shapes"), "{}", stdout);
}

#[test]
fn test_facts_json() {
    let (_dir, root) = setup_project(&geometry_model(), None);
    let out = Command::new(pact_bin())
        .current_dir(&root)
        .args(["facts", "--model", "model.json", "--json"])
        .output()
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let modules: Vec<&str> = value
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|f| f["module_path"].as_str())
        .collect();
    assert_eq!(modules, vec!["geo", "shapes"]);
}
