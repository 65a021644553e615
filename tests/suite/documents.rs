//! Program documents through the engine: load, preview, run.

use std::collections::BTreeMap;
use std::fs;

use semu_engine::{Engine, LoadError, load_program};
use semu_types::{Instruction, Label, Program, Variable};

use crate::common::{inputs, l, x};

const DOUBLE: &str = r#"{
    "name": "double",
    "instructions": [
        { "op": "jump_zero", "variable": "x1", "target": "EXIT", "label": "L1" },
        { "op": "decrease", "variable": "x1" },
        { "op": "increase", "variable": "y" },
        { "op": "increase", "variable": "y" },
        { "op": "goto_label", "target": "L1" }
    ]
}"#;

#[test]
fn loads_and_runs_a_document_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("double.json");
    fs::write(&path, DOUBLE).unwrap();

    let engine = Engine::new(load_program(&path).unwrap());
    assert_eq!(engine.program_name(), "double");
    assert_eq!(engine.max_degree().unwrap(), 2);
    assert_eq!(engine.inputs_used(0), vec![x(1)]);

    for degree in 0..=2 {
        let result = engine.run(degree, &inputs(&[(x(1), 3)])).unwrap();
        assert_eq!(result.y, 6, "degree {degree}");
        assert_eq!(result.value_of(x(1)), Some(0), "degree {degree}");
    }
}

#[test]
fn missing_file_reports_its_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let err = load_program(&path).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn blank_names_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blank.json");
    fs::write(&path, r#"{ "name": "  ", "instructions": [] }"#).unwrap();
    assert!(matches!(load_program(&path), Err(LoadError::EmptyName)));
}

#[test]
fn preview_renders_origin_and_tail() {
    let engine = Engine::new(Program::new(
        "preview",
        vec![
            Instruction::jump_zero(x(1), Label::Exit).labeled(l(1)),
            Instruction::increase(Variable::Y),
        ],
    ));
    let rendered = engine
        .preview(1)
        .rows
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");
    insta::assert_snapshot!(rendered, @r"
    #1 (S) [ L1  ] IF x1 = 0 GOTO EXIT (2)  >>>  #1 (B) [ L1  ] IF x1 != 0 GOTO L2 (2)  >>>  #2 (S) [     ] GOTO EXIT (1)  >>>  #3 (B) [ L2  ] x1 <- x1 (1)
    #2 (B) [     ] y <- y + 1 (1)
    ");
}

#[test]
fn run_result_serializes_with_named_variables() {
    let engine = Engine::new(Program::new("inc", vec![Instruction::increase(Variable::Y)]));
    let result = engine.run(0, &BTreeMap::new()).unwrap();
    insta::assert_snapshot!(
        serde_json::to_string(&result).unwrap(),
        @r#"{"program_name":"inc","degree":0,"y":1,"cycles":1,"variables":[{"name":"y","value":1}]}"#
    );
}
