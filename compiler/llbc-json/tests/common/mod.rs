//! Builders for serialized crates.

#![allow(dead_code)]

use serde_json::{json, Value};

pub fn loc(line: usize, col: usize) -> Value {
    json!({"line": line, "col": col})
}

pub fn meta() -> Value {
    json!({
        "span": {"file_id": {"LocalId": 0}, "beg": loc(1, 0), "end": loc(1, 8)},
        "generated_from_span": null,
    })
}

pub fn name(idents: &[&str]) -> Value {
    Value::Array(idents.iter().map(|i| json!({"Ident": i})).collect())
}

pub fn stmt(content: Value) -> Value {
    json!({"meta": meta(), "content": content})
}

/// Chain statements into right-nested sequences.
pub fn seq(mut stmts: Vec<Value>) -> Value {
    let mut last = stmts.pop().unwrap_or_else(|| stmt(json!("Nop")));
    while let Some(first) = stmts.pop() {
        last = stmt(json!({"Sequence": [first, last]}));
    }
    last
}

pub fn place(var_id: usize) -> Value {
    json!({"var_id": var_id, "projection": []})
}

pub fn u32_ty() -> Value {
    json!({"Integer": ["U32"]})
}

pub fn scalar_const(int_ty: &str, ty: Value, value: Value) -> Value {
    json!({"Constant": [ty, {"ConstantValue": [{"Scalar": [{int_ty: [value]}]}]}]})
}

pub fn local(index: usize, name: Option<&str>, ty: Value) -> Value {
    json!({"index": index, "name": name, "ty": ty})
}

pub fn body(arg_count: usize, locals: Vec<Value>, body: Value) -> Value {
    json!({"meta": meta(), "arg_count": arg_count, "locals": locals, "body": body})
}

pub fn signature(inputs: Vec<Value>, output: Value) -> Value {
    json!({
        "region_params": [],
        "num_early_bound_regions": 0,
        "regions_hierarchy": [],
        "type_params": [],
        "inputs": inputs,
        "output": output,
    })
}

pub fn fun_decl(id: usize, idents: &[&str], signature: Value, body: Value) -> Value {
    json!({
        "def_id": id,
        "meta": meta(),
        "name": name(idents),
        "signature": signature,
        "body": body,
    })
}

pub fn krate(
    declarations: Vec<Value>,
    types: Vec<Value>,
    functions: Vec<Value>,
    globals: Vec<Value>,
) -> Value {
    json!({
        "name": "demo",
        "id_to_file": [
            [{"LocalId": 0}, {"Local": "src/lib.rs"}],
            [{"VirtualId": 0}, {"Virtual": "core/src/num.rs"}],
        ],
        "declarations": declarations,
        "types": types,
        "functions": functions,
        "globals": globals,
    })
}
