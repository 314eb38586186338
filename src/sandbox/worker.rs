//! The sandbox worker: one isolated evaluation per process.
//!
//! Runs a `rustpython-vm` interpreter with builtins only. No stdlib is
//! initialized, so `os` and `socket` are unreachable by construction,
//! and the prelude deletes `open` from the builtins so file I/O is gone
//! too. The prelude also swaps `sys.stdout` for an in-scope
//! accumulator; because the process exits after a single request,
//! restoration is structural and cross-request leakage is impossible.

use crate::config::OUTPUT_CAP;
use crate::sandbox::{truncate_display, WorkerRequest, WorkerResponse};
use rustpython_vm::builtins::PyBaseExceptionRef;
use rustpython_vm::{compiler, Interpreter, PyObjectRef, VirtualMachine};
use serde_json::Value as JsonValue;
use std::io::Read;
use std::time::Instant;

/// Executed in the audit scope before the snippet loads. `print` and
/// anything else writing to `sys.stdout` lands in the accumulator, and
/// `open` is stripped from the builtins so the snippet cannot touch the
/// filesystem.
const CAPTURE_PRELUDE: &str = r#"
import builtins
import sys

if hasattr(builtins, "open"):
    del builtins.open

class _AuditStdout:
    def __init__(self):
        self._chunks = []

    def write(self, text):
        self._chunks.append(str(text))
        return len(str(text))

    def flush(self):
        pass

    def getvalue(self):
        return "".join(self._chunks)

sys.setrecursionlimit(256)
sys.stdout = _AuditStdout()
sys.stderr = sys.stdout
"#;

/// Entry point for the hidden subcommand: read one JSON request from
/// stdin, evaluate it, write one JSON response to stdout, exit.
pub fn run() -> anyhow::Result<()> {
    let mut raw = String::new();
    std::io::stdin().read_to_string(&mut raw)?;
    let response = match serde_json::from_str::<WorkerRequest>(&raw) {
        Ok(request) => evaluate(&request),
        Err(err) => WorkerResponse::fault(format!("Malformed sandbox request: {err}"), 0.0),
    };
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}

fn evaluate(request: &WorkerRequest) -> WorkerResponse {
    Interpreter::without_stdlib(Default::default()).enter(|vm| {
        let scope = vm.new_scope_with_builtins();

        let prelude = match vm.compile(
            CAPTURE_PRELUDE,
            compiler::Mode::Exec,
            "<capture>".to_owned(),
        ) {
            Ok(code) => code,
            Err(err) => {
                return WorkerResponse::fault(format!("Sandbox setup failed: {err}"), 0.0)
            }
        };
        if let Err(exc) = vm.run_code_obj(prelude, scope.clone()) {
            return WorkerResponse::fault(fault_summary(vm, exc), 0.0);
        }
        // Held from here so a snippet reassigning sys.stdout cannot
        // hide what it already printed.
        let capture = match vm.sys_module.get_attr("stdout", vm) {
            Ok(obj) => obj,
            Err(exc) => return WorkerResponse::fault(fault_summary(vm, exc), 0.0),
        };

        let code = match vm.compile(&request.source, compiler::Mode::Exec, "<audit>".to_owned()) {
            Ok(code) => code,
            Err(err) => return WorkerResponse::fault(format!("{err}"), 0.0),
        };
        let load_started = Instant::now();
        if let Err(exc) = vm.run_code_obj(code, scope.clone()) {
            return WorkerResponse::fault(fault_summary(vm, exc), elapsed_ms(load_started));
        }
        let load_ms = elapsed_ms(load_started);

        let callee = scope.globals.get_item(request.entry_point.as_str(), vm).ok();
        match (callee, &request.args) {
            (Some(function), Some(args)) => {
                let positional: Vec<PyObjectRef> =
                    args.iter().map(|value| json_to_py(vm, value)).collect();
                let call_started = Instant::now();
                match function.call(positional, vm) {
                    Ok(value) => {
                        let runtime_ms = elapsed_ms(call_started);
                        match value.str(vm) {
                            Ok(rendered) => WorkerResponse::success(
                                truncate_display(rendered.as_str(), OUTPUT_CAP),
                                runtime_ms,
                            ),
                            Err(exc) => {
                                WorkerResponse::fault(fault_summary(vm, exc), runtime_ms)
                            }
                        }
                    }
                    Err(exc) => {
                        WorkerResponse::fault(fault_summary(vm, exc), elapsed_ms(call_started))
                    }
                }
            }
            // Script-style snippet or unresolvable entry point: the
            // captured stdout text is the result.
            _ => {
                let captured = read_captured(vm, &capture);
                let trimmed = captured.trim();
                let output = if trimmed.is_empty() {
                    "No Output".to_string()
                } else {
                    truncate_display(trimmed, OUTPUT_CAP)
                };
                WorkerResponse::success(output, load_ms)
            }
        }
    })
}

fn read_captured(vm: &VirtualMachine, capture: &PyObjectRef) -> String {
    vm.call_method(capture, "getvalue", ())
        .and_then(|value| value.str(vm))
        .map(|rendered| rendered.as_str().to_owned())
        .unwrap_or_default()
}

/// Last line of the rendered traceback, matching how a terminal user
/// would describe the fault.
fn fault_summary(vm: &VirtualMachine, exc: PyBaseExceptionRef) -> String {
    let mut rendered = String::new();
    if vm.write_exception(&mut rendered, &exc).is_ok() {
        if let Some(line) = rendered.lines().rev().find(|line| !line.trim().is_empty()) {
            return line.trim().to_string();
        }
    }
    "Execution fault".to_string()
}

fn json_to_py(vm: &VirtualMachine, value: &JsonValue) -> PyObjectRef {
    match value {
        JsonValue::Null => vm.ctx.none(),
        JsonValue::Bool(flag) => vm.ctx.new_bool(*flag).into(),
        JsonValue::Number(number) => {
            if let Some(integer) = number.as_i64() {
                vm.ctx.new_int(integer).into()
            } else {
                vm.ctx.new_float(number.as_f64().unwrap_or(0.0)).into()
            }
        }
        JsonValue::String(text) => vm.ctx.new_str(text.as_str()).into(),
        JsonValue::Array(items) => {
            let elements = items.iter().map(|item| json_to_py(vm, item)).collect();
            vm.ctx.new_list(elements).into()
        }
        JsonValue::Object(map) => {
            let dict = vm.ctx.new_dict();
            for (key, item) in map {
                let _ = dict.set_item(key.as_str(), json_to_py(vm, item), vm);
            }
            dict.into()
        }
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}
