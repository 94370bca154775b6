//! Browser-side checks of the JS bridge.

#![cfg(target_arch = "wasm32")]

use mips_wasm::{WasmStepOutcome, WasmSimulator};
use wasm_bindgen_test::wasm_bindgen_test;

#[wasm_bindgen_test]
fn execute_returns_tagged_outcomes() {
    let mut sim = WasmSimulator::new();

    let value = sim.execute("J 8").unwrap();
    let outcome: WasmStepOutcome = serde_wasm_bindgen::from_value(value).unwrap();

    assert_eq!(
        outcome,
        WasmStepOutcome::Executed {
            pc: 0,
            trace: "EXECUTE -> 2 8".into()
        }
    );
    assert_eq!(sim.program_counter(), 8);
}

#[wasm_bindgen_test]
fn register_values_follow_architectural_numbers() {
    let mut sim = WasmSimulator::new();
    sim.execute("ADDI $sp, $zero, 64").unwrap();

    let values = sim.register_values();

    assert_eq!(values.length(), 32);
    assert_eq!(values.get_index(29), 64);

    sim.reset();
    assert_eq!(sim.register_values().get_index(29), 0);
    assert_eq!(sim.program_counter(), 0);
}
