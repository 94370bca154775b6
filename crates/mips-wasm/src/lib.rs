//! Browser bindings for the line-driven instruction simulator.

use mips_core::{RegisterSlot, Simulator, SimulatorConfig, StepOutcome};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

macro_rules! console_log {
    ($($t:tt)*) => (web_sys::console::log_1(&JsValue::from_str(&format!($($t)*))))
}

/// JS-compatible version of `StepOutcome`, with pre-rendered terminal lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WasmStepOutcome {
    Executed { pc: u32, trace: String },
    Rejected { pc: u32, error: String },
}

impl From<&StepOutcome> for WasmStepOutcome {
    fn from(outcome: &StepOutcome) -> Self {
        match outcome {
            StepOutcome::Executed { pc, .. } => Self::Executed {
                pc: *pc,
                trace: outcome.to_string(),
            },
            StepOutcome::Rejected { pc, .. } => Self::Rejected {
                pc: *pc,
                error: outcome.to_string(),
            },
        }
    }
}

/// One row of the register listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WasmRegister {
    pub name: String,
    pub number: u8,
    pub value: i32,
}

fn register_listing(simulator: &Simulator) -> Vec<WasmRegister> {
    simulator
        .state()
        .registers()
        .iter()
        .map(|(slot, value)| WasmRegister {
            name: slot.to_string(),
            number: slot.canonical_index(),
            value,
        })
        .collect()
}

#[wasm_bindgen]
pub struct WasmSimulator {
    simulator: Simulator,
}

#[wasm_bindgen]
#[allow(clippy::missing_const_for_fn)]
impl WasmSimulator {
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        console_error_panic_hook::set_once();
        Self {
            simulator: Simulator::new(SimulatorConfig::default()),
        }
    }

    /// Resets PC and registers to zero.
    pub fn reset(&mut self) {
        self.simulator.reset();
        console_log!("simulator reset");
    }

    /// Executes one line and returns the outcome as a JS object.
    ///
    /// # Errors
    ///
    /// Fails only if the outcome cannot be converted to a JS value.
    pub fn execute(&mut self, line: &str) -> Result<JsValue, serde_wasm_bindgen::Error> {
        let outcome = self.simulator.execute_line(line);
        serde_wasm_bindgen::to_value(&WasmStepOutcome::from(&outcome))
    }

    /// Returns `{ name, number, value }` for every register in canonical order.
    ///
    /// # Errors
    ///
    /// Fails only if the listing cannot be converted to a JS value.
    pub fn registers(&self) -> Result<JsValue, serde_wasm_bindgen::Error> {
        serde_wasm_bindgen::to_value(&register_listing(&self.simulator))
    }

    /// Register values indexed by architectural number.
    #[must_use]
    pub fn register_values(&self) -> js_sys::Int32Array {
        let values: Vec<i32> = RegisterSlot::all()
            .map(|slot| self.simulator.state().registers().read(slot))
            .collect();
        js_sys::Int32Array::from(values.as_slice())
    }

    #[must_use]
    pub fn program_counter(&self) -> u32 {
        self.simulator.state().pc()
    }

    /// Instruction summary shown by the terminal `HELP` command.
    #[must_use]
    pub fn help_text() -> String {
        mips_repl::help_text()
    }

    /// Register table shown by the terminal `DEBUG` command.
    #[must_use]
    pub fn register_table(&self) -> String {
        mips_repl::render_registers(self.simulator.state().registers())
    }
}

impl Default for WasmSimulator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use mips_core::{Simulator, StepOutcome};

    use super::{register_listing, WasmStepOutcome};

    fn convert(outcome: &StepOutcome) -> WasmStepOutcome {
        WasmStepOutcome::from(outcome)
    }

    #[test]
    fn outcomes_carry_terminal_lines() {
        let mut sim = Simulator::default();

        let executed = convert(&sim.execute_line("ADDI $t1, $zero, 10"));
        let rejected = convert(&sim.execute_line("FOO"));

        assert_eq!(
            executed,
            WasmStepOutcome::Executed {
                pc: 0,
                trace: "EXECUTE -> 8 0 9 10".into()
            }
        );
        assert_eq!(
            rejected,
            WasmStepOutcome::Rejected {
                pc: 4,
                error: "ERRO: \"FOO\" não é uma tag válida".into()
            }
        );
    }

    #[test]
    fn outcome_json_is_externally_tagged() {
        let outcome = WasmStepOutcome::Executed {
            pc: 8,
            trace: "EXECUTE -> 2 8".into(),
        };

        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json["Executed"]["pc"], 8);
        assert_eq!(json["Executed"]["trace"], "EXECUTE -> 2 8");
    }

    #[test]
    fn listing_is_in_canonical_order() {
        let mut sim = Simulator::default();
        sim.execute_line("ADDI $ra, $zero, 5");

        let listing = register_listing(&sim);

        assert_eq!(listing.len(), 32);
        assert_eq!(listing[0].name, "$zero");
        assert_eq!(listing[31].name, "$ra");
        assert_eq!(listing[31].value, 5);
        assert!(listing
            .iter()
            .enumerate()
            .all(|(i, reg)| usize::from(reg.number) == i));
    }
}
