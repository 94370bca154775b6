#![no_main]

use libfuzzer_sys::fuzz_target;
use mips_core::{canonical_index, resolve, tokenize, Simulator, SimulatorConfig, StepOutcome};

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);

    let mut sim = Simulator::new(SimulatorConfig::default());
    for line in text.lines() {
        let pc = sim.state().pc();
        let outcome = sim.execute_line(line);
        if let StepOutcome::Rejected { error, .. } = &outcome {
            if error.suppresses_pc_advance() {
                assert_eq!(sim.state().pc(), pc);
            }
        }

        let _ = tokenize(line);
        assert_eq!(resolve(line).is_ok(), canonical_index(line).is_ok());
    }
});
