use std::io::{BufRead, Write};

use mips_core::tokenizer::trim_blank;
use mips_core::{Simulator, StepOutcome};

use crate::errors::ReplError;
use crate::help::help_text;
use crate::table::render_registers;

/// One input line, classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// Print the instruction summary.
    Help,
    /// Print the register table.
    Debug,
    /// End the session.
    Exit,
    /// Anything else goes to the simulator.
    Instruction(&'a str),
}

impl<'a> Command<'a> {
    /// Classifies a line. Session commands must match exactly once trimmed.
    #[must_use]
    pub fn parse(line: &'a str) -> Self {
        match trim_blank(line) {
            "HELP" => Self::Help,
            "DEBUG" => Self::Debug,
            "EXIT" => Self::Exit,
            _ => Self::Instruction(line),
        }
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user typed `EXIT`.
    Exit,
    /// Input ran out.
    EndOfInput,
}

/// A REPL session reading lines from `input` and printing to `output`.
pub struct Session<R, W> {
    simulator: Simulator,
    input: R,
    output: W,
    quiet: bool,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Creates a session. A quiet session prints neither prompts nor the
    /// start-up register table.
    pub const fn new(simulator: Simulator, input: R, output: W, quiet: bool) -> Self {
        Self {
            simulator,
            input,
            output,
            quiet,
        }
    }

    /// Returns the simulator driven by this session.
    #[must_use]
    pub const fn simulator(&self) -> &Simulator {
        &self.simulator
    }

    /// Consumes the session, returning the simulator and the output sink.
    #[must_use]
    pub fn into_parts(self) -> (Simulator, W) {
        (self.simulator, self.output)
    }

    /// Runs until `EXIT` or end of input.
    ///
    /// # Errors
    ///
    /// Returns [`ReplError::Io`] when reading or writing fails.
    pub fn run(&mut self) -> Result<SessionEnd, ReplError> {
        if !self.quiet {
            self.output
                .write_all(render_registers(self.simulator.state().registers()).as_bytes())?;
        }

        let mut buffer = Vec::new();
        loop {
            if !self.quiet {
                write!(self.output, "{:>11} > ", self.simulator.state().pc())?;
                self.output.flush()?;
            }

            buffer.clear();
            if self.input.read_until(b'\n', &mut buffer)? == 0 {
                log::debug!("end of input");
                if !self.quiet {
                    writeln!(self.output)?;
                }
                return Ok(SessionEnd::EndOfInput);
            }

            let line = String::from_utf8_lossy(&buffer);
            if self.handle(Command::parse(&line))? == Some(SessionEnd::Exit) {
                return Ok(SessionEnd::Exit);
            }
        }
    }

    /// Handles one classified line.
    ///
    /// # Errors
    ///
    /// Returns [`ReplError::Io`] when writing fails.
    pub fn handle(&mut self, command: Command<'_>) -> Result<Option<SessionEnd>, ReplError> {
        match command {
            Command::Help => self.output.write_all(help_text().as_bytes())?,
            Command::Debug => {
                // `$zero` reads as 0 between cycles.
                self.simulator.state_mut().begin_cycle();
                self.output
                    .write_all(render_registers(self.simulator.state().registers()).as_bytes())?;
            }
            Command::Exit => {
                log::debug!("exit requested at pc={}", self.simulator.state().pc());
                return Ok(Some(SessionEnd::Exit));
            }
            Command::Instruction(line) => {
                let outcome = self.simulator.execute_line(line);
                if matches!(outcome, StepOutcome::Rejected { .. })
                    || self.simulator.config().tracing_enabled
                {
                    writeln!(self.output, "{outcome}")?;
                }
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use mips_core::{resolve, Simulator, SimulatorConfig};

    use super::{Command, Session, SessionEnd};

    fn run_quiet(script: &str, config: SimulatorConfig) -> (SessionEnd, Simulator, String) {
        let mut session = Session::new(
            Simulator::new(config),
            script.as_bytes(),
            Vec::new(),
            true,
        );
        let end = session.run().unwrap();
        let (simulator, output) = session.into_parts();
        (end, simulator, String::from_utf8(output).unwrap())
    }

    #[rstest]
    #[case("HELP", Command::Help)]
    #[case("  DEBUG\r\n", Command::Debug)]
    #[case("EXIT\n", Command::Exit)]
    #[case("exit", Command::Instruction("exit"))]
    #[case("HELP me", Command::Instruction("HELP me"))]
    fn session_commands_match_exactly(#[case] line: &str, #[case] expected: Command<'_>) {
        assert_eq!(Command::parse(line), expected);
    }

    #[test]
    fn prints_traces_and_errors_in_order() {
        let (end, sim, output) = run_quiet(
            "ADDI $t1, $zero, 10\nFOO\nADD $t2, $t1, $t1\n",
            SimulatorConfig::default(),
        );

        assert_eq!(end, SessionEnd::EndOfInput);
        assert_eq!(
            output,
            "EXECUTE -> 8 0 9 10\nERRO: \"FOO\" não é uma tag válida\nEXECUTE -> 0 9 9 10 0 32\n"
        );
        assert_eq!(sim.state().pc(), 8);
    }

    #[test]
    fn session_commands_leave_pc_alone() {
        let (end, sim, output) =
            run_quiet("J 40\nHELP\nDEBUG\nEXIT\nJ 80\n", SimulatorConfig::default());

        assert_eq!(end, SessionEnd::Exit);
        assert_eq!(sim.state().pc(), 40);
        assert!(output.contains("Instruções R"));
        assert!(output.contains("| $s0:"));
    }

    #[test]
    fn debug_shows_zero_after_a_zero_write() {
        let (_, _, output) =
            run_quiet("ADDI $zero, $zero, 9\nDEBUG\n", SimulatorConfig::default());

        assert!(output.contains("| $zero:         0 |"));
    }

    #[test]
    fn disabled_tracing_still_reports_errors() {
        let config = SimulatorConfig {
            tracing_enabled: false,
            ..SimulatorConfig::default()
        };

        let (_, sim, output) = run_quiet("ADDI $s0, $zero, 3\nADD $s0\n", config);

        assert_eq!(
            output,
            "ERRO: Quantidade inesperada de argumentos, eram esperados 3 e foram recebidos 1\n"
        );
        assert_eq!(sim.state().registers().read(resolve("$s0").unwrap()), 3);
    }

    #[test]
    fn interactive_mode_prints_table_and_prompts() {
        let mut session = Session::new(
            Simulator::default(),
            "ADDI $t0, $zero, 1\n".as_bytes(),
            Vec::new(),
            false,
        );

        session.run().unwrap();
        let (_, output) = session.into_parts();
        let output = String::from_utf8(output).unwrap();

        assert!(output.starts_with("+---"));
        assert!(output.contains("          0 > EXECUTE -> 8 0 8 1\n"));
        assert!(output.ends_with("          4 > \n"));
    }

    #[test]
    fn invalid_utf8_is_replaced_not_fatal() {
        let input: &[u8] = b"AD\xffD $t0\nADDI $t0, $zero, 2\n";
        let mut session = Session::new(Simulator::default(), input, Vec::new(), true);

        assert_eq!(session.run().unwrap(), SessionEnd::EndOfInput);
        assert_eq!(
            session
                .simulator()
                .state()
                .registers()
                .read(resolve("$t0").unwrap()),
            2
        );
    }
}
