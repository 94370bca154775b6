use std::fmt::Write as _;

use mips_core::{RegisterFile, RegisterGroup, RegisterSlot};

/// Columns between two `|` separators.
const CELL_WIDTH: usize = 18;
const CELLS_PER_ROW: usize = 8;

fn rows() -> [Vec<RegisterSlot>; 4] {
    let singletons = [
        RegisterGroup::Zero,
        RegisterGroup::GlobalPointer,
        RegisterGroup::StackPointer,
        RegisterGroup::FramePointer,
        RegisterGroup::ReturnAddress,
        RegisterGroup::AssemblerTemporary,
    ];

    [
        RegisterGroup::Saved.slots().collect(),
        RegisterGroup::Argument
            .slots()
            .chain(RegisterGroup::Value.slots())
            .chain(RegisterGroup::Kernel.slots())
            .collect(),
        RegisterGroup::Temporary.slots().take(CELLS_PER_ROW).collect(),
        RegisterGroup::Temporary
            .slots()
            .skip(CELLS_PER_ROW)
            .chain(singletons.into_iter().flat_map(RegisterGroup::slots))
            .collect(),
    ]
}

fn border() -> String {
    let inner = (CELL_WIDTH + 1) * CELLS_PER_ROW - 1;
    format!("+{}+\n", "-".repeat(inner))
}

fn separator() -> String {
    let cells = vec!["-".repeat(CELL_WIDTH); CELLS_PER_ROW];
    format!("|{}|\n", cells.join("+"))
}

/// Renders the register file as the four-row table shown at start-up and by
/// `DEBUG`.
#[must_use]
pub fn render_registers(registers: &RegisterFile) -> String {
    let mut table = border();

    for (row_index, row) in rows().iter().enumerate() {
        if row_index > 0 {
            table.push_str(&separator());
        }
        for slot in row {
            let name = slot.to_string();
            let width = CELL_WIDTH - 4 - name.len();
            let value = registers.read(*slot);
            let _ = write!(table, "| {name}: {value:>width$} ");
        }
        table.push_str("|\n");
    }

    table.push_str(&border());
    table
}
