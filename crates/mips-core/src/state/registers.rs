use std::fmt;

use crate::error::SimError;

/// Number of architecturally addressable registers (`$zero` .. `$ra`).
pub const REGISTER_COUNT: usize = 32;

/// Register groups of the register file.
///
/// Array-backed groups hold several numbered slots (`$t0..$t9`); singleton
/// groups hold exactly one slot addressed by name (`$sp`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegisterGroup {
    /// Temporaries `$t0..$t9`.
    Temporary,
    /// Saved registers `$s0..$s7`.
    Saved,
    /// Argument registers `$a0..$a3`.
    Argument,
    /// Kernel-reserved registers `$k0..$k1`.
    Kernel,
    /// Return-value registers `$v0..$v1`.
    Value,
    /// Hard-wired zero register `$zero`.
    Zero,
    /// Global pointer `$gp`.
    GlobalPointer,
    /// Stack pointer `$sp`.
    StackPointer,
    /// Frame pointer `$fp`.
    FramePointer,
    /// Return address `$ra`.
    ReturnAddress,
    /// Assembler-reserved temporary `$at`.
    AssemblerTemporary,
}

impl RegisterGroup {
    /// Groups that are addressed by a letter and a digit.
    pub const NUMBERED: [Self; 5] = [
        Self::Temporary,
        Self::Saved,
        Self::Argument,
        Self::Kernel,
        Self::Value,
    ];

    /// Groups that are addressed by a fixed name.
    pub const SINGLETONS: [Self; 6] = [
        Self::Zero,
        Self::GlobalPointer,
        Self::StackPointer,
        Self::FramePointer,
        Self::ReturnAddress,
        Self::AssemblerTemporary,
    ];

    /// Number of slots in this group.
    #[must_use]
    pub const fn len(self) -> u8 {
        match self {
            Self::Temporary => 10,
            Self::Saved => 8,
            Self::Argument => 4,
            Self::Kernel | Self::Value => 2,
            Self::Zero
            | Self::GlobalPointer
            | Self::StackPointer
            | Self::FramePointer
            | Self::ReturnAddress
            | Self::AssemblerTemporary => 1,
        }
    }

    /// Name prefix after the `$` sigil: the group letter, or the full
    /// singleton name.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Temporary => "t",
            Self::Saved => "s",
            Self::Argument => "a",
            Self::Kernel => "k",
            Self::Value => "v",
            Self::Zero => "zero",
            Self::GlobalPointer => "gp",
            Self::StackPointer => "sp",
            Self::FramePointer => "fp",
            Self::ReturnAddress => "ra",
            Self::AssemblerTemporary => "at",
        }
    }

    /// Returns `true` for groups addressed by a fixed name.
    #[must_use]
    pub const fn is_singleton(self) -> bool {
        !matches!(
            self,
            Self::Temporary | Self::Saved | Self::Argument | Self::Kernel | Self::Value
        )
    }

    /// Iterates every slot of this group in index order.
    pub fn slots(self) -> impl Iterator<Item = RegisterSlot> {
        (0..self.len()).map(move |index| RegisterSlot { group: self, index })
    }

    fn from_letter(letter: char) -> Option<Self> {
        Self::NUMBERED
            .into_iter()
            .find(|group| group.prefix().starts_with(letter))
    }

    fn from_singleton_name(name: &str) -> Option<Self> {
        Self::SINGLETONS
            .into_iter()
            .find(|group| group.prefix() == name)
    }
}

/// Handle to exactly one storage location of a [`RegisterFile`].
///
/// A slot is only constructible for in-bounds group indices, so reads and
/// writes through it never miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegisterSlot {
    group: RegisterGroup,
    index: u8,
}

impl RegisterSlot {
    /// `$zero`.
    pub const ZERO: Self = Self::singleton(RegisterGroup::Zero);

    /// Creates a slot when `index` lies inside the group.
    #[must_use]
    pub const fn new(group: RegisterGroup, index: u8) -> Option<Self> {
        if index < group.len() {
            Some(Self { group, index })
        } else {
            None
        }
    }

    const fn singleton(group: RegisterGroup) -> Self {
        Self { group, index: 0 }
    }

    /// Parses a register operand such as `$t3` or `$sp`.
    ///
    /// The whole string must be a register name; `$t3,` or `$t10` are rejected.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let body = name.strip_prefix('$')?;

        if let Some(group) = RegisterGroup::from_singleton_name(body) {
            return Some(Self::singleton(group));
        }

        let mut chars = body.chars();
        let group = RegisterGroup::from_letter(chars.next()?)?;
        let digit = chars.next()?.to_digit(10)?;
        if chars.next().is_some() {
            return None;
        }

        Self::new(group, u8::try_from(digit).ok()?)
    }

    /// Resolves a register operand, reporting unknown names.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::RegisterNotFound`] when `name` is not a register.
    pub fn resolve(name: &str) -> Result<Self, SimError> {
        Self::parse(name).ok_or_else(|| SimError::RegisterNotFound(name.to_string()))
    }

    /// Returns the register group.
    #[must_use]
    pub const fn group(self) -> RegisterGroup {
        self.group
    }

    /// Returns the index inside the group (always 0 for singletons).
    #[must_use]
    pub const fn index(self) -> u8 {
        self.index
    }

    /// Architectural register number (`$zero` = 0 .. `$ra` = 31).
    #[must_use]
    pub const fn canonical_index(self) -> u8 {
        let index = self.index;
        match self.group {
            RegisterGroup::Zero => 0,
            RegisterGroup::AssemblerTemporary => 1,
            RegisterGroup::Value => 2 + index,
            RegisterGroup::Argument => 4 + index,
            RegisterGroup::Temporary if index < 8 => 8 + index,
            RegisterGroup::Temporary => 24 + (index - 8),
            RegisterGroup::Saved => 16 + index,
            RegisterGroup::Kernel => 26 + index,
            RegisterGroup::GlobalPointer => 28,
            RegisterGroup::StackPointer => 29,
            RegisterGroup::FramePointer => 30,
            RegisterGroup::ReturnAddress => 31,
        }
    }

    /// Inverse of [`Self::canonical_index`].
    #[must_use]
    pub const fn from_canonical_index(number: u8) -> Option<Self> {
        let (group, index) = match number {
            0 => (RegisterGroup::Zero, 0),
            1 => (RegisterGroup::AssemblerTemporary, 0),
            2..=3 => (RegisterGroup::Value, number - 2),
            4..=7 => (RegisterGroup::Argument, number - 4),
            8..=15 => (RegisterGroup::Temporary, number - 8),
            16..=23 => (RegisterGroup::Saved, number - 16),
            24..=25 => (RegisterGroup::Temporary, number - 16),
            26..=27 => (RegisterGroup::Kernel, number - 26),
            28 => (RegisterGroup::GlobalPointer, 0),
            29 => (RegisterGroup::StackPointer, 0),
            30 => (RegisterGroup::FramePointer, 0),
            31 => (RegisterGroup::ReturnAddress, 0),
            _ => return None,
        };
        Some(Self { group, index })
    }

    /// Iterates all 32 registers in canonical order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..32).filter_map(Self::from_canonical_index)
    }
}

impl fmt::Display for RegisterSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.group.is_singleton() {
            write!(f, "${}", self.group.prefix())
        } else {
            write!(f, "${}{}", self.group.prefix(), self.index)
        }
    }
}

/// Resolves a register name to its storage slot.
///
/// # Errors
///
/// Returns [`SimError::RegisterNotFound`] when `name` is not a register.
pub fn resolve(name: &str) -> Result<RegisterSlot, SimError> {
    RegisterSlot::resolve(name)
}

/// Resolves a register name to its architectural number.
///
/// Shares the name parser with [`resolve`], so both accept exactly the same
/// names.
///
/// # Errors
///
/// Returns [`SimError::RegisterNotFound`] when `name` is not a register.
pub fn canonical_index(name: &str) -> Result<u8, SimError> {
    RegisterSlot::resolve(name).map(RegisterSlot::canonical_index)
}

/// Register storage: one array per numbered group plus six scalar slots.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct RegisterFile {
    temporary: [i32; 10],
    saved: [i32; 8],
    argument: [i32; 4],
    kernel: [i32; 2],
    value: [i32; 2],
    zero: i32,
    gp: i32,
    sp: i32,
    fp: i32,
    ra: i32,
    at: i32,
}

impl RegisterFile {
    /// Reads a register.
    #[must_use]
    pub const fn read(&self, slot: RegisterSlot) -> i32 {
        let index = slot.index as usize;
        match slot.group {
            RegisterGroup::Temporary => self.temporary[index],
            RegisterGroup::Saved => self.saved[index],
            RegisterGroup::Argument => self.argument[index],
            RegisterGroup::Kernel => self.kernel[index],
            RegisterGroup::Value => self.value[index],
            RegisterGroup::Zero => self.zero,
            RegisterGroup::GlobalPointer => self.gp,
            RegisterGroup::StackPointer => self.sp,
            RegisterGroup::FramePointer => self.fp,
            RegisterGroup::ReturnAddress => self.ra,
            RegisterGroup::AssemblerTemporary => self.at,
        }
    }

    /// Returns the storage location behind a slot for read-modify-write.
    pub fn slot_mut(&mut self, slot: RegisterSlot) -> &mut i32 {
        let index = usize::from(slot.index);
        match slot.group {
            RegisterGroup::Temporary => &mut self.temporary[index],
            RegisterGroup::Saved => &mut self.saved[index],
            RegisterGroup::Argument => &mut self.argument[index],
            RegisterGroup::Kernel => &mut self.kernel[index],
            RegisterGroup::Value => &mut self.value[index],
            RegisterGroup::Zero => &mut self.zero,
            RegisterGroup::GlobalPointer => &mut self.gp,
            RegisterGroup::StackPointer => &mut self.sp,
            RegisterGroup::FramePointer => &mut self.fp,
            RegisterGroup::ReturnAddress => &mut self.ra,
            RegisterGroup::AssemblerTemporary => &mut self.at,
        }
    }

    /// Writes a register. Writes to `$zero` are kept until the next cycle.
    pub fn write(&mut self, slot: RegisterSlot, value: i32) {
        *self.slot_mut(slot) = value;
    }

    /// Forces `$zero` back to 0, returning the discarded value if it was set.
    pub fn reset_zero(&mut self) -> Option<i32> {
        let discarded = std::mem::take(&mut self.zero);
        (discarded != 0).then_some(discarded)
    }

    /// Iterates `(slot, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (RegisterSlot, i32)> + '_ {
        RegisterSlot::all().map(|slot| (slot, self.read(slot)))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rstest::rstest;

    use super::{
        canonical_index, resolve, RegisterFile, RegisterGroup, RegisterSlot, REGISTER_COUNT,
    };
    use crate::error::SimError;

    #[test]
    fn canonical_index_is_a_bijection_over_all_registers() {
        let indices: HashSet<u8> = RegisterSlot::all()
            .map(RegisterSlot::canonical_index)
            .collect();

        assert_eq!(indices.len(), REGISTER_COUNT);
        assert!(indices.iter().all(|&index| usize::from(index) < REGISTER_COUNT));

        for number in 0_u8..32 {
            let slot = RegisterSlot::from_canonical_index(number).expect("defined register");
            assert_eq!(slot.canonical_index(), number);
        }
        assert!(RegisterSlot::from_canonical_index(32).is_none());
    }

    #[test]
    fn group_sizes_cover_the_whole_register_file() {
        let total: usize = RegisterGroup::NUMBERED
            .into_iter()
            .chain(RegisterGroup::SINGLETONS)
            .map(|group| usize::from(group.len()))
            .sum();

        assert_eq!(total, REGISTER_COUNT);
    }

    #[rstest]
    #[case("$zero", 0)]
    #[case("$at", 1)]
    #[case("$v0", 2)]
    #[case("$v1", 3)]
    #[case("$a0", 4)]
    #[case("$a3", 7)]
    #[case("$t0", 8)]
    #[case("$t7", 15)]
    #[case("$s0", 16)]
    #[case("$s7", 23)]
    #[case("$t8", 24)]
    #[case("$t9", 25)]
    #[case("$k0", 26)]
    #[case("$k1", 27)]
    #[case("$gp", 28)]
    #[case("$sp", 29)]
    #[case("$fp", 30)]
    #[case("$ra", 31)]
    fn names_map_to_architectural_numbers(#[case] name: &str, #[case] number: u8) {
        assert_eq!(canonical_index(name), Ok(number));
        assert_eq!(resolve(name).map(|slot| slot.to_string()), Ok(name.to_string()));
    }

    #[rstest]
    #[case("$s8")]
    #[case("$s9")]
    #[case("$a4")]
    #[case("$k2")]
    #[case("$v2")]
    #[case("$x0")]
    #[case("$t")]
    #[case("$t10")]
    #[case("$t0x")]
    #[case("t0")]
    #[case("$")]
    #[case("")]
    #[case("$ZERO")]
    #[case("$zero0")]
    #[case("$t-")]
    fn out_of_range_and_malformed_names_are_rejected(#[case] name: &str) {
        assert_eq!(
            resolve(name),
            Err(SimError::RegisterNotFound(name.to_string()))
        );
        assert!(canonical_index(name).is_err());
    }

    #[test]
    fn every_slot_is_stored_independently() {
        let mut registers = RegisterFile::default();

        for (slot, value) in RegisterSlot::all().zip(100_i32..) {
            registers.write(slot, value);
        }

        for ((slot, value), expected) in registers.iter().zip(100_i32..) {
            assert_eq!(value, expected, "{slot} was clobbered");
        }
    }

    #[test]
    fn slot_mut_supports_read_modify_write() {
        let mut registers = RegisterFile::default();
        let slot = resolve("$a2").expect("valid register");

        *registers.slot_mut(slot) += 7;
        *registers.slot_mut(slot) *= 3;

        assert_eq!(registers.read(slot), 21);
    }

    #[test]
    fn reset_zero_reports_discarded_writes() {
        let mut registers = RegisterFile::default();
        assert_eq!(registers.reset_zero(), None);

        registers.write(RegisterSlot::ZERO, 42);
        assert_eq!(registers.read(RegisterSlot::ZERO), 42);

        assert_eq!(registers.reset_zero(), Some(42));
        assert_eq!(registers.read(RegisterSlot::ZERO), 0);
    }

    #[test]
    fn group_slots_follow_index_order() {
        let names: Vec<String> = RegisterGroup::Kernel
            .slots()
            .chain(RegisterGroup::StackPointer.slots())
            .map(|slot| slot.to_string())
            .collect();

        assert_eq!(names, ["$k0", "$k1", "$sp"]);
    }
}
