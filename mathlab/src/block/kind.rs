/// The built-in block types.
///
/// Each kind fixes its arity; adding a kind means adding a variant here and
/// the matching arms in `name`, `arity` and `Block::eval`. Nothing in the
/// registry or the sequence needs to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// Returns the input unchanged.
    Identity,
    /// `input + c0`
    Addition,
    /// `input * c0`
    Multiplication,
    /// `input ^ c0`
    Power,
    /// -1, 0 or 1 depending on how the input compares to `c0`.
    Condition,
    /// Clamps the input into `[c0, c1]`.
    Limit,
}

impl BlockKind {
    pub const ALL: [BlockKind; 6] = [
        BlockKind::Identity,
        BlockKind::Addition,
        BlockKind::Multiplication,
        BlockKind::Power,
        BlockKind::Condition,
        BlockKind::Limit,
    ];

    /// Canonical type name, used when registering the built-ins.
    pub fn name(self) -> &'static str {
        match self {
            BlockKind::Identity => "identity",
            BlockKind::Addition => "addition",
            BlockKind::Multiplication => "multiplication",
            BlockKind::Power => "power",
            BlockKind::Condition => "condition",
            BlockKind::Limit => "limit",
        }
    }

    pub fn arity(self) -> usize {
        match self {
            BlockKind::Identity => 0,
            BlockKind::Addition
            | BlockKind::Multiplication
            | BlockKind::Power
            | BlockKind::Condition => 1,
            BlockKind::Limit => 2,
        }
    }

    pub fn from_name(name: &str) -> Option<BlockKind> {
        BlockKind::ALL.into_iter().find(|kind| kind.name() == name)
    }
}
