#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HomflyConfig {
    // recursion depth; every level removes or flips a crossing,
    // so the crossing number already bounds it.
    pub max_depth: Option<usize>,
    // total number of resolver nodes.
    pub max_nodes: Option<usize>,
    pub use_cache: bool,
    // admit braids with virtual crossings.
    pub virtual_mode: bool,
    pub record_trace: bool,
}

impl HomflyConfig {
    pub const DEFAULT_MAX_NODES: usize = 1_000_000;
}

impl Default for HomflyConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            max_nodes: Some(Self::DEFAULT_MAX_NODES),
            use_cache: false,
            virtual_mode: false,
            record_trace: false
        }
    }
}
