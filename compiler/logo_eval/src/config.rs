//! Session configuration.
//!
//! Logo-level variables take precedence at run time: PRINTDEPTHLIMIT,
//! PRINTWIDTHLIMIT and CASEIGNOREDP override the matching fields when set
//! to a usable value.

use logo_value::CaseMode;

/// Default bound on nested procedure activations.
pub const DEFAULT_RECURSION_LIMIT: usize = 10_000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Deepest sublist level PRINT descends into, or `None` for no limit.
    pub print_depth_limit: Option<usize>,
    /// Most items PRINT shows per list, or `None` for no limit.
    pub print_width_limit: Option<usize>,
    /// Procedure frames allowed above the global frame.
    pub recursion_limit: usize,
    pub case_mode: CaseMode,
    /// Instruction list installed as ERRACT at startup.
    pub erract: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            print_depth_limit: None,
            print_width_limit: None,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
            case_mode: CaseMode::Ignore,
            erract: None,
        }
    }
}
