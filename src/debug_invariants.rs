use crate::mesh_error::MeshError;

/// Trait for validating topology invariants.
pub trait DebugInvariants {
    /// Assert invariants when invariant checking is enabled.
    fn debug_assert_invariants(&self);
    /// Validate invariants and return the first error encountered.
    fn validate_invariants(&self) -> Result<(), MeshError>;
}

/// Helper macro to run a fallible check and panic on error when invariant
/// checking is enabled.
///
/// Unlike plain `debug_assert!`, this stays silent in ordinary debug builds:
/// the fast triangulator is allowed to emit degenerate topology for
/// degenerate input, so the check is opt-in through the `strict-invariants`
/// or `check-invariants` features.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}
