//! Body/skin compatibility resolution.
//!
//! Body and skin assets embed a skin variant (`skin1`..`skin10`) or the literal `universal` in
//! their file names. The resolver keeps the two layers compatible: a body only pairs with a skin
//! of the same variant, and `universal` assets pair with anything.

/// Uniform random picks over candidate lists.
pub mod pick;
/// Resolution rules for body and skin changes and the joint shuffle.
pub mod resolver;
/// The closed variant-tag type and its file-name parser.
pub mod variant;
