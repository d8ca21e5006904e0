//! Attribute carry-over from an old cell state to its replacement.

use blocksub_types::CellState;
use tracing::trace;

/// Builds the replacement state for `from`, starting at `to_default`.
///
/// Each attribute of `from` that the replacement type also declares is
/// copied when the replacement's domain admits the value; a rejected value
/// keeps the replacement's default. Attributes the replacement type lacks
/// are reported through `on_missing` and dropped. The result never carries
/// an attribute the replacement type does not declare.
pub fn reconcile<F>(from: &CellState, to_default: CellState, mut on_missing: F) -> CellState
where
    F: FnMut(&str),
{
    let mut result = to_default;

    for (name, value) in from.attributes() {
        if !result.supports(name) {
            on_missing(name);
            continue;
        }

        match result.try_assign(name, value.clone()) {
            Ok(next) => result = next,
            Err(rejected) => trace!(
                "{} keeps its default for {}: {}",
                result.id(),
                name,
                rejected
            ),
        }
    }

    result
}
