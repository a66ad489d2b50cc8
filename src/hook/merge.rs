use tracing::trace;

use super::{Hook, HookSet};
use crate::merge::concat_slices;

/// Combine two hook sets field by field into a new [`Hook`].
///
/// Each of `transform`, `before_handle` and `error` becomes `a`'s handlers
/// followed by `b`'s. Pass the global store as `a` and the route-local hooks
/// as `b` so global handlers run first. Missing fields count as empty and an
/// empty pair yields an empty list. Neither input is modified.
#[must_use]
pub fn merge_hook<A, B>(a: &A, b: &B) -> Hook
where
    A: HookSet + ?Sized,
    B: HookSet + ?Sized,
{
    let hook = Hook {
        transform: concat_slices(a.transform_hooks(), b.transform_hooks()),
        before_handle: concat_slices(a.before_handle_hooks(), b.before_handle_hooks()),
        error: concat_slices(a.error_hooks(), b.error_hooks()),
    };

    trace!(
        transform = hook.transform.len(),
        before_handle = hook.before_handle.len(),
        error = hook.error.len(),
        "Hooks merged"
    );

    hook
}
