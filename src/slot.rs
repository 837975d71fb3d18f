//! Type-erased callables stored in a signal.

use std::fmt;

type Callable<Args, R> = Box<dyn Fn(Args) -> Option<R> + Send + Sync>;

/// One registered callable.
///
/// A slot returning `None` is *skipped*: it takes no part in folding the
/// results of a dispatch. Plain closures never skip.
pub(crate) struct Slot<Args, R> {
    callable: Callable<Args, R>,
}

impl<Args: 'static, R: 'static> Slot<Args, R> {
    pub fn new(f: impl Fn(Args) -> R + Send + Sync + 'static) -> Self {
        Self::skippable(move |args| Some(f(args)))
    }

    pub fn skippable(f: impl Fn(Args) -> Option<R> + Send + Sync + 'static) -> Self {
        Self {
            callable: Box::new(f),
        }
    }

    pub fn invoke(&self, args: Args) -> Option<R> {
        (self.callable)(args)
    }
}

impl<Args, R> fmt::Debug for Slot<Args, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoke_plain_closure() {
        let slot = Slot::new(|(a, b): (i32, i32)| a + b);
        assert_eq!(slot.invoke((3, 4)), Some(7));
    }

    #[test]
    fn test_skippable_slot() {
        let slot = Slot::skippable(|x: i32| (x > 0).then_some(x));
        assert_eq!(slot.invoke(2), Some(2));
        assert_eq!(slot.invoke(-1), None);
    }
}
