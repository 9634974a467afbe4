//! Splitting sequences over worker threads.
//!
//! With `tasks > 1`, the items of a sequence are cut into `tasks` slices of
//! equal length, the last one taking the remainder, and each slice is
//! handled by one worker of a [`rayon`] pool. Results keep the input order;
//! the first error in that order is returned.
//!
//! Without the `parallel` feature, or if the pool cannot be started, the
//! items are handled on the calling thread.

use jk_reflect::Reflect;
use jk_reflect::info::TypeInfo;
use serde_json::Value;

use crate::context::{DumpContext, LoadContext};
use crate::error::Error;

/// Dumps the items of a sequence.
pub(crate) fn dump_items(items: &[&dyn Reflect], ctx: &mut DumpContext<'_>) -> Result<Vec<Value>, Error> {
    let tasks = worker_count(ctx.options().tasks(), items.len());
    if tasks > 1 {
        #[cfg(feature = "parallel")]
        {
            let contexts: Vec<_> = (0..tasks).map(|_| ctx.clone()).collect();
            if let Some(result) = pool::run(items, contexts, |ctx, _, item| ctx.dump(*item)) {
                return result;
            }
        }
        #[cfg(not(feature = "parallel"))]
        log::debug!("the `parallel` feature is disabled, dumping {} items on one thread", items.len());
    }
    items.iter().map(|item| ctx.dump(*item)).collect()
}

/// Loads the items of a sequence, the item at `index` into `target(index)`.
pub(crate) fn load_items(
    items: &[Value],
    target: &(dyn Fn(usize) -> &'static TypeInfo + Sync),
    ctx: &mut LoadContext<'_>,
) -> Result<Vec<Box<dyn Reflect>>, Error> {
    let tasks = worker_count(ctx.options().tasks(), items.len());
    if tasks > 1 {
        #[cfg(feature = "parallel")]
        {
            let contexts: Vec<_> = (0..tasks).map(|_| ctx.worker()).collect();
            if let Some(result) = pool::run(items, contexts, |ctx, index, item| ctx.load(item, target(index))) {
                return result;
            }
        }
        #[cfg(not(feature = "parallel"))]
        log::debug!("the `parallel` feature is disabled, loading {} items on one thread", items.len());
    }
    items
        .iter()
        .enumerate()
        .map(|(index, item)| ctx.load(item, target(index)))
        .collect()
}

#[inline]
fn worker_count(tasks: usize, len: usize) -> usize {
    tasks.min(len)
}

#[cfg(feature = "parallel")]
mod pool {
    use core::mem;

    use crate::error::Error;

    /// Runs `work` over `items` with one worker per context.
    ///
    /// Returns `None` if the pool could not be built.
    pub(super) fn run<I, T, C>(
        items: &[I],
        contexts: Vec<C>,
        work: impl Fn(&mut C, usize, &I) -> Result<T, Error> + Sync,
    ) -> Option<Result<Vec<T>, Error>>
    where
        I: Sync,
        T: Send,
        C: Send,
    {
        let workers = contexts.len();
        let pool = match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
            Ok(pool) => pool,
            Err(err) => {
                log::debug!("could not start {workers} workers, running on one thread: {err}");
                return None;
            }
        };

        let slice_len = items.len() / workers;
        let mut results: Vec<Option<Result<T, Error>>> = (0..items.len()).map(|_| None).collect();

        pool.scope(|scope| {
            let work = &work;
            let mut rest = items;
            let mut slots = results.as_mut_slice();
            let mut offset = 0;

            for (worker, mut ctx) in contexts.into_iter().enumerate() {
                let len = if worker + 1 == workers { rest.len() } else { slice_len };
                let (chunk, rest_items) = rest.split_at(len);
                let (chunk_slots, rest_slots) = mem::take(&mut slots).split_at_mut(len);
                rest = rest_items;
                slots = rest_slots;

                let start = offset;
                offset += len;
                scope.spawn(move |_| {
                    for (i, (item, slot)) in chunk.iter().zip(chunk_slots).enumerate() {
                        let result = work(&mut ctx, start + i, item);
                        let failed = result.is_err();
                        *slot = Some(result);
                        if failed {
                            break;
                        }
                    }
                });
            }
        });

        // Empty slots only follow an error of the same slice.
        Some(results.into_iter().flatten().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::worker_count;

    #[test]
    fn workers_never_exceed_items() {
        assert_eq!(worker_count(4, 10), 4);
        assert_eq!(worker_count(4, 3), 3);
        assert_eq!(worker_count(1, 3), 1);
        assert_eq!(worker_count(4, 0), 0);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn slices_keep_order() {
        let items: Vec<u32> = (0..11).collect();
        let result = super::pool::run(&items, vec![(); 3], |_, index, item| {
            assert_eq!(index as u32, *item);
            Ok(item * 2)
        });
        let doubled = result.unwrap().unwrap();
        assert_eq!(doubled, (0..11).map(|i| i * 2).collect::<Vec<_>>());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn first_error_wins() {
        let items: Vec<u32> = (0..8).collect();
        let result = super::pool::run(&items, vec![(); 4], |_, _, item| {
            if *item % 3 == 2 {
                Err(crate::Error::custom(item))
            } else {
                Ok(*item)
            }
        });
        let err = result.unwrap().unwrap_err();
        assert_eq!(err.to_string(), "2");
    }
}
