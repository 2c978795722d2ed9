//! Resolving many paths in one pass over a document.
//!
//! Paths are tracked as bits of a `u64`. While walking a container, each
//! member is tested against the selectors of the paths still active at that
//! depth; paths that end at the member are reported, paths that continue
//! descend into it together. Larger path sets are processed 64 at a time.

use core::ops::ControlFlow;

use crate::{
    Error, ScanOptions, Selector, SyntaxError, Value,
    cursor::{Cursor, member_key},
    navigator::key_matches,
    scanner,
    scanner::skip_whitespace,
};

const LANES: usize = u64::BITS as usize;

/// Reports the value of every path that resolves, with the index of the
/// path in `paths`. A path that is absent, or that continues past a scalar,
/// is silently left out. Duplicate paths are each reported.
pub(crate) fn for_each_path<'a, F>(
    buf: &'a [u8],
    paths: &[&[Selector<'_>]],
    options: ScanOptions,
    mut visit: F,
) -> Result<(), Error>
where
    F: FnMut(usize, Value<'a>) -> ControlFlow<()>,
{
    for (chunk_index, chunk) in paths.chunks(LANES).enumerate() {
        let mut walk = Walk {
            buf,
            paths: chunk,
            base: chunk_index * LANES,
            options,
            pending: lanes(chunk.len()),
            visit: &mut visit,
        };
        if walk.run()?.is_break() {
            break;
        }
    }
    Ok(())
}

fn lanes(n: usize) -> u64 {
    if n >= LANES { u64::MAX } else { (1u64 << n) - 1 }
}

/// Iterates the set bits of `mask`, lowest first.
fn bits(mut mask: u64) -> impl Iterator<Item = usize> {
    core::iter::from_fn(move || {
        if mask == 0 {
            return None;
        }
        let lane = mask.trailing_zeros() as usize;
        mask &= mask - 1;
        Some(lane)
    })
}

struct Walk<'a, 'p, 'v, F> {
    buf: &'a [u8],
    paths: &'v [&'v [Selector<'p>]],
    base: usize,
    options: ScanOptions,
    pending: u64,
    visit: &'v mut F,
}

impl<'a, F> Walk<'a, '_, '_, F>
where
    F: FnMut(usize, Value<'a>) -> ControlFlow<()>,
{
    fn run(&mut self) -> Result<ControlFlow<()>, Error> {
        let mut roots = 0;
        let mut nested = 0;
        for lane in bits(self.pending) {
            if self.paths[lane].is_empty() {
                roots |= 1 << lane;
            } else {
                nested |= 1 << lane;
            }
        }

        if roots != 0 {
            let value = scanner::locate(self.buf, 0, self.options)?;
            if self.report(roots, value).is_break() {
                return Ok(ControlFlow::Break(()));
            }
        }
        if nested == 0 {
            return Ok(ControlFlow::Continue(()));
        }
        Ok(match self.descend(0, 0, nested)? {
            Step::Stop => ControlFlow::Break(()),
            Step::Resolved | Step::Resume(_) => ControlFlow::Continue(()),
        })
    }

    /// Walks the container at or after `pos` with the `active` paths, all of
    /// which have a selector at `depth`.
    fn descend(&mut self, pos: usize, depth: usize, active: u64) -> Result<Step, Error> {
        let buf = self.buf;
        let pos = skip_whitespace(buf, pos);
        let is_object = match buf.get(pos) {
            Some(b'{') => true,
            Some(b'[') => false,
            Some(_) => {
                let scalar = scanner::locate(buf, pos, self.options)?;
                return Ok(Step::Resume(scalar.end()));
            }
            None => return Err(Error::malformed(buf.len(), SyntaxError::UnexpectedEndOfInput)),
        };

        let mut active = active;
        let mut cursor = Cursor::open(buf, pos, self.options);
        let mut index = 0;
        while let Some(member) = cursor.next_start()? {
            let (matched, value_at) = if is_object {
                let (key, value_at) = member_key(buf, member)?;
                let matched = self.matching(active, depth, |selector| {
                    selector.as_key().is_some_and(|k| key_matches(key.raw(), k))
                });
                (matched, value_at)
            } else {
                let matched = self.matching(active, depth, |selector| {
                    selector.as_index() == Some(index)
                });
                (matched, member)
            };
            index += 1;

            if matched == 0 {
                let skipped = scanner::locate(buf, value_at, self.options)?;
                cursor.resume_at(skipped.end());
                continue;
            }
            // The first of several equal keys wins.
            active &= !matched;

            let (finished, deeper) = self.split_finished(matched, depth);
            let mut end = None;
            if finished != 0 {
                let value = scanner::locate(buf, value_at, self.options)?;
                if self.report(finished, value).is_break() {
                    return Ok(Step::Stop);
                }
                end = Some(value.end());
            }
            if deeper != 0 {
                match self.descend(value_at, depth + 1, deeper)? {
                    Step::Resume(at) => end = Some(at),
                    done => return Ok(done),
                }
            }
            if self.pending == 0 {
                return Ok(Step::Resolved);
            }
            if let Some(end) = end {
                cursor.resume_at(end);
            }
        }
        Ok(Step::Resume(cursor.position()))
    }

    fn matching(&self, active: u64, depth: usize, test: impl Fn(&Selector<'_>) -> bool) -> u64 {
        bits(active)
            .filter(|&lane| test(&self.paths[lane][depth]))
            .fold(0, |mask, lane| mask | (1 << lane))
    }

    /// Splits `matched` into the paths that end at `depth` and those that
    /// continue below it.
    fn split_finished(&self, matched: u64, depth: usize) -> (u64, u64) {
        let finished = bits(matched)
            .filter(|&lane| self.paths[lane].len() == depth + 1)
            .fold(0, |mask, lane| mask | (1 << lane));
        (finished, matched & !finished)
    }

    fn report(&mut self, lanes: u64, value: Value<'a>) -> ControlFlow<()> {
        for lane in bits(lanes) {
            self.pending &= !(1 << lane);
            if (self.visit)(self.base + lane, value).is_break() {
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }
}

enum Step {
    /// Walking continues at this offset.
    Resume(usize),
    /// Every path of the chunk resolved.
    Resolved,
    /// The visitor asked to stop.
    Stop,
}
