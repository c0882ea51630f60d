use std::borrow::Borrow;
use std::fmt::Display;

use derive_getters::{Dissolve, Getters};
use derive_more::{Constructor, From, Into};
use eyre::{eyre, Result};

use seqalign_core_rs::num::RunLength;

use super::offset::Offset;
use super::op::Op;

/// An alignment step: a run of identical operations
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Getters, Dissolve)]
pub struct Step<Len: RunLength> {
    /// The length of the operation, e.g. the number of consequent matches or gaps.
    /// Guaranteed to be greater than zero.
    len: Len,
    /// The alignment operation
    op: Op,
}

impl<Len: RunLength> Step<Len> {
    pub fn new(op: Op, len: Len) -> Result<Self> {
        if len.is_zero() {
            return Err(eyre!("Step length must be greater than zero"));
        }
        Ok(Self { len, op })
    }

    /// Build a step from a length known to be non-zero.
    #[inline(always)]
    pub(crate) fn from_parts(op: Op, len: Len) -> Self {
        debug_assert!(!len.is_zero());
        Self { len, op }
    }

    /// Length of the run as `usize`.
    #[inline(always)]
    pub fn length(&self) -> usize {
        self.len.as_usize()
    }

    /// Merge adjacent runs of the same operation in place.
    /// A merged run that doesn't fit into `Len` is split into a saturated run and the remainder.
    pub fn collapse(steps: &mut Vec<Step<Len>>) {
        let mut write = 0;
        for read in 1..steps.len() {
            let next = steps[read];
            if steps[write].op != next.op {
                write += 1;
                steps[write] = next;
                continue;
            }

            match steps[write].len.checked_add(&next.len) {
                Some(len) => steps[write].len = len,
                None => {
                    let room = Len::max_value() - steps[write].len;
                    steps[write].len = Len::max_value();
                    write += 1;
                    steps[write] = Step {
                        len: next.len - room,
                        op: next.op,
                    };
                }
            }
        }
        steps.truncate((write + 1).min(steps.len()));
    }

    /// Convert runs to another length type, merging adjacent runs of the same operation
    /// and splitting runs that don't fit into the target type.
    pub fn repack<Target: RunLength>(
        steps: impl IntoIterator<Item: Borrow<Step<Len>>>,
    ) -> Vec<Step<Target>> {
        let mut runs: Vec<(Op, usize)> = Vec::new();
        for step in steps {
            let step = step.borrow();
            match runs.last_mut() {
                Some((op, len)) if *op == step.op => *len += step.length(),
                _ => runs.push((step.op, step.length())),
            }
        }

        let mut result = Vec::with_capacity(runs.len());
        for (op, mut len) in runs {
            while len > 0 {
                let chunk = Target::saturating_from(len);
                result.push(Step { len: chunk, op });
                len -= chunk.as_usize();
            }
        }
        result
    }

    pub fn rle_string(steps: impl Iterator<Item: Borrow<Step<Len>>>) -> String
    where
        Len: Display,
    {
        // 2 symbols is an average length of a step
        // 1 is the length of the symbol
        let hint = match steps.size_hint() {
            (_, Some(upper)) => upper * 3,
            (lower, _) => lower * 3,
        };

        let mut result = String::with_capacity(hint);
        for step in steps {
            let step = step.borrow();
            result.push_str(&step.len().to_string());
            result.push(step.op().symbol());
        }
        result
    }

    /// Parse the RLE representation produced by [`Step::rle_string`], e.g. `3=1X2v`.
    pub fn parse_rle(rle: &str) -> Result<Vec<Step<Len>>> {
        let mut steps = Vec::new();
        let mut digits = 0..0;
        for (ind, symbol) in rle.char_indices() {
            if symbol.is_ascii_digit() {
                if digits.is_empty() {
                    digits = ind..ind;
                }
                digits.end = ind + 1;
                continue;
            }

            let op = Op::try_from(symbol)
                .map_err(|_| eyre!("Unknown alignment operation '{symbol}' in {rle}"))?;
            if digits.is_empty() {
                return Err(eyre!("Missing run length before '{symbol}' in {rle}"));
            }
            let len = <Len as ::num::Num>::from_str_radix(&rle[digits.clone()], 10)
                .map_err(|_| eyre!("Invalid run length {} in {rle}", &rle[digits.clone()]))?;
            steps.push(Step::new(op, len)?);
            digits = 0..0;
        }

        if !digits.is_empty() {
            return Err(eyre!("Dangling run length at the end of {rle}"));
        }
        Ok(steps)
    }
}

/// A tracked alignment step with known start position (offset) in the sequence coordinates
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Getters, Dissolve, Constructor, From, Into)]
pub struct StepWithOffset<Len: RunLength> {
    pub step: Step<Len>,
    pub start: Offset,
}

impl<Len: RunLength> StepWithOffset<Len> {
    /// Get the end position of the step in sequence coordinates (e.g. the alignment position after applying the step)
    pub fn end(&self) -> Offset {
        self.start.apply(&self.step)
    }
}

/// Attach start offsets to consecutive steps, starting from `offset`.
pub fn track<'a, Len, I>(
    steps: I,
    mut offset: Offset,
) -> impl Iterator<Item = StepWithOffset<Len>> + 'a
where
    Len: RunLength + 'a,
    I: IntoIterator<Item = &'a Step<Len>>,
    I::IntoIter: 'a,
{
    steps.into_iter().map(move |step| {
        let tracked = StepWithOffset::new(*step, offset);
        offset = tracked.end();
        tracked
    })
}
