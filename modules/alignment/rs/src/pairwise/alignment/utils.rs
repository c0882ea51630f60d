use crate::Alignable;
use crate::pairwise::scoring::{self, equiv};
use crate::pairwise::{Op, Step};

/// Split diagonal runs into match/mismatch/equivalent runs according to the scheme's classifier.
/// `seq1offset` and `seq2offset` are the coordinates of the first step.
pub fn disambiguate<Scheme, Seq1, Seq2>(
    steps: Vec<Step<usize>>,
    scheme: &Scheme,
    seq1: &Seq1,
    seq1offset: usize,
    seq2: &Seq2,
    seq2offset: usize,
) -> Vec<Step<usize>>
where
    Scheme: scoring::Scheme + ?Sized,
    Seq1: Alignable<Symbol = <Scheme as scoring::Scheme>::Symbol> + ?Sized,
    Seq2: Alignable<Symbol = <Scheme as scoring::Scheme>::Symbol> + ?Sized,
{
    let (mut s1, mut s2) = (seq1offset, seq2offset);
    let mut result: Vec<Step<usize>> = Vec::with_capacity(steps.len() * 2);
    let mut push = |op: Op, len: usize| match result.last_mut() {
        Some(last) if *last.op() == op => *last = Step::from_parts(op, last.length() + len),
        _ => result.push(Step::from_parts(op, len)),
    };

    for step in steps {
        let len = step.length();
        if !step.op().is_diagonal() {
            step.op().apply(&mut s1, &mut s2, len);
            push(*step.op(), len);
            continue;
        }

        let mut current = classify(scheme, seq1.at(s1), seq2.at(s2));
        let mut run = 0;
        for _ in 0..len {
            let op = classify(scheme, seq1.at(s1), seq2.at(s2));
            if op != current {
                push(current, run);
                current = op;
                run = 0;
            }
            run += 1;
            s1 += 1;
            s2 += 1;
        }
        push(current, run);
    }
    result
}

#[inline(always)]
fn classify<Scheme: scoring::Scheme + ?Sized>(
    scheme: &Scheme,
    s1: &<Scheme as scoring::Scheme>::Symbol,
    s2: &<Scheme as scoring::Scheme>::Symbol,
) -> Op {
    <Scheme as equiv::Classifier>::classify(scheme, s1, s2).into()
}
