use derive_getters::{Dissolve, Getters};
use derive_more::{Constructor, Display};

use crate::Error;
use crate::pairwise::scoring::Score;
use crate::pairwise::Solution;

/// Opaque identifier of an alignment instance within a scheduler call.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Display, Constructor)]
#[display("#{_0}")]
pub struct InstanceId(usize);

impl InstanceId {
    /// Position of the instance in the submitted job list.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Final state of an instance without the payload.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Status {
    Done,
    Cancelled,
    Failed,
}

#[derive(Clone, PartialEq, Debug)]
pub enum Outcome<S: Score> {
    Done(Solution<S>),
    Cancelled,
    Failed(Error),
}

impl<S: Score> Outcome<S> {
    pub fn status(&self) -> Status {
        match self {
            Outcome::Done(_) => Status::Done,
            Outcome::Cancelled => Status::Cancelled,
            Outcome::Failed(_) => Status::Failed,
        }
    }

    pub fn solution(&self) -> Option<&Solution<S>> {
        match self {
            Outcome::Done(solution) => Some(solution),
            _ => None,
        }
    }
}

impl<S: Score> From<Result<Solution<S>, Error>> for Outcome<S> {
    fn from(value: Result<Solution<S>, Error>) -> Self {
        match value {
            Ok(solution) => Outcome::Done(solution),
            Err(err) => Outcome::Failed(err),
        }
    }
}

#[derive(Clone, PartialEq, Debug, Getters, Dissolve, Constructor)]
pub struct Report<S: Score> {
    id: InstanceId,
    outcome: Outcome<S>,
}
