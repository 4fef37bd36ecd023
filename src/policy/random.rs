//! Uniform random decision policy.

use rand::seq::IndexedRandom;

use crate::policy::Policy;

/// Picks uniformly at random among the legal actions.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPolicy;

impl RandomPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl<S, A: Clone> Policy<S, A> for RandomPolicy {
    fn choose(&mut self, _state: &S, legal: &[A]) -> Option<A> {
        legal.choose(&mut rand::rng()).cloned()
    }
}
