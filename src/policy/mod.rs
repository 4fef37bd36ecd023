//! Decision policies for peer-side participants.

pub mod random;

pub use random::RandomPolicy;

/// Chooses one action out of the legal set for a given state.
///
/// Returning `None` means the policy declines to act (e.g. the legal set was
/// empty); the participant loop treats that as fatal.
pub trait Policy<S, A> {
    fn choose(&mut self, state: &S, legal: &[A]) -> Option<A>;
}

/// Always picks the first listed legal action. Deterministic, mainly useful
/// for driving scripted games in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstChoicePolicy;

impl<S, A: Clone> Policy<S, A> for FirstChoicePolicy {
    fn choose(&mut self, _state: &S, legal: &[A]) -> Option<A> {
        legal.first().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_choice_takes_head_of_legal_set() {
        let mut policy = FirstChoicePolicy;
        assert_eq!(policy.choose(&(), &[3, 1, 2]), Some(3));
        assert_eq!(policy.choose(&(), &Vec::<i32>::new()), None);
    }
}
