use std::cell::Cell;

use decorum::N64;

/// This trait is used to control something that can return a score from a game state
///
/// Higher scores are better for the player. We use this trait to be able to layer in different
/// scoring approaches, such as counting how often we score.
pub trait Scorable<GameType> {
    /// Convert the given game into a score
    fn score(&self, game: &GameType) -> N64;
}

impl<GameType, FnLike: Fn(&GameType) -> N64> Scorable<GameType> for FnLike {
    fn score(&self, game: &GameType) -> N64 {
        (self)(game)
    }
}

#[derive(Debug)]
/// Counts the number of times the wrapped [Scorable] is asked for a score
///
/// The search agents wrap their scoring function in one of these for every search so that they
/// can report how many leaves they evaluated.
pub struct CountedScore<'scorer, ScorableType: ?Sized> {
    scorable: &'scorer ScorableType,
    calls: Cell<usize>,
}

impl<'scorer, ScorableType: ?Sized> CountedScore<'scorer, ScorableType> {
    /// Wrap the given scorer with a fresh count
    pub fn new(scorable: &'scorer ScorableType) -> Self {
        Self {
            scorable,
            calls: Cell::new(0),
        }
    }

    /// How many scores have been produced so far
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl<'scorer, GameType, ScorableType> Scorable<GameType> for CountedScore<'scorer, ScorableType>
where
    ScorableType: Scorable<GameType> + ?Sized,
{
    fn score(&self, game: &GameType) -> N64 {
        self.calls.set(self.calls.get() + 1);
        self.scorable.score(game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_is_scorable() {
        let double = |x: &i32| N64::from(f64::from(*x) * 2.0);

        assert_eq!(double.score(&4), N64::from(8.0));
    }

    #[test]
    fn test_counted_score_counts_every_call() {
        let constant = |_: &()| N64::from(1.5);
        let counted = CountedScore::new(&constant);

        assert_eq!(counted.calls(), 0);

        for _ in 0..3 {
            assert_eq!(counted.score(&()), N64::from(1.5));
        }

        assert_eq!(counted.calls(), 3);
    }
}
