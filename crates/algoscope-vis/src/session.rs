//! One user's selection, dataset and loaded animation.

use algoscope_core::{input, Algorithm, Dataset, Dispatcher, Family, Step};
use tracing::info;

use crate::config::VisConfig;
use crate::error::{Error, Result};
use crate::playback::Player;

/// Selected family and algorithm, the dataset they run on, and the player
/// holding the generated steps.
pub struct Session {
    family: Family,
    algorithm: Algorithm,
    dataset: Dataset,
    dispatcher: Dispatcher,
    player: Player,
}

impl Session {
    /// Start on the sorting family with fresh data.
    pub fn new(config: &VisConfig) -> Self {
        let mut dispatcher = match config.seed {
            Some(seed) => Dispatcher::seeded(seed),
            None => Dispatcher::from_entropy(),
        };
        let family = Family::Sorting;
        let dataset = Dataset::generate(family, dispatcher.rng_mut());
        let mut session = Self {
            family,
            algorithm: family.default_algorithm(),
            dataset,
            dispatcher,
            player: Player::new(config.speed, config.speed_range, config.max_period),
        };
        session.regenerate();
        session
    }

    pub fn family(&self) -> Family {
        self.family
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// `None` means the animation has not started.
    pub fn current_step(&self) -> Option<&Step> {
        self.player.current_step()
    }

    /// Switch family, selecting its default algorithm on fresh data.
    pub fn select_family(&mut self, family: Family) {
        info!(%family, "family selected");
        self.family = family;
        self.algorithm = family.default_algorithm();
        self.new_data();
    }

    /// Switch algorithm within the current family, keeping the dataset.
    pub fn select_algorithm(&mut self, algorithm: Algorithm) -> Result<()> {
        if algorithm.family() != self.family {
            return Err(Error::FamilyMismatch {
                subject: algorithm.name().to_string(),
                family: self.family,
            });
        }
        info!(%algorithm, "algorithm selected");
        self.algorithm = algorithm;
        self.regenerate();
        Ok(())
    }

    /// Replace the dataset with a random one for the current family.
    pub fn new_data(&mut self) {
        self.dataset = Dataset::generate(self.family, self.dispatcher.rng_mut());
        self.regenerate();
    }

    /// Use a custom comma-separated array. Invalid input leaves the session unchanged.
    pub fn set_custom_array(&mut self, raw: &str) -> Result<()> {
        if !matches!(self.family, Family::Sorting | Family::Searching) {
            return Err(Error::FamilyMismatch {
                subject: "A custom array".into(),
                family: self.family,
            });
        }
        let values = input::parse_array(raw)?;
        info!(len = values.len(), "custom array loaded");
        self.dataset = Dataset::Array(values);
        self.regenerate();
        Ok(())
    }

    /// Use a custom text and pattern. Invalid input leaves the session unchanged.
    pub fn set_custom_strings(&mut self, text: &str, pattern: &str) -> Result<()> {
        if self.family != Family::StringSearching {
            return Err(Error::FamilyMismatch {
                subject: "Custom text".into(),
                family: self.family,
            });
        }
        let problem = input::parse_text_problem(text, pattern)?;
        info!(pattern = %problem.pattern, "custom strings loaded");
        self.dataset = Dataset::Text(problem);
        self.regenerate();
        Ok(())
    }

    fn regenerate(&mut self) {
        let steps = self.dispatcher.generate(self.algorithm, &self.dataset);
        info!(algorithm = self.algorithm.id(), steps = steps.len(), "steps loaded");
        self.player.load(steps);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::PlaybackState;

    fn session() -> Session {
        Session::new(&VisConfig::default().with_seed(11))
    }

    #[test]
    fn starts_on_sorting() {
        let session = session();
        assert_eq!(session.family(), Family::Sorting);
        assert_eq!(session.algorithm(), Algorithm::BubbleSort);
        assert_eq!(session.player().state(), PlaybackState::Ready);
        assert!(session.current_step().is_some());
    }

    #[test]
    fn family_switch_picks_default_and_fresh_data() {
        let mut session = session();
        session.select_family(Family::Graph);
        assert_eq!(session.algorithm(), Algorithm::Dijkstra);
        assert!(matches!(session.dataset(), Dataset::Graph(_)));
        assert!(session.current_step().unwrap().as_graph().is_some());
    }

    #[test]
    fn algorithm_from_another_family_is_rejected() {
        let mut session = session();
        let err = session.select_algorithm(Algorithm::Prim).unwrap_err();
        assert!(matches!(err, Error::FamilyMismatch { .. }));
        assert_eq!(session.algorithm(), Algorithm::BubbleSort);
    }

    #[test]
    fn algorithm_switch_keeps_dataset() {
        let mut session = session();
        let before = session.dataset().clone();
        session.select_algorithm(Algorithm::QuickSort).unwrap();
        assert_eq!(session.dataset(), &before);
        assert_eq!(session.algorithm(), Algorithm::QuickSort);
    }

    #[test]
    fn custom_array_replaces_data() {
        let mut session = session();
        session.set_custom_array("5, 3, 8, 1").unwrap();
        assert_eq!(session.dataset(), &Dataset::Array(vec![5, 3, 8, 1]));
        let last = session.player().steps().last().unwrap();
        assert_eq!(last.as_array().unwrap().values, vec![1, 3, 5, 8]);
    }

    #[test]
    fn invalid_custom_array_changes_nothing() {
        let mut session = session();
        let before = session.dataset().clone();
        let generation = session.player().generation();
        assert!(session.set_custom_array("a, b").is_err());
        assert_eq!(session.dataset(), &before);
        assert_eq!(session.player().generation(), generation);
    }

    #[test]
    fn custom_strings_need_string_family() {
        let mut session = session();
        assert!(session.set_custom_strings("ABRA", "AB").is_err());

        session.select_family(Family::StringSearching);
        session.set_custom_strings("ABACADABRACADABRA", "ABRA").unwrap();
        let last = session.player().steps().last().unwrap();
        assert_eq!(last.message(), "Pattern found at index 6.");
    }

    #[test]
    fn seeded_sessions_agree() {
        let a = session();
        let b = session();
        assert_eq!(a.dataset(), b.dataset());
        assert_eq!(a.player().steps(), b.player().steps());
    }
}
