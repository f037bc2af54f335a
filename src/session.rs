//! Selection state for one user session
//!
//! Three steps: pick a first item, pick a second item, show the thirds of
//! the chosen pair. Each viewer owns its own `Session`; nothing here is
//! shared. Transitions that do not apply to the current step are ignored
//! and report `false`.

use crate::index::Indexes;

/// Current step with the selections it requires
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Step {
    #[default]
    PickFirst,
    PickSecond {
        first: String,
    },
    ShowTriples {
        first: String,
        second: String,
    },
}

impl Step {
    /// Step number, 1 to 3
    pub fn number(&self) -> u8 {
        match self {
            Step::PickFirst => 1,
            Step::PickSecond { .. } => 2,
            Step::ShowTriples { .. } => 3,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    step: Step,
    copy_box_visible: bool,
    copy_text: String,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> &Step {
        &self.step
    }

    pub fn first(&self) -> Option<&str> {
        match &self.step {
            Step::PickFirst => None,
            Step::PickSecond { first } | Step::ShowTriples { first, .. } => Some(first.as_str()),
        }
    }

    pub fn second(&self) -> Option<&str> {
        match &self.step {
            Step::ShowTriples { second, .. } => Some(second.as_str()),
            _ => None,
        }
    }

    pub fn copy_box_visible(&self) -> bool {
        self.copy_box_visible
    }

    pub fn copy_text(&self) -> &str {
        &self.copy_text
    }

    /// Move to `step`, dropping any pending copy box
    fn go(&mut self, step: Step) {
        tracing::debug!(from = self.step.number(), to = step.number(), "Step change");
        self.step = step;
        self.copy_box_visible = false;
        self.copy_text.clear();
    }

    /// Choose the first item. Only valid while picking the first item.
    pub fn select_first(&mut self, value: &str) -> bool {
        if self.step != Step::PickFirst {
            tracing::debug!(step = self.step.number(), "select_first ignored");
            return false;
        }
        tracing::info!(first = value, "First item selected");
        self.go(Step::PickSecond {
            first: value.to_string(),
        });
        true
    }

    /// Choose the second item. Only valid while picking the second item.
    pub fn select_second(&mut self, value: &str) -> bool {
        let Step::PickSecond { first } = &self.step else {
            tracing::debug!(step = self.step.number(), "select_second ignored");
            return false;
        };
        tracing::info!(first = %first, second = value, "Second item selected");
        let first = first.clone();
        self.go(Step::ShowTriples {
            first,
            second: value.to_string(),
        });
        true
    }

    /// Go back one step. Ignored on the first step.
    pub fn back(&mut self) -> bool {
        let previous = match &self.step {
            Step::PickFirst => {
                tracing::debug!("back ignored on first step");
                return false;
            }
            Step::PickSecond { .. } => Step::PickFirst,
            Step::ShowTriples { first, .. } => Step::PickSecond {
                first: first.clone(),
            },
        };
        self.go(previous);
        true
    }

    /// Thirds of the selected pair, sorted. `None` before a pair is chosen.
    pub fn thirds(&self, indexes: &Indexes) -> Option<Vec<String>> {
        match &self.step {
            Step::ShowTriples { first, second } => Some(indexes.thirds_sorted(first, second)),
            _ => None,
        }
    }

    /// Fill the copy box with the listing of the current pair.
    ///
    /// Only valid on the last step, and only when the pair has thirds.
    pub fn request_copy(&mut self, indexes: &Indexes) -> bool {
        let Step::ShowTriples { first, second } = &self.step else {
            tracing::debug!(step = self.step.number(), "request_copy ignored");
            return false;
        };

        let thirds = indexes.thirds_sorted(first, second);
        if thirds.is_empty() {
            tracing::debug!(first = %first, second = %second, "Nothing to copy");
            return false;
        }

        self.copy_text = copy_listing(first, second, &thirds);
        self.copy_box_visible = true;
        tracing::info!(lines = thirds.len(), "Copy text prepared");
        true
    }
}

/// Tab-separated `first second third` lines, one per third
pub fn copy_listing(first: &str, second: &str, thirds: &[String]) -> String {
    thirds
        .iter()
        .map(|third| format!("{}\t{}\t{}", first, second, third))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, Triple};
    use crate::color::HexColor;

    fn indexes() -> Indexes {
        let row = |a: &str, b: &str, c: &str| Triple {
            first: a.to_string(),
            second: b.to_string(),
            third: c.to_string(),
            color_first: HexColor::default(),
            color_second: HexColor::default(),
            color_third: HexColor::default(),
        };
        // Thyme listed first to check the copy text is sorted
        Indexes::build(&Catalog::new(vec![
            row("Lemon", "Mint", "Thyme"),
            row("Lemon", "Mint", "Basil"),
            row("Lemon", "Ginger", "Basil"),
        ]))
    }

    #[test]
    fn test_initial_state() {
        let session = Session::new();
        assert_eq!(session.step(), &Step::PickFirst);
        assert_eq!(session.step().number(), 1);
        assert_eq!(session.first(), None);
        assert_eq!(session.second(), None);
        assert!(!session.copy_box_visible());
        assert_eq!(session.copy_text(), "");
    }

    #[test]
    fn test_select_and_back() {
        let mut session = Session::new();
        assert!(session.select_first("Lemon"));
        assert_eq!(session.step().number(), 2);
        assert_eq!(session.first(), Some("Lemon"));

        assert!(session.back());
        assert_eq!(session.step(), &Step::PickFirst);
        assert_eq!(session.first(), None);
    }

    #[test]
    fn test_full_walk_and_copy() {
        let idx = indexes();
        let mut session = Session::new();
        session.select_first("Lemon");
        session.select_second("Mint");
        assert_eq!(
            session.step(),
            &Step::ShowTriples {
                first: "Lemon".to_string(),
                second: "Mint".to_string()
            }
        );

        assert!(session.request_copy(&idx));
        assert!(session.copy_box_visible());
        assert_eq!(session.copy_text(), "Lemon\tMint\tBasil\nLemon\tMint\tThyme");
    }

    #[test]
    fn test_back_from_triples_keeps_first() {
        let idx = indexes();
        let mut session = Session::new();
        session.select_first("Lemon");
        session.select_second("Mint");
        session.request_copy(&idx);

        assert!(session.back());
        assert_eq!(session.step().number(), 2);
        assert_eq!(session.first(), Some("Lemon"));
        assert_eq!(session.second(), None);
        assert!(!session.copy_box_visible());
        assert_eq!(session.copy_text(), "");
    }

    #[test]
    fn test_invalid_transitions_are_ignored() {
        let idx = indexes();
        let mut session = Session::new();
        assert!(!session.back());
        assert!(!session.select_second("Mint"));
        assert!(!session.request_copy(&idx));
        assert_eq!(session, Session::new());

        session.select_first("Lemon");
        let before = session.clone();
        assert!(!session.select_first("Orange"));
        assert!(!session.request_copy(&idx));
        assert_eq!(session, before);

        session.select_second("Mint");
        assert!(!session.select_second("Ginger"));
        assert_eq!(session.second(), Some("Mint"));
    }

    #[test]
    fn test_empty_pair_has_no_copy() {
        let idx = indexes();
        let mut session = Session::new();
        session.select_first("Lemon");
        session.select_second("Dill");
        assert_eq!(session.thirds(&idx), Some(vec![]));
        assert!(!session.request_copy(&idx));
        assert!(!session.copy_box_visible());
        assert_eq!(session.copy_text(), "");
    }

    #[test]
    fn test_thirds_before_pair() {
        let session = Session::new();
        assert_eq!(session.thirds(&indexes()), None);
    }

    #[test]
    fn test_copy_listing() {
        let thirds = vec!["Basil".to_string()];
        assert_eq!(copy_listing("Lemon", "Ginger", &thirds), "Lemon\tGinger\tBasil");
        assert_eq!(copy_listing("Lemon", "Ginger", &[]), "");
    }
}
