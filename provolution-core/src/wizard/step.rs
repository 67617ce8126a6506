use super::field::Category;

/// The five wizard pages, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Housing,
    Mobility,
    Nutrition,
    Consumption,
    Result,
}

impl Step {
    pub const ALL: [Step; 5] = [
        Step::Housing,
        Step::Mobility,
        Step::Nutrition,
        Step::Consumption,
        Step::Result,
    ];

    pub const TERMINAL: Step = Step::Result;

    pub fn index(&self) -> usize {
        match self {
            Self::Housing => 0,
            Self::Mobility => 1,
            Self::Nutrition => 2,
            Self::Consumption => 3,
            Self::Result => 4,
        }
    }

    pub fn at(index: usize) -> Option<Step> {
        Self::ALL.get(index).copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Housing => "housing",
            Self::Mobility => "mobility",
            Self::Nutrition => "nutrition",
            Self::Consumption => "consumption",
            Self::Result => "result",
        }
    }

    /// Progress bar label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Housing => "Housing",
            Self::Mobility => "Mobility",
            Self::Nutrition => "Nutrition",
            Self::Consumption => "Consumption",
            Self::Result => "Result",
        }
    }

    pub fn is_terminal(&self) -> bool {
        *self == Self::TERMINAL
    }

    /// The answer category edited on this page; `None` for the result page.
    pub fn category(&self) -> Option<Category> {
        match self {
            Self::Housing => Some(Category::Housing),
            Self::Mobility => Some(Category::Mobility),
            Self::Nutrition => Some(Category::Nutrition),
            Self::Consumption => Some(Category::Consumption),
            Self::Result => None,
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn index_and_at_agree() {
        for (i, step) in Step::ALL.iter().enumerate() {
            assert_eq!(step.index(), i);
            assert_eq!(Step::at(i), Some(*step));
        }
        assert_eq!(Step::at(Step::ALL.len()), None);
    }

    #[test]
    fn only_result_is_terminal() {
        let terminal: Vec<_> = Step::ALL.iter().filter(|s| s.is_terminal()).collect();
        assert_eq!(terminal, vec![&Step::Result]);
    }
}
