pub mod cabinet;
pub mod catalog;
pub mod perfume;
pub mod stage;

use clap::ValueEnum;

/// Which of the two pages is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Page {
    Cabinet,
    Perfume,
}

impl Page {
    pub fn toggled(self) -> Self {
        match self {
            Page::Cabinet => Page::Perfume,
            Page::Perfume => Page::Cabinet,
        }
    }
}
