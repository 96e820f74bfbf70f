// Result categories: the three standards every question is checked against.

use std::fmt;

/// One of the three fixed result kinds.
///
/// The declaration order is the display order: enterprise, industry,
/// international.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Enterprise,
    Industry,
    International,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 3] = [
        Category::Enterprise,
        Category::Industry,
        Category::International,
    ];

    /// Label shown as the result panel title.
    pub fn label(self) -> &'static str {
        match self {
            Category::Enterprise => "企业标准",
            Category::Industry => "行业标准",
            Category::International => "国际标准",
        }
    }

    /// Stable ASCII key used in logs.
    pub fn key(self) -> &'static str {
        match self {
            Category::Enterprise => "enterprise",
            Category::Industry => "industry",
            Category::International => "international",
        }
    }

    /// Position in display order.
    pub fn index(self) -> usize {
        match self {
            Category::Enterprise => 0,
            Category::Industry => 1,
            Category::International => 2,
        }
    }

    /// The next category in display order, wrapping around.
    pub fn next(self) -> Category {
        Category::ALL[(self.index() + 1) % Category::ALL.len()]
    }

    /// The previous category in display order, wrapping around.
    pub fn prev(self) -> Category {
        let len = Category::ALL.len();
        Category::ALL[(self.index() + len - 1) % len]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
