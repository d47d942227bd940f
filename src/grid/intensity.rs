use console::{style, StyledObject};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    Tier0,
    Tier1,
    Tier2,
    Tier3,
    Tier4,
    Tier5,
}

/// Decile buckets collapsed pairwise into tiers. Scanned top to bottom, first
/// match wins; anything unmatched is `Tier0`.
const TIERS: &[(&[i64], Tier)] = &[
    (&[1000, 900], Tier::Tier5),
    (&[800, 700], Tier::Tier4),
    (&[600, 500], Tier::Tier3),
    (&[400, 300], Tier::Tier2),
    (&[200, 100], Tier::Tier1),
];

/// Rounds `percentage` up to the next decile and scales it to `0..=1000`.
pub fn gradient(percentage: f64) -> i64 {
    ((percentage * 10.0).ceil() as i64).saturating_mul(100)
}

pub fn intensity_tier(percentage: f64) -> Tier {
    let gradient = gradient(percentage);
    TIERS
        .iter()
        .find(|(deciles, _)| deciles.contains(&gradient))
        .map(|&(_, tier)| tier)
        .unwrap_or(Tier::Tier0)
}

impl Tier {
    pub const ALL: [Tier; 6] = [
        Tier::Tier0,
        Tier::Tier1,
        Tier::Tier2,
        Tier::Tier3,
        Tier::Tier4,
        Tier::Tier5,
    ];

    pub fn level(self) -> u8 {
        self as u8
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Tier::Tier0 => "·",
            Tier::Tier1 => "▁",
            Tier::Tier2 => "▃",
            Tier::Tier3 => "▅",
            Tier::Tier4 => "▇",
            Tier::Tier5 => "█",
        }
    }

    pub fn styled(self) -> StyledObject<&'static str> {
        let glyph = style(self.glyph());
        match self {
            Tier::Tier0 => glyph.dim(),
            Tier::Tier1 => glyph.cyan(),
            Tier::Tier2 => glyph.blue(),
            Tier::Tier3 => glyph.blue().bright(),
            Tier::Tier4 => glyph.blue().bold(),
            Tier::Tier5 => glyph.magenta().bold(),
        }
    }
}
