use std::path::Path;

use crate::error::Result;
use crate::models::{Benefit, BenefitDefinition, CardTheme, CreditCard, ResetPeriod};
use crate::settings::Settings;

use crate::models::ResetPeriod::{Annually, Monthly, SemiAnnually};

struct BenefitSeed {
    id: &'static str,
    name: &'static str,
    amount: f64,
    period: ResetPeriod,
    description: &'static str,
    keywords: &'static [&'static str],
}

struct CardSeed {
    id: &'static str,
    name: &'static str,
    display_name: &'static str,
    issuer: &'static str,
    annual_fee: f64,
    colors: (&'static str, &'static str),
    benefits: &'static [BenefitSeed],
}

const AMEX_GOLD: &[BenefitSeed] = &[
    BenefitSeed {
        id: "dining",
        name: "Dining Credit",
        amount: 10.0,
        period: Monthly,
        description: "Grubhub, Cheesecake Factory, Goldbelly, Wine.com, Five Guys.",
        keywords: &["grubhub", "cheesecake factory", "goldbelly", "wine.com", "five guys"],
    },
    BenefitSeed {
        id: "uber",
        name: "Uber Cash",
        amount: 10.0,
        period: Monthly,
        description: "Uber Eats or Rides (must add card to Uber app).",
        keywords: &["uber", "uber eats", "uber trip"],
    },
    BenefitSeed {
        id: "resy",
        name: "Resy Credit",
        amount: 100.0,
        period: Annually,
        description: "U.S. Resy restaurants (2x $50 credits per year).",
        keywords: &["resy"],
    },
    BenefitSeed {
        id: "dunkin",
        name: "Dunkin' Credit",
        amount: 7.0,
        period: Monthly,
        description: "U.S. Dunkin' locations.",
        keywords: &["dunkin", "dunkin donuts"],
    },
    BenefitSeed {
        id: "hotel",
        name: "The Hotel Collection Credit",
        amount: 100.0,
        period: Annually,
        description: "The Hotel Collection credit for hotel stays.",
        keywords: &["the hotel collection"],
    },
    BenefitSeed {
        id: "other",
        name: "Other Credit",
        amount: 0.0,
        period: Annually,
        description: "Other credit for miscellaneous purchases.",
        keywords: &["other"],
    },
];

const AMEX_PLATINUM: &[BenefitSeed] = &[
    BenefitSeed {
        id: "uber",
        name: "Uber Cash",
        amount: 15.0,
        period: Monthly,
        description: "$15/month Uber Cash ($35 in December).",
        keywords: &["uber", "uber eats", "uber trip"],
    },
    BenefitSeed {
        id: "saks",
        name: "Saks Fifth Avenue",
        amount: 50.0,
        period: SemiAnnually,
        description: "$50 statement credit twice per year at Saks.",
        keywords: &["saks", "saks fifth avenue"],
    },
    BenefitSeed {
        id: "airline",
        name: "Airline Fee Credit",
        amount: 200.0,
        period: Annually,
        description: "Airline incidental fees with selected airline.",
        keywords: &[
            "delta",
            "united",
            "american airlines",
            "southwest",
            "jetblue",
            "bag fee",
            "seat selection",
        ],
    },
    BenefitSeed {
        id: "hotel",
        name: "Hotel Credit",
        amount: 200.0,
        period: Annually,
        description: "$200 prepaid hotel credit via Amex Travel.",
        keywords: &["amex travel", "hotel collection", "fine hotels"],
    },
    BenefitSeed {
        id: "entertainment",
        name: "Entertainment Credit",
        amount: 20.0,
        period: Monthly,
        description: "Digital entertainment services (streaming, news, etc).",
        keywords: &[
            "spotify",
            "peacock",
            "audible",
            "nyt",
            "new york times",
            "sirius",
            "disney+",
            "hulu",
        ],
    },
    BenefitSeed {
        id: "equinox",
        name: "Equinox Credit",
        amount: 25.0,
        period: Monthly,
        description: "Equinox and Equinox+ memberships.",
        keywords: &["equinox"],
    },
    BenefitSeed {
        id: "walmart",
        name: "Walmart+ Credit",
        amount: 12.95,
        period: Monthly,
        description: "Walmart+ membership credit.",
        keywords: &["walmart+", "walmart plus"],
    },
];

const CHASE_SAPPHIRE_RESERVE: &[BenefitSeed] = &[
    BenefitSeed {
        id: "travel",
        name: "Annual Travel Credit",
        amount: 300.0,
        period: Annually,
        description: "Automatic statement credit for travel purchases.",
        keywords: &[
            "airline",
            "hotel",
            "rental car",
            "taxi",
            "uber",
            "lyft",
            "parking",
            "tolls",
            "train",
            "cruise",
        ],
    },
    BenefitSeed {
        id: "doordash",
        name: "DoorDash DashPass",
        amount: 120.0,
        period: Annually,
        description: "Complimentary DashPass subscription after activation.",
        keywords: &["doordash", "dashpass"],
    },
    BenefitSeed {
        id: "lyft",
        name: "Lyft Credit",
        amount: 10.0,
        period: Monthly,
        description: "$10/month in Lyft ride credits (through March 2025).",
        keywords: &["lyft"],
    },
];

const CHASE_SAPPHIRE_PREFERRED: &[BenefitSeed] = &[BenefitSeed {
    id: "doordash",
    name: "DoorDash Benefits",
    amount: 60.0,
    period: Annually,
    description: "Annual DoorDash credits and complimentary DashPass.",
    keywords: &["doordash", "dashpass"],
}];

const CAPITAL_ONE_VENTURE_X: &[BenefitSeed] = &[
    BenefitSeed {
        id: "travel",
        name: "Annual Travel Credit",
        amount: 300.0,
        period: Annually,
        description: "Statement credit for travel booked through Capital One Travel.",
        keywords: &["capital one travel"],
    },
    BenefitSeed {
        id: "experienceCredit",
        name: "Experience Credit",
        amount: 100.0,
        period: Annually,
        description: "$100 credit for Capital One Entertainment experiences.",
        keywords: &["capital one entertainment", "vivid seats"],
    },
    BenefitSeed {
        id: "hertz",
        name: "Hertz President's Circle",
        amount: 0.0,
        period: Annually,
        description: "Complimentary Hertz President's Circle status.",
        keywords: &["hertz"],
    },
];

const CARDS: &[CardSeed] = &[
    CardSeed {
        id: "amexGold",
        name: "gold",
        display_name: "American Express Gold",
        issuer: "American Express",
        annual_fee: 325.0,
        colors: ("#000000", "#D4AF37"),
        benefits: AMEX_GOLD,
    },
    CardSeed {
        id: "amexPlatinum",
        name: "platinum",
        display_name: "American Express Platinum",
        issuer: "American Express",
        annual_fee: 895.0,
        colors: ("#000000", "#8B8C89"),
        benefits: AMEX_PLATINUM,
    },
    CardSeed {
        id: "chaseSapphireReserve",
        name: "sapphire-reserve",
        display_name: "Chase Sapphire Reserve",
        issuer: "Chase",
        annual_fee: 795.0,
        colors: ("#000000", "#003DA5"),
        benefits: CHASE_SAPPHIRE_RESERVE,
    },
    CardSeed {
        id: "chaseSapphirePreferred",
        name: "sapphire-preferred",
        display_name: "Chase Sapphire Preferred",
        issuer: "Chase",
        annual_fee: 95.0,
        colors: ("#000000", "#003DA5"),
        benefits: CHASE_SAPPHIRE_PREFERRED,
    },
    CardSeed {
        id: "capitalOneVentureX",
        name: "venture-x",
        display_name: "Capital One Venture X",
        issuer: "Capital One",
        annual_fee: 395.0,
        colors: ("#000000", "#C8102E"),
        benefits: CAPITAL_ONE_VENTURE_X,
    },
];

impl BenefitSeed {
    fn to_definition(&self) -> BenefitDefinition {
        BenefitDefinition {
            id: self.id.to_string(),
            name: self.name.to_string(),
            total_amount: self.amount,
            reset_period: self.period,
            description: self.description.to_string(),
            merchant_keywords: self.keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl CardSeed {
    fn to_card(&self) -> CreditCard {
        CreditCard {
            id: self.id.to_string(),
            name: self.name.to_string(),
            display_name: self.display_name.to_string(),
            issuer: self.issuer.to_string(),
            annual_fee: self.annual_fee,
            theme: Some(CardTheme {
                primary: self.colors.0.to_string(),
                secondary: self.colors.1.to_string(),
            }),
            benefits: self.benefits.iter().map(BenefitSeed::to_definition).collect(),
        }
    }
}

/// The cards shipped with the binary, in display order.
pub fn builtin_catalog() -> Vec<CreditCard> {
    CARDS.iter().map(CardSeed::to_card).collect()
}

/// Read a catalog from a JSON array of cards.
pub fn load_catalog(path: &Path) -> Result<Vec<CreditCard>> {
    let content = std::fs::read_to_string(path)?;
    let cards: Vec<CreditCard> = serde_json::from_str(&content)?;
    tracing::debug!(path = %path.display(), cards = cards.len(), "loaded catalog");
    Ok(cards)
}

/// Resolve the catalog for a command: explicit path, then the configured
/// path, then the built-in cards.
pub fn active_catalog(override_path: Option<&str>, settings: &Settings) -> Result<Vec<CreditCard>> {
    match override_path.or(settings.catalog_path.as_deref()) {
        Some(path) => load_catalog(Path::new(path)),
        None => Ok(builtin_catalog()),
    }
}

pub fn find_card<'a>(catalog: &'a [CreditCard], id: &str) -> Option<&'a CreditCard> {
    catalog.iter().find(|c| c.id == id)
}

/// Fresh, zeroed working benefits for one analysis run.
pub fn initialize_benefits(card: &CreditCard) -> Vec<Benefit> {
    card.benefits.iter().map(Benefit::from_definition).collect()
}
