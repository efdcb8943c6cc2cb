use std::fmt;

use rand::Rng;

const ADJECTIVES: &[&str] = &[
    "Amber", "Brisk", "Coiled", "Dashing", "Emerald", "Gliding", "Hungry", "Jade",
    "Nimble", "Rapid", "Sleek", "Slithering", "Speedy", "Striped", "Venomous", "Winding",
];

const NOUNS: &[&str] = &[
    "Adder", "Anaconda", "Asp", "Boa", "Cobra", "Krait", "Mamba", "Python",
    "Racer", "Rattler", "Serpent", "Sidewinder", "Taipan", "Viper",
];

/// Identity of one connected leaderboard observer. Connections are anonymous,
/// so the server mints an id at upgrade time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientId(String);

impl ClientId {
    pub fn new(id: String) -> Self {
        Self(id)
    }

    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let adjective = ADJECTIVES[rng.random_range(0..ADJECTIVES.len())];
        let noun = NOUNS[rng.random_range(0..NOUNS.len())];
        let tag: u16 = rng.random_range(0..10_000);
        Self(format!("{}{}-{:04}", adjective, noun, tag))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ClientId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<ClientId> for String {
    fn from(id: ClientId) -> Self {
        id.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
