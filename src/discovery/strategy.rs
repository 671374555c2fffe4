use std::fmt;

use rand::{
    Rng,
    seq::{IndexedRandom, SliceRandom},
};

use crate::{
    deezer::MAX_SEARCH_LIMIT,
    discovery::{RetryPolicy, genres},
};

const ELECTRONIC_BIAS: f64 = 0.4;
const POPULAR_BIAS: f64 = 0.6;

const FIRST_YEAR: u32 = 1970;
const LAST_YEAR: u32 = 2023;

/// One query-construction heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Artist,
    Genre,
    Letters,
    Year,
    Combined,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::Artist,
        Strategy::Genre,
        Strategy::Letters,
        Strategy::Year,
        Strategy::Combined,
    ];

    /// Upper bound of the random result offset. Narrow queries match fewer
    /// records, so their window is smaller.
    fn offset_window(self) -> u32 {
        match self {
            Strategy::Artist => 50,
            Strategy::Genre => 100,
            Strategy::Letters => u32::MAX,
            Strategy::Year => 100,
            Strategy::Combined => 50,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Strategy::Artist => "artist",
            Strategy::Genre => "genre",
            Strategy::Letters => "letters",
            Strategy::Year => "year",
            Strategy::Combined => "combined",
        };
        write!(f, "{}", s)
    }
}

/// A ready-to-run search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub strategy: Strategy,
    pub query: String,
    pub limit: u32,
    pub offset: u32,
}

/// Builds search queries from the five strategies.
#[derive(Debug, Clone)]
pub struct QueryStrategySelector {
    limit: u32,
    max_offset: u32,
}

impl Default for QueryStrategySelector {
    fn default() -> Self {
        Self::new(MAX_SEARCH_LIMIT, 200)
    }
}

impl QueryStrategySelector {
    pub fn new(limit: u32, max_offset: u32) -> Self {
        Self {
            limit: limit.clamp(1, MAX_SEARCH_LIMIT),
            max_offset,
        }
    }

    /// Records requested per search.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn max_offset(&self) -> u32 {
        self.max_offset
    }

    /// Builds one query with the given strategy.
    pub fn query_for<R: Rng + ?Sized>(&self, strategy: Strategy, rng: &mut R) -> SearchQuery {
        let query = match strategy {
            Strategy::Artist => format!("artist:'{}'", random_artist(rng)),
            Strategy::Genre => format!("genre:'{}'", random_genre(rng)),
            Strategy::Letters => random_letters(rng),
            Strategy::Year => format!("year:'{}'", rng.random_range(FIRST_YEAR..=LAST_YEAR)),
            Strategy::Combined => combined_terms(rng),
        };

        let window = strategy.offset_window().min(self.max_offset);
        SearchQuery {
            strategy,
            query,
            limit: self.limit,
            offset: rng.random_range(0..=window),
        }
    }

    /// The bare letter query used once every strategy has failed.
    pub fn letter_fallback<R: Rng + ?Sized>(&self, rng: &mut R) -> SearchQuery {
        self.query_for(Strategy::Letters, rng)
    }

    /// Lays out every request one fetch may make, in order: for each outer
    /// attempt the strategies are shuffled and the first
    /// `strategies_per_attempt` are kept. A final letter query closes the plan.
    pub fn plan<R: Rng + ?Sized>(&self, policy: &RetryPolicy, rng: &mut R) -> Vec<SearchQuery> {
        let per_attempt = policy.strategies_per_attempt.min(Strategy::ALL.len());
        let mut plan = Vec::with_capacity(policy.max_attempts * per_attempt + 1);

        for _ in 0..policy.max_attempts {
            let mut order = Strategy::ALL;
            order.shuffle(rng);
            for strategy in order.into_iter().take(per_attempt) {
                plan.push(self.query_for(strategy, rng));
            }
        }

        plan.push(self.letter_fallback(rng));
        plan
    }
}

fn pick<R: Rng + ?Sized>(pool: &[&'static str], rng: &mut R) -> &'static str {
    pool.choose(rng).copied().unwrap_or("pop")
}

/// Electronic artists with a 40% bias, else anyone from the combined pool.
pub fn random_artist<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    if rng.random_bool(ELECTRONIC_BIAS) {
        return pick(genres::ELECTRONIC_ARTISTS, rng);
    }

    let total = genres::POPULAR_ARTISTS.len() + genres::ELECTRONIC_ARTISTS.len();
    let index = rng.random_range(0..total);
    genres::POPULAR_ARTISTS
        .get(index)
        .or_else(|| {
            genres::ELECTRONIC_ARTISTS.get(index - genres::POPULAR_ARTISTS.len())
        })
        .copied()
        .unwrap_or("Daft Punk")
}

/// 40% electronic family, otherwise the full catalog; within either, 60%
/// popular and 40% long tail.
pub fn random_genre<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    let popular = |rng: &mut R| rng.random_bool(POPULAR_BIAS);

    if rng.random_bool(ELECTRONIC_BIAS) {
        if popular(rng) {
            return pick(genres::POPULAR_ELECTRONIC_GENRES, rng);
        }
        return pick(genres::ELECTRONIC_GENRES, rng);
    }

    if popular(rng) {
        return pick(genres::POPULAR_GENRES, rng);
    }
    let index = rng.random_range(0..genres::all_genres_len());
    genres::genre_at(index).unwrap_or("pop")
}

/// One common letter (60%), two common letters (30%) or any letter (10%).
pub fn random_letters<R: Rng + ?Sized>(rng: &mut R) -> String {
    let common = |rng: &mut R| {
        let i = rng.random_range(0..genres::COMMON_LETTERS.len());
        genres::COMMON_LETTERS[i] as char
    };

    let roll: f64 = rng.random();
    if roll < 0.6 {
        common(rng).to_string()
    } else if roll < 0.9 {
        [common(rng), common(rng)].iter().collect()
    } else {
        let i = rng.random_range(0..genres::ALPHABET.len());
        (genres::ALPHABET[i] as char).to_string()
    }
}

/// Zero to two of {genre, decade} clauses, with a bare letter clause when
/// neither was chosen.
fn combined_terms<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut clauses: Vec<String> = Vec::with_capacity(2);

    if rng.random_bool(0.5) {
        clauses.push(format!("genre:'{}'", random_genre(rng)));
    }
    if rng.random_bool(0.5) {
        let decade = FIRST_YEAR + 10 * rng.random_range(0..=(LAST_YEAR - FIRST_YEAR) / 10);
        let year = (decade + rng.random_range(0..10)).min(LAST_YEAR);
        clauses.push(format!("year:'{}'", year));
    }
    if clauses.is_empty() {
        clauses.push(random_letters(rng));
    }

    clauses.join(" ")
}
