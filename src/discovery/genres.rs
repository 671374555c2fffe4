//! Static genre and artist tables used by the query strategies.

/// Electronic genres, including subgenres and fusions.
pub const ELECTRONIC_GENRES: &[&str] = &[
    // main
    "electronic",
    "edm",
    "dance",
    "electronica",
    // house
    "house",
    "deep house",
    "tech house",
    "progressive house",
    "tropical house",
    "future house",
    "electro house",
    "bass house",
    "minimal house",
    // techno
    "techno",
    "minimal techno",
    "industrial techno",
    "hard techno",
    "melodic techno",
    // bass music
    "dubstep",
    "drum and bass",
    "bass",
    "future bass",
    "trap",
    "hardstyle",
    "drumstep",
    "breakbeat",
    "jungle",
    "neurofunk",
    // trance
    "trance",
    "progressive trance",
    "psytrance",
    "uplifting trance",
    "vocal trance",
    "goa trance",
    "hard trance",
    // other
    "ambient",
    "downtempo",
    "synthwave",
    "vaporwave",
    "lofi",
    "glitch hop",
    "industrial",
    "idm",
    "experimental electronic",
    // fusion
    "electropop",
    "electroclash",
    "electronic rock",
    "electronic metal",
    "nu disco",
    "disco house",
    "future funk",
];

const POP_GENRES: &[&str] = &[
    "pop",
    "dance pop",
    "electropop",
    "indie pop",
    "synth-pop",
    "k-pop",
    "art pop",
    "experimental pop",
    "hyperpop",
];

const HIP_HOP_GENRES: &[&str] = &[
    "hip hop",
    "rap",
    "trap",
    "drill",
    "grime",
    "conscious hip hop",
    "alternative hip hop",
    "cloud rap",
    "lo-fi hip hop",
];

const ROCK_GENRES: &[&str] = &[
    "rock",
    "alternative rock",
    "indie rock",
    "metal",
    "classic rock",
    "punk",
    "progressive rock",
    "electronic rock",
    "post-rock",
];

const RNB_GENRES: &[&str] = &[
    "r&b",
    "soul",
    "funk",
    "contemporary r&b",
    "neo soul",
    "future soul",
    "electronic soul",
];

const LATIN_GENRES: &[&str] = &[
    "latin",
    "reggaeton",
    "latin pop",
    "salsa",
    "bachata",
    "latin rap",
    "latin electronic",
    "latin house",
];

const JAZZ_GENRES: &[&str] = &[
    "jazz",
    "smooth jazz",
    "jazz fusion",
    "nu jazz",
    "electronic jazz",
    "jazz house",
    "acid jazz",
];

const CLASSICAL_GENRES: &[&str] = &[
    "classical",
    "orchestra",
    "chamber music",
    "opera",
    "symphony",
    "contemporary classical",
    "minimal classical",
];

const WORLD_GENRES: &[&str] = &[
    "world",
    "afrobeat",
    "african electronic",
    "asian electronic",
    "global bass",
    "tribal house",
    "ethnic electronic",
];

const EXPERIMENTAL_GENRES: &[&str] = &[
    "experimental",
    "avant-garde",
    "noise",
    "drone",
    "glitch",
    "industrial",
    "sound art",
];

/// Every genre family, electronic first.
pub const GENRE_FAMILIES: &[&[&str]] = &[
    ELECTRONIC_GENRES,
    POP_GENRES,
    HIP_HOP_GENRES,
    ROCK_GENRES,
    RNB_GENRES,
    LATIN_GENRES,
    JAZZ_GENRES,
    CLASSICAL_GENRES,
    WORLD_GENRES,
    EXPERIMENTAL_GENRES,
];

/// Electronic genres that usually return plenty of results.
pub const POPULAR_ELECTRONIC_GENRES: &[&str] = &[
    "electronic",
    "house",
    "techno",
    "trance",
    "dubstep",
    "drum and bass",
    "edm",
    "dance",
    "electronica",
    "deep house",
    "tech house",
    "future bass",
];

/// Popular genres across all families.
pub const POPULAR_GENRES: &[&str] = &[
    "pop",
    "hip hop",
    "rap",
    "rock",
    "electronic",
    "edm",
    "house",
    "techno",
    "r&b",
    "latin",
    "dance pop",
    "trap",
    "indie",
    "deep house",
    "future bass",
];

pub const ELECTRONIC_ARTISTS: &[&str] = &[
    "Daft Punk",
    "Deadmau5",
    "Aphex Twin",
    "Chemical Brothers",
    "Boards of Canada",
    "Burial",
    "Four Tet",
    "Bonobo",
    "Jon Hopkins",
    "Tycho",
    "Flume",
    "Odesza",
    "Above & Beyond",
    "Eric Prydz",
    "Carl Cox",
    "Nina Kraviz",
    "Boris Brejcha",
    "Skrillex",
    "Calvin Harris",
    "Swedish House Mafia",
    "Fatboy Slim",
    "The Prodigy",
    "Underworld",
    "Massive Attack",
    "Röyksopp",
    "Justice",
    "Disclosure",
    "Jamie xx",
];

pub const POPULAR_ARTISTS: &[&str] = &[
    "Drake",
    "Taylor Swift",
    "Ed Sheeran",
    "The Weeknd",
    "Eminem",
    "Rihanna",
    "Justin Bieber",
    "Ariana Grande",
    "Post Malone",
    "Bad Bunny",
    "BTS",
    "Coldplay",
    "Kanye West",
    "Lady Gaga",
    "Bruno Mars",
];

/// Letters that match the most titles.
pub const COMMON_LETTERS: &[u8] = b"aeiourstlnm";

pub const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Number of genres across all families (duplicates included).
pub fn all_genres_len() -> usize {
    GENRE_FAMILIES.iter().map(|f| f.len()).sum()
}

/// Genre at a flat position across all families, as if they were one list.
pub fn genre_at(mut index: usize) -> Option<&'static str> {
    for family in GENRE_FAMILIES {
        if index < family.len() {
            return Some(family[index]);
        }
        index -= family.len();
    }
    None
}
