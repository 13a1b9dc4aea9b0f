use serde::Serialize;

/// A record from the built-in catalog, baked in at compile time. Catalog ids
/// are plain numerals and never carry the `nft-` marker reserved for
/// chain-sourced stories.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockStory {
    pub id: &'static str,
    pub title: &'static str,
    pub author: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub tags: &'static [&'static str],
    pub premium: bool,
    pub cover: &'static str,
}

pub const CATEGORIES: [&str; 8] = [
    "Romance", "Fantasy", "Adventure", "Mystery", "Horror", "Sci-Fi", "Drama", "Comedy",
];

pub const STORIES: [MockStory; 8] = [
    MockStory {
        id: "1",
        title: "Whispers of the Ember City",
        author: "A. K. Moreno",
        description: "In a city fueled by embers, a courier discovers a conspiracy that could extinguish its last light.",
        category: "Fantasy",
        tags: &["magic", "city", "conspiracy"],
        premium: false,
        cover: "/fantasy-book-cover.png",
    },
    MockStory {
        id: "2",
        title: "Letters from the Edge of Tomorrow",
        author: "Naomi Park",
        description: "Time-bent letters reconnect two strangers across decades as they unravel a paradox.",
        category: "Sci-Fi",
        tags: &["time", "romance"],
        premium: true,
        cover: "/sci-fi-book-cover.png",
    },
    MockStory {
        id: "3",
        title: "The Last Library",
        author: "Hassan El-Fayed",
        description: "A young archivist must protect the remnants of human stories from a regime that forgets by force.",
        category: "Drama",
        tags: &["dystopia", "books"],
        premium: false,
        cover: "/drama-book-cover.jpg",
    },
    MockStory {
        id: "4",
        title: "Midnight Bargains",
        author: "C. W. Lark",
        description: "A deal with a night market broker spirals into a web of debts and desires.",
        category: "Romance",
        tags: &["market", "deal"],
        premium: true,
        cover: "/romance-book-cover.png",
    },
    MockStory {
        id: "5",
        title: "The Painted Door",
        author: "Evelyn Cho",
        description: "A muralist discovers her art is a portal to places she has only dreamed of.",
        category: "Adventure",
        tags: &["portal", "art"],
        premium: false,
        cover: "/adventure-book-cover.png",
    },
    MockStory {
        id: "6",
        title: "Shadow Ledger",
        author: "Raj Mehta",
        description: "An accountant turned sleuth tracks missing millions through a labyrinth of shell companies.",
        category: "Mystery",
        tags: &["crime", "finance"],
        premium: false,
        cover: "/mystery-book-cover.png",
    },
    MockStory {
        id: "7",
        title: "Echoes in the Pines",
        author: "Mira Valdez",
        description: "Hikers vanish in a forest that remembers more than it should.",
        category: "Horror",
        tags: &["forest", "missing"],
        premium: true,
        cover: "/horror-book-cover.png",
    },
    MockStory {
        id: "8",
        title: "Stage Left",
        author: "Jonah Rees",
        description: "A washed-up comedian finds a second act in the unlikeliest of clubs.",
        category: "Comedy",
        tags: &["comedy", "redemption"],
        premium: false,
        cover: "/comedy-book-cover.jpg",
    },
];

pub const SEARCH_RESULT_CAP: usize = 8;

/// Case-insensitive substring filter by title, author or tag. A blank query
/// matches nothing; results are capped at [`SEARCH_RESULT_CAP`].
pub fn search(stories: &[MockStory], query: &str) -> Vec<MockStory> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return Vec::new();
    }
    stories
        .iter()
        .filter(|s| {
            s.title.to_lowercase().contains(&q)
                || s.author.to_lowercase().contains(&q)
                || s.tags.iter().any(|t| t.to_lowercase().contains(&q))
        })
        .take(SEARCH_RESULT_CAP)
        .copied()
        .collect()
}

pub fn story_by_id(id: &str) -> Option<&'static MockStory> {
    STORIES.iter().find(|s| s.id == id)
}

pub fn stories_by_category(name: &str) -> Vec<&'static MockStory> {
    STORIES
        .iter()
        .filter(|s| s.category.eq_ignore_ascii_case(name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_query_matches_nothing() {
        assert!(search(&STORIES, "").is_empty());
        assert!(search(&STORIES, "   ").is_empty());
    }

    #[test]
    fn matches_title_author_and_tag() {
        let by_title = search(&STORIES, "ember");
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].id, "1");

        let by_author = search(&STORIES, "naomi");
        assert_eq!(by_author.len(), 1);
        assert_eq!(by_author[0].id, "2");

        let by_tag = search(&STORIES, "dystopia");
        assert_eq!(by_tag.len(), 1);
        assert_eq!(by_tag[0].id, "3");
    }

    #[test]
    fn is_case_insensitive() {
        assert_eq!(search(&STORIES, "EMBER"), search(&STORIES, "ember"));
    }

    #[test]
    fn caps_results_at_eight() {
        const FILLER: MockStory = MockStory {
            id: "x",
            title: "The Repeated Tale",
            author: "Anon",
            description: "",
            category: "Drama",
            tags: &[],
            premium: false,
            cover: "/placeholder.svg",
        };
        let many = [FILLER; 12];
        assert_eq!(search(&many, "repeated").len(), SEARCH_RESULT_CAP);
    }

    #[test]
    fn lookup_helpers() {
        assert_eq!(story_by_id("4").map(|s| s.title), Some("Midnight Bargains"));
        assert!(story_by_id("nft-4").is_none());
        assert_eq!(stories_by_category("horror").len(), 1);
    }

    #[test]
    fn every_category_is_known() {
        for s in STORIES.iter() {
            assert!(CATEGORIES.contains(&s.category), "unknown category {}", s.category);
        }
    }
}
