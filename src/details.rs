use chrono::NaiveDate;

use crate::media::{CastMember, CrewMember, MovieDetails};

const WRITER_JOBS: [&str; 3] = ["Screenplay", "Writer", "Story"];
const KEY_CREW_JOBS: [&str; 7] = [
    "Director",
    "Producer",
    "Executive Producer",
    "Screenplay",
    "Writer",
    "Director of Photography",
    "Original Music Composer",
];
const KEY_CREW_LIMIT: usize = 12;
pub const TOP_CAST_LIMIT: usize = 8;
pub const SIMILAR_LIMIT: usize = 5;
const NOW_PLAYING_DAYS: i64 = 90;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseStatus {
    ComingSoon,
    NowPlaying,
    Released,
    Other(String),
    Unknown,
}

impl std::fmt::Display for ReleaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReleaseStatus::ComingSoon => write!(f, "Coming Soon"),
            ReleaseStatus::NowPlaying => write!(f, "Now Playing"),
            ReleaseStatus::Released => write!(f, "Released"),
            ReleaseStatus::Other(status) => write!(f, "{}", status),
            ReleaseStatus::Unknown => write!(f, "Unknown"),
        }
    }
}

pub fn directors(details: &MovieDetails) -> Vec<&CrewMember> {
    details
        .credits
        .crew
        .iter()
        .filter(|person| person.job == "Director")
        .collect()
}

pub fn writers(details: &MovieDetails) -> Vec<&CrewMember> {
    details
        .credits
        .crew
        .iter()
        .filter(|person| WRITER_JOBS.contains(&person.job.as_str()))
        .collect()
}

pub fn key_crew(details: &MovieDetails) -> Vec<&CrewMember> {
    details
        .credits
        .crew
        .iter()
        .filter(|person| KEY_CREW_JOBS.contains(&person.job.as_str()))
        .take(KEY_CREW_LIMIT)
        .collect()
}

/// First cast members to feature, and how many were left out.
pub fn top_cast(details: &MovieDetails) -> (&[CastMember], usize) {
    let cast = &details.credits.cast;
    let shown = cast.len().min(TOP_CAST_LIMIT);
    (&cast[..shown], cast.len() - shown)
}

pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

pub fn format_money(amount: Option<u64>) -> String {
    match amount {
        Some(amount) if amount > 0 => format!("${}", group_thousands(amount)),
        _ => String::from("N/A"),
    }
}

pub fn parse_release_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()
}

pub fn format_date(date: Option<&str>) -> String {
    date.and_then(parse_release_date)
        .map(|d| d.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|| String::from("N/A"))
}

pub fn format_runtime(minutes: u32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

pub fn format_rating(vote_average: Option<f32>) -> String {
    match vote_average {
        Some(rating) if rating > 0.0 => format!("{:.1}", rating),
        _ => String::from("N/A"),
    }
}

pub fn format_vote_count(votes: u64) -> String {
    format!("from {} votes", group_thousands(votes))
}

pub fn plural(label: &str, count: usize) -> String {
    if count > 1 {
        format!("{}s", label)
    } else {
        label.to_string()
    }
}

pub fn release_status(details: &MovieDetails, today: NaiveDate) -> ReleaseStatus {
    let Some(released_on) = details.release_date().and_then(parse_release_date) else {
        return ReleaseStatus::Unknown;
    };

    if released_on > today {
        return ReleaseStatus::ComingSoon;
    }

    match details.status.as_deref() {
        Some("Released") => {
            if (today - released_on).num_days() <= NOW_PLAYING_DAYS {
                ReleaseStatus::NowPlaying
            } else {
                ReleaseStatus::Released
            }
        }
        Some(status) if !status.is_empty() => ReleaseStatus::Other(status.to_string()),
        _ => ReleaseStatus::Released,
    }
}

pub fn country_names(details: &MovieDetails) -> Option<String> {
    join_non_empty(details.production_countries.iter().map(|c| c.name.as_str()))
}

pub fn spoken_language_names(details: &MovieDetails) -> Option<String> {
    join_non_empty(details.spoken_languages.iter().map(|l| l.display_name()))
}

fn join_non_empty<'a>(names: impl Iterator<Item = &'a str>) -> Option<String> {
    let joined = names
        .filter(|name| !name.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    (!joined.is_empty()).then_some(joined)
}

pub fn language_name(code: &str) -> String {
    let name = match code.to_ascii_lowercase().as_str() {
        "en" => "English",
        "fr" => "French",
        "de" => "German",
        "es" => "Spanish",
        "it" => "Italian",
        "pt" => "Portuguese",
        "ja" => "Japanese",
        "ko" => "Korean",
        "zh" => "Chinese",
        "cn" => "Cantonese",
        "hi" => "Hindi",
        "ru" => "Russian",
        "sv" => "Swedish",
        "da" => "Danish",
        "no" => "Norwegian",
        "fi" => "Finnish",
        "nl" => "Dutch",
        "pl" => "Polish",
        "tr" => "Turkish",
        "th" => "Thai",
        "ar" => "Arabic",
        "he" => "Hebrew",
        "fa" => "Persian",
        "id" => "Indonesian",
        "te" => "Telugu",
        "ta" => "Tamil",
        "ml" => "Malayalam",
        "uk" => "Ukrainian",
        "cs" => "Czech",
        "hu" => "Hungarian",
        "el" => "Greek",
        _ => return code.to_ascii_uppercase(),
    };
    name.to_string()
}

pub fn imdb_url(imdb_id: &str) -> String {
    format!("https://www.imdb.com/title/{}", imdb_id)
}

pub fn collection_url(collection_id: u64) -> String {
    format!("https://www.themoviedb.org/collection/{}", collection_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn details(value: serde_json::Value) -> MovieDetails {
        serde_json::from_value(value).unwrap()
    }

    fn day(s: &str) -> NaiveDate {
        parse_release_date(s).unwrap()
    }

    fn crewed() -> MovieDetails {
        let cast: Vec<serde_json::Value> = (1..=11)
            .map(|i| json!({"id": i, "name": format!("Actor {}", i)}))
            .collect();
        details(json!({
            "id": 1,
            "title": "Inception",
            "credits": {
                "cast": cast,
                "crew": [
                    {"id": 10, "name": "Christopher Nolan", "job": "Director"},
                    {"id": 10, "name": "Christopher Nolan", "job": "Screenplay"},
                    {"id": 11, "name": "Emma Thomas", "job": "Producer"},
                    {"id": 12, "name": "Hans Zimmer", "job": "Original Music Composer"},
                    {"id": 13, "name": "Someone", "job": "Story"},
                    {"id": 14, "name": "Grip", "job": "Key Grip"}
                ]
            }
        }))
    }

    #[test]
    fn crew_extraction_by_job() {
        let movie = crewed();
        let directors: Vec<_> = directors(&movie).iter().map(|p| p.name.as_str()).collect();
        assert_eq!(directors, vec!["Christopher Nolan"]);

        let writers: Vec<_> = writers(&movie).iter().map(|p| p.job.as_str()).collect();
        assert_eq!(writers, vec!["Screenplay", "Story"]);

        assert_eq!(key_crew(&movie).len(), 4);
    }

    #[test]
    fn top_cast_counts_the_rest() {
        let movie = crewed();
        let (shown, rest) = top_cast(&movie);
        assert_eq!(shown.len(), TOP_CAST_LIMIT);
        assert_eq!(rest, 3);
    }

    #[test]
    fn crew_helpers_tolerate_missing_credits() {
        let movie = details(json!({"id": 2, "title": "Sparse"}));
        assert!(directors(&movie).is_empty());
        assert!(writers(&movie).is_empty());
        assert_eq!(top_cast(&movie).1, 0);
    }

    #[test]
    fn money_formatting() {
        assert_eq!(format_money(None), "N/A");
        assert_eq!(format_money(Some(0)), "N/A");
        assert_eq!(format_money(Some(1_500_000)), "$1,500,000");
        assert_eq!(format_money(Some(999)), "$999");
        assert_eq!(format_money(Some(1_000)), "$1,000");
    }

    #[test]
    fn date_and_runtime_formatting() {
        assert_eq!(format_date(Some("2010-07-16")), "July 16, 2010");
        assert_eq!(format_date(Some("")), "N/A");
        assert_eq!(format_date(Some("soon")), "N/A");
        assert_eq!(format_date(None), "N/A");
        assert_eq!(format_runtime(148), "2h 28m");
        assert_eq!(format_runtime(45), "0h 45m");
    }

    #[test]
    fn rating_and_votes() {
        assert_eq!(format_rating(Some(8.36)), "8.4");
        assert_eq!(format_rating(Some(0.0)), "N/A");
        assert_eq!(format_rating(None), "N/A");
        assert_eq!(format_vote_count(35120), "from 35,120 votes");
        assert_eq!(plural("Director", 1), "Director");
        assert_eq!(plural("Writer", 2), "Writers");
    }

    #[test]
    fn status_derivation() {
        let today = day("2024-06-01");
        let status_of = |release: Option<&str>, status: Option<&str>| {
            let movie = details(json!({
                "id": 3,
                "title": "X",
                "release_date": release,
                "status": status
            }));
            release_status(&movie, today)
        };

        assert_eq!(status_of(None, Some("Released")), ReleaseStatus::Unknown);
        assert_eq!(status_of(Some(""), Some("Released")), ReleaseStatus::Unknown);
        assert_eq!(
            status_of(Some("2024-12-25"), Some("Post Production")),
            ReleaseStatus::ComingSoon
        );
        assert_eq!(
            status_of(Some("2024-04-01"), Some("Released")),
            ReleaseStatus::NowPlaying
        );
        assert_eq!(
            status_of(Some("2024-03-03"), Some("Released")),
            ReleaseStatus::NowPlaying
        );
        assert_eq!(
            status_of(Some("2024-03-02"), Some("Released")),
            ReleaseStatus::Released
        );
        assert_eq!(
            status_of(Some("2024-01-01"), Some("Canceled")),
            ReleaseStatus::Other(String::from("Canceled"))
        );
        assert_eq!(status_of(Some("2024-01-01"), None), ReleaseStatus::Released);
        assert_eq!(ReleaseStatus::ComingSoon.to_string(), "Coming Soon");
    }

    #[test]
    fn language_and_links() {
        assert_eq!(language_name("en"), "English");
        assert_eq!(language_name("xx"), "XX");
        assert_eq!(imdb_url("tt1375666"), "https://www.imdb.com/title/tt1375666");
        assert_eq!(
            collection_url(86311),
            "https://www.themoviedb.org/collection/86311"
        );
    }

    #[test]
    fn joined_names() {
        let movie = details(json!({
            "id": 4,
            "title": "Amélie",
            "production_countries": [
                {"iso_3166_1": "FR", "name": "France"},
                {"iso_3166_1": "DE", "name": "Germany"}
            ],
            "spoken_languages": [{"iso_639_1": "fr", "english_name": "French", "name": "Français"}]
        }));
        assert_eq!(country_names(&movie).as_deref(), Some("France, Germany"));
        assert_eq!(spoken_language_names(&movie).as_deref(), Some("French"));
        assert_eq!(country_names(&crewed()), None);
    }
}
