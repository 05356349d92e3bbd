//! Plain-text rendering of catalog state for the terminal.

use crate::api::{AiringStatus, AnimeEntry, Recommendation};
use crate::controller::{QueryState, View};
use shared::Translations;
use std::fmt::Write;

/// Genres shown on a one-line card before collapsing into "+N"
const CARD_GENRES: usize = 3;

pub fn status_label(status: AiringStatus, t: &Translations) -> Option<&'static str> {
    match status {
        AiringStatus::CurrentlyAiring => Some(t.currently_airing),
        AiringStatus::FinishedAiring => Some(t.finished_airing),
        AiringStatus::NotYetAired => Some(t.not_yet_aired),
        AiringStatus::Other => None,
    }
}

/// One-line card for a listing
pub fn entry_line(entry: &AnimeEntry, t: &Translations) -> String {
    let mut line = format!(
        "#{:<6} {:<5} {}",
        entry.mal_id,
        entry.score_label(),
        entry.display_title()
    );

    if let Some(year) = entry.year {
        let _ = write!(line, " ({})", year);
    }
    if let Some(episodes) = entry.episodes {
        let _ = write!(line, " · {} {}", episodes, t.episodes);
    }
    if let Some(studio) = entry.lead_studio() {
        let _ = write!(line, " · {}: {}", t.studio, studio);
    }

    if !entry.genres.is_empty() {
        let shown: Vec<&str> = entry
            .genres
            .iter()
            .take(CARD_GENRES)
            .map(|g| g.name.as_str())
            .collect();
        let _ = write!(line, " [{}", shown.join(", "));
        if entry.genres.len() > CARD_GENRES {
            let _ = write!(line, " +{}", entry.genres.len() - CARD_GENRES);
        }
        line.push(']');
    }

    line
}

/// Whole results screen: heading, cards or the empty/error notice
pub fn listing(state: &QueryState, t: &Translations) -> String {
    let mut out = String::new();

    match state.view() {
        View::Error(kind) => {
            let _ = writeln!(out, "{}", t.error_title);
            let _ = writeln!(out, "{}", kind.message(t));
            let _ = writeln!(out, "({})", t.try_again);
            return out;
        }
        View::Empty => {
            let _ = writeln!(out, "{}", t.no_results);
            let _ = writeln!(out, "{}", t.no_results_desc);
            return out;
        }
        View::Idle | View::Loading | View::Results => {}
    }

    if state.is_searching() {
        let _ = writeln!(
            out,
            "{} \"{}\" ({} {})",
            t.search_results,
            state.query,
            state.results.len(),
            t.found
        );
    } else {
        let _ = writeln!(out, "{}", t.popular_anime);
    }

    for entry in state.displayed() {
        let _ = writeln!(out, "{}", entry_line(entry, t));
    }

    if state.can_load_more() {
        let _ = writeln!(out, "… {}", t.load_more);
    }

    out
}

/// Detail view for a single entry
pub fn details(entry: &AnimeEntry, t: &Translations) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", entry.display_title());
    if let Some(japanese) = &entry.title_japanese {
        let _ = writeln!(out, "{}", japanese);
    }
    let _ = write!(out, "★ {}", entry.score_label());
    if let Some(scored_by) = entry.scored_by {
        let _ = write!(out, " ({})", scored_by);
    }
    if let Some(year) = entry.year {
        let _ = write!(out, " · {}", year);
    }
    if let Some(episodes) = entry.episodes {
        let _ = write!(out, " · {} {}", episodes, t.episodes);
    }
    if let Some(duration) = &entry.duration {
        let _ = write!(out, " · {}", duration);
    }
    out.push('\n');

    if !entry.genres.is_empty() {
        let names: Vec<&str> = entry.genres.iter().map(|g| g.name.as_str()).collect();
        let _ = writeln!(out, "{}: {}", t.genres, names.join(", "));
    }

    if let Some(status) = &entry.status {
        let label = entry
            .airing_status()
            .and_then(|s| status_label(s, t))
            .unwrap_or(status.as_str());
        let _ = writeln!(out, "{}: {}", t.status, label);
    }
    if let Some(aired) = entry.aired.as_ref().and_then(|a| a.string.as_deref()) {
        let _ = writeln!(out, "{}: {}", t.aired, aired);
    }
    if !entry.studios.is_empty() {
        let names: Vec<&str> = entry.studios.iter().map(|s| s.name.as_str()).collect();
        let _ = writeln!(out, "{}: {}", t.studios, names.join(", "));
    }
    if !entry.producers.is_empty() {
        let names: Vec<&str> = entry
            .producers
            .iter()
            .take(5)
            .map(|p| p.name.as_str())
            .collect();
        let _ = writeln!(out, "{}: {}", t.producers, names.join(", "));
    }

    let stats = [
        (t.rank, entry.rank),
        (t.popularity, entry.popularity),
        (t.members, entry.members),
        (t.favorites, entry.favorites),
    ];
    for (label, value) in stats {
        if let Some(value) = value {
            let _ = writeln!(out, "{}: {}", label, value);
        }
    }

    if let Some(synopsis) = &entry.synopsis {
        let _ = writeln!(out, "\n{}\n{}", t.synopsis, synopsis);
    }
    if let Some(background) = &entry.background {
        let _ = writeln!(out, "\n{}\n{}", t.background, background);
    }
    if !entry.url.is_empty() {
        let _ = writeln!(out, "\n{}", entry.url);
    }

    out
}

pub fn recommendation_line(rec: &Recommendation) -> String {
    format!("#{:<6} {} ({} votes)", rec.entry.mal_id, rec.entry.title, rec.votes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MalEntity;
    use shared::Language;

    fn fma() -> AnimeEntry {
        serde_json::from_value(serde_json::json!({
            "mal_id": 5114,
            "title": "Hagane no Renkinjutsushi: Fullmetal Alchemist",
            "title_english": "Fullmetal Alchemist: Brotherhood",
            "episodes": 64,
            "score": 9.1,
            "year": 2009,
            "status": "Finished Airing",
            "studios": [{ "mal_id": 4, "name": "Bones" }],
            "genres": [
                { "mal_id": 1, "name": "Action" },
                { "mal_id": 2, "name": "Adventure" },
                { "mal_id": 8, "name": "Drama" },
                { "mal_id": 10, "name": "Fantasy" }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_entry_line() {
        let t = Language::En.translations();

        let line = entry_line(&fma(), t);

        assert!(line.starts_with("#5114"));
        assert!(line.contains("9.1"));
        assert!(line.contains("Fullmetal Alchemist: Brotherhood (2009)"));
        assert!(line.contains("64 episodes"));
        assert!(line.contains("Studio: Bones"));
        assert!(line.contains("[Action, Adventure, Drama +1]"));
    }

    #[test]
    fn test_details_translates_status() {
        let id = Language::Id.translations();

        let text = details(&fma(), id);

        assert!(text.contains("Status: Selesai Tayang"));
        assert!(text.contains("Genre: Action, Adventure, Drama, Fantasy"));
    }

    #[test]
    fn test_details_include_background_producers_duration() {
        let mut entry = fma();
        entry.duration = Some("24 min per ep".to_string());
        entry.background = Some("Won the Tokyo Anime Award in 2010.".to_string());
        let producers = [
            "Aniplex",
            "Square Enix",
            "Mainichi Broadcasting System",
            "Studio Moriken",
            "Dentsu",
            "Extra",
        ];
        entry.producers = producers
            .iter()
            .enumerate()
            .map(|(i, name)| MalEntity {
                mal_id: i as u32 + 1,
                entity_type: "anime".to_string(),
                name: name.to_string(),
                url: String::new(),
            })
            .collect();

        let en = details(&entry, Language::En.translations());
        assert!(en.contains("64 episodes · 24 min per ep"));
        assert!(en.contains(
            "Producers: Aniplex, Square Enix, Mainichi Broadcasting System, Studio Moriken, Dentsu\n"
        ));
        assert!(!en.contains("Extra"));
        assert!(en.contains("Background\nWon the Tokyo Anime Award in 2010."));

        let id = details(&entry, Language::Id.translations());
        assert!(id.contains("Produser: Aniplex"));
        assert!(id.contains("Latar Belakang\n"));
    }

    #[test]
    fn test_listing_popular_heading() {
        let t = Language::En.translations();
        let mut state = QueryState::default();
        state.popular = vec![fma()];

        let text = listing(&state, t);

        assert!(text.starts_with("Popular Anime\n"));
        assert!(text.contains("#5114"));
    }
}
