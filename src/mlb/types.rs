use serde::{Deserialize, Serialize};

/// Shapes returned by the upstream stats API. The schema is not under our
/// control, so every field the application does not structurally need is
/// optional and defaults when absent.

#[derive(Debug, Deserialize)]
pub struct LeaguesEnvelope {
    #[serde(default)]
    pub leagues: Vec<League>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct League {
    pub id: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub abbreviation: Option<String>,
    #[serde(default)]
    pub season: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StandingsEnvelope {
    #[serde(default)]
    pub records: Vec<DivisionRecord>,
}

/// One division block; standings come grouped by division and get
/// flattened before they are served.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DivisionRecord {
    #[serde(default)]
    pub team_records: Vec<TeamStanding>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStanding {
    pub team: TeamRef,
    #[serde(default)]
    pub wins: Option<u32>,
    #[serde(default)]
    pub losses: Option<u32>,
    /// Upstream sends percentages as strings, e.g. ".571".
    #[serde(default)]
    pub winning_percentage: Option<String>,
    #[serde(default)]
    pub games_back: Option<String>,
    #[serde(default)]
    pub wild_card_games_back: Option<String>,
    #[serde(default)]
    pub streak: Option<Streak>,
    #[serde(default)]
    pub runs_scored: Option<i32>,
    #[serde(default)]
    pub runs_allowed: Option<i32>,
    #[serde(default)]
    pub run_differential: Option<i32>,
}

impl TeamStanding {
    /// Winning percentage as a number for ordering; missing or malformed
    /// values sort last.
    pub fn pct_value(&self) -> f64 {
        self.winning_percentage
            .as_deref()
            .and_then(|pct| pct.parse().ok())
            .unwrap_or(f64::NEG_INFINITY)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamRef {
    pub id: i32,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Streak {
    #[serde(default)]
    pub streak_code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TeamsEnvelope {
    #[serde(default)]
    pub teams: Vec<Team>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: i32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub first_year_of_play: Option<String>,
    #[serde(default)]
    pub league: Option<NamedRef>,
    #[serde(default)]
    pub division: Option<NamedRef>,
    #[serde(default)]
    pub venue: Option<NamedRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedRef {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PeopleEnvelope {
    #[serde(default)]
    pub people: Vec<Player>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: i32,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub primary_number: Option<String>,
    #[serde(default)]
    pub current_team: Option<NamedRef>,
    #[serde(default)]
    pub primary_position: Option<Position>,
    #[serde(default)]
    pub current_age: Option<u32>,
    #[serde(default)]
    pub height: Option<String>,
    #[serde(default)]
    pub weight: Option<u32>,
    #[serde(default)]
    pub birth_country: Option<String>,
    #[serde(default)]
    pub mlb_debut_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub abbreviation: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standings_tolerate_missing_fields() {
        let json = serde_json::json!({
            "records": [
                {
                    "teamRecords": [
                        { "team": { "id": 147, "name": "New York Yankees" }, "wins": 94 },
                        { "team": { "id": 110 } }
                    ]
                }
            ]
        });
        let envelope: StandingsEnvelope = serde_json::from_value(json).unwrap();
        let rows = &envelope.records[0].team_records;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].wins, Some(94));
        assert!(rows[1].team.name.is_none());
        assert!(rows[1].winning_percentage.is_none());
    }

    #[test]
    fn pct_value_parses_upstream_dot_notation() {
        let row: TeamStanding = serde_json::from_value(serde_json::json!({
            "team": { "id": 1 },
            "winningPercentage": ".571"
        }))
        .unwrap();
        assert!((row.pct_value() - 0.571).abs() < f64::EPSILON);
    }

    #[test]
    fn pct_value_sorts_missing_values_last() {
        let row: TeamStanding =
            serde_json::from_value(serde_json::json!({ "team": { "id": 1 } })).unwrap();
        assert_eq!(row.pct_value(), f64::NEG_INFINITY);
    }

    #[test]
    fn player_tolerates_sparse_payload() {
        let player: Player = serde_json::from_value(serde_json::json!({
            "id": 660271,
            "fullName": "Shohei Ohtani"
        }))
        .unwrap();
        assert_eq!(player.full_name.as_deref(), Some("Shohei Ohtani"));
        assert!(player.primary_position.is_none());
        assert!(player.current_team.is_none());
    }

    #[test]
    fn empty_envelopes_deserialize() {
        let teams: TeamsEnvelope = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(teams.teams.is_empty());
        let people: PeopleEnvelope = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(people.people.is_empty());
    }
}
